use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::webhook_service::InvoiceNotification;
use crate::errors::AppError;
use crate::AppWebhookService;

/// Invoice callback payload as delivered by the payment provider. The
/// `external_id` is the order UUID this service supplied at invoice
/// creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct XenditInvoiceCallback {
    pub external_id: String,
    pub status: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_channel: String,
}

/// POST /webhooks/xendit/invoice
///
/// Applies a provider paid-notification to the referenced order. Safe to
/// deliver more than once.
#[utoipa::path(
    post,
    path = "/webhooks/xendit/invoice",
    request_body = XenditInvoiceCallback,
    responses(
        (status = 200, description = "Notification processed"),
        (status = 404, description = "No order matches the external id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "webhooks"
)]
pub async fn receive_invoice(
    service: web::Data<AppWebhookService>,
    body: web::Json<XenditInvoiceCallback>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let external_id = Uuid::parse_str(&body.external_id)
        .map_err(|_| AppError::NotFound("Order not found".to_string()))?;

    let notification = InvoiceNotification {
        external_id,
        status: body.status,
        payment_method: body.payment_method,
        payment_channel: body.payment_channel,
    };

    web::block(move || service.receive_invoice(&notification))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "OK" })))
}
