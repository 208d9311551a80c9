use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::identity::Claims;
use crate::domain::order::{
    CreateOrderCommand, OrderLineRequest, OrderView, PageRequest, SortDirection, SortField,
};
use crate::domain::status::OrderStatus;
use crate::errors::AppError;
use crate::AppOrderService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderProductRequest {
    pub product_id: Uuid,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub full_name: String,
    pub address: String,
    pub phone_number: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub products: Vec<CreateOrderProductRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub name: String,
    /// Snapshot price at order time as a decimal string, e.g. "10000"
    pub price: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    pub id: Uuid,
    pub number: String,
    pub status_code: String,
    pub user_full_name: String,
    pub address: String,
    pub phone_number: String,
    pub notes: Option<String>,
    pub total: String,
    pub created_at: String,
    pub expired_at: String,
    pub xendit_invoice_url: String,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListItemResponse {
    pub id: Uuid,
    pub number: String,
    pub customer: String,
    pub status_code: String,
    pub total: String,
    pub created_at: String,
    pub xendit_invoice_url: String,
    pub products: Vec<OrderItemResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationResponse {
    pub current_page: i64,
    pub item_per_page: i64,
    pub total_item_count: i64,
    pub total_page_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderListItemResponse>,
    pub pagination: PaginationResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 10, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Sort field: number | customer | total | created_at
    pub sort_by: Option<String>,
    /// Sort direction: asc | desc
    pub sort_direction: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub new_status_code: String,
}

fn item_responses(order: &OrderView) -> Vec<OrderItemResponse> {
    order
        .items
        .iter()
        .map(|item| OrderItemResponse {
            product_id: item.product_id,
            name: item.product_name.clone(),
            price: item.product_price.to_string(),
            quantity: item.quantity,
        })
        .collect()
}

impl From<&ListOrdersParams> for PageRequest {
    fn from(params: &ListOrdersParams) -> Self {
        let sort = params.sort_by.as_deref().and_then(SortField::parse).map(
            |field| {
                let direction = match params.sort_direction.as_deref() {
                    Some("desc") => SortDirection::Desc,
                    _ => SortDirection::Asc,
                };
                (field, direction)
            },
        );
        PageRequest {
            page: params.page.max(1),
            limit: params.limit.clamp(1, 100),
            sort,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates an order with priced-at-order-time line items, reserves the next
/// order number and opens a payment invoice, all in one transaction.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = CreateOrderResponse),
        (status = 400, description = "Business-rule rejection (e.g. unknown product)"),
        (status = 401, description = "Missing or invalid identity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<AppOrderService>,
    claims: Claims,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let command = CreateOrderCommand {
        full_name: body.full_name,
        address: body.address,
        phone_number: body.phone_number,
        notes: body.notes,
        products: body
            .products
            .into_iter()
            .map(|p| OrderLineRequest {
                product_id: p.product_id,
                quantity: p.quantity,
            })
            .collect(),
    };

    let id = web::block(move || service.create_order(&claims, &command))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreateOrderResponse { id }))
}

/// GET /orders
///
/// Paginated order list with items. Admins see every order, customers only
/// their own. Statuses are reported with payment-window expiry applied.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 10, max 100)"),
        ("sort_by" = Option<String>, Query, description = "number | customer | total | created_at"),
        ("sort_direction" = Option<String>, Query, description = "asc | desc"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 401, description = "Missing or invalid identity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<AppOrderService>,
    claims: Claims,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::from(&query.into_inner());

    let result = web::block(move || service.list_orders(&claims, &page))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items = result
        .items
        .iter()
        .map(|order| OrderListItemResponse {
            id: order.id,
            number: order.number.clone(),
            customer: order.user_full_name.clone(),
            status_code: order.status.as_str().to_string(),
            total: order.total.to_string(),
            created_at: order.created_at.to_rfc3339(),
            xendit_invoice_url: order.xendit_invoice_url.clone(),
            products: item_responses(order),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items,
        pagination: PaginationResponse {
            current_page: result.meta.current_page,
            item_per_page: result.meta.item_per_page,
            total_item_count: result.meta.total_item_count,
            total_page_count: result.meta.total_page_count,
        },
    }))
}

/// GET /orders/{id}
///
/// Order detail with line items; owner or admin only.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderDetailResponse),
        (status = 400, description = "Order belongs to another user"),
        (status = 401, description = "Missing or invalid identity"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppOrderService>,
    claims: Claims,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service.get_order_detail(&claims, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items = item_responses(&order);
    Ok(HttpResponse::Ok().json(OrderDetailResponse {
        id: order.id,
        number: order.number,
        status_code: order.status.as_str().to_string(),
        user_full_name: order.user_full_name,
        address: order.address,
        phone_number: order.phone_number,
        notes: order.notes,
        total: order.total.to_string(),
        created_at: order.created_at.to_rfc3339(),
        expired_at: order.expired_at.to_rfc3339(),
        xendit_invoice_url: order.xendit_invoice_url,
        items,
    }))
}

/// PUT /orders/{id}/status
///
/// Applies a status transition (unpaid → paid/canceled, paid → shipped,
/// shipped → done) subject to role and ownership checks.
#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Transition not allowed"),
        (status = 401, description = "Missing or invalid identity"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    service: web::Data<AppOrderService>,
    claims: Claims,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let new_status: OrderStatus = body
        .into_inner()
        .new_status_code
        .parse()
        .map_err(AppError::from)?;

    web::block(move || service.update_order_status(&claims, order_id, new_status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Update Order Status Success" })))
}
