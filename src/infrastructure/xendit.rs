use std::time::Duration;

use bigdecimal::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::ports::{CreateInvoiceRequest, Invoice, InvoiceGateway};

const DEFAULT_API_URL: &str = "https://api.xendit.co";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct XenditConfig {
    pub api_url: String,
    pub secret_key: String,
}

impl XenditConfig {
    pub fn from_env() -> Self {
        XenditConfig {
            api_url: std::env::var("XENDIT_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            secret_key: std::env::var("XENDIT_SECRET_KEY")
                .expect("XENDIT_SECRET_KEY must be set"),
        }
    }
}

/// Blocking client for the Xendit hosted-invoice API. Called from
/// `web::block` threads inside the order-creation transaction.
pub struct XenditInvoiceGateway {
    http: reqwest::blocking::Client,
    config: XenditConfig,
}

impl XenditInvoiceGateway {
    pub fn new(config: XenditConfig) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self { http, config }
    }
}

#[derive(Debug, Serialize)]
struct InvoiceCustomerBody<'a> {
    given_names: &'a str,
}

#[derive(Debug, Serialize)]
struct InvoiceItemBody<'a> {
    name: &'a str,
    price: f64,
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct CreateInvoiceBody<'a> {
    external_id: &'a str,
    amount: f64,
    currency: &'a str,
    success_redirect_url: &'a str,
    customer: InvoiceCustomerBody<'a>,
    items: Vec<InvoiceItemBody<'a>>,
}

#[derive(Debug, Deserialize)]
struct InvoiceCreatedBody {
    id: String,
    invoice_url: String,
}

fn amount_to_f64(amount: &bigdecimal::BigDecimal) -> Result<f64, DomainError> {
    amount
        .to_f64()
        .ok_or_else(|| DomainError::Internal("Invoice amount is not representable".to_string()))
}

impl InvoiceGateway for XenditInvoiceGateway {
    fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<Invoice, DomainError> {
        let items: Result<Vec<InvoiceItemBody<'_>>, DomainError> = request
            .items
            .iter()
            .map(|item| {
                Ok(InvoiceItemBody {
                    name: &item.name,
                    price: amount_to_f64(&item.price)?,
                    quantity: item.quantity,
                })
            })
            .collect();

        let body = CreateInvoiceBody {
            external_id: &request.external_id,
            amount: amount_to_f64(&request.amount)?,
            currency: &request.currency,
            success_redirect_url: &request.success_redirect_url,
            customer: InvoiceCustomerBody {
                given_names: &request.customer_name,
            },
            items: items?,
        };

        let response = self
            .http
            .post(format!("{}/v2/invoices", self.config.api_url))
            .basic_auth(&self.config.secret_key, Some(""))
            .json(&body)
            .send()
            .map_err(|e| DomainError::Internal(format!("Invoice request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(DomainError::Internal(format!(
                "Invoice creation failed ({}): {}",
                status, detail
            )));
        }

        let created: InvoiceCreatedBody = response
            .json()
            .map_err(|e| DomainError::Internal(format!("Invalid invoice response: {}", e)))?;

        Ok(Invoice {
            id: created.id,
            url: created.invoice_url,
        })
    }
}
