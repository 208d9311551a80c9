pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use application::webhook_service::WebhookService;
use domain::ports::InvoiceGateway;
use infrastructure::order_repo::DieselOrderRepository;

pub use db::{create_pool, DbPool};

pub type AppOrderService = OrderService<DieselOrderRepository>;
pub type AppWebhookService = WebhookService<DieselOrderRepository>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order_status,
        handlers::webhook::receive_invoice,
    ),
    components(schemas(
        handlers::orders::CreateOrderProductRequest,
        handlers::orders::CreateOrderRequest,
        handlers::orders::CreateOrderResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderDetailResponse,
        handlers::orders::OrderListItemResponse,
        handlers::orders::PaginationResponse,
        handlers::orders::ListOrdersResponse,
        handlers::orders::ListOrdersParams,
        handlers::orders::UpdateOrderStatusRequest,
        handlers::webhook::XenditInvoiceCallback,
    )),
    tags(
        (name = "orders", description = "Order workflow"),
        (name = "webhooks", description = "Payment provider callbacks"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The invoice gateway is injected so tests can substitute a fake; the
/// caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    gateway: Arc<dyn InvoiceGateway>,
    frontend_base_url: String,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let order_service = web::Data::new(OrderService::new(
        DieselOrderRepository::new(pool.clone()),
        gateway,
        frontend_base_url,
    ));
    let webhook_service = web::Data::new(WebhookService::new(DieselOrderRepository::new(pool)));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(order_service.clone())
            .app_data(webhook_service.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route(
                        "/{id}/status",
                        web::put().to(handlers::orders::update_order_status),
                    ),
            )
            .service(
                web::scope("/webhooks")
                    .route("/xendit/invoice", web::post().to(handlers::webhook::receive_invoice)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
