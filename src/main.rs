use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use ecommerce_orders::infrastructure::xendit::{XenditConfig, XenditInvoiceGateway};
use ecommerce_orders::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let frontend_base_url =
        env::var("FRONTEND_BASE_URL").expect("FRONTEND_BASE_URL must be set");

    let pool = create_pool(&database_url);
    run_migrations(&pool);

    let gateway = Arc::new(XenditInvoiceGateway::new(XenditConfig::from_env()));

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(pool, gateway, frontend_base_url, &host, port)?.await
}
