use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::company::{CompanyService, SeaOrmCompanyRepository};
use service::employee::{EmployeeService, SeaOrmEmployeeRepository};

use crate::routes::{self, AppState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Constructor-style wiring: one repository and one service per entity,
/// sharing the connection pool.
pub fn build_state(db: DatabaseConnection) -> AppState {
    AppState {
        companies: Arc::new(CompanyService::new(Arc::new(SeaOrmCompanyRepository::new(db.clone())))),
        employees: Arc::new(EmployeeService::new(Arc::new(SeaOrmEmployeeRepository::new(db)))),
    }
}

/// Public entry: build the app and run the HTTP server. Schema migrations
/// run separately through the migration crate's CLI.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let db_cfg = configs::DatabaseConfig::from_file_or_env();
    let db = models::db::connect_with_config(&db_cfg).await?;

    let state = build_state(db);
    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr()?;
    info!(%addr, "starting workforce api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
