use std::process::ExitCode;

use tracing::{error, info};

use route_server::catalog::Catalog;
use route_server::config::AppConfig;
use route_server::telemetry;
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Load route data (fail fast if a configured file is unusable)
    let catalog = match &config.data_path {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(error = %e, "failed to load catalog");
                return ExitCode::FAILURE;
            }
        },
        None => {
            info!("no data file configured, using built-in routes");
            Catalog::seed()
        }
    };
    info!(
        routes = catalog.routes().len(),
        requirements = catalog.requirements().len(),
        "catalog ready"
    );

    let addr = config.addr;
    let state = AppState::new(catalog, config);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("InclusiveGo listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /health            - Health check");
    info!("  GET  /api/requirements  - Accessibility requirements");
    info!("  GET  /api/routes        - All routes");
    info!("  POST /api/search        - Search routes by location");
    info!("  GET  /api/autocomplete  - Location suggestions");
    info!("  GET  /api/history       - Recent searches");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
