mod api;
mod state;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

fn load_config() -> flowpath_core::Config {
    flowpath_core::config::load_dotenv();
    flowpath_core::Config::from_env()
}

async fn serve(config: flowpath_core::Config) -> anyhow::Result<()> {
    config.log_summary();

    let (table, issues) = flowpath_ingest::load_events(&config.source).await?;
    if !issues.is_empty() {
        tracing::warn!(
            "{} source rows were excluded from the table (see warnings above)",
            issues.len()
        );
    }

    let cors = if config.server.cors_origin == "*" {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(config.server.cors_origin.parse::<HeaderValue>()?)
    };

    let state = Arc::new(state::AppState {
        table: Arc::new(table),
        excluded_rows: issues.len(),
    });

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/apps", get(api::apps))
        .route("/apps/{app_id}/participants", get(api::participants))
        .route("/flow", get(api::flow))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = load_config();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("serve") | None => serve(config).await?,
        _ => {
            println!("flowpath v0.1.0");
            println!("Usage: flowpath-server [serve]");
            println!("  serve    Load the event table and start the HTTP API (default)");
        }
    }

    Ok(())
}
