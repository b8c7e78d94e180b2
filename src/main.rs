mod error;
mod recipe;
mod templates;
mod web;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::routing;
use clap::Parser;
use tokio::{net, signal, sync::RwLock, time::Duration};
use tower_http::{services, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use error::ServerError;
use recipe::Recipe;

#[derive(Parser)]
struct Args {
    #[arg(short, long, default_value = "127.0.0.1")]
    ip: String,
    #[arg(short, long, default_value = "8000")]
    port: u16,
    #[arg(short, long, name = "recipe-dir", default_value = "recipes")]
    recipe_dir: PathBuf,
    #[arg(short, long, name = "static-dir", default_value = "static")]
    static_dir: PathBuf,
}

pub struct AppState {
    pub recipe_dir: PathBuf,
    /// Current scan snapshot. Every publish swaps the whole Arc, so readers
    /// never observe a half-built list.
    pub recipes: RwLock<Arc<Vec<Recipe>>>,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub fn new(recipe_dir: PathBuf) -> Self {
        Self {
            recipe_dir,
            recipes: RwLock::new(Arc::new(Vec::new())),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to create SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C (SIGINT) signal.");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal.");
        },
    }

    tracing::info!("Initiating graceful shutdown...");

    // Give some time for in-flight requests to complete.
    tokio::time::sleep(Duration::from_secs(2)).await;
    tracing::info!("Cleanup complete.");
}

pub fn router(state: SharedAppState, static_dir: &Path) -> axum::Router {
    axum::Router::new()
        .route("/", routing::get(web::home))
        .route("/recipe/", routing::get(web::recipe_detail))
        .nest_service("/static", services::ServeDir::new(static_dir))
        .fallback(web::handler_404)
        .with_state(state)
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let tsf = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let tse = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "recipes_server=debug".into());
    tracing_subscriber::registry().with(tsf).with(tse).init();

    log::info!("Starting...");

    let args = Args::parse();

    let state = Arc::new(AppState::new(args.recipe_dir));

    let trace_layer = trace::TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(tracing::Level::INFO));

    let app = router(state, &args.static_dir).layer(trace_layer);

    let endpoint = format!("{}:{}", args.ip, args.port);
    let listener = net::TcpListener::bind(&endpoint)
        .await
        .map_err(|e| ServerError::Bind {
            addr: endpoint.clone(),
            source: e,
        })?;
    log::info!("started: listening on {}", endpoint);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = serve().await {
        eprintln!("recipes-server: error: {}", err);
        std::process::exit(1);
    }
}
