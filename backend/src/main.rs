use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use std::sync::Arc;

mod config;
mod handlers {
    pub mod contact_handlers;
}
mod utils {
    pub mod email_utils;
    pub mod mailer;
}

use config::Config;
use handlers::contact_handlers;
use utils::mailer::{Mailer, SmtpMailer};

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    config: Config,
    mailer: Arc<dyn Mailer>,
}

pub fn app(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/send-email",
            post(contact_handlers::send_email).fallback(contact_handlers::method_not_allowed),
        );

    // The built frontend, when this process is also the web server. Unknown
    // paths get index.html so client-side routes survive a reload.
    if let Some(dir) = &state.config.static_dir {
        let spa = ServeDir::new(dir)
            .append_index_html_on_directories(true)
            .fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .expose_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let mailer = SmtpMailer::new(&config.smtp)?;
    tracing::info!(
        "Relaying enquiries to {} via {}:{}",
        config.recipient_email(),
        config.smtp.host,
        config.smtp.port
    );

    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState {
        config,
        mailer: Arc::new(mailer),
    });

    use tokio::net::TcpListener;

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);
    axum::serve(listener, app(state).into_make_service()).await?;
    Ok(())
}
