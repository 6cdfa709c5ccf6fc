//! Axum-based chat gateway: serves the widget's remote chat API. Config-driven via WidgetConfig.

mod handlers;

use axum::http::Method;
use axum::{
    extract::State,
    routing::{delete, get, post},
    Router,
};
use dashmap::DashMap;
use sitehelp_core::{ConversationMemory, KnowledgeBase, LocalResponder, WidgetConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[sitehelp-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(WidgetConfig::load()?);
    let knowledge = Arc::new(KnowledgeBase::from_config(&config)?);
    tracing::info!(
        target: "sitehelp::gateway",
        topics = ?knowledge.topics(),
        "Knowledge base ready"
    );

    let state = AppState::new(Arc::clone(&config), knowledge);
    spawn_session_sweeper(state.clone());
    let app = build_app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("{} gateway listening on {}", config.bot_name, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_app(state: AppState) -> Router {
    let frontend = state
        .config
        .frontend_enabled
        .then(|| state.config.frontend_dir.clone());

    // CORS: any origin may call the chat API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/v1/status", get(status))
        .route("/api/v1/health", get(health))
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/chat/:session_id", delete(handlers::chat::end_session))
        .with_state(state);

    if let Some(dir) = frontend {
        app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    }

    app.layer(cors)
}

/// Bounds on how often idle sessions are swept.
const MIN_SWEEP_PERIOD: Duration = Duration::from_secs(1);
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Periodically drops sessions idle for longer than `session_idle_secs`.
fn spawn_session_sweeper(state: AppState) -> JoinHandle<()> {
    let period = state
        .config
        .session_idle_timeout()
        .clamp(MIN_SWEEP_PERIOD, MAX_SWEEP_PERIOD);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            state.evict_idle();
        }
    })
}

/// A visitor's engine and the last time a turn touched it.
pub(crate) struct Session {
    engine: Arc<LocalResponder>,
    last_used: Instant,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<WidgetConfig>,
    pub(crate) knowledge: Arc<KnowledgeBase>,
    /// One engine (and so one topic memory) per session id.
    pub(crate) sessions: Arc<DashMap<String, Session>>,
}

impl AppState {
    pub(crate) fn new(config: Arc<WidgetConfig>, knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            config,
            knowledge,
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// The session's engine, created with fresh memory on first use. Marks the session as used.
    pub(crate) fn session(&self, session_id: &str) -> Arc<LocalResponder> {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                engine: Arc::new(
                    LocalResponder::new(Arc::clone(&self.knowledge), ConversationMemory::new())
                        .with_delay(self.config.reply_delay()),
                ),
                last_used: Instant::now(),
            });
        entry.last_used = Instant::now();
        Arc::clone(&entry.engine)
    }

    /// Removes sessions idle for at least the configured timeout. Returns how many went.
    pub(crate) fn evict_idle(&self) -> usize {
        let timeout = self.config.session_idle_timeout();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_used.elapsed() < timeout);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::debug!(
                target: "sitehelp::gateway",
                evicted,
                remaining = self.sessions.len(),
                "Idle sessions evicted"
            );
        }
        evicted
    }
}

/// GET /api/v1/health – liveness check for the widget and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/status – bot identity, topics and live session count.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "app_name": state.config.bot_name,
        "subtitle": state.config.bot_subtitle,
        "greeting": state.config.greeting,
        "engine": "local",
        "reply_delay_ms": state.config.reply_delay_ms,
        "port": state.config.port,
        "topics": state.knowledge.topics(),
        "sessions": state.sessions.len(),
        "frontend_enabled": state.config.frontend_enabled,
    }))
}
