//! Wiki library - a flat-file wiki served over HTTP.
//!
//! Pages are plain text files named `<title>.txt` in a data directory. The
//! server offers four operations on them, each under its own path prefix:
//! `/view/`, `/edit/`, `/save/` and `/delete/`.
//!
//! - `config`: environment-driven settings
//! - `error`: error taxonomy and HTTP status mapping
//! - `title`: validated page titles
//! - `links`: `[Name]` inter-page link expansion
//! - `models`: the `Page` entity
//! - `store`: load/save/delete pages on disk
//! - `templates`: the `edit` and `view` HTML templates
//! - `handlers`: HTTP route handlers

use axum::{
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod links;
pub mod models;
pub mod store;
pub mod templates;
pub mod title;

// ============================================================================
// Application State
// ============================================================================

/// Read-only state shared by every request. Built once at startup.
pub struct AppState {
    pub store: store::PageStore,
    pub templates: templates::Templates,
}

impl AppState {
    pub fn new(store: store::PageStore, templates: templates::Templates) -> Self {
        Self { store, templates }
    }

    /// Open the page store and parse the templates named by `config`.
    pub fn from_config(config: &config::Config) -> error::Result<Self> {
        let store = store::PageStore::open(&config.data_dir, links::LinkExpander::new())?;
        let templates = templates::Templates::from_dir(&config.template_dir)?;
        Ok(Self::new(store, templates))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", any(handlers::root))
        .route("/view/{title}", get(handlers::view_page))
        .route("/edit/{title}", get(handlers::edit_page))
        // Method checks happen in the handlers so a GET gets a 400, not a 405.
        .route("/save/{title}", any(handlers::save_page))
        .route("/delete/{title}", any(handlers::delete_page))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.addr` and serve until the process is stopped.
pub async fn serve(config: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(
        address = %config.addr,
        data_dir = %config.data_dir.display(),
        "Wiki server running"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

// Re-export commonly used types
pub use config::Config;
pub use error::WikiError;
pub use links::LinkExpander;
pub use models::Page;
pub use store::PageStore;
pub use templates::{PageTemplate, Templates};
pub use title::{Title, FRONT_PAGE};
