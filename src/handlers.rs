//! HTTP route handlers for the wiki.
//!
//! Every page route carries the title as its last path segment. The title is
//! validated before anything else happens; a bad one is a 404 no matter which
//! operation was asked for.

use crate::error::{Result, WikiError};
use crate::models::Page;
use crate::templates::PageTemplate;
use crate::title::{Title, FRONT_PAGE};
use crate::AppState;
use axum::{
    extract::{Form, FromRequest, Multipart, Path, Query, Request, State},
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Decoded query-string or form pairs, in request order.
type Pairs = Vec<(String, String)>;

/// First value for `key`, so repeated keys never fail a request.
fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// 302 Found, which is what the page routes redirect with.
/// `axum::response::Redirect` only offers 303, 307 and 308.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn render(state: &AppState, template: PageTemplate, page: &Page) -> Result<Response> {
    let html = state.templates.render(template, page)?;
    Ok(Html(html).into_response())
}

fn require_post(method: &Method) -> Result<()> {
    if *method == Method::POST {
        Ok(())
    } else {
        Err(WikiError::BadMethod(method.to_string()))
    }
}

// ============================================================================
// Root & Fallback
// ============================================================================

pub async fn root() -> Redirect {
    Redirect::temporary(&format!("/view/{FRONT_PAGE}"))
}

pub async fn not_found(uri: Uri) -> WikiError {
    WikiError::InvalidPath(uri.path().to_string())
}

// ============================================================================
// View Handler
// ============================================================================

pub async fn view_page(
    Path(title): Path<String>,
    Query(query): Query<Pairs>,
    State(state): State<Arc<AppState>>,
) -> Result<Response> {
    let title = Title::parse(&title)?;

    let mut page = match state.store.load(&title) {
        Some(p) => p,
        None => {
            tracing::debug!(title = %title, "Page missing, redirecting to editor");
            return Ok(found(format!("/edit/{title}")));
        }
    };

    page.from_save = first_value(&query, "from_save") == Some("true");
    page.from_delete = first_value(&query, "from_delete") == Some("true");

    render(&state, PageTemplate::View, &page)
}

// ============================================================================
// Edit Handler
// ============================================================================

pub async fn edit_page(
    Path(title): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response> {
    let title = Title::parse(&title)?;
    let page = state
        .store
        .load(&title)
        .unwrap_or_else(|| Page::new(title));

    render(&state, PageTemplate::Edit, &page)
}

// ============================================================================
// Save Handler
// ============================================================================

/// Pull the `body` field out of a urlencoded or multipart form.
///
/// Any other content type, a missing field, or a body that fails to decode
/// all count as an empty page body.
async fn read_body_field(request: Request) -> String {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        match Form::<Pairs>::from_request(request, &()).await {
            Ok(Form(pairs)) => first_value(&pairs, "body").unwrap_or_default().to_string(),
            Err(e) => {
                tracing::warn!(error = %e.body_text(), "Unreadable form body");
                String::new()
            }
        }
    } else if content_type.starts_with("multipart/form-data") {
        match read_multipart_body(request).await {
            Ok(body) => body.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable multipart body");
                String::new()
            }
        }
    } else {
        String::new()
    }
}

async fn read_multipart_body(
    request: Request,
) -> std::result::Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
    let mut multipart = Multipart::from_request(request, &()).await?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("body") {
            return Ok(Some(field.text().await?));
        }
    }
    Ok(None)
}

pub async fn save_page(
    Path(title): Path<String>,
    State(state): State<Arc<AppState>>,
    method: Method,
    request: Request,
) -> Result<Response> {
    let title = Title::parse(&title)?;
    require_post(&method)?;
    let body = read_body_field(request).await;

    let page = Page::with_body(title.clone(), body);
    state.store.save(&page)?;
    tracing::info!(title = %title, bytes = page.body.len(), "Saved page");

    Ok(found(format!("/view/{title}?from_save=true")))
}

// ============================================================================
// Delete Handler
// ============================================================================

pub async fn delete_page(
    Path(title): Path<String>,
    State(state): State<Arc<AppState>>,
    method: Method,
) -> Result<Response> {
    let title = Title::parse(&title)?;
    require_post(&method)?;

    if !state.store.exists(&title) {
        return Err(WikiError::PageNotFound(title.to_string()));
    }
    state.store.delete(&title)?;
    tracing::info!(title = %title, "Deleted page");

    Ok(found(format!("/view/{FRONT_PAGE}?from_delete=true")))
}

#[cfg(test)]
#[path = "handlers_test.rs"]
mod handlers_test;
