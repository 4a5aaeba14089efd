//! Terminal error rendering.
//!
//! Error responses carry an [`ErrorReport`]; [`normalize_errors`] re-renders each one in
//! the configured [`ErrorMode`] so every failure, whichever layer produced it, leaves the
//! server in the same shape.

use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    http::{Uri, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use flagpole_core::{AppError, ErrorMode, ErrorReport};

pub async fn normalize_errors(State(mode): State<ErrorMode>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let (parts, _) = response.into_parts();
    let mut rendered = report.render(mode);

    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }

    rendered
}

/// Fallback for unmatched routes.
pub async fn route_not_found(uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    AppError::not_found(anyhow!("Can't find {target} on the server!")).into_response()
}
