//! Role-based authorization.
//!
//! Protected routers are wrapped with one of the `require_*` middleware functions via
//! `axum::middleware::from_fn_with_state`. Each runs the [`Authenticate`] stage and,
//! unless any authenticated caller is accepted, an [`Authorize`] stage with the route's
//! allow-list. On success the [`Principal`] is stored in the request extensions for the
//! handler; request bodies are only parsed afterwards, so a caller with the wrong role
//! is rejected whatever the payload.
//!
//! ```rust,ignore
//! let organizations = init_organizations_router().route_layer(
//!     middleware::from_fn_with_state(state.clone(), require_super_admin),
//! );
//! ```

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use flagpole_config::Role;
use flagpole_core::AppError;

use crate::middleware::auth::{Authenticate, Principal, extract_token};
use crate::middleware::pipeline::{Outcome, Pipeline, RequestContext, Stage};
use crate::state::AppState;

const NO_PERMISSION: &str = "You do not have permission to perform this action";

/// Rejects principals whose role is not in the allow-list. A missing principal is
/// rejected as well.
#[derive(Debug, Clone)]
pub struct Authorize {
    allowed: Vec<Role>,
}

impl Authorize {
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }

    pub fn permits(&self, principal: Option<&Principal>) -> bool {
        principal.is_some_and(|p| self.allowed.contains(&p.role()))
    }
}

#[async_trait]
impl Stage for Authorize {
    fn name(&self) -> &'static str {
        "authorize"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Outcome {
        if self.permits(ctx.principal.as_ref()) {
            Outcome::Continue
        } else {
            Outcome::Fail(AppError::forbidden(NO_PERMISSION))
        }
    }
}

/// Builds the authentication pipeline, optionally followed by authorization.
pub fn access_pipeline(state: &AppState, allowed: Option<&[Role]>) -> Pipeline {
    let pipeline = Pipeline::new().then(Authenticate::new(state));
    match allowed {
        Some(roles) => pipeline.then(Authorize::new(roles)),
        None => pipeline,
    }
}

pub async fn guard(
    state: &AppState,
    mut req: Request,
    next: Next,
    allowed: Option<&[Role]>,
) -> Response {
    let token = extract_token(req.headers(), state.config.auth.transport);
    let mut ctx = RequestContext::with_token(token);

    if let Err(err) = access_pipeline(state, allowed).run(&mut ctx).await {
        return err.into_response();
    }

    if let Some(principal) = ctx.principal {
        req.extensions_mut().insert(principal);
    }

    next.run(req).await
}

/// Any authenticated caller.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(&state, req, next, None).await
}

pub async fn require_super_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(&state, req, next, Some(&[Role::SuperAdmin])).await
}

pub async fn require_org_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(&state, req, next, Some(&[Role::OrgAdmin])).await
}

pub async fn require_end_user(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(&state, req, next, Some(&[Role::EndUser])).await
}

/// Super admin or organization admin.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(&state, req, next, Some(&[Role::SuperAdmin, Role::OrgAdmin])).await
}
