//! Per-IP rate limiting.
//!
//! The client is the peer address. Forwarded headers are honoured only when
//! `TRUST_PROXY` is set, since any caller can write them. Requests whose origin cannot
//! be determined are not limited.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, RateLimiter};
use tracing::warn;

use flagpole_config::RateLimitConfig;
use flagpole_core::AppError;

use crate::state::AppState;

const TOO_MANY_REQUESTS: &str =
    "We have received too many requests from this IP. Please try after one hour.";

#[derive(Clone)]
pub struct IpRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl IpRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::keyed(config.quota())),
        }
    }

    /// Records one request for `ip`; `false` once its allowance is spent.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.limiter.check_key(&ip).is_ok()
    }

    /// Drops state for clients whose allowance has fully replenished.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }
}

impl fmt::Debug for IpRateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpRateLimiter")
            .field("tracked_clients", &self.limiter.len())
            .finish()
    }
}

fn forwarded_ip(req: &Request) -> Option<IpAddr> {
    let headers = req.headers();
    let first_forwarded: Option<IpAddr> = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|value| value.trim().parse().ok());

    first_forwarded.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
    })
}

pub fn client_ip(req: &Request, trust_proxy: bool) -> Option<IpAddr> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if trust_proxy {
        forwarded_ip(req).or(peer)
    } else {
        peer
    }
}

pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Some(ip) = client_ip(&req, state.config.rate_limit.trust_proxy)
        && !state.rate_limiter.check(ip)
    {
        warn!(client.ip = %ip, "Rate limit exceeded");
        return AppError::too_many_requests(TOO_MANY_REQUESTS).into_response();
    }

    next.run(req).await
}
