//! Request gateway middleware
//!
//! Every routed request passes through here. The gateway does two
//! things:
//!
//! - **Rate limiting**: API paths are admitted through the
//!   sliding-window limiter keyed by client address. A denial is
//!   answered directly with `429`, a `Retry-After` header, and the
//!   standard response envelope; the inner service never runs.
//! - **Security headers**: every response that leaves the server, the
//!   denial included, carries the security header set.
//!
//! Static assets are exempt from rate limiting but still get headers.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderMap, HeaderName, HeaderValue},
    Error, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use fg_core::services::ratelimit::RateLimiter;
use fg_shared::types::response::ApiResponse;

/// File extensions treated as static assets
const STATIC_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "svg", "ico", "webp"];

const CSP_POLICY: &str = "default-src 'self'; \
     script-src 'self' 'unsafe-inline'; \
     style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; \
     font-src 'self' https://fonts.gstatic.com; \
     img-src 'self' data:; \
     connect-src 'self'";

/// Gateway middleware factory
pub struct Gateway {
    limiter: Arc<dyn RateLimiter>,
}

impl Gateway {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Gateway
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = GatewayMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GatewayMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

/// Gateway middleware service
pub struct GatewayMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for GatewayMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = Arc::clone(&self.limiter);

        Box::pin(async move {
            // Static assets bypass the gateway entirely
            if is_static_asset(req.path()) {
                return Ok(service.call(req).await?.map_into_left_body());
            }

            if is_rate_limited_path(req.path()) {
                let key = client_key(req.request());
                if !limiter.allow(&key).await {
                    log::warn!(
                        "Rate limit exceeded for {} on {} {}",
                        key,
                        req.method(),
                        req.path()
                    );
                    let mut response = HttpResponse::TooManyRequests()
                        .insert_header((
                            header::RETRY_AFTER,
                            limiter.retry_after_secs().to_string(),
                        ))
                        .json(ApiResponse::error(
                            "Too many requests. Please try again later.",
                        ));
                    add_security_headers(response.headers_mut());
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            let mut response = service.call(req).await?.map_into_left_body();
            add_security_headers(response.headers_mut());
            Ok(response)
        })
    }
}

/// Client identity for rate limiting and session assignment: the
/// connection's peer address, else the first forwarded-for entry,
/// else the real-IP header, else a sentinel
pub fn client_key(req: &HttpRequest) -> String {
    if let Some(peer) = req.peer_addr() {
        return peer.ip().to_string();
    }
    if let Some(forwarded) = header_str(req.headers(), "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = header_str(req.headers(), "x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }
    "unknown".to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// API paths go through the limiter; static assets do not
fn is_rate_limited_path(path: &str) -> bool {
    !is_static_asset(path) && path.starts_with("/api/")
}

fn is_static_asset(path: &str) -> bool {
    if path.starts_with("/static/") || path == "/favicon.ico" {
        return true;
    }
    match path.rsplit_once('.') {
        Some((_, ext)) => STATIC_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Security header set stamped on every response
fn add_security_headers(headers: &mut HeaderMap) {
    headers.insert(
        HeaderName::from_static("x-dns-prefetch-control"),
        HeaderValue::from_static("on"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("SAMEORIGIN"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CSP_POLICY),
    );
}
