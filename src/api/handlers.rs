//! Route handlers. Thin adapters over [`StsService`].

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::time::Instant;

use crate::error::StsError;
use crate::jwt::IssuedToken;
use crate::keys::{Jwks, PublicKeyRecord};
use crate::metrics;
use crate::service::StsService;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// GET /public-key
pub async fn public_key(State(sts): State<StsService>) -> Json<PublicKeyRecord> {
    Json(sts.public_key().clone())
}

/// GET /.well-known/jwks.json
pub async fn jwks(State(sts): State<StsService>) -> Json<Jwks> {
    Json(sts.jwks())
}

/// POST /register
///
/// Stores the credential and answers 201 with an empty body.
pub async fn register(
    State(sts): State<StsService>,
    body: Bytes,
) -> Result<StatusCode, StsError> {
    let started = Instant::now();
    let result = sts.register_user(&body).map(|()| StatusCode::CREATED);
    metrics::record_http_latency("register", started.elapsed().as_secs_f64());
    result
}

/// POST /login
pub async fn login(
    State(sts): State<StsService>,
    body: Bytes,
) -> Result<Json<IssuedToken>, StsError> {
    let started = Instant::now();
    let result = sts.authenticate(&body).map(Json);
    metrics::record_http_latency("login", started.elapsed().as_secs_f64());
    result
}

/// GET /metrics
pub async fn prometheus_metrics() -> String {
    metrics::render()
}
