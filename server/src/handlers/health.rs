//! Health check endpoint for monitoring
//!
//! Used by load balancers and operational dashboards.

use actix_web::{get, web, HttpResponse, Responder};
use diesel::prelude::*;
use diesel::sql_query;
use serde::Serialize;
use std::time::Instant;

use crate::db::DbPool;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub database: ComponentHealth,
}

/// Health status of a component
#[derive(Serialize)]
pub struct ComponentHealth {
    pub status: &'static str,
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    fn healthy(latency_ms: u64) -> Self {
        Self {
            status: "healthy",
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy",
            latency_ms: None,
            error: Some(error),
        }
    }
}

/// Comprehensive health check endpoint
///
/// # Endpoint
///
/// `GET /health`
#[get("/health")]
pub async fn health(pool: web::Data<DbPool>) -> impl Responder {
    let started = Instant::now();

    let database = match actix_web::web::block(move || -> anyhow::Result<()> {
        let mut conn = pool.get()?;
        sql_query("SELECT 1;").execute(&mut conn)?;
        Ok(())
    })
    .await
    {
        Ok(Ok(())) => ComponentHealth::healthy(started.elapsed().as_millis() as u64),
        Ok(Err(e)) => ComponentHealth::unhealthy(e.to_string()),
        Err(e) => ComponentHealth::unhealthy(format!("Blocking task failed: {}", e)),
    };

    let overall = if database.status == "healthy" {
        "healthy"
    } else {
        "unhealthy"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: overall,
        service: "pact-server",
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { database },
    })
}
