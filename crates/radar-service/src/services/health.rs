//! Health checks

use tracing::warn;

use crate::dto::{HealthResponse, ReadinessResponse};

use super::context::ServiceContext;

/// Liveness and readiness probes
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse::healthy()
    }

    /// Probe the database when one is configured
    pub async fn readiness(&self) -> ReadinessResponse {
        let database = match self.ctx.pool() {
            Some(pool) => Some(match radar_db::ping(pool).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Database health check failed");
                    false
                }
            }),
            None => None,
        };

        ReadinessResponse::ready(database)
    }
}
