//! Health check service.

use std::sync::Arc;

use crate::error::Result;
use crate::models::HealthStatus;

use super::super::http::HttpClient;
use super::API_PREFIX;

/// Service for control-plane and data-plane health checks.
#[derive(Clone)]
pub struct SystemService {
    http: Arc<HttpClient>,
}

impl SystemService {
    /// Creates a new system service.
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Checks the health of the control plane.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use pvault_sdk::VaultClient;
    /// # async fn example(client: VaultClient) -> Result<(), pvault_sdk::Error> {
    /// let health = client.system().control_health().await?;
    /// assert!(health.is_pass());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn control_health(&self) -> Result<HealthStatus> {
        self.http
            .get(&format!("{API_PREFIX}/ctl/info/health"))
            .await
    }

    /// Checks the health of the data plane.
    pub async fn data_health(&self) -> Result<HealthStatus> {
        self.http
            .get(&format!("{API_PREFIX}/data/info/health"))
            .await
    }

    /// Returns true if both planes report `"pass"`.
    ///
    /// Transport and vault errors are propagated rather than read as unhealthy.
    pub async fn is_healthy(&self) -> Result<bool> {
        let control = self.control_health().await?;
        let data = self.data_health().await?;
        Ok(control.is_pass() && data.is_pass())
    }
}

impl std::fmt::Debug for SystemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemService").finish_non_exhaustive()
    }
}
