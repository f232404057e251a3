// src/health.rs

use {
    crate::types::{HealthCheckResult, HealthResponse, HealthStatus},
    futures::future::{BoxFuture, FutureExt},
    sitecms_common::StoreConfig,
    std::{collections::HashMap, path::PathBuf, sync::Arc, time::Instant},
    tokio::sync::RwLock,
};

pub type HealthCheckFn = Arc<dyn Fn() -> BoxFuture<'static, HealthCheckResult> + Send + Sync>;

pub struct HealthService {
    checks: Arc<RwLock<HashMap<String, HealthCheckFn>>>,
    start_time: Instant,
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthService {
    pub fn new() -> Self {
        Self {
            checks: Arc::new(RwLock::new(HashMap::new())),
            start_time: Instant::now(),
        }
    }

    pub async fn register(&self, name: &str, check: HealthCheckFn) {
        let mut checks = self.checks.write().await;
        checks.insert(name.to_string(), check);
    }

    pub async fn unregister(&self, name: &str) {
        let mut checks = self.checks.write().await;
        checks.remove(name);
    }

    /// Register the checks of the store's document roots.
    pub async fn register_store_checks(&self, config: &StoreConfig) {
        self.register("primary_root", root_check(config.primary_root.clone(), HealthStatus::Unhealthy))
            .await;
        self.register("deployed_root", root_check(config.deployed_root.clone(), HealthStatus::Degraded))
            .await;
    }

    pub fn uptime(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub async fn check_all(&self) -> HealthResponse {
        // Snapshot so no lock is held while checks run
        let checks: Vec<(String, HealthCheckFn)> = {
            let checks = self.checks.read().await;
            checks.iter().map(|(name, check)| (name.clone(), check.clone())).collect()
        };

        let mut results = HashMap::new();
        let mut all_healthy = true;
        let mut any_healthy = false;

        for (name, check) in checks {
            let result = check().await;
            match result.status {
                HealthStatus::Healthy => any_healthy = true,
                HealthStatus::Degraded => {
                    all_healthy = false;
                    any_healthy = true;
                }
                HealthStatus::Unhealthy => all_healthy = false,
            }
            results.insert(name, result);
        }

        let status = if all_healthy {
            HealthStatus::Healthy
        } else if any_healthy {
            HealthStatus::Degraded
        } else {
            HealthStatus::Unhealthy
        };

        HealthResponse {
            status,
            checks: results,
            uptime: self.uptime(),
        }
    }
}

/// Healthy when `root` is a readable directory, `missing` otherwise.
pub fn root_check(root: PathBuf, missing: HealthStatus) -> HealthCheckFn {
    Arc::new(move || {
        let root = root.clone();
        async move {
            match tokio::fs::read_dir(&root).await {
                Ok(_) => HealthCheckResult::new(HealthStatus::Healthy, format!("{} is readable", root.display())),
                Err(e) => {
                    tracing::debug!(path = %root.display(), "Root check failed: {}", e);
                    HealthCheckResult::new(missing, format!("{} is not readable: {}", root.display(), e))
                }
            }
        }
        .boxed()
    })
}
