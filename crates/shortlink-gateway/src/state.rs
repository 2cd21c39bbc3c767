use std::sync::Arc;

use shortlink_service::LinkShortener;
use shortlink_telemetry::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn LinkShortener>,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn LinkShortener>) -> Self {
        Self {
            shortener,
            metrics: None,
        }
    }

    /// Serves `handle` on `/metrics`. Without it the endpoint answers 404.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn shortener(&self) -> &dyn LinkShortener {
        self.shortener.as_ref()
    }

    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }
}
