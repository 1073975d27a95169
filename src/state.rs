use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::store::MessageStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Message store (shared across requests)
    pub store: Arc<MessageStore>,

    /// Prometheus handle rendered by the /metrics endpoint
    pub metrics: PrometheusHandle,
}

impl ServerState {
    /// Create new server state. Installs the process-wide metrics recorder
    /// on first use.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let metrics = crate::metrics::install_recorder()?;

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(MessageStore::new()),
            metrics,
        })
    }
}
