//! Process-wide metrics registration.
//!
//! The Prometheus recorder is installed exactly once per process and never
//! torn down; `/metrics` renders the handle held in [`crate::state::ServerState`].

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static RECORDER: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder, or return the existing handle if
/// it has already been installed in this process.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = RECORDER.get_or_try_init(|| -> anyhow::Result<PrometheusHandle> {
        let handle = PrometheusBuilder::new().install_recorder()?;

        describe_histogram!(
            "http_request_duration_seconds",
            Unit::Seconds,
            "Cumulative duration and count of HTTP requests by method and path"
        );
        describe_counter!(
            "data_messages_added_sum",
            "Lifetime sum of message additions"
        );
        describe_counter!(
            "data_messages_deleted_sum",
            "Lifetime sum of message deletions"
        );

        Ok(handle)
    })?;

    Ok(handle.clone())
}
