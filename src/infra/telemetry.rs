use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "lectern_reorder_dispatch_total",
            Unit::Count,
            "Reorder payloads handed to a submitter."
        );
        describe_counter!(
            "lectern_reorder_failure_total",
            Unit::Count,
            "Reorder payload submissions that failed."
        );
        describe_counter!(
            "lectern_order_saved_total",
            Unit::Count,
            "Reorder payloads persisted by the order endpoints."
        );
        describe_counter!(
            "lectern_order_rejected_total",
            Unit::Count,
            "Reorder payloads rejected by the order endpoints."
        );
        describe_histogram!(
            "lectern_order_apply_ms",
            Unit::Milliseconds,
            "Time spent applying one reorder payload."
        );
    });
}
