mod logs;
mod metrics;
mod otel;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{
    GuardLabels, GuardOperation, Metrics, Outcome, SystemMetrics, run_metrics_collector,
};
pub use self::otel::Telemetry;
pub use self::shutdown::shutdown_signal;
