use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    fs,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use sysinfo::System;

fn get_thread_count(pid: usize) -> Option<i64> {
    let path = format!("/proc/{pid}/status");
    let contents = fs::read_to_string(path).ok()?;
    contents
        .lines()
        .find(|line| line.starts_with("Threads:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|count| count.parse::<i64>().ok())
}

#[derive(Debug, Clone)]
pub struct SystemMetrics {
    pub memory_alloc_bytes: Gauge,
    pub memory_sys_bytes: Gauge,
    pub thread_usage: Gauge,
    pub process_start_time: Gauge,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemMetrics {
    pub fn new() -> Self {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let metrics = Self {
            memory_alloc_bytes: Gauge::default(),
            memory_sys_bytes: Gauge::default(),
            thread_usage: Gauge::default(),
            process_start_time: Gauge::default(),
        };

        metrics.process_start_time.set(start_time);
        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "process_memory_alloc_bytes",
            "Current memory allocation in bytes",
            self.memory_alloc_bytes.clone(),
        );

        registry.register(
            "process_memory_sys_bytes",
            "Virtual memory of the process in bytes",
            self.memory_sys_bytes.clone(),
        );

        registry.register(
            "process_thread_total",
            "Thread total",
            self.thread_usage.clone(),
        );

        registry.register(
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            self.process_start_time.clone(),
        );
    }

    pub fn update_metrics(&self) {
        let mut sys = System::new();
        let pid = sysinfo::Pid::from(std::process::id() as usize);
        sys.refresh_processes(sysinfo::ProcessesToUpdate::Some(&[pid]), true);

        if let Some(process) = sys.process(pid) {
            self.memory_alloc_bytes.set(process.memory() as i64);
            self.memory_sys_bytes.set(process.virtual_memory() as i64);
        }

        if let Some(thread_count) = get_thread_count(std::process::id() as usize) {
            self.thread_usage.set(thread_count);
        }
    }
}

pub async fn run_metrics_collector(system_metrics: Arc<SystemMetrics>) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(15));
    loop {
        interval.tick().await;
        system_metrics.update_metrics();
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum GuardOperation {
    OptionalSession,
    RequireSession,
    RequireAnyRole,
    RequireTier,
    RequireVerifiedEmail,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Outcome {
    Authorized,
    Anonymous,
    Unauthenticated,
    Forbidden,
    ForbiddenTier,
    EmailNotVerified,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct GuardLabels {
    pub operation: GuardOperation,
    pub outcome: Outcome,
}

/// Counters for guard decisions plus the latency of the lookups behind them.
#[derive(Clone, Debug)]
pub struct Metrics {
    pub guard_decisions: Family<GuardLabels, Counter>,
    pub resolve_duration: Histogram,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            guard_decisions: Family::default(),
            resolve_duration: Histogram::new(
                [0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5].into_iter(),
            ),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "guard_decisions",
            "Authorization decisions by guard operation and outcome",
            self.guard_decisions.clone(),
        );
        registry.register(
            "guard_resolve_duration_seconds",
            "Time spent resolving sessions and authoritative tiers",
            self.resolve_duration.clone(),
        );
    }

    pub fn record(&self, operation: GuardOperation, outcome: Outcome) {
        self.guard_decisions
            .get_or_create(&GuardLabels { operation, outcome })
            .inc();
    }

    pub fn observe_resolve(&self, duration_secs: f64) {
        self.resolve_duration.observe(duration_secs);
    }
}
