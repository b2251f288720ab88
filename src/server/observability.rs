use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use prometheus::{Encoder, Gauge, IntCounterVec, Opts, Registry, TextEncoder};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::task::JoinHandle;
use tokio::time;

use crate::error::Result;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// Registry plus every metric the service exposes.
///
/// One instance is built at startup and shared through [`crate::AppState`];
/// handlers never reach for a global registry.
pub struct Metrics {
    registry: Registry,
    http_requests: IntCounterVec,
    process: ProcessGauges,
}

/// Default runtime gauges, refreshed by [`spawn_process_sampler`].
struct ProcessGauges {
    cpu_usage: Gauge,
    memory_rss: Gauge,
    memory_vms: Option<Gauge>,
    start_time: Gauge,
}

impl Metrics {
    /// Content type of [`Metrics::render`] output.
    pub const CONTENT_TYPE: &'static str = prometheus::TEXT_FORMAT;

    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new(HTTP_REQUESTS_TOTAL, "Total HTTP requests"),
            &["method", "status"],
        )?;
        registry.register(Box::new(http_requests.clone()))?;

        let process = ProcessGauges::register(&registry)?;

        Ok(Self {
            registry,
            http_requests,
            process,
        })
    }

    pub fn record_request(&self, method: &Method, status: StatusCode) {
        self.http_requests
            .with_label_values(&[method.as_str(), status.as_str()])
            .inc();
    }

    pub fn requests_total(&self, method: &Method, status: StatusCode) -> u64 {
        self.http_requests
            .with_label_values(&[method.as_str(), status.as_str()])
            .get()
    }

    /// Refresh the process gauges from a sysinfo snapshot of this process only.
    pub fn sample_process(&self, sys: &mut System) {
        let pid = Pid::from_u32(std::process::id());
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let Some(proc_) = sys.process(pid) else {
            tracing::warn!(%pid, "could not find current process info");
            return;
        };

        let g = &self.process;
        g.cpu_usage.set(proc_.cpu_usage() as f64);
        g.memory_rss.set(proc_.memory() as f64);
        if let Some(vms) = &g.memory_vms {
            vms.set(proc_.virtual_memory() as f64);
        }
        g.start_time.set(proc_.start_time() as f64);

        tracing::trace!(
            cpu_pct = proc_.cpu_usage(),
            rss_bytes = proc_.memory(),
            "process metrics sampled"
        );
    }

    /// Snapshot the registry, then encode it in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl ProcessGauges {
    fn register(registry: &Registry) -> Result<Self> {
        let cpu_usage = Gauge::with_opts(Opts::new(
            "process_cpu_usage_percent",
            "Process CPU usage percentage (can exceed 100% on multi-core)",
        ))?;
        let memory_rss = Gauge::with_opts(Opts::new(
            "process_resident_memory_bytes",
            "Process resident set size (RSS) in bytes",
        ))?;
        let start_time = Gauge::with_opts(Opts::new(
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds",
        ))?;

        // macOS reserves huge address ranges; the number says nothing about RAM.
        let memory_vms = if cfg!(target_os = "macos") {
            None
        } else {
            let g = Gauge::with_opts(Opts::new(
                "process_virtual_memory_bytes",
                "Process virtual memory size (address space) in bytes",
            ))?;
            registry.register(Box::new(g.clone()))?;
            Some(g)
        };

        registry.register(Box::new(cpu_usage.clone()))?;
        registry.register(Box::new(memory_rss.clone()))?;
        registry.register(Box::new(start_time.clone()))?;

        Ok(Self {
            cpu_usage,
            memory_rss,
            memory_vms,
            start_time,
        })
    }
}

/// Periodically refresh the process gauges. The first tick fires immediately.
///
/// Sampling reads `/proc` (or the platform equivalent) synchronously, so it
/// runs on the blocking pool and never stalls request handling.
pub fn spawn_process_sampler(metrics: Arc<Metrics>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut sys = System::new();
        let mut interval = time::interval(every);
        loop {
            interval.tick().await;
            let metrics = metrics.clone();
            let sampled = tokio::task::spawn_blocking(move || {
                metrics.sample_process(&mut sys);
                sys
            })
            .await;
            match sampled {
                Ok(s) => sys = s,
                Err(e) => {
                    tracing::error!(error = %e, "process sampler stopped");
                    return;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_absent_until_first_increment() {
        let metrics = Metrics::new().unwrap();
        let out = metrics.render().unwrap();
        assert!(!out.contains(HTTP_REQUESTS_TOTAL));

        metrics.record_request(&Method::GET, StatusCode::OK);
        let out = metrics.render().unwrap();
        assert!(out.contains("# HELP http_requests_total Total HTTP requests"));
        assert!(out.contains("# TYPE http_requests_total counter"));
        assert!(out.contains(r#"http_requests_total{method="GET",status="200"} 1"#));
    }

    #[test]
    fn label_pairs_are_independent() {
        let metrics = Metrics::new().unwrap();
        for _ in 0..3 {
            metrics.record_request(&Method::GET, StatusCode::OK);
        }
        metrics.record_request(&Method::GET, StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(metrics.requests_total(&Method::GET, StatusCode::OK), 3);
        assert_eq!(
            metrics.requests_total(&Method::GET, StatusCode::INTERNAL_SERVER_ERROR),
            1
        );
    }

    #[test]
    fn separate_instances_do_not_share_state() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.record_request(&Method::GET, StatusCode::OK);
        assert_eq!(b.requests_total(&Method::GET, StatusCode::OK), 0);
    }

    #[test]
    fn sampling_populates_process_gauges() {
        let metrics = Metrics::new().unwrap();
        let mut sys = System::new();
        metrics.sample_process(&mut sys);

        let out = metrics.render().unwrap();
        assert!(out.contains("# TYPE process_resident_memory_bytes gauge"));
        assert!(!out.contains("process_resident_memory_bytes 0\n"));
    }

    #[test]
    fn content_type_is_text_format() {
        assert_eq!(Metrics::CONTENT_TYPE, TextEncoder::new().format_type());
    }
}
