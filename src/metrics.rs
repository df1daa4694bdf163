//! Prometheus export for HTTP traffic and the auth/audit counters emitted by
//! the workspace crates.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{Unit, counter, describe_counter, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use trilhas_auth::SecurityContext;

const REQUEST_DURATION: &str = "http_request_duration_seconds";
const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads `OBSERVABILITY_ENABLED` once; anything but `false`/`0` enables it.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0"))
            .unwrap_or(true)
    })
}

fn describe_metrics() {
    describe_counter!("http_requests_total", "HTTP requests served");
    describe_histogram!(REQUEST_DURATION, Unit::Seconds, "HTTP request latency");
    describe_counter!(
        "auth_resolutions_total",
        "Session resolutions by outcome (authenticated, missing_credential, token_invalid, ...)"
    );
    describe_counter!("audit_records_total", "Audit records accepted by the sink");
    describe_counter!(
        "audit_sink_failures_total",
        "Audit records lost because the sink rejected them"
    );
    describe_counter!(
        "audit_unresolved_total",
        "Audited operations skipped for lack of an entity id"
    );
}

/// Installs the Prometheus recorder and its upkeep task.
///
/// Returns `Ok(None)` when observability is switched off, in which case every
/// `metrics` macro in the workspace stays a no-op.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION.to_string()),
            &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        )?
        .install_recorder()?;
    describe_metrics();

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            ticker.tick().await;
            upkeep.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Records count, latency and in-flight gauge per route. Requests are split
/// by whether a principal was bound while they were handled.
pub async fn metrics_middleware(mut req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let started = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let ctx = req
        .extensions()
        .get::<SecurityContext>()
        .cloned()
        .unwrap_or_default();
    req.extensions_mut().insert(ctx.clone());

    gauge!("http_requests_in_flight").increment(1.0);
    let response = next.run(req).await;
    gauge!("http_requests_in_flight").decrement(1.0);

    let principal = if ctx.is_authenticated() {
        "authenticated"
    } else {
        "anonymous"
    };

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => response.status().as_u16().to_string(),
        "principal" => principal
    )
    .increment(1);
    histogram!(REQUEST_DURATION, "method" => method, "route" => route)
        .record(started.elapsed().as_secs_f64());

    response
}

/// Router for the separate metrics listener.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}
