use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    runtime,
    trace::{RandomIdGenerator, Sampler, Tracer},
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use std::time::Instant;
use tracing::{Instrument, error, field, info, info_span, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};
use trilhas_auth::SecurityContext;

const LOG_DIR: &str = "storage/logs";

/// Wraps every request in an `http_request` span and logs its outcome.
///
/// Seeds the request with a [`SecurityContext`] so the principal bound further
/// down the stack is visible here once the response comes back.
pub async fn logging_middleware(mut req: Request, next: Next) -> Response {
    let started = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let ctx = req
        .extensions()
        .get::<SecurityContext>()
        .cloned()
        .unwrap_or_default();
    req.extensions_mut().insert(ctx.clone());

    let span = info_span!(
        "http_request",
        request_id = %uuid::Uuid::new_v4(),
        method = %req.method(),
        route = %route,
        actor_id = field::Empty,
    );

    let response = next.run(req).instrument(span.clone()).await;

    if let Some(actor) = ctx.actor_id() {
        span.record("actor_id", field::display(actor));
    }
    let latency_ms = started.elapsed().as_millis() as u64;
    let status = response.status();

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = status.as_u16(), latency_ms, "Request failed");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), latency_ms, "Request rejected");
        } else {
            info!(status = status.as_u16(), latency_ms, "Request completed");
        }
    });

    response
}

fn init_tracer() -> Result<Tracer, TraceError> {
    let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());

    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
        KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        KeyValue::new(
            "environment",
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        ),
    ]);

    let otlp_exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(otlp_endpoint);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(otlp_exporter)
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)
}

/// `RUST_LOG`, then `LOG_LEVEL`, then the built-in default.
fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| std::env::var("LOG_LEVEL").map(EnvFilter::new))
        .unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,audit=info,tower_http=warn,hyper=info,tonic=info",
                env!("CARGO_CRATE_NAME")
            ))
        })
}

/// Installs the global subscriber: console, a daily error log, a daily JSON
/// log, and OpenTelemetry export when the collector is reachable.
pub fn init_tracing() -> anyhow::Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    std::fs::create_dir_all(LOG_DIR)?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter());

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "trilhas.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    // Includes the `audit` target, so the log sink leaves a durable trail here
    let json_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "trilhas.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    let (otel_layer, otel_error) = match init_tracer() {
        Ok(tracer) => (Some(tracing_opentelemetry::layer().with_tracer(tracer)), None),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()?;

    match otel_error {
        None => info!(log_dir = LOG_DIR, "Tracing initialized with OpenTelemetry export"),
        Some(e) => warn!(
            error = %e,
            "OpenTelemetry unavailable; logging to console and files only"
        ),
    }

    Ok(())
}

pub async fn shutdown_tracer() {
    info!("Shutting down OpenTelemetry tracer");
    global::shutdown_tracer_provider();
}
