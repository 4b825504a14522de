//! Tracing subscriber initialization for the Blogsmith server.
//!
//! The subscriber is sized for a request-serving workload: span close
//! events give per-request and per-pipeline-step latency on the handler
//! and generation spans, and the pipeline records the model and token
//! usage of each completion call as span fields. sqlx query logging is
//! capped at `warn` unless `RUST_LOG` says otherwise.
//!
//! With OTel enabled, spans are additionally bridged to OpenTelemetry and
//! exported through the stdout exporter (local development; swap the
//! exporter for OTLP when wiring a collector).

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the OTel tracer provider alive for the process lifetime and
/// flushes buffered spans when dropped.
///
/// Hold this in `main` for as long as the server runs. When OTel was not
/// enabled, dropping it is a no-op.
#[must_use = "dropping the guard immediately flushes and stops span export"]
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("tracer provider shutdown error: {e}");
            }
        }
    }
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`; without it, defaults to `info` with sqlx capped at
/// `warn` so statement logging does not drown request spans.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing(enable_otel: bool) -> Result<TracingGuard, Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let provider = if enable_otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("blogsmith");
        opentelemetry::global::set_tracer_provider(provider.clone());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;
        Some(provider)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
        None
    };

    tracing::debug!(otel = enable_otel, "tracing initialized");
    Ok(TracingGuard { provider })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_exclusive() {
        let first = init_tracing(false);
        assert!(first.is_ok());

        // The global subscriber slot is taken; a second install must fail
        // instead of silently replacing it.
        let second = init_tracing(false);
        assert!(second.is_err());
    }
}
