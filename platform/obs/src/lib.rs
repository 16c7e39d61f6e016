use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{self as sdk, Resource};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "info,sqlx=warn,tower_http=info";

/// Configuration for tracing initialization.
#[derive(Clone, Debug)]
pub struct ObsConfig {
    pub service_name: String,
    pub env_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            service_name: "employee-server".to_string(),
            env_filter: None,
            otlp_endpoint: None,
        }
    }
}

impl ObsConfig {
    /// Defaults overlaid with `RUST_LOG` and `OTLP_ENDPOINT`.
    pub fn from_env() -> Self {
        Self {
            env_filter: non_empty_env("RUST_LOG"),
            otlp_endpoint: non_empty_env("OTLP_ENDPOINT"),
            ..Self::default()
        }
    }

    fn filter_directives(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(DEFAULT_FILTER)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Install tracing subscribers with optional OTLP exporter. Calling it again
/// after a successful install is a no-op.
pub fn init_tracing(config: ObsConfig) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_new(config.filter_directives())?;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if let Some(endpoint) = config.otlp_endpoint.clone() {
        let exporter = SpanExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(endpoint)
            .build()?;

        let resource = Resource::builder()
            .with_service_name(config.service_name.clone())
            .build();

        let provider = sdk::trace::SdkTracerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(exporter)
            .build();
        let tracer = provider.tracer(config.service_name.clone());

        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;
    } else {
        registry.try_init()?;
    }

    INIT.set(())
        .map_err(|_| anyhow!("tracing already initialized"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_quiets_sqlx() {
        let config = ObsConfig::default();
        assert_eq!(config.filter_directives(), DEFAULT_FILTER);
        assert!(EnvFilter::try_new(config.filter_directives()).is_ok());
    }

    #[test]
    fn explicit_filter_wins() {
        let config = ObsConfig {
            env_filter: Some("debug".into()),
            ..ObsConfig::default()
        };
        assert_eq!(config.filter_directives(), "debug");
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_tracing(ObsConfig::default()).unwrap();
        init_tracing(ObsConfig::default()).unwrap();
    }
}
