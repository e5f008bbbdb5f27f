pub mod build_info;

use std::{env, sync::Once};

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "bucket_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// A valid `RUST_LOG` is used as is; otherwise the crate logs at `info`. A
/// subscriber installed earlier by the host is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = filter_from(env::var(EnvFilter::DEFAULT_ENV).ok());
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

fn filter_from(spec: Option<String>) -> EnvFilter {
    spec.and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
