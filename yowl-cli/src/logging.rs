use tracing_subscriber::{fmt, EnvFilter};

/// Fallback level source when `RUST_LOG` is not set.
pub const LOG_LEVEL_ENV: &str = "YOWL_LOG_LEVEL";

/// Install the stderr subscriber. Stdout carries dictated text, so logs never
/// go there.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var(LOG_LEVEL_ENV).ok();
        EnvFilter::new(level_directive(level.as_deref()))
    });
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn level_directive(level: Option<&str>) -> &'static str {
    match level.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
        Some("off") => "off",
        Some("error") => "error",
        Some("info") => "info",
        Some("debug") => "debug",
        Some("trace") => "trace",
        _ => "warn",
    }
}
