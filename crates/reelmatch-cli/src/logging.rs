use anyhow::Result;
use media_lookup_config::LoggingConfig;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directive for a verbosity level
///
/// 0 = warn (listings go to stdout, logs stay out of the way), 1 = debug with
/// hyper/reqwest internals muted, 2+ = trace. Without `-v`, a configured
/// `[logging] level` replaces the warn default.
fn filter_directive(verbose_level: u8, quiet: bool, configured: Option<&str>) -> String {
    if quiet {
        return "error".to_string();
    }
    match (verbose_level, configured) {
        (0, Some(level)) if !level.trim().is_empty() => level.trim().to_string(),
        (0, _) => "warn".to_string(),
        (1, _) => "debug,hyper=warn,reqwest=warn,rustls=warn".to_string(),
        _ => "trace".to_string(),
    }
}

fn json_enabled() -> bool {
    std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal())
}

/// `logs/reelmatch.log` rotates as `reelmatch.YYYY-MM-DD`
fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    let log_prefix = log_filename.rsplit_once('.').map(|(prefix, _)| prefix).unwrap_or(log_filename);

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix))
}

pub fn init_logging_with_file(verbose_level: u8, quiet: bool, settings: Option<LoggingConfig>) -> Result<()> {
    let directive = filter_directive(verbose_level, quiet, settings.as_ref().map(|s| s.level.as_str()));
    let filter = if quiet {
        EnvFilter::new(&directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive))
    };
    let log_file = settings.and_then(|s| s.file);

    let json = json_enabled();
    let registry = Registry::default().with(filter);

    match log_file {
        Some(log_path) => {
            let file_appender = rolling_appender(&log_path)?;
            if json {
                registry
                    .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(file_appender))
                    .init();
            } else {
                registry
                    .with(
                        fmt::layer()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_ansi(false)
                            .with_writer(file_appender),
                    )
                    .init();
            }
        }
        None => {
            if json {
                registry
                    .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
                    .init();
            } else {
                registry
                    .with(fmt::layer().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
                    .init();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_levels() {
        assert_eq!(filter_directive(0, false, None), "warn");
        assert!(filter_directive(1, false, None).starts_with("debug"));
        assert_eq!(filter_directive(3, false, None), "trace");
        assert_eq!(filter_directive(2, true, None), "error");
    }

    #[test]
    fn test_configured_level_only_replaces_default() {
        assert_eq!(filter_directive(0, false, Some("info")), "info");
        assert_eq!(filter_directive(0, false, Some("  ")), "warn");
        assert!(filter_directive(1, false, Some("info")).starts_with("debug"));
        assert_eq!(filter_directive(0, true, Some("info")), "error");
    }

    #[test]
    fn test_rolling_appender_creates_directory() {
        let dir = std::env::temp_dir().join(format!("reelmatch-log-test-{}", std::process::id()));
        let path = dir.join("logs").join("reelmatch.log");
        rolling_appender(&path).unwrap();
        assert!(dir.join("logs").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
