//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::core::Config;

/// Initialize the logger
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logger() -> bool {
    init_logger_with_file(None, false, None)
}

/// Initialize the logger with optional file output
///
/// `log_dir` must already exist; otherwise logs go to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) -> bool {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir
        && Path::new(dir).is_dir()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "waitlist");
        let installed = if json {
            builder.json().with_writer(file_appender).try_init()
        } else {
            builder.with_ansi(false).with_writer(file_appender).try_init()
        };
        return installed.is_ok();
    }

    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

/// 设置运行环境: 加载 .env，按配置初始化日志
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv() {
        // 没有 .env 文件是正常情况
        tracing::debug!("No .env loaded: {}", e);
    }
    let config = Config::from_env();
    init_logger_with_file(
        Some(config.log_level.as_str()),
        config.is_production(),
        config.log_dir.as_deref(),
    );
    tracing::info!(environment = %config.environment, "Waitlist core environment ready");
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let first = init_logger_with_file(Some("debug"), false, dir.path().to_str());
        let second = init_logger();

        assert!(first);
        assert!(!second);
        tracing::info!("written to the rolling file");
    }
}
