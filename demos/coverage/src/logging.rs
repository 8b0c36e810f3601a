//! Subscriber setup for the demo binary.
//!
//! Console output is compact text; file output is JSON through a
//! non-blocking, daily-rolling appender.  `RUST_LOG` overrides the level.

use std::str::FromStr;

use anyhow::{Result, anyhow};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogOutput {
    Console,
    File,
    Both,
}

impl LogOutput {
    fn to_console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

impl FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" | "all" => Ok(LogOutput::Both),
            _ => Err(anyhow!("invalid log output {s:?}; expected console, file or both")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is unset.
    pub level:       Level,
    pub output:      LogOutput,
    pub log_dir:     String,
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level:       Level::INFO,
            output:      LogOutput::Console,
            log_dir:     "logs".to_string(),
            file_prefix: "ptrack".to_string(),
        }
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file appender on drop; keep it alive for
/// the whole run.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();

    let console_layer = config
        .output
        .to_console()
        .then(|| fmt::layer().with_target(true).compact());

    let (file_layer, guard) = if config.output.to_file() {
        std::fs::create_dir_all(&config.log_dir)?;
        let (writer, guard) = non_blocking(rolling::daily(&config.log_dir, &config.file_prefix));
        (Some(fmt::layer().with_writer(writer).with_target(true).json()), Some(guard))
    } else {
        (None, None)
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_output_from_str() {
        assert_eq!("console".parse::<LogOutput>().unwrap(), LogOutput::Console);
        assert_eq!("FILE".parse::<LogOutput>().unwrap(), LogOutput::File);
        assert_eq!("all".parse::<LogOutput>().unwrap(), LogOutput::Both);
        assert!("syslog".parse::<LogOutput>().is_err());
    }

    #[test]
    fn output_targets() {
        assert!(LogOutput::Both.to_console() && LogOutput::Both.to_file());
        assert!(!LogOutput::Console.to_file());
        assert!(!LogOutput::File.to_console());
    }
}
