use std::{fs::File, io::Write};

use env_logger::{Builder, Target, fmt::Formatter};
use log::{Level, LevelFilter, Record};

use crate::options::{LogFormat, LogLevel, SolverOptions};
use crate::{Error, Result};

/// Module whose trace lines carry the per-step events.
const STEP_LOG_TARGET: &str = "tour_core::observer";

/// Installs the global logger described by `options`. Fails if a logger is
/// already installed.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{}", render(log_format, record))
        });

    // --trace-steps is useless below trace, so lift just the observer module.
    if options.trace_steps && options.log_level != LogLevel::Off {
        builder.filter_module(STEP_LOG_TARGET, LevelFilter::Trace);
    }

    match options.log_output_path() {
        Some(log_path) => {
            let log_file = File::create(log_path).map_err(|e| {
                Error::other(format!(
                    "failed to create log output file {}: {e}",
                    log_path.display()
                ))
            })?;
            builder.target(Target::Pipe(Box::new(log_file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn render(format: LogFormat, record: &Record<'_>) -> String {
    match format {
        LogFormat::Compact => format!("{} {}", level_tag(record.level()), record.args()),
        LogFormat::Pretty => format!(
            "{} [{}] {}",
            level_tag(record.level()),
            record.target(),
            record.args()
        ),
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
