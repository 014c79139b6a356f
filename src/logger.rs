use env_logger::{Builder, Target, WriteStyle};
use log::Level;
use std::env;
use std::io::Write;

use crate::model::config::LoggingConfig;

pub fn setup_logger(verbose: bool, config: &LoggingConfig) {
    let level = if verbose {
        Level::Debug
    } else {
        match config.level.as_str() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "warn" => Level::Warn,
            "error" => Level::Error,
            _ => Level::Info,
        }
    };

    let mut builder = Builder::new();
    builder.filter(None, level.to_level_filter());
    builder.target(Target::Stdout);
    builder.write_style(if config.colored {
        WriteStyle::Auto
    } else {
        WriteStyle::Never
    });

    builder.format(|buf, record| {
        let prefix = match record.level() {
            Level::Error => "error: ",
            Level::Warn => "warning: ",
            Level::Info | Level::Debug | Level::Trace => "",
        };
        writeln!(buf, "{}{}", prefix, record.args())
    });

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    }

    // Ignore re-initialization; tests may set the logger up more than once.
    let _ = builder.try_init();
}
