use crate::model::LoggingConfig;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::env;
use std::io::Write;

/// Install the global logger. `--verbose` forces debug; otherwise the level
/// comes from the config file. `RUST_LOG` overrides both.
pub fn setup_logger(verbose: bool, config: &LoggingConfig) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        config.level.parse().unwrap_or(LevelFilter::Info)
    };
    let timestamped = config.format == "timestamped";

    let mut builder = Builder::new();
    builder.filter(None, level);
    builder.target(Target::Stderr);

    builder.format(move |buf, record| {
        let prefix = match record.level() {
            Level::Error => "error: ",
            Level::Warn => "warning: ",
            Level::Info | Level::Debug | Level::Trace => "",
        };
        if timestamped {
            writeln!(
                buf,
                "{} {:<5} {}{}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                prefix,
                record.args()
            )
        } else {
            writeln!(buf, "{}{}", prefix, record.args())
        }
    });

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    }

    // A logger may already be installed when embedded in another binary.
    let _ = builder.try_init();
}
