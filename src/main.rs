use clap::Parser;
use psql_dialect::cli::args::Cli;
use psql_dialect::cli::dispatch::handle;
use psql_dialect::logger::setup_logger;
use psql_dialect::model::{Config, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref(), cli.env.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            setup_logger(cli.verbose, &LoggingConfig::default());
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    setup_logger(cli.verbose, &config.logging);
    handle(cli, config);
}
