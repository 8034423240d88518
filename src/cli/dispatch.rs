use crate::cli::args::{Cli, Commands, ConnectionArgs};
use crate::dialects::{DbType, DialectError};
use crate::drivers::{DriverCatalog, DriverError, ParameterFormatter};
use crate::executor::{ConnectionError, ConnectionManager};
use crate::model::{Config, ConfigError};
use crate::persistence::{PersistenceConfiguration, PersistenceError};
use crate::presets::get_registry;
use log::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub fn handle(cli: Cli, mut config: Config) {
    if let Some(preset) = &cli.preset {
        config.dialect.preset = preset.clone();
    }
    debug!("Effective configuration preset: {}", config.dialect.preset);

    let result = match cli.command {
        Commands::Connstr { connection, odbc } => {
            info!("Running CONNSTR command");
            run_connstr(&config, &connection, odbc)
        }
        Commands::Types { ty, length } => {
            info!("Running TYPES command");
            run_types(&config, ty.as_deref(), length)
        }
        Commands::Capabilities { table } => {
            info!("Running CAPABILITIES command");
            run_capabilities(&config, &table)
        }
        Commands::Presets => {
            info!("Running PRESETS command");
            run_presets();
            Ok(())
        }
        Commands::Drivers => {
            info!("Running DRIVERS command");
            run_drivers()
        }
        Commands::Ping { connection } => {
            info!("Running PING command");
            run_ping(&config, &connection)
        }
        Commands::Config { output, for_env } => {
            info!("Running CONFIG command");
            run_config(&output, for_env.as_deref())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn configure(config: &Config, args: &ConnectionArgs) -> Result<PersistenceConfiguration, DialectError> {
    let configuration = PersistenceConfiguration::from_config(config)?
        .connection_string(|builder| {
            if let Some(server) = &args.server {
                builder.server(server);
            }
            if let Some(database) = &args.database {
                builder.database(database);
            }
            if let Some(user) = &args.user {
                builder.user_name(user);
            }
            if let Some(password) = &args.password {
                builder.password(password);
            }
            if let Some(conn) = &args.conn {
                builder.connection_string(conn);
            }
        });
    Ok(configuration)
}

fn run_connstr(config: &Config, args: &ConnectionArgs, odbc: bool) -> Result<(), DispatchError> {
    let configuration = configure(config, args)?;

    if odbc {
        let manager = ConnectionManager::new()?;
        let settings = configuration.build_verified(&manager)?;
        println!("{}", settings.odbc_connection_string()?);
    } else {
        println!("{}", configuration.build().connection_string());
    }
    Ok(())
}

fn run_types(config: &Config, ty: Option<&str>, length: Option<u32>) -> Result<(), DispatchError> {
    let preset = get_registry().require(&config.dialect.preset)?;
    let dialect = preset.dialect.as_ref();

    match ty {
        Some(name) => {
            let ty: DbType = name.parse()?;
            println!("{}", dialect.column_type(ty, length)?);
        }
        None => {
            println!("{:<24} {:<12} TEMPLATE", "TYPE", "MAX LENGTH");
            for (ty, bound, template) in dialect.type_registry().entries() {
                let bound = bound.map(|b| b.to_string()).unwrap_or_else(|| "default".to_string());
                println!("{:<24} {:<12} {}", ty.to_string(), bound, template);
            }
        }
    }
    Ok(())
}

fn run_capabilities(config: &Config, table: &str) -> Result<(), DispatchError> {
    let preset = get_registry().require(&config.dialect.preset)?;
    let dialect = preset.dialect.as_ref();
    let driver = preset.driver.as_ref();

    println!("Dialect: {} ({})", dialect.name(), dialect.config().metadata.description);
    for (name, value) in dialect.capabilities().iter() {
        println!("  {} = {}", name, value);
    }
    println!("  temporary_table_name({}) = {:?}", table, dialect.temporary_table_name(table));
    match dialect.schema_introspection_queries() {
        Ok(queries) => println!("  schema_introspection = {} queries", queries.len()),
        Err(e) => println!("  schema_introspection = unsupported ({})", e),
    }

    let caps = driver.capabilities();
    println!("Driver: {}", driver.name());
    println!("  use_named_prefix_in_sql = {}", caps.use_named_prefix_in_sql);
    println!("  use_named_prefix_in_parameter = {}", caps.use_named_prefix_in_parameter);
    println!("  named_prefix = {:?}", caps.named_prefix);
    println!("  parameter_name(0) = {:?}", driver.parameter_name(0));
    println!("  supports_multiple_open_readers = {}", caps.supports_multiple_open_readers);
    Ok(())
}

fn run_presets() {
    let registry = get_registry();
    for name in registry.list_presets() {
        if let Some(preset) = registry.get(&name) {
            println!(
                "{} (dialect: {}, driver: {}, aliases: {})",
                preset.name,
                preset.dialect.name(),
                preset.driver.name(),
                preset.aliases.join(", ")
            );
        }
    }
}

fn run_drivers() -> Result<(), DispatchError> {
    let manager = ConnectionManager::new()?;
    let installed = manager.installed_drivers()?;

    println!("Installed ODBC drivers ({}):", installed.len());
    for name in &installed {
        println!("  {}", name);
    }

    let mut failures = 0;
    for (preset, outcome) in get_registry().validate_drivers(&manager) {
        match outcome {
            Ok(driver) => println!("{}: {}", preset, driver),
            Err(e) => {
                warn!("{}: {}", preset, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        warn!("{} preset(s) have no usable driver", failures);
    }
    Ok(())
}

fn run_ping(config: &Config, args: &ConnectionArgs) -> Result<(), DispatchError> {
    let settings = configure(config, args)?.build();
    let manager = ConnectionManager::new()?;

    manager.test_connection(&settings, config.connection.timeout)?;
    println!("Connection OK ({})", settings.preset_name());
    Ok(())
}

fn run_config(output: &str, for_env: Option<&str>) -> Result<(), DispatchError> {
    Config::generate_default_config(output)?;
    info!("Generated default configuration file: {}", output);

    if let Some(env_name) = for_env {
        std::fs::create_dir_all("config")
            .map_err(|e| ConfigError::FileWrite("config".to_string(), e.to_string()))?;
        let env_path = format!("config/{}.toml", env_name);
        Config::generate_default_config(&env_path)?;
        info!("Generated environment configuration file: {}", env_path);
    }
    Ok(())
}
