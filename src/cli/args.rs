use clap::{Parser, Subcommand};

/// CLI entry point for psql_dialect
#[derive(Parser, Debug)]
#[command(
    name = "psql_dialect",
    version,
    about = "Pervasive SQL dialect and ODBC driver adapter"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Environment (loads config/{env}.toml)
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// Preset name or alias (overrides the config file)
    #[arg(long, global = true)]
    pub preset: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection parameters accepted by commands that build a connection string
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Server name
    #[arg(long)]
    pub server: Option<String>,

    /// Database name
    #[arg(long)]
    pub database: Option<String>,

    /// User ID
    #[arg(long)]
    pub user: Option<String>,

    /// Password
    #[arg(long)]
    pub password: Option<String>,

    /// Explicit connection string, used verbatim
    #[arg(long)]
    pub conn: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the connection string
    Connstr {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Prefix the resolved ODBC driver attribute
        #[arg(long)]
        odbc: bool,
    },

    /// Resolve a column type, or list the type table
    Types {
        /// Abstract type (e.g. AnsiString, Int32); lists all when omitted
        #[arg(long = "type")]
        ty: Option<String>,

        /// Requested column length
        #[arg(long)]
        length: Option<u32>,
    },

    /// Show dialect and driver capabilities
    Capabilities {
        /// Base table name used to show temporary table naming
        #[arg(long, default_value = "Orders")]
        table: String,
    },

    /// List registered presets
    Presets,

    /// List installed ODBC drivers and check the preset's driver binding
    Drivers,

    /// Connect and run a test query
    Ping {
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Generate configuration file
    Config {
        /// Output path for config file
        #[arg(long, default_value = "config.toml")]
        output: String,

        /// Also create config/{name}.toml for this environment
        #[arg(long = "for-env")]
        for_env: Option<String>,
    },
}
