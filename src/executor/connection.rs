use crate::dialects::DatabaseDialect;
use crate::drivers::{DriverCatalog, DriverError};
use crate::persistence::PersistenceSettings;
use log::{debug, error, info};
use odbc_api::{
    Connection, ConnectionOptions, Cursor, Environment, Error as OdbcError, buffers::TextRowSet,
};

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("ODBC error: {0}")]
    Odbc(#[from] OdbcError),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),
}

/// Owns the ODBC environment and opens connections through it.
pub struct ConnectionManager {
    environment: Environment,
}

impl ConnectionManager {
    pub fn new() -> Result<Self, ConnectionError> {
        let environment = Environment::new()?;
        Ok(Self { environment })
    }

    /// Connect with fully built settings. The driver binding is resolved
    /// first so that a missing vendor driver fails before any login attempt.
    pub fn connect(&self, settings: &PersistenceSettings, timeout_sec: u32) -> Result<Connection<'_>, ConnectionError> {
        settings.verify_driver(self)?;
        let connection_string = settings.odbc_connection_string()?;
        debug!(
            "Connecting with preset {} (connection string length: {})",
            settings.preset_name(),
            connection_string.len()
        );

        let options = ConnectionOptions {
            login_timeout_sec: Some(timeout_sec),
            ..ConnectionOptions::default()
        };
        let connection = self
            .environment
            .connect_with_connection_string(&connection_string, options)
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                ConnectionError::ConnectionFailed(e.to_string())
            })?;

        info!("Successfully connected to database");
        Ok(connection)
    }

    pub fn test_connection(&self, settings: &PersistenceSettings, timeout_sec: u32) -> Result<(), ConnectionError> {
        debug!("Testing database connection");
        let connection = self.connect(settings, timeout_sec)?;
        let mut executor = DatabaseExecutor::new(connection);

        executor.query_single_value("SELECT 1")?;
        info!("Database connection test successful");
        Ok(())
    }
}

impl DriverCatalog for ConnectionManager {
    fn installed_drivers(&self) -> Result<Vec<String>, DriverError> {
        let drivers = self.environment.drivers()?;
        Ok(drivers.into_iter().map(|d| d.description).collect())
    }
}

/// Runs statements on one connection.
///
/// Every method drains and drops its cursor before returning, so at most one
/// cursor is open at a time; Pervasive connections do not allow more.
pub struct DatabaseExecutor<'a> {
    connection: Connection<'a>,
}

impl<'a> DatabaseExecutor<'a> {
    pub fn new(connection: Connection<'a>) -> Self {
        Self { connection }
    }

    /// Run one statement, draining any result set it produces.
    pub fn execute(&mut self, statement: &str) -> Result<(), ConnectionError> {
        debug!("Executing SQL statement (length: {})", statement.len());

        let mut prepared = self
            .connection
            .prepare(statement)
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?;

        match prepared.execute(()) {
            Ok(Some(mut cursor)) => {
                let mut buffer = TextRowSet::for_cursor(100, &mut cursor, Some(4096))?;
                let mut row_set_cursor = cursor.bind_buffer(&mut buffer)?;
                while row_set_cursor.fetch()?.is_some() {}
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                error!("Statement execution failed: {}", e);
                Err(ConnectionError::QueryFailed(e.to_string()))
            }
        }
    }

    pub fn query_single_value(&mut self, query: &str) -> Result<Option<String>, ConnectionError> {
        debug!("Querying single value: {}", query);

        let mut prepared = self
            .connection
            .prepare(query)
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?;

        let mut cursor = prepared
            .execute(())
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?
            .ok_or_else(|| ConnectionError::QueryFailed("Query returned no cursor".to_string()))?;

        let mut buffer = TextRowSet::for_cursor(1, &mut cursor, Some(4096))?;
        let mut row_set_cursor = cursor.bind_buffer(&mut buffer)?;

        if let Some(row_set) = row_set_cursor.fetch()? {
            if row_set.num_rows() > 0 {
                if let Some(value) = row_set.at(0, 0) {
                    let result = String::from_utf8_lossy(value).to_string();
                    debug!("Query returned single value: {}", result);
                    return Ok(Some(result));
                }
            }
        }

        debug!("Query returned no value");
        Ok(None)
    }

    pub fn query_rows(&mut self, query: &str) -> Result<Vec<Vec<String>>, ConnectionError> {
        debug!("Querying multiple rows: {}", query);

        let mut prepared = self
            .connection
            .prepare(query)
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?;

        let mut cursor = prepared
            .execute(())
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?
            .ok_or_else(|| ConnectionError::QueryFailed("Query returned no cursor".to_string()))?;

        let mut buffer = TextRowSet::for_cursor(100, &mut cursor, Some(4096))?;
        let mut row_set_cursor = cursor.bind_buffer(&mut buffer)?;
        let mut results = Vec::new();

        while let Some(row_set) = row_set_cursor.fetch()? {
            for row_index in 0..row_set.num_rows() {
                let mut row = Vec::new();
                for col_index in 0..row_set.num_cols() {
                    let value = row_set
                        .at(col_index, row_index)
                        .map(|v| String::from_utf8_lossy(v).to_string())
                        .unwrap_or_else(|| "NULL".to_string());
                    row.push(value);
                }
                results.push(row);
            }
        }

        debug!("Query returned {} rows", results.len());
        Ok(results)
    }

    /// Identity value generated by the last insert on this connection.
    pub fn last_identity(&mut self, dialect: &dyn DatabaseDialect) -> Result<Option<String>, ConnectionError> {
        if !dialect.supports_identity_columns() {
            return Err(ConnectionError::QueryFailed(format!(
                "{} does not support identity columns",
                dialect.name()
            )));
        }
        self.query_single_value(dialect.identity_select_string())
    }
}
