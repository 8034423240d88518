use crate::model::config::ConnectionConfig;
use log::debug;
use std::fmt;

/// Accumulates Pervasive connection parameters and renders the provider
/// connection string.
///
/// An explicit, non-blank connection string always wins over the individual
/// fields. Values are rendered as given: nothing is escaped or validated.
#[derive(Clone, Default)]
pub struct ConnectionStringBuilder {
    server: Option<String>,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    extra: Vec<(String, String)>,
    explicit: Option<String>,
    dirty: bool,
}

impl ConnectionStringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from the `[connection]` section of the config file.
    pub fn from_config(config: &ConnectionConfig) -> Self {
        let mut builder = Self::new();
        if let Some(server) = &config.server {
            builder.server(server);
        }
        if let Some(database) = &config.database {
            builder.database(database);
        }
        if let Some(username) = &config.username {
            builder.user_name(username);
        }
        if let Some(password) = &config.password {
            builder.password(password);
        }
        for (key, value) in &config.fields {
            builder.field(key, value);
        }
        if let Some(explicit) = &config.connection_string {
            builder.connection_string(explicit);
        }
        builder
    }

    pub fn server(&mut self, server: impl Into<String>) -> &mut Self {
        self.server = Some(server.into());
        self.dirty = true;
        self
    }

    pub fn database(&mut self, database: impl Into<String>) -> &mut Self {
        self.database = Some(database.into());
        self.dirty = true;
        self
    }

    pub fn user_name(&mut self, username: impl Into<String>) -> &mut Self {
        self.username = Some(username.into());
        self.dirty = true;
        self
    }

    pub fn password(&mut self, password: impl Into<String>) -> &mut Self {
        self.password = Some(password.into());
        self.dirty = true;
        self
    }

    /// Set an additional `key=value` segment. Setting the same key again
    /// replaces the value but keeps its original position.
    pub fn field(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.extra.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.extra.push((key, value)),
        }
        self.dirty = true;
        self
    }

    /// Use `connection_string` verbatim instead of the individual fields.
    pub fn connection_string(&mut self, connection_string: impl Into<String>) -> &mut Self {
        self.explicit = Some(connection_string.into());
        self.dirty = true;
        self
    }

    /// Whether any setter has been called.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn render(&self) -> String {
        if let Some(explicit) = self.explicit.as_deref().filter(|s| !s.trim().is_empty()) {
            debug!("Using explicit connection string (length: {})", explicit.len());
            return explicit.to_string();
        }

        let mut rendered = format!(
            "Server Name={};Database Name={};User ID={};Password={}",
            self.server.as_deref().unwrap_or_default(),
            self.database.as_deref().unwrap_or_default(),
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        );
        for (key, value) in &self.extra {
            rendered.push_str(&format!(";{}={}", key, value));
        }

        debug!(
            "Rendered connection string from {} fields (length: {})",
            4 + self.extra.len(),
            rendered.len()
        );
        rendered
    }
}

impl fmt::Debug for ConnectionStringBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionStringBuilder")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("extra", &self.extra)
            .field("explicit", &self.explicit.as_ref().map(|s| s.len()))
            .field("dirty", &self.dirty)
            .finish()
    }
}
