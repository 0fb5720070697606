use std::sync::OnceLock;

static CONNECTION: OnceLock<DatabaseConnection> = OnceLock::new();

/// Process-wide database connection. Only one instance ever exists.
#[derive(Debug)]
pub struct DatabaseConnection {
    _private: (),
}

impl DatabaseConnection {
    /// Returns the shared connection, creating it on first use.
    #[must_use]
    pub fn instance() -> &'static DatabaseConnection {
        CONNECTION.get_or_init(|| {
            log::debug!("creating the shared database connection");
            DatabaseConnection { _private: () }
        })
    }

    /// Simulates connecting to the database.
    #[must_use]
    pub fn connect(&self) -> &'static str {
        "Conectado a la base de datos"
    }
}
