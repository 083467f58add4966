//! Configuration records for a blog server instance.
//!
//! A [`Config`] is made of three independent sections, each a plain struct
//! owned by value:
//!
//! ```text
//! Config
//!  ├─ server:   ServerCfg    how the HTTP server listens
//!  ├─ database: DatabaseCfg  which datastore to connect to
//!  └─ app:      AppCfg       site identity and feature flags
//! ```
//!
//! # Two kinds of "default"
//!
//! - [`Config::default()`] is the **zero** config: empty strings, `0`,
//!   `false`.  This is what a file load starts from, so keys missing from
//!   `config.ini` stay zero.
//! - [`Config::new()`] is the **sane defaults** config used when generating a
//!   fresh `config.ini`: port 8080, MySQL on localhost, single-user mode, etc.

use serde::Serialize;

/// `database.type` value selecting MySQL.
pub const MYSQL: &str = "mysql";
/// `database.type` value selecting SQLite.
pub const SQLITE: &str = "sqlite3";

/// MySQL host written by [`Config::use_mysql`] with `fresh = true`.
pub const MYSQL_DEFAULT_HOST: &str = "localhost";
/// MySQL port written by [`Config::use_mysql`] with `fresh = true`.
pub const MYSQL_DEFAULT_PORT: u16 = 3306;
/// SQLite database file written by [`Config::use_sqlite`] with `fresh = true`.
pub const SQLITE_DEFAULT_FILE: &str = "writefreely.db";

/// Port on which [`Config::is_secure_standalone`] expects TLS to terminate.
pub const HTTPS_PORT: u16 = 443;

// ── Section records ───────────────────────────────────────────────────────────

/// Values that affect how the HTTP server runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerCfg {
    /// Optional virtual-host filter.
    pub hidden_host: String,
    pub port: u16,
    /// Interface or address to listen on.
    pub bind: String,

    /// Empty means TLS is disabled.
    pub tls_cert_path: String,
    /// Empty means TLS is disabled.
    pub tls_key_path: String,

    /// Development mode.  Set at runtime only; never read from or written to
    /// `config.ini`.
    #[serde(skip)]
    pub dev: bool,
}

impl ServerCfg {
    /// Returns `true` when both a certificate and a key path are configured.
    pub fn tls_enabled(&self) -> bool {
        !self.tls_cert_path.is_empty() && !self.tls_key_path.is_empty()
    }
}

/// Values that determine how the application connects to a datastore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseCfg {
    /// Backend identifier, [`MYSQL`] or [`SQLITE`].
    pub db_type: String,
    /// Database file; only meaningful for SQLite.
    pub file_name: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

/// Typed view over [`DatabaseCfg::db_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Network database service.
    MySql,
    /// Embedded file database.
    Sqlite,
}

impl Backend {
    /// The identifier stored in `database.type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::MySql => MYSQL,
            Backend::Sqlite => SQLITE,
        }
    }
}

impl DatabaseCfg {
    /// Interprets `db_type`.  Returns `None` for identifiers this crate does
    /// not know about; the string itself is kept as-is either way.
    pub fn backend(&self) -> Option<Backend> {
        match self.db_type.as_str() {
            MYSQL => Some(Backend::MySql),
            SQLITE => Some(Backend::Sqlite),
            _ => None,
        }
    }
}

/// Values that affect how the application functions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppCfg {
    pub site_name: String,
    pub site_desc: String,
    /// Public base URL, e.g. `https://blog.example.com`.
    pub host: String,

    // Site appearance
    pub theme: String,
    pub js_disabled: bool,
    pub web_fonts: bool,
    /// Locale code, e.g. `en`.
    pub lang: String,

    // Users
    pub single_user: bool,
    pub open_registration: bool,
    pub min_username_len: u32,
    /// `0` means unlimited.
    pub max_blogs: u32,

    // Federation
    pub federation: bool,
    pub public_stats: bool,
    pub private: bool,

    // Additional functions
    pub local_timeline: bool,
}

impl AppCfg {
    /// Whether a user who already owns `currently_used` blogs may create
    /// another one.
    pub fn can_create_blogs(&self, currently_used: u32) -> bool {
        self.max_blogs == 0 || currently_used < self.max_blogs
    }
}

// ── Aggregate ─────────────────────────────────────────────────────────────────

/// The complete configuration of one server instance.  This is the unit that
/// [`crate::load`] returns and [`crate::save`] writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    pub server: ServerCfg,
    pub database: DatabaseCfg,
    pub app: AppCfg,
}

impl Config {
    /// Creates a config with sane defaults for a fresh single-user MySQL
    /// install listening on `localhost:8080`.
    ///
    /// | Field                  | Default                 |
    /// |------------------------|-------------------------|
    /// | server.port            | `8080`                  |
    /// | server.bind            | `localhost`             |
    /// | database               | `use_mysql(true)`       |
    /// | app.host               | `http://localhost:8080` |
    /// | app.theme              | `write`                 |
    /// | app.web_fonts          | `true`                  |
    /// | app.lang               | `en`                    |
    /// | app.single_user        | `true`                  |
    /// | app.min_username_len   | `3`                     |
    /// | app.max_blogs          | `1`                     |
    /// | app.federation         | `true`                  |
    /// | app.public_stats       | `true`                  |
    ///
    /// Every other field is zero.
    pub fn new() -> Self {
        let mut cfg = Self {
            server: ServerCfg {
                port: 8080,
                bind: "localhost".to_string(),
                ..ServerCfg::default()
            },
            database: DatabaseCfg::default(),
            app: AppCfg {
                host: "http://localhost:8080".to_string(),
                theme: "write".to_string(),
                web_fonts: true,
                lang: "en".to_string(),
                single_user: true,
                min_username_len: 3,
                max_blogs: 1,
                federation: true,
                public_stats: true,
                ..AppCfg::default()
            },
        };
        cfg.use_mysql(true);
        cfg
    }

    /// Points the datastore at MySQL.
    ///
    /// With `fresh`, host and port are reset to `localhost:3306`; otherwise
    /// any previously entered connection details are kept.
    pub fn use_mysql(&mut self, fresh: bool) {
        self.database.db_type = MYSQL.to_string();
        if fresh {
            self.database.host = MYSQL_DEFAULT_HOST.to_string();
            self.database.port = MYSQL_DEFAULT_PORT;
        }
    }

    /// Points the datastore at SQLite.
    ///
    /// With `fresh`, the database file is reset to `writefreely.db`.
    pub fn use_sqlite(&mut self, fresh: bool) {
        self.database.db_type = SQLITE.to_string();
        if fresh {
            self.database.file_name = SQLITE_DEFAULT_FILE.to_string();
        }
    }

    /// Whether the server terminates TLS itself on port 443 rather than
    /// sitting behind a reverse proxy.
    pub fn is_secure_standalone(&self) -> bool {
        self.server.port == HTTPS_PORT && self.server.tls_enabled()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Config::new ───────────────────────────────────────────────────────────

    #[test]
    fn test_new_server_listens_on_localhost_8080() {
        // Arrange / Act
        let cfg = Config::new();

        // Assert
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.bind, "localhost");
        assert!(cfg.server.hidden_host.is_empty());
        assert!(!cfg.server.tls_enabled());
        assert!(!cfg.server.dev);
    }

    #[test]
    fn test_new_database_is_fresh_mysql() {
        let cfg = Config::new();
        assert_eq!(cfg.database.db_type, MYSQL);
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, 3306);
        assert!(cfg.database.file_name.is_empty());
        assert!(cfg.database.user.is_empty());
    }

    #[test]
    fn test_new_app_has_expected_defaults() {
        let cfg = Config::new();
        assert_eq!(cfg.app.host, "http://localhost:8080");
        assert_eq!(cfg.app.theme, "write");
        assert!(cfg.app.web_fonts);
        assert_eq!(cfg.app.lang, "en");
        assert!(cfg.app.single_user);
        assert_eq!(cfg.app.min_username_len, 3);
        assert_eq!(cfg.app.max_blogs, 1);
        assert!(cfg.app.federation);
        assert!(cfg.app.public_stats);
    }

    #[test]
    fn test_new_app_leaves_other_flags_off() {
        let cfg = Config::new();
        assert!(!cfg.app.js_disabled);
        assert!(!cfg.app.open_registration);
        assert!(!cfg.app.private);
        assert!(!cfg.app.local_timeline);
        assert!(cfg.app.site_name.is_empty());
    }

    #[test]
    fn test_default_is_all_zero_values() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 0);
        assert!(cfg.server.bind.is_empty());
        assert!(cfg.database.db_type.is_empty());
        assert_eq!(cfg.app.max_blogs, 0);
        assert!(!cfg.app.federation);
    }

    // ── Backend switches ──────────────────────────────────────────────────────

    #[test]
    fn test_use_mysql_fresh_resets_host_and_port_but_keeps_file_name() {
        // Arrange: previously configured for SQLite with a custom file
        let mut cfg = Config::new();
        cfg.use_sqlite(false);
        cfg.database.file_name = "custom.db".to_string();
        cfg.database.host = "db.internal".to_string();
        cfg.database.port = 3307;

        // Act
        cfg.use_mysql(true);

        // Assert
        assert_eq!(cfg.database.db_type, MYSQL);
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, 3306);
        assert_eq!(cfg.database.file_name, "custom.db");
    }

    #[test]
    fn test_use_mysql_not_fresh_keeps_connection_details() {
        let mut cfg = Config::default();
        cfg.database.host = "db.internal".to_string();
        cfg.database.port = 3307;

        cfg.use_mysql(false);

        assert_eq!(cfg.database.db_type, MYSQL);
        assert_eq!(cfg.database.host, "db.internal");
        assert_eq!(cfg.database.port, 3307);
    }

    #[test]
    fn test_use_sqlite_not_fresh_keeps_file_name() {
        // Arrange
        let mut cfg = Config::new();
        cfg.database.file_name = "custom.db".to_string();

        // Act
        cfg.use_sqlite(false);

        // Assert
        assert_eq!(cfg.database.db_type, SQLITE);
        assert_eq!(cfg.database.file_name, "custom.db");
    }

    #[test]
    fn test_use_sqlite_fresh_sets_default_file_and_keeps_host() {
        let mut cfg = Config::new();
        cfg.database.file_name = "custom.db".to_string();

        cfg.use_sqlite(true);

        assert_eq!(cfg.database.file_name, "writefreely.db");
        // Switching away from MySQL does not clear its connection details.
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, 3306);
    }

    #[test]
    fn test_backend_maps_known_identifiers() {
        let mut cfg = Config::new();
        assert_eq!(cfg.database.backend(), Some(Backend::MySql));

        cfg.use_sqlite(true);
        assert_eq!(cfg.database.backend(), Some(Backend::Sqlite));

        cfg.database.db_type = "postgres".to_string();
        assert_eq!(cfg.database.backend(), None);
    }

    #[test]
    fn test_backend_as_str_matches_stored_identifier() {
        assert_eq!(Backend::MySql.as_str(), "mysql");
        assert_eq!(Backend::Sqlite.as_str(), "sqlite3");
    }

    // ── Derived predicates ────────────────────────────────────────────────────

    fn with_server(port: u16, cert: &str, key: &str) -> Config {
        let mut cfg = Config::new();
        cfg.server.port = port;
        cfg.server.tls_cert_path = cert.to_string();
        cfg.server.tls_key_path = key.to_string();
        cfg
    }

    #[test]
    fn test_is_secure_standalone_on_443_with_cert_and_key() {
        assert!(with_server(443, "cert.pem", "key.pem").is_secure_standalone());
    }

    #[test]
    fn test_is_secure_standalone_false_on_other_port() {
        assert!(!with_server(8080, "cert.pem", "key.pem").is_secure_standalone());
    }

    #[test]
    fn test_is_secure_standalone_false_when_either_path_missing() {
        assert!(!with_server(443, "", "key.pem").is_secure_standalone());
        assert!(!with_server(443, "cert.pem", "").is_secure_standalone());
        assert!(!with_server(443, "", "").is_secure_standalone());
    }

    #[test]
    fn test_can_create_blogs_respects_limit() {
        let mut app = Config::new().app;
        assert!(app.can_create_blogs(0));
        assert!(!app.can_create_blogs(1));

        app.max_blogs = 5;
        assert!(app.can_create_blogs(4));
        assert!(!app.can_create_blogs(5));
    }

    #[test]
    fn test_can_create_blogs_zero_limit_is_unlimited() {
        let app = AppCfg::default();
        assert!(app.can_create_blogs(1_000));
    }
}
