//! # wf-config
//!
//! Configuration store for a blogging server.  Holds the three groups of
//! settings the server needs (HTTP server, datastore, application features),
//! produces sane defaults, and reads/writes them as a sectioned INI file
//! (`config.ini` by default).
//!
//! # Layout
//!
//! - **`domain`** – The plain value records ([`Config`], [`ServerCfg`],
//!   [`DatabaseCfg`], [`AppCfg`]) and the operations that only touch memory:
//!   the defaults factory, the datastore backend switches and the derived
//!   predicates.
//!
//! - **`storage`** – Everything that touches text or disk.  A single field
//!   table ([`storage::FIELDS`]) maps every struct field to its INI section
//!   and key; both [`load`] and [`save`] walk that table, so the read and
//!   write paths cannot drift apart.
//!
//! ```rust
//! use wf_config::{Backend, Config};
//!
//! let mut cfg = Config::new();
//! assert_eq!(cfg.database.backend(), Some(Backend::MySql));
//!
//! cfg.use_sqlite(true);
//! assert_eq!(cfg.database.file_name, "writefreely.db");
//! ```

pub mod domain;
pub mod storage;

// Re-export the most-used items at the crate root so callers can write
// `wf_config::Config` instead of `wf_config::domain::config::Config`.
pub use domain::config::{AppCfg, Backend, Config, DatabaseCfg, ServerCfg};
pub use storage::codec::{parse, render};
pub use storage::file::{load, resolve_path, save, FILE_NAME};
pub use storage::{ConfigError, InvalidValue, ParseReason};
