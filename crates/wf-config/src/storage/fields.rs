//! The field table: the one place that says which struct field lives under
//! which INI section and key.
//!
//! Every field of [`Config`] has exactly one row.  A row is either
//! [`Mapping::Key`], carrying the INI key plus a pair of accessors that
//! render and assign the field, or [`Mapping::Skip`] for runtime-only fields
//! such as `server.dev`.
//!
//! The accessors are generated by the `key!` macro below from the field path
//! and its Rust type, so adding a setting is a one-line change here.

use crate::domain::config::Config;

use super::InvalidValue;

/// Section names in the order they are written.  Each matches the name of
/// the corresponding [`Config`] field.
pub const SECTIONS: [&str; 3] = ["server", "database", "app"];

/// Renders the field's current value as INI text.
pub type RenderFn = fn(&Config) -> String;
/// Parses raw INI text into the field.
pub type AssignFn = fn(&mut Config, &str) -> Result<(), InvalidValue>;

/// How a struct field is persisted.
#[derive(Clone, Copy)]
pub enum Mapping {
    /// Persisted under `key` in the row's section.
    Key {
        key: &'static str,
        render: RenderFn,
        assign: AssignFn,
    },
    /// Never read from or written to the file.
    Skip,
}

/// One row of the field table.
#[derive(Clone, Copy)]
pub struct Field {
    /// INI section, also the [`Config`] field holding the section struct.
    pub section: &'static str,
    /// Name of the field inside the section struct.
    pub name: &'static str,
    pub mapping: Mapping,
}

impl Field {
    /// The INI key, or `None` for skipped fields.
    pub fn key(&self) -> Option<&'static str> {
        match self.mapping {
            Mapping::Key { key, .. } => Some(key),
            Mapping::Skip => None,
        }
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("section", &self.section)
            .field("name", &self.name)
            .field("key", &self.key())
            .finish()
    }
}

// ── Value coercion ────────────────────────────────────────────────────────────

/// Conversion between a field type and its INI text form.
pub trait IniValue: Sized {
    fn from_ini(raw: &str) -> Result<Self, InvalidValue>;
    fn to_ini(&self) -> String;
}

impl IniValue for String {
    fn from_ini(raw: &str) -> Result<Self, InvalidValue> {
        Ok(raw.to_string())
    }

    fn to_ini(&self) -> String {
        self.clone()
    }
}

impl IniValue for bool {
    /// Accepts the usual spellings so files edited by hand or produced by
    /// other INI tooling still load.
    fn from_ini(raw: &str) -> Result<Self, InvalidValue> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" | "y" | "YES" | "yes" | "Yes" | "ON"
            | "on" | "On" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" | "n" | "NO" | "no" | "No" | "OFF"
            | "off" | "Off" => Ok(false),
            other => Err(InvalidValue {
                expected: "a boolean",
                found: other.to_string(),
            }),
        }
    }

    fn to_ini(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_ini_int {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl IniValue for $ty {
                fn from_ini(raw: &str) -> Result<Self, InvalidValue> {
                    raw.parse().map_err(|_| InvalidValue {
                        expected: $expected,
                        found: raw.to_string(),
                    })
                }

                fn to_ini(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_ini_int! {
    u16 => "an integer between 0 and 65535",
    u32 => "a non-negative integer",
}

// ── The table ─────────────────────────────────────────────────────────────────

macro_rules! key {
    ($section:ident . $field:ident : $ty:ty => $key:literal) => {
        Field {
            section: stringify!($section),
            name: stringify!($field),
            mapping: Mapping::Key {
                key: $key,
                render: |cfg| <$ty as IniValue>::to_ini(&cfg.$section.$field),
                assign: |cfg, raw| {
                    cfg.$section.$field = <$ty as IniValue>::from_ini(raw)?;
                    Ok(())
                },
            },
        }
    };
}

macro_rules! skip {
    ($section:ident . $field:ident) => {
        Field {
            section: stringify!($section),
            name: stringify!($field),
            mapping: Mapping::Skip,
        }
    };
}

/// Every [`Config`] field, grouped by section in file order.
pub static FIELDS: &[Field] = &[
    key!(server.hidden_host: String => "hidden_host"),
    key!(server.port: u16 => "port"),
    key!(server.bind: String => "bind"),
    key!(server.tls_cert_path: String => "tls_cert_path"),
    key!(server.tls_key_path: String => "tls_key_path"),
    skip!(server.dev),
    key!(database.db_type: String => "type"),
    key!(database.file_name: String => "filename"),
    key!(database.user: String => "username"),
    key!(database.password: String => "password"),
    key!(database.database: String => "database"),
    key!(database.host: String => "host"),
    key!(database.port: u16 => "port"),
    key!(app.site_name: String => "site_name"),
    key!(app.site_desc: String => "site_description"),
    key!(app.host: String => "host"),
    key!(app.theme: String => "theme"),
    key!(app.js_disabled: bool => "disable_js"),
    key!(app.web_fonts: bool => "webfonts"),
    key!(app.lang: String => "language"),
    key!(app.single_user: bool => "single_user"),
    key!(app.open_registration: bool => "open_registration"),
    key!(app.min_username_len: u32 => "min_username_len"),
    key!(app.max_blogs: u32 => "max_blogs"),
    key!(app.federation: bool => "federation"),
    key!(app.public_stats: bool => "public_stats"),
    key!(app.private: bool => "private"),
    key!(app.local_timeline: bool => "local_timeline"),
];

/// Rows belonging to `section`, in table order.
pub fn in_section(section: &'static str) -> impl Iterator<Item = &'static Field> {
    FIELDS.iter().filter(move |f| f.section == section)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
