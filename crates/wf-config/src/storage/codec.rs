//! Conversion between [`Config`] and INI text.
//!
//! Both directions walk [`FIELDS`]; neither knows any section or key name on
//! its own.
//!
//! ```text
//! [server]
//! hidden_host =
//! port = 8080
//! bind = localhost
//! ...
//! ```
//!
//! # Value layout
//!
//! `rust-ini` is used for sections and keys only.  Its escape and quote
//! handling is switched off, so backslashes are literal (`C:\tls\cert.pem`
//! stays as written).  Values are laid out the way go-ini based servers read
//! and write them:
//!
//! | Raw value                                        | Written as      |
//! |--------------------------------------------------|-----------------|
//! | plain                                            | `value`         |
//! | contains `#` or `;`, has edge whitespace, is wrapped in `"`/`'`, or starts with `` ` `` | `` `value` `` |
//! | needs wrapping and contains `` ` ``               | `"""value"""`   |
//!
//! On read, `` `…` `` and `"""…"""` are taken verbatim.  Unwrapped values
//! lose an inline `#`/`;` comment, and a single pair of surrounding `"` or
//! `'` is dropped.

use std::io;

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use tracing::trace;

use crate::domain::config::Config;

use super::fields::{in_section, Mapping, FIELDS, SECTIONS};
use super::ParseReason;

const TRIPLE_QUOTE: &str = "\"\"\"";

/// Whether `value` is wrapped in exactly one pair of `quote`.
fn has_surrounding_quote(value: &str, quote: char) -> bool {
    value.len() >= 2
        && value.starts_with(quote)
        && value.ends_with(quote)
        && value.matches(quote).count() == 2
}

/// Lays out a rendered value so [`decode_value`] gives it back unchanged.
///
/// # Errors
///
/// Line breaks cannot be stored in a line-based file, and a value holding
/// both a backtick and `"""` has no wrapper left.  Both are
/// [`io::ErrorKind::InvalidInput`].
fn encode_value(section: &str, key: &str, value: &str) -> io::Result<String> {
    let unrepresentable = |what: &str| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("[{section}] {key}: value {what}"),
        )
    };

    if value.contains(['\n', '\r']) {
        return Err(unrepresentable("contains a line break"));
    }

    let needs_wrapping = value.contains(['#', ';'])
        || value.trim() != value
        || has_surrounding_quote(value, '"')
        || has_surrounding_quote(value, '\'')
        || value.starts_with('`')
        || value.starts_with(TRIPLE_QUOTE);
    if !needs_wrapping {
        return Ok(value.to_string());
    }

    if !value.contains('`') {
        Ok(format!("`{value}`"))
    } else if !value.contains(TRIPLE_QUOTE) {
        Ok(format!("{TRIPLE_QUOTE}{value}{TRIPLE_QUOTE}"))
    } else {
        Err(unrepresentable("contains both a backtick and a triple quote"))
    }
}

/// Recovers a value from its on-disk form.
fn decode_value(raw: &str) -> &str {
    let line = raw.trim();

    if line.len() > TRIPLE_QUOTE.len() && line.starts_with(TRIPLE_QUOTE) {
        let body = &line[TRIPLE_QUOTE.len()..];
        if let Some(end) = body.rfind(TRIPLE_QUOTE) {
            return &body[..end];
        }
    } else if let Some(body) = line.strip_prefix('`') {
        if let Some(end) = body.rfind('`') {
            return &body[..end];
        }
    }

    let line = match line.find(['#', ';']) {
        Some(comment) => line[..comment].trim_end(),
        None => line,
    };
    if has_surrounding_quote(line, '"') || has_surrounding_quote(line, '\'') {
        &line[1..line.len() - 1]
    } else {
        line
    }
}

/// Builds the INI document for `config`, one section per entry in
/// [`SECTIONS`], skipping fields mapped to [`Mapping::Skip`].
pub(crate) fn to_document(config: &Config) -> io::Result<Ini> {
    let mut doc = Ini::new();
    for section in SECTIONS {
        let mut setter = doc.with_section(Some(section));
        for field in in_section(section) {
            if let Mapping::Key { key, render, .. } = field.mapping {
                setter.set(key, encode_value(section, key, &render(config))?);
            }
        }
    }
    Ok(doc)
}

/// Renders `config` as INI text.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidInput`] for a string value that cannot
/// be stored on one line.
pub fn render(config: &Config) -> io::Result<String> {
    let mut buf = Vec::new();
    // `key = value` rather than the library's default `key=value`.
    let opt = WriteOption {
        escape_policy: EscapePolicy::Nothing,
        kv_separator: " = ",
        ..Default::default()
    };
    to_document(config)?.write_to_opt(&mut buf, opt)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Parses INI text into a new [`Config`].
///
/// Parsing starts from [`Config::default()`] (all zero values), not from
/// [`Config::new()`]: any key missing from `text` stays zero.  Sections and
/// keys that are not in the field table are ignored.  When a key is repeated,
/// the last occurrence wins.
///
/// # Errors
///
/// Returns [`ParseReason::Syntax`] for malformed INI and
/// [`ParseReason::Value`] for the first value that does not fit its field.
pub fn parse(text: &str) -> Result<Config, ParseReason> {
    let opt = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    };
    let doc = Ini::load_from_str_opt(text, opt)?;
    let mut config = Config::default();

    for field in FIELDS {
        let Mapping::Key { key, assign, .. } = field.mapping else {
            continue;
        };
        let Some(raw) = doc
            .section_all(Some(field.section))
            .flat_map(|p| p.get_all(key))
            .last()
        else {
            trace!(section = field.section, key, "key absent, keeping zero value");
            continue;
        };
        assign(&mut config, decode_value(raw)).map_err(|source| ParseReason::Value {
            section: field.section,
            key,
            source,
        })?;
    }

    Ok(config)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
