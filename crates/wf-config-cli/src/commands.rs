//! Subcommand implementations.
//!
//! Each command writes its report to the given writer so tests can capture
//! it; `main.rs` passes stdout.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use tracing::info;
use wf_config::storage::file::resolved_path_buf;
use wf_config::{load, render, save, Backend, Config};

const MASK: &str = "********";

/// Writes a fresh config to `path`, refusing to clobber an existing file
/// unless `force` is set.
pub fn init(path: &Path, sqlite: bool, force: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let path = resolved_path_buf(path);
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", path.display());
    }

    let mut cfg = Config::new();
    if sqlite {
        cfg.use_sqlite(true);
    }
    save(&cfg, &path)?;

    info!(path = %path.display(), backend = %cfg.database.db_type, "wrote new config");
    writeln!(out, "wrote {}", path.display())?;
    Ok(())
}

/// Prints the config at `path` as INI text, or as JSON with the database
/// password masked.
pub fn show(path: &Path, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let cfg = load(path)?;

    if json {
        let mut value = serde_json::to_value(&cfg).context("failed to convert config to JSON")?;
        if !cfg.database.password.is_empty() {
            value["database"]["password"] = MASK.into();
        }
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)?;
    } else {
        out.write_all(render(&cfg)?.as_bytes())?;
    }
    Ok(())
}

/// Prints which backend the config selects and whether the server would
/// terminate TLS itself.
pub fn check(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let cfg = load(path)?;
    let db = &cfg.database;

    let backend = match db.backend() {
        Some(Backend::MySql) => format!("{} ({}:{})", Backend::MySql.as_str(), db.host, db.port),
        Some(Backend::Sqlite) => format!("{} (file {})", Backend::Sqlite.as_str(), db.file_name),
        None => format!("unknown type {:?}", db.db_type),
    };
    let tls = if cfg.server.tls_enabled() { "enabled" } else { "disabled" };
    let standalone = if cfg.is_secure_standalone() { "yes" } else { "no" };

    writeln!(out, "config:            {}", resolved_path_buf(path).display())?;
    writeln!(out, "listen:            {}:{}", cfg.server.bind, cfg.server.port)?;
    writeln!(out, "database:          {backend}")?;
    writeln!(out, "tls:               {tls}")?;
    writeln!(out, "secure standalone: {standalone}")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
