use std::fs::{self, File};
use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::fmt::format::FmtSpan;

/// Route tracing output to a JSON-lines file. The terminal belongs to the
/// dashboard, so diagnostics never go to stderr.
pub fn init_tracing_json(output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(output_path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::sync::Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
