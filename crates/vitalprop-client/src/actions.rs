//! Side effects of an export: writing files and opening links.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// Writes an export payload to `path`, creating parent directories.
pub async fn write_payload(path: &Path, payload: &str) -> ClientResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, payload).await?;
    debug!(path = %path.display(), bytes = payload.len(), "wrote payload");
    Ok(())
}

/// Opens a calendar link in the default browser.
pub fn open_url(url: &str) -> ClientResult<()> {
    info!(url = %url, "opening calendar link");
    open::that(url).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))
}

/// Opens a written `.ics` file with the default calendar application.
pub fn open_file(path: &Path) -> ClientResult<()> {
    info!(path = %path.display(), "opening calendar file");
    open::that(path).map_err(|e| {
        ClientError::Action(format!("failed to open {}: {}", path.display(), e))
    })
}
