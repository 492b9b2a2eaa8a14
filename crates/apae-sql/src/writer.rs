//! Script file output.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, SqlError};

/// Writes the script with an atomic replace (temp file + rename), so a
/// failed run never leaves a half-written script behind. The temp file is
/// removed when any step fails.
pub fn write_script(contents: &str, path: &Path) -> Result<()> {
    let temp_path = path.with_extension("sql.tmp");

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SqlError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let outcome = write_temp(contents, &temp_path).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| SqlError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })
    });
    if let Err(error) = outcome {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            debug!(path = %temp_path.display(), error = %cleanup, "temp file not removed");
        }
        return Err(error);
    }

    info!(path = %path.display(), bytes = contents.len(), "wrote SQL script");
    Ok(())
}

fn write_temp(contents: &str, temp_path: &Path) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| SqlError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(contents.as_bytes()).map_err(|e| SqlError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.sync_all().map_err(|e| SqlError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })
}
