use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{PersistenceError, WorldRecord};

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes the record, replacing any previous file at `path`.
pub fn save(path: &Path, rec: &WorldRecord) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let bytes = bincode::serialize(rec)?;
    let staging = staging_path(path);
    fs::write(&staging, &bytes).map_err(io_err(&staging))?;
    fs::rename(&staging, path).map_err(io_err(path))?;
    log::info!("saved world to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Reads the record at `path`. A missing file is `Ok(None)`.
pub fn load(path: &Path) -> Result<Option<WorldRecord>, PersistenceError> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("no save record at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(io_err(path)(e)),
    };
    let rec: WorldRecord = bincode::deserialize(&bytes)?;
    Ok(Some(rec))
}
