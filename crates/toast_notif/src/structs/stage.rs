use std::{
  fs::{self, OpenOptions},
  io::{self, Write},
  path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::ToastError;

/// Without the BOM Windows PowerShell reads the script in the ANSI code page
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Writes `script` to a new uniquely named `.ps1` file in the temp dir.
///
/// The caller removes the file once it is done with it.
pub fn stage(script: &str) -> Result<PathBuf, ToastError> {
  stage_in(&std::env::temp_dir(), script)
}

/// Same as [`stage`] but inside `dir`
pub fn stage_in(dir: &Path, script: &str) -> Result<PathBuf, ToastError> {
  let path = dir.join(format!("{}.ps1", Uuid::new_v4()));

  write_owner_only(&path, script).map_err(|source| ToastError::Stage {
    path: path.clone(),
    source,
  })?;

  tracing::trace!(target: "toast::stage", path = %path.display(), bytes = script.len(), "Staged script");

  Ok(path)
}

fn write_owner_only(path: &Path, script: &str) -> io::Result<()> {
  let mut options = OpenOptions::new();
  options.write(true).create_new(true);

  // The per-user temp dir already restricts access on Windows
  #[cfg(unix)]
  {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600);
  }

  let mut file = options.open(path)?;
  let written = file
    .write_all(&UTF8_BOM)
    .and_then(|_| file.write_all(script.as_bytes()))
    .and_then(|_| file.flush());

  if written.is_err() {
    drop(file);
    let _ = fs::remove_file(path);
  }

  written
}
