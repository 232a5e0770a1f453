//! One-time database provisioning: copies the bundled, pre-populated database
//! asset into the application's writable storage so the `SQLite` backend can
//! open it. A no-op on every run after the first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// All provisioning failures (asset unreadable, destination not writable,
/// disk full) collapse into this single error: the data is unavailable and
/// the user re-initiates the flow from the entry screen.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProvisionError {
    #[error("quiz database unavailable: {0}")]
    Unavailable(#[from] io::Error),
}

/// Outcome of [`Provisioner::ensure_ready`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStatus {
    /// The asset was copied into place on this call.
    Copied,
    /// The database file already existed; nothing was done.
    AlreadyPresent,
}

/// Copies a bundled read-only database asset into writable storage.
///
/// The copy is blocking; callers must run it off the foreground thread (for
/// example via `spawn_blocking`) and must not touch the flag store until it
/// has returned.
#[derive(Debug, Clone)]
pub struct Provisioner {
    asset_path: PathBuf,
    data_path: PathBuf,
}

impl Provisioner {
    #[must_use]
    pub fn new(asset_path: impl Into<PathBuf>, data_path: impl Into<PathBuf>) -> Self {
        Self {
            asset_path: asset_path.into(),
            data_path: data_path.into(),
        }
    }

    /// Path the database is provisioned to.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// sqlx connection URL for the provisioned database, opened read-only.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=ro", self.data_path.display())
    }

    /// Ensure the database file exists, copying the bundled asset on first
    /// run. Subsequent calls are no-ops.
    ///
    /// A failed copy removes the partial destination file so a retry starts
    /// clean.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::Unavailable` for any I/O failure.
    pub fn ensure_ready(&self) -> Result<ProvisionStatus, ProvisionError> {
        if self.data_path.exists() {
            log::debug!("quiz database already present at {}", self.data_path.display());
            return Ok(ProvisionStatus::AlreadyPresent);
        }

        log::info!(
            "provisioning quiz database: {} -> {}",
            self.asset_path.display(),
            self.data_path.display()
        );

        if let Err(err) = self.copy_asset() {
            if fs::remove_file(&self.data_path).is_ok() {
                log::warn!(
                    "removed partial database copy at {}",
                    self.data_path.display()
                );
            }
            return Err(err.into());
        }

        Ok(ProvisionStatus::Copied)
    }

    fn copy_asset(&self) -> io::Result<()> {
        if let Some(parent) = self.data_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut input = fs::File::open(&self.asset_path)?;
        let mut output = fs::File::create(&self.data_path)?;
        io::copy(&mut input, &mut output)?;
        output.sync_all()?;
        Ok(())
    }
}
