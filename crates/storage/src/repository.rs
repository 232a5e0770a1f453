use async_trait::async_trait;
use quiz_core::model::{FlagId, FlagRecord};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the flag table.
///
/// The table is read-only at runtime; `upsert_flag` exists for the seeding
/// process and for tests.
#[async_trait]
pub trait FlagRepository: Send + Sync {
    /// Fetch up to `limit` records chosen uniformly at random without
    /// replacement. Returns fewer than `limit` (possibly none) when the
    /// store holds fewer records; never returns a duplicate id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unreachable.
    async fn random_questions(&self, limit: u32) -> Result<Vec<FlagRecord>, StorageError>;

    /// Same sampling as [`random_questions`](Self::random_questions), but the
    /// result never contains the record whose id equals `exclude`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unreachable.
    async fn random_distractors(
        &self,
        exclude: FlagId,
        limit: u32,
    ) -> Result<Vec<FlagRecord>, StorageError>;

    /// Persist or update a flag record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_flag(&self, flag: &FlagRecord) -> Result<(), StorageError>;

    /// Number of records in the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unreachable.
    async fn count(&self) -> Result<u64, StorageError>;
}

/// Uniform sample without replacement: shuffle, then keep the prefix.
///
/// Replaces the original `ORDER BY RANDOM() LIMIT n` with an in-process
/// shuffle so the sampling is testable independent of the storage engine.
pub(crate) fn sample_uniform<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    let mut rng = rand::rng();
    items.as_mut_slice().shuffle(&mut rng);
    items.truncate(limit);
    items
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryFlagStore {
    flags: Arc<Mutex<HashMap<FlagId, FlagRecord>>>,
}

impl InMemoryFlagStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl FlagRepository for InMemoryFlagStore {
    async fn random_questions(&self, limit: u32) -> Result<Vec<FlagRecord>, StorageError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let candidates: Vec<FlagRecord> = guard.values().cloned().collect();
        Ok(sample_uniform(candidates, limit as usize))
    }

    async fn random_distractors(
        &self,
        exclude: FlagId,
        limit: u32,
    ) -> Result<Vec<FlagRecord>, StorageError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let candidates: Vec<FlagRecord> = guard
            .values()
            .filter(|f| f.id() != exclude)
            .cloned()
            .collect();
        Ok(sample_uniform(candidates, limit as usize))
    }

    async fn upsert_flag(&self, flag: &FlagRecord) -> Result<(), StorageError> {
        let mut guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(flag.id(), flag.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len() as u64)
    }
}

/// Aggregates the flag repository behind a trait object for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub flags: Arc<dyn FlagRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let flags: Arc<dyn FlagRepository> = Arc::new(InMemoryFlagStore::new());
        Self { flags }
    }
}
