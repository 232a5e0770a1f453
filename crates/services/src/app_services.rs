use std::sync::Arc;

use storage::provision::Provisioner;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::session::QuizService;

/// Assembles app-facing services over a flag store.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    quiz: QuizService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, running migrations.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, clock))
    }

    /// Provision the bundled database asset, then open it read-only.
    ///
    /// The provisioning copy is blocking and completes before the store is
    /// touched; run the whole initialization off the foreground thread.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Provision` if the asset cannot be copied
    /// and `AppServicesError::Sqlite` if the copied database cannot be
    /// opened.
    pub async fn provisioned(
        provisioner: &Provisioner,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        provisioner.ensure_ready()?;
        let storage = Storage::sqlite_readonly(&provisioner.database_url()).await?;
        Ok(Self::from_storage(storage, clock))
    }

    /// Build services over an empty in-memory store, for tests.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(Storage::in_memory(), clock)
    }

    fn from_storage(storage: Storage, clock: Clock) -> Self {
        let quiz = QuizService::new(clock, Arc::clone(&storage.flags));
        Self { storage, quiz }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizService {
        &self.quiz
    }

    /// Replace the quiz service, e.g. to install a completion callback or
    /// non-default question counts.
    pub fn set_quiz(&mut self, quiz: QuizService) {
        self.quiz = quiz;
    }
}
