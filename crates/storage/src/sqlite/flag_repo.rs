use quiz_core::model::{FlagId, FlagRecord};
use std::collections::HashMap;

use super::{SqliteRepository, mapping::map_flag_row};
use crate::repository::{FlagRepository, StorageError, sample_uniform};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn flag_id_i64(id: FlagId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("flag_id overflow".into()))
}

impl SqliteRepository {
    /// Fetch the rows for the given ids, preserving the input order.
    ///
    /// Ids with no remaining row are skipped; the table is read-only at
    /// runtime so this only happens when a seeded test database changes
    /// underneath us.
    async fn fetch_by_ids(&self, ids: &[i64]) -> Result<Vec<FlagRecord>, StorageError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut sql = String::from("SELECT id, name, image_ref FROM flags WHERE id IN (");
        for i in 0..ids.len() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push('?');
            sql.push_str(&(i + 1).to_string());
        }
        sql.push(')');

        let mut q = sqlx::query(&sql);
        for id in ids {
            q = q.bind(*id);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(conn)?;

        let mut by_id: HashMap<i64, FlagRecord> = HashMap::with_capacity(rows.len());
        for row in rows {
            let flag = map_flag_row(&row)?;
            let key = flag_id_i64(flag.id())?;
            by_id.insert(key, flag);
        }

        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            match by_id.remove(id) {
                Some(flag) => out.push(flag),
                None => log::warn!("flag id {id} disappeared between sampling and fetch"),
            }
        }

        Ok(out)
    }
}

#[async_trait::async_trait]
impl FlagRepository for SqliteRepository {
    async fn random_questions(&self, limit: u32) -> Result<Vec<FlagRecord>, StorageError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let candidates: Vec<i64> = sqlx::query_scalar("SELECT id FROM flags")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        if candidates.is_empty() {
            log::debug!("random_questions: flag table is empty");
            return Ok(Vec::new());
        }

        let picked = sample_uniform(candidates, limit as usize);
        self.fetch_by_ids(&picked).await
    }

    async fn random_distractors(
        &self,
        exclude: FlagId,
        limit: u32,
    ) -> Result<Vec<FlagRecord>, StorageError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let candidates: Vec<i64> = sqlx::query_scalar("SELECT id FROM flags WHERE id != ?1")
            .bind(flag_id_i64(exclude)?)
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        if candidates.is_empty() {
            log::debug!("random_distractors: no candidates besides {exclude}");
            return Ok(Vec::new());
        }

        let picked = sample_uniform(candidates, limit as usize);
        self.fetch_by_ids(&picked).await
    }

    async fn upsert_flag(&self, flag: &FlagRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO flags (id, name, image_ref)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                image_ref = excluded.image_ref
            ",
        )
        .bind(flag_id_i64(flag.id())?)
        .bind(flag.name())
        .bind(flag.image_ref())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flags")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        u64::try_from(total).map_err(|_| StorageError::Serialization("negative count".into()))
    }
}
