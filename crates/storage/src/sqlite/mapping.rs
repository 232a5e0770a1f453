use quiz_core::model::{FlagId, FlagRecord};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Map a `flags` row (`id`, `name`, `image_ref`) into a domain record.
pub(super) fn map_flag_row(row: &SqliteRow) -> Result<FlagRecord, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let name: String = row.try_get("name").map_err(ser)?;
    let image_ref: String = row.try_get("image_ref").map_err(ser)?;

    let id = u64::try_from(id).map_err(|_| ser("negative flag id"))?;
    FlagRecord::from_persisted(FlagId::new(id), name, image_ref).map_err(ser)
}
