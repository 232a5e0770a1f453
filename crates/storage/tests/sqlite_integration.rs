use std::collections::HashSet;

use quiz_core::model::{FlagId, FlagRecord};
use storage::repository::FlagRepository;
use storage::sqlite::SqliteRepository;

fn flag(id: u64, name: &str) -> FlagRecord {
    FlagRecord::new(FlagId::new(id), name, format!("flag_{id}")).unwrap()
}

async fn seeded_repo(url: &str, count: u64) -> SqliteRepository {
    let repo = SqliteRepository::connect(url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    for id in 1..=count {
        repo.upsert_flag(&flag(id, &format!("Country {id}")))
            .await
            .expect("upsert");
    }
    repo
}

#[tokio::test]
async fn roundtrips_flag_records() {
    let repo = seeded_repo("sqlite:file:memdb_roundtrip?mode=memory&cache=shared", 0).await;

    repo.upsert_flag(&flag(7, "Turkey")).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    let fetched = repo.random_questions(1).await.unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id(), FlagId::new(7));
    assert_eq!(fetched[0].name(), "Turkey");
    assert_eq!(fetched[0].image_ref(), "flag_7");
}

#[tokio::test]
async fn upsert_replaces_existing_row() {
    let repo = seeded_repo("sqlite:file:memdb_upsert?mode=memory&cache=shared", 0).await;

    repo.upsert_flag(&flag(1, "Old Name")).await.unwrap();
    repo.upsert_flag(&flag(1, "New Name")).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
    let fetched = repo.random_questions(1).await.unwrap();
    assert_eq!(fetched[0].name(), "New Name");
}

#[tokio::test]
async fn random_questions_never_duplicates_ids() {
    let repo = seeded_repo("sqlite:file:memdb_unique?mode=memory&cache=shared", 10).await;

    for _ in 0..10 {
        let picked = repo.random_questions(10).await.unwrap();
        assert_eq!(picked.len(), 10);
        let ids: HashSet<FlagId> = picked.iter().map(FlagRecord::id).collect();
        assert_eq!(ids.len(), 10);
    }
}

#[tokio::test]
async fn limit_above_row_count_returns_all_rows() {
    let repo = seeded_repo("sqlite:file:memdb_small?mode=memory&cache=shared", 3).await;

    let picked = repo.random_questions(10).await.unwrap();
    assert_eq!(picked.len(), 3);
}

#[tokio::test]
async fn empty_table_yields_empty_result() {
    let repo = seeded_repo("sqlite:file:memdb_empty?mode=memory&cache=shared", 0).await;

    assert!(repo.random_questions(10).await.unwrap().is_empty());
    assert!(
        repo.random_distractors(FlagId::new(1), 3)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn distractors_exclude_the_given_id() {
    let repo = seeded_repo("sqlite:file:memdb_excl?mode=memory&cache=shared", 10).await;

    for id in 1..=10 {
        let exclude = FlagId::new(id);
        let picked = repo.random_distractors(exclude, 3).await.unwrap();
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|f| f.id() != exclude));

        let ids: HashSet<FlagId> = picked.iter().map(FlagRecord::id).collect();
        assert_eq!(ids.len(), 3);
    }
}

#[tokio::test]
async fn single_row_table_has_no_distractors() {
    let repo = seeded_repo("sqlite:file:memdb_single?mode=memory&cache=shared", 1).await;

    let picked = repo.random_distractors(FlagId::new(1), 3).await.unwrap();
    assert!(picked.is_empty());
}
