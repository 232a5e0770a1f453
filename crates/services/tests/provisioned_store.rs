//! Boot path: provision a bundled database file, open it read-only, and run
//! a quiz against it.

use std::fs;
use std::path::{Path, PathBuf};

use quiz_core::model::{FlagId, FlagRecord};
use quiz_core::time::fixed_clock;
use services::AppServices;
use storage::provision::{ProvisionStatus, Provisioner};
use storage::repository::{FlagRepository, Storage};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flagquiz-boot-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

async fn build_asset(path: &Path, count: u64) {
    let url = format!("sqlite:{}?mode=rwc", path.display());
    let storage = Storage::sqlite(&url).await.unwrap();
    for id in 1..=count {
        let flag = FlagRecord::new(FlagId::new(id), format!("Country {id}"), format!("flag_{id}"))
            .unwrap();
        storage.flags.upsert_flag(&flag).await.unwrap();
    }
}

#[tokio::test]
async fn provisioned_database_serves_a_full_quiz() {
    let dir = temp_dir("quiz");
    let asset = dir.join("bundled.db");
    build_asset(&asset, 10).await;

    let provisioner = Provisioner::new(&asset, dir.join("data").join("quiz.db"));
    let services = AppServices::provisioned(&provisioner, fixed_clock())
        .await
        .unwrap();
    let quiz = services.quiz();

    let mut session = quiz.start().await.unwrap();
    assert_eq!(session.total_questions(), 10);

    let options = quiz.current_options(&session).await.unwrap();
    assert_eq!(options.options().len(), 4);
    assert!(options.options().iter().all(|o| o.is_selectable()));

    while quiz.advance(&mut session).is_ok() {}
    assert_eq!(session.final_score().unwrap().resolved(), 10);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn second_boot_reuses_the_provisioned_file() {
    let dir = temp_dir("reuse");
    let asset = dir.join("bundled.db");
    build_asset(&asset, 3).await;

    let provisioner = Provisioner::new(&asset, dir.join("quiz.db"));
    assert_eq!(provisioner.ensure_ready().unwrap(), ProvisionStatus::Copied);

    // A later boot finds the file in place and starts without re-copying.
    let services = AppServices::provisioned(&provisioner, fixed_clock())
        .await
        .unwrap();
    let session = services.quiz().start().await.unwrap();
    assert_eq!(session.total_questions(), 3);

    let _ = fs::remove_dir_all(&dir);
}
