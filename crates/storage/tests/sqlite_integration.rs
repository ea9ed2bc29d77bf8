use quiz_core::model::{Attempt, HistoryId, HistoryRecord, NO_ANSWER};
use quiz_core::time::fixed_now;
use storage::repository::{HistoryRepository, Storage, StorageError};
use storage::sqlite::SqliteRepository;

/// Each test gets its own named shared-cache database so they can run in parallel.
async fn shared_memory_repo(name: &str) -> SqliteRepository {
    SqliteRepository::connect(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("connect")
}

fn sample_record(score: u32) -> HistoryRecord {
    HistoryRecord::new(
        fixed_now(),
        score,
        10,
        vec![
            Attempt::new(0, "Which planet is closest to the Sun?", "Venus", false, 1),
            Attempt::new(0, "Which planet is closest to the Sun?", "Mercury", true, 2),
            Attempt::timed_out(1, "Which data structure is FIFO?"),
            Attempt::new(5, "What is the value of 12 + 28?", " 40 ", true, 1),
        ],
    )
}

#[tokio::test]
async fn sqlite_round_trips_history_with_attempt_order() {
    let repo = shared_memory_repo("memdb_history_roundtrip").await;
    repo.migrate().await.expect("migrate");

    let record = sample_record(2);
    let id = repo.append_history(&record).await.expect("append");
    assert_eq!(id, HistoryId::new(1));

    let fetched = repo.get_history(id).await.expect("fetch");
    assert_eq!(fetched, record);
    assert_eq!(fetched.attempts[2].selected_answer, NO_ANSWER);
    assert_eq!(fetched.attempts[3].selected_answer, " 40 ");
}

#[tokio::test]
async fn sqlite_ids_auto_increment_and_list_newest_first() {
    let repo = shared_memory_repo("memdb_history_list").await;
    repo.migrate().await.expect("migrate");
    // Migrations are idempotent.
    repo.migrate().await.expect("migrate twice");

    let first = repo.append_history(&sample_record(1)).await.unwrap();
    let second = repo.append_history(&sample_record(3)).await.unwrap();
    assert!(second > first);

    let rows = repo.list_history(10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, second);
    assert_eq!(rows[0].record.score, 3);
    assert_eq!(rows[1].id, first);
    assert_eq!(rows[1].record.attempts.len(), 4);

    let limited = repo.list_history(1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn sqlite_missing_history_is_not_found() {
    let storage = Storage::sqlite("sqlite:file:memdb_history_missing?mode=memory&cache=shared")
        .await
        .expect("storage");
    let err = storage
        .history
        .get_history(HistoryId::new(42))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_rejects_score_above_total() {
    let repo = shared_memory_repo("memdb_history_check").await;
    repo.migrate().await.expect("migrate");

    let bad = HistoryRecord::new(fixed_now(), 11, 10, Vec::new());
    let err = repo.append_history(&bad).await.unwrap_err();
    assert!(matches!(err, StorageError::Connection(_)));
    assert!(repo.list_history(10).await.unwrap().is_empty());
}
