use chrono::Duration;
use lms_core::model::{CourseId, QuizResultRecord, Session, UserId};
use lms_core::time::fixed_now;
use storage::repository::{LoginRepository, QuizResultRepository, Storage};
use storage::sqlite::SqliteRepository;

fn record(title: &str, marks: u32, minutes: i64) -> QuizResultRecord {
    QuizResultRecord {
        course_id: CourseId::new("course-1"),
        course_title: "Rust Basics".into(),
        sublesson_title: title.into(),
        marks,
        total_marks: 3,
        timestamp: fixed_now() + Duration::minutes(minutes),
    }
}

#[tokio::test]
async fn sqlite_login_roundtrip_and_overwrite() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_login?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_session().await.unwrap().is_none());

    let first = Session::new(UserId::new("u1"), "token-1");
    repo.save_session(&first).await.unwrap();
    let second = Session::new(UserId::new("u2"), "token-2");
    repo.save_session(&second).await.unwrap();

    let loaded = repo.load_session().await.unwrap().expect("login stored");
    assert_eq!(loaded, second);

    repo.clear_session().await.unwrap();
    assert!(repo.load_session().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_quiz_results_are_listed_newest_first() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_results?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.append_result(&record("Borrowing", 2, 0)).await.unwrap();
    repo.append_result(&record("Lifetimes", 3, 5)).await.unwrap();
    repo.append_result(&record("Traits", 1, 10)).await.unwrap();

    let results = repo.list_results(2).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].sublesson_title, "Traits");
    assert_eq!(results[1].sublesson_title, "Lifetimes");
    assert_eq!(results[1].marks, 3);
    assert_eq!(results[1].timestamp, fixed_now() + Duration::minutes(5));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn storage_sqlite_wires_both_repositories() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .login
        .save_session(&Session::new(UserId::new("u9"), "t"))
        .await
        .unwrap();
    storage
        .quiz_results
        .append_result(&record("Intro", 3, 0))
        .await
        .unwrap();
    assert!(storage.login.load_session().await.unwrap().is_some());
    assert_eq!(storage.quiz_results.list_results(10).await.unwrap().len(), 1);
}
