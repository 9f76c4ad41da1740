use focusflow_core::db::{open_db, open_db_in_memory};
use focusflow_core::{
    BoardError, BoardService, Column, Priority, RepoError, SqliteBoardRepository, Task, TaskDraft,
    TaskPatch,
};
use rusqlite::Connection;
use uuid::Uuid;

fn board(conn: &Connection) -> BoardService<SqliteBoardRepository<'_>> {
    let repo = SqliteBoardRepository::try_new(conn).unwrap();
    BoardService::open(repo).unwrap()
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        ..TaskDraft::default()
    }
}

#[test]
fn create_adds_exactly_one_record_with_matching_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);

    let created = board
        .create(TaskDraft {
            title: "Pay rent".to_string(),
            category: "bills".to_string(),
            priority: Priority::High,
            ..TaskDraft::default()
        })
        .unwrap();

    let snapshot = board.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0], created);
    assert_eq!(snapshot[0].title, "Pay rent");
    assert_eq!(snapshot[0].category, "bills");
    assert_eq!(snapshot[0].priority, Priority::High);
    assert_eq!(snapshot[0].column, Column::Today);
}

#[test]
fn create_assigns_unique_ids_and_prepends() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);

    let first = board.create(draft("first")).unwrap();
    let second = board.create(draft("second")).unwrap();

    assert_ne!(first.id, second.id);
    let snapshot = board.snapshot();
    assert_eq!(snapshot[0].id, second.id, "newest task comes first");
    assert_eq!(snapshot[1].id, first.id);
}

#[test]
fn create_with_whitespace_title_leaves_collection_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    board.create(draft("existing")).unwrap();

    let err = board.create(draft("   \t ")).unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));
    assert_eq!(board.len(), 1);
}

#[test]
fn update_merges_fields_and_preserves_title_on_blank_input() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    let task = board.create(draft("keep me")).unwrap();

    board
        .update(
            task.id,
            TaskPatch {
                title: Some("".to_string()),
                desc: Some("new details".to_string()),
                due: Some(Some("2026-09-12".to_string())),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    let snapshot = board.snapshot();
    assert_eq!(snapshot[0].title, "keep me");
    assert_eq!(snapshot[0].desc, "new details");
    assert_eq!(snapshot[0].due.as_deref(), Some("2026-09-12"));
}

#[test]
fn update_unknown_id_signals_not_found_without_state_change() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    board.create(draft("only")).unwrap();
    let before = board.snapshot();

    let missing = Uuid::new_v4();
    let err = board
        .update(
            missing,
            TaskPatch {
                desc: Some("never lands".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, BoardError::NotFound(id) if id == missing));
    assert_eq!(board.snapshot(), before);
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    let task = board.create(draft("short-lived")).unwrap();

    assert!(board.delete(task.id).unwrap());
    assert!(!board.delete(task.id).unwrap());
    assert!(board.is_empty());
}

#[test]
fn move_to_relocates_and_ignores_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    let task = board.create(draft("movable")).unwrap();

    assert!(board.move_to(task.id, Column::Done).unwrap());
    assert_eq!(board.snapshot()[0].column, Column::Done);

    assert!(!board.move_to(Uuid::new_v4(), Column::Week).unwrap());
    assert_eq!(board.snapshot()[0].column, Column::Done);
}

#[test]
fn advance_cycles_columns_without_changing_id() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    let task = board.create(draft("cycling")).unwrap();

    assert_eq!(board.advance(task.id).unwrap(), Some(Column::Week));
    assert_eq!(board.advance(task.id).unwrap(), Some(Column::Done));
    assert_eq!(board.advance(task.id).unwrap(), Some(Column::Today));

    let snapshot = board.snapshot();
    assert_eq!(snapshot[0].id, task.id);
    assert_eq!(snapshot[0].column, Column::Today);

    assert_eq!(board.advance(Uuid::new_v4()).unwrap(), None);
}

#[test]
fn clear_all_wipes_the_board() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    board.create(draft("a")).unwrap();
    board.create(draft("b")).unwrap();

    board.clear_all().unwrap();
    assert!(board.is_empty());
}

#[test]
fn snapshot_is_an_independent_copy() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    board.create(draft("original")).unwrap();

    let mut snapshot = board.snapshot();
    snapshot[0].title = "mutated copy".to_string();
    snapshot.clear();

    assert_eq!(board.snapshot()[0].title, "original");
}

#[test]
fn replace_all_swaps_the_whole_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut board = board(&conn);
    board.create(draft("old")).unwrap();

    let replacement: Vec<Task> = vec![
        Task::new(draft("new one")).unwrap(),
        Task::new(draft("new two")).unwrap(),
    ];
    board.replace_all(replacement.clone()).unwrap();

    assert_eq!(board.snapshot(), replacement);
}

#[test]
fn mutations_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    let task_id;
    {
        let conn = open_db(&path).unwrap();
        let mut board = board(&conn);
        let task = board
            .create(TaskDraft {
                title: "survives restart".to_string(),
                priority: Priority::Medium,
                ..TaskDraft::default()
            })
            .unwrap();
        board.move_to(task.id, Column::Week).unwrap();
        task_id = task.id;
    }

    let conn = open_db(&path).unwrap();
    let board = board(&conn);
    let snapshot = board.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, task_id);
    assert_eq!(snapshot[0].title, "survives restart");
    assert_eq!(snapshot[0].priority, Priority::Medium);
    assert_eq!(snapshot[0].column, Column::Week);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteBoardRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        focusflow_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteBoardRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("slots"))));
}

#[test]
fn corrupt_slot_surfaces_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO slots (name, value) VALUES ('tasks', 'not json');",
        [],
    )
    .unwrap();

    let repo = SqliteBoardRepository::try_new(&conn).unwrap();
    let err = BoardService::open(repo).unwrap_err();
    assert!(matches!(err, BoardError::Repo(RepoError::InvalidData(_))));
}
