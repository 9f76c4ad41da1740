//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `focusflow_core` linkage.
//! - Exercise one create/project cycle against a throwaway board.

use focusflow_core::db::open_db_in_memory;
use focusflow_core::{BoardQuery, BoardService, SqliteBoardRepository, TaskDraft};

fn main() {
    println!("focusflow_core version={}", focusflow_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory board: {err}");
            std::process::exit(1);
        }
    };

    let result = SqliteBoardRepository::try_new(&conn)
        .map_err(Into::into)
        .and_then(|repo| {
            let mut board = BoardService::open(repo)?;
            board.create(TaskDraft {
                title: "smoke check".to_string(),
                ..TaskDraft::default()
            })?;
            Ok::<_, focusflow_core::BoardError>(board.view(&BoardQuery::all()).counts())
        });

    match result {
        Ok(counts) => println!(
            "board probe today={} week={} done={}",
            counts.today, counts.week, counts.done
        ),
        Err(err) => {
            eprintln!("board probe failed: {err}");
            std::process::exit(1);
        }
    }
}
