//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `todo_core` end to end against a real database.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `todo_cli [db_path] [log_dir]`. Without `db_path` an in-memory
//! database is used; without `log_dir` logging stays off.

use log::info;
use std::error::Error;
use std::process::ExitCode;
use todo_core::{
    default_log_level, init_logging, open_db, open_db_in_memory, NewUser,
    SqliteTodoListRepository, SqliteUserRepository, TodoList, TodoListService, UpdateListInput,
    UserRepository,
};

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let db_path = args.next();
    let log_dir = args.next();

    match run(db_path.as_deref(), log_dir.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("todo_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<&str>, log_dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = log_dir {
        init_logging(default_log_level(), log_dir)?;
    }
    println!("todo_core version={}", todo_core::core_version());

    let conn = match db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let username = format!("smoke-{}", std::process::id());
    let user = SqliteUserRepository::new(&conn).create_user(&NewUser::new(
        "Smoke",
        username.as_str(),
        "not-a-real-hash",
    ))?;
    let lists = TodoListService::new(SqliteTodoListRepository::new(&conn));

    let id = lists.create(user, &TodoList::new("A", "d"))?;
    println!("created list_id={id} owned={}", lists.get_all(user)?.len());

    lists.update(user, id, &UpdateListInput::title("B"))?;
    let updated = lists.get_by_id(user, id)?;
    println!(
        "updated title={} description={}",
        updated.title, updated.description
    );

    let first = lists.delete(user, id)?;
    let second = lists.delete(user, id)?;
    println!(
        "deleted affected={first} repeat_affected={second} remaining={}",
        lists.get_all(user)?.len()
    );

    info!("event=cli_smoke module=cli status=ok user_id={user}");
    Ok(())
}
