use rusqlite::Connection;
use todo_core::db::open_db_in_memory;
use todo_core::{
    Entity, NewUser, RepoError, SqliteTodoListRepository, SqliteUserRepository, TodoList,
    TodoListRepository, UpdateListInput, UserId, UserRepository, ValidationError,
};

fn seed_user(conn: &Connection, username: &str) -> UserId {
    SqliteUserRepository::new(conn)
        .create_user(&NewUser::new(username, username, "hash"))
        .unwrap()
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "alice");
    let repo = SqliteTodoListRepository::new(&conn);

    let id = repo.create(user, &TodoList::new("A", "d")).unwrap();

    let loaded = repo.get_by_id(user, id).unwrap();
    assert_eq!(
        loaded,
        TodoList {
            id,
            title: "A".into(),
            description: "d".into(),
        }
    );
    assert_eq!(count_rows(&conn, "users_lists"), 1);
}

#[test]
fn create_rolls_back_list_when_ownership_insert_fails() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoListRepository::new(&conn);

    // No user 77: the ownership insert hits the foreign key after the list
    // row was already written inside the transaction.
    let err = repo.create(77, &TodoList::new("orphan", "")).unwrap_err();

    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(count_rows(&conn, "todo_lists"), 0);
    assert_eq!(count_rows(&conn, "users_lists"), 0);
    assert!(conn.is_autocommit());
}

#[test]
fn create_rolls_back_when_ownership_insert_is_aborted_by_trigger() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "alice");
    conn.execute_batch(
        "CREATE TEMP TRIGGER fail_ownership BEFORE INSERT ON users_lists
         BEGIN
            SELECT RAISE(ABORT, 'injected failure');
         END;",
    )
    .unwrap();
    let repo = SqliteTodoListRepository::new(&conn);

    let err = repo.create(user, &TodoList::new("A", "d")).unwrap_err();

    assert!(err.to_string().contains("injected failure"));
    assert_eq!(count_rows(&conn, "todo_lists"), 0);
    assert_eq!(count_rows(&conn, "users_lists"), 0);
}

#[test]
fn create_reports_storage_error_when_sqlite_rolls_back_itself() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "alice");
    conn.execute_batch(
        "CREATE TEMP TRIGGER rollback_ownership BEFORE INSERT ON users_lists
         BEGIN
            SELECT RAISE(ROLLBACK, 'ownership rolled back');
         END;",
    )
    .unwrap();
    let repo = SqliteTodoListRepository::new(&conn);

    let err = repo.create(user, &TodoList::new("A", "d")).unwrap_err();

    assert!(matches!(err, RepoError::Db(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("ownership rolled back"));
    assert_eq!(count_rows(&conn, "todo_lists"), 0);
    assert_eq!(count_rows(&conn, "users_lists"), 0);
    assert!(conn.is_autocommit());
}

#[test]
fn create_rejects_blank_title_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "alice");
    let repo = SqliteTodoListRepository::new(&conn);

    let err = repo.create(user, &TodoList::new(" ", "d")).unwrap_err();

    assert!(matches!(err, RepoError::Validation(ValidationError::EmptyTitle)));
    assert_eq!(count_rows(&conn, "todo_lists"), 0);
}

#[test]
fn other_users_cannot_see_lists() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let repo = SqliteTodoListRepository::new(&conn);

    let id = repo.create(alice, &TodoList::new("private", "")).unwrap();
    let bob_list = repo.create(bob, &TodoList::new("bob's", "")).unwrap();

    let err = repo.get_by_id(bob, id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(Entity::List, found) if found == id));
    let missing = repo.get_by_id(bob, 9_999).unwrap_err();
    assert!(matches!(missing, RepoError::NotFound(Entity::List, 9_999)));

    let bob_lists = repo.get_all(bob).unwrap();
    assert_eq!(bob_lists.len(), 1);
    assert_eq!(bob_lists[0].id, bob_list);
}

#[test]
fn get_all_is_empty_for_user_without_lists() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "alice");
    let repo = SqliteTodoListRepository::new(&conn);

    assert!(repo.get_all(user).unwrap().is_empty());
}

#[test]
fn get_all_orders_by_id() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "alice");
    let repo = SqliteTodoListRepository::new(&conn);

    let first = repo.create(user, &TodoList::new("one", "")).unwrap();
    let second = repo.create(user, &TodoList::new("two", "")).unwrap();

    let ids: Vec<_> = repo.get_all(user).unwrap().into_iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn partial_update_touches_only_provided_fields() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "alice");
    let repo = SqliteTodoListRepository::new(&conn);
    let id = repo.create(user, &TodoList::new("A", "d")).unwrap();

    repo.update(user, id, &UpdateListInput::title("B")).unwrap();
    let after_title = repo.get_by_id(user, id).unwrap();
    assert_eq!((after_title.title.as_str(), after_title.description.as_str()), ("B", "d"));

    repo.update(user, id, &UpdateListInput::description("e")).unwrap();
    let after_description = repo.get_by_id(user, id).unwrap();
    assert_eq!(
        (after_description.title.as_str(), after_description.description.as_str()),
        ("B", "e")
    );

    let both = UpdateListInput {
        title: Some("C".into()),
        description: Some("f".into()),
    };
    repo.update(user, id, &both).unwrap();
    let after_both = repo.get_by_id(user, id).unwrap();
    assert_eq!((after_both.title.as_str(), after_both.description.as_str()), ("C", "f"));
}

#[test]
fn empty_update_is_rejected_by_repository() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "alice");
    let repo = SqliteTodoListRepository::new(&conn);
    let id = repo.create(user, &TodoList::new("A", "d")).unwrap();

    let err = repo.update(user, id, &UpdateListInput::default()).unwrap_err();
    assert!(matches!(err, RepoError::EmptyUpdate));
}

#[test]
fn update_of_foreign_list_is_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let repo = SqliteTodoListRepository::new(&conn);
    let id = repo.create(alice, &TodoList::new("A", "d")).unwrap();

    let err = repo.update(bob, id, &UpdateListInput::title("hijacked")).unwrap_err();

    assert!(matches!(err, RepoError::NotFound(Entity::List, _)));
    assert_eq!(repo.get_by_id(alice, id).unwrap().title, "A");
}

#[test]
fn delete_is_scoped_and_reports_affected_rows() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let repo = SqliteTodoListRepository::new(&conn);
    let id = repo.create(alice, &TodoList::new("A", "d")).unwrap();

    assert_eq!(repo.delete(bob, id).unwrap(), 0);
    assert!(repo.get_by_id(alice, id).is_ok());

    assert_eq!(repo.delete(alice, id).unwrap(), 1);
    assert_eq!(repo.delete(alice, id).unwrap(), 0);
    assert_eq!(count_rows(&conn, "users_lists"), 0);
}

#[test]
fn shared_list_is_visible_to_every_owner() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let carol = seed_user(&conn, "carol");
    let repo = SqliteTodoListRepository::new(&conn);
    let id = repo.create(alice, &TodoList::new("groceries", "")).unwrap();

    let err = repo.add_owner(bob, id, carol).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(Entity::List, _)));

    repo.add_owner(alice, id, bob).unwrap();
    repo.add_owner(alice, id, bob).unwrap();
    assert_eq!(repo.get_by_id(bob, id).unwrap().title, "groceries");
    assert_eq!(count_rows(&conn, "users_lists"), 2);

    let err = repo.add_owner(alice, id, 404).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(Entity::User, 404)));
}
