use todo_core::db::open_db_in_memory;
use todo_core::{
    Entity, NewUser, ServiceError, SqliteTodoItemRepository, SqliteTodoListRepository,
    SqliteUserRepository, TodoItem, TodoItemService, TodoList, TodoListService, UpdateItemInput,
    UpdateListInput, UserRepository, ValidationError,
};

#[test]
fn create_update_delete_scenario() {
    let conn = open_db_in_memory().unwrap();
    let user = SqliteUserRepository::new(&conn)
        .create_user(&NewUser::new("Alice", "alice", "hash"))
        .unwrap();
    let service = TodoListService::new(SqliteTodoListRepository::new(&conn));

    let id = service.create(user, &TodoList::new("A", "d")).unwrap();
    assert_eq!(
        service.get_all(user).unwrap(),
        vec![TodoList {
            id,
            title: "A".into(),
            description: "d".into(),
        }]
    );

    service.update(user, id, &UpdateListInput::title("B")).unwrap();
    let updated = service.get_by_id(user, id).unwrap();
    assert_eq!(updated.title, "B");
    assert_eq!(updated.description, "d");

    assert_eq!(service.delete(user, id).unwrap(), 1);
    assert!(service.get_all(user).unwrap().is_empty());
    assert!(matches!(
        service.get_by_id(user, id),
        Err(ServiceError::NotFound(Entity::List, _))
    ));
}

#[test]
fn empty_patch_is_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let user = SqliteUserRepository::new(&conn)
        .create_user(&NewUser::new("Alice", "alice", "hash"))
        .unwrap();
    let service = TodoListService::new(SqliteTodoListRepository::new(&conn));
    let id = service.create(user, &TodoList::new("A", "d")).unwrap();

    let patch: UpdateListInput = serde_json::from_str("{}").unwrap();
    let err = service.update(user, id, &patch).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NothingToUpdate)
    ));
    assert_eq!(err.code(), "validation_failed");
}

#[test]
fn json_patch_with_absent_fields_leaves_them_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let user = SqliteUserRepository::new(&conn)
        .create_user(&NewUser::new("Alice", "alice", "hash"))
        .unwrap();
    let lists = TodoListService::new(SqliteTodoListRepository::new(&conn));
    let items = TodoItemService::new(SqliteTodoItemRepository::new(&conn));
    let list = lists.create(user, &TodoList::new("A", "d")).unwrap();
    let item = items.create(user, list, &TodoItem::new("milk", "2l")).unwrap();

    let patch: UpdateListInput = serde_json::from_str(r#"{"description": "e"}"#).unwrap();
    lists.update(user, list, &patch).unwrap();
    assert_eq!(lists.get_by_id(user, list).unwrap().title, "A");

    let item_patch: UpdateItemInput = serde_json::from_str(r#"{"done": true}"#).unwrap();
    items.update(user, item, &item_patch).unwrap();
    let loaded = items.get_by_id(user, item).unwrap();
    assert!(loaded.done);
    assert_eq!(loaded.title, "milk");
}

#[test]
fn blank_title_patch_is_rejected_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let user = SqliteUserRepository::new(&conn)
        .create_user(&NewUser::new("Alice", "alice", "hash"))
        .unwrap();
    let items = TodoItemService::new(SqliteTodoItemRepository::new(&conn));

    let patch = UpdateItemInput {
        title: Some("  ".into()),
        ..UpdateItemInput::default()
    };
    let err = items.update(user, 1, &patch).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::EmptyTitle)));
}

#[test]
fn user_password_hash_is_not_serialized() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::new(&conn);
    let id = users
        .create_user(&NewUser::new("Alice", "alice", "secret-hash"))
        .unwrap();

    let json = serde_json::to_string(&users.get_user(id).unwrap()).unwrap();
    assert!(json.contains("\"username\":\"alice\""));
    assert!(!json.contains("secret-hash"));
}
