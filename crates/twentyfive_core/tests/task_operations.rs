use twentyfive_core::engine::tasks::TaskDestination;
use twentyfive_core::model::location::{TaskAddress, TaskTarget};
use twentyfive_core::{audit, BoardError, BoardState, Category, Task, TaskPatch, TaskState};

fn task(id: &str, size: u8) -> Task {
    Task::new(id, format!("Task {id}"), TaskState::Todo, size).unwrap()
}

fn category(id: &str, name: &str, sizes: &[(&str, u8)]) -> Category {
    let mut category = Category::new(id, name);
    category.tasks = sizes.iter().map(|(id, size)| task(id, *size)).collect();
    category
}

fn board() -> BoardState {
    BoardState {
        categories: vec![
            category("build", "Build", &[("b1", 2), ("b2", 2)]),
            category("plan", "Plan", &[("p1", 1)]),
        ],
        backburner: vec![task("bb1", 3)],
        archives: vec![task("ar1", 1)],
        ..BoardState::default()
    }
}

fn in_category(category_id: &str) -> TaskTarget {
    TaskTarget::Category {
        category_id: category_id.to_string(),
        position: None,
    }
}

#[test]
fn create_over_capacity_leaves_category_unchanged() {
    let mut board = board();
    let before = board.clone();

    let err = board
        .create_task(task("new", 2), &in_category("build"))
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::CapacityExceeded { load: 6, .. }
    ));
    assert_eq!(board, before);
}

#[test]
fn create_inserts_at_position_and_appends_out_of_range() {
    let mut board = board();
    board
        .create_task(
            task("first", 1),
            &TaskTarget::Category {
                category_id: "plan".to_string(),
                position: Some(0),
            },
        )
        .unwrap();
    board
        .create_task(task("last", 1), &TaskTarget::Backburner { position: Some(99) })
        .unwrap();

    assert_eq!(board.categories[1].task_ids(), vec!["first", "p1"]);
    assert_eq!(board.backburner.last().unwrap().id, "last");
}

#[test]
fn create_rejects_duplicate_id_anywhere() {
    let mut board = board();
    let err = board
        .create_task(task("ar1", 1), &in_category("plan"))
        .unwrap_err();
    assert!(matches!(err, BoardError::InvalidRequest(_)));
}

#[test]
fn create_in_unknown_category_fails() {
    let mut board = board();
    let err = board
        .create_task(task("x", 1), &in_category("missing"))
        .unwrap_err();
    assert_eq!(err, BoardError::CategoryNotFound("missing".to_string()));
}

#[test]
fn create_urgent_and_focused_takes_over_flags() {
    let mut board = board();
    board.categories[0].tasks[0].urgent = true;
    board.categories[1].tasks[0].focused = true;

    let mut hot = task("hot", 1);
    hot.urgent = true;
    hot.focused = true;
    board.create_task(hot, &in_category("build")).unwrap();

    let build = &board.categories[0];
    assert!(!build.tasks[0].urgent);
    assert!(build.tasks[2].urgent);
    assert_eq!(board.focused_task().map(|t| t.id.as_str()), Some("hot"));
    assert!(audit(&board).is_empty());
}

#[test]
fn create_in_backburner_drops_board_flags() {
    let mut board = board();
    let mut parked = task("parked", 5);
    parked.urgent = true;
    parked.focused = true;

    let created = board
        .create_task(parked, &TaskTarget::Backburner { position: None })
        .unwrap();
    assert!(!created.urgent);
    assert!(!created.focused);
}

#[test]
fn update_patches_only_given_fields() {
    let mut board = board();
    let patch = TaskPatch {
        notes: Some("remember the edge cases".to_string()),
        state: Some(TaskState::Doing),
        ..TaskPatch::default()
    };

    let updated = board.update_task("b1", &patch).unwrap();
    assert_eq!(updated.name, "Task b1");
    assert_eq!(updated.notes, "remember the edge cases");
    assert_eq!(updated.state, TaskState::Doing);
    assert_eq!(updated.size, 2);
}

#[test]
fn update_growing_past_capacity_is_rejected() {
    let mut board = board();
    let before = board.clone();
    let patch = TaskPatch {
        size: Some(4),
        name: Some("Renamed".to_string()),
        ..TaskPatch::default()
    };

    let err = board.update_task("b1", &patch).unwrap_err();
    assert!(matches!(err, BoardError::CapacityExceeded { load: 6, .. }));
    assert_eq!(board, before);
}

#[test]
fn update_rejects_invalid_size() {
    let mut board = board();
    let patch = TaskPatch {
        size: Some(0),
        ..TaskPatch::default()
    };
    assert_eq!(
        board.update_task("p1", &patch).unwrap_err(),
        BoardError::InvalidTaskSize(0)
    );
}

#[test]
fn update_urgent_clears_siblings_but_not_other_columns() {
    let mut board = board();
    board.categories[0].tasks[1].urgent = true;
    board.categories[1].tasks[0].urgent = true;

    let patch = TaskPatch {
        urgent: Some(true),
        ..TaskPatch::default()
    };
    board.update_task("b1", &patch).unwrap();

    assert!(board.categories[0].tasks[0].urgent);
    assert!(!board.categories[0].tasks[1].urgent);
    assert!(board.categories[1].tasks[0].urgent);
}

#[test]
fn non_urgent_patch_keeps_existing_urgent_task() {
    let mut board = board();
    board.categories[0].tasks[1].urgent = true;

    let patch = TaskPatch {
        name: Some("Plain".to_string()),
        ..TaskPatch::default()
    };
    board.update_task("b1", &patch).unwrap();
    assert!(board.categories[0].tasks[1].urgent);
}

#[test]
fn urgent_patch_on_parked_task_is_dropped() {
    let mut board = board();
    let patch = TaskPatch {
        urgent: Some(true),
        ..TaskPatch::default()
    };

    let updated = board
        .update_task("bb1", &patch)
        .expect("parked task should accept the patch");
    assert!(!updated.urgent);
    assert!(!board.backburner[0].urgent);

    board
        .update_task("ar1", &patch)
        .expect("archived task should accept the patch");
    assert!(!board.archives[0].urgent);
    assert!(audit(&board).is_empty());
}

#[test]
fn update_parked_task_ignores_capacity() {
    let mut board = board();
    let patch = TaskPatch {
        size: Some(5),
        ..TaskPatch::default()
    };
    assert_eq!(board.update_task("bb1", &patch).unwrap().size, 5);
}

#[test]
fn move_over_capacity_restores_exact_position() {
    let mut board = board();
    board.categories[1].tasks.push(task("p2", 2));
    let before = board.clone();

    let destination = TaskDestination::new(in_category("build"));
    let err = board.move_task("p2", &destination).unwrap_err();
    assert!(matches!(err, BoardError::CapacityExceeded { .. }));
    assert_eq!(board, before);
    assert_eq!(
        board.find_task("p2"),
        Some(TaskAddress::Category {
            category_index: 1,
            task_index: 1
        })
    );
}

#[test]
fn move_urgent_task_into_category_clears_sibling_urgent() {
    let mut board = board();
    board.categories[1].tasks[0].urgent = true;
    board.categories[0].tasks[1].urgent = true;

    let moved = board
        .move_task("b2", &TaskDestination::new(in_category("plan")))
        .expect("plan has room for b2");
    assert!(moved.urgent);

    let plan = &board.categories[1];
    assert_eq!(plan.task_ids(), vec!["p1", "b2"]);
    assert!(!plan.tasks[0].urgent);
    assert!(plan.tasks[1].urgent);
    assert!(audit(&board).is_empty());
}

#[test]
fn move_to_backburner_records_origin_category() {
    let mut board = board();
    board.categories[0].tasks[0].focused = true;
    board.categories[0].tasks[0].urgent = true;

    let moved = board
        .move_task(
            "b1",
            &TaskDestination::new(TaskTarget::Backburner { position: Some(0) }),
        )
        .unwrap();
    assert_eq!(moved.source_id.as_deref(), Some("build"));
    assert_eq!(moved.source.as_deref(), Some("Build"));
    assert!(!moved.focused);
    assert!(!moved.urgent);
    assert_eq!(board.backburner[0].id, "b1");
}

#[test]
fn explicit_provenance_wins_over_origin() {
    let mut board = board();
    let destination = TaskDestination {
        target: TaskTarget::Archive { position: None },
        source_id: Some("elsewhere".to_string()),
        source: Some("Elsewhere".to_string()),
    };
    let moved = board.move_task("b1", &destination).unwrap();
    assert_eq!(moved.source_id.as_deref(), Some("elsewhere"));
}

#[test]
fn move_back_onto_board_clears_provenance() {
    let mut board = board();
    board
        .move_task(
            "p1",
            &TaskDestination::new(TaskTarget::Archive { position: None }),
        )
        .unwrap();
    let restored = board
        .move_task("p1", &TaskDestination::new(in_category("plan")))
        .unwrap();
    assert_eq!(restored.source_id, None);
    assert_eq!(restored.source, None);
}

#[test]
fn move_unknown_task_is_not_found() {
    let mut board = board();
    let err = board
        .move_task("ghost", &TaskDestination::new(in_category("plan")))
        .unwrap_err();
    assert_eq!(err, BoardError::TaskNotFound("ghost".to_string()));
}

#[test]
fn delete_requires_archived_task() {
    let mut board = board();
    let err = board.delete_task("b1").unwrap_err();
    assert_eq!(err, BoardError::NotArchived("b1".to_string()));
    assert!(board.find_task("b1").is_some());

    board.delete_task("ar1").unwrap();
    assert!(board.archives.is_empty());
    assert_eq!(
        board.delete_task("ar1").unwrap_err(),
        BoardError::TaskNotFound("ar1".to_string())
    );
}

#[test]
fn focus_moves_between_tasks() {
    let mut board = board();
    board.set_focused(Some("b1")).unwrap();
    board.set_focused(Some("p1")).unwrap();

    assert!(!board.categories[0].tasks[0].focused);
    assert!(board.categories[1].tasks[0].focused);
    assert_eq!(board.tasks().filter(|task| task.focused).count(), 1);
}

#[test]
fn focus_none_or_empty_clears_everything() {
    let mut board = board();
    board.set_focused(Some("b2")).unwrap();
    assert_eq!(board.set_focused(Some("")).unwrap(), None);
    assert!(board.focused_task().is_none());

    board.set_focused(Some("b2")).unwrap();
    board.set_focused(None).unwrap();
    assert!(board.focused_task().is_none());
}

#[test]
fn focus_off_board_is_invalid_location() {
    let mut board = board();
    board.set_focused(Some("p1")).unwrap();
    let before = board.clone();

    let err = board.set_focused(Some("bb1")).unwrap_err();
    assert!(matches!(err, BoardError::InvalidLocation(_)));
    assert_eq!(board, before);
}

#[test]
fn tasks_in_parked_categories_are_not_addressable() {
    let mut board = board();
    board
        .category_backburner
        .push(category("later", "Later", &[("l1", 1)]));
    assert!(board.find_task("l1").is_none());
    assert!(board.contains_task("l1"));
    assert!(matches!(
        board.get_task("l1"),
        Err(BoardError::TaskNotFound(_))
    ));
}
