use serde_json::json;
use twentyfive_core::{BoardState, Category, Task, TaskLink, TaskState};

#[test]
fn task_omits_absent_optional_fields() {
    let task = Task::new("t1", "Write tests", TaskState::Todo, 2).unwrap();
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "t1",
            "name": "Write tests",
            "description": "",
            "notes": "",
            "state": "todo",
            "size": 2
        })
    );
}

#[test]
fn task_writes_camel_case_provenance_and_flags() {
    let mut task = Task::new("t1", "Parked", TaskState::Blocked, 3).unwrap();
    task.urgent = true;
    task.source_id = Some("c1".to_string());
    task.source = Some("Build".to_string());
    task.links.push(TaskLink {
        text: "docs".to_string(),
        url: "https://example.com".to_string(),
    });

    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["sourceId"], "c1");
    assert_eq!(value["source"], "Build");
    assert_eq!(value["urgent"], true);
    assert_eq!(value["links"][0]["url"], "https://example.com");
    assert!(value.get("focused").is_none());
    assert!(value.get("checklist").is_none());
}

#[test]
fn null_containers_decode_as_empty() {
    let board: BoardState = serde_json::from_value(json!({
        "categories": [{"id": "c1", "name": "Build", "tasks": null}],
        "backburner": null,
        "archives": null,
        "categoryBackburner": null
    }))
    .unwrap();

    assert_eq!(board.categories.len(), 1);
    assert!(board.categories[0].tasks.is_empty());
    assert!(board.backburner.is_empty());
    assert!(board.archives.is_empty());
    assert!(board.category_backburner.is_empty());
    assert!(board.category_archives.is_empty());
}

#[test]
fn null_task_fields_decode_as_empty() {
    let task: Task = serde_json::from_value(json!({
        "id": "t1",
        "name": "Hand edited",
        "description": null,
        "notes": null,
        "state": "todo",
        "size": 2,
        "links": null,
        "checklist": null,
        "urgent": null,
        "focused": null
    }))
    .expect("null task fields should decode");

    assert_eq!(task.description, "");
    assert_eq!(task.notes, "");
    assert!(task.links.is_empty());
    assert!(task.checklist.is_empty());
    assert!(!task.urgent);
    assert!(!task.focused);
}

#[test]
fn missing_free_text_defaults_to_empty() {
    let task: Task = serde_json::from_value(json!({
        "id": "t1",
        "name": "Bare",
        "state": "doing",
        "size": 1
    }))
    .unwrap();
    assert_eq!(task.description, "");
    assert_eq!(task.notes, "");
    assert!(!task.urgent);
    assert_eq!(task.source_id, None);
}

#[test]
fn unknown_state_fails_to_decode() {
    let result = serde_json::from_value::<Task>(json!({
        "id": "t1",
        "name": "Odd",
        "state": "someday",
        "size": 1
    }));
    assert!(result.is_err());
}

#[test]
fn empty_source_strings_normalize_to_absent() {
    let mut board: BoardState = serde_json::from_value(json!({
        "archives": [{
            "id": "t1", "name": "Old", "state": "done", "size": 1,
            "sourceId": "", "source": ""
        }]
    }))
    .unwrap();
    board.normalize();
    assert_eq!(board.archives[0].source_id, None);
    assert_eq!(board.archives[0].source, None);
}

#[test]
fn cloned_board_is_independent() {
    let mut category = Category::new("c1", "Build");
    category
        .tasks
        .push(Task::new("t1", "Ship", TaskState::Todo, 2).unwrap());
    let original = BoardState {
        categories: vec![category],
        ..BoardState::default()
    };

    let mut snapshot = original.clone();
    snapshot.categories[0].tasks[0].name = "Changed".to_string();
    snapshot.categories[0].tasks.clear();

    assert_eq!(original.categories[0].tasks.len(), 1);
    assert_eq!(original.categories[0].tasks[0].name, "Ship");
}

#[test]
fn board_serializes_all_five_containers() {
    let value = serde_json::to_value(BoardState::default()).unwrap();
    for key in [
        "categories",
        "backburner",
        "archives",
        "categoryBackburner",
        "categoryArchives",
    ] {
        assert_eq!(value[key], json!([]), "container {key}");
    }
}
