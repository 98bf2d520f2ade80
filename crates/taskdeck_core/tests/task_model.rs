use chrono::{NaiveDate, Utc};
use serde_json::json;
use taskdeck_core::{Task, TaskDraft, TaskPatch, TaskStatus, TaskValidationError};

#[test]
fn draft_defaults_to_not_started_with_no_due_date() {
    let draft = TaskDraft::new("title", "description");
    assert_eq!(draft.status, TaskStatus::NotStarted);
    assert_eq!(draft.due_date, None);
    assert!(draft.validate().is_ok());
}

#[test]
fn draft_validation_names_the_offending_field() {
    let err = TaskDraft::new("", "description").validate().unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);

    let err = TaskDraft::new("title", " \t ").validate().unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyDescription);
}

#[test]
fn patch_validation_only_checks_present_fields() {
    let patch = TaskPatch {
        status: Some(TaskStatus::Done),
        ..TaskPatch::default()
    };
    assert!(patch.validate().is_ok());

    let patch = TaskPatch {
        description: Some(String::new()),
        ..TaskPatch::default()
    };
    assert_eq!(
        patch.validate().unwrap_err(),
        TaskValidationError::EmptyDescription
    );
}

#[test]
fn patch_is_empty_reflects_field_presence() {
    assert!(TaskPatch::default().is_empty());

    let patch = TaskPatch {
        due_date: Some(None),
        ..TaskPatch::default()
    };
    assert!(!patch.is_empty());
}

#[test]
fn apply_merges_every_patched_field() {
    let now = Utc::now();
    let mut task = Task::from_draft(1, TaskDraft::new("old", "old"), now);
    let due = NaiveDate::from_ymd_opt(2026, 10, 31).unwrap();

    task.apply(
        TaskPatch {
            title: Some("new title".to_string()),
            description: Some("new description".to_string()),
            status: Some(TaskStatus::InProgress),
            due_date: Some(Some(due)),
        },
        Utc::now(),
    );

    assert_eq!(task.title, "new title");
    assert_eq!(task.description, "new description");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.due_date, Some(due));
    assert_eq!(task.created_at, now);
    assert!(task.updated_at > now);
}

#[test]
fn snapshot_uses_camel_case_wire_names() {
    let now = Utc::now();
    let task = Task::from_draft(17, TaskDraft::new("title", "description"), now);

    let value = serde_json::to_value(&task).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object["id"], json!(17));
    assert_eq!(object["title"], json!("title"));
    assert_eq!(object["description"], json!("description"));
    assert_eq!(object["status"], json!("NotStarted"));
    assert!(object["createdAt"].is_string());
    assert!(object["updatedAt"].is_string());
    assert!(!object.contains_key("dueDate"));
    assert!(!object.contains_key("created_at"));
}

#[test]
fn due_date_serializes_as_a_plain_calendar_date() {
    let now = Utc::now();
    let mut task = Task::from_draft(1, TaskDraft::new("t", "d"), now);
    task.due_date = NaiveDate::from_ymd_opt(2026, 9, 1);

    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["dueDate"], json!("2026-09-01"));
}

#[test]
fn status_wire_tokens_round_trip() {
    for (status, token) in [
        (TaskStatus::NotStarted, "\"NotStarted\""),
        (TaskStatus::InProgress, "\"InProgress\""),
        (TaskStatus::Done, "\"Done\""),
    ] {
        assert_eq!(serde_json::to_string(&status).unwrap(), token);
        let parsed: TaskStatus = serde_json::from_str(token).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn snapshot_round_trip_preserves_every_field() {
    let now = Utc::now();
    let mut second = Task::from_draft(2, TaskDraft::new("Họp nhóm", "Chuẩn bị slide"), now);
    second.status = TaskStatus::Done;
    second.due_date = NaiveDate::from_ymd_opt(2027, 3, 14);
    let tasks = vec![
        Task::from_draft(1, TaskDraft::new("Đi học", "Mang vở"), now),
        second,
    ];

    let encoded = serde_json::to_string(&tasks).unwrap();
    let decoded: Vec<Task> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, tasks);
}

#[test]
fn snapshot_entry_without_description_loads_as_empty() {
    let raw = json!([{
        "id": 5,
        "title": "imported",
        "status": "NotStarted",
        "createdAt": "2026-08-01T08:00:00Z",
        "updatedAt": "2026-08-01T08:00:00Z"
    }]);

    let tasks: Vec<Task> = serde_json::from_value(raw).unwrap();
    assert_eq!(tasks[0].description, "");
}

#[test]
fn snapshot_entry_with_extra_fields_still_loads() {
    let raw = json!([{
        "id": 6,
        "title": "imported",
        "description": "from an older build",
        "status": "Done",
        "createdAt": "2026-08-01T08:00:00Z",
        "updatedAt": "2026-08-02T09:30:00Z",
        "priority": "high"
    }]);

    let tasks: Vec<Task> = serde_json::from_value(raw).unwrap();
    assert_eq!(tasks[0].status, TaskStatus::Done);
}
