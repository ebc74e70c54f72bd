use lyra_llm::{
    Assistant, AssistantTool, Message, MessageContent, Run, RunStatus, ThreadMessage,
};

#[test]
fn test_message_role_tags() {
    let msg = Message::system("You are helpful");
    assert_eq!(msg.role(), "system");

    let msg = Message::human("Hello");
    assert_eq!(msg.role(), "user");

    let msg = Message::ai("Hi there!");
    assert_eq!(msg.role(), "assistant");
}

#[test]
fn test_message_serialization() {
    let msg = Message::human("Hello");
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"role\":\"user\""));
    assert!(json.contains("Hello"));
}

#[test]
fn test_message_deserialization() {
    let json = r#"{"role":"assistant","content":"Test"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg.role(), "assistant");
    assert_eq!(msg.content(), "Test");
}

#[test]
fn test_run_status_parses_snake_case() {
    let run: Run = serde_json::from_str(
        r#"{
            "id": "run_abc",
            "thread_id": "thread_abc",
            "assistant_id": "asst_abc",
            "status": "in_progress",
            "created_at": 1700000000
        }"#,
    )
    .unwrap();

    assert_eq!(run.status, RunStatus::InProgress);
    assert!(run.status.is_pending());
    assert!(run.last_error.is_none());
}

#[test]
fn test_unrecognized_run_status_is_unknown_and_terminal() {
    let run: Run = serde_json::from_str(
        r#"{
            "id": "run_abc",
            "thread_id": "thread_abc",
            "assistant_id": "asst_abc",
            "status": "some_future_state",
            "created_at": 1700000000
        }"#,
    )
    .unwrap();

    assert_eq!(run.status, RunStatus::Unknown);
    assert!(!run.status.is_pending());
}

#[test]
fn test_run_status_pending_set() {
    for status in [RunStatus::Queued, RunStatus::InProgress, RunStatus::Cancelling] {
        assert!(status.is_pending());
    }
    for status in [
        RunStatus::RequiresAction,
        RunStatus::Completed,
        RunStatus::Failed,
        RunStatus::Cancelled,
        RunStatus::Expired,
    ] {
        assert!(!status.is_pending());
    }
}

#[test]
fn test_run_status_display_matches_wire_form() {
    assert_eq!(RunStatus::RequiresAction.to_string(), "requires_action");
    assert_eq!(RunStatus::InProgress.to_string(), "in_progress");
    assert_eq!(RunStatus::Completed.to_string(), "completed");
}

#[test]
fn test_thread_message_decodes_text_content() {
    let message: ThreadMessage = serde_json::from_str(
        r#"{
            "id": "msg_abc",
            "thread_id": "thread_abc",
            "role": "assistant",
            "content": [
                {"type": "text", "text": {"value": "Hello!", "annotations": []}}
            ],
            "created_at": 1700000000
        }"#,
    )
    .unwrap();

    assert_eq!(message.content.len(), 1);
    match &message.content[0] {
        MessageContent::Text { text } => assert_eq!(text.value, "Hello!"),
        other => panic!("unexpected content: {other:?}"),
    }
}

#[test]
fn test_thread_message_decodes_image_content() {
    // Non-text segments must still decode; rejecting them is the codec's job.
    let message: ThreadMessage = serde_json::from_str(
        r#"{
            "id": "msg_abc",
            "thread_id": "thread_abc",
            "role": "user",
            "content": [
                {"type": "image_file", "image_file": {"file_id": "file_123"}}
            ],
            "created_at": 1700000000
        }"#,
    )
    .unwrap();

    assert!(matches!(message.content[0], MessageContent::ImageFile { .. }));
}

#[test]
fn test_assistant_decodes_with_null_name() {
    let assistant: Assistant = serde_json::from_str(
        r#"{
            "id": "asst_abc",
            "name": null,
            "model": "gpt-4o-mini",
            "instructions": null,
            "created_at": 1700000000,
            "tools": [{"type": "code_interpreter"}]
        }"#,
    )
    .unwrap();

    assert!(assistant.name.is_none());
    assert!(matches!(assistant.tools[0], AssistantTool::CodeInterpreter));
}

#[test]
fn test_assistant_tool_serializes_as_tagged_type() {
    let json = serde_json::to_string(&AssistantTool::CodeInterpreter).unwrap();
    assert_eq!(json, r#"{"type":"code_interpreter"}"#);
}
