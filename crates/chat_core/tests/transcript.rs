use chat_core::{Role, Transcript, Turn};
use serde_json::json;

#[test]
fn snapshot_preserves_insertion_order() {
    let mut transcript = Transcript::new();
    transcript.append(Turn::user("a"));
    transcript.append(Turn::user("b"));
    transcript.append(Turn::model("c"));

    let snapshot = transcript.snapshot();
    let texts: Vec<_> = snapshot.iter().map(|turn| turn.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
    assert_eq!(transcript.last().map(|turn| turn.role), Some(Role::Model));

    // Later appends do not alter an earlier snapshot.
    transcript.append(Turn::user("d"));
    assert_eq!(snapshot.len(), 3);
    assert_eq!(transcript.len(), 4);
}

#[test]
fn turns_serialize_with_lowercase_roles() {
    let turns = vec![Turn::user("Hello"), Turn::model("**Hi**")];
    let value = serde_json::to_value(&turns).unwrap();
    assert_eq!(
        value,
        json!([
            { "role": "user", "text": "Hello" },
            { "role": "model", "text": "**Hi**" },
        ])
    );
}
