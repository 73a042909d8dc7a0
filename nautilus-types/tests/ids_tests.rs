use nautilus_types::EventId;
use std::collections::HashSet;

#[test]
fn event_id_new_is_unique() {
    let a = EventId::new();
    let b = EventId::new();
    assert_ne!(a, b);
}

#[test]
fn event_id_default_is_unique() {
    assert_ne!(EventId::default(), EventId::default());
}

#[test]
fn event_ids_are_time_ordered() {
    let ids: Vec<EventId> = (0..50).map(|_| EventId::new()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn many_event_ids_are_distinct() {
    let ids: HashSet<EventId> = (0..1000).map(|_| EventId::new()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn event_id_displays_as_hyphenated_uuid() {
    let text = EventId::new().to_string();
    assert_eq!(text.len(), 36);
    assert_eq!(text.matches('-').count(), 4);
    // Version nibble of a v7 UUID.
    assert_eq!(&text[14..15], "7");
}

#[test]
fn event_id_serializes_as_plain_string() {
    let id = EventId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let back: EventId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
