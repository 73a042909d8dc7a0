use nautilus_model::{ConflictConfig, ConflictResult, ConflictStrategy, UnknownStrategy, VersionedRecord};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── ConflictStrategy names ───────────────────────────────────────

#[test]
fn wire_names() {
    assert_eq!(ConflictStrategy::ServerWins.as_str(), "server-wins");
    assert_eq!(ConflictStrategy::ClientWins.as_str(), "client-wins");
    assert_eq!(ConflictStrategy::LastWriteWins.as_str(), "last-write-wins");
    assert_eq!(ConflictStrategy::Merge.as_str(), "merge");
    assert_eq!(ConflictStrategy::Manual.as_str(), "manual");
    assert_eq!(ConflictStrategy::Merge.to_string(), "merge");
}

#[test]
fn from_str_parses_every_name() {
    for strategy in ConflictStrategy::ALL {
        assert_eq!(strategy.as_str().parse::<ConflictStrategy>(), Ok(strategy));
    }
}

#[test]
fn from_str_is_strict() {
    assert_eq!(
        "first-wins".parse::<ConflictStrategy>(),
        Err(UnknownStrategy("first-wins".into()))
    );
}

#[test]
fn lenient_parse_falls_back_to_server_wins() {
    assert_eq!(ConflictStrategy::from_name_lenient("newest"), ConflictStrategy::ServerWins);
    assert_eq!(ConflictStrategy::from_name_lenient("manual"), ConflictStrategy::Manual);
}

#[test]
fn serde_uses_kebab_case_names() {
    let json = serde_json::to_string(&ConflictStrategy::LastWriteWins).unwrap();
    assert_eq!(json, "\"last-write-wins\"");
    let back: ConflictStrategy = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ConflictStrategy::LastWriteWins);
}

#[test]
fn serde_unknown_name_degrades_to_server_wins() {
    let s: ConflictStrategy = serde_json::from_str("\"crdt\"").unwrap();
    assert_eq!(s, ConflictStrategy::ServerWins);
}

#[test]
fn default_strategy_is_server_wins() {
    assert_eq!(ConflictStrategy::default(), ConflictStrategy::ServerWins);
}

// ── ConflictConfig ───────────────────────────────────────────────

#[test]
fn field_strategy_defaults_to_last_write_wins() {
    let config = ConflictConfig::new(ConflictStrategy::Merge)
        .with_field_strategy("notes", ConflictStrategy::Manual)
        .with_field_strategy("status", ConflictStrategy::ServerWins)
        .with_field_strategy("tags", ConflictStrategy::Merge);
    assert_eq!(config.strategy_for("notes"), ConflictStrategy::Manual);
    assert_eq!(config.strategy_for("status"), ConflictStrategy::ServerWins);
    assert_eq!(config.strategy_for("tags"), ConflictStrategy::LastWriteWins);
    assert_eq!(config.strategy_for("other"), ConflictStrategy::LastWriteWins);
}

#[test]
fn strict_ids_follows_build_profile_by_default() {
    assert_eq!(ConflictConfig::default().strict_ids, cfg!(debug_assertions));
    assert!(!ConflictConfig::default().with_strict_ids(false).strict_ids);
}

#[test]
fn config_deserializes_from_camel_case_json() {
    let config: ConflictConfig = serde_json::from_value(json!({
        "defaultStrategy": "merge",
        "fieldStrategies": { "remarks": "manual", "eta": "bogus" },
        "strictIds": true
    }))
    .unwrap();
    assert_eq!(config.default_strategy, ConflictStrategy::Merge);
    assert_eq!(config.field_strategies["remarks"], ConflictStrategy::Manual);
    assert_eq!(config.field_strategies["eta"], ConflictStrategy::ServerWins);
    assert!(config.strict_ids);
}

#[test]
fn config_fields_are_optional() {
    let config: ConflictConfig = serde_json::from_value(json!({})).unwrap();
    assert_eq!(config.default_strategy, ConflictStrategy::ServerWins);
    assert!(config.field_strategies.is_empty());
}

// ── ConflictResult ───────────────────────────────────────────────

#[test]
fn result_with_no_conflicts_is_resolved() {
    let data = VersionedRecord::new("a", 1, 1);
    let r = ConflictResult::with_conflicts(data, ConflictStrategy::Merge, vec![]);
    assert!(r.resolved);
    let value = serde_json::to_value(&r).unwrap();
    assert!(value.get("conflicts").is_none());
}

#[test]
fn result_with_conflicts_is_unresolved() {
    let data = VersionedRecord::new("a", 1, 1);
    let r = ConflictResult::with_conflicts(data, ConflictStrategy::Merge, vec!["eta".into()]);
    assert!(!r.resolved);
    assert!(r.is_conflicted("eta"));
    assert!(!r.is_conflicted("name"));
    let value = serde_json::to_value(&r).unwrap();
    assert_eq!(value["strategy"], "merge");
    assert_eq!(value["conflicts"], json!(["eta"]));
}
