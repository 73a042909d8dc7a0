use nautilus_types::now_millis;

#[test]
fn now_is_after_2020() {
    // 2020-01-01T00:00:00Z
    assert!(now_millis() > 1_577_836_800_000);
}

#[test]
fn now_is_non_decreasing_across_calls() {
    let a = now_millis();
    let b = now_millis();
    assert!(b >= a);
}
