/// Collision messages are scoped to the receiver the host names
use serde_json::json;

use brainstem_shared::BehaviorLibrary;
use brainstem_test::{init_logging, recorder, remember_touches, Journal, TestRuntime};

fn setup() -> (TestRuntime, Journal) {
    init_logging();
    let journal = Journal::new();
    let library = BehaviorLibrary::new()
        .with(recorder(
            "test:recorder",
            &["Collision", "TouchEnter"],
            &journal,
        ))
        .with(remember_touches("test:touches"));
    let mut test = TestRuntime::new(
        &library,
        json!({"brains": {"body": {"uses": [
            {"id": "rec", "behaviorUri": "test:recorder"},
            {"id": "touch", "behaviorUri": "test:touches"},
        ]}}}),
    );
    test.world.spawn("A", "body");
    test.world.spawn("B", "body");
    test.world.set_temp_id("A", 3);
    test.world.set_temp_id("B", 7);
    test.tick();
    (test, journal)
}

#[test]
fn collision_is_not_symmetric() {
    let (mut test, journal) = setup();

    test.world.collide("A", "B", true);
    test.tick();

    let entries = journal.take();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].actor, "A");
    assert_eq!(entries[0].message, "Collision");
    assert_eq!(entries[0].args, json!({"other": "B"}));
    assert_eq!(entries[1].actor, "A");
    assert_eq!(entries[1].message, "TouchEnter");
    assert_eq!(entries[1].args, json!({"other": "B"}));

    let dirty = test.dirty();
    let record = dirty.actor("A").unwrap();
    assert_eq!(
        record.actor_memory_json.as_deref(),
        Some("{\"lastTouched\":\"B\",\"touches\":1}")
    );
    assert!(dirty.actor("B").is_none());
}

#[test]
fn reverse_pair_must_be_reported_separately() {
    let (mut test, journal) = setup();

    test.world.collide("A", "B", true);
    test.world.collide("B", "A", true);
    test.tick();

    let names: Vec<String> = journal.take_names();
    assert_eq!(
        names,
        vec!["A:Collision", "A:TouchEnter", "B:Collision", "B:TouchEnter"]
    );
}

#[test]
fn staying_in_contact_is_not_an_enter() {
    let (mut test, journal) = setup();

    test.world.collide("A", "B", false);
    test.tick();

    assert_eq!(journal.take_names(), vec!["A:Collision"]);
}

#[test]
fn unknown_temp_ids_are_skipped() {
    let (mut test, journal) = setup();

    test.world.collide_ids(3, 99, true);
    test.world.collide_ids(42, 7, true);
    test.world.collide("B", "A", false);
    test.tick();

    assert_eq!(journal.take_names(), vec!["B:Collision"]);
}

#[test]
fn database_reports_collision_brains() {
    let journal = Journal::new();
    let library = BehaviorLibrary::new()
        .with(recorder("test:recorder", &["Collision"], &journal))
        .with(recorder("test:quiet", &["Tick"], &journal));
    let mut test = TestRuntime::new(&library, json!({}));

    let snapshot = brainstem_shared::DatabaseSnapshot::from_value(
        json!({"brains": {
            "loud": {"uses": [{"id": "l", "behaviorUri": "test:recorder"}]},
            "quiet": {"uses": [{"id": "q", "behaviorUri": "test:quiet"}]},
        }}),
        &library,
    )
    .unwrap();
    let handlers = test.runtime.update_behavior_database(snapshot);

    assert_eq!(handlers.behaviors, vec!["test:recorder"]);
    assert_eq!(handlers.brains, vec!["loud"]);
}
