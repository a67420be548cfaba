/// Decks: a behavior calling the uses listed in one of its properties
use serde_json::{json, Value};

use brainstem_runtime::{HostMessage, RuntimeConfig, RuntimeError};
use brainstem_shared::{BehaviorDefinition, BehaviorError, BehaviorLibrary, PropertySpec};
use brainstem_test::{init_logging, TestHost, TestRuntime};

fn library() -> BehaviorLibrary {
    BehaviorLibrary::new()
        .with(
            BehaviorDefinition::builder("test:hand")
                .property(PropertySpec::deck("cards"))
                .on("Deal", |context, message| {
                    let results = context.call_deck("cards", "Play", message.args.clone())?;
                    Ok(json!(results))
                })
                .on("DealFrom", |context, message| {
                    let property = message
                        .arg("property")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    Ok(json!(context.call_deck(&property, "Play", json!({}))?))
                })
                .build(),
        )
        .with(
            BehaviorDefinition::builder("test:constant")
                .property(PropertySpec::string("value", ""))
                .on("Play", |context, _| {
                    Ok(context.prop("value").cloned().unwrap_or(Value::Null))
                })
                .build(),
        )
        .with(
            BehaviorDefinition::builder("test:broken")
                .on("Play", |_, _| Err(BehaviorError::failed("bent card")))
                .build(),
        )
        .with(
            BehaviorDefinition::builder("test:marker")
                .on("Play", |context, message| {
                    context
                        .card_mut()?
                        .insert("played".to_string(), message.args.clone());
                    Ok(json!(context.actor_name()))
                })
                .build(),
        )
        .with(
            BehaviorDefinition::builder("test:loop")
                .property(PropertySpec::deck("cards"))
                .on("Start", |context, _| {
                    context.call_deck("cards", "Run", json!({}))?;
                    Ok(Value::Null)
                })
                .on("Run", |context, _| {
                    context.call_deck("cards", "Run", json!({}))?;
                    Ok(json!(context.depth()))
                })
                .build(),
        )
}

fn database() -> Value {
    json!({"brains": {
        "dealer": {"uses": [
            {"id": "hand", "behaviorUri": "test:hand",
             "properties": {"cards": ["one", "broken", "marker", "elsewhere", "two"]}},
            {"id": "one", "behaviorUri": "test:constant", "properties": {"value": "1"}},
            {"id": "two", "behaviorUri": "test:constant", "properties": {"value": "2"}},
            {"id": "broken", "behaviorUri": "test:broken"},
            {"id": "marker", "behaviorUri": "test:marker"},
        ]},
        "other": {"uses": [
            {"id": "elsewhere", "behaviorUri": "test:constant", "properties": {"value": "x"}},
        ]},
        "looper": {"uses": [
            {"id": "loop", "behaviorUri": "test:loop", "properties": {"cards": ["loop"]}},
        ]},
    }})
}

fn setup(max_deck_depth: usize) -> TestRuntime {
    init_logging();
    let config = RuntimeConfig {
        max_deck_depth,
        ..Default::default()
    };
    let mut test = TestRuntime::with_config(config, TestHost::new(), &library(), database());
    test.world.spawn("dealer", "dealer");
    test.world.spawn("looper", "looper");
    test.tick();
    test
}

#[test]
fn deck_returns_each_card_result_in_order() {
    let mut test = setup(8);

    let results = test
        .runtime
        .call_behavior_use_method("hand", "dealer", "Deal", json!({"round": 1}))
        .unwrap();

    // The broken card is skipped, and "elsewhere" is not in this brain
    assert_eq!(results, json!(["1", "dealer", "2"]));
}

#[test]
fn faulting_cards_are_recorded_and_isolated() {
    let mut test = setup(8);

    let mut request = test.request();
    request.messages_from_host = vec![HostMessage::to_actor("dealer", "Deal", "{\"round\":2}")];
    let response = test.tick_with(request);

    let faults: Vec<_> = response.faults().collect();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].use_id, "broken");
    assert_eq!(faults[0].message_name, "Play");
    assert_eq!(test.runtime.services().exceptions.len(), 1);
}

#[test]
fn cards_write_their_own_instance_memory() {
    let mut test = setup(8);

    let mut request = test.request();
    request.messages_from_host = vec![HostMessage::to_actor("dealer", "Deal", "{\"round\":3}")];
    test.tick_with(request);

    let dirty = test.dirty();
    let record = dirty.actor("dealer").unwrap();
    assert_eq!(record.actor_memory_json, None);
    assert_eq!(record.uses.len(), 1);
    assert_eq!(record.uses[0].use_id, "marker");
    assert_eq!(record.uses[0].memory_json, "{\"played\":{\"round\":3}}");
}

#[test]
fn recursion_stops_at_the_depth_limit() {
    let mut test = setup(3);

    let mut request = test.request();
    request.messages_from_host = vec![HostMessage::to_actor("looper", "Start", "{}")];
    let response = test.tick_with(request);

    // Start, then Run at depths 1, 2 and 3; the fourth level is refused
    assert_eq!(response.handlers_invoked, 4);
    let faults: Vec<_> = response.faults().collect();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].message_name, "Run");
    assert!(faults[0].text.contains("depth 4"));
}

#[test]
fn missing_deck_property_is_an_error() {
    let mut test = setup(8);

    let error = test
        .runtime
        .call_behavior_use_method("hand", "dealer", "DealFrom", json!({"property": "nope"}))
        .unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::Behavior(BehaviorError::InvalidDeck { ref property, .. }) if property == "nope"
    ));
}
