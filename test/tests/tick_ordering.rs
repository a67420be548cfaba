/// The tick pipeline delivers in a fixed order: deferred init, collisions,
/// terrain, tick broadcasts, host messages, then whatever handlers send.
use serde_json::{json, Value};

use brainstem_runtime::{HostMessage, TickRequest};
use brainstem_shared::{BehaviorDefinition, BehaviorLibrary};
use brainstem_test::{init_logging, recorder, Journal, TestRuntime};

const RECORDED: &[&str] = &[
    "Init",
    "Collision",
    "TouchEnter",
    "TerrainCollision",
    "Tick",
    "OffstageTick",
    "LocalTick",
    "Ping",
    "Pong",
    "Echo",
];

fn setup() -> (TestRuntime, Journal) {
    init_logging();
    let journal = Journal::new();
    let library = BehaviorLibrary::new()
        .with(recorder("test:recorder", RECORDED, &journal))
        .with(
            BehaviorDefinition::builder("test:echo")
                .on("Ping", |context, _| {
                    context.send_to_self("Echo", json!({}));
                    Ok(Value::Null)
                })
                .build(),
        );
    let runtime = TestRuntime::new(
        &library,
        json!({"brains": {"watcher": {"uses": [
            {"id": "rec", "behaviorUri": "test:recorder"},
            {"id": "echo", "behaviorUri": "test:echo"},
        ]}}}),
    );
    (runtime, journal)
}

#[test]
fn first_tick_initializes_before_ticking() {
    let (mut test, journal) = setup();
    test.world.spawn("a", "watcher");
    test.world.spawn("b", "watcher");

    test.tick();

    assert_eq!(
        journal.take_names(),
        vec![
            "a:Init",
            "b:Init",
            "a:Tick",
            "b:Tick",
            "a:LocalTick",
            "b:LocalTick"
        ]
    );
}

#[test]
fn steps_run_in_pipeline_order() {
    let (mut test, journal) = setup();
    test.world.spawn("a", "watcher");
    test.world.spawn("b", "watcher");
    test.tick();
    journal.take();

    test.world.collide("a", "b", true);
    test.world.touch_terrain("b", 12);
    let mut request = test.request();
    request.messages_from_host = vec![
        HostMessage::to_actor("a", "Ping", "{}"),
        HostMessage::to_actor("a", "Pong", "{}"),
    ];
    test.tick_with(request);

    assert_eq!(
        journal.take_names(),
        vec![
            "a:Collision",
            "a:TouchEnter",
            "b:TerrainCollision",
            "a:Tick",
            "b:Tick",
            "a:LocalTick",
            "b:LocalTick",
            "a:Ping",
            "a:Pong",
            "a:Echo",
        ]
    );
}

#[test]
fn init_runs_once() {
    let (mut test, journal) = setup();
    test.world.spawn("a", "watcher");
    test.tick();
    test.tick();
    test.tick();

    assert_eq!(journal.count("Init"), 1);
    assert_eq!(journal.count("Tick"), 3);
}

#[test]
fn tick_audiences_follow_stage_and_ownership() {
    let (mut test, journal) = setup();
    test.world.spawn("stage", "watcher");
    test.world.spawn("wings", "watcher");
    test.world.spawn("peer", "watcher");
    test.world.spawn("ghost", "watcher");
    test.world.set_onstage("wings", false);
    test.world.set_remote("peer", true);
    test.world.set_remote("ghost", true);
    test.world.set_onstage("ghost", false);
    test.tick();
    journal.take();

    test.tick();

    assert_eq!(
        journal.take_names(),
        vec![
            "stage:Tick",
            "wings:OffstageTick",
            "stage:LocalTick",
            "peer:LocalTick"
        ]
    );
}

#[test]
fn tick_carries_delta_and_time() {
    let (mut test, journal) = setup();
    test.world.spawn("a", "watcher");

    test.tick_with(TickRequest::new(0.5, 10.0));

    let tick = journal
        .entries()
        .into_iter()
        .find(|entry| entry.message == "Tick")
        .unwrap();
    assert_eq!(tick.args, json!({"dt": 0.5, "time": 10.0}));
    let init = journal
        .entries()
        .into_iter()
        .find(|entry| entry.message == "Init")
        .unwrap();
    assert_eq!(init.args, json!({"time": 10.0}));
}

#[test]
fn host_messages_reach_existing_actors_only() {
    let (mut test, journal) = setup();
    test.world.spawn("a", "watcher");
    test.world.spawn("offstage", "watcher");
    test.world.set_onstage("offstage", false);
    test.tick();
    journal.take();

    let mut request = test.request();
    request.messages_from_host = vec![
        HostMessage::to_actor("nobody", "Ping", "{}"),
        HostMessage::broadcast("Ping", "not json"),
    ];
    test.tick_with(request);

    let pings: Vec<_> = journal
        .entries()
        .into_iter()
        .filter(|entry| entry.message == "Ping")
        .collect();
    assert_eq!(pings.len(), 2);
    assert_eq!(pings[0].actor, "a");
    assert_eq!(pings[1].actor, "offstage");
    assert_eq!(pings[0].args, json!({}));
}

#[test]
fn temp_ids_are_reassigned_every_tick() {
    let (mut test, journal) = setup();
    test.world.spawn("a", "watcher");
    test.world.spawn("b", "watcher");
    test.tick();
    journal.take();

    test.world.shuffle_temp_ids();
    test.world.collide("b", "a", false);
    test.tick();

    let collision = journal
        .entries()
        .into_iter()
        .find(|entry| entry.message == "Collision")
        .unwrap();
    assert_eq!(collision.actor, "b");
    assert_eq!(collision.args, json!({"other": "a"}));
    assert_eq!(journal.count("TouchEnter"), 0);
}

#[test]
fn empty_host_target_broadcasts() {
    let (mut test, journal) = setup();
    test.world.spawn("a", "watcher");
    test.world.spawn("b", "watcher");
    test.tick();
    journal.take();

    let mut request = test.request();
    request.messages_from_host = vec![
        serde_json::from_value(json!({"name": "Pong", "targetActor": "", "argsJson": "{}"}))
            .unwrap(),
        HostMessage {
            target_actor: Some(String::new()),
            ..HostMessage::broadcast("Pong", "{}")
        },
    ];
    test.tick_with(request);

    let pongs: Vec<String> = journal
        .take_names()
        .into_iter()
        .filter(|name| name.ends_with(":Pong"))
        .collect();
    assert_eq!(pongs, vec!["a:Pong", "b:Pong", "a:Pong", "b:Pong"]);
}
