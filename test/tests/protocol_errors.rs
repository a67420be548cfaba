/// A malformed frame aborts the tick before anything is applied
use serde_json::{json, Value};

use brainstem_runtime::{HostMessage, RuntimeConfig, RuntimeError};
use brainstem_shared::{
    BehaviorDefinition, BehaviorLibrary, FrameBuffer, ProtocolError, RosterEntry, WireErr,
};
use brainstem_test::{init_logging, recorder, Journal, TestHost, TestRuntime};

fn setup() -> (TestRuntime, Journal) {
    init_logging();
    let journal = Journal::new();
    let library = BehaviorLibrary::new().with(recorder("test:recorder", &["Init", "Tick"], &journal));
    let mut test = TestRuntime::new(
        &library,
        json!({"brains": {"body": {"uses": [{"id": "rec", "behaviorUri": "test:recorder"}]}}}),
    );
    test.world.spawn("a", "body");
    test.tick();
    journal.take();
    (test, journal)
}

/// The world's next frame as raw bytes
fn frame_bytes(test: &mut TestRuntime) -> Vec<u8> {
    let inbound = test.world.frame();
    let mut buffer = FrameBuffer::with_capacity(4096);
    buffer
        .rewrite::<WireErr, _>(|writer| inbound.write(writer))
        .unwrap();
    buffer.as_bytes().to_vec()
}

fn tick_raw(test: &mut TestRuntime, bytes: &[u8]) -> Result<(), RuntimeError> {
    test.frame.load(bytes).unwrap();
    let request = test.request();
    test.runtime.tick(&request, &mut test.frame).map(|_| ())
}

fn assert_untouched(test: &TestRuntime, journal: &Journal) {
    assert_eq!(test.runtime.registry().names(), ["a".to_string()]);
    assert!(journal.entries().is_empty());
}

#[test]
fn bad_sanity_marker_aborts_the_tick() {
    let (mut test, journal) = setup();
    test.world.spawn("b", "body");
    let mut bytes = frame_bytes(&mut test);
    let end = bytes.len();
    bytes[end - 4..].copy_from_slice(&7i32.to_le_bytes());

    let error = tick_raw(&mut test, &bytes).unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::Protocol(ProtocolError::SanityMismatch {
            expected: 451,
            found: 7,
            ..
        })
    ));
    assert_untouched(&test, &journal);
}

#[test]
fn truncated_frame_aborts_the_tick() {
    let (mut test, journal) = setup();
    test.world.spawn("b", "body");
    let bytes = frame_bytes(&mut test);

    let error = tick_raw(&mut test, &bytes[..bytes.len() - 3]).unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::Protocol(ProtocolError::Wire(WireErr::Underflow { .. }))
    ));
    assert_untouched(&test, &journal);
}

#[test]
fn duplicate_roster_entries_abort_the_tick() {
    let (mut test, journal) = setup();
    let mut inbound = test.world.frame();
    inbound.roster.entries.push(RosterEntry::new(9, "a"));
    let mut buffer = FrameBuffer::with_capacity(4096);
    buffer
        .rewrite::<WireErr, _>(|writer| inbound.write(writer))
        .unwrap();

    let error = tick_raw(&mut test, buffer.as_bytes()).unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::Protocol(ProtocolError::MalformedRoster { .. })
    ));
    assert_untouched(&test, &journal);
}

#[test]
fn state_sync_for_unassigned_temp_id_aborts_the_tick() {
    let (mut test, journal) = setup();
    test.world.spawn("b", "body");
    let mut inbound = test.world.frame();
    inbound.roster.entries.retain(|entry| entry.name != "b");
    let mut buffer = FrameBuffer::with_capacity(4096);
    buffer
        .rewrite::<WireErr, _>(|writer| inbound.write(writer))
        .unwrap();

    let error = tick_raw(&mut test, buffer.as_bytes()).unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::Protocol(ProtocolError::UnknownTempId { temp_id: 1 })
    ));
    assert_untouched(&test, &journal);
}

#[test]
fn the_next_good_frame_ticks_normally() {
    let (mut test, journal) = setup();
    test.world.spawn("b", "body");
    let mut bytes = frame_bytes(&mut test);
    let end = bytes.len();
    bytes[end - 4..].copy_from_slice(&0i32.to_le_bytes());
    tick_raw(&mut test, &bytes).unwrap_err();

    test.tick();

    assert_eq!(journal.take_names(), vec!["b:Init", "a:Tick", "b:Tick"]);
}

#[test]
fn flush_overflow_keeps_dirty_flags() {
    init_logging();
    let library = BehaviorLibrary::new().with(
        BehaviorDefinition::builder("test:hoarder")
            .on("Grow", |context, _| {
                context
                    .mem_mut()?
                    .insert("junk".to_string(), json!("x".repeat(1000)));
                Ok(Value::Null)
            })
            .on("Shrink", |context, _| {
                context.mem_mut()?.insert("junk".to_string(), json!("x"));
                Ok(Value::Null)
            })
            .build(),
    );
    let config = RuntimeConfig {
        frame_capacity: 256,
        ..Default::default()
    };
    let mut test = TestRuntime::with_config(
        config,
        TestHost::new(),
        &library,
        json!({"brains": {"body": {"uses": [{"id": "hoard", "behaviorUri": "test:hoarder"}]}}}),
    );
    test.world.spawn("a", "body");
    test.tick();

    let mut request = test.request();
    request.messages_from_host = vec![HostMessage::to_actor("a", "Grow", "{}")];
    let error = test.try_tick_with(request).unwrap_err();
    assert!(matches!(error, RuntimeError::Flush(WireErr::Overflow { .. })));
    assert!(test.runtime.registry().get("a").unwrap().has_dirty_memory());

    let mut request = test.request();
    request.messages_from_host = vec![HostMessage::to_actor("a", "Shrink", "{}")];
    test.tick_with(request);
    let dirty = test.dirty();
    assert_eq!(
        dirty.actor("a").unwrap().actor_memory_json.as_deref(),
        Some("{\"junk\":\"x\"}")
    );
}
