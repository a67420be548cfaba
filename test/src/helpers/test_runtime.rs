use serde_json::Value;

use brainstem_runtime::{Runtime, RuntimeConfig, RuntimeError, TickRequest};
use brainstem_shared::{
    BehaviorLibrary, DatabaseSnapshot, DirtyMemorySection, FrameBuffer, Serde, TickResponse,
    WireErr,
};

use crate::helpers::{test_host::TestHost, test_world::TestWorld};

pub const TEST_DELTA_SECONDS: f32 = 0.25;

/// A runtime driven by a [`TestWorld`], with a frame buffer of its own
pub struct TestRuntime {
    pub runtime: Runtime<TestHost>,
    pub world: TestWorld,
    pub frame: FrameBuffer,
    pub game_time: f64,
}

impl TestRuntime {
    pub fn new(library: &BehaviorLibrary, database: Value) -> Self {
        Self::with_config(RuntimeConfig::default(), TestHost::new(), library, database)
    }

    pub fn with_config(
        config: RuntimeConfig,
        host: TestHost,
        library: &BehaviorLibrary,
        database: Value,
    ) -> Self {
        let mut runtime = Runtime::new(config, host);
        let snapshot = DatabaseSnapshot::from_value(database, library)
            .expect("test database should resolve against the test library");
        runtime.update_behavior_database(snapshot);
        let frame = runtime.new_frame_buffer();
        Self {
            runtime,
            world: TestWorld::new(),
            frame,
            game_time: 0.0,
        }
    }

    /// A request for the next tick, with nothing from the host
    pub fn request(&self) -> TickRequest {
        TickRequest::new(
            TEST_DELTA_SECONDS,
            self.game_time + f64::from(TEST_DELTA_SECONDS),
        )
    }

    pub fn tick(&mut self) -> TickResponse {
        let request = self.request();
        self.tick_with(request)
    }

    pub fn tick_with(&mut self, request: TickRequest) -> TickResponse {
        self.try_tick_with(request).expect("tick should succeed")
    }

    pub fn try_tick_with(&mut self, request: TickRequest) -> Result<TickResponse, RuntimeError> {
        let inbound = self.world.frame();
        self.frame
            .rewrite::<WireErr, _>(|writer| inbound.write(writer))
            .expect("test frame should fit");
        self.game_time = request.game_time;
        self.runtime.tick(&request, &mut self.frame)
    }

    /// The dirty memory section the last tick wrote back
    pub fn dirty(&self) -> DirtyMemorySection {
        DirtyMemorySection::de(&mut self.frame.reader()).expect("frame should hold dirty memory")
    }
}
