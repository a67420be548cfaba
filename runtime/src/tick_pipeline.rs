use log::debug;
use serde_json::json;

use brainstem_shared::{
    Audience, Dispatch, FrameBuffer, HostServices, InboundFrame, Message, MessageOrigin, Serde,
    TickClock, TickResponse, COLLISION_MESSAGE, LOCAL_TICK_MESSAGE, OFFSTAGE_TICK_MESSAGE,
    TERRAIN_COLLISION_MESSAGE, TICK_MESSAGE, TOUCH_ENTER_MESSAGE,
};

use crate::{request::TickRequest, runtime::Runtime, RuntimeError};

impl<S: HostServices> Runtime<S> {
    /// Runs one tick.
    ///
    /// `frame` holds the host's roster, state sync, collision and terrain
    /// sections. The whole frame is read and validated before anything is
    /// applied, so a protocol error leaves the runtime as it was. On success
    /// the frame is rewritten with the dirty memory section.
    ///
    /// The flush runs last. If dirty memory does not fit in `frame`, every
    /// handler has already run and its memory changes stay applied, but the
    /// requests it made this tick (velocity changes, messages to the host and
    /// so on) are discarded along with the response. Dirty flags are kept for
    /// the next tick.
    pub fn tick(
        &mut self,
        request: &TickRequest,
        frame: &mut FrameBuffer,
    ) -> Result<TickResponse, RuntimeError> {
        let inbound = InboundFrame::read(&mut frame.reader())?;

        // 1. world state
        self.registry.apply_roster_diff(&inbound.roster)?;
        self.registry
            .apply_state_sync(&inbound.state_sync, &self.database)?;
        self.registry.merge_player_state(&request.player_actors);

        self.clock = TickClock {
            delta_seconds: request.delta_seconds,
            game_time: request.game_time,
        };

        let mut response = TickResponse::default();
        let report = {
            let mut dispatch = Dispatch::new(
                &mut self.registry,
                &mut self.database,
                &mut self.router,
                &mut response,
                &mut self.services,
                self.clock,
                self.config.max_deck_depth,
            );

            // 2. deferred initialization
            dispatch.run_pending_inits();

            // 3. collisions, receiver side only
            for entry in &inbound.collisions.entries {
                let registry = dispatch.registry();
                let (Some(receiver), Some(other)) = (
                    registry.name_for_temp_id(entry.receiver),
                    registry.name_for_temp_id(entry.other),
                ) else {
                    debug!(
                        "Skipping collision between unknown temp ids {} and {}",
                        entry.receiver, entry.other
                    );
                    continue;
                };
                let (receiver, other) = (receiver.to_string(), other.to_string());
                let args = json!({ "other": other });
                dispatch.enqueue(Message::to_actor(
                    &receiver,
                    COLLISION_MESSAGE,
                    args.clone(),
                    MessageOrigin::Local,
                ));
                if entry.is_enter {
                    dispatch.enqueue(Message::to_actor(
                        &receiver,
                        TOUCH_ENTER_MESSAGE,
                        args,
                        MessageOrigin::Local,
                    ));
                }
            }

            // 4. terrain collisions
            for entry in &inbound.terrain.entries {
                let Some(receiver) = dispatch
                    .registry()
                    .name_for_temp_id(entry.receiver)
                    .map(str::to_string)
                else {
                    debug!(
                        "Skipping terrain collision for unknown temp id {}",
                        entry.receiver
                    );
                    continue;
                };
                dispatch.enqueue(Message::to_actor(
                    &receiver,
                    TERRAIN_COLLISION_MESSAGE,
                    json!({ "blockStyle": entry.block_style }),
                    MessageOrigin::Local,
                ));
            }

            // 5. tick broadcasts
            let tick_args = json!({
                "dt": request.delta_seconds,
                "time": request.game_time,
            });
            for (audience, name) in [
                (Audience::OnstageLocal, TICK_MESSAGE),
                (Audience::OffstageLocal, OFFSTAGE_TICK_MESSAGE),
                (Audience::Onstage, LOCAL_TICK_MESSAGE),
            ] {
                dispatch.enqueue(Message::broadcast(
                    audience,
                    name,
                    tick_args.clone(),
                    MessageOrigin::Local,
                ));
            }

            // 6. host messages
            for host_message in &request.messages_from_host {
                let message = match host_message.target() {
                    Some(target) => {
                        if !dispatch.registry().contains(target) {
                            debug!(
                                "Dropping host message {:?} for unknown actor {target:?}",
                                host_message.name
                            );
                            continue;
                        }
                        Message::to_actor(
                            target,
                            &host_message.name,
                            host_message.args(),
                            host_message.origin(),
                        )
                    }
                    None => Message::broadcast(
                        Audience::Everyone,
                        &host_message.name,
                        host_message.args(),
                        host_message.origin(),
                    ),
                };
                dispatch.enqueue(message);
            }

            // 7. pump
            dispatch.pump(self.config.max_messages_per_tick)
        };

        // 8. flush
        let section = self.registry.collect_dirty()?;
        frame
            .rewrite(|writer| section.ser(writer))
            .map_err(RuntimeError::Flush)?;
        self.registry.clear_dirty();

        debug!(
            "Tick at {:.3}: {} messages delivered, {} handlers run, {} actors flushed",
            request.game_time,
            report.delivered,
            response.handlers_invoked,
            section.actors.len()
        );
        Ok(response)
    }
}
