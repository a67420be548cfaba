use std::ops::{Deref, DerefMut};

/// The (actor, use) identity a handler call runs under, and what the call
/// did to memory while it was active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub actor: String,
    pub use_id: String,
    pub actor_touched: bool,
    pub use_touched: bool,
    pub unchanged: bool,
}

impl ScopeFrame {
    fn new(actor: &str, use_id: &str) -> Self {
        Self {
            actor: actor.to_string(),
            use_id: use_id.to_string(),
            actor_touched: false,
            use_touched: false,
            unchanged: false,
        }
    }

    /// Whether the actor tier should be flushed after this call
    pub fn dirties_actor(&self) -> bool {
        self.actor_touched && !self.unchanged
    }

    /// Whether the use's instance tier should be flushed after this call
    pub fn dirties_use(&self) -> bool {
        self.use_touched && !self.unchanged
    }
}

/// Stack of active identities. The top frame is the current one; decks push
/// a frame per card they invoke.
#[derive(Debug, Default)]
pub struct MemoryScope {
    frames: Vec<ScopeFrame>,
}

impl MemoryScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, actor: &str, use_id: &str) {
        self.frames.push(ScopeFrame::new(actor, use_id));
    }

    pub fn exit(&mut self) -> Option<ScopeFrame> {
        self.frames.pop()
    }

    pub fn current(&self) -> Option<&ScopeFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn touch_actor(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.actor_touched = true;
        }
    }

    pub fn touch_use(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.use_touched = true;
        }
    }

    /// The current call promises it left memory as it found it
    pub fn mark_unchanged(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.unchanged = true;
        }
    }
}

/// Something that owns a [`MemoryScope`] and wants to hear about every frame
/// that is popped off it
pub trait ScopeHost {
    fn scope_mut(&mut self) -> &mut MemoryScope;
    fn on_exit(&mut self, frame: ScopeFrame);
}

/// Enters a scope frame on construction and pops it on drop, whichever way
/// the guarded call ended
pub struct ScopeGuard<'h, H: ScopeHost> {
    host: &'h mut H,
}

impl<'h, H: ScopeHost> ScopeGuard<'h, H> {
    pub fn enter(host: &'h mut H, actor: &str, use_id: &str) -> Self {
        host.scope_mut().enter(actor, use_id);
        Self { host }
    }
}

impl<H: ScopeHost> Deref for ScopeGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: ScopeHost> DerefMut for ScopeGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: ScopeHost> Drop for ScopeGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(frame) = self.host.scope_mut().exit() {
            self.host.on_exit(frame);
        }
    }
}
