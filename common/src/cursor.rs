use bevy_ecs::prelude::Resource;

// ============================================================================
// Cursor Lock
// ============================================================================

/// Whether the platform cursor is captured by the game.
///
/// Locked means confined and hidden, free means released and visible. There are no other states.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorLock {
    locked: bool,
}

impl CursorLock {
    #[must_use]
    pub const fn locked() -> Self {
        Self { locked: true }
    }

    #[must_use]
    pub const fn free() -> Self {
        Self { locked: false }
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub const fn cursor_visible(&self) -> bool {
        !self.locked
    }

    pub const fn lock(&mut self) {
        self.locked = true;
    }

    pub const fn unlock(&mut self) {
        self.locked = false;
    }

    /// Flip the lock and return the new state.
    pub const fn toggle(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }
}
