// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Cross-frame wrist motion tracking.

/// Remembers the wrist x of the last hand-bearing frame.
///
/// The tracker is either *tracking* (a previous position is known) or
/// *reset* (none is known). Losing the hand resets it, so the first frame
/// after a gap always reports zero movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionTracker {
    previous_x: Option<f32>,
}

impl MotionTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { previous_x: None }
    }

    /// Wrist x of the previous hand-bearing frame.
    #[must_use]
    pub const fn previous_x(&self) -> Option<f32> {
        self.previous_x
    }

    /// Record the wrist x of the current hand-bearing frame.
    ///
    /// Movement itself is derived with the rest of the frame's features.
    pub fn update(&mut self, wrist_x: f32) {
        self.previous_x = Some(wrist_x);
    }

    /// Forget the previous position.
    pub fn reset(&mut self) {
        self.previous_x = None;
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.previous_x.is_some()
    }
}
