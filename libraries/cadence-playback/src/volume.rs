//! Volume control
//!
//! Linear volume in `0.0..=1.0`, the range an audio element accepts
//! directly. Mute keeps the level so unmuting restores it.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (clamped to 0.0-1.0)
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::clamp(level).unwrap_or(1.0),
            muted: false,
        }
    }

    /// Set volume level
    ///
    /// Values outside 0.0-1.0 are clamped, NaN is ignored. Raising the level
    /// above zero while muted unmutes.
    pub fn set_level(&mut self, level: f32) {
        let Some(level) = Self::clamp(level) else {
            return;
        };

        self.level = level;
        if level > 0.0 {
            self.muted = false;
        }
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective output level
    ///
    /// Returns 0.0 if muted, otherwise the level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn clamp(level: f32) -> Option<f32> {
        if level.is_nan() {
            None
        } else {
            Some(level.clamp(0.0, 1.0))
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
