//! Volume control with mute memory
//!
//! Volume is a linear level in `[0, 1]` handed straight to the media handle.
//! Level 0 is the muted state; muting remembers the last audible level so
//! unmuting can restore it.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Current level (0.0-1.0)
    level: f64,

    /// Last non-zero level, restored by unmute
    restore_level: f64,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume, clamped to `[0, 1]`
    pub fn new(level: f64) -> Self {
        let level = Self::clamp(level);
        Self {
            level,
            restore_level: if level > 0.0 { level } else { 1.0 },
        }
    }

    /// Set volume level, clamped to `[0, 1]`
    pub fn set_level(&mut self, level: f64) {
        self.level = Self::clamp(level);
        if self.level > 0.0 {
            self.restore_level = self.level;
        }
    }

    /// Get current volume level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Level that unmuting returns to
    pub fn restore_level(&self) -> f64 {
        self.restore_level
    }

    /// Check if muted (level 0)
    pub fn is_muted(&self) -> bool {
        self.level == 0.0
    }

    /// Toggle between silence and the last audible level
    ///
    /// Returns the new level.
    pub fn toggle_mute(&mut self) -> f64 {
        self.level = if self.is_muted() {
            self.restore_level
        } else {
            0.0
        };
        self.level
    }

    fn clamp(level: f64) -> f64 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
