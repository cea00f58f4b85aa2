use serde::{Deserialize, Serialize};

/// Volume snapshot carried by volume change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeState {
    pub volume: f64,
    pub muted: bool,
}

impl Default for VolumeState {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
        }
    }
}

/// Clamps a volume level to `[0.0, 1.0]`. NaN maps to silence.
pub fn clamp_volume(level: f64) -> f64 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
