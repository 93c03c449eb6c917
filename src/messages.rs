// Message types for the command topic

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Latest motion state shared between the key reader and the publish loop.
///
/// Direction components are always in {-1, 0, 1}; speed and turn are
/// non-negative and clamped to the configured limits by the interpreter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub th: i8,
    pub speed: f64,
    pub turn: f64,
}

impl MotionState {
    /// True when all direction components are zero
    pub fn is_stopped(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0 && self.th == 0
    }

    /// Direction reset to zero, speed/turn kept
    pub fn halted(self) -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            th: 0,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Outbound velocity command, built fresh for every tick
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl From<&MotionState> for Twist {
    fn from(s: &MotionState) -> Self {
        Self {
            linear: Vector3 {
                x: f64::from(s.x) * s.speed,
                y: f64::from(s.y) * s.speed,
                z: f64::from(s.z) * s.speed,
            },
            angular: Vector3 {
                x: 0.0,
                y: 0.0,
                z: f64::from(s.th) * s.turn,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Stamp {
    pub sec: u64,
    pub nanosec: u32,
}

impl Stamp {
    /// Wall-clock time of construction
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            sec: elapsed.as_secs(),
            nanosec: elapsed.subsec_nanos(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Header {
    pub stamp: Stamp,
    pub frame_id: String,
}

/// Command wrapped in a timestamp/frame-id envelope (opt-in via config)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TwistStamped {
    pub header: Header,
    pub twist: Twist,
}

impl TwistStamped {
    pub fn new(twist: Twist, frame_id: String) -> Self {
        Self {
            header: Header {
                stamp: Stamp::now(),
                frame_id,
            },
            twist,
        }
    }
}
