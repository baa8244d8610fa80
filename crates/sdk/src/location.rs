//! Position in a world, as the host reports it

use std::fmt;

/// A point in a named world with a facing.
///
/// `yaw` follows the host convention: 0 faces south, 90 west, 180 north,
/// 270 (or -90) east. Hosts may report yaw anywhere in `-180..=360`.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Name of the world this location belongs to
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Horizontal rotation in degrees
    pub yaw: f32,
    /// Vertical rotation in degrees
    pub pitch: f32,
}

impl Location {
    /// Create a location with zero rotation
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Set yaw and pitch
    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Block coordinates containing this point
    pub fn block(&self) -> (i64, i64, i64) {
        (
            self.x.floor() as i64,
            self.y.floor() as i64,
            self.z.floor() as i64,
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1}, {:.1}, {:.1}",
            self.world, self.x, self.y, self.z
        )
    }
}
