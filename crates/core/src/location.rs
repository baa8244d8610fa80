//! The configured first-spawn point

use std::fmt;

use firstspawn_sdk::Location;

use crate::direction::Direction;

/// Where new players are sent. Replaced wholesale on update.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnLocation {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Preferred facing, if any
    pub facing: Option<Direction>,
}

impl SpawnLocation {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64, facing: Option<Direction>) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            facing,
        }
    }

    /// Capture a host location, encoding its yaw as a cardinal facing
    pub fn from_location(location: &Location) -> Self {
        Self {
            world: location.world.clone(),
            x: location.x,
            y: location.y,
            z: location.z,
            facing: Direction::from_yaw(location.yaw),
        }
    }

    /// Host location to teleport to. Without a facing yaw stays 0.
    pub fn to_location(&self) -> Location {
        let yaw = self.facing.map(Direction::yaw).unwrap_or(0.0);
        Location::new(self.world.clone(), self.x, self.y, self.z).with_rotation(yaw, 0.0)
    }
}

impl fmt::Display for SpawnLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1}, {:.1}, {:.1}",
            self.world, self.x, self.y, self.z
        )?;
        if let Some(facing) = self.facing {
            write!(f, " facing {}", facing)?;
        }
        Ok(())
    }
}
