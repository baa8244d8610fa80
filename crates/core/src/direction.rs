//! Cardinal facing codec
//!
//! Maps a yaw angle to one of four cardinal labels and back. The mapping is
//! many-to-one: every angle in a 90 degree sector encodes to the same label,
//! and a label decodes to the sector's representative angle. Decoding an
//! encoded angle is therefore lossy, but re-encoding it is stable.
//!
//! Sectors (half-open, after normalising yaw into `[0, 360)`):
//!
//! | label | yaw range | representative |
//! |-------|-----------|----------------|
//! | SOUTH | `[315, 360) ∪ [0, 45)` | 0 |
//! | WEST  | `[45, 135)`  | 90 |
//! | NORTH | `[135, 225)` | 180 |
//! | EAST  | `[225, 315)` | 270 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label that is not one of NORTH, EAST, SOUTH, WEST
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid direction: '{0}' (expected NORTH, EAST, SOUTH or WEST)")]
pub struct InvalidDirection(pub String);

/// Cardinal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four labels
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Label of the sector containing `yaw`.
    ///
    /// Any finite yaw is normalised into `[0, 360)` first, so host yaws in
    /// `-180..180` work. Returns `None` only for NaN or infinite input.
    pub fn from_yaw(yaw: f32) -> Option<Self> {
        if !yaw.is_finite() {
            return None;
        }
        let yaw = yaw.rem_euclid(360.0);

        if (135.0..225.0).contains(&yaw) {
            Some(Self::North)
        } else if (225.0..315.0).contains(&yaw) {
            Some(Self::East)
        } else if yaw >= 315.0 || yaw < 45.0 {
            Some(Self::South)
        } else if (45.0..135.0).contains(&yaw) {
            Some(Self::West)
        } else {
            None
        }
    }

    /// Representative yaw of this label
    pub fn yaw(self) -> f32 {
        match self {
            Self::North => 180.0,
            Self::East => 270.0,
            Self::South => 0.0,
            Self::West => 90.0,
        }
    }

    /// Upper-case label as persisted
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORTH" => Ok(Self::North),
            "EAST" => Ok(Self::East),
            "SOUTH" => Ok(Self::South),
            "WEST" => Ok(Self::West),
            _ => Err(InvalidDirection(s.to_string())),
        }
    }
}

/// Label for `yaw`, or `None` when there is no preferred facing
pub fn label_from_angle(yaw: f32) -> Option<Direction> {
    Direction::from_yaw(yaw)
}

/// Representative yaw for a persisted label
pub fn angle_from_label(label: &str) -> Result<f32, InvalidDirection> {
    label.parse::<Direction>().map(Direction::yaw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_labels() {
        for yaw in [0.0, 10.0, 44.999, 315.0, 330.0, 359.9, 360.0] {
            assert_eq!(label_from_angle(yaw), Some(Direction::South), "yaw {}", yaw);
        }
        for yaw in [45.0, 90.0, 134.9] {
            assert_eq!(label_from_angle(yaw), Some(Direction::West), "yaw {}", yaw);
        }
        for yaw in [135.0, 180.0, 224.9] {
            assert_eq!(label_from_angle(yaw), Some(Direction::North), "yaw {}", yaw);
        }
        for yaw in [225.0, 270.0, 314.9] {
            assert_eq!(label_from_angle(yaw), Some(Direction::East), "yaw {}", yaw);
        }
    }

    #[test]
    fn test_boundaries_belong_to_upper_sector() {
        assert_eq!(label_from_angle(45.0), Some(Direction::West));
        assert_eq!(label_from_angle(44.999), Some(Direction::South));
        assert_eq!(label_from_angle(135.0), Some(Direction::North));
        assert_eq!(label_from_angle(225.0), Some(Direction::East));
        assert_eq!(label_from_angle(315.0), Some(Direction::South));
    }

    #[test]
    fn test_negative_yaw_normalised() {
        assert_eq!(label_from_angle(-90.0), Some(Direction::East));
        assert_eq!(label_from_angle(-180.0), Some(Direction::North));
        assert_eq!(label_from_angle(-1.0), Some(Direction::South));
        assert_eq!(label_from_angle(720.0 + 90.0), Some(Direction::West));
    }

    #[test]
    fn test_non_finite_yaw_has_no_label() {
        assert_eq!(label_from_angle(f32::NAN), None);
        assert_eq!(label_from_angle(f32::INFINITY), None);
    }

    #[test]
    fn test_angle_from_label() {
        assert_eq!(angle_from_label("NORTH"), Ok(180.0));
        assert_eq!(angle_from_label("east"), Ok(270.0));
        assert_eq!(angle_from_label("South"), Ok(0.0));
        assert_eq!(angle_from_label("WEST"), Ok(90.0));
        assert_eq!(
            angle_from_label("UP"),
            Err(InvalidDirection("UP".to_string()))
        );
        assert!(angle_from_label("").is_err());
    }

    #[test]
    fn test_encoding_is_lossy_but_stable() {
        for yaw in [12.5_f32, 100.0, 200.0, 300.0, -30.0] {
            let label = label_from_angle(yaw).unwrap();
            let representative = label.yaw();
            // Lossy: the representative differs from most inputs
            assert_eq!(label_from_angle(representative), Some(label));
            // Stable: a second round trip changes nothing
            assert_eq!(label_from_angle(representative).unwrap().yaw(), representative);
        }
        assert_ne!(label_from_angle(12.5).unwrap().yaw(), 12.5);
    }

    #[test]
    fn test_display_and_serde_labels() {
        assert_eq!(Direction::North.to_string(), "NORTH");
        let json = serde_json::to_string(&Direction::West).unwrap();
        assert_eq!(json, "\"WEST\"");
        for d in Direction::ALL {
            assert_eq!(d.as_str().parse::<Direction>(), Ok(d));
        }
    }
}
