//! Match settings and physics tuning
//!
//! Loaded from JSON by the host's settings screen. Every field has a default,
//! so partial documents are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Key;

/// Per-match physics shared by every player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerPhysicsConfig {
    /// Trail radius (pixels)
    pub radius: f32,
    /// Linear speed (pixels/frame at 60 fps)
    pub speed: f32,
    /// Turn rate (degrees/frame at 60 fps)
    pub turn_rate: f32,
    /// Frames of drawing between holes
    pub hole_rate: f32,
    /// Symmetric jitter applied to `hole_rate`
    pub hole_rate_rnd: f32,
    /// Frames a hole lasts
    pub hole_size: f32,
    /// Symmetric jitter applied to `hole_size`
    pub hole_size_rnd: f32,
}

impl Default for PlayerPhysicsConfig {
    fn default() -> Self {
        Self {
            radius: TRAIL_RADIUS,
            speed: SPEED,
            turn_rate: TURN_RATE,
            hole_rate: HOLE_RATE,
            hole_rate_rnd: HOLE_RATE_RND,
            hole_size: HOLE_SIZE,
            hole_size_rnd: HOLE_SIZE_RND,
        }
    }
}

impl PlayerPhysicsConfig {
    /// Check the positivity/non-negativity invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("radius", self.radius),
            ("speed", self.speed),
            ("turnRate", self.turn_rate),
            ("holeRate", self.hole_rate),
            ("holeSize", self.hole_size),
        ];
        for (field, value) in positive {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive { field });
            }
        }

        let non_negative = [
            ("holeRateRnd", self.hole_rate_rnd),
            ("holeSizeRnd", self.hole_size_rnd),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SettingsError::Negative { field });
            }
        }
        Ok(())
    }
}

/// Everything the round/match engine needs from the settings screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchSettings {
    /// Rounds per match
    pub max_rounds: u32,
    pub physics: PlayerPhysicsConfig,
    /// Frames a player stays frozen at round start
    pub start_time: u32,
    /// Frames between a detected collision and death
    pub after_die_time: u32,
    /// Half-angle of the forward collision probes (degrees)
    pub collision_tolerance: f32,
    /// Minimum spawn distance from the play-area edges (pixels)
    pub spawn_margin: f32,
    /// Key that advances past a finished round
    pub continue_key: Key,
    /// Give every survivor a point whenever someone dies
    pub award_survivors: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            physics: PlayerPhysicsConfig::default(),
            start_time: START_TIME,
            after_die_time: AFTER_DIE_TIME,
            collision_tolerance: COLLISION_TOLERANCE,
            spawn_margin: SPAWN_MARGIN,
            continue_key: Key::Space,
            award_survivors: true,
        }
    }
}

impl MatchSettings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).map_err(SettingsError::Json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Json)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default match settings");
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded match settings ({} rounds)", settings.max_rounds);
                settings
            }
            Err(e) => {
                log::warn!("Invalid match settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_rounds == 0 {
            return Err(SettingsError::ZeroRounds);
        }
        self.physics.validate()?;
        if !(self.collision_tolerance >= 0.0) {
            return Err(SettingsError::Negative {
                field: "collisionTolerance",
            });
        }
        if !(self.spawn_margin >= 0.0) {
            return Err(SettingsError::Negative {
                field: "spawnMargin",
            });
        }
        Ok(())
    }
}

/// Settings loading failures
#[derive(Debug)]
pub enum SettingsError {
    /// Malformed JSON on read, or a serializer failure on write
    Json(serde_json::Error),
    NonPositive { field: &'static str },
    Negative { field: &'static str },
    ZeroRounds,
    DuplicateName(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Json(e) => write!(f, "settings JSON error: {e}"),
            SettingsError::NonPositive { field } => write!(f, "{field} must be positive"),
            SettingsError::Negative { field } => write!(f, "{field} must not be negative"),
            SettingsError::ZeroRounds => write!(f, "a match needs at least one round"),
            SettingsError::DuplicateName(name) => {
                write!(f, "competitor name {name:?} is used twice")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(MatchSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            MatchSettings::from_json(r#"{"maxRounds": 3, "physics": {"speed": 4.5}}"#).unwrap();
        assert_eq!(settings.max_rounds, 3);
        assert_eq!(settings.physics.speed, 4.5);
        assert_eq!(settings.physics.radius, TRAIL_RADIUS);
        assert_eq!(settings.start_time, START_TIME);
        assert_eq!(settings.continue_key, Key::Space);
    }

    #[test]
    fn test_continue_key_by_name() {
        let settings = MatchSettings::from_json(r#"{"continueKey": "Enter"}"#).unwrap();
        assert_eq!(settings.continue_key, Key::Enter);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            MatchSettings::from_json(r#"{"maxRounds": 0}"#),
            Err(SettingsError::ZeroRounds)
        ));
        assert!(matches!(
            MatchSettings::from_json(r#"{"physics": {"radius": 0}}"#),
            Err(SettingsError::NonPositive { field: "radius" })
        ));
        assert!(matches!(
            MatchSettings::from_json(r#"{"physics": {"holeSizeRnd": -1}}"#),
            Err(SettingsError::Negative {
                field: "holeSizeRnd"
            })
        ));
        assert!(matches!(
            MatchSettings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let settings = MatchSettings::load_or_default(Some(r#"{"maxRounds": 0}"#));
        assert_eq!(settings, MatchSettings::default());
        assert_eq!(MatchSettings::load_or_default(None), MatchSettings::default());
    }

    #[test]
    fn test_json_roundtrip_keeps_keys() {
        let mut settings = MatchSettings::default();
        settings.continue_key = Key::Char('n');
        let json = settings.to_json().unwrap();
        assert_eq!(MatchSettings::from_json(&json).unwrap(), settings);
    }
}
