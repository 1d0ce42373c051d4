//! Light Trails - a local-multiplayer light-trail survival game
//!
//! Core modules:
//! - `sim`: Player simulation and round/match lifecycle
//! - `settings`: Data-driven match and physics tuning
//! - `scoreboard`: Survivor scoring and standings
//! - `raster`: In-memory trail surface for headless hosts and tests
//! - `fps`: Rolling frame-rate meter

pub mod fps;
pub mod raster;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use fps::FpsMeter;
pub use raster::Canvas;
pub use settings::{MatchSettings, PlayerPhysicsConfig, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame rate the per-frame speeds are tuned for
    pub const BASELINE_FPS: f32 = 60.0;
    /// Below this the FPS reading is considered unreliable (no speed scaling)
    pub const MIN_SCALING_FPS: f32 = 20.0;

    /// Trail defaults
    pub const TRAIL_RADIUS: f32 = 3.0;
    pub const SPEED: f32 = 2.0; // pixels/frame at 60 fps
    pub const TURN_RATE: f32 = 4.0; // degrees/frame at 60 fps

    /// Hole (gap) defaults, all in frames
    pub const HOLE_RATE: f32 = 150.0;
    pub const HOLE_RATE_RND: f32 = 50.0;
    pub const HOLE_SIZE: f32 = 12.0;
    pub const HOLE_SIZE_RND: f32 = 3.0;

    /// Frames a player stays frozen at round start
    pub const START_TIME: u32 = 40;
    /// Frames between a detected collision and death
    pub const AFTER_DIE_TIME: u32 = 0;
    /// Half-angle of the forward collision probes (degrees)
    pub const COLLISION_TOLERANCE: f32 = 30.0;
    /// Extra probe distance beyond the trail radius (pixels)
    pub const PROBE_PADDING: f32 = 2.0;
    /// Minimum spawn distance from the play-area edges (pixels)
    pub const SPAWN_MARGIN: f32 = 50.0;

    pub const MAX_ROUNDS: u32 = 10;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Displacement of `distance` along a heading in degrees.
///
/// Headings follow the game's axis convention: cosine drives Y and sine
/// drives X, so 0° points down the screen and 90° points right.
#[inline]
pub fn heading_offset(heading_deg: f32, distance: f32) -> Vec2 {
    let rad = heading_deg.to_radians();
    Vec2::new(distance * rad.sin(), distance * rad.cos())
}
