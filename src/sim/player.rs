//! A single competitor: motion, trail rendering and death detection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{self, CollisionKind};
use super::holes::HoleTimer;
use super::ports::{Color, Dimensions, InputSource, Key, TrailSurface};
use super::rng::RandomSource;
use crate::consts::{BASELINE_FPS, MIN_SCALING_FPS};
use crate::settings::MatchSettings;
use crate::{heading_offset, normalize_degrees};

/// Frames at the start of the startup grace window that still render the spawn point
pub const SPAWN_PREVIEW_FRAMES: u32 = 2;

/// Who a player is: fixed for the whole match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub name: String,
    pub color: Color,
    /// Turns toward increasing heading
    pub turn_positive: Key,
    /// Turns toward decreasing heading
    pub turn_negative: Key,
}

impl PlayerIdentity {
    pub fn new(
        name: impl Into<String>,
        color: Color,
        turn_positive: Key,
        turn_negative: Key,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            turn_positive,
            turn_negative,
        }
    }
}

/// Everything a player touches during one frame
pub struct FrameContext<'a> {
    pub surface: &'a mut dyn TrailSurface,
    pub input: &'a dyn InputSource,
    pub rng: &'a mut dyn RandomSource,
    /// Externally measured frame rate, if known
    pub fps: Option<f32>,
    pub dims: Dimensions,
    pub settings: &'a MatchSettings,
}

/// What a call to [`Player::draw`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    /// Frozen in the startup grace window
    Waiting,
    /// Moved this frame (possibly while dying)
    Moved,
    /// Became dead this frame
    Died,
    /// Already dead, nothing happened
    Dead,
}

/// Speed multiplier keeping apparent motion constant across refresh rates
#[inline]
pub fn fps_scale(fps: Option<f32>) -> f32 {
    match fps {
        Some(fps) if fps > MIN_SCALING_FPS => BASELINE_FPS / fps,
        _ => 1.0,
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    identity: PlayerIdentity,
    /// Cumulative match score
    pub score: u32,
    pos: Vec2,
    /// Degrees
    heading: f32,
    /// Frames drawn this round
    frame: u32,
    dying: bool,
    dead: bool,
    after_die_frames: u32,
    holes: HoleTimer,
}

impl Player {
    /// A new competitor; call [`Player::init`] before the first round
    pub fn new(identity: PlayerIdentity) -> Self {
        Self {
            identity,
            score: 0,
            pos: Vec2::ZERO,
            heading: 0.0,
            frame: 0,
            dying: false,
            dead: false,
            after_die_frames: 0,
            holes: HoleTimer::default(),
        }
    }

    /// Reset all per-round state: spawn point, heading, timers and life flags
    pub fn init(
        &mut self,
        dims: &Dimensions,
        settings: &MatchSettings,
        rng: &mut (impl RandomSource + ?Sized),
    ) {
        let margin = settings.spawn_margin;
        let x = margin + rng.next_f32() * (dims.play_width() - 2.0 * margin);
        let y = margin + rng.next_f32() * (dims.play_height() - 2.0 * margin);
        self.pos = Vec2::new(x, y);
        self.heading = normalize_degrees(rng.next_f32() * 360.0);

        self.frame = 0;
        self.dying = false;
        self.dead = false;
        self.after_die_frames = 0;
        self.holes = HoleTimer::new(&settings.physics, rng);
    }

    /// Advance one rendered frame
    pub fn draw(&mut self, ctx: &mut FrameContext<'_>) -> PlayerStep {
        if self.dead {
            return PlayerStep::Dead;
        }
        let settings = ctx.settings;
        let physics = &settings.physics;

        self.frame += 1;
        if self.frame < settings.start_time {
            // Show the spawn point before motion begins
            if self.frame <= SPAWN_PREVIEW_FRAMES {
                self.render(&mut *ctx.surface, physics.radius);
            }
            return PlayerStep::Waiting;
        }

        if self.dying {
            self.after_die_frames += 1;
            if self.after_die_frames > settings.after_die_time {
                self.dead = true;
                return PlayerStep::Died;
            }
        }

        let scale = fps_scale(ctx.fps);
        let speed = physics.speed * scale;
        let turn_rate = physics.turn_rate * scale;

        if ctx.input.is_pressed(self.identity.turn_positive) {
            self.heading = normalize_degrees(self.heading + turn_rate);
        } else if ctx.input.is_pressed(self.identity.turn_negative) {
            self.heading = normalize_degrees(self.heading - turn_rate);
        }

        self.pos += heading_offset(self.heading, speed);

        // Walls are evaluated even inside a hole; trails are not
        let hit_wall = collision::out_of_bounds(self.pos, &ctx.dims);
        if self.holes.advance(physics, &mut *ctx.rng) {
            if hit_wall {
                self.dying = true;
            }
        } else {
            if self.is_colliding(&*ctx.surface, &ctx.dims, settings).is_some() {
                self.dying = true;
            }
            self.render(&mut *ctx.surface, physics.radius);
        }

        PlayerStep::Moved
    }

    /// Bounds check followed by the two forward pixel probes
    pub fn is_colliding(
        &self,
        surface: &(impl TrailSurface + ?Sized),
        dims: &Dimensions,
        settings: &MatchSettings,
    ) -> Option<CollisionKind> {
        collision::detect(
            surface,
            dims,
            self.pos,
            self.heading,
            settings.collision_tolerance,
            settings.physics.radius,
        )
    }

    fn render(&self, surface: &mut (impl TrailSurface + ?Sized), radius: f32) {
        surface.fill_circle(self.pos.x, self.pos.y, radius, self.identity.color);
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Heading in degrees, [0, 360)
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn in_hole(&self) -> bool {
        self.holes.in_hole()
    }

    pub fn is_dying(&self) -> bool {
        self.dying
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    #[cfg(test)]
    pub(crate) fn kill_for_test(&mut self) {
        self.dying = true;
        self.dead = true;
    }
}
