//! Player simulation and round lifecycle
//!
//! All gameplay logic lives here:
//! - Frame-driven only: nothing advances outside `PlayerManager::animate`
//! - Injected randomness only
//! - Stable iteration order (roster order)
//! - Raster, input and frame rate reached only through the `ports` traits

pub mod collision;
pub mod holes;
pub mod manager;
pub mod player;
pub mod ports;
pub mod rng;

pub use collision::CollisionKind;
pub use holes::HoleTimer;
pub use manager::{
    Advance, CompetitorSlot, EventListener, MatchEvent, MatchPhase, PlayerManager, default_slots,
};
pub use player::{FrameContext, Player, PlayerIdentity, PlayerStep, fps_scale};
pub use ports::{
    Color, Dimensions, FpsSource, InputSource, Key, KeyState, Rgba, TrailSurface,
};
pub use rng::{RandomSource, SequenceRng, SimRng};
