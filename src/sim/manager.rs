//! Round and match orchestration
//!
//! `PlayerManager` owns the roster for a match and the round state machine:
//!
//! ```text
//! Idle --init--> Ready --start_round--> Running --(≤ 1 alive)--> RoundOver
//!                  ^                       ^                        |
//!                  |                       +------start_round-------+ (continue, rounds left)
//!                  +--init (new match)                              +--> Finished (continue, no rounds left)
//! ```
//!
//! The host calls [`PlayerManager::animate`] once per rendered frame. Deaths
//! are resolved synchronously inside that call, so a round can end part-way
//! through a frame and later players in the same pass still see it.

use serde::{Deserialize, Serialize};

use super::player::{FrameContext, Player, PlayerIdentity, PlayerStep};
use super::ports::{Color, Dimensions, FpsSource, InputSource, Key, TrailSurface};
use super::rng::{RandomSource, SimRng};
use crate::scoreboard::{self, Standing};
use crate::settings::{MatchSettings, SettingsError};

/// Where the match currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// No match initialized
    Idle,
    /// Roster built, first round not started
    Ready,
    /// Round in progress
    Running,
    /// Round finished, waiting for the continue key
    RoundOver,
    /// All rounds played and acknowledged
    Finished,
}

/// Notifications delivered to the host's listener, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    PlayerDied { name: String },
    /// `round` is the number of rounds completed so far
    RoundOver { round: u32 },
    /// Continue pressed with rounds left: the host should call `start_round`
    NewRound,
    MatchFinished,
}

/// What the host should do after an `animate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextRound,
    MatchFinished,
}

/// A selectable competitor on the selection screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorSlot {
    pub identity: PlayerIdentity,
    pub ready: bool,
}

impl CompetitorSlot {
    pub fn new(identity: PlayerIdentity) -> Self {
        Self {
            identity,
            ready: false,
        }
    }
}

/// The six stock competitors, none ready
pub fn default_slots() -> Vec<CompetitorSlot> {
    let stock = [
        ("Red", Color::rgb(255, 40, 40), Key::char('1'), Key::char('q')),
        ("Yellow", Color::rgb(255, 230, 0), Key::char('z'), Key::char('x')),
        ("Orange", Color::rgb(255, 140, 0), Key::char('v'), Key::char('b')),
        ("Green", Color::rgb(0, 200, 60), Key::char('m'), Key::char(',')),
        ("Pink", Color::rgb(255, 80, 200), Key::ArrowLeft, Key::ArrowRight),
        ("Blue", Color::rgb(40, 160, 255), Key::Mouse(0), Key::Mouse(2)),
    ];
    stock
        .into_iter()
        .map(|(name, color, left, right)| {
            CompetitorSlot::new(PlayerIdentity::new(name, color, left, right))
        })
        .collect()
}

fn check_unique_names(slots: &[CompetitorSlot]) -> Result<(), SettingsError> {
    for (i, slot) in slots.iter().enumerate() {
        let name = &slot.identity.name;
        if slots[..i].iter().any(|s| &s.identity.name == name) {
            return Err(SettingsError::DuplicateName(name.clone()));
        }
    }
    Ok(())
}

pub type EventListener = Box<dyn FnMut(&MatchEvent)>;

pub struct PlayerManager<S, I, F = Option<f32>, R = SimRng> {
    surface: S,
    input: I,
    fps: F,
    rng: R,
    dims: Dimensions,
    settings: MatchSettings,
    slots: Vec<CompetitorSlot>,
    players: Vec<Player>,
    phase: MatchPhase,
    round_count: u32,
    /// Continue key state on the previous frame (edge detection)
    continue_held: bool,
    listener: Option<EventListener>,
}

impl<S, I, F, R> PlayerManager<S, I, F, R>
where
    S: TrailSurface,
    I: InputSource,
    F: FpsSource,
    R: RandomSource,
{
    /// A manager with the stock competitor slots and no match
    pub fn new(surface: S, input: I, fps: F, rng: R, dims: Dimensions) -> Self {
        Self {
            surface,
            input,
            fps,
            rng,
            dims,
            settings: MatchSettings::default(),
            slots: default_slots(),
            players: Vec::new(),
            phase: MatchPhase::Idle,
            round_count: 0,
            continue_held: false,
            listener: None,
        }
    }

    /// Replace the competitor slots; names must be unique
    pub fn with_slots(mut self, slots: Vec<CompetitorSlot>) -> Result<Self, SettingsError> {
        check_unique_names(&slots)?;
        self.slots = slots;
        Ok(self)
    }

    /// Install the event listener
    pub fn on_event(mut self, listener: impl FnMut(&MatchEvent) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Replace or remove the event listener mid-match
    pub fn set_listener(&mut self, listener: Option<EventListener>) {
        self.listener = listener;
    }

    fn emit(&mut self, event: MatchEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
    }

    /// Set up a new match from the ready slots.
    ///
    /// Competitors that were already in the previous roster keep their score.
    pub fn init(&mut self, settings: MatchSettings) {
        let previous = std::mem::take(&mut self.players);
        self.players = self
            .slots
            .iter()
            .filter(|slot| slot.ready)
            .map(|slot| {
                let mut player = Player::new(slot.identity.clone());
                if let Some(old) = previous.iter().find(|p| p.name() == slot.identity.name) {
                    player.score = old.score;
                }
                player
            })
            .collect();

        self.settings = settings;
        self.round_count = 0;
        self.phase = MatchPhase::Ready;
        log::info!(
            "Match initialized: {} players, {} rounds",
            self.players.len(),
            self.settings.max_rounds
        );
    }

    /// Clear the play area and respawn everyone. Returns false when there is
    /// no match or no rounds left to play.
    pub fn start_round(&mut self) -> bool {
        match self.phase {
            MatchPhase::Idle | MatchPhase::Finished => {
                log::warn!("start_round ignored in phase {:?}", self.phase);
                return false;
            }
            _ if self.round_count >= self.settings.max_rounds => {
                log::warn!("start_round ignored: all {} rounds played", self.round_count);
                return false;
            }
            _ => {}
        }

        self.phase = MatchPhase::Running;
        self.surface
            .clear_rect(0.0, 0.0, self.dims.play_width(), self.dims.play_height());
        for player in &mut self.players {
            player.init(&self.dims, &self.settings, &mut self.rng);
        }
        log::info!(
            "Round {} of {} started",
            self.round_count + 1,
            self.settings.max_rounds
        );
        true
    }

    /// Advance one rendered frame
    pub fn animate(&mut self) -> Option<Advance> {
        let continue_pressed = self.input.is_pressed(self.settings.continue_key);
        let rising_edge = continue_pressed && !self.continue_held;
        self.continue_held = continue_pressed;

        match self.phase {
            MatchPhase::Running => {
                self.step_players();
                None
            }
            MatchPhase::Ready | MatchPhase::RoundOver if rising_edge => {
                if self.round_count < self.settings.max_rounds {
                    self.emit(MatchEvent::NewRound);
                    Some(Advance::NextRound)
                } else {
                    self.phase = MatchPhase::Finished;
                    log::info!("Match finished after {} rounds", self.round_count);
                    self.emit(MatchEvent::MatchFinished);
                    Some(Advance::MatchFinished)
                }
            }
            _ => None,
        }
    }

    /// One in-order pass over the living players
    fn step_players(&mut self) {
        if self.players.is_empty() {
            self.check_round_over();
            return;
        }

        let fps = self.fps.current_fps();
        for idx in 0..self.players.len() {
            if self.players[idx].is_dead() {
                continue;
            }
            let mut ctx = FrameContext {
                surface: &mut self.surface,
                input: &self.input,
                rng: &mut self.rng,
                fps,
                dims: self.dims,
                settings: &self.settings,
            };
            if self.players[idx].draw(&mut ctx) == PlayerStep::Died {
                self.player_died(idx);
            }
        }
    }

    fn player_died(&mut self, idx: usize) {
        let name = self.players[idx].name().to_string();
        log::debug!("{} died on frame {}", name, self.players[idx].frame());
        if self.settings.award_survivors {
            scoreboard::award_survivors(&mut self.players, &name);
        }
        self.emit(MatchEvent::PlayerDied { name });
        self.check_round_over();
    }

    /// End the round once at most one player is left alive.
    ///
    /// Returns true only on the call that ends the round.
    pub fn check_round_over(&mut self) -> bool {
        if self.phase != MatchPhase::Running {
            return false;
        }
        let dead = self.players.iter().filter(|p| p.is_dead()).count();
        if dead < self.players.len().saturating_sub(1) {
            return false;
        }

        self.phase = MatchPhase::RoundOver;
        self.round_count += 1;
        log::info!(
            "Round {} over ({} of {} dead)",
            self.round_count,
            dead,
            self.players.len()
        );
        self.emit(MatchEvent::RoundOver {
            round: self.round_count,
        });
        true
    }

    /// Zero every score in the current roster
    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.score = 0;
        }
    }

    /// Mark a slot ready or not; false if no slot has that name
    pub fn set_ready(&mut self, name: &str, ready: bool) -> bool {
        match self.slots.iter_mut().find(|s| s.identity.name == name) {
            Some(slot) => {
                slot.ready = ready;
                true
            }
            None => false,
        }
    }

    /// Flip a slot's ready flag, returning the new value
    pub fn toggle_ready(&mut self, name: &str) -> Option<bool> {
        let slot = self.slots.iter_mut().find(|s| s.identity.name == name)?;
        slot.ready = !slot.ready;
        Some(slot.ready)
    }

    /// Takes effect at the next spawn/boundary calculation
    pub fn set_dimensions(&mut self, dims: Dimensions) {
        self.dims = dims;
    }

    pub fn standings(&self) -> Vec<Standing> {
        scoreboard::standings(&self.players)
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn max_rounds(&self) -> u32 {
        self.settings.max_rounds
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    pub fn slots(&self) -> &[CompetitorSlot] {
        &self.slots
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn fps_source_mut(&mut self) -> &mut F {
        &mut self.fps
    }
}
