//! Boundary contracts between the simulation and its host
//!
//! The host owns the raster, the key table and the frame-rate reading; the
//! simulation only ever reaches them through these traits.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logical key/button vocabulary polled through [`InputSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A printable key, stored lowercase
    Char(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    /// Mouse button by index (0 = primary)
    Mouse(u8),
}

impl Key {
    /// Character key, lowercased. The space bar is always `Key::Space`.
    pub fn char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            c => Key::Char(c.to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::Space => f.write_str("Space"),
            Key::Enter => f.write_str("Enter"),
            Key::Mouse(n) => write!(f, "Mouse{n}"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::char(c));
        }

        match s {
            "ArrowLeft" => Ok(Key::ArrowLeft),
            "ArrowRight" => Ok(Key::ArrowRight),
            "ArrowUp" => Ok(Key::ArrowUp),
            "ArrowDown" => Ok(Key::ArrowDown),
            "Space" => Ok(Key::Space),
            "Enter" => Ok(Key::Enter),
            _ => s
                .strip_prefix("Mouse")
                .and_then(|n| n.parse().ok())
                .map(Key::Mouse)
                .ok_or_else(|| format!("unknown key {s:?}")),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// Opaque trail colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A pixel read back from the trail surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }

    /// Background test: alpha is ignored
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl From<Color> for Rgba {
    fn from(c: Color) -> Self {
        Self::opaque(c)
    }
}

/// Play-area geometry, re-read on every spawn and boundary calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    /// Strip reserved for the scoreboard on the right edge
    pub score_area_width: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32, score_area_width: f32) -> Self {
        Self {
            width,
            height,
            score_area_width,
        }
    }

    /// Width available to the players
    pub fn play_width(&self) -> f32 {
        self.width - self.score_area_width
    }

    pub fn play_height(&self) -> f32 {
        self.height
    }

    /// Whether (x, y) lies inside the play rectangle (edges included)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x <= self.play_width() && y <= self.play_height()
    }
}

/// The raster every trail is drawn into and sampled from
pub trait TrailSurface {
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn read_pixel(&self, x: i32, y: i32) -> Rgba;
}

impl<T: TrailSurface + ?Sized> TrailSurface for &mut T {
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        (**self).fill_circle(x, y, radius, color);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        (**self).clear_rect(x, y, width, height);
    }

    fn read_pixel(&self, x: i32, y: i32) -> Rgba {
        (**self).read_pixel(x, y)
    }
}

/// Poll-based key state
pub trait InputSource {
    fn is_pressed(&self, key: Key) -> bool;
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn is_pressed(&self, key: Key) -> bool {
        (**self).is_pressed(key)
    }
}

/// Current frame-rate reading, `None` while unknown
pub trait FpsSource {
    fn current_fps(&self) -> Option<f32>;
}

impl FpsSource for Option<f32> {
    fn current_fps(&self) -> Option<f32> {
        *self
    }
}

impl<T: FpsSource + ?Sized> FpsSource for &T {
    fn current_fps(&self) -> Option<f32> {
        (**self).current_fps()
    }
}

/// Host-side key table fed by key-down/key-up events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Drop every held key (e.g. on window blur)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl InputSource for KeyState {
    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!("ArrowLeft".parse::<Key>(), Ok(Key::ArrowLeft));
        assert_eq!("Q".parse::<Key>(), Ok(Key::Char('q')));
        assert_eq!(" ".parse::<Key>(), Ok(Key::Space));
        assert_eq!("Mouse2".parse::<Key>(), Ok(Key::Mouse(2)));
        assert!("Hyper".parse::<Key>().is_err());
        assert_eq!(Key::Mouse(0).to_string(), "Mouse0");
    }

    #[test]
    fn test_space_char_is_space_key() {
        let key = Key::char(' ');
        assert_eq!(key, Key::Space);
        assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        assert_eq!(String::from(key), "Space");
        for c in ['a', 'Z', '1', ','] {
            let key = Key::char(c);
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_key_state() {
        let mut keys = KeyState::new();
        keys.press(Key::char('a'));
        assert!(keys.is_pressed(Key::Char('a')));
        assert!(!keys.is_pressed(Key::Char('b')));
        keys.set(Key::Char('a'), false);
        assert!(!keys.is_pressed(Key::Char('a')));
    }

    #[test]
    fn test_rgba_black_ignores_alpha() {
        let transparent = Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        };
        assert!(transparent.is_black());
        assert!(!Rgba::from(Color::rgb(0, 0, 1)).is_black());
    }

    #[test]
    fn test_dimensions_play_rect() {
        let dims = Dimensions::new(800.0, 600.0, 200.0);
        assert_eq!(dims.play_width(), 600.0);
        assert!(dims.contains(600.0, 600.0));
        assert!(!dims.contains(600.5, 10.0));
        assert!(!dims.contains(10.0, -0.1));
    }
}
