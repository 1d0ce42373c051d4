//! In-memory RGBA raster
//!
//! A software [`TrailSurface`] for headless hosts and tests. Background is
//! opaque black; reads outside the raster also return black.

use crate::sim::{Color, Rgba, TrailSurface};

const BACKGROUND: Rgba = Rgba::opaque(Color::BLACK);

#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Number of non-background pixels
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_black()).count()
    }

    /// Clamp a pixel span [start, end) to [0, limit]
    fn span(start: f32, end: f32, limit: u32) -> (i32, i32) {
        let lo = start.floor().max(0.0) as i32;
        let hi = end.ceil().min(limit as f32) as i32;
        (lo, hi)
    }
}

impl TrailSurface for Canvas {
    /// Fills every pixel whose centre lies within `radius` of (x, y)
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        if !(radius > 0.0) {
            return;
        }
        let (x0, x1) = Self::span(x - radius, x + radius, self.width);
        let (y0, y1) = Self::span(y - radius, y + radius, self.height);
        let r2 = radius * radius;
        let rgba = Rgba::from(color);

        for py in y0..y1 {
            let dy = py as f32 + 0.5 - y;
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - x;
                if dx * dx + dy * dy <= r2 {
                    if let Some(i) = self.index(px, py) {
                        self.pixels[i] = rgba;
                    }
                }
            }
        }
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (x0, x1) = Self::span(x, x + width, self.width);
        let (y0, y1) = Self::span(y, y + height, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                if let Some(i) = self.index(px, py) {
                    self.pixels[i] = BACKGROUND;
                }
            }
        }
    }

    fn read_pixel(&self, x: i32, y: i32) -> Rgba {
        self.index(x, y).map(|i| self.pixels[i]).unwrap_or(BACKGROUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_starts_black() {
        let canvas = Canvas::new(16, 12);
        assert_eq!((canvas.width(), canvas.height()), (16, 12));
        assert_eq!(canvas.painted_pixels(), 0);
        assert_eq!(canvas.read_pixel(5, 5), Rgba::from(Color::BLACK));
        assert_eq!(canvas.read_pixel(15, 11).a, 255);
    }

    #[test]
    fn test_fill_circle() {
        let mut canvas = Canvas::new(32, 32);
        canvas.fill_circle(16.0, 16.0, 3.0, RED);
        assert_eq!(canvas.read_pixel(16, 16), Rgba::from(RED));
        assert!(canvas.read_pixel(16, 20).is_black());
        assert!(canvas.read_pixel(0, 0).is_black());
        // Roughly pi * r^2
        let painted = canvas.painted_pixels();
        assert!((24..=32).contains(&painted), "painted {painted}");
    }

    #[test]
    fn test_fill_circle_clipped_at_edges() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_circle(0.0, 0.0, 4.0, RED);
        canvas.fill_circle(-50.0, -50.0, 4.0, RED);
        assert!(!canvas.read_pixel(0, 0).is_black());
        assert!(canvas.painted_pixels() < 20);
    }

    #[test]
    fn test_clear_rect() {
        let mut canvas = Canvas::new(32, 32);
        canvas.fill_circle(8.0, 8.0, 4.0, RED);
        canvas.fill_circle(24.0, 24.0, 4.0, RED);
        canvas.clear_rect(0.0, 0.0, 16.0, 16.0);
        assert_eq!(canvas.read_pixel(8, 8), Rgba::opaque(Color::BLACK));
        assert!(!canvas.read_pixel(24, 24).is_black());
    }

    #[test]
    fn test_out_of_range_reads_black() {
        let canvas = Canvas::new(4, 4);
        assert!(canvas.read_pixel(-1, 0).is_black());
        assert!(canvas.read_pixel(4, 0).is_black());
    }
}
