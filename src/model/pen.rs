use serde::{Deserialize, Serialize};

pub const DEFAULT_PEN_WIDTH: u32 = 4;
pub const MIN_PEN_WIDTH: u32 = 10;
pub const MAX_PEN_WIDTH: u32 = 30;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Pixel position on the canvas. Pointer coordinates are truncated to whole pixels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[cfg(test)]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_pointer(x: f64, y: f64) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub color: Rgb,
    pub width: u32,
}

impl Default for Pen {
    fn default() -> Self {
        Pen {
            color: Rgb::BLACK,
            width: DEFAULT_PEN_WIDTH,
        }
    }
}

impl Pen {
    /// Width as chosen on the toolbar slider.
    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb { r: 255, g: 128, b: 0 }));
        assert_eq!(Rgb::from_hex("00FF00"), Some(Rgb { r: 0, g: 255, b: 0 }));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(Rgb { r: 1, g: 2, b: 255 }.to_hex(), "#0102ff");
    }

    #[test]
    fn test_pen_width_clamped_to_slider() {
        let mut pen = Pen::default();
        assert_eq!(pen.width, DEFAULT_PEN_WIDTH);

        pen.set_width(2);
        assert_eq!(pen.width, MIN_PEN_WIDTH);
        pen.set_width(25);
        assert_eq!(pen.width, 25);
        pen.set_width(99);
        assert_eq!(pen.width, MAX_PEN_WIDTH);
    }

    #[test]
    fn test_pointer_truncation() {
        assert_eq!(Point::from_pointer(10.9, 3.2), Point::new(10, 3));
    }
}
