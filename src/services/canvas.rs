use std::path::Path;

use image::{imageops, ImageFormat, Rgba, RgbaImage};
use tracing::info;

use crate::error::CanvasError;
use crate::model::pen::{Pen, Point, Rgb, Segment};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Free-hand drawing surface. Strokes are drawn as a polyline of pointer-move samples.
pub struct Canvas {
    bitmap: RgbaImage,
    last_point: Option<Point>,
    pen: Pen,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bitmap: blank(width, height),
            last_point: None,
            pen: Pen::default(),
        }
    }

    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn set_pen_color(&mut self, color: Rgb) {
        self.pen.color = color;
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.pen.set_width(width);
    }

    /// Handles a pointer move. The first sample of a stroke only anchors it.
    pub fn pointer_move(&mut self, to: Point) -> Option<Segment> {
        let Some(from) = self.last_point.replace(to) else {
            return None;
        };

        let segment = Segment { from, to };
        self.draw_segment(segment);
        Some(segment)
    }

    /// Ends the current stroke.
    pub fn pointer_release(&mut self) {
        self.last_point = None;
    }

    pub fn new_image(&mut self) {
        let (w, h) = self.bitmap.dimensions();
        self.bitmap = blank(w, h);
        self.last_point = None;
    }

    pub fn save_png(&self, path: &Path) -> Result<(), CanvasError> {
        self.bitmap.save_with_format(path, ImageFormat::Png)?;
        info!(path = %path.display(), "canvas saved");
        Ok(())
    }

    /// Loads an image, scaled to the canvas size.
    pub fn open_png(&mut self, path: &Path) -> Result<(), CanvasError> {
        let loaded = image::open(path)?.to_rgba8();
        let (w, h) = self.bitmap.dimensions();

        self.bitmap = if loaded.dimensions() == (w, h) {
            loaded
        } else {
            imageops::resize(&loaded, w, h, imageops::FilterType::Triangle)
        };
        self.last_point = None;

        info!(path = %path.display(), "canvas opened");
        Ok(())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    #[cfg(test)]
    pub fn pixel(&self, p: Point) -> Option<Rgb> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        self.bitmap
            .get_pixel_checked(p.x as u32, p.y as u32)
            .map(|px| Rgb {
                r: px[0],
                g: px[1],
                b: px[2],
            })
    }

    /// Anti-aliased round-capped line: coverage falls off over one pixel at the pen's edge.
    fn draw_segment(&mut self, seg: Segment) {
        let (w, h) = self.bitmap.dimensions();
        let radius = self.pen.width as f32 / 2.0;
        let color = self.pen.color;

        let (ax, ay) = (seg.from.x as f32, seg.from.y as f32);
        let (bx, by) = (seg.to.x as f32, seg.to.y as f32);

        let reach = radius + 1.0;
        let x0 = (ax.min(bx) - reach).floor().max(0.0) as u32;
        let y0 = (ay.min(by) - reach).floor().max(0.0) as u32;
        let x1 = (ax.max(bx) + reach).ceil().min(w as f32 - 1.0);
        let y1 = (ay.max(by) + reach).ceil().min(h as f32 - 1.0);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let (x1, y1) = (x1 as u32, y1 as u32);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = distance_to_segment(x as f32, y as f32, ax, ay, bx, by);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend(self.bitmap.get_pixel_mut(x, y), color, coverage);
                }
            }
        }
    }
}

fn blank(width: u32, height: u32) -> RgbaImage {
    let Rgb { r, g, b } = Rgb::WHITE;
    RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]))
}

fn distance_to_segment(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

fn blend(dst: &mut Rgba<u8>, src: Rgb, alpha: f32) {
    let mix = |s: u8, d: u8| (s as f32 * alpha + d as f32 * (1.0 - alpha)).round() as u8;
    dst.0 = [mix(src.r, dst[0]), mix(src.g, dst[1]), mix(src.b, dst[2]), 255];
}
