use crate::config::Edge;
use crate::constants::{HIGH_RES_HEIGHT, HIGH_RES_WIDTH, LOW_RES_HEIGHT, LOW_RES_WIDTH};

/// Display modes; CHIP-8 programs run in `Low`, SCHIP programs may switch to `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 64x32
    Low,
    /// 128x64
    High,
}

impl Resolution {
    /// `(width, height)` in pixels.
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Resolution::Low => (LOW_RES_WIDTH, LOW_RES_HEIGHT),
            Resolution::High => (HIGH_RES_WIDTH, HIGH_RES_HEIGHT),
        }
    }
}

/// # FrameBuffer
/// The on/off state of every pixel on the display, stored row by row.
///
/// `dirty` is raised whenever a pixel changes (and on clear / resize) and stays raised
/// until the presentation layer has drawn the frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    resolution: Resolution,
    width: usize,
    height: usize,
    pixels: Vec<bool>,
    dirty: bool,
}

impl FrameBuffer {
    pub fn new(resolution: Resolution) -> Self {
        let (width, height) = resolution.dimensions();
        FrameBuffer {
            resolution,
            width,
            height,
            pixels: vec![false; width * height],
            dirty: true,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels outside the display are never lit.
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(self.width)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Turns every pixel off. Always marks the frame dirty.
    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = false);
        self.dirty = true;
    }

    /// Reallocates the display at `resolution`, blank.
    pub fn set_resolution(&mut self, resolution: Resolution) {
        *self = FrameBuffer::new(resolution);
    }

    /// XORs a sprite onto the display with its top left corner at `(x, y)`.
    ///
    /// Each row of the sprite is `bytes_per_row` bytes wide, most significant bit leftmost.
    /// The origin always wraps onto the display; pixels beyond the right and bottom edges are
    /// clipped or wrapped according to `edge`.
    ///
    /// Returns whether any lit pixel was turned off.
    pub fn draw_sprite(
        &mut self,
        x: u8,
        y: u8,
        sprite: &[u8],
        bytes_per_row: usize,
        edge: Edge,
    ) -> bool {
        let x0 = x as usize % self.width;
        let y0 = y as usize % self.height;
        let mut collided = false;
        let mut changed = false;

        for (row, bytes) in sprite.chunks(bytes_per_row).enumerate() {
            let py = match (y0 + row, edge) {
                (py, _) if py < self.height => py,
                (_, Edge::Clip) => break,
                (py, Edge::Wrap) => py % self.height,
            };
            for col in 0..bytes.len() * 8 {
                if (bytes[col / 8] >> (7 - col % 8)) & 1 == 0 {
                    continue;
                }
                let px = match (x0 + col, edge) {
                    (px, _) if px < self.width => px,
                    (_, Edge::Clip) => break,
                    (px, Edge::Wrap) => px % self.width,
                };
                let pixel = &mut self.pixels[py * self.width + px];
                collided |= *pixel;
                *pixel ^= true;
                changed = true;
            }
        }

        self.dirty |= changed;
        collided
    }
}

#[cfg(test)]
mod test_frame_buffer {
    use super::*;

    fn clean(resolution: Resolution) -> FrameBuffer {
        let mut frame = FrameBuffer::new(resolution);
        frame.mark_clean();
        frame
    }

    fn lit(frame: &FrameBuffer) -> usize {
        frame.rows().flatten().filter(|&&pixel| pixel).count()
    }

    #[test]
    fn test_dimensions() {
        let frame = FrameBuffer::new(Resolution::High);
        assert_eq!((frame.width(), frame.height()), (128, 64));
        assert_eq!(frame.rows().count(), 64);
    }

    #[test]
    fn test_draws_sprite() {
        let mut frame = clean(Resolution::Low);
        // 1100 0011
        let collided = frame.draw_sprite(1, 2, &[0xC3], 1, Edge::Clip);
        assert!(!collided);
        assert!(frame.is_dirty());
        assert!(frame.is_lit(1, 2) && frame.is_lit(2, 2));
        assert!(!frame.is_lit(3, 2));
        assert!(frame.is_lit(7, 2) && frame.is_lit(8, 2));
        assert_eq!(lit(&frame), 4);
    }

    #[test]
    fn test_redraw_erases_and_collides() {
        let mut frame = clean(Resolution::Low);
        assert!(!frame.draw_sprite(10, 10, &[0xFF, 0x81], 1, Edge::Clip));
        assert!(frame.draw_sprite(10, 10, &[0xFF, 0x81], 1, Edge::Clip));
        assert_eq!(lit(&frame), 0);
    }

    #[test]
    fn test_blank_sprite_leaves_frame_clean() {
        let mut frame = clean(Resolution::Low);
        assert!(!frame.draw_sprite(0, 0, &[0x00, 0x00], 1, Edge::Clip));
        assert!(!frame.is_dirty());
    }

    #[test]
    fn test_origin_wraps() {
        let mut frame = clean(Resolution::Low);
        frame.draw_sprite(64 + 3, 32 + 4, &[0x80], 1, Edge::Clip);
        assert!(frame.is_lit(3, 4));
    }

    #[test]
    fn test_clips_at_edges() {
        let mut frame = clean(Resolution::Low);
        frame.draw_sprite(60, 30, &[0xFF, 0xFF, 0xFF, 0xFF], 1, Edge::Clip);
        // 4 columns x 2 rows fit on screen
        assert_eq!(lit(&frame), 8);
        assert!(!frame.is_lit(0, 30));
        assert!(!frame.is_lit(60, 0));
    }

    #[test]
    fn test_wraps_at_edges() {
        let mut frame = clean(Resolution::Low);
        frame.draw_sprite(60, 30, &[0xFF, 0xFF, 0xFF, 0xFF], 1, Edge::Wrap);
        assert_eq!(lit(&frame), 32);
        assert!(frame.is_lit(0, 30));
        assert!(frame.is_lit(3, 1));
        assert!(frame.is_lit(60, 0));
    }

    #[test]
    fn test_draws_wide_sprite() {
        let mut frame = clean(Resolution::High);
        frame.draw_sprite(0, 0, &[0x80, 0x01], 2, Edge::Clip);
        assert!(frame.is_lit(0, 0));
        assert!(frame.is_lit(15, 0));
        assert_eq!(lit(&frame), 2);
    }

    #[test]
    fn test_clear_marks_dirty() {
        let mut frame = clean(Resolution::Low);
        frame.clear();
        assert!(frame.is_dirty());
        assert_eq!(lit(&frame), 0);
    }

    #[test]
    fn test_set_resolution_reallocates() {
        let mut frame = clean(Resolution::Low);
        frame.draw_sprite(0, 0, &[0xFF], 1, Edge::Clip);
        frame.set_resolution(Resolution::High);
        assert_eq!(frame.resolution(), Resolution::High);
        assert_eq!(frame.width(), 128);
        assert_eq!(lit(&frame), 0);
        assert!(frame.is_dirty());
    }
}
