use std::error::Error;

use log::debug;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use teal8_core::constants::{LOW_RES_HEIGHT, LOW_RES_WIDTH};
use teal8_core::FrameBuffer;

const SCALE: u32 = 10;

/// RGB24 texture bytes per pixel.
const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels; SCHIP programs may switch it to
/// 128x64. The window keeps its size and high resolution frames are drawn at half the scale.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    pub fn new(sdl: &sdl2::Sdl, title: &str) -> Result<Self, Box<dyn Error>> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                title,
                LOW_RES_WIDTH as u32 * SCALE,
                LOW_RES_HEIGHT as u32 * SCALE,
            )
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().build()?;
        debug!("opened {}x scale window", SCALE);

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each pixel to represent its RGB values
    /// - Mapping lit pixels to full intensity and unlit ones to 0
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .flatten()
            .flat_map(|&lit| std::iter::repeat(if lit { 255 } else { 0 }).take(BYTES_PER_PIXEL))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), Box<dyn Error>> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            frame.width() as u32,
            frame.height() as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        let row_len = frame.width() * BYTES_PER_PIXEL;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, source) in buffer.chunks_mut(pitch).zip(pixels.chunks(row_len)) {
                row[..row_len].copy_from_slice(source);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
