//! Frame: a fixed-size 2-D grid of RGBA pixels
//!
//! One frame is one still image of the animation. Pixels live in a single
//! contiguous buffer indexed `y * width + x` with (0,0) at the top-left,
//! x as the column and y as the row. A fresh frame is fully transparent.
//!
//! Access is bounds-checked: `get`/`set` return `GridError::OutOfBounds`
//! for any coordinate outside the grid, including on degenerate 0x0 frames.

use crate::color::Color;
use image::RgbaImage;
use thiserror::Error;

/// Error type for grid and frame-index access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Pixel coordinate outside the grid.
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Frame index outside the animation's frame sequence.
    #[error("frame index {index} out of bounds for {count} frames")]
    FrameOutOfBounds { index: usize, count: usize },
    /// Frame dimensions disagree with the animation's shared dimensions.
    #[error("frame is {width}x{height}, expected {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },
}

/// A single animation frame: a dense grid of [`Color`] pixels.
///
/// `Clone` is a deep copy; two frames never share backing storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    /// Row-major, `pixels[y * width + x]`. Length is always width * height.
    pixels: Vec<Color>,
}

impl Frame {
    /// Create an all-transparent frame of the given size.
    ///
    /// A zero dimension collapses the frame to 0x0. That state is legal
    /// (every accessor returns `OutOfBounds`) but cannot be painted.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        Frame {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the color at (x, y).
    ///
    /// # Errors
    ///
    /// `GridError::OutOfBounds` when x >= width or y >= height.
    pub fn get(&self, x: u32, y: u32) -> Result<Color, GridError> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the color at (x, y).
    ///
    /// # Errors
    ///
    /// `GridError::OutOfBounds` when x >= width or y >= height.
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> Result<(), GridError> {
        let i = self.index(x, y)?;
        self.pixels[i] = color;
        Ok(())
    }

    /// Rasterize the frame to an RGBA image buffer for display or export.
    ///
    /// Pure projection: the frame itself is not touched. A 0x0 frame
    /// produces an empty image.
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        for (i, pixel) in image.pixels_mut().enumerate() {
            *pixel = self.pixels[i].into();
        }
        image
    }

    /// Iterate pixels row-major as `(x, y, color)`.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i as u32 % width, i as u32 / width, c))
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize) * (self.width as usize) + x as usize)
    }
}
