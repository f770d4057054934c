//! Sprite: an ordered sequence of frames sharing one width/height
//!
//! The sprite owns its frames outright. Frames are always stored as deep
//! copies on insert, so no two sprites (and no caller) ever alias a frame's
//! pixel buffer.

use crate::frame::{Frame, GridError};

/// An animation: frames of identical dimensions played in order.
///
/// A fresh sprite starts with one all-transparent frame. The data model
/// permits an empty frame sequence (e.g. after erasing every frame); the
/// editing layer is responsible for keeping at least one frame alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    frames: Vec<Frame>,
}

impl Sprite {
    /// Create a sprite with one initial transparent frame.
    ///
    /// A zero dimension collapses to a 0x0 sprite, legal but unpaintable.
    /// Callers at the app boundary validate dimensions (1..=64) before
    /// getting here; see `Editor::new_sprite`.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        Sprite {
            width,
            height,
            frames: vec![Frame::new(width, height)],
        }
    }

    /// Reassemble a sprite from already-validated parts. Used by the codec.
    pub(crate) fn from_parts(width: u32, height: u32, frames: Vec<Frame>) -> Self {
        Sprite {
            width,
            height,
            frames,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Borrow the frame at `index`.
    ///
    /// # Errors
    ///
    /// `GridError::FrameOutOfBounds` when `index >= frame_count()`.
    pub fn frame(&self, index: usize) -> Result<&Frame, GridError> {
        self.frames.get(index).ok_or(GridError::FrameOutOfBounds {
            index,
            count: self.frames.len(),
        })
    }

    /// Mutably borrow the frame at `index`; same bounds contract as `frame`.
    pub fn frame_mut(&mut self, index: usize) -> Result<&mut Frame, GridError> {
        let count = self.frames.len();
        self.frames
            .get_mut(index)
            .ok_or(GridError::FrameOutOfBounds { index, count })
    }

    /// Iterate the frames in order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Insert a deep copy of `frame` at `index`, shifting later frames right.
    ///
    /// `index == frame_count()` appends.
    ///
    /// # Errors
    ///
    /// `GridError::FrameOutOfBounds` when `index > frame_count()`;
    /// `GridError::FrameSizeMismatch` when the frame's dimensions disagree
    /// with the sprite's. Every frame in a sprite shares its width/height,
    /// which is what lets the codec round-trip the frame list against the
    /// single top-level size.
    pub fn insert_frame(&mut self, frame: &Frame, index: usize) -> Result<(), GridError> {
        self.check_frame_size(frame)?;
        if index > self.frames.len() {
            return Err(GridError::FrameOutOfBounds {
                index,
                count: self.frames.len(),
            });
        }
        self.frames.insert(index, frame.clone());
        Ok(())
    }

    /// Append a deep copy of `frame` at the end.
    ///
    /// # Errors
    ///
    /// `GridError::FrameSizeMismatch` on a dimension mismatch, as for
    /// `insert_frame`.
    pub fn push_frame(&mut self, frame: &Frame) -> Result<(), GridError> {
        self.check_frame_size(frame)?;
        self.frames.push(frame.clone());
        Ok(())
    }

    fn check_frame_size(&self, frame: &Frame) -> Result<(), GridError> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(GridError::FrameSizeMismatch {
                width: frame.width(),
                height: frame.height(),
                expected_width: self.width,
                expected_height: self.height,
            });
        }
        Ok(())
    }

    /// Append a fresh all-transparent frame of the sprite's dimensions.
    pub fn push_blank_frame(&mut self) {
        self.frames.push(Frame::new(self.width, self.height));
    }

    /// Remove the frame at `index`, shifting later frames left.
    ///
    /// A silent no-op when `index` is out of range; the editing layer
    /// validates the index before calling.
    pub fn erase_frame(&mut self, index: usize) {
        if index < self.frames.len() {
            self.frames.remove(index);
        }
    }
}
