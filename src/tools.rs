//! Stateless pixel-editing tools: pen, eraser, eye dropper, flood fill
//!
//! Each tool takes a grid-space coordinate and a frame; none of them hold
//! state of their own. The editing session picks the tool and supplies the
//! active color.

use crate::color::Color;
use crate::frame::{Frame, GridError};
use std::collections::VecDeque;

/// The available editing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Fill,
    EyeDropper,
}

/// Set the single pixel at (x, y) to `color`.
pub fn pen(x: u32, y: u32, color: Color, frame: &mut Frame) -> Result<(), GridError> {
    frame.set(x, y, color)
}

/// Set the single pixel at (x, y) to fully transparent.
pub fn eraser(x: u32, y: u32, frame: &mut Frame) -> Result<(), GridError> {
    frame.set(x, y, Color::TRANSPARENT)
}

/// Read the color at (x, y) without mutating the frame.
///
/// The session feeds the result back into its active color.
pub fn eye_dropper(x: u32, y: u32, frame: &Frame) -> Result<Color, GridError> {
    frame.get(x, y)
}

/// Flood-fill the 4-connected region of the seed pixel's color.
///
/// Recolors every pixel reachable from (x, y) through up/down/left/right
/// steps over the seed's original color. Filling with the color already at
/// the seed is a no-op, which also makes the operation idempotent.
///
/// Iterative over an explicit worklist; pixels are recolored as they are
/// enqueued so each enters the queue at most once and the fill terminates
/// on any grid size.
pub fn fill(x: u32, y: u32, fill_color: Color, frame: &mut Frame) -> Result<(), GridError> {
    let target = frame.get(x, y)?;
    if target == fill_color {
        return Ok(());
    }

    let mut queue = VecDeque::new();
    frame.set(x, y, fill_color)?;
    queue.push_back((x, y));

    while let Some((cx, cy)) = queue.pop_front() {
        let mut neighbors: [Option<(u32, u32)>; 4] = [None; 4];
        if cx > 0 {
            neighbors[0] = Some((cx - 1, cy));
        }
        if cy > 0 {
            neighbors[1] = Some((cx, cy - 1));
        }
        if cx + 1 < frame.width() {
            neighbors[2] = Some((cx + 1, cy));
        }
        // Bottom neighbor bounds against the height, not the width;
        // matters on non-square frames.
        if cy + 1 < frame.height() {
            neighbors[3] = Some((cx, cy + 1));
        }

        for (nx, ny) in neighbors.into_iter().flatten() {
            if frame.get(nx, ny)? == target {
                frame.set(nx, ny, fill_color)?;
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(())
}
