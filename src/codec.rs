//! The `.ssp` document codec
//!
//! An `.ssp` file is a UTF-8 JSON document, pretty-printed on save:
//!
//! ```json
//! {
//!   "width": 2,
//!   "height": 1,
//!   "frames": [
//!     { "pixels": [ [ {"r":0,"g":0,"b":0,"a":0}, {"r":0,"g":0,"b":0,"a":0} ] ] }
//!   ]
//! }
//! ```
//!
//! Pixels are emitted row-major, top to bottom, left to right. Field order
//! is fixed by the struct definitions, so encoding is deterministic: the
//! same sprite always produces the same bytes. There is no version tag;
//! any format evolution must stay backward-readable.
//!
//! Decoding validates shape before building a sprite: a frame whose row or
//! column counts disagree with the declared width/height is rejected rather
//! than trusted.

use crate::color::Color;
use crate::frame::Frame;
use crate::sprite::Sprite;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for document decoding failures.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Not valid JSON, or required fields missing / wrong type.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    /// A frame's row count disagrees with the declared height.
    #[error("malformed document: frame {frame} has {found} rows, expected {expected}")]
    RowCount {
        frame: usize,
        expected: u32,
        found: usize,
    },
    /// A row's column count disagrees with the declared width.
    #[error("malformed document: frame {frame} row {row} has {found} pixels, expected {expected}")]
    ColumnCount {
        frame: usize,
        row: usize,
        expected: u32,
        found: usize,
    },
}

/// On-disk form of one frame: rows of pixels, outer index is y.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameDoc {
    pub pixels: Vec<Vec<Color>>,
}

/// On-disk form of a sprite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpriteDoc {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<FrameDoc>,
}

/// Project a sprite into its document form.
pub fn to_document(sprite: &Sprite) -> SpriteDoc {
    let frames = sprite
        .frames()
        .map(|frame| {
            let mut rows = Vec::with_capacity(frame.height() as usize);
            for y in 0..frame.height() {
                let mut cols = Vec::with_capacity(frame.width() as usize);
                for x in 0..frame.width() {
                    // in range by construction
                    cols.push(frame.get(x, y).unwrap_or(Color::TRANSPARENT));
                }
                rows.push(cols);
            }
            FrameDoc { pixels: rows }
        })
        .collect();
    SpriteDoc {
        width: sprite.width(),
        height: sprite.height(),
        frames,
    }
}

/// Rebuild a sprite from a document, validating its shape.
///
/// A zero on either declared axis collapses the sprite to 0x0, the same
/// degenerate form `Sprite::new` produces, so the rebuilt sprite's
/// dimensions always agree with its frames'.
///
/// # Errors
///
/// `CodecError::RowCount` / `CodecError::ColumnCount` when a frame's
/// nested arrays disagree with the declared dimensions.
pub fn from_document(doc: &SpriteDoc) -> Result<Sprite, CodecError> {
    let mut frames = Vec::with_capacity(doc.frames.len());
    for (frame_index, frame_doc) in doc.frames.iter().enumerate() {
        if frame_doc.pixels.len() != doc.height as usize {
            return Err(CodecError::RowCount {
                frame: frame_index,
                expected: doc.height,
                found: frame_doc.pixels.len(),
            });
        }
        let mut frame = Frame::new(doc.width, doc.height);
        for (y, row) in frame_doc.pixels.iter().enumerate() {
            if row.len() != doc.width as usize {
                return Err(CodecError::ColumnCount {
                    frame: frame_index,
                    row: y,
                    expected: doc.width,
                    found: row.len(),
                });
            }
            for (x, &color) in row.iter().enumerate() {
                // in range: x < width and y < height were just checked
                let _ = frame.set(x as u32, y as u32, color);
            }
        }
        frames.push(frame);
    }
    let (width, height) = if doc.width == 0 || doc.height == 0 {
        (0, 0)
    } else {
        (doc.width, doc.height)
    };
    Ok(Sprite::from_parts(width, height, frames))
}

/// Encode a sprite to the pretty-printed `.ssp` text form.
pub fn encode(sprite: &Sprite) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&to_document(sprite))?)
}

/// Decode `.ssp` text into a sprite.
///
/// # Errors
///
/// `CodecError::Json` for syntactically invalid JSON or missing fields,
/// `CodecError::RowCount` / `ColumnCount` for shape mismatches.
pub fn decode(text: &str) -> Result<Sprite, CodecError> {
    let doc: SpriteDoc = serde_json::from_str(text)?;
    from_document(&doc)
}
