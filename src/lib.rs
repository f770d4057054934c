//! spritepad - sprite/pixel-art animation core
//!
//! This library is the data model behind a frame-by-frame pixel-art
//! animation editor:
//! - [`frame`]: a single image as a bounds-checked grid of RGBA pixels
//! - [`tools`]: pen, eraser, eye dropper, and flood fill over a frame
//! - [`sprite`]: the ordered frame collection sharing one size
//! - [`codec`]: the JSON-based `.ssp` file format
//! - [`editor`]: the editing session a view layer drives
//!
//! Everything is synchronous and single-threaded; the session owns its
//! sprite exclusively and a view layer renders what the session returns.

pub mod cli;
pub mod codec;
pub mod color;
pub mod editor;
pub mod frame;
pub mod output;
pub mod sprite;
pub mod tools;
