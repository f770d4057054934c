//! Editing session: owns the sprite and routes edits onto it
//!
//! This is the seam a view layer calls into. It holds the active sprite,
//! the selected frame, the active tool and color, and turns pointer events
//! into tool operations on the current frame.
//!
//! Mutating operations return the [`EditorEvent`]s they caused; a view
//! subscribes by draining that vector and re-rendering what it names. The
//! core never calls out to the view.

use crate::codec::{self, CodecError};
use crate::color::Color;
use crate::frame::{Frame, GridError};
use crate::sprite::Sprite;
use crate::tools::{self, Tool};
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

/// Sprite dimensions accepted at the editing boundary.
pub const MIN_DIMENSION: u32 = 1;
pub const MAX_DIMENSION: u32 = 64;

/// Error type for session-level operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Pixel or frame access violation: coordinate or index out of
    /// range, or a frame whose size disagrees with the sprite's.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// A document failed to decode.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// File read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Requested sprite dimensions outside [1, 64].
    #[error("invalid sprite dimensions {width}x{height}, expected 1..=64 on both axes")]
    InvalidDimensions { width: u32, height: u32 },
    /// A loaded document contained no frames.
    #[error("document contains no frames")]
    EmptyDocument,
}

/// A change the view layer should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The pixels of the frame at this index changed.
    FrameChanged(usize),
    /// The active color changed (pen selection or eye dropper pick).
    ColorChanged(Color),
    /// A frame was inserted at this index; later frames shifted right.
    FrameInserted(usize),
    /// The frame at this index was removed; later frames shifted left.
    FrameRemoved(usize),
    /// The whole sprite was replaced (new sprite or load).
    SpriteReplaced,
}

/// A pointer position in viewport coordinates.
pub type PointerPos = (f32, f32);
/// The viewport size in the same coordinate space, in whole units.
pub type ViewportSize = (u32, u32);

/// The editing session. Owns one [`Sprite`] by value; replacing it on
/// new/load drops the old one, no manual lifetime management anywhere.
#[derive(Debug)]
pub struct Editor {
    sprite: Sprite,
    current_frame_index: usize,
    active_tool: Tool,
    active_color: Color,
}

impl Editor {
    /// Start a session on a fresh sprite of the given size.
    ///
    /// # Errors
    ///
    /// `EditorError::InvalidDimensions` unless both axes are in
    /// [`MIN_DIMENSION`]..=[`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Result<Self, EditorError> {
        check_dimensions(width, height)?;
        Ok(Editor {
            sprite: Sprite::new(width, height),
            current_frame_index: 0,
            active_tool: Tool::default(),
            active_color: Color::BLACK,
        })
    }

    /// Start a session on an already-built sprite (e.g. decoded elsewhere).
    pub fn with_sprite(sprite: Sprite) -> Result<Self, EditorError> {
        check_dimensions(sprite.width(), sprite.height())?;
        if sprite.frame_count() == 0 {
            return Err(EditorError::EmptyDocument);
        }
        Ok(Editor {
            sprite,
            current_frame_index: 0,
            active_tool: Tool::default(),
            active_color: Color::BLACK,
        })
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame_index
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn frame_count(&self) -> usize {
        self.sprite.frame_count()
    }

    /// Borrow the currently selected frame.
    pub fn current_frame(&self) -> Result<&Frame, GridError> {
        self.sprite.frame(self.current_frame_index)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.active_tool = tool;
    }

    pub fn set_color(&mut self, color: Color) -> Vec<EditorEvent> {
        self.active_color = color;
        vec![EditorEvent::ColorChanged(color)]
    }

    /// Apply the active tool at a pointer position.
    ///
    /// The pointer is mapped from viewport space to grid space with
    /// `floor(p * grid / viewport)`, then clamped to the nearest edge pixel
    /// so coordinates that land just outside the viewport still paint the
    /// border instead of wrapping to the far side.
    ///
    /// Fill and the eye dropper fire on discrete clicks only: when
    /// `is_drag` is true they do nothing, so a drag does not re-fill or
    /// re-pick on every motion tick.
    ///
    /// # Errors
    ///
    /// `EditorError::Grid` when the sprite has no frames or a zero
    /// viewport axis makes the position unmappable.
    pub fn edit_at(
        &mut self,
        pointer: PointerPos,
        viewport: ViewportSize,
        is_drag: bool,
    ) -> Result<Vec<EditorEvent>, EditorError> {
        let (x, y) = self.pointer_to_grid(pointer, viewport)?;
        let index = self.current_frame_index;
        let mut events = Vec::new();

        match self.active_tool {
            Tool::Pen => {
                let color = self.active_color;
                tools::pen(x, y, color, self.sprite.frame_mut(index)?)?;
                events.push(EditorEvent::FrameChanged(index));
            }
            Tool::Eraser => {
                tools::eraser(x, y, self.sprite.frame_mut(index)?)?;
                events.push(EditorEvent::FrameChanged(index));
            }
            Tool::Fill => {
                if !is_drag {
                    let color = self.active_color;
                    tools::fill(x, y, color, self.sprite.frame_mut(index)?)?;
                    events.push(EditorEvent::FrameChanged(index));
                }
            }
            Tool::EyeDropper => {
                if !is_drag {
                    let picked = tools::eye_dropper(x, y, self.sprite.frame(index)?)?;
                    events.extend(self.set_color(picked));
                }
            }
        }

        Ok(events)
    }

    /// Select the frame at `index`. Ignored when out of range.
    pub fn select_frame(&mut self, index: usize) -> Vec<EditorEvent> {
        if index >= self.sprite.frame_count() {
            return Vec::new();
        }
        self.current_frame_index = index;
        vec![EditorEvent::FrameChanged(index)]
    }

    /// Append a blank frame at the end of the sprite.
    pub fn add_frame(&mut self) -> Vec<EditorEvent> {
        self.sprite.push_blank_frame();
        vec![EditorEvent::FrameInserted(self.sprite.frame_count() - 1)]
    }

    /// Insert a deep copy of `frame` at `index`.
    ///
    /// # Errors
    ///
    /// `EditorError::Grid` when `index > frame_count()` or the frame's
    /// dimensions disagree with the sprite's.
    pub fn insert_frame(&mut self, frame: &Frame, index: usize) -> Result<Vec<EditorEvent>, EditorError> {
        self.sprite.insert_frame(frame, index)?;
        if index <= self.current_frame_index && self.sprite.frame_count() > 1 {
            // keep the selection on the same frame contents
            self.current_frame_index += 1;
        }
        Ok(vec![EditorEvent::FrameInserted(index)])
    }

    /// Deep-copy the current frame and insert the copy right after it.
    ///
    /// The selection stays on the original; callers re-select the copy
    /// explicitly if they want to edit it.
    pub fn duplicate_frame(&mut self) -> Result<Vec<EditorEvent>, EditorError> {
        let copy = self.current_frame()?.clone();
        let at = self.current_frame_index + 1;
        self.sprite.insert_frame(&copy, at)?;
        Ok(vec![EditorEvent::FrameInserted(at)])
    }

    /// Remove the frame at `index`. Ignored when out of range.
    ///
    /// When the removed frame is at or before the current one, the current
    /// index moves down with its frame, clamped to `frame_count - 1`
    /// (saturating at 0, so removing the last remaining frame leaves the
    /// index at 0 over an empty sprite).
    pub fn remove_frame(&mut self, index: usize) -> Vec<EditorEvent> {
        if index >= self.sprite.frame_count() {
            return Vec::new();
        }
        self.sprite.erase_frame(index);
        if index <= self.current_frame_index {
            self.current_frame_index = self.current_frame_index.saturating_sub(1);
        }
        let last = self.sprite.frame_count().saturating_sub(1);
        self.current_frame_index = self.current_frame_index.min(last);
        vec![EditorEvent::FrameRemoved(index)]
    }

    /// Replace the sprite with a fresh one. The old sprite is dropped.
    ///
    /// # Errors
    ///
    /// `EditorError::InvalidDimensions` for dimensions outside [1, 64];
    /// the existing sprite is untouched on error.
    pub fn new_sprite(&mut self, width: u32, height: u32) -> Result<Vec<EditorEvent>, EditorError> {
        check_dimensions(width, height)?;
        self.sprite = Sprite::new(width, height);
        self.current_frame_index = 0;
        Ok(vec![EditorEvent::SpriteReplaced])
    }

    /// Write the sprite to `path` as a pretty-printed `.ssp` document.
    ///
    /// # Errors
    ///
    /// `EditorError::Io` on write failure.
    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        let text = codec::encode(&self.sprite)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Replace the sprite with one loaded from `path`.
    ///
    /// Validates the whole document before touching session state: on any
    /// failure the previous sprite and selection are retained.
    ///
    /// # Errors
    ///
    /// `EditorError::Io` when the file cannot be read, `EditorError::Codec`
    /// when it fails to decode, `EditorError::InvalidDimensions` /
    /// `EditorError::EmptyDocument` when the decoded sprite violates the
    /// boundary constraints.
    pub fn load(&mut self, path: &Path) -> Result<Vec<EditorEvent>, EditorError> {
        let text = std::fs::read_to_string(path)?;
        let sprite = codec::decode(&text)?;
        check_dimensions(sprite.width(), sprite.height())?;
        if sprite.frame_count() == 0 {
            return Err(EditorError::EmptyDocument);
        }
        self.sprite = sprite;
        self.current_frame_index = 0;
        Ok(vec![EditorEvent::SpriteReplaced])
    }

    /// Rasterize the frame at `index` for display.
    pub fn rasterize(&self, index: usize) -> Result<RgbaImage, GridError> {
        Ok(self.sprite.frame(index)?.to_image())
    }

    /// Rasterize the currently selected frame.
    pub fn rasterize_current(&self) -> Result<RgbaImage, GridError> {
        self.rasterize(self.current_frame_index)
    }

    /// Rasterize every frame in order, for preview strips.
    pub fn frames_as_images(&self) -> Vec<RgbaImage> {
        self.sprite.frames().map(Frame::to_image).collect()
    }

    fn pointer_to_grid(
        &self,
        pointer: PointerPos,
        viewport: ViewportSize,
    ) -> Result<(u32, u32), GridError> {
        let width = self.sprite.width();
        let height = self.sprite.height();
        let (vw, vh) = viewport;
        if width == 0 || height == 0 || vw == 0 || vh == 0 {
            return Err(GridError::OutOfBounds {
                x: 0,
                y: 0,
                width,
                height,
            });
        }
        let gx = (pointer.0 * width as f32 / vw as f32).floor();
        let gy = (pointer.1 * height as f32 / vh as f32).floor();
        // clamp to the edge pixel rather than wrapping
        let x = (gx.max(0.0) as u32).min(width - 1);
        let y = (gy.max(0.0) as u32).min(height - 1);
        Ok((x, y))
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), EditorError> {
    if width < MIN_DIMENSION || width > MAX_DIMENSION || height < MIN_DIMENSION || height > MAX_DIMENSION
    {
        return Err(EditorError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0, 255);
    const GREEN: Color = Color::new(0, 255, 0, 255);

    fn editor_4x4() -> Editor {
        Editor::new(4, 4).unwrap()
    }

    #[test]
    fn test_new_editor_defaults() {
        let editor = editor_4x4();
        assert_eq!(editor.frame_count(), 1);
        assert_eq!(editor.current_frame_index(), 0);
        assert_eq!(editor.active_tool(), Tool::Pen);
        assert_eq!(editor.active_color(), Color::BLACK);
    }

    #[test]
    fn test_dimension_boundary() {
        assert!(Editor::new(1, 1).is_ok());
        assert!(Editor::new(64, 64).is_ok());
        assert!(matches!(
            Editor::new(0, 4),
            Err(EditorError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(Editor::new(65, 4).is_err());
        assert!(Editor::new(4, 65).is_err());
    }

    #[test]
    fn test_pen_via_pointer() {
        let mut editor = editor_4x4();
        editor.set_color(RED);
        // viewport 4x the grid: (9.0, 9.0) lands on pixel (2, 2)
        let events = editor.edit_at((9.0, 9.0), (16, 16), false).unwrap();
        assert_eq!(events, vec![EditorEvent::FrameChanged(0)]);
        assert_eq!(editor.current_frame().unwrap().get(2, 2).unwrap(), RED);
    }

    #[test]
    fn test_pointer_clamps_to_edges() {
        let mut editor = editor_4x4();
        editor.set_color(RED);
        // beyond the right/bottom edge clamps to the last pixel
        editor.edit_at((20.0, 20.0), (16, 16), false).unwrap();
        assert_eq!(editor.current_frame().unwrap().get(3, 3).unwrap(), RED);
        // negative coordinates clamp to the first pixel
        editor.edit_at((-3.0, -1.0), (16, 16), false).unwrap();
        assert_eq!(editor.current_frame().unwrap().get(0, 0).unwrap(), RED);
        // nothing wrapped to other corners
        assert_eq!(
            editor.current_frame().unwrap().get(0, 3).unwrap(),
            Color::TRANSPARENT
        );
    }

    #[test]
    fn test_eraser_via_pointer() {
        let mut editor = editor_4x4();
        editor.set_color(RED);
        editor.edit_at((0.0, 0.0), (16, 16), false).unwrap();
        editor.set_tool(Tool::Eraser);
        editor.edit_at((0.0, 0.0), (16, 16), true).unwrap();
        assert_eq!(
            editor.current_frame().unwrap().get(0, 0).unwrap(),
            Color::TRANSPARENT
        );
    }

    #[test]
    fn test_fill_ignores_drag() {
        let mut editor = editor_4x4();
        editor.set_color(GREEN);
        editor.set_tool(Tool::Fill);

        let events = editor.edit_at((0.0, 0.0), (16, 16), true).unwrap();
        assert!(events.is_empty());
        assert_eq!(
            editor.current_frame().unwrap().get(0, 0).unwrap(),
            Color::TRANSPARENT
        );

        editor.edit_at((0.0, 0.0), (16, 16), false).unwrap();
        assert!(editor
            .current_frame()
            .unwrap()
            .pixels()
            .all(|(_, _, c)| c == GREEN));
    }

    #[test]
    fn test_fill_scenario_whole_frame_blue() {
        let blue = Color::new(0, 0, 255, 255);
        let mut editor = editor_4x4();
        editor.set_color(blue);
        editor.set_tool(Tool::Fill);
        editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();
        let frame = editor.current_frame().unwrap();
        assert_eq!(frame.pixels().filter(|&(_, _, c)| c == blue).count(), 16);
    }

    #[test]
    fn test_eye_dropper_updates_active_color() {
        let mut editor = editor_4x4();
        editor.set_color(RED);
        editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();

        editor.set_color(GREEN);
        editor.set_tool(Tool::EyeDropper);
        let events = editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();
        assert_eq!(events, vec![EditorEvent::ColorChanged(RED)]);
        assert_eq!(editor.active_color(), RED);

        // drags do not re-pick
        editor.set_color(GREEN);
        let events = editor.edit_at((0.0, 0.0), (4, 4), true).unwrap();
        assert!(events.is_empty());
        assert_eq!(editor.active_color(), GREEN);
    }

    #[test]
    fn test_select_frame_validates() {
        let mut editor = editor_4x4();
        editor.add_frame();
        assert_eq!(editor.select_frame(1), vec![EditorEvent::FrameChanged(1)]);
        assert_eq!(editor.current_frame_index(), 1);
        // invalid index: ignored, no event, no change
        assert!(editor.select_frame(9).is_empty());
        assert_eq!(editor.current_frame_index(), 1);
    }

    #[test]
    fn test_add_frame_appends_blank() {
        let mut editor = editor_4x4();
        let events = editor.add_frame();
        assert_eq!(events, vec![EditorEvent::FrameInserted(1)]);
        assert_eq!(editor.frame_count(), 2);
    }

    #[test]
    fn test_duplicate_frame_inserts_copy_after_current() {
        let mut editor = editor_4x4();
        editor.set_color(RED);
        editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();

        let events = editor.duplicate_frame().unwrap();
        assert_eq!(events, vec![EditorEvent::FrameInserted(1)]);
        assert_eq!(editor.frame_count(), 2);
        // selection unchanged, copy has the same pixels
        assert_eq!(editor.current_frame_index(), 0);
        assert_eq!(editor.sprite().frame(1).unwrap().get(0, 0).unwrap(), RED);

        // the copy is independent of the original
        editor.set_tool(Tool::Eraser);
        editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();
        assert_eq!(editor.sprite().frame(1).unwrap().get(0, 0).unwrap(), RED);
    }

    #[test]
    fn test_insert_frame_shifts_selection_with_contents() {
        let mut editor = editor_4x4();
        editor.set_color(RED);
        editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();

        let blank = Frame::new(4, 4);
        let events = editor.insert_frame(&blank, 0).unwrap();
        assert_eq!(events, vec![EditorEvent::FrameInserted(0)]);
        assert_eq!(editor.frame_count(), 2);
        // the selection followed the painted frame to index 1
        assert_eq!(editor.current_frame_index(), 1);
        assert_eq!(editor.current_frame().unwrap().get(0, 0).unwrap(), RED);

        assert!(editor.insert_frame(&blank, 9).is_err());
    }

    #[test]
    fn test_insert_frame_rejects_mismatched_size() {
        let mut editor = editor_4x4();
        let small = Frame::new(2, 2);

        let err = editor.insert_frame(&small, 0).unwrap_err();
        assert!(matches!(
            err,
            EditorError::Grid(GridError::FrameSizeMismatch { .. })
        ));
        assert_eq!(editor.frame_count(), 1);
        assert_eq!(editor.current_frame_index(), 0);

        // the sprite stayed well-formed: its own encoding still decodes
        let text = codec::encode(editor.sprite()).unwrap();
        let back = codec::decode(&text).unwrap();
        assert_eq!(&back, editor.sprite());
    }

    #[test]
    fn test_with_sprite_validates() {
        let sprite = Sprite::new(8, 8);
        let editor = Editor::with_sprite(sprite).unwrap();
        assert_eq!(editor.frame_count(), 1);

        let mut empty = Sprite::new(8, 8);
        empty.erase_frame(0);
        assert!(matches!(
            Editor::with_sprite(empty),
            Err(EditorError::EmptyDocument)
        ));
        assert!(matches!(
            Editor::with_sprite(Sprite::new(0, 0)),
            Err(EditorError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_remove_frame_clamps_current_index() {
        let mut editor = editor_4x4();
        editor.add_frame();
        editor.add_frame();
        editor.select_frame(2);

        let events = editor.remove_frame(2);
        assert_eq!(events, vec![EditorEvent::FrameRemoved(2)]);
        assert_eq!(editor.frame_count(), 2);
        assert_eq!(editor.current_frame_index(), 1);
    }

    #[test]
    fn test_remove_earlier_frame_shifts_selection() {
        let mut editor = editor_4x4();
        editor.add_frame();
        editor.add_frame();
        editor.select_frame(2);
        editor.set_color(RED);
        editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();

        editor.remove_frame(0);
        // still pointing at the painted frame, now at index 1
        assert_eq!(editor.current_frame_index(), 1);
        assert_eq!(editor.current_frame().unwrap().get(0, 0).unwrap(), RED);
    }

    #[test]
    fn test_remove_last_remaining_frame() {
        let mut editor = editor_4x4();
        editor.remove_frame(0);
        assert_eq!(editor.frame_count(), 0);
        assert_eq!(editor.current_frame_index(), 0);
        // the empty sprite is not paintable
        assert!(editor.current_frame().is_err());
        assert!(editor.edit_at((0.0, 0.0), (4, 4), false).is_err());
    }

    #[test]
    fn test_remove_frame_out_of_range_is_ignored() {
        let mut editor = editor_4x4();
        assert!(editor.remove_frame(3).is_empty());
        assert_eq!(editor.frame_count(), 1);
    }

    #[test]
    fn test_new_sprite_replaces_state() {
        let mut editor = editor_4x4();
        editor.add_frame();
        editor.select_frame(1);
        let events = editor.new_sprite(8, 8).unwrap();
        assert_eq!(events, vec![EditorEvent::SpriteReplaced]);
        assert_eq!(editor.frame_count(), 1);
        assert_eq!(editor.current_frame_index(), 0);
        assert_eq!(editor.sprite().width(), 8);
    }

    #[test]
    fn test_new_sprite_invalid_dims_keeps_state() {
        let mut editor = editor_4x4();
        editor.set_color(RED);
        editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();
        assert!(editor.new_sprite(0, 200).is_err());
        assert_eq!(editor.sprite().width(), 4);
        assert_eq!(editor.current_frame().unwrap().get(0, 0).unwrap(), RED);
    }

    #[test]
    fn test_rasterize_frame() {
        let mut editor = editor_4x4();
        editor.set_color(RED);
        editor.edit_at((0.0, 0.0), (4, 4), false).unwrap();
        let image = editor.rasterize_current().unwrap();
        assert_eq!(image.dimensions(), (4, 4));
        assert_eq!(Color::from(*image.get_pixel(0, 0)), RED);
        assert!(editor.rasterize(5).is_err());
    }

    #[test]
    fn test_frames_as_images() {
        let mut editor = editor_4x4();
        editor.add_frame();
        let images = editor.frames_as_images();
        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|i| i.dimensions() == (4, 4)));
    }
}
