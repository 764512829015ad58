//! Direct-manipulation editing of the quote text.
//!
//! The host resolves hit-testing itself and feeds discrete [`TextInput`]
//! events; pointer coordinates are canvas-local display pixels.

use crate::foundation::core::{DisplaySize, Point};
use crate::model::frame::{
    FontStyle, FontWeight, Frame, MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX, TextAlign, TextPosition,
    TextStylePatch, clamp_font_size,
};
use crate::foundation::color::CssColor;

/// Font-size change per `+`/`-` key press.
pub const KEY_SIZE_STEP_PX: i64 = 2;
/// Position change per arrow key press, in percentage points.
pub const KEY_MOVE_STEP_PCT: f64 = 1.0;
/// Text appended by `add_text` when none is given.
pub const DEFAULT_NEW_TEXT: &str = "New Text";

/// Coarse interaction mode derived from [`InteractionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    Selected,
    Dragging,
    Resizing,
}

/// Transient pointer/selection state. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub is_dragging: bool,
    pub is_resizing: bool,
    pub is_text_selected: bool,
    /// Last pointer position seen while dragging.
    pub drag_anchor: Option<Point>,
}

/// Keys the text layer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Grow,
    Shrink,
}

impl Key {
    /// Map a DOM-style key name (`"ArrowUp"`, `"+"`, `"="`, `"-"`, `"_"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "+" | "=" => Self::Grow,
            "-" | "_" => Self::Shrink,
            _ => return None,
        })
    }
}

/// Discrete input events, already hit-tested by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextInput {
    /// Pointer down on the text body.
    DragStart { at: Point },
    /// Pointer down on the resize handle.
    ResizeStart,
    /// Pointer moved anywhere over the canvas.
    PointerMove { at: Point },
    /// Pointer released anywhere, including outside the canvas.
    PointerUp,
    /// Pointer down on the canvas background.
    BackgroundDown,
    /// Key press.
    Key(Key),
}

/// What handling an input did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// The host should suppress its default handling (e.g. page scroll).
    pub consumed: bool,
    /// The frame's position or style changed.
    pub changed: bool,
}

impl InputOutcome {
    const IGNORED: Self = Self {
        consumed: false,
        changed: false,
    };

    fn consumed(changed: bool) -> Self {
        Self {
            consumed: true,
            changed,
        }
    }
}

/// The live-editable text of one frame plus its interaction state.
#[derive(Clone, Debug)]
pub struct TextLayer {
    frame: Frame,
    state: InteractionState,
}

impl TextLayer {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            state: InteractionState::default(),
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    pub fn into_frame(self) -> Frame {
        self.frame
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn mode(&self) -> InteractionMode {
        if self.state.is_dragging {
            InteractionMode::Dragging
        } else if self.state.is_resizing {
            InteractionMode::Resizing
        } else if self.state.is_text_selected {
            InteractionMode::Selected
        } else {
            InteractionMode::Idle
        }
    }

    /// Feed one input event. `display` is the current on-screen canvas size.
    pub fn handle(&mut self, input: TextInput, display: DisplaySize) -> InputOutcome {
        match input {
            TextInput::DragStart { at } => {
                if self.frame.quote_text.is_empty() {
                    return InputOutcome::IGNORED;
                }
                self.state.is_text_selected = true;
                self.state.is_resizing = false;
                self.state.is_dragging = true;
                self.state.drag_anchor = Some(at);
                InputOutcome::consumed(false)
            }
            TextInput::ResizeStart => {
                if self.frame.quote_text.is_empty() {
                    return InputOutcome::IGNORED;
                }
                self.state.is_text_selected = true;
                self.state.is_dragging = false;
                self.state.drag_anchor = None;
                self.state.is_resizing = true;
                InputOutcome::consumed(false)
            }
            TextInput::PointerMove { at } => self.pointer_move(at, display),
            TextInput::PointerUp => {
                let was_active = self.state.is_dragging || self.state.is_resizing;
                self.state.is_dragging = false;
                self.state.is_resizing = false;
                self.state.drag_anchor = None;
                InputOutcome {
                    consumed: was_active,
                    changed: false,
                }
            }
            TextInput::BackgroundDown => {
                let was_selected = self.state.is_text_selected;
                self.state = InteractionState::default();
                InputOutcome {
                    consumed: false,
                    changed: was_selected,
                }
            }
            TextInput::Key(key) => self.key(key),
        }
    }

    fn pointer_move(&mut self, at: Point, display: DisplaySize) -> InputOutcome {
        if display.width <= 0.0 || display.height <= 0.0 {
            return InputOutcome::IGNORED;
        }

        if self.state.is_dragging {
            let anchor = self.state.drag_anchor.unwrap_or(at);
            let delta = at - anchor;
            let before = self.frame.text_position;
            self.frame.text_position = before.offset(
                delta.x / display.width * 100.0,
                delta.y / display.height * 100.0,
            );
            self.state.drag_anchor = Some(at);
            return InputOutcome::consumed(before != self.frame.text_position);
        }

        if self.state.is_resizing {
            let size = resize_font_size(at.y, display.height);
            let changed = size != self.frame.text_style.font_size_px;
            self.frame.text_style.font_size_px = size;
            return InputOutcome::consumed(changed);
        }

        InputOutcome::IGNORED
    }

    fn key(&mut self, key: Key) -> InputOutcome {
        if !self.state.is_text_selected {
            return InputOutcome::IGNORED;
        }
        let pos = self.frame.text_position;
        let size = i64::from(self.frame.text_style.font_size_px);
        let (new_pos, new_size) = match key {
            Key::ArrowUp => (pos.offset(0.0, -KEY_MOVE_STEP_PCT), size),
            Key::ArrowDown => (pos.offset(0.0, KEY_MOVE_STEP_PCT), size),
            Key::ArrowLeft => (pos.offset(-KEY_MOVE_STEP_PCT, 0.0), size),
            Key::ArrowRight => (pos.offset(KEY_MOVE_STEP_PCT, 0.0), size),
            Key::Grow => (pos, size + KEY_SIZE_STEP_PX),
            Key::Shrink => (pos, size - KEY_SIZE_STEP_PX),
        };
        let new_size = clamp_font_size(new_size);
        let changed = new_pos != pos || new_size != self.frame.text_style.font_size_px;
        self.frame.text_position = new_pos;
        self.frame.text_style.font_size_px = new_size;
        InputOutcome::consumed(changed)
    }

    pub fn select(&mut self) {
        self.state.is_text_selected = true;
    }

    pub fn deselect(&mut self) {
        self.state = InteractionState::default();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.frame.quote_text = text.into();
    }

    pub fn set_position(&mut self, position: TextPosition) {
        self.frame.text_position = position;
    }

    pub fn set_color(&mut self, color: CssColor) {
        self.frame.text_style.color = color;
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.frame.text_style.font_family = family.into();
    }

    pub fn set_alignment(&mut self, align: TextAlign) {
        self.frame.text_style.text_align = align;
    }

    pub fn toggle_italic(&mut self) -> FontStyle {
        self.frame.text_style.font_style = self.frame.text_style.font_style.toggled();
        self.frame.text_style.font_style
    }

    pub fn toggle_bold(&mut self) -> FontWeight {
        self.frame.text_style.font_weight = self.frame.text_style.font_weight.toggled();
        self.frame.text_style.font_weight
    }

    /// Apply a host style-control patch. Size is clamped to the interactive range.
    pub fn update_text(&mut self, patch: &TextStylePatch) {
        self.frame.text_style.apply(patch);
    }

    /// Append a line (default `"New Text"`) and select the text.
    pub fn add_text(&mut self, initial: Option<&str>) {
        let line = initial.unwrap_or(DEFAULT_NEW_TEXT);
        if self.frame.quote_text.is_empty() {
            self.frame.quote_text = line.to_string();
        } else {
            self.frame.quote_text = format!("{}\n{line}", self.frame.quote_text);
        }
        self.select();
    }
}

/// Eased mapping from a pointer's vertical position to a font size.
///
/// The top edge maps to the maximum size, the bottom edge to the minimum;
/// positions outside the canvas are clamped.
pub fn resize_font_size(pointer_y: f64, canvas_height: f64) -> u32 {
    let relative_y = (1.0 - pointer_y / canvas_height).clamp(0.0, 1.0);
    let range = f64::from(MAX_FONT_SIZE_PX - MIN_FONT_SIZE_PX);
    let size = f64::from(MIN_FONT_SIZE_PX) + range * relative_y.powf(1.5);
    if size.is_finite() {
        clamp_font_size(size.round() as i64)
    } else {
        MIN_FONT_SIZE_PX
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/text_layer.rs"]
mod tests;
