//! Single-value holding areas, one per event category.
//!
//! A slot holds the most recent unread record of its kind. Latching overwrites
//! whatever is there, read or not; taking copies the record out and empties the
//! slot. There is no queue and no history.

use crate::event::{Frame, KeyboardKey, MouseButton, MouseMove, MouseScroll};

#[derive(Clone, Debug, Default)]
pub struct Slots {
    mouse_move: Option<MouseMove>,
    mouse_button: Option<MouseButton>,
    mouse_scroll: Option<MouseScroll>,
    keyboard: Option<KeyboardKey>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a move. A zero delta carries no motion and leaves the slot untouched.
    ///
    /// Returns `true` if the slot was overwritten.
    pub fn latch_move(&mut self, m: MouseMove) -> bool {
        if m.dx == 0 && m.dy == 0 {
            return false;
        }
        self.mouse_move = Some(m);
        true
    }

    pub fn latch_button(&mut self, b: MouseButton) {
        self.mouse_button = Some(b);
    }

    pub fn latch_scroll(&mut self, s: MouseScroll) {
        self.mouse_scroll = Some(s);
    }

    pub fn latch_key(&mut self, k: KeyboardKey) {
        self.keyboard = Some(k);
    }

    #[inline]
    pub fn take_move(&mut self) -> Option<MouseMove> {
        self.mouse_move.take()
    }

    #[inline]
    pub fn take_button(&mut self) -> Option<MouseButton> {
        self.mouse_button.take()
    }

    #[inline]
    pub fn take_scroll(&mut self) -> Option<MouseScroll> {
        self.mouse_scroll.take()
    }

    #[inline]
    pub fn take_key(&mut self) -> Option<KeyboardKey> {
        self.keyboard.take()
    }

    /// Drain every slot at once.
    pub fn take_all(&mut self) -> Frame {
        Frame {
            mouse_move: self.take_move(),
            mouse_button: self.take_button(),
            mouse_scroll: self.take_scroll(),
            keyboard: self.take_key(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.mouse_move.is_none()
            && self.mouse_button.is_none()
            && self.mouse_scroll.is_none()
            && self.keyboard.is_none()
    }
}
