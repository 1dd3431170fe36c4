//! Records handed out by the poll functions.
//!
//! Every record is a small `Copy` value stamped with the time the packet was
//! captured ([`at`](MouseMove::at), milliseconds since system start on Windows).
//!
//! ## Value conventions
//! - **Mouse motion:** relative deltas in raw OS counts, exactly as reported.
//! - **Wheel:** raw `WHEEL_DELTA` units (typically ±120 per notch). Positive scrolls
//!   up/away from the user, negative down/towards.
//! - **Keys:** Windows virtual-key code plus the hardware scancode. No text translation.
//!
//! Nothing here is normalized or transformed.

use serde::{Deserialize, Serialize};

/// Relative mouse motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseMove {
    /// Capture time (ms).
    pub at: u64,
    /// Relative delta X (raw counts).
    pub dx: i32,
    /// Relative delta Y (raw counts).
    pub dy: i32,
}

/// A mouse button transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseButton {
    pub at: u64,
    pub button: Button,
    /// `true` on press, `false` on release.
    pub down: bool,
}

/// A vertical wheel movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseScroll {
    pub at: u64,
    /// Signed wheel delta; the sign encodes direction (positive = up).
    pub amount: i32,
}

/// A keyboard key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardKey {
    pub at: u64,
    /// Windows virtual-key code (`VK_*`).
    pub key_code: u16,
    /// Hardware scancode (layout-independent).
    pub scan_code: u16,
    /// Extended key flag (E0/E1 prefix).
    pub extended: bool,
    /// `true` on make (press), `false` on break (release).
    pub down: bool,
}

/// Mouse buttons reported by Raw Input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Button {
    Left,
    Right,
    Middle,
    /// Back side button (XBUTTON1, "button 4").
    X1,
    /// Forward side button (XBUTTON2, "button 5").
    X2,
}

impl Button {
    /// Windows virtual-key code for this button (`VK_LBUTTON`, `VK_RBUTTON`, ...).
    #[inline]
    pub fn vk_code(self) -> u16 {
        match self {
            Button::Left => 0x01,
            Button::Right => 0x02,
            Button::Middle => 0x04,
            Button::X1 => 0x05,
            Button::X2 => 0x06,
        }
    }

    /// Inverse of [`vk_code`](Self::vk_code).
    pub fn from_vk_code(vk: u16) -> Option<Self> {
        match vk {
            0x01 => Some(Button::Left),
            0x02 => Some(Button::Right),
            0x04 => Some(Button::Middle),
            0x05 => Some(Button::X1),
            0x06 => Some(Button::X2),
            _ => None,
        }
    }
}

/// Everything pending after a single pump, see [`RawInput::poll_all`](crate::RawInput::poll_all).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub mouse_move: Option<MouseMove>,
    pub mouse_button: Option<MouseButton>,
    pub mouse_scroll: Option<MouseScroll>,
    pub keyboard: Option<KeyboardKey>,
}

impl Frame {
    /// `true` when no category had data.
    pub fn is_empty(&self) -> bool {
        self.mouse_move.is_none()
            && self.mouse_button.is_none()
            && self.mouse_scroll.is_none()
            && self.keyboard.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_vk_codes_round_trip() {
        for b in [Button::Left, Button::Right, Button::Middle, Button::X1, Button::X2] {
            assert_eq!(Button::from_vk_code(b.vk_code()), Some(b));
        }
        assert_eq!(Button::from_vk_code(0x03), None); // VK_CANCEL
    }

    #[test]
    fn records_serialize_as_plain_json() {
        let scroll = MouseScroll { at: 7, amount: -120 };
        let json = serde_json::to_string(&scroll).unwrap();
        assert_eq!(json, r#"{"at":7,"amount":-120}"#);

        let press = MouseButton { at: 1, button: Button::X2, down: true };
        let back: MouseButton = serde_json::from_str(&serde_json::to_string(&press).unwrap()).unwrap();
        assert_eq!(back, press);
    }

    #[test]
    fn empty_frame() {
        assert!(Frame::default().is_empty());
        let f = Frame {
            mouse_scroll: Some(MouseScroll { at: 1, amount: 120 }),
            ..Frame::default()
        };
        assert!(!f.is_empty());
    }
}
