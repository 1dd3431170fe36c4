//! Platform-independent raw input packets.
//!
//! These mirror the parts of the Windows `RAWMOUSE` / `RAWKEYBOARD` structures that
//! [`decode`](crate::decode::decode) needs. The Windows backend fills them from
//! `WM_INPUT` payloads; [`VirtualSource`](crate::backends::virtual_input::VirtualSource)
//! builds them by hand.

/// Keyboard part of a `WM_INPUT` payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawKeyboardPacket {
    /// Hardware scancode. May be 0 for synthesized input.
    pub make_code: u16,
    /// `RI_KEY_*` flag bits (break, E0, E1).
    pub flags: u16,
    /// Windows virtual-key code.
    pub vkey: u16,
}

/// Mouse part of a `WM_INPUT` payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawMousePacket {
    /// Relative delta X (raw counts).
    pub dx: i32,
    /// Relative delta Y (raw counts).
    pub dy: i32,
    /// `usButtonFlags` bitfield (`RI_MOUSE_*`).
    pub button_flags: u16,
    /// `usButtonData`: the wheel delta when a wheel flag is set.
    pub button_data: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawInputPacket {
    Keyboard(RawKeyboardPacket),
    Mouse(RawMousePacket),
}

/// A packet together with the time it was captured (ms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StampedPacket {
    pub at: u64,
    pub packet: RawInputPacket,
}

// Flag bits, kept local so the decoder builds on every platform.
pub const RI_KEY_BREAK: u16 = 0x0001;
pub const RI_KEY_E0: u16 = 0x0002;
pub const RI_KEY_E1: u16 = 0x0004;

pub const RI_MOUSE_LEFT_BUTTON_DOWN: u16 = 0x0001;
pub const RI_MOUSE_LEFT_BUTTON_UP: u16 = 0x0002;
pub const RI_MOUSE_RIGHT_BUTTON_DOWN: u16 = 0x0004;
pub const RI_MOUSE_RIGHT_BUTTON_UP: u16 = 0x0008;
pub const RI_MOUSE_MIDDLE_BUTTON_DOWN: u16 = 0x0010;
pub const RI_MOUSE_MIDDLE_BUTTON_UP: u16 = 0x0020;
pub const RI_MOUSE_BUTTON_4_DOWN: u16 = 0x0040;
pub const RI_MOUSE_BUTTON_4_UP: u16 = 0x0080;
pub const RI_MOUSE_BUTTON_5_DOWN: u16 = 0x0100;
pub const RI_MOUSE_BUTTON_5_UP: u16 = 0x0200;
pub const RI_MOUSE_WHEEL: u16 = 0x0400;
pub const RI_MOUSE_HWHEEL: u16 = 0x0800;
