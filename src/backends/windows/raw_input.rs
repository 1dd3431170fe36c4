//! Windows Raw Input parsing helpers (keyboard + mouse).
//!
//! This module only turns `WM_INPUT` payloads into [`RawInputPacket`]s. Which slot a
//! packet lands in is decided by [`decode`](crate::decode::decode).
//!
//! ## Conventions
//! - Mouse deltas are reported in **raw OS units** (counts) as provided by Raw Input.
//! - Wheel data is passed through untouched in `button_data`.
//! - Keyboard scancodes come from `MakeCode`; when that is 0 (some synthesized input)
//!   the scancode is recovered from the virtual key.

use crate::packet::{RawInputPacket, RawKeyboardPacket, RawMousePacket, RI_KEY_E0};
use core::ffi::c_void;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{MapVirtualKeyW, MAPVK_VK_TO_VSC_EX};
use windows_sys::Win32::UI::Input::*;

// Only consulted when RAWKEYBOARD.MakeCode is 0.
#[inline]
fn vkey_to_scancode(vkey: u16) -> Option<(u16, bool)> {
    // MAPVK_VK_TO_VSC_EX encodes extended keys as 0xE0xx.
    let sc = unsafe { MapVirtualKeyW(vkey as u32, MAPVK_VK_TO_VSC_EX) };
    if sc == 0 {
        return None;
    }
    if (sc & 0xFF00) == 0xE000 {
        Some(((sc & 0x00FF) as u16, true))
    } else {
        Some((sc as u16, false))
    }
}

/// Read the payload behind a `WM_INPUT` lparam: query the size, then copy the bytes.
pub(crate) fn read_wm_input(lparam: isize) -> Option<RawInputPacket> {
    let hdr_sz = core::mem::size_of::<RAWINPUTHEADER>() as u32;
    unsafe {
        let mut size: u32 = 0;
        let r0 = GetRawInputData(lparam as _, RID_INPUT, core::ptr::null_mut(), &mut size, hdr_sz);
        if r0 == u32::MAX || size == 0 {
            return None;
        }

        let mut buf = vec![0u8; size as usize];
        let r1 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            buf.as_mut_ptr() as *mut c_void,
            &mut size,
            hdr_sz,
        );
        if r1 == u32::MAX {
            return None;
        }

        read_raw_input_bytes(&buf)
    }
}

/// Parse a `RID_INPUT` payload (bytes returned by `GetRawInputData`).
///
/// Returns `None` for short buffers and for device types other than mouse/keyboard.
pub(crate) fn read_raw_input_bytes(buf: &[u8]) -> Option<RawInputPacket> {
    let hdr_sz = core::mem::size_of::<RAWINPUTHEADER>();
    if buf.len() < hdr_sz {
        return None;
    }

    unsafe {
        // RAWINPUT is variable-sized, so read the header and then only the part we need.
        let hdr: RAWINPUTHEADER = core::ptr::read_unaligned(buf.as_ptr() as *const RAWINPUTHEADER);
        let data_ptr = buf.as_ptr().add(hdr_sz);

        match hdr.dwType {
            RIM_TYPEKEYBOARD => {
                if buf.len() < hdr_sz + core::mem::size_of::<RAWKEYBOARD>() {
                    return None;
                }
                let kbd: RAWKEYBOARD = core::ptr::read_unaligned(data_ptr as *const RAWKEYBOARD);
                let mut flags = kbd.Flags;
                let vkey = kbd.VKey;

                let make_code = if kbd.MakeCode != 0 {
                    kbd.MakeCode
                } else if let Some((sc, ext)) = vkey_to_scancode(vkey) {
                    if ext {
                        flags |= RI_KEY_E0;
                    }
                    sc
                } else {
                    0
                };

                Some(RawInputPacket::Keyboard(RawKeyboardPacket { make_code, flags, vkey }))
            }

            RIM_TYPEMOUSE => {
                if buf.len() < hdr_sz + core::mem::size_of::<RAWMOUSE>() {
                    return None;
                }
                let m: RAWMOUSE = core::ptr::read_unaligned(data_ptr as *const RAWMOUSE);

                Some(RawInputPacket::Mouse(RawMousePacket {
                    dx: m.lLastX,
                    dy: m.lLastY,
                    button_flags: m.Anonymous.Anonymous.usButtonFlags,
                    button_data: m.Anonymous.Anonymous.usButtonData,
                }))
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_buffer_is_rejected() {
        assert_eq!(read_raw_input_bytes(&[0u8; 4]), None);
    }

    #[test]
    fn header_without_body_is_rejected() {
        let hdr_sz = core::mem::size_of::<RAWINPUTHEADER>();
        let mut buf = vec![0u8; hdr_sz];
        buf[..4].copy_from_slice(&RIM_TYPEMOUSE.to_ne_bytes());
        assert_eq!(read_raw_input_bytes(&buf), None);
    }

    #[test]
    fn parses_mouse_payload() {
        let hdr_sz = core::mem::size_of::<RAWINPUTHEADER>();
        let mut hdr: RAWINPUTHEADER = unsafe { core::mem::zeroed() };
        hdr.dwType = RIM_TYPEMOUSE;
        let mut m: RAWMOUSE = unsafe { core::mem::zeroed() };
        m.lLastX = 5;
        m.lLastY = -3;
        m.Anonymous.Anonymous.usButtonFlags = crate::packet::RI_MOUSE_WHEEL;
        m.Anonymous.Anonymous.usButtonData = 120;

        let mut buf = vec![0u8; hdr_sz + core::mem::size_of::<RAWMOUSE>()];
        unsafe {
            core::ptr::write_unaligned(buf.as_mut_ptr() as *mut RAWINPUTHEADER, hdr);
            core::ptr::write_unaligned(buf.as_mut_ptr().add(hdr_sz) as *mut RAWMOUSE, m);
        }

        assert_eq!(
            read_raw_input_bytes(&buf),
            Some(RawInputPacket::Mouse(RawMousePacket {
                dx: 5,
                dy: -3,
                button_flags: crate::packet::RI_MOUSE_WHEEL,
                button_data: 120,
            }))
        );
    }
}
