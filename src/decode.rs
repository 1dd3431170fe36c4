//! Turns one raw packet into slot updates.
//!
//! This is the whole event demultiplexer: it knows which physical event a packet
//! carries and which slot it overwrites. It never touches the OS, so every rule
//! here is testable with hand-built packets.

use crate::event::{Button, KeyboardKey, MouseButton, MouseMove, MouseScroll};
use crate::packet::*;
use crate::slots::Slots;

/// Which slots a packet overwrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Updated {
    pub mouse_move: bool,
    pub mouse_button: bool,
    pub mouse_scroll: bool,
    pub keyboard: bool,
}

impl Updated {
    pub fn is_empty(&self) -> bool {
        !(self.mouse_move || self.mouse_button || self.mouse_scroll || self.keyboard)
    }
}

// Only one transition per packet is latched; earlier entries win.
const BUTTON_TRANSITIONS: &[(u16, Button, bool)] = &[
    (RI_MOUSE_LEFT_BUTTON_DOWN, Button::Left, true),
    (RI_MOUSE_LEFT_BUTTON_UP, Button::Left, false),
    (RI_MOUSE_RIGHT_BUTTON_DOWN, Button::Right, true),
    (RI_MOUSE_RIGHT_BUTTON_UP, Button::Right, false),
    (RI_MOUSE_MIDDLE_BUTTON_DOWN, Button::Middle, true),
    (RI_MOUSE_MIDDLE_BUTTON_UP, Button::Middle, false),
    (RI_MOUSE_BUTTON_4_DOWN, Button::X1, true),
    (RI_MOUSE_BUTTON_4_UP, Button::X1, false),
    (RI_MOUSE_BUTTON_5_DOWN, Button::X2, true),
    (RI_MOUSE_BUTTON_5_UP, Button::X2, false),
];

/// First button transition encoded in `RI_MOUSE_*` flags, if any.
pub fn button_transition(flags: u16) -> Option<(Button, bool)> {
    BUTTON_TRANSITIONS
        .iter()
        .find(|(mask, _, _)| flags & mask != 0)
        .map(|&(_, button, down)| (button, down))
}

/// Decode `packet` captured at `at` into `slots`.
pub fn decode(packet: &RawInputPacket, at: u64, slots: &mut Slots) -> Updated {
    let mut updated = Updated::default();

    match *packet {
        RawInputPacket::Mouse(m) => {
            updated.mouse_move = slots.latch_move(MouseMove { at, dx: m.dx, dy: m.dy });

            if let Some((button, down)) = button_transition(m.button_flags) {
                slots.latch_button(MouseButton { at, button, down });
                updated.mouse_button = true;
            }

            if m.button_flags & RI_MOUSE_WHEEL != 0 {
                slots.latch_scroll(MouseScroll {
                    at,
                    amount: m.button_data as i16 as i32,
                });
                updated.mouse_scroll = true;
            }
        }
        RawInputPacket::Keyboard(k) => {
            slots.latch_key(KeyboardKey {
                at,
                key_code: k.vkey,
                scan_code: k.make_code,
                extended: k.flags & (RI_KEY_E0 | RI_KEY_E1) != 0,
                down: k.flags & RI_KEY_BREAK == 0,
            });
            updated.keyboard = true;
        }
    }

    log::trace!("decoded {:?} at {} -> {:?}", packet, at, updated);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(dx: i32, dy: i32, button_flags: u16, button_data: u16) -> RawInputPacket {
        RawInputPacket::Mouse(RawMousePacket { dx, dy, button_flags, button_data })
    }

    #[test]
    fn plain_motion_updates_only_move() {
        let mut slots = Slots::new();
        let u = decode(&mouse(5, -3, 0, 0), 10, &mut slots);
        assert_eq!(u, Updated { mouse_move: true, ..Updated::default() });
        assert_eq!(slots.take_move(), Some(MouseMove { at: 10, dx: 5, dy: -3 }));
    }

    #[test]
    fn button_only_packet_keeps_unread_motion() {
        let mut slots = Slots::new();
        decode(&mouse(2, 2, 0, 0), 1, &mut slots);
        let u = decode(&mouse(0, 0, RI_MOUSE_RIGHT_BUTTON_DOWN, 0), 2, &mut slots);

        assert!(!u.mouse_move);
        assert!(u.mouse_button);
        assert_eq!(slots.take_move(), Some(MouseMove { at: 1, dx: 2, dy: 2 }));
        assert_eq!(
            slots.take_button(),
            Some(MouseButton { at: 2, button: Button::Right, down: true })
        );
    }

    #[test]
    fn first_transition_wins_within_a_packet() {
        assert_eq!(
            button_transition(RI_MOUSE_LEFT_BUTTON_UP | RI_MOUSE_RIGHT_BUTTON_DOWN),
            Some((Button::Left, false))
        );
        assert_eq!(
            button_transition(RI_MOUSE_BUTTON_5_UP | RI_MOUSE_WHEEL),
            Some((Button::X2, false))
        );
        assert_eq!(button_transition(RI_MOUSE_WHEEL | RI_MOUSE_HWHEEL), None);
    }

    #[test]
    fn wheel_sign_is_preserved() {
        let mut slots = Slots::new();

        decode(&mouse(0, 0, RI_MOUSE_WHEEL, 120), 1, &mut slots);
        assert_eq!(slots.take_scroll(), Some(MouseScroll { at: 1, amount: 120 }));

        decode(&mouse(0, 0, RI_MOUSE_WHEEL, (-240i16) as u16), 2, &mut slots);
        assert_eq!(slots.take_scroll(), Some(MouseScroll { at: 2, amount: -240 }));
    }

    #[test]
    fn horizontal_wheel_is_not_latched() {
        let mut slots = Slots::new();
        let u = decode(&mouse(0, 0, RI_MOUSE_HWHEEL, 120), 1, &mut slots);
        assert!(u.is_empty());
        assert!(slots.is_empty());
    }

    #[test]
    fn keyboard_make_and_break() {
        let mut slots = Slots::new();

        let make = RawInputPacket::Keyboard(RawKeyboardPacket { make_code: 0x1E, flags: 0, vkey: 0x41 });
        decode(&make, 5, &mut slots);
        assert_eq!(
            slots.take_key(),
            Some(KeyboardKey { at: 5, key_code: 0x41, scan_code: 0x1E, extended: false, down: true })
        );

        // Right Ctrl release: E0 prefix + break.
        let brk = RawInputPacket::Keyboard(RawKeyboardPacket {
            make_code: 0x1D,
            flags: RI_KEY_BREAK | RI_KEY_E0,
            vkey: 0x11,
        });
        let u = decode(&brk, 6, &mut slots);
        assert_eq!(u, Updated { keyboard: true, ..Updated::default() });
        let key = slots.take_key().unwrap();
        assert!(!key.down);
        assert!(key.extended);
    }

    #[test]
    fn combined_packet_updates_three_slots() {
        let mut slots = Slots::new();
        let u = decode(
            &mouse(1, 0, RI_MOUSE_MIDDLE_BUTTON_DOWN | RI_MOUSE_WHEEL, 120),
            3,
            &mut slots,
        );
        assert!(u.mouse_move && u.mouse_button && u.mouse_scroll && !u.keyboard);
    }
}
