use crate::event::Button;
use crate::packet::*;
use crate::source::EventSource;
use std::collections::VecDeque;

/// Scripted [`EventSource`]: packets fed here come out on the next pump.
///
/// Timestamps come from an internal millisecond clock that starts at 1 and
/// advances by one per fed packet unless set explicitly.
pub struct VirtualSource {
    queue: VecDeque<StampedPacket>,
    now: u64,
    open: bool,
}

impl Default for VirtualSource {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualSource {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            now: 0,
            open: true,
        }
    }

    /// Set the clock; the next packet is stamped `ms + 1`.
    pub fn set_time(&mut self, ms: u64) {
        self.now = ms;
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    /// Number of packets waiting for the next pump.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Inject a raw packet. Ignored once the source is closed.
    pub fn feed(&mut self, packet: RawInputPacket) {
        if !self.open {
            return;
        }
        self.now += 1;
        self.queue.push_back(StampedPacket { at: self.now, packet });
    }

    fn feed_mouse(&mut self, m: RawMousePacket) {
        self.feed(RawInputPacket::Mouse(m));
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.feed_mouse(RawMousePacket { dx, dy, ..Default::default() });
    }

    pub fn press(&mut self, button: Button) {
        self.feed_mouse(RawMousePacket {
            button_flags: button_flag(button, true),
            ..Default::default()
        });
    }

    pub fn release(&mut self, button: Button) {
        self.feed_mouse(RawMousePacket {
            button_flags: button_flag(button, false),
            ..Default::default()
        });
    }

    /// Vertical wheel, in `WHEEL_DELTA` units (positive = up).
    pub fn scroll(&mut self, amount: i16) {
        self.feed_mouse(RawMousePacket {
            button_flags: RI_MOUSE_WHEEL,
            button_data: amount as u16,
            ..Default::default()
        });
    }

    pub fn key_down(&mut self, vkey: u16, scan_code: u16) {
        self.feed(RawInputPacket::Keyboard(RawKeyboardPacket {
            make_code: scan_code,
            flags: 0,
            vkey,
        }));
    }

    pub fn key_up(&mut self, vkey: u16, scan_code: u16) {
        self.feed(RawInputPacket::Keyboard(RawKeyboardPacket {
            make_code: scan_code,
            flags: RI_KEY_BREAK,
            vkey,
        }));
    }
}

fn button_flag(button: Button, down: bool) -> u16 {
    match (button, down) {
        (Button::Left, true) => RI_MOUSE_LEFT_BUTTON_DOWN,
        (Button::Left, false) => RI_MOUSE_LEFT_BUTTON_UP,
        (Button::Right, true) => RI_MOUSE_RIGHT_BUTTON_DOWN,
        (Button::Right, false) => RI_MOUSE_RIGHT_BUTTON_UP,
        (Button::Middle, true) => RI_MOUSE_MIDDLE_BUTTON_DOWN,
        (Button::Middle, false) => RI_MOUSE_MIDDLE_BUTTON_UP,
        (Button::X1, true) => RI_MOUSE_BUTTON_4_DOWN,
        (Button::X1, false) => RI_MOUSE_BUTTON_4_UP,
        (Button::X2, true) => RI_MOUSE_BUTTON_5_DOWN,
        (Button::X2, false) => RI_MOUSE_BUTTON_5_UP,
    }
}

impl EventSource for VirtualSource {
    fn pump(&mut self, sink: &mut dyn FnMut(StampedPacket)) {
        while let Some(p) = self.queue.pop_front() {
            sink(p);
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.queue.clear();
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
