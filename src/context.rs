//! The caller-owned polling context.
//!
//! [`RawInput`] ties an [`EventSource`] to a set of [`Slots`]. Every poll call first
//! pumps the source, which runs [`decode`] for each delivered packet, and then takes
//! the slot it was asked about. All of this happens synchronously on the calling
//! thread.
//!
//! # Example
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() -> rawpoll::Result<()> {
//! let mut input = rawpoll::RawInput::initialize()?;
//! loop {
//!     if let Some(m) = input.poll_mouse_move() {
//!         println!("moved {} {}", m.dx, m.dy);
//!     }
//!     if let Some(k) = input.poll_keyboard() {
//!         println!("key {:#04x} down={}", k.key_code, k.down);
//!     }
//! #   break;
//! }
//! input.shutdown();
//! # Ok(())
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```

use crate::decode::decode;
use crate::event::{Frame, KeyboardKey, MouseButton, MouseMove, MouseScroll};
use crate::slots::Slots;
use crate::source::EventSource;

pub struct RawInput<S: EventSource> {
    source: S,
    slots: Slots,
}

#[cfg(windows)]
impl RawInput<crate::backends::windows::WindowSource> {
    /// Create the hidden window and register for raw mouse and keyboard input,
    /// using [`Config::default`](crate::Config::default).
    pub fn initialize() -> crate::Result<Self> {
        Self::initialize_with(&crate::Config::default())
    }

    pub fn initialize_with(config: &crate::Config) -> crate::Result<Self> {
        let source = crate::backends::windows::WindowSource::open(config)?;
        Ok(Self::with_source(source))
    }
}

impl<S: EventSource> RawInput<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            slots: Slots::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn is_open(&self) -> bool {
        self.source.is_open()
    }

    fn pump(&mut self) {
        if !self.source.is_open() {
            return;
        }
        let slots = &mut self.slots;
        self.source.pump(&mut |stamped| {
            decode(&stamped.packet, stamped.at, slots);
        });
    }

    /// Latest nonzero motion since the last successful call.
    pub fn poll_mouse_move(&mut self) -> Option<MouseMove> {
        self.pump();
        self.slots.take_move()
    }

    pub fn poll_mouse_button(&mut self) -> Option<MouseButton> {
        self.pump();
        self.slots.take_button()
    }

    pub fn poll_mouse_scroll(&mut self) -> Option<MouseScroll> {
        self.pump();
        self.slots.take_scroll()
    }

    pub fn poll_keyboard(&mut self) -> Option<KeyboardKey> {
        self.pump();
        self.slots.take_key()
    }

    /// Pump once and drain all four slots.
    pub fn poll_all(&mut self) -> Frame {
        self.pump();
        self.slots.take_all()
    }

    /// Release the source and forget anything still latched.
    ///
    /// Best effort and idempotent. Polls after this return `None`.
    pub fn shutdown(&mut self) {
        if self.source.is_open() {
            log::debug!("shutting down raw input");
        }
        self.source.close();
        self.slots.clear();
    }
}

impl<S: EventSource> Drop for RawInput<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualSource;
    use crate::event::Button;

    #[test]
    fn each_poll_pumps_the_source() {
        let mut input = RawInput::with_source(VirtualSource::new());
        input.source_mut().press(Button::Left);
        assert!(input.poll_mouse_button().is_some());

        input.source_mut().scroll(-120);
        assert_eq!(input.poll_mouse_scroll().map(|s| s.amount), Some(-120));
    }

    #[test]
    fn pending_packets_are_discarded_after_shutdown() {
        let mut input = RawInput::with_source(VirtualSource::new());
        input.source_mut().move_by(1, 1);
        input.shutdown();
        assert!(!input.is_open());
        assert!(input.poll_mouse_move().is_none());
    }
}
