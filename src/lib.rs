//! rawpoll: latest-value polling of raw mouse and keyboard input.
//!
//! A [`RawInput`] context owns a hidden message-only window registered for Raw Input.
//! The most recent move, button, scroll and key events are latched into one slot
//! each; the `poll_*` functions pump pending window messages and then copy out and
//! clear the slot they ask about.
//!
//! Unread events are overwritten by newer ones of the same kind. Nothing is queued.

pub mod backends;
pub mod config;
pub mod context;
pub mod decode;
pub mod error;
pub mod event;
pub mod packet;
pub mod slots;
pub mod source;

pub use backends::virtual_input::VirtualSource;
#[cfg(windows)]
pub use backends::windows::WindowSource;
pub use config::Config;
pub use context::RawInput;
pub use decode::{decode, Updated};
pub use error::{Error, Result};
pub use event::*;
pub use source::EventSource;
