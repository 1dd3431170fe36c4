//! Windows Raw Input backend.
//!
//! - [`raw_input`]: `WM_INPUT` payload parsing into [`RawInputPacket`](crate::packet::RawInputPacket)s
//! - [`window`]: the hidden message-only window and its [`EventSource`](crate::source::EventSource) impl
//!
//! Most users should not touch these directly. Prefer
//! [`RawInput::initialize`](crate::RawInput::initialize).

pub mod raw_input;
pub mod window;

pub use window::WindowSource;
