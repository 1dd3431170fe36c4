//! Event sources for `rawpoll`.
//!
//! Implementations of [`EventSource`](crate::source::EventSource):
//! - **`windows`**: Raw Input through a hidden message-only window (Windows only).
//! - **`virtual_input`**: scripted packets, for tests and for hosts that own their
//!   own message loop and forward `WM_INPUT` payloads themselves.

#[cfg(windows)]
#[cfg_attr(docsrs, doc(cfg(windows)))]
pub mod windows;

pub mod virtual_input;
