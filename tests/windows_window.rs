#![cfg(windows)]

use rawpoll::{Config, EventSource, RawInput};

#[test]
fn initialize_poll_shutdown() {
    let mut input = RawInput::initialize().expect("raw input available");
    assert!(input.is_open());
    assert!(!input.source().hwnd().is_null());

    // Whatever the real devices are doing, polling never blocks or fails.
    let _ = input.poll_all();

    input.shutdown();
    input.shutdown();
    assert!(!input.is_open());
    assert!(input.poll_all().is_empty());
}

#[test]
fn keyboard_only_context() {
    let cfg = Config {
        mouse: false,
        background: false,
        ..Config::default()
    };
    let mut input = RawInput::initialize_with(&cfg).expect("raw input available");
    assert!(input.poll_mouse_move().is_none());
    input.source_mut().close();
    assert!(!input.is_open());
}

#[test]
fn invalid_config_is_rejected_before_touching_the_os() {
    let cfg = Config {
        mouse: false,
        keyboard: false,
        ..Config::default()
    };
    assert!(matches!(
        RawInput::initialize_with(&cfg),
        Err(rawpoll::Error::InvalidConfig(_))
    ));
}
