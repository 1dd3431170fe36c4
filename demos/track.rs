//! Print raw mouse/keyboard input as JSON lines.
//!
//! ```text
//! cargo run --example track -- [config.toml] [--seconds N]
//! RUST_LOG=rawpoll=debug cargo run --example track
//! ```

#[cfg(windows)]
fn main() {
    use rawpoll::{Button, Config, RawInput};
    use std::collections::BTreeSet;
    use std::time::{Duration, Instant};

    env_logger::init();

    let mut config = Config::default();
    let mut seconds: Option<u64> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--seconds" {
            seconds = args.next().and_then(|s| s.parse().ok());
        } else {
            config = Config::load(&arg).expect("load config");
        }
    }

    let mut input = RawInput::initialize_with(&config).expect("initialize raw input");
    let deadline = seconds.map(|s| Instant::now() + Duration::from_secs(s));

    let mut buttons: BTreeSet<Button> = BTreeSet::new();
    let mut keys: BTreeSet<u16> = BTreeSet::new();
    let mut vector = (0i32, 0i32);
    let mut scroll_dir = 0i32;

    while deadline.map_or(true, |d| Instant::now() < d) {
        let frame = input.poll_all();
        if frame.is_empty() {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        }

        if let Some(m) = frame.mouse_move {
            vector = (m.dx, m.dy);
        }
        if let Some(b) = frame.mouse_button {
            if b.down {
                buttons.insert(b.button);
            } else {
                buttons.remove(&b.button);
            }
        }
        if let Some(s) = frame.mouse_scroll {
            scroll_dir = s.amount.signum();
        }
        if let Some(k) = frame.keyboard {
            if k.down {
                keys.insert(k.key_code);
            } else {
                keys.remove(&k.key_code);
            }
        }

        println!("{}", serde_json::to_string(&frame).expect("serialize frame"));
        log::debug!(
            "vector={:?} scroll={} buttons={:?} keys={:02x?}",
            vector,
            scroll_dir,
            buttons,
            keys
        );
    }

    input.shutdown();
}

#[cfg(not(windows))]
fn main() {
    eprintln!("track: Raw Input is only available on Windows");
}
