use std::io::Write;

use env_logger::fmt::Color;
use log::{Level, LevelFilter};

/// Console logger. `RUST_LOG` wins when set; otherwise this crate logs at
/// debug level in debug builds and info in release, everything else at warn.
pub fn setup_logger() {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter(None, LevelFilter::Warn);
        if cfg!(debug_assertions) {
            builder.filter(Some("box_labeler"), LevelFilter::Debug);
        } else {
            builder.filter(Some("box_labeler"), LevelFilter::Info);
        }
    }

    builder.format(|buf, record| {
        let mut level_style = buf.style();
        match record.level() {
            Level::Error => level_style.set_color(Color::Red).set_bold(true),
            Level::Warn => level_style.set_color(Color::Yellow).set_bold(true),
            Level::Info => level_style.set_color(Color::Green).set_bold(true),
            Level::Debug => level_style.set_color(Color::Blue).set_bold(true),
            Level::Trace => level_style.set_color(Color::White),
        };

        writeln!(
            buf,
            "{} {} [{}] {}",
            buf.timestamp_millis(),
            level_style.value(record.level()),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    // may already be set, e.g. by tests
    let _ = builder.try_init();
}
