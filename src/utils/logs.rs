use std::io;
use std::str::FromStr;
use tracing::Level;

pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::WARN)
}

// Logs go to stderr; stdout belongs to the menu.
pub fn setup_tracing(level: &str, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_writer(io::stderr)
        // disable printing the name of the module in every log line.
        .with_target(false);
    if json {
        builder.with_ansi(false).json().init();
    } else {
        builder.init();
    }
}
