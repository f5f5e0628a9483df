use log::Level;
use std::fmt::Display;
use std::io::Write;

/// Sets up `env_logger` with bare messages and error lines in the level's
/// colour. `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{}", render_line(record.level(), record.args(), style))
        })
        .init();
}

/// Renders one log line. Only errors are wrapped in `style`, whose
/// alternate form (`{:#}`) resets it again.
pub fn render_line(level: Level, message: impl Display, style: impl Display) -> String {
    if level == Level::Error {
        format!("{style}{message}{style:#}")
    } else {
        message.to_string()
    }
}
