use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Install the process-wide terminal logger. `level` comes from
/// [`log_level`](crate::config::ServerConfig::log_level); an unparseable
/// value means Info.
pub fn init(level: &str) {
    let level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);

    TermLogger::init(
        level,
        ConfigBuilder::new().set_time_format_rfc3339().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .expect("Logger already set");
}
