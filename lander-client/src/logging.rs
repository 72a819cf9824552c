//! Log output for the client.

/// Sends every record at or above `level` to stderr with a wall clock
/// timestamp.
pub fn init(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // SDL and GL wrappers are chatty at debug level.
        .level_for("sdl2", log::LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()
}
