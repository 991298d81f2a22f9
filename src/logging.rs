use std::path::PathBuf;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use fern::colors::{Color, ColoredLevelConfig};

/// Console logging at `console_level`, plus an optional log file at
/// `file_level`. Console output goes to stderr so report output on stdout
/// stays clean.
pub fn setup_logging(
    console_level: log::LevelFilter,
    log_file: Option<PathBuf>,
    file_level: log::LevelFilter,
) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .debug(Color::BrightBlack)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(console_level)
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new().chain(console);

    if let Some(path) = log_file {
        let file = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(file_level)
            .chain(
                fern::log_file(&path)
                    .wrap_err_with(|| format!("Failed to open log file: {}", path.display()))?,
            );
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().wrap_err("Failed to initialize logging")?;
    Ok(())
}
