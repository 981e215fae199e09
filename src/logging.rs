use log::LevelFilter;
use std::path::PathBuf;

/// Installs the process-wide logger used by harness binaries: timestamped
/// lines to stdout, optionally mirrored to a log file. The reporter itself
/// only ever talks to the `log` facade; skipping this entirely is fine.
pub fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?);
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
