use std::fs::OpenOptions;
use std::path::Path;

/// Environment variable holding the log filter (env_logger syntax)
pub const LOG_ENV: &str = "NEBULA_LOG";

/// Where diagnostics go
pub enum LogTarget<'a> {
    /// CLI runs: plain stderr
    Stderr,
    /// TUI runs: append to a file so the alternate screen stays clean
    File(&'a Path),
}

/// Initialise the global logger. Safe to call more than once; later calls are ignored.
pub fn init_logging(target: LogTarget<'_>, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/rustls are chatty at debug level
    builder.filter_module("rustls", log::LevelFilter::Warn);
    builder.filter_module("reqwest", log::LevelFilter::Warn);

    match target {
        LogTarget::Stderr => {
            builder.target(env_logger::Target::Stderr);
        }
        LogTarget::File(path) => {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(e) => {
                    eprintln!("warning: could not open log file {}: {e}", path.display());
                    // Keep the TUI clean: drop diagnostics rather than write to the terminal
                    builder.filter_level(log::LevelFilter::Off);
                }
            }
        }
    }
    let _ = builder.try_init();
}
