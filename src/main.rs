use clap::Parser;
use nebula_nav::cli::commands::Cli;
use nebula_nav::cli::handlers;
use nebula_nav::io::config_io;
use nebula_nav::io::logging::{self, LogTarget};

const LOG_FILE: &str = "nebula.log";

fn main() {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config_io::default_config_path);
    let config = config_io::load_config(&config_path);
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref(), &config);

    let result = match cli.command {
        None => {
            // No subcommand → launch TUI; diagnostics go to a file
            if let Err(e) = std::fs::create_dir_all(&data_dir) {
                eprintln!("error: could not create {}: {}", data_dir.display(), e);
                std::process::exit(1);
            }
            logging::init_logging(LogTarget::File(&data_dir.join(LOG_FILE)), cli.verbose);
            nebula_nav::tui::run(&config, &data_dir)
        }
        Some(_) => {
            logging::init_logging(LogTarget::Stderr, cli.verbose);
            handlers::dispatch(cli, &config, &data_dir)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
