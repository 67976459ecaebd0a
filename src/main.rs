use clap::Parser;
use fractal::cli::commands::Cli;
use fractal::cli::handlers;
use fractal::logging;

fn main() {
    let cli = Cli::parse();

    let env_level = std::env::var(logging::LOG_ENV_VAR).ok();
    let level = match logging::resolve_level(cli.log_level.as_deref(), env_level.as_deref()) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    // Keep the handle alive until exit
    let _logger = match logging::init_logging(level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: could not start logging: {}", e);
            None
        }
    };

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
