use clap::Parser;
use neurocinema::{app::App, config::AppConfig, error::user_friendly_message, logging, prompt, Result};
use std::io::IsTerminal;

/// Predict a movie's box office revenue from its details
#[derive(Parser, Debug)]
#[command(name = "neurocinema")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Ask for the details line by line instead of opening the TUI
    #[arg(short, long, default_value_t = false)]
    prompt: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long, default_value_t = false)]
    write_config: bool,
}

async fn run_tui(config: AppConfig) -> Result<()> {
    let mut app = App::new(config)?;
    app.init()?;
    let result = app.run().await;
    app.restore()?;
    result
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load()?;
    if cli.write_config {
        let path = config.save()?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    let prompt_mode = cli.prompt || !std::io::stdout().is_terminal();
    let log_path = logging::log_file_path();
    if let Err(e) = logging::init_file_logging(&config.log_level, &log_path) {
        eprintln!("Warning: {}", user_friendly_message(&e));
    }
    tracing::info!(prompt_mode, log = %log_path.display(), "neurocinema starting");

    if prompt_mode {
        prompt::run(&config).await
    } else {
        run_tui(config).await
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "neurocinema failed");
        eprintln!("{}", user_friendly_message(&e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_defaults_to_tui() {
        let cli = Cli::try_parse_from(["neurocinema"]).unwrap();
        assert!(!cli.prompt);
        assert!(!cli.write_config);
    }

    #[test]
    fn test_cli_write_config_flag() {
        let cli = Cli::try_parse_from(["neurocinema", "--write-config"]).unwrap();
        assert!(cli.write_config);
        assert!(!cli.prompt);
    }

    #[test]
    fn test_cli_prompt_flag() {
        assert!(Cli::try_parse_from(["neurocinema", "--prompt"]).unwrap().prompt);
        assert!(Cli::try_parse_from(["neurocinema", "-p"]).unwrap().prompt);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        let err = Cli::try_parse_from(["neurocinema", "--fast"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_help_and_version() {
        let err = Cli::try_parse_from(["neurocinema", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--prompt"));

        let err = Cli::try_parse_from(["neurocinema", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
