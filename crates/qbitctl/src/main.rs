mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qbitctl_api::Client;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    cli.global.output = Some(config::output_format(&cli.global, &cfg));

    match cli.command {
        // Config commands don't need a daemon connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // The catalog is static
        Command::Endpoints => {
            commands::endpoints::handle(&cli.global);
            Ok(())
        }

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "qbitctl", &mut std::io::stdout());
            Ok(())
        }

        // All other commands require a session
        cmd => {
            let (profile_name, settings) = config::resolve_settings(&cli.global, &cfg)?;
            let client = Client::with_transport(settings.url.as_str(), &settings.transport)?;

            tracing::info!(profile = %profile_name, url = %settings.url, "logging in");
            client
                .login(&settings.username, &settings.password)
                .await
                .map_err(|e| CliError::from(e).for_profile(&profile_name))?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &client, &cli.global).await;

            // Shutdown takes the WebUI down with it; logout is best-effort.
            if let Err(e) = client.logout().await {
                tracing::debug!(error = %e, "logout failed");
            }
            result
        }
    }
}
