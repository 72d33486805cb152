use std::process::ExitCode;

use clap::Parser;

use es_template_manager::cli::{run, Cli};
use es_template_manager::client::EsClient;
use es_template_manager::config::load_config;
use es_template_manager::observability::init_logging;
use es_template_manager::templates::TemplateManager;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), cli.host.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    init_logging(
        cli.log_level
            .as_deref()
            .unwrap_or(&config.observability.log_level),
    );

    tracing::debug!(
        host = %config.connection.host,
        timeout_secs = config.connection.timeout_secs,
        retries = config.retries.max_attempts,
        "Configuration loaded"
    );

    let client = EsClient::new(&config.connection, config.retries.clone())?;
    let manager = TemplateManager::new(client);

    let mut stdout = std::io::stdout();
    let ok = run(&cli, &manager, &mut stdout).await?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
