use clap::Parser;
use tracing_subscriber::EnvFilter;
use pnl_dashboard::{cli, config, errors};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.with_ansi(!cli.no_color).init();
    }

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::Report(args) => cli::report::handle_report(args).await.map(|path| {
            if let Some(path) = path {
                eprintln!("Report written to {}", path.display());
            }
        }),
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        let class = e.classify();
        tracing::debug!(error_type = class.error_type, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(class.exit_code);
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::DashboardError> {
    let path = std::path::PathBuf::from(&args.config);
    let config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    println!("  company: {}", config.company_name());
    println!("  database: {}", config.database_path());
    println!("  webhook: {}", config.webhook_url().unwrap_or("disabled"));
    Ok(())
}
