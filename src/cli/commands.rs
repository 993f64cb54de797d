use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "pnl-dashboard", version, about = "Project profit-and-loss dashboard service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Export a P&L report without starting the server
    Report(ReportArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database path (overrides server.database)
    #[arg(long)]
    pub db: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// SQLite database path (overrides server.database)
    #[arg(long)]
    pub db: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// First month included (YYYY-MM or YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last month included (YYYY-MM or YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Export format: csv, markdown
    #[arg(short, long, default_value = "csv")]
    pub format: String,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
