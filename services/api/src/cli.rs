use crate::commands::{run_apply, run_contact, run_positions, ApplyArgs, ContactArgs, PositionsArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use internship_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Internship Portal",
    about = "Serve and exercise the academy internship portal from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Load the position catalog once and print it
    Positions(PositionsArgs),
    /// Submit an internship application
    Apply(ApplyArgs),
    /// Send a message through the contact form
    Contact(ContactArgs),
    /// Run an end-to-end demo against the in-memory backend
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Positions(args) => run_positions(args).await,
        Command::Apply(args) => run_apply(args).await,
        Command::Contact(args) => run_contact(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
