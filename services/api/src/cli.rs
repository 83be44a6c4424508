use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_funnel_report, FunnelArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobfunnel::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "jobfunnel",
    about = "Track job applications and report how they move through the hiring funnel",
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
    /// Print the status-transition funnel of a running service
    Funnel(FunnelArgs),
    /// Seed an in-memory tracker with sample applications and print its funnel
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
        // The HTTP gateway blocks; keep it off the async workers.
        Command::Funnel(args) => tokio::task::spawn_blocking(move || run_funnel_report(args))
            .await
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?,
        Command::Demo(args) => run_demo(args),
    }
}
