use clap::{Args, ValueEnum};
use jobfunnel::config::AppConfig;
use jobfunnel::error::AppError;
use jobfunnel::funnel::export::{render_table, write_csv};
use jobfunnel::funnel::FunnelGraph;
use jobfunnel::telemetry::{self, LogTarget};
use jobfunnel::tracker::{ApplicationStore, HttpGateway};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable edge listing
    #[default]
    Table,
    /// Renderer payload (`nodes` + `links`)
    Json,
    /// `From,To,Count` rows
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct FunnelArgs {
    /// Base URL of a running jobfunnel service (defaults to APP_API_URL)
    #[arg(long)]
    pub(crate) url: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_funnel_report(args: FunnelArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogTarget::Stderr)?;

    let base_url = args.url.unwrap_or(config.remote.base_url);
    let gateway = HttpGateway::new(base_url, config.remote.timeout)
        .map_err(|err| AppError::Gateway(err.into()))?;
    let store = ApplicationStore::new(Arc::new(gateway));

    let snapshot = store.load()?;
    info!(applications = snapshot.len(), url = %store.gateway().base_url(), "loaded applications");

    let stdout = std::io::stdout();
    render_funnel(&store.funnel(), args.format, stdout.lock())
}

pub(crate) fn render_funnel<W: Write>(
    graph: &FunnelGraph,
    format: OutputFormat,
    mut out: W,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Table => out.write_all(render_table(graph).as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, graph).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&graph.links, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
