use crate::report::{render_funnel, OutputFormat};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use jobfunnel::error::AppError;
use jobfunnel::tracker::{
    ApplicationDraft, ApplicationNote, ApplicationStatus, ApplicationStore, InMemoryGateway,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date the sample histories are laid out from (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Output format for the funnel section
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
    /// Skip the per-application listing
    #[arg(long)]
    pub(crate) funnel_only: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        format,
        funnel_only,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let store = ApplicationStore::new(Arc::new(InMemoryGateway::new().with_today(today)));

    for draft in demo_applications(today) {
        if let Err(err) = store.create(draft) {
            println!("  Sample rejected: {}", err);
        }
    }

    if !funnel_only {
        println!("Job application tracker demo");
        println!("Tracked applications");
        for application in store.snapshot().iter() {
            let latest = application
                .latest_status()
                .map(ApplicationStatus::label)
                .unwrap_or("no events");
            println!(
                "- {} | {} @ {} | {} events | latest {}",
                application.id,
                application.role,
                application.company,
                application.status_history.len(),
                latest
            );
        }
        println!("\nStatus-transition funnel");
    }

    let stdout = std::io::stdout();
    render_funnel(&store.funnel(), format, stdout.lock())
}

/// Sample pipeline covering every funnel path.
pub(crate) fn demo_applications(today: NaiveDate) -> Vec<ApplicationDraft> {
    use ApplicationStatus::*;

    let ago = |days: i64| today - Duration::days(days);
    let draft = |company: &str, role: &str, applied: i64, steps: &[(i64, ApplicationStatus)]| {
        let mut draft = ApplicationDraft::new(company, role);
        draft.applied_date = Some(ago(applied));
        steps
            .iter()
            .fold(draft, |draft, (days, status)| draft.with_status(ago(*days), *status))
    };

    let mut top_pick = draft(
        "Northwind Labs",
        "Staff Engineer",
        40,
        &[(40, Applied), (33, Screen), (25, Interview), (18, Interview), (9, Offer)],
    );
    top_pick.top_job = true;
    top_pick.notes.push(ApplicationNote {
        occur_date: ago(9),
        description: "Offer call with hiring manager".to_string(),
    });

    vec![
        top_pick,
        draft("Contoso", "Platform Engineer", 35, &[(35, Applied)]),
        draft("Fabrikam", "SRE", 30, &[(30, Applied), (21, Rejected)]),
        draft(
            "Tailspin",
            "Backend Engineer",
            28,
            &[(28, Applied), (20, Screen), (12, Rejected)],
        ),
        draft(
            "Wingtip",
            "Data Engineer",
            26,
            &[(26, Applied), (19, Screen), (11, Interview), (3, Withdrawn)],
        ),
        draft("Adventure Works", "Tech Lead", 22, &[(22, Applied), (1, Ghosted)]),
        draft("Litware", "Rust Engineer", 15, &[(15, Applied)]),
        draft("Proseware", "Infrastructure Engineer", 12, &[]),
    ]
}
