use crate::infra::{bootstrap, SiteBackend};
use clap::Args;
use internship_portal::backend::{CsvPositionSource, PositionSource};
use internship_portal::contact::{ContactField, ContactForm, ContactOutcome};
use internship_portal::error::AppError;
use internship_portal::interaction::Notification;
use internship_portal::internship::page::{CONFIRMATION_MESSAGE, CONFIRMATION_TITLE};
use internship_portal::internship::{
    CatalogSnapshot, CatalogState, DraftField, InternshipPage, LoadOutcome, SubmitOutcome,
};
use internship_portal::lifecycle::ViewLifecycle;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct PositionsArgs {
    /// Read the catalog from a `title,item` CSV export instead of the backend
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Print the catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    #[arg(long)]
    pub(crate) email: String,
    /// Position category title, e.g. "Backend"
    #[arg(long)]
    pub(crate) position: String,
}

#[derive(Args, Debug)]
pub(crate) struct ContactArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) message: String,
}

pub(crate) async fn run_positions(args: PositionsArgs) -> Result<(), AppError> {
    let config = bootstrap()?;

    let (snapshot, outcome) = match args.catalog_csv {
        Some(path) => load_once(&CsvPositionSource::new(path)).await,
        None => load_once(&SiteBackend::from_config(&config)?).await,
    };

    if args.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Catalog payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_catalog(&snapshot, outcome);
    Ok(())
}

async fn load_once<S: PositionSource>(source: &S) -> (CatalogSnapshot, LoadOutcome) {
    let catalog = CatalogState::new();
    let lifecycle = ViewLifecycle::mounted();
    let outcome = catalog.load_from(source, &lifecycle).await;
    lifecycle.unmount();
    (catalog.snapshot(), outcome)
}

pub(crate) fn render_catalog(snapshot: &CatalogSnapshot, outcome: LoadOutcome) {
    println!(
        "Position catalog ({:?} source, load outcome {:?})",
        snapshot.source, outcome
    );
    for category in &snapshot.positions {
        if category.items.is_empty() {
            println!("- {}", category.title);
        } else {
            println!("- {}: {}", category.title, category.items.join(", "));
        }
    }
}

pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let backend = Arc::new(SiteBackend::from_config(&config)?);
    let page = InternshipPage::mount(backend);

    page.set_field(DraftField::FirstName, args.first_name);
    page.set_field(DraftField::LastName, args.last_name);
    page.set_field(DraftField::Email, args.email);
    page.set_field(DraftField::Position, args.position);

    let outcome = page.submit().await;
    render_submit_outcome(&page, &outcome);
    page.unmount();
    Ok(())
}

pub(crate) fn render_submit_outcome<B>(page: &InternshipPage<B>, outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Submitted => {
            println!("{CONFIRMATION_TITLE}");
            println!("{CONFIRMATION_MESSAGE}");
        }
        SubmitOutcome::Incomplete(missing) => {
            let labels: Vec<_> = missing.iter().map(|field| field.label()).collect();
            println!("Please fill in: {}", labels.join(", "));
        }
        SubmitOutcome::Busy => println!("A submission is already in progress"),
        SubmitOutcome::Failed => {}
    }
    render_notifications(&page.take_notifications());
}

pub(crate) async fn run_contact(args: ContactArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let backend = Arc::new(SiteBackend::from_config(&config)?);
    let form = ContactForm::new(backend);

    form.set_field(ContactField::Name, args.name);
    form.set_field(ContactField::Email, args.email);
    form.set_field(ContactField::Message, args.message);

    render_contact_outcome(&form, &form.submit().await);
    Ok(())
}

pub(crate) fn render_contact_outcome<M>(form: &ContactForm<M>, outcome: &ContactOutcome) {
    if let ContactOutcome::Invalid(errors) = outcome {
        for error in errors {
            println!("- {:?}: {}", error.field, error.message);
        }
    }
    render_notifications(&form.take_notifications());
}

fn render_notifications(notifications: &[Notification]) {
    for notification in notifications {
        match &notification.description {
            Some(description) => println!(
                "[{:?}] {} - {}",
                notification.kind, notification.title, description
            ),
            None => println!("[{:?}] {}", notification.kind, notification.title),
        }
    }
}
