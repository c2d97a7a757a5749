use crate::commands::{render_catalog, render_contact_outcome, render_submit_outcome};
use chrono::Local;
use clap::Args;
use internship_portal::backend::InMemoryBackend;
use internship_portal::contact::{ContactField, ContactForm};
use internship_portal::error::AppError;
use internship_portal::internship::{DraftField, InternshipPage, PositionCategory};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Start with an empty remote catalog so the fallback stays in place.
    #[arg(long)]
    pub(crate) empty_catalog: bool,
    /// Take the backend offline before the first submission to show the retry path.
    #[arg(long)]
    pub(crate) simulate_outage: bool,
    /// Skip the contact form portion of the demo.
    #[arg(long)]
    pub(crate) skip_contact: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        empty_catalog,
        simulate_outage,
        skip_contact,
    } = args;

    println!(
        "Internship portal demo ({})",
        Local::now().format("%Y-%m-%d %H:%M")
    );

    let positions = if empty_catalog {
        Vec::new()
    } else {
        demo_positions()
    };
    let backend = Arc::new(InMemoryBackend::with_positions(positions));
    let page = InternshipPage::mount(backend.clone());

    println!("\nOn mount");
    println!(
        "- {} categories from the {:?} catalog",
        page.positions().len(),
        page.view().catalog_source
    );

    let outcome = page.load_positions().await;
    println!("\nAfter catalog load");
    render_catalog(&page.catalog(), outcome);

    println!("\nApplication intake");
    page.set_field(DraftField::FirstName, "Somchai");
    page.set_field(DraftField::LastName, "Jaidee");
    page.set_field(DraftField::Email, "somchai@example.com");
    page.set_field(DraftField::Position, "Backend");

    if simulate_outage {
        backend.set_offline(true);
        let outcome = page.submit().await;
        render_submit_outcome(&page, &outcome);
        println!(
            "- Draft kept for retry: {} {} ({})",
            page.draft().first_name,
            page.draft().last_name,
            page.draft().position
        );
        backend.set_offline(false);
    }

    let outcome = page.submit().await;
    render_submit_outcome(&page, &outcome);
    page.dismiss_confirmation();

    match serde_json::to_string_pretty(&backend.applications()) {
        Ok(json) => println!("  Stored rows:\n{}", json),
        Err(err) => println!("  Stored rows unavailable: {}", err),
    }
    page.unmount();

    if skip_contact {
        return Ok(());
    }

    println!("\nContact form");
    let form = ContactForm::new(backend.clone());
    form.set_field(ContactField::Name, "Somchai Jaidee");
    form.set_field(ContactField::Email, "not-an-email");
    form.set_field(ContactField::Message, "สนใจเข้าร่วม BOTNOI Academy");
    render_contact_outcome(&form, &form.submit().await);

    form.set_field(ContactField::Email, "somchai@example.com");
    render_contact_outcome(&form, &form.submit().await);
    println!("- {} message(s) relayed", backend.contact_messages().len());

    Ok(())
}

fn demo_positions() -> Vec<PositionCategory> {
    vec![
        PositionCategory {
            title: "Sales".to_string(),
            items: vec!["Sales Executive".to_string()],
        },
        PositionCategory {
            title: "Backend".to_string(),
            items: vec!["Rust Developer".to_string(), "Go Developer".to_string()],
        },
        PositionCategory {
            title: "NLP".to_string(),
            items: vec!["NLP Engineer".to_string()],
        },
    ]
}
