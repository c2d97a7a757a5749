use std::sync::Arc;

use super::common::*;
use crate::interaction::{NotificationKind, SubmitState};
use crate::internship::page::SUBMIT_FAILED_MESSAGE;
use crate::internship::{ApplicationDraft, DraftField, InternshipPage, SubmitOutcome};

fn fill(page: &InternshipPage<ScriptedBackend>, draft: &ApplicationDraft) {
    for field in DraftField::ALL {
        assert!(page.set_field(field, draft.get(field)));
    }
}

#[tokio::test]
async fn successful_submit_inserts_once_clears_form_and_opens_dialog() {
    let backend = backend(Scripted::Positions(Vec::new()));
    let page = InternshipPage::mount(backend.clone());
    fill(&page, &valid_draft());

    let outcome = page.submit().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(backend.inserted(), vec![valid_draft().to_row()]);
    assert!(page.draft().is_empty());
    assert!(page.confirmation_open());
    assert_eq!(page.submit_state(), SubmitState::Idle);

    page.dismiss_confirmation();
    assert!(!page.confirmation_open());
}

#[tokio::test]
async fn failed_submit_keeps_draft_and_raises_error_notification() {
    let backend = Arc::new(ScriptedBackend::new(Scripted::Positions(Vec::new())).failing_inserts());
    let page = InternshipPage::mount(backend.clone());
    fill(&page, &valid_draft());

    let outcome = page.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(page.draft(), valid_draft());
    assert!(!page.confirmation_open());
    assert_eq!(page.submit_state(), SubmitState::Idle);

    let notifications = page.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].title, SUBMIT_FAILED_MESSAGE);
    assert!(page.take_notifications().is_empty());
}

#[tokio::test]
async fn retry_after_failure_sends_a_second_independent_row() {
    let backend = Arc::new(ScriptedBackend::new(Scripted::Positions(Vec::new())).failing_inserts());
    let page = InternshipPage::mount(backend.clone());
    fill(&page, &valid_draft());

    page.submit().await;
    page.submit().await;

    assert_eq!(backend.inserted().len(), 2);
}

#[tokio::test]
async fn submit_while_in_flight_is_ignored() {
    let backend = Arc::new(ScriptedBackend::new(Scripted::Positions(Vec::new())).gated());
    let page = Arc::new(InternshipPage::mount(backend.clone()));
    fill(&page, &valid_draft());

    let first = {
        let page = page.clone();
        tokio::spawn(async move { page.submit().await })
    };
    while backend.inserted().is_empty() {
        tokio::task::yield_now().await;
    }

    assert_eq!(page.submit_state(), SubmitState::Submitting);
    assert_eq!(page.view().submit_label, "Submitting...");
    assert_eq!(page.submit().await, SubmitOutcome::Busy);
    assert!(!page.set_field(DraftField::Email, "other@b.com"));

    backend.release();
    assert_eq!(first.await.expect("submit joins"), SubmitOutcome::Submitted);
    assert_eq!(backend.inserted().len(), 1);
    assert_eq!(page.submit_state(), SubmitState::Idle);
}

#[tokio::test]
async fn incomplete_draft_never_reaches_the_backend() {
    let backend = backend(Scripted::Positions(Vec::new()));
    let page = InternshipPage::mount(backend.clone());
    page.set_field(DraftField::FirstName, "A");
    page.set_field(DraftField::Email, "a@b.com");

    let outcome = page.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Incomplete(vec![DraftField::LastName, DraftField::Position])
    );
    assert!(backend.inserted().is_empty());
    assert_eq!(page.draft().first_name, "A");
    assert_eq!(page.submit_state(), SubmitState::Idle);
}

#[tokio::test]
async fn whitespace_only_field_is_still_submitted() {
    let backend = backend(Scripted::Positions(Vec::new()));
    let page = InternshipPage::mount(backend.clone());
    fill(&page, &valid_draft());
    page.set_field(DraftField::FirstName, " ");

    assert_eq!(page.submit().await, SubmitOutcome::Submitted);

    let inserted = backend.inserted();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].first_name, " ");
}

#[tokio::test]
async fn submission_resolving_after_unmount_leaves_state_alone() {
    let backend = Arc::new(ScriptedBackend::new(Scripted::Positions(Vec::new())).gated());
    let page = Arc::new(InternshipPage::mount(backend.clone()));
    fill(&page, &valid_draft());

    let pending = {
        let page = page.clone();
        tokio::spawn(async move { page.submit().await })
    };
    while backend.inserted().is_empty() {
        tokio::task::yield_now().await;
    }
    page.unmount();
    backend.release();

    assert_eq!(pending.await.expect("submit joins"), SubmitOutcome::Submitted);
    assert!(!page.confirmation_open());
    assert_eq!(page.draft(), valid_draft());
}
