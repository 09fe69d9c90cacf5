use super::*;
use crate::net::types::{CompanyRef, Company, UserData};

// =============================================================
// Helpers
// =============================================================

fn job() -> Job {
    Job {
        id: "J1".to_owned(),
        title: "Rust Engineer".to_owned(),
        is_open: true,
        company: Some(CompanyRef::Populated(Company { id: None, name: "Acme".to_owned() })),
    }
}

fn user() -> User {
    User { data: Some(UserData { id: "U1".to_owned(), username: "alice".to_owned() }) }
}

fn resume() -> ResumeFile {
    ResumeFile { name: "R.pdf".to_owned(), content_type: "application/pdf".to_owned(), bytes: vec![7; 16] }
}

fn apply() -> EntryControl {
    EntryControl::for_job(true, false)
}

fn opened() -> ApplyWorkflow {
    let mut wf = ApplyWorkflow::default();
    assert!(wf.open(apply()));
    wf
}

fn fill(wf: &mut ApplyWorkflow) {
    let draft = wf.draft_mut();
    draft.set_experience("3");
    draft.set_skills("go,rust");
    draft.set_education(Education::Graduate);
    draft.set_resume(Some(resume()));
}

// =============================================================
// EntryControl
// =============================================================

#[test]
fn entry_control_closed_job_wins_over_applied() {
    for applied in [false, true] {
        let entry = EntryControl::for_job(false, applied);
        assert_eq!(entry.label, "Hiring Closed");
        assert!(!entry.enabled);
    }
}

#[test]
fn entry_control_open_and_applied_is_disabled() {
    let entry = EntryControl::for_job(true, true);
    assert_eq!(entry.label, "Applied");
    assert!(!entry.enabled);
}

#[test]
fn entry_control_open_and_not_applied_is_enabled() {
    let entry = EntryControl::for_job(true, false);
    assert_eq!(entry.label, "Apply");
    assert!(entry.enabled);
}

#[test]
fn entry_control_class_follows_enabled_state() {
    assert_eq!(EntryControl::for_job(true, false).class(), "btn btn--lg btn--primary");
    assert_eq!(EntryControl::for_job(true, true).class(), "btn btn--lg btn--closed");
    assert_eq!(EntryControl::for_job(false, false).class(), "btn btn--lg btn--closed");
}

// =============================================================
// Open / cancel
// =============================================================

#[test]
fn workflow_starts_closed() {
    let wf = ApplyWorkflow::default();
    assert_eq!(wf.phase(), ApplyPhase::Closed);
    assert!(!wf.is_loading());
    assert!(!wf.can_submit());
}

#[test]
fn open_moves_closed_to_open_idle() {
    let wf = opened();
    assert_eq!(wf.phase(), ApplyPhase::OpenIdle);
    assert!(wf.can_submit());
}

#[test]
fn open_is_refused_while_entry_disabled() {
    let mut wf = ApplyWorkflow::default();
    assert!(!wf.open(EntryControl::for_job(false, false)));
    assert!(!wf.open(EntryControl::for_job(true, true)));
    assert_eq!(wf.phase(), ApplyPhase::Closed);
}

#[test]
fn cancel_moves_open_idle_to_closed() {
    let mut wf = opened();
    wf.cancel();
    assert_eq!(wf.phase(), ApplyPhase::Closed);
}

#[test]
fn cancel_keeps_draft_in_place() {
    let mut wf = opened();
    fill(&mut wf);
    wf.cancel();
    assert_eq!(wf.draft().skills, "go,rust");
}

#[test]
fn repeated_open_cancel_cycles_stay_reachable() {
    let mut wf = ApplyWorkflow::default();
    for _ in 0..50 {
        assert!(wf.open(apply()));
        assert_eq!(wf.phase(), ApplyPhase::OpenIdle);
        wf.cancel();
        assert_eq!(wf.phase(), ApplyPhase::Closed);
        wf.cancel();
        assert_eq!(wf.phase(), ApplyPhase::Closed);
    }
    assert!(wf.open(apply()));
    assert!(wf.open(apply()));
    assert_eq!(wf.phase(), ApplyPhase::OpenIdle);
}

// =============================================================
// Draft lifetime
// =============================================================

#[test]
fn per_open_lifetime_resets_draft_on_reopen() {
    let mut wf = opened();
    assert_eq!(wf.lifetime(), DraftLifetime::PerOpen);
    fill(&mut wf);
    wf.cancel();
    wf.open(apply());
    assert_eq!(wf.draft(), &ApplicationDraft::default());
}

#[test]
fn per_instance_lifetime_keeps_draft_across_reopen() {
    let mut wf = ApplyWorkflow::new(DraftLifetime::PerInstance);
    wf.open(apply());
    fill(&mut wf);
    wf.cancel();
    wf.open(apply());
    assert_eq!(wf.draft().skills, "go,rust");
    assert_eq!(wf.draft().education, Some(Education::Graduate));
}

#[test]
fn opening_an_open_panel_does_not_reset_draft() {
    let mut wf = opened();
    fill(&mut wf);
    wf.open(apply());
    assert_eq!(wf.draft().skills, "go,rust");
}

// =============================================================
// Draft fields
// =============================================================

#[test]
fn experience_parses_numbers_and_rejects_junk() {
    let mut draft = ApplicationDraft::default();
    assert_eq!(draft.experience_years(), None);
    draft.set_experience(" 4 ");
    assert_eq!(draft.experience_years(), Some(4.0));
    draft.set_experience("1.5");
    assert_eq!(draft.experience_years(), Some(1.5));
    draft.set_experience("lots");
    assert_eq!(draft.experience_years(), None);
    draft.set_experience("NaN");
    assert_eq!(draft.experience_years(), None);
}

#[test]
fn payload_copies_identity_and_fields() {
    let mut wf = opened();
    fill(&mut wf);
    let payload = wf.draft().to_payload(&job(), &user());
    assert_eq!(
        payload,
        ApplicationPayload {
            name: "alice".to_owned(),
            experience: Some(3.0),
            skills: "go,rust".to_owned(),
            education: Some(Education::Graduate),
            resume: Some(resume()),
            job_id: "J1".to_owned(),
            user_id: "U1".to_owned(),
        }
    );
}

#[test]
fn empty_draft_still_builds_payload() {
    let payload = ApplicationDraft::default().to_payload(&job(), &User::default());
    assert_eq!(payload.name, "");
    assert_eq!(payload.user_id, "");
    assert_eq!(payload.experience, None);
    assert_eq!(payload.resume, None);
    assert_eq!(payload.job_id, "J1");
}

// =============================================================
// Submission
// =============================================================

#[test]
fn begin_submit_enters_submitting_and_blocks_second_submit() {
    let mut wf = opened();
    fill(&mut wf);
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");
    assert_eq!(wf.phase(), ApplyPhase::OpenSubmitting);
    assert!(wf.is_loading());
    assert!(!wf.can_submit());
    assert_eq!(wf.begin_submit(&job(), &user()), None);
    assert_eq!(ticket.payload.job_id, "J1");
}

#[test]
fn begin_submit_requires_open_panel() {
    let mut wf = ApplyWorkflow::default();
    assert_eq!(wf.begin_submit(&job(), &user()), None);
    assert_eq!(wf.phase(), ApplyPhase::Closed);
}

#[test]
fn success_closes_panel_notifies_and_requests_callback_once() {
    let mut wf = opened();
    fill(&mut wf);
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");

    let effect = wf.finish_submit(ticket.id, Ok(())).expect("effect");
    assert_eq!(wf.phase(), ApplyPhase::Closed);
    assert!(!wf.is_loading());
    assert_eq!(effect.outcome, SubmitOutcome::Submitted);
    assert_eq!(effect.notification, Some(Notification::success(SUBMITTED_MESSAGE)));
    assert!(effect.notify_parent);

    // A duplicate settle for the same ticket must not trigger the callback again.
    assert_eq!(wf.finish_submit(ticket.id, Ok(())), None);
}

#[test]
fn success_discards_draft_even_when_kept_per_instance() {
    let mut wf = ApplyWorkflow::new(DraftLifetime::PerInstance);
    wf.open(apply());
    fill(&mut wf);
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");
    wf.finish_submit(ticket.id, Ok(()));
    assert_eq!(wf.draft(), &ApplicationDraft::default());
}

#[test]
fn failure_returns_to_open_idle_silently() {
    let mut wf = opened();
    fill(&mut wf);
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");

    let effect = wf.finish_submit(ticket.id, Err(SubmitError::Status(500))).expect("effect");
    assert_eq!(wf.phase(), ApplyPhase::OpenIdle);
    assert!(!wf.is_loading());
    assert_eq!(effect.outcome, SubmitOutcome::Failed(SubmitError::Status(500)));
    assert_eq!(effect.notification, None);
    assert!(!effect.notify_parent);
}

#[test]
fn failure_keeps_draft_for_retry() {
    let mut wf = opened();
    fill(&mut wf);
    let first = wf.begin_submit(&job(), &user()).expect("ticket");
    wf.finish_submit(first.id, Err(SubmitError::Network("offline".to_owned())));
    assert_eq!(wf.draft().skills, "go,rust");

    let retry = wf.begin_submit(&job(), &user()).expect("retry ticket");
    assert_ne!(retry.id, first.id);
    assert_eq!(retry.payload, first.payload);
}

#[test]
fn cancel_during_submit_still_settles_success() {
    let mut wf = opened();
    fill(&mut wf);
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");
    wf.cancel();
    assert_eq!(wf.phase(), ApplyPhase::Closed);
    assert!(wf.is_loading());

    let effect = wf.finish_submit(ticket.id, Ok(())).expect("effect");
    assert!(effect.notify_parent);
    assert_eq!(wf.phase(), ApplyPhase::Closed);
    assert!(!wf.is_loading());
}

#[test]
fn reopen_during_submit_shows_submitting() {
    let mut wf = opened();
    let _ticket = wf.begin_submit(&job(), &user()).expect("ticket");
    wf.cancel();
    wf.open(apply());
    assert_eq!(wf.phase(), ApplyPhase::OpenSubmitting);
}

#[test]
fn reopen_during_submit_keeps_draft_for_failed_retry() {
    let mut wf = opened();
    fill(&mut wf);
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");
    wf.cancel();
    assert!(wf.open(apply()));

    wf.finish_submit(ticket.id, Err(SubmitError::Status(500))).expect("effect");
    assert_eq!(wf.phase(), ApplyPhase::OpenIdle);
    assert_eq!(wf.draft().skills, "go,rust");
    assert_eq!(wf.draft().resume, Some(resume()));
}

// =============================================================
// Resume reads
// =============================================================

#[test]
fn submit_waits_for_pending_resume_read() {
    let mut wf = opened();
    let read = wf.begin_resume_read();
    assert!(wf.is_reading_resume());
    assert!(!wf.can_submit());
    assert_eq!(wf.begin_submit(&job(), &user()), None);

    assert!(wf.finish_resume_read(read, Some(resume())));
    assert!(!wf.is_reading_resume());
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");
    assert_eq!(ticket.payload.resume, Some(resume()));
}

#[test]
fn newer_resume_read_wins_over_older() {
    let mut wf = opened();
    let first = wf.begin_resume_read();
    let second = wf.begin_resume_read();
    let newer = ResumeFile { name: "new.pdf".to_owned(), ..resume() };

    assert!(wf.finish_resume_read(second, Some(newer.clone())));
    assert!(!wf.finish_resume_read(first, Some(resume())));
    assert_eq!(wf.draft().resume, Some(newer));
}

#[test]
fn resume_read_from_before_reopen_is_dropped() {
    let mut wf = opened();
    let read = wf.begin_resume_read();
    wf.cancel();
    assert!(wf.open(apply()));

    assert!(wf.can_submit());
    assert!(!wf.finish_resume_read(read, Some(resume())));
    assert_eq!(wf.draft().resume, None);
}

#[test]
fn per_instance_reopen_keeps_pending_resume_read() {
    let mut wf = ApplyWorkflow::new(DraftLifetime::PerInstance);
    wf.open(apply());
    let read = wf.begin_resume_read();
    wf.cancel();
    wf.open(apply());

    assert!(wf.finish_resume_read(read, Some(resume())));
    assert_eq!(wf.draft().resume, Some(resume()));
}

#[test]
fn failed_resume_read_unblocks_submit_without_file() {
    let mut wf = opened();
    fill(&mut wf);
    let read = wf.begin_resume_read();
    assert!(wf.finish_resume_read(read, None));
    assert!(wf.can_submit());
    assert_eq!(wf.draft().resume, None);
}

#[test]
fn clearing_picker_drops_file_and_pending_read() {
    let mut wf = opened();
    fill(&mut wf);
    let read = wf.begin_resume_read();
    wf.clear_resume();
    assert!(wf.can_submit());
    assert!(!wf.finish_resume_read(read, Some(resume())));
    assert_eq!(wf.draft().resume, None);
}

#[test]
fn resume_read_after_dispose_is_ignored() {
    let mut wf = opened();
    let read = wf.begin_resume_read();
    wf.dispose();
    assert!(!wf.finish_resume_read(read, Some(resume())));
}

// =============================================================
// Stale responses
// =============================================================

#[test]
fn result_for_unknown_ticket_is_ignored() {
    let mut wf = opened();
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");
    assert_eq!(wf.finish_submit(ticket.id + 1, Ok(())), None);
    assert_eq!(wf.phase(), ApplyPhase::OpenSubmitting);
}

#[test]
fn result_after_dispose_is_ignored() {
    let mut wf = opened();
    let ticket = wf.begin_submit(&job(), &user()).expect("ticket");
    wf.dispose();
    assert!(wf.is_disposed());
    assert_eq!(wf.finish_submit(ticket.id, Ok(())), None);
    assert_eq!(wf.phase(), ApplyPhase::Closed);
}

#[test]
fn disposed_workflow_refuses_to_open() {
    let mut wf = ApplyWorkflow::default();
    wf.dispose();
    assert!(!wf.open(apply()));
    assert_eq!(wf.begin_submit(&job(), &user()), None);
}
