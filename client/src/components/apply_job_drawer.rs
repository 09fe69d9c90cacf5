//! "Apply" entry button plus the slide-in application form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Host pages pass the job, the signed-in user, and whether that user already
//! applied. All state transitions go through `ApplyWorkflow`; this module only
//! binds inputs to it and runs the upload task.

#[cfg(test)]
#[path = "apply_job_drawer_test.rs"]
mod apply_job_drawer_test;

use leptos::prelude::*;

use crate::components::toast_container::ToastContainer;
use crate::config::ClientConfig;
use crate::net::api::RESUME_ACCEPT;
use crate::net::types::{Education, Job, ResumeFile, User};
use crate::state::apply::{ApplyWorkflow, DraftLifetime, EntryControl, SubmitEffect, SubmitTicket};
use crate::state::toast::ToastState;

fn drawer_title(job: &Job) -> String {
    format!("Apply for {} at {}", job.title, job.company_name())
}

fn resume_label(reading: bool, resume: Option<&ResumeFile>) -> String {
    if reading {
        return "Reading file...".to_owned();
    }
    resume.map_or_else(|| "No file chosen".to_owned(), |r| r.name.clone())
}

/// Apply button and drawer for one job posting.
///
/// `config` falls back to a context-provided `ClientConfig`, then to the
/// build-time `API_BASE_URL`.
#[component]
pub fn ApplyJobDrawer(
    #[prop(into)] user: Signal<User>,
    #[prop(into)] job: Signal<Job>,
    #[prop(optional, into)] applied: MaybeProp<bool>,
    #[prop(optional)] on_application_submit: Option<Callback<()>>,
    #[prop(optional)] config: Option<ClientConfig>,
    #[prop(optional)] draft_lifetime: DraftLifetime,
) -> impl IntoView {
    let config = config
        .or_else(use_context::<ClientConfig>)
        .unwrap_or_else(ClientConfig::from_build_env);
    let config = StoredValue::new(config);

    let workflow = RwSignal::new(ApplyWorkflow::new(draft_lifetime));
    let toasts = RwSignal::new(ToastState::default());
    on_cleanup(move || {
        workflow.try_update(ApplyWorkflow::dispose);
    });

    let entry = Memo::new(move |_| EntryControl::for_job(job.with(|j| j.is_open), applied.get().unwrap_or(false)));

    let on_entry_click = move |_| {
        let entry = entry.get_untracked();
        workflow.update(|w| {
            w.open(entry);
        });
    };

    let on_cancel = Callback::new(move |()| workflow.update(ApplyWorkflow::cancel));
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_cancel.run(());
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let job_value = job.get_untracked();
        let user_value = user.get_untracked();
        let Some(ticket) = workflow.try_update(|w| w.begin_submit(&job_value, &user_value)).flatten() else {
            return;
        };
        submit_application(ticket, workflow, toasts, on_application_submit, config.get_value());
    };

    let on_resume_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                workflow.update(ApplyWorkflow::clear_resume);
                return;
            };
            let Some(read_id) = workflow.try_update(ApplyWorkflow::begin_resume_read) else {
                return;
            };
            leptos::task::spawn_local(async move {
                let resume = match crate::net::api::read_resume_file(&file).await {
                    Ok(resume) => Some(resume),
                    Err(e) => {
                        leptos::logging::warn!("resume read failed: {e}");
                        None
                    }
                };
                workflow.try_update(|w| w.finish_resume_read(read_id, resume));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let education_options = move || {
        Education::ALL
            .into_iter()
            .map(|level| {
                view! {
                    <div class="radio-row">
                        <input
                            type="radio"
                            name="education"
                            id=level.input_id()
                            value=level.as_str()
                            prop:checked=move || workflow.with(|w| w.draft().education == Some(level))
                            on:change=move |_| workflow.update(|w| w.draft_mut().set_education(level))
                        />
                        <label class="radio-row__label" for=level.input_id()>
                            {level.as_str()}
                        </label>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <ToastContainer toasts=toasts/>

        <button
            class=move || entry.get().class()
            disabled=move || !entry.get().enabled
            on:click=on_entry_click
        >
            {move || entry.get().label}
        </button>

        <Show when=move || workflow.with(ApplyWorkflow::is_open)>
            <div class="drawer-backdrop" on:click=move |_| on_cancel.run(())>
                <div
                    class="drawer"
                    role="dialog"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=on_keydown
                    tabindex="0"
                >
                    <div class="drawer__header">
                        <h2 class="drawer__title">{move || job.with(drawer_title)}</h2>
                        <p class="drawer__description">"Please fill in the form below"</p>
                    </div>

                    <form class="drawer__form" on:submit=on_submit>
                        <input
                            class="input"
                            type="number"
                            placeholder="Years of Experience"
                            prop:value=move || workflow.with(|w| w.draft().experience.clone())
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                workflow.update(|w| w.draft_mut().set_experience(&raw));
                            }
                        />
                        <input
                            class="input"
                            type="text"
                            placeholder="Skills (Comma Separated)"
                            prop:value=move || workflow.with(|w| w.draft().skills.clone())
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                workflow.update(|w| w.draft_mut().set_skills(&raw));
                            }
                        />
                        <div class="radio-group" role="radiogroup">
                            {education_options()}
                        </div>
                        <input
                            class="input input--file"
                            type="file"
                            accept=RESUME_ACCEPT
                            on:change=on_resume_change
                        />
                        <p class="drawer__file-name">
                            {move || workflow.with(|w| resume_label(w.is_reading_resume(), w.draft().resume.as_ref()))}
                        </p>
                        <Show when=move || workflow.with(ApplyWorkflow::is_loading)>
                            <div class="bar-loader" style="width: 100%; --bar-loader-color: #36d7b7">
                                <div class="bar-loader__bar"></div>
                            </div>
                        </Show>
                        <button
                            type="submit"
                            class="btn btn--lg btn--submit"
                            disabled=move || !workflow.with(ApplyWorkflow::can_submit)
                        >
                            "Apply"
                        </button>
                    </form>

                    <div class="drawer__footer">
                        <button type="button" class="btn btn--outline" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Upload the ticket's payload and feed the result back into the workflow.
///
/// Failures are logged only; the user sees the submit button re-enable.
fn submit_application(
    ticket: SubmitTicket,
    workflow: RwSignal<ApplyWorkflow>,
    toasts: RwSignal<ToastState>,
    on_application_submit: Option<Callback<()>>,
    config: ClientConfig,
) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::create_application(&config, &ticket.payload).await;
        if let Err(e) = &result {
            leptos::logging::warn!("Error applying to the job: {e}");
        }
        let Some(effect) = workflow.try_update(|w| w.finish_submit(ticket.id, result)).flatten() else {
            return;
        };
        apply_effect(effect, toasts, on_application_submit);
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ticket, workflow, toasts, on_application_submit, config);
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn apply_effect(effect: SubmitEffect, toasts: RwSignal<ToastState>, on_application_submit: Option<Callback<()>>) {
    if let Some(notification) = effect.notification {
        toasts.try_update(|state| state.notify(notification));
    }
    if effect.notify_parent {
        if let Some(callback) = on_application_submit {
            callback.run(());
        }
    }
}
