//! Stack of transient toast notifications.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastOptions, ToastState};

/// Renders queued toasts and dismisses each after `options.auto_close_ms`.
#[component]
pub fn ToastContainer(toasts: RwSignal<ToastState>, #[prop(optional)] options: ToastOptions) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        Effect::new(move || {
            toasts.track();
            if options.auto_close_ms == 0 {
                return;
            }
            // Untracked so claiming does not re-run this effect.
            let fresh = toasts.try_update_untracked(ToastState::claim_auto_close).unwrap_or_default();
            for id in fresh {
                let delay = std::time::Duration::from_millis(u64::from(options.auto_close_ms));
                leptos::task::spawn_local(async move {
                    gloo_timers::future::sleep(delay).await;
                    toasts.try_update(|state| state.dismiss(id));
                });
            }
        });
    }

    let container_class = format!("toast-container {} {}", options.position.class(), options.theme.class());

    view! {
        <div class=container_class aria-live="polite">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast {}", toast.kind.class())
                            role="alert"
                            on:click=move |_| {
                                toasts.update(|state| {
                                    state.dismiss(id);
                                });
                            }
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
