use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::use_session;
use crate::commands::{self, SessionInfo};
use crate::components::toast::use_toasts;
use crate::remote::{dispatch_then, RemoteOp};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let op = RwSignal::new(RemoteOp::<SessionInfo>::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email = email.get().trim().to_string();
        let password = password.get();
        if email.is_empty() || password.is_empty() {
            set_form_error.set(Some("Please enter both email and password".to_string()));
            return;
        }
        set_form_error.set(None);

        let navigate = navigate.clone();
        dispatch_then(
            op,
            async move { commands::login(&email, &password).await },
            move |result| {
                if let Ok(info) = result {
                    ctx.session.set(Some(info.clone()));
                    toasts.success("Logged in");
                    navigate("/home", Default::default());
                }
            },
        );
    };

    let error = move || form_error.get().or_else(|| op.with(|o| o.error().map(str::to_string)));

    view! {
        <div class="page auth-page">
            <form class="card auth-card" on:submit=submit>
                <h2>"Log in"</h2>
                <div class="form-group">
                    <label for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        type="email"
                        class="input"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        type="password"
                        class="input"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>
                <Show when=move || error().is_some()>
                    <p class="form-error">{move || error().unwrap_or_default()}</p>
                </Show>
                <button type="submit" class="btn btn-primary" disabled=move || op.with(|o| o.is_pending())>
                    {move || if op.with(|o| o.is_pending()) { "Logging in..." } else { "Log in" }}
                </button>
                <p class="muted">"No account? " <a href="/signup">"Sign up"</a></p>
            </form>
        </div>
    }
}
