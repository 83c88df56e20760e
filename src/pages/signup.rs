use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::use_session;
use crate::commands::{self, SessionInfo};
use crate::components::toast::use_toasts;
use crate::remote::{dispatch_then, RemoteOp};

const MIN_PASSWORD_LEN: usize = 6;

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let op = RwSignal::new(RemoteOp::<SessionInfo>::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = name.get().trim().to_string();
        let email = email.get().trim().to_string();
        let password = password.get();

        let problem = if name.is_empty() || email.is_empty() || password.is_empty() {
            Some("Please fill in all fields".to_string())
        } else if password.len() < MIN_PASSWORD_LEN {
            Some(format!("Password must be at least {} characters", MIN_PASSWORD_LEN))
        } else if password != confirm.get() {
            Some("Passwords do not match".to_string())
        } else {
            None
        };
        if problem.is_some() {
            set_form_error.set(problem);
            return;
        }
        set_form_error.set(None);

        // A new account is logged in straight away with the same credentials
        let navigate = navigate.clone();
        dispatch_then(
            op,
            async move {
                if let Err(e) = commands::signup(&name, &email, &password).await {
                    return Err(e);
                }
                commands::login(&email, &password).await
            },
            move |result| {
                if let Ok(info) = result {
                    ctx.session.set(Some(info.clone()));
                    toasts.success("Account created");
                    navigate("/home", Default::default());
                }
            },
        );
    };

    let error = move || form_error.get().or_else(|| op.with(|o| o.error().map(str::to_string)));

    view! {
        <div class="page auth-page">
            <form class="card auth-card" on:submit=submit>
                <h2>"Create an account"</h2>
                <div class="form-group">
                    <label for="signup-name">"Name"</label>
                    <input
                        id="signup-name"
                        type="text"
                        class="input"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="signup-email">"Email"</label>
                    <input
                        id="signup-email"
                        type="email"
                        class="input"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="signup-password">"Password"</label>
                    <input
                        id="signup-password"
                        type="password"
                        class="input"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="signup-confirm">"Confirm password"</label>
                    <input
                        id="signup-confirm"
                        type="password"
                        class="input"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| set_confirm.set(event_target_value(&ev))
                    />
                </div>
                <Show when=move || error().is_some()>
                    <p class="form-error">{move || error().unwrap_or_default()}</p>
                </Show>
                <button type="submit" class="btn btn-primary" disabled=move || op.with(|o| o.is_pending())>
                    {move || if op.with(|o| o.is_pending()) { "Creating account..." } else { "Sign up" }}
                </button>
                <p class="muted">"Already registered? " <a href="/login">"Log in"</a></p>
            </form>
        </div>
    }
}
