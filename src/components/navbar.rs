use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_session;
use crate::commands;
use crate::components::toast::use_toasts;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let do_logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            match commands::logout().await {
                Ok(()) => toasts.success("Logged out"),
                Err(e) => toasts.error(format!("Logout incomplete: {}", e)),
            }
            // The session is gone from memory either way
            ctx.session.set(None);
            navigate("/", Default::default());
        });
    };

    view! {
        <nav class="navbar">
            <a href="/" class="navbar-brand">
                <span class="navbar-title">"Exoscope"</span>
                <span class="navbar-subtitle">"Kepler & TESS exoplanet predictions"</span>
            </a>
            <ul class="nav-list">
                <Show
                    when=move || ctx.is_authenticated()
                    fallback=|| view! {
                        <li class="nav-item"><a href="/datasets" class="nav-link">"Datasets"</a></li>
                        <li class="nav-item"><a href="/docs" class="nav-link">"Docs"</a></li>
                        <li class="nav-item"><a href="/login" class="nav-link">"Log in"</a></li>
                        <li class="nav-item"><a href="/signup" class="nav-link nav-cta">"Sign up"</a></li>
                    }
                >
                    <li class="nav-item"><a href="/home" class="nav-link">"Home"</a></li>
                    <li class="nav-item"><a href="/prediction" class="nav-link">"Predict"</a></li>
                    <li class="nav-item"><a href="/datasets" class="nav-link">"Datasets"</a></li>
                    <li class="nav-item"><a href="/docs" class="nav-link">"Docs"</a></li>
                    <li class="nav-item"><a href="/settings" class="nav-link">"Settings"</a></li>
                    <li class="nav-item">
                        <span class="nav-user">
                            {move || ctx.session.get()
                                .and_then(|s| s.display_name)
                                .unwrap_or_else(|| "Signed in".to_string())}
                        </span>
                    </li>
                    <li class="nav-item">
                        <button class="btn btn-small" on:click=do_logout.clone()>"Log out"</button>
                    </li>
                </Show>
            </ul>
        </nav>
    }
}
