use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;

const BASE_URL_PREFERENCE: &str = "api_base_url";

#[component]
pub fn SettingsPage() -> impl IntoView {
    let (base_url, set_base_url) = signal(String::new());
    let (status, set_status) = signal::<Option<String>>(None);

    // Show the saved override, or the URL the client is using without one
    Effect::new(move |_| {
        spawn_local(async move {
            let saved = match commands::get_preference(BASE_URL_PREFERENCE).await {
                Ok(saved) => saved.filter(|url| !url.is_empty()),
                Err(e) => {
                    set_status.set(Some(format!("Failed to load setting: {}", e)));
                    return;
                }
            };
            match saved {
                Some(url) => set_base_url.set(url),
                None => match commands::api_base_url().await {
                    Ok(url) => {
                        set_base_url.set(url);
                        set_status.set(Some("No saved server, using the default.".to_string()));
                    }
                    Err(e) => set_status.set(Some(format!("Failed to load setting: {}", e))),
                },
            }
        });
    });

    let save = move |_| {
        let url = base_url.get().trim().to_string();
        spawn_local(async move {
            match commands::set_preference(BASE_URL_PREFERENCE, &url).await {
                Ok(()) => set_status.set(Some("Saved. New requests use this server.".to_string())),
                Err(e) => set_status.set(Some(format!("Failed to save: {}", e))),
            }
        });
    };

    view! {
        <div class="page settings-page">
            <h2>"Settings"</h2>

            <section class="settings-section">
                <h3>"Prediction server"</h3>
                <p class="section-description">
                    "Base URL of the prediction API. Overrides EXOSCOPE_API_BASE_URL."
                </p>

                <div class="form-group">
                    <label for="api-base-url">"API base URL"</label>
                    <div class="input-row">
                        <input
                            id="api-base-url"
                            type="url"
                            placeholder="http://localhost:8000"
                            class="input"
                            prop:value=move || base_url.get()
                            on:input=move |ev| {
                                set_base_url.set(event_target_value(&ev));
                            }
                        />
                        <button class="btn btn-save" on:click=save>"Save"</button>
                    </div>
                    <Show when=move || status.get().is_some()>
                        <span class="status-text">{move || status.get().unwrap_or_default()}</span>
                    </Show>
                </div>
            </section>
        </div>
    }
}
