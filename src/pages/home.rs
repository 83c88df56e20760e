use leptos::prelude::*;

use crate::app::{use_session, RequireSession};

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_session();
    let greeting = move || match ctx.session.get().and_then(|s| s.display_name) {
        Some(name) => format!("Welcome back, {}", name),
        None => "Welcome back".to_string(),
    };

    view! {
        <RequireSession>
            <div class="page home-page">
                <h2>{greeting}</h2>
                <p class="page-description">
                    "Pick a mission, adjust the measurements and let the model classify the candidate."
                </p>

                <div class="card-grid">
                    <div class="card">
                        <h3>"Predict"</h3>
                        <p>"Run the Kepler or TESS model on your own parameters"</p>
                        <a href="/prediction" class="btn btn-primary">"Start"</a>
                    </div>
                    <div class="card">
                        <h3>"Datasets"</h3>
                        <p>"What each parameter means and its typical range"</p>
                        <a href="/datasets" class="btn btn-primary">"Browse"</a>
                    </div>
                    <div class="card">
                        <h3>"Docs"</h3>
                        <p>"How predictions and dispositions work"</p>
                        <a href="/docs" class="btn btn-primary">"Read"</a>
                    </div>
                </div>

                <div class="how-it-works">
                    <h3>"How It Works"</h3>
                    <div class="steps">
                        <div class="step">
                            <span class="step-number">"1"</span>
                            <div class="step-content">
                                <strong>"Choose"</strong>
                                <p>"Select the Kepler or TESS model"</p>
                            </div>
                        </div>
                        <div class="step">
                            <span class="step-number">"2"</span>
                            <div class="step-content">
                                <strong>"Adjust"</strong>
                                <p>"Edit the parameters; blank fields use catalog defaults"</p>
                            </div>
                        </div>
                        <div class="step">
                            <span class="step-number">"3"</span>
                            <div class="step-content">
                                <strong>"Review"</strong>
                                <p>"Read the verdict and confidence, and keep a history of runs"</p>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </RequireSession>
    }
}
