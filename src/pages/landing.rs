use leptos::prelude::*;

use crate::app::use_session;

#[component]
pub fn LandingPage() -> impl IntoView {
    let ctx = use_session();

    view! {
        <div class="page landing-page">
            <section class="hero">
                <h2>"Hunt for exoplanets with machine learning"</h2>
                <p class="page-description">
                    "Feed transit and stellar measurements from the Kepler and TESS missions to trained models and see whether the signal is a planet."
                </p>
                <div class="hero-actions">
                    <Show
                        when=move || ctx.is_authenticated()
                        fallback=|| view! {
                            <a href="/signup" class="btn btn-primary">"Get started"</a>
                            <a href="/login" class="btn btn-secondary">"Log in"</a>
                        }
                    >
                        <a href="/prediction" class="btn btn-primary">"Make a prediction"</a>
                    </Show>
                    <a href="/datasets" class="btn btn-secondary">"Explore the datasets"</a>
                </div>
            </section>

            <div class="card-grid">
                <div class="card">
                    <h3>"Kepler"</h3>
                    <p>"Kepler Objects of Interest: 42 features covering orbit, transit shape, false positive flags and the host star."</p>
                    <a href="/datasets/kepler" class="btn-link">"Kepler parameters"</a>
                </div>
                <div class="card">
                    <h3>"TESS"</h3>
                    <p>"TESS Objects of Interest: 9 planetary and stellar features, classified into disposition codes."</p>
                    <a href="/datasets/tess" class="btn-link">"TESS parameters"</a>
                </div>
            </div>
        </div>
    }
}
