use leptos::prelude::*;

use crate::labels::disposition_name;

const TESS_CODES: &[&str] = &["PC", "CP", "KP", "APC", "FP", "FA"];

#[component]
pub fn DocumentationPage() -> impl IntoView {
    view! {
        <div class="page docs-page">
            <h2>"Documentation"</h2>

            <section class="docs-section">
                <h3>"Making a prediction"</h3>
                <ol>
                    <li>"Log in, open Predict and choose Kepler or TESS."</li>
                    <li>"Adjust the values. Each field starts at a real catalog value; clearing a field sends that default."</li>
                    <li>"For Kepler, the six headline measurements must be filled in. TESS accepts any subset."</li>
                    <li>"Press Predict. The verdict, its confidence and an id appear, and the run is added to your history."</li>
                </ol>
            </section>

            <section class="docs-section">
                <h3>"Reading the result"</h3>
                <p>
                    "The Kepler model answers 1 (planet) or 0 (not a planet). The TESS model answers with a disposition code:"
                </p>
                <ul>
                    {TESS_CODES.iter().map(|code| view! {
                        <li><span class="mono">{*code}</span>" - "{disposition_name(code)}</li>
                    }).collect::<Vec<_>>()}
                </ul>
                <p>"False positives, false alarms and a Kepler 0 are shown as Planet Not Found."</p>
                <p>"Confidence is the model's probability for its answer, shown as a percentage."</p>
            </section>

            <section class="docs-section">
                <h3>"History"</h3>
                <p>"Every prediction is stored on the server under your account. Deleting a row removes it for good."</p>
            </section>

            <section class="docs-section">
                <h3>"Sessions"</h3>
                <p>
                    "Your login is remembered between launches. If the server rejects it, you are logged out and asked to log in again."
                </p>
            </section>
        </div>
    }
}
