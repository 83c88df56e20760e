use leptos::prelude::*;

use crate::commands::{Dataset, PredictionOutcome, PredictionRecord};
use crate::labels::{disposition_name, is_planet, percent};

#[component]
pub fn PredictionsTable(
    #[prop(into)] dataset: Signal<Dataset>,
    #[prop(into)] records: Signal<Vec<PredictionRecord>>,
    #[prop(into)] total: Signal<u64>,
    #[prop(into)] on_delete: Callback<String>,
    #[prop(into)] deleting: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="card predictions-card">
            <div class="card-header">
                <h3>"Prediction history"</h3>
                <span class="muted">{move || format!("{} total", total.get())}</span>
            </div>
            <Show
                when=move || !records.with(Vec::is_empty)
                fallback=|| view! { <p class="muted">"No predictions yet."</p> }
            >
                <table class="predictions-table">
                    <thead>
                        <tr>
                            <th>"Result"</th>
                            <th>"Confidence"</th>
                            <th>"Created"</th>
                            <th>"ID"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || records.get().into_iter().map(|record| {
                            let badge = if is_planet(&record.prediction) { "badge badge-found" } else { "badge badge-not-found" };
                            let created = record
                                .created_label
                                .clone()
                                .or_else(|| record.created_at.clone())
                                .unwrap_or_else(|| "-".to_string());
                            let id = record.prediction_id.clone();
                            let href = format!("/prediction/{}/{}", dataset.get_untracked().slug(), record.prediction_id);
                            view! {
                                <tr>
                                    <td><span class=badge>{disposition_name(&record.prediction)}</span></td>
                                    <td>{percent(record.confidence)}</td>
                                    <td>{created}</td>
                                    <td class="mono"><a href=href>{record.prediction_id.clone()}</a></td>
                                    <td>
                                        <button
                                            class="btn btn-small btn-danger"
                                            disabled=move || deleting.get()
                                            on:click=move |_| on_delete.run(id.clone())
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect::<Vec<_>>()}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[component]
pub fn ResultCard(outcome: PredictionOutcome) -> impl IntoView {
    let found = is_planet(&outcome.prediction);
    let headline = if found { "Planet Found" } else { "Planet Not Found" };

    view! {
        <div class=if found { "card result-card result-found" } else { "card result-card result-not-found" }>
            <h3>{headline}</h3>
            <p class="result-label">{disposition_name(&outcome.prediction)}</p>
            <p class="result-confidence">{format!("Confidence: {}", percent(outcome.confidence))}</p>
            <p class="muted mono">{format!("ID: {}", outcome.prediction_id)}</p>
            {outcome.timestamp.map(|t| view! { <p class="muted">{t}</p> })}
        </div>
    }
}
