use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::RequireSession;
use crate::commands::{self, Dataset, PredictionRecord};
use crate::labels::{disposition_name, is_planet, percent};
use crate::remote::{dispatch, Phase, RemoteOp};

#[component]
pub fn PredictionDetailPage() -> impl IntoView {
    view! {
        <RequireSession>
            <PredictionDetail />
        </RequireSession>
    }
}

/// Dataset and prediction id from the `/prediction/:dataset/:id` route.
fn detail_target(slug: Option<String>, id: Option<String>) -> Option<(Dataset, String)> {
    let dataset = Dataset::from_slug(slug?.as_str())?;
    let id = id.filter(|id| !id.trim().is_empty())?;
    Some((dataset, id))
}

/// One stored prediction, fetched by id.
#[component]
fn PredictionDetail() -> impl IntoView {
    let route = use_params_map();
    let target = Memo::new(move |_| route.with(|p| detail_target(p.get("dataset"), p.get("id"))));
    let record = RwSignal::new(RemoteOp::<PredictionRecord>::new());

    Effect::new(move |_| match target.get() {
        Some((dataset, id)) => {
            dispatch(record, async move { commands::get_prediction(dataset, &id).await })
        }
        None => record.update(|r| r.reset()),
    });

    view! {
        <div class="page prediction-detail-page">
            <a href="/prediction" class="btn-link">"Back to predictions"</a>
            {move || {
                let Some((dataset, _)) = target.get() else {
                    return view! { <p>"Unknown prediction."</p> }.into_any();
                };
                record.with(|op| match op.phase() {
                    Phase::Idle | Phase::Pending => view! { <p class="muted">"Loading..."</p> }.into_any(),
                    Phase::Rejected => view! {
                        <p class="form-error">{op.error().unwrap_or_default().to_string()}</p>
                    }.into_any(),
                    Phase::Fulfilled => match op.value().cloned() {
                        Some(r) => view! { <RecordCard dataset=dataset record=r /> }.into_any(),
                        None => view! { <p class="muted">"No data."</p> }.into_any(),
                    },
                })
            }}
        </div>
    }
}

#[component]
fn RecordCard(dataset: Dataset, record: PredictionRecord) -> impl IntoView {
    let found = is_planet(&record.prediction);
    let created = record
        .created_label
        .clone()
        .or_else(|| record.created_at.clone())
        .unwrap_or_else(|| "-".to_string());

    view! {
        <div class=if found { "card result-card result-found" } else { "card result-card result-not-found" }>
            <h3>{if found { "Planet Found" } else { "Planet Not Found" }}</h3>
            <p class="result-label">{disposition_name(&record.prediction)}</p>
            <p class="result-confidence">{format!("Confidence: {}", percent(record.confidence))}</p>
            <p class="muted">{format!("{} model, created {}", dataset.name(), created)}</p>
            <p class="muted mono">{format!("ID: {}", record.prediction_id)}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(slug: &str, id: &str) -> Option<(Dataset, String)> {
        detail_target(Some(slug.to_string()), Some(id.to_string()))
    }

    #[test]
    fn test_detail_target_from_route() {
        assert_eq!(target("tess", "abc123"), Some((Dataset::Tess, "abc123".to_string())));
        assert_eq!(target("kepler", "k-1"), Some((Dataset::Kepler, "k-1".to_string())));
    }

    #[test]
    fn test_detail_target_rejects_bad_routes() {
        assert_eq!(target("k2", "abc"), None);
        assert_eq!(target("tess", " "), None);
        assert_eq!(detail_target(None, Some("abc".to_string())), None);
    }
}
