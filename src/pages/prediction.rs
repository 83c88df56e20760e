use leptos::prelude::*;

use crate::app::RequireSession;
use crate::commands::{self, Dataset, ParamDef, PredictionOutcome};
use crate::components::parameters_card::ParametersCard;
use crate::components::predictions_table::{PredictionsTable, ResultCard};
use crate::components::toast::use_toasts;
use crate::params::ParameterSet;
use crate::remote::{dispatch, dispatch_then, RemoteOp};

#[component]
pub fn PredictionPage() -> impl IntoView {
    view! {
        <RequireSession>
            <PredictionWorkspace />
        </RequireSession>
    }
}

/// The form may only be sent once the current dataset's schema has loaded.
fn submit_blocked(schema: &RemoteOp<Vec<ParamDef>>, submitting: bool, params: &ParameterSet) -> bool {
    submitting || schema.is_pending() || params.is_empty()
}

#[component]
fn PredictionWorkspace() -> impl IntoView {
    let toasts = use_toasts();

    let (dataset, set_dataset) = signal(Dataset::Kepler);
    let schema = RwSignal::new(RemoteOp::<Vec<ParamDef>>::new());
    let params = RwSignal::new(ParameterSet::default());
    let result = RwSignal::new(RemoteOp::<PredictionOutcome>::new());
    let history = RwSignal::new(RemoteOp::<commands::PredictionPage>::new());
    let deletion = RwSignal::new(RemoteOp::<()>::new());

    let load_history = move |d: Dataset| dispatch(history, commands::list_predictions(d));

    // Switching dataset starts from a clean slate: fresh form, no stale result
    Effect::new(move |_| {
        let d = dataset.get();
        params.set(ParameterSet::default());
        result.update(|r| r.reset());
        history.update(|h| h.reset());
        deletion.update(|op| op.reset());
        dispatch_then(schema, commands::parameter_schema(d), move |loaded| {
            if let Ok(defs) = loaded {
                params.set(ParameterSet::new(defs.clone()));
            }
        });
        load_history(d);
    });

    let submit = move |_| {
        let d = dataset.get_untracked();
        let values = params.with_untracked(|p| p.to_submission());
        dispatch_then(
            result,
            async move { commands::predict(d, &values).await },
            move |outcome| {
                if outcome.is_ok() {
                    toasts.success("Prediction complete");
                    load_history(d);
                }
            },
        );
    };

    let on_delete = Callback::new(move |prediction_id: String| {
        let d = dataset.get_untracked();
        let target = prediction_id.clone();
        dispatch_then(
            deletion,
            async move { commands::delete_prediction(d, &prediction_id).await },
            move |deleted| {
                if deleted.is_ok() {
                    history.try_update(|h| h.update_value(|page| page.remove(&target)));
                    toasts.success("Prediction deleted");
                    load_history(d);
                }
            },
        );
    });

    let submitting = Signal::derive(move || result.with(|r| r.is_pending()));
    let records = Signal::derive(move || {
        history.with(|h| h.value().map(|p| p.predictions.clone()).unwrap_or_default())
    });
    let total = Signal::derive(move || history.with(|h| h.value().map(|p| p.total).unwrap_or(0)));
    let deleting = Signal::derive(move || deletion.with(|d| d.is_pending()));

    view! {
        <div class="page prediction-page">
            <h2>"Make a prediction"</h2>
            <div class="dataset-toggle">
                {Dataset::ALL.into_iter().map(|d| view! {
                    <button
                        class=move || if dataset.get() == d { "btn btn-toggle active" } else { "btn btn-toggle" }
                        on:click=move |_| set_dataset.set(d)
                    >
                        {d.name()}
                    </button>
                }).collect::<Vec<_>>()}
                <a class="btn-link" href=move || format!("/datasets/{}", dataset.get().slug())>
                    "What do these parameters mean?"
                </a>
            </div>

            <Show when=move || schema.with(|s| s.is_pending())>
                <p class="muted">"Loading parameters..."</p>
            </Show>
            {move || schema.with(|s| s.error().map(|e| view! { <p class="form-error">{e.to_string()}</p> }))}

            <ParametersCard params=params disabled=submitting />

            <div class="form-actions">
                <button
                    class="btn btn-primary"
                    on:click=submit
                    disabled=move || {
                        schema.with(|s| params.with(|p| submit_blocked(s, submitting.get(), p)))
                    }
                >
                    {move || if submitting.get() { "Predicting..." } else { "Predict" }}
                </button>
            </div>

            {move || result.with(|r| r.error().map(|e| view! { <p class="form-error">{e.to_string()}</p> }))}
            {move || result.with(|r| r.value().cloned()).map(|outcome| view! { <ResultCard outcome=outcome /> })}

            {move || deletion.with(|d| d.error().map(|e| view! { <p class="form-error">{e.to_string()}</p> }))}
            {move || history.with(|h| h.error().map(|e| view! { <p class="form-error">{e.to_string()}</p> }))}
            <PredictionsTable
                dataset=dataset
                records=records
                total=total
                on_delete=on_delete
                deleting=deleting
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ParamDef, SliderRange, Tier, ValueKind};

    fn def(id: &str) -> ParamDef {
        ParamDef {
            id: id.to_string(),
            label: id.to_string(),
            tier: Tier::Primary,
            kind: ValueKind::Number,
            default: 1.0,
            unit: None,
            range: Some(SliderRange { min: 0.0, max: 2.0, step: 0.1 }),
            description: String::new(),
        }
    }

    #[test]
    fn test_submit_waits_for_schema() {
        let params = ParameterSet::new(vec![def("pl_orbper")]);
        let mut schema = RemoteOp::<Vec<ParamDef>>::new();
        let generation = schema.start();
        assert!(submit_blocked(&schema, false, &params));

        schema.succeed(generation, vec![def("pl_orbper")]);
        assert!(!submit_blocked(&schema, false, &params));
        assert!(submit_blocked(&schema, true, &params));
    }

    #[test]
    fn test_submit_blocked_without_fields() {
        let schema = RemoteOp::<Vec<ParamDef>>::new();
        assert!(submit_blocked(&schema, false, &ParameterSet::default()));
    }
}
