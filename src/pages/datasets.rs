use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::commands::{self, Dataset, ParamDef, Tier};
use crate::remote::{dispatch, RemoteOp};

#[component]
pub fn DatasetsPage() -> impl IntoView {
    view! {
        <div class="page datasets-page">
            <h2>"Datasets"</h2>
            <p class="page-description">
                "Both models were trained on public NASA Exoplanet Archive catalogs. Each expects a fixed set of measurements."
            </p>
            <div class="card-grid">
                <div class="card">
                    <h3>"Kepler Objects of Interest"</h3>
                    <p>
                        "Candidates from the Kepler space telescope (2009-2018). The model takes six headline measurements plus 36 detailed features: error bounds, false positive flags, transit shape and sky position. Its answer is planet or not planet."
                    </p>
                    <a href="/datasets/kepler" class="btn btn-primary">"Kepler parameters"</a>
                </div>
                <div class="card">
                    <h3>"TESS Objects of Interest"</h3>
                    <p>
                        "Candidates from the Transiting Exoplanet Survey Satellite. The model takes nine planetary and stellar measurements and answers with a disposition code such as PC (planet candidate) or FP (false positive)."
                    </p>
                    <a href="/datasets/tess" class="btn btn-primary">"TESS parameters"</a>
                </div>
            </div>
        </div>
    }
}

/// Parameter reference for one dataset, rendered from the backend schema.
#[component]
pub fn DatasetDetailPage() -> impl IntoView {
    let route = use_params_map();
    let dataset = Memo::new(move |_| route.with(|p| p.get("name")).and_then(|name| Dataset::from_slug(&name)));
    let schema = RwSignal::new(RemoteOp::<Vec<ParamDef>>::new());

    Effect::new(move |_| match dataset.get() {
        Some(d) => dispatch(schema, commands::parameter_schema(d)),
        None => schema.update(|s| s.reset()),
    });

    let section = move |tier: Tier| {
        schema.with(|s| {
            s.value()
                .map(|defs| defs.iter().filter(|d| d.tier == tier).cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="page dataset-detail-page">
            {move || match dataset.get() {
                None => view! {
                    <p>"Unknown dataset. " <a href="/datasets">"Back to datasets"</a></p>
                }.into_any(),
                Some(d) => view! {
                    <h2>{format!("{} parameters", d.name())}</h2>
                    <p class="page-description">
                        "Blank fields in the prediction form are sent with the default shown here."
                    </p>
                    <Show when=move || schema.with(|s| s.is_pending())>
                        <p class="muted">"Loading..."</p>
                    </Show>
                    {move || schema.with(|s| s.error().map(|e| view! { <p class="form-error">{e.to_string()}</p> }))}
                    <ParamTable title="Primary parameters" defs=Signal::derive(move || section(Tier::Primary)) />
                    <ParamTable title="Additional parameters" defs=Signal::derive(move || section(Tier::Extra)) />
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ParamTable(title: &'static str, defs: Signal<Vec<ParamDef>>) -> impl IntoView {
    view! {
        <Show when=move || !defs.with(Vec::is_empty)>
            <section class="param-reference">
                <h3>{title}</h3>
                <table class="param-table">
                    <thead>
                        <tr>
                            <th>"Parameter"</th>
                            <th>"Field"</th>
                            <th>"Default"</th>
                            <th>"Range"</th>
                            <th>"Description"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || defs.get().into_iter().map(|def| {
                            let name = match &def.unit {
                                Some(unit) => format!("{} ({})", def.label, unit),
                                None => def.label.clone(),
                            };
                            let range = def
                                .range
                                .map(|r| format!("{} to {}", r.min, r.max))
                                .unwrap_or_else(|| "-".to_string());
                            view! {
                                <tr>
                                    <td>{name}</td>
                                    <td class="mono">{def.id.clone()}</td>
                                    <td>{def.default.to_string()}</td>
                                    <td>{range}</td>
                                    <td>{def.description.clone()}</td>
                                </tr>
                            }
                        }).collect::<Vec<_>>()}
                    </tbody>
                </table>
            </section>
        </Show>
    }
}
