use leptos::prelude::*;

use crate::commands::ParamDef;
use crate::params::ParameterSet;

/// Inputs for one dataset's parameters. Primary fields are always shown;
/// extras sit behind a toggle.
#[component]
pub fn ParametersCard(
    params: RwSignal<ParameterSet>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let (show_extra, set_show_extra) = signal(false);

    let primary = move || {
        params
            .with(|p| p.primary().cloned().collect::<Vec<_>>())
            .into_iter()
            .map(|def| view! { <ParamInput def=def params=params disabled=disabled /> })
            .collect::<Vec<_>>()
    };

    let extra = move || {
        params
            .with(|p| p.extra().cloned().collect::<Vec<_>>())
            .into_iter()
            .map(|def| view! { <ParamInput def=def params=params disabled=disabled /> })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="card parameters-card">
            <div class="card-header">
                <h3>"Parameters"</h3>
                <button
                    class="btn btn-small btn-secondary"
                    on:click=move |_| params.update(|p| p.reset())
                    disabled=move || disabled.get()
                >
                    "Reset to defaults"
                </button>
            </div>
            <div class="param-grid">{primary}</div>

            <Show when=move || params.with(|p| p.has_extra())>
                <button
                    class="btn-link extra-toggle"
                    on:click=move |_| set_show_extra.update(|s| *s = !*s)
                >
                    {move || if show_extra.get() { "Hide additional parameters" } else { "Show additional parameters" }}
                </button>
                <Show when=move || show_extra.get()>
                    <div class="param-grid param-grid-extra">{extra}</div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn ParamInput(def: ParamDef, params: RwSignal<ParameterSet>, disabled: Signal<bool>) -> impl IntoView {
    let id = StoredValue::new(def.id.clone());
    let value = move || params.with(|p| p.display(&id.get_value()));
    let on_input = move |ev| {
        let raw = event_target_value(&ev);
        params.update(|p| {
            p.set(&id.get_value(), &raw);
        });
    };

    let label = match &def.unit {
        Some(unit) => format!("{} ({})", def.label, unit),
        None => def.label.clone(),
    };
    let input_id = format!("param-{}", def.id);

    view! {
        <div class="form-group param-input" title=def.description.clone()>
            <label for=input_id.clone()>{label}</label>
            {def.range.map(|range| view! {
                <input
                    type="range"
                    class="slider"
                    min=range.min
                    max=range.max
                    step=range.step
                    prop:value=value
                    on:input=on_input
                    disabled=move || disabled.get()
                />
                <div class="slider-bounds">
                    <span>{format!("Min: {}", range.min)}</span>
                    <span>{format!("Max: {}", range.max)}</span>
                </div>
            })}
            <input
                id=input_id
                type="number"
                class="input"
                step="any"
                placeholder=format!("Default: {}", def.default)
                prop:value=value
                on:input=on_input
                disabled=move || disabled.get()
            />
        </div>
    }
}
