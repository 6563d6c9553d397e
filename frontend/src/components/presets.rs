use common::{
    preset::{PresetForm, SaveRequest},
    req::{Preset, SensorType, Threshold},
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    components::{modal::Modal, notifications::use_notifier},
    request, utils,
};

#[derive(Clone, Copy, PartialEq)]
enum Bound {
    Min,
    Max,
}

fn with_bound(threshold: &Threshold, bound: Bound, value: f32) -> Threshold {
    let mut threshold = *threshold;
    match bound {
        Bound::Min => threshold.min = value,
        Bound::Max => threshold.max = value,
    }
    threshold
}

#[derive(Properties, PartialEq)]
struct ThresholdRowProps {
    threshold: Threshold,
    editable: bool,
    on_change: Callback<Threshold>,
}

#[function_component(ThresholdRow)]
fn threshold_row(props: &ThresholdRowProps) -> Html {
    let input = |bound: Bound| {
        let threshold = props.threshold;
        let on_change = props.on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(with_bound(&threshold, bound, utils::parse_bound(&input.value())));
        });
        let value = match bound {
            Bound::Min => props.threshold.min,
            Bound::Max => props.threshold.max,
        };
        html! {
            <input type="number" class="form-control" disabled={!props.editable}
                value={utils::bound_input_value(value)} {oninput}/>
        }
    };
    let kind = props.threshold.kind;

    html! {
        <div class="row threshold-row">
            <div class="col-xs-12"><h4>{format!("{} ({})", kind, kind.unit())}</h4></div>
            <div class="col-xs-6">
                <div class="input-group">
                    <span class="input-group-addon width-70">{"Min"}</span>
                    {input(Bound::Min)}
                </div>
            </div>
            <div class="col-xs-6">
                <div class="input-group">
                    <span class="input-group-addon width-70">{"Max"}</span>
                    {input(Bound::Max)}
                </div>
            </div>
        </div>
    }
}

#[function_component(Presets)]
pub fn presets() -> Html {
    let notifier = use_notifier();
    let refresh = use_state(|| false);
    let presets = use_state(Vec::<Preset>::new);
    let current = use_state(|| None::<Preset>);
    let form = use_state(PresetForm::default);
    let delete_id = use_state(|| None::<i32>);

    // requests, again after every successful change
    {
        let presets = presets.clone();
        let current = current.clone();
        let notifier = notifier.clone();

        use_effect_with(*refresh, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match request::presets().await {
                    Ok(list) => presets.set(list),
                    Err(err) => notifier.error(err),
                }
                match request::current_preset().await {
                    Ok(p) => current.set(Some(p)),
                    Err(err) => log::warn!("no current preset: {err}"),
                }
            });
            || ()
        });
    }

    let do_refresh = {
        let refresh = refresh.clone();
        move || refresh.set(!*refresh)
    };

    // form transitions
    let update_form = |f: fn(&mut PresetForm)| {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            f(&mut next);
            form.set(next);
        })
    };
    let on_create_new = update_form(PresetForm::create_new);
    let on_begin_update = update_form(PresetForm::begin_update);
    let on_cancel = update_form(PresetForm::cancel);

    let on_select = {
        let form = form.clone();
        let presets = presets.clone();
        Callback::from(move |id: i32| {
            if let Some(selected) = PresetForm::select(&presets, id) {
                form.set(selected);
            }
        })
    };

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.set_name(input.value());
            form.set(next);
        })
    };

    let on_threshold = {
        let form = form.clone();
        Callback::from(move |threshold: Threshold| {
            let mut next = (*form).clone();
            next.set_threshold(threshold);
            form.set(next);
        })
    };

    let on_save = {
        let form = form.clone();
        let presets = presets.clone();
        let notifier = notifier.clone();
        let do_refresh = do_refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let save = match form.save(&presets) {
                Ok(save) => save,
                Err(err) => return notifier.notify(err.into()),
            };
            let form = form.clone();
            let notifier = notifier.clone();
            let do_refresh = do_refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let res = match &save {
                    SaveRequest::Create(preset) => request::create_preset(preset).await,
                    SaveRequest::Update(id, preset) => request::update_preset(*id, preset).await,
                };
                match res {
                    Ok(()) => {
                        let mut next = (*form).clone();
                        next.saved();
                        form.set(next);
                        do_refresh();
                        notifier.success("Successfully saved");
                    }
                    Err(err) => notifier.error(err),
                }
            });
        })
    };

    let on_apply = {
        let form = form.clone();
        let current = current.clone();
        let notifier = notifier.clone();
        let do_refresh = do_refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let id = match form.apply((*current).as_ref()) {
                Ok(id) => id,
                Err(err) => return notifier.notify(err.into()),
            };
            let notifier = notifier.clone();
            let do_refresh = do_refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match request::set_current_preset(id).await {
                    Ok(()) => {
                        do_refresh();
                        notifier.success("Successfully changed current preset!");
                    }
                    Err(err) => notifier.error(err),
                }
            });
        })
    };

    let on_confirm_delete = {
        let form = form.clone();
        let delete_id = delete_id.clone();
        let notifier = notifier.clone();
        let do_refresh = do_refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(id) = *delete_id else {
                return;
            };
            delete_id.set(None);
            let form = form.clone();
            let notifier = notifier.clone();
            let do_refresh = do_refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match request::delete_preset(id).await {
                    Ok(()) => {
                        form.set(PresetForm::default());
                        do_refresh();
                        notifier.success("Preset deleted successfully!");
                    }
                    Err(err) => notifier.error(err),
                }
            });
        })
    };
    let on_close_delete = {
        let delete_id = delete_id.clone();
        Callback::from(move |_: ()| delete_id.set(None))
    };

    // preset list
    let shown_id = form.preset().id;
    let preset_list: Html = presets
        .iter()
        .filter_map(|p| p.id.map(|id| (id, p.name.clone())))
        .map(|(id, name)| {
            let onclick = on_select.reform(move |_: MouseEvent| id);
            let ondelete = {
                let delete_id = delete_id.clone();
                Callback::from(move |_: MouseEvent| delete_id.set(Some(id)))
            };
            let class = if shown_id == Some(id) {
                "list-group-item active"
            } else {
                "list-group-item"
            };
            html! {
                <li {class} key={id.to_string()}>
                    <a {onclick}>{name}</a>
                    <button type="button" class="close" onclick={ondelete}>{"🗑"}</button>
                </li>
            }
        })
        .collect();

    // form
    let preset = form.preset();
    let editable = form.is_editable();
    let threshold_rows: Html = SensorType::ALL
        .iter()
        .map(|kind| {
            let threshold = preset
                .threshold(*kind)
                .copied()
                .unwrap_or_else(|| Threshold::blank(*kind));
            html! {
                <ThresholdRow {threshold} {editable} on_change={on_threshold.clone()} key={kind.path()}/>
            }
        })
        .collect();

    let buttons = match &*form {
        PresetForm::Viewing(_) => {
            let apply = form.apply_button((*current).as_ref(), &presets);
            html! {
                <>
                    <button class="btn btn-default" onclick={on_begin_update}>{"Update"}</button>
                    if let Some(apply) = apply {
                        <button class="btn btn-primary" disabled={!apply.enabled} onclick={on_apply}>
                            {apply.label}
                        </button>
                    }
                </>
            }
        }
        PresetForm::Editing { .. } => html! {
            <>
                <button class="btn btn-default" onclick={on_cancel}>{"Cancel"}</button>
                <button class="btn btn-primary" disabled={!form.is_dirty()} onclick={on_save.clone()}>{"Save"}</button>
            </>
        },
        PresetForm::Creating(_) => html! {
            <button class="btn btn-primary" onclick={on_save.clone()}>{"Save"}</button>
        },
    };

    html! {
        <div class="row">
            <div class="col-md-3">
                <h4>{"All Presets"}</h4>
                <ul class="list-group">{preset_list}</ul>
                <button class="btn btn-default btn-block" disabled={form.is_creating()} onclick={on_create_new}>
                    {"Create new Preset"}
                </button>
            </div>
            <div class="col-md-9">
                <div class="panel panel-default">
                    <div class="panel-heading">
                        <h3 class="panel-title">{form.title()}</h3>
                    </div>
                    <div class="panel-body">
                        <div class="input-group col-md-6">
                            <span class="input-group-addon">{"Preset name"}</span>
                            <input type="text" class="form-control" disabled={!editable}
                                value={preset.name.clone()} oninput={on_name}/>
                        </div>
                        {threshold_rows}
                        <div class="btn-toolbar preset-buttons">{buttons}</div>
                    </div>
                </div>
            </div>
            <Modal title="Delete preset" open={delete_id.is_some()} on_close={on_close_delete}>
                <p>{"Do you really want to delete this preset?"}</p>
                <button class="btn btn-danger" onclick={on_confirm_delete}>{"Delete"}</button>
            </Modal>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::notify::{Level, Notification};

    #[test]
    fn bound_edits_touch_one_side() {
        let threshold = Threshold {
            kind: SensorType::Temperature,
            min: 18.0,
            max: 26.0,
        };
        let edited = with_bound(&threshold, Bound::Max, 30.0);
        assert_eq!((edited.min, edited.max), (18.0, 30.0));
        let cleared = with_bound(&threshold, Bound::Min, f32::NAN);
        assert!(cleared.min.is_nan());
    }

    #[test]
    fn save_failures_are_warnings() {
        let n: Notification = PresetForm::default().save(&[]).unwrap_err().into();
        assert_eq!(n.level, Level::Warning);
    }
}
