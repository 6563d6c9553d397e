use common::{
    chart::{ThresholdBand, TimeScope},
    req::{Measurement, SensorType},
};
use plotly::{
    common::{DashType, Line, Mode},
    layout::Margin,
    Configuration, Layout, Plot, Scatter,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::utils;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub id: String,
    pub kind: SensorType,
    pub measurements: Vec<Measurement>,
    #[prop_or(ThresholdBand { min: None, max: None })]
    pub band: ThresholdBand,
}

fn trace(name: &str, points: &[Measurement]) -> Box<Scatter<String, f32>> {
    Scatter::new(
        points.iter().map(|m| utils::local_label(m.timestamp)).collect::<Vec<_>>(),
        points.iter().map(|m| m.value).collect::<Vec<_>>(),
    )
    .name(name)
    .mode(Mode::Lines)
}

fn build_plot(kind: SensorType, points: &[Measurement], band: ThresholdBand) -> Plot {
    let mut plot = Plot::new();
    plot.add_trace(trace(&kind.to_string(), points).text(kind.unit()));

    // threshold overlays
    if let Some(max) = band.max {
        let line = ThresholdBand::line(max, points);
        plot.add_trace(trace("max", &line).line(Line::new().color("#FF0000").dash(DashType::Dash)));
    }
    if let Some(min) = band.min {
        let line = ThresholdBand::line(min, points);
        plot.add_trace(trace("min", &line).line(Line::new().color("#0000FF").dash(DashType::Dash)));
    }

    plot.set_configuration(
        Configuration::default()
            .display_logo(false)
            .editable(false)
            .display_mode_bar(plotly::configuration::DisplayModeBar::Hover),
    );
    plot.set_layout(
        Layout::default()
            .hover_mode(plotly::layout::HoverMode::XUnified)
            .auto_size(true)
            .margin(Margin::default().top(20).bottom(40).left(40).right(20)),
    );
    plot
}

/// Plotly is only called once there is something to draw.
fn should_draw(points: &[Measurement]) -> bool {
    !points.is_empty()
}

async fn draw(id: &str, plot: &Plot) {
    #[cfg(target_arch = "wasm32")]
    plotly::bindings::new_plot(id, plot).await;
    #[cfg(not(target_arch = "wasm32"))]
    log::debug!("no plot backend for {id}, {} bytes", plot.to_json().len());
}

#[function_component(LineChart)]
pub fn line_chart(props: &Props) -> Html {
    let scopes = use_memo((), |_| TimeScope::standard());
    let scope = use_state(|| scopes[0].clone());
    let show_min = use_state(|| true);
    let show_max = use_state(|| true);

    let points = scope.apply(&props.measurements, utils::now_ms());
    let band = props.band.visible(*show_min, *show_max);
    let has_data = should_draw(&points);

    let id = props.id.clone();
    let plot = build_plot(props.kind, &points, band);
    let p = yew_hooks::use_async::<_, (), ()>(async move {
        draw(&id, &plot).await;
        Ok(())
    });

    use_effect_with((points, band), move |(points, _)| {
        if should_draw(points) {
            p.run();
        }
        || ()
    });

    // menu callbacks
    let on_scope = {
        let scope = scope.clone();
        let scopes = scopes.clone();
        Callback::from(move |e: Event| {
            let select = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok());
            if let Some(select) = select {
                if let Some(selected) = TimeScope::by_name(&scopes, &select.value()) {
                    scope.set(selected);
                }
            }
        })
    };
    let toggle = |handle: UseStateHandle<bool>| {
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            handle.set(input.checked());
        })
    };
    let on_min = toggle(show_min.clone());
    let on_max = toggle(show_max.clone());

    let options: Html = scopes
        .iter()
        .map(|s| {
            html! { <option value={s.name} selected={s.name == scope.name}>{s.name}</option> }
        })
        .collect();

    // the target div stays mounted so plotly always finds it
    html! {
        <div class="panel panel-default">
            <div class="panel-heading">
                <div class="row">
                    <div class="col-xs-6">
                        <h3 class="panel-title">{format!("{} in {}", props.kind, props.kind.unit())}</h3>
                    </div>
                    <div class="col-xs-6 text-right">
                        <label class="submenulabel">
                            <input type="checkbox" checked={*show_max} onchange={on_max}/>{" max "}
                        </label>
                        <label class="submenulabel">
                            <input type="checkbox" checked={*show_min} onchange={on_min}/>{" min "}
                        </label>
                        <select class="form-control input-sm chart-scope" onchange={on_scope}>
                            {options}
                        </select>
                    </div>
                </div>
            </div>
            <div class="panel-body">
                if !has_data {
                    <label class="chart-empty">{"no data"}</label>
                }
                <div class="chart" id={props.id.clone()} hidden={!has_data}></div>
            </div>
        </div>
    }
}
