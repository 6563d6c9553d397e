use std::collections::HashMap;

use common::{
    chart::ThresholdBand,
    req::{Measurement, Preset, SensorType, WateringState},
};
use yew::{function_component, html, use_effect_with, use_state, Html};

use crate::{components::chart::LineChart, components::notifications::use_notifier, request, utils};

const NOT_AVAILABLE: &str = "N/A";

fn value_str(measurement: Option<&Measurement>, kind: SensorType) -> String {
    measurement.map_or(NOT_AVAILABLE.to_string(), |m| {
        format!("{:.1}{}", m.value, kind.unit())
    })
}

/// Readings outside the active preset's range are flagged.
fn reading_class(measurement: Option<&Measurement>, band: ThresholdBand) -> &'static str {
    match measurement {
        Some(m) if !band.contains(m.value) => "danger",
        _ => "",
    }
}

fn range_str(preset: &Preset, kind: SensorType) -> String {
    match preset.threshold(kind).filter(|t| t.is_set()) {
        Some(t) => format!("{} – {} {}", t.min, t.max, kind.unit()),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[function_component(Status)]
pub fn status() -> Html {
    let notifier = use_notifier();
    let current = use_state(HashMap::<SensorType, Measurement>::new);
    let history = use_state(HashMap::<SensorType, Vec<Measurement>>::new);
    let watering = use_state(|| None::<WateringState>);
    let preset = use_state(|| None::<Preset>);

    // requests
    {
        let current = current.clone();
        let history = history.clone();
        let watering = watering.clone();
        let preset = preset.clone();
        let notifier = notifier.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match request::watering_state().await {
                    Ok(state) => watering.set(Some(state)),
                    Err(err) => notifier.error(err),
                }
                match request::current_preset().await {
                    Ok(p) => preset.set(Some(p)),
                    Err(err) => log::warn!("no current preset: {err}"),
                }

                let mut latest = HashMap::new();
                let mut series = HashMap::new();
                for kind in SensorType::ALL {
                    match request::current_measurement(kind).await {
                        Ok(Some(m)) => {
                            latest.insert(kind, m);
                        }
                        Ok(None) => {}
                        Err(err) => notifier.error(err),
                    }
                    match request::measurements(kind, false).await {
                        Ok(data) => {
                            series.insert(kind, data);
                        }
                        Err(err) => notifier.error(err),
                    }
                }
                current.set(latest);
                history.set(series);
            });
            || ()
        });
    }

    let timestamp_str = current
        .get(&SensorType::Temperature)
        .map_or(NOT_AVAILABLE.to_string(), |m| utils::local_label(m.timestamp));

    let band_of = |kind: SensorType| {
        ThresholdBand::from_threshold((*preset).as_ref().and_then(|p| p.threshold(kind)))
    };

    let current_rows: Html = SensorType::ALL
        .iter()
        .map(|kind| {
            let reading = current.get(kind);
            html! {
                <tr class={reading_class(reading, band_of(*kind))}>
                    <td>{kind.to_string()}</td><td>{value_str(reading, *kind)}</td>
                </tr>
            }
        })
        .collect();

    let preset_rows: Html = match (*preset).as_ref() {
        Some(p) => SensorType::ALL
            .iter()
            .map(|kind| html! { <tr><td>{kind.to_string()}</td><td>{range_str(p, *kind)}</td></tr> })
            .collect(),
        None => html! { <tr><td>{"No preset applied"}</td></tr> },
    };

    let charts: Html = SensorType::ALL
        .iter()
        .map(|kind| {
            let band = band_of(*kind);
            html! {
                <LineChart
                    id={format!("chart-{}", kind.path())}
                    kind={*kind}
                    measurements={history.get(kind).cloned().unwrap_or_default()}
                    {band}
                />
            }
        })
        .collect();

    html! {
        <div class="row">
            <div class="col-lg-5 col-md-12">
                <div class="panel panel-default">
                    <div class="panel-heading"><h3 class="panel-title">{"Current readings"}</h3></div>
                    <div class="panel-body">
                        <table class="table table-hover">
                            <tbody>
                                {current_rows}
                                <tr><td>{"Measured"}</td><td>{timestamp_str}</td></tr>
                            </tbody>
                        </table>
                    </div>
                </div>
                <div class="panel panel-default">
                    <div class="panel-heading"><h3 class="panel-title">{"Watering system"}</h3></div>
                    <div class="panel-body">
                        <table class="table table-hover">
                            <tbody>
                                if watering.map_or(false, |w| w.state) {
                                    <tr><td>{"Running"}</td><td>{"🟢"}</td></tr>
                                } else {
                                    <tr class="warning"><td>{"Running"}</td><td>{"🔴"}</td></tr>
                                }
                            </tbody>
                        </table>
                    </div>
                </div>
                <div class="panel panel-default">
                    <div class="panel-heading">
                        <h3 class="panel-title">
                            {(*preset).as_ref().map_or("Preset".to_string(), |p| format!("Preset: {}", p.name))}
                        </h3>
                    </div>
                    <div class="panel-body">
                        <table class="table table-hover">
                            <tbody>{preset_rows}</tbody>
                        </table>
                    </div>
                </div>
            </div>
            <div class="col-lg-7 col-md-12">
                {charts}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_show_not_available() {
        assert_eq!(value_str(None, SensorType::Co2), "N/A");
        let m = Measurement {
            timestamp: 0,
            value: 21.34,
        };
        assert_eq!(value_str(Some(&m), SensorType::Temperature), "21.3°C");
        assert_eq!(range_str(&Preset::blank(), SensorType::Humidity), "N/A");
    }

    #[test]
    fn out_of_range_readings_are_flagged() {
        let band = ThresholdBand {
            min: Some(400.0),
            max: Some(1000.0),
        };
        let reading = |value| Measurement {
            timestamp: 0,
            value,
        };
        assert_eq!(reading_class(Some(&reading(1500.0)), band), "danger");
        assert_eq!(reading_class(Some(&reading(350.0)), band), "danger");
        assert_eq!(reading_class(Some(&reading(600.0)), band), "");
        assert_eq!(reading_class(None, band), "");
        let unset = ThresholdBand::from_threshold(None);
        assert_eq!(reading_class(Some(&reading(1500.0)), unset), "");
    }
}
