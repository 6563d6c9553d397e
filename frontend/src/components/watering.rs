use std::rc::Rc;

use chrono::{Local, NaiveTime, Weekday};
use common::{
    req::{weekday_label, Interval, WEEK},
    schedule::{self, group_intervals, validate_interval, DayPicks, NewInterval},
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    components::{modal::Modal, notifications::use_notifier},
    request, utils,
};

const DEFAULT_RUN_MINUTES: u32 = 5;

/// Local copy of the server schedule, edited only after a call succeeded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WeekSchedule {
    intervals: Vec<Interval>,
}

pub enum ScheduleAction {
    Loaded(Vec<Interval>),
    Added(Vec<Interval>),
    Replaced(Interval),
    Removed(i32),
}

impl Reducible for WeekSchedule {
    type Action = ScheduleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ScheduleAction::Loaded(intervals) => next.intervals = intervals,
            ScheduleAction::Added(created) => next.intervals.extend(created),
            ScheduleAction::Replaced(updated) => {
                if !schedule::replace_interval(&mut next.intervals, updated) {
                    return self;
                }
            }
            ScheduleAction::Removed(id) => schedule::remove_interval(&mut next.intervals, id),
        }
        Rc::new(next)
    }
}

fn time_callback(on_time: Callback<NaiveTime>) -> Callback<Event> {
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        if let Some(time) = utils::parse_time(&input.value()) {
            on_time.emit(time);
        }
    })
}

fn interval_label(interval: &Interval) -> String {
    format!(
        "{} – {}",
        interval.start_time.format("%H:%M"),
        interval.end_time.format("%H:%M")
    )
}

#[derive(Properties, PartialEq)]
struct ColumnProps {
    day: Weekday,
    intervals: Vec<Interval>,
    on_edit: Callback<Interval>,
    on_delete: Callback<i32>,
}

#[function_component(ScheduleColumn)]
fn schedule_column(props: &ColumnProps) -> Html {
    let rows: Html = props
        .intervals
        .iter()
        .map(|interval| {
            let on_edit = props.on_edit.reform({
                let interval = interval.clone();
                move |_: MouseEvent| interval.clone()
            });
            let id = interval.id;
            let on_delete = props.on_delete.reform(move |_: MouseEvent| id);
            html! {
                <li class="list-group-item" key={id.to_string()}>
                    <a onclick={on_edit}>{interval_label(interval)}</a>
                    <button type="button" class="close" onclick={on_delete}>{"🗑"}</button>
                </li>
            }
        })
        .collect();

    html! {
        <div class="schedule-column">
            <h4 class={if props.intervals.is_empty() { "" } else { "text-primary" }}>
                {weekday_label(props.day)}
            </h4>
            <ul class="list-group">{rows}</ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CreateProps {
    open: bool,
    on_close: Callback<()>,
    on_add: Callback<NewInterval>,
}

#[function_component(CreateIntervalModal)]
fn create_interval_modal(props: &CreateProps) -> Html {
    let form = use_state(|| NewInterval::starting_at(Local::now().time()));

    let set_start = {
        let form = form.clone();
        time_callback(Callback::from(move |start| {
            form.set(NewInterval { start, ..(*form).clone() })
        }))
    };
    let set_end = {
        let form = form.clone();
        time_callback(Callback::from(move |end| {
            form.set(NewInterval { end, ..(*form).clone() })
        }))
    };

    let day_picker: Html = WEEK
        .iter()
        .map(|day| {
            let day = *day;
            let onchange = {
                let form = form.clone();
                Callback::from(move |_: Event| {
                    let mut next = (*form).clone();
                    next.picks.toggle(day);
                    form.set(next);
                })
            };
            html! {
                <label class="checkbox-inline" key={weekday_label(day)}>
                    <input type="checkbox" checked={form.picks.is_picked(day)} {onchange}/>
                    {&weekday_label(day)[..3]}
                </label>
            }
        })
        .collect();

    let verdict = form.verdict();
    let total = if verdict.is_ok() {
        utils::duration_label(form.duration())
    } else {
        verdict.message().to_string()
    };

    let on_confirm = {
        let form = form.clone();
        let on_add = props.on_add.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_add.emit((*form).clone());
            on_close.emit(());
        })
    };
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal title="New interval" open={props.open} on_close={props.on_close.clone()}>
            <div class="row">
                <div class="col-xs-6">
                    <input type="time" class="form-control" value={utils::time_input_value(form.start)} onchange={set_start}/>
                </div>
                <div class="col-xs-6">
                    <input type="time" class="form-control" value={utils::time_input_value(form.end)} onchange={set_end}/>
                </div>
            </div>
            <h4>{"Total time: "}<b>{total}</b></h4>
            <div>{day_picker}</div>
            <p class="text-muted">{"Please note! The watering schedule will be updated at midnight."}</p>
            <div class="btn-toolbar">
                <button class="btn btn-primary" disabled={!verdict.is_ok() || !props.open} onclick={on_confirm}>{"Confirm"}</button>
                <button class="btn btn-default" onclick={on_cancel}>{"Cancel"}</button>
            </div>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
struct UpdateProps {
    interval: Interval,
    on_close: Callback<()>,
    on_update: Callback<Interval>,
}

#[function_component(UpdateIntervalModal)]
fn update_interval_modal(props: &UpdateProps) -> Html {
    let draft = use_state(|| props.interval.clone());

    let set_start = {
        let draft = draft.clone();
        time_callback(Callback::from(move |start_time| {
            draft.set(Interval { start_time, ..(*draft).clone() })
        }))
    };
    let set_end = {
        let draft = draft.clone();
        time_callback(Callback::from(move |end_time| {
            draft.set(Interval { end_time, ..(*draft).clone() })
        }))
    };
    let on_day = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let day = input
                .value()
                .parse::<u8>()
                .ok()
                .and_then(common::req::weekday_from_index);
            if let Some(day_of_week) = day {
                draft.set(Interval { day_of_week, ..(*draft).clone() });
            }
        })
    };

    let mut picks = DayPicks::default();
    picks.set(draft.day_of_week, true);
    let verdict = validate_interval(draft.start_time, draft.end_time, &picks);

    let days: Html = WEEK
        .iter()
        .map(|day| {
            html! {
                <label class="radio-inline" key={weekday_label(*day)}>
                    <input type="radio" name="update-day"
                        value={common::req::weekday_index(*day).to_string()}
                        checked={draft.day_of_week == *day} onchange={on_day.clone()}/>
                    {&weekday_label(*day)[..3]}
                </label>
            }
        })
        .collect();

    let on_save = {
        let draft = draft.clone();
        let on_update = props.on_update.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_update.emit((*draft).clone());
            on_close.emit(());
        })
    };

    html! {
        <Modal title="Update interval" open={true} on_close={props.on_close.clone()}>
            <div class="row">
                <div class="col-xs-6">
                    <input type="time" class="form-control" value={utils::time_input_value(draft.start_time)} onchange={set_start}/>
                </div>
                <div class="col-xs-6">
                    <input type="time" class="form-control" value={utils::time_input_value(draft.end_time)} onchange={set_end}/>
                </div>
            </div>
            <div>{days}</div>
            if !verdict.is_ok() {
                <p class="text-danger">{verdict.message()}</p>
            }
            <button class="btn btn-primary" disabled={!verdict.is_ok()} onclick={on_save}>{"Save"}</button>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
struct RunProps {
    open: bool,
    on_close: Callback<()>,
    on_run: Callback<u32>,
}

#[function_component(RunWateringModal)]
fn run_watering_modal(props: &RunProps) -> Html {
    let minutes = use_state(|| DEFAULT_RUN_MINUTES);

    let on_minutes = {
        let minutes = minutes.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(value) = input.value().parse::<u32>() {
                minutes.set(value);
            }
        })
    };
    let on_run = {
        let minutes = minutes.clone();
        let on_run = props.on_run.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_run.emit(*minutes);
            on_close.emit(());
        })
    };

    html! {
        <Modal title="Manual start" open={props.open} on_close={props.on_close.clone()}>
            <div class="input-group">
                <span class="input-group-addon">{"Minutes"}</span>
                <input type="number" min="1" class="form-control" value={minutes.to_string()} oninput={on_minutes}/>
            </div>
            <button class="btn btn-primary" disabled={*minutes == 0} onclick={on_run}>{"Run"}</button>
        </Modal>
    }
}

#[function_component(Watering)]
pub fn watering() -> Html {
    let notifier = use_notifier();
    let week = use_reducer(WeekSchedule::default);
    let create_open = use_state(|| false);
    let run_open = use_state(|| false);
    let to_update = use_state(|| None::<Interval>);

    let grouped = use_memo(week.intervals.clone(), |intervals| group_intervals(intervals));

    // requests
    {
        let week = week.dispatcher();
        let notifier = notifier.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match request::schedule().await {
                    Ok(schedule) => week.dispatch(ScheduleAction::Loaded(schedule)),
                    Err(err) => notifier.error(err),
                }
            });
            || ()
        });
    }

    let on_add = {
        let week = week.dispatcher();
        let notifier = notifier.clone();
        Callback::from(move |form: NewInterval| {
            let new_intervals = form.expand();
            if new_intervals.is_empty() {
                return;
            }
            let week = week.clone();
            let notifier = notifier.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match request::add_intervals(&new_intervals).await {
                    Ok(created) => {
                        week.dispatch(ScheduleAction::Added(created));
                        notifier.success("Intervals added successfully!");
                    }
                    Err(err) => notifier.error(err),
                }
            });
        })
    };

    let on_update = {
        let week = week.dispatcher();
        let notifier = notifier.clone();
        Callback::from(move |updated: Interval| {
            let week = week.clone();
            let notifier = notifier.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match request::update_interval(&updated).await {
                    Ok(()) => {
                        week.dispatch(ScheduleAction::Replaced(updated));
                        notifier.success("Interval updated successfully!");
                    }
                    Err(err) => notifier.error(err),
                }
            });
        })
    };

    let on_delete = {
        let week = week.dispatcher();
        let notifier = notifier.clone();
        Callback::from(move |id: i32| {
            let week = week.clone();
            let notifier = notifier.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match request::delete_interval(id).await {
                    Ok(()) => {
                        week.dispatch(ScheduleAction::Removed(id));
                        notifier.success("Interval deleted successfully!");
                    }
                    Err(err) => notifier.error(err),
                }
            });
        })
    };

    let on_run = {
        let notifier = notifier.clone();
        Callback::from(move |minutes: u32| {
            let notifier = notifier.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match request::run_watering(minutes).await {
                    Ok(()) => notifier.success("Manual Watering initiated!"),
                    Err(err) => notifier.error(err),
                }
            });
        })
    };

    let on_edit = {
        let to_update = to_update.clone();
        Callback::from(move |interval: Interval| to_update.set(Some(interval)))
    };

    let set_flag = |handle: &UseStateHandle<bool>, value: bool| {
        let handle = handle.clone();
        Callback::from(move |_: ()| handle.set(value))
    };
    let open_create = set_flag(&create_open, true);
    let close_create = set_flag(&create_open, false);
    let open_run = set_flag(&run_open, true);
    let close_run = set_flag(&run_open, false);
    let close_update = {
        let to_update = to_update.clone();
        Callback::from(move |_: ()| to_update.set(None))
    };

    let columns: Html = grouped
        .iter()
        .map(|(day, day_intervals)| {
            html! {
                <div class="col-xs-12 col-md-1-7" key={weekday_label(day)}>
                    <ScheduleColumn {day} intervals={day_intervals.to_vec()}
                        on_edit={on_edit.clone()} on_delete={on_delete.clone()}/>
                </div>
            }
        })
        .collect();

    html! {
        <>
            <div class="btn-toolbar schedule-buttons">
                <button class="btn btn-primary" onclick={open_create.reform(|_: MouseEvent| ())}>{"Add Watering Time"}</button>
                <button class="btn btn-default" onclick={open_run.reform(|_: MouseEvent| ())}>{"Manual Start"}</button>
            </div>
            <div class="row schedule">{columns}</div>
            <CreateIntervalModal open={*create_open} on_close={close_create} {on_add}/>
            <RunWateringModal open={*run_open} on_close={close_run} {on_run}/>
            if let Some(interval) = (*to_update).clone() {
                <UpdateIntervalModal key={interval.id.to_string()} interval={interval.clone()} on_close={close_update} {on_update}/>
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_label_drops_seconds() {
        let interval = Interval {
            id: 1,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 5, 30).unwrap(),
            day_of_week: Weekday::Mon,
        };
        assert_eq!(interval_label(&interval), "08:00 – 08:05");
    }

    fn at(id: i32, hour: u32, day_of_week: Weekday) -> Interval {
        Interval {
            id,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour, 30, 0).unwrap(),
            day_of_week,
        }
    }

    fn ids(week: &WeekSchedule) -> Vec<i32> {
        week.intervals.iter().map(|i| i.id).collect()
    }

    #[test]
    fn overlapping_edits_apply_to_the_latest_list() {
        let week = Rc::new(WeekSchedule::default()).reduce(ScheduleAction::Loaded(vec![
            at(1, 6, Weekday::Mon),
            at(2, 7, Weekday::Mon),
            at(3, 8, Weekday::Tue),
        ]));
        // two deletes issued from the same render both stick
        let week = week
            .reduce(ScheduleAction::Removed(1))
            .reduce(ScheduleAction::Removed(2));
        assert_eq!(ids(&week), vec![3]);

        // a late update of a removed interval does not bring it back
        let week = week.reduce(ScheduleAction::Replaced(at(1, 9, Weekday::Wed)));
        assert_eq!(ids(&week), vec![3]);

        let week = week
            .reduce(ScheduleAction::Replaced(at(3, 9, Weekday::Wed)))
            .reduce(ScheduleAction::Added(vec![at(4, 20, Weekday::Sun)]));
        assert_eq!(ids(&week), vec![3, 4]);
        assert_eq!(week.intervals[0].day_of_week, Weekday::Wed);
    }
}
