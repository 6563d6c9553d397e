use std::rc::Rc;

use common::notify::{Level, Notification};
use yew::prelude::*;

const MAX_VISIBLE: usize = 5;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Toasts {
    next_id: u32,
    items: Vec<(u32, Notification)>,
}

pub enum ToastAction {
    Push(Notification),
    Dismiss(u32),
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = (*self).clone();
        match action {
            ToastAction::Push(notification) => {
                toasts.items.push((toasts.next_id, notification));
                toasts.next_id = toasts.next_id.wrapping_add(1);
                if toasts.items.len() > MAX_VISIBLE {
                    toasts.items.remove(0);
                }
            }
            ToastAction::Dismiss(id) => toasts.items.retain(|(i, _)| *i != id),
        }
        Rc::new(toasts)
    }
}

/// Handle used by pages to report outcomes.
#[derive(Clone, Default, PartialEq)]
pub struct Notifier(Option<UseReducerDispatcher<Toasts>>);

impl Notifier {
    pub fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => log::info!("{}", notification.message),
            Level::Warning => log::warn!("{}", notification.message),
            Level::Error => log::error!("{}", notification.message),
        }
        if let Some(dispatcher) = &self.0 {
            dispatcher.dispatch(ToastAction::Push(notification));
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn error(&self, err: anyhow::Error) {
        self.notify(Notification::error(err.to_string()));
    }
}

#[hook]
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().unwrap_or_default()
}

fn alert_class(level: Level) -> &'static str {
    match level {
        Level::Success => "alert alert-success",
        Level::Warning => "alert alert-warning",
        Level::Error => "alert alert-danger",
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Html,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &Props) -> Html {
    let toasts = use_reducer(Toasts::default);
    let notifier = Notifier(Some(toasts.dispatcher()));

    let items: Html = toasts
        .items
        .iter()
        .map(|(id, notification)| {
            let dispatcher = toasts.dispatcher();
            let id = *id;
            let onclick = Callback::from(move |_: MouseEvent| dispatcher.dispatch(ToastAction::Dismiss(id)));
            html! {
                <div class={alert_class(notification.level)} role="alert" key={id.to_string()} {onclick}>
                    {notification.message.clone()}
                </div>
            }
        })
        .collect();

    html! {
        <ContextProvider<Notifier> context={notifier}>
            {props.children.clone()}
            <div class="toasts">{items}</div>
        </ContextProvider<Notifier>>
    }
}
