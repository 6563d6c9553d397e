use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    components::{modal::Modal, notifications::use_notifier},
    request,
};

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[function_component(Settings)]
pub fn settings() -> Html {
    let notifier = use_notifier();
    let refresh = use_state(|| false);
    let email = use_state(String::new);
    let draft = use_state(String::new);
    let editing = use_state(|| false);

    {
        let email = email.clone();
        let notifier = notifier.clone();
        use_effect_with(*refresh, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match request::email().await {
                    Ok(dto) => email.set(dto.email),
                    Err(err) => notifier.error(err),
                }
            });
            || ()
        });
    }

    let on_open = {
        let editing = editing.clone();
        let draft = draft.clone();
        let email = email.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set((*email).clone());
            editing.set(true);
        })
    };
    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(false))
    };
    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };
    let on_save = {
        let draft = draft.clone();
        let editing = editing.clone();
        let refresh = refresh.clone();
        let notifier = notifier.clone();
        Callback::from(move |_: MouseEvent| {
            let value = draft.trim().to_string();
            editing.set(false);
            let refresh = refresh.clone();
            let notifier = notifier.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match request::set_email(value).await {
                    Ok(()) => {
                        refresh.set(!*refresh);
                        notifier.success("E-mail changed successfully!");
                    }
                    Err(err) => notifier.error(err),
                }
            });
        })
    };

    html! {
        <div class="panel panel-default">
            <div class="panel-heading"><h3 class="panel-title">{"Notifications"}</h3></div>
            <div class="panel-body">
                <p>{"Alerts are sent to "}<b>{if email.is_empty() { "N/A" } else { email.as_str() }}</b></p>
                <button class="btn btn-default" onclick={on_open}>{"Change e-mail"}</button>
            </div>
            <Modal title="Change e-mail" open={*editing} {on_close}>
                <input type="email" class="form-control" value={(*draft).clone()} oninput={on_input}/>
                <button class="btn btn-primary" disabled={!looks_like_email(&draft)} onclick={on_save}>{"Save"}</button>
            </Modal>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(looks_like_email("grower@example.com"));
        assert!(looks_like_email(" grower@example.com "));
        assert!(!looks_like_email("grower"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("grower@localhost"));
    }
}
