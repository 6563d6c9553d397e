use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: AttrValue,
    pub open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    if !props.open {
        return html! {};
    }
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-backdrop-custom">
            <div class="panel panel-default modal-panel">
                <div class="panel-heading">
                    <button type="button" class="close" onclick={on_close}>{"×"}</button>
                    <h3 class="panel-title">{props.title.clone()}</h3>
                </div>
                <div class="panel-body">
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}
