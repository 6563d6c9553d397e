mod components;
mod config;
mod request;
mod utils;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::notifications::NotificationProvider;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Status,
    #[at("/presets")]
    Presets,
    #[at("/watering")]
    Watering,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    fn title(&self) -> &'static str {
        match self {
            Route::Status => "Status",
            Route::Presets => "Presets",
            Route::Watering => "Watering",
            Route::Settings => "Settings",
            Route::NotFound => "Not found",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub current_route: Route,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let cr = &props.current_route;
    let class_active = move |r| {
        if *cr == r {
            "active"
        } else {
            ""
        }
    };

    html! {
        <div class="col-sm-3 col-md-2 sidebar">
            <ul class="nav nav-sidebar">
                <img class="logo-img center-block" src="media/logo.webp"/>
                <li class={class_active(Route::Status)}>
                    <Link<Route> to={Route::Status}>{"⌂ Status"}</Link<Route>>
                </li>
                <li class={class_active(Route::Presets)}>
                    <Link<Route> to={Route::Presets}>{"🌡 Presets"}</Link<Route>>
                </li>
                <li class={class_active(Route::Watering)}>
                    <Link<Route> to={Route::Watering}>{"💧 Watering"}</Link<Route>>
                </li>
                <li class={class_active(Route::Settings)}>
                    <Link<Route> to={Route::Settings}>{"⚙ Settings"}</Link<Route>>
                </li>
            </ul>

            <ul class="nav nav-sidebar fix-bottom">
                {concat!("v", env!("CARGO_PKG_VERSION"))}
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PageProps {
    pub route: Route,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Page)]
pub fn page(props: &PageProps) -> Html {
    html! {
        <div class="container-fluid">
            <div class="row">
                <Sidebar current_route={props.route.clone()}/>
                <div class="col-sm-9 col-sm-offset-3 col-md-10 col-md-offset-2 main">
                    <h1 class="page-header">{props.route.title()}</h1>
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}

fn switch(route: Route) -> Html {
    let content = match route {
        Route::Status => html! { <components::status::Status/> },
        Route::Presets => html! { <components::presets::Presets/> },
        Route::Watering => html! { <components::watering::Watering/> },
        Route::Settings => html! { <components::settings::Settings/> },
        Route::NotFound => html! { <h1>{ "404" }</h1> },
    };
    html! { <Page {route}>{content}</Page> }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <NotificationProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </NotificationProvider>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("greenhouse dashboard v{}", env!("CARGO_PKG_VERSION"));
    yew::Renderer::<App>::new().render();
}
