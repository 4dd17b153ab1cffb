use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, debug};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod pages {
    pub mod match_admin;
    pub mod not_found;
}

use pages::{match_admin::MatchAdminPage, not_found::NotFound};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/admin/match")]
    MatchAdmin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
fn app() -> Html {
    debug!("App component rendering");
    html! {
        <BrowserRouter>
            <main class="match-admin-container">
                <Switch<Route> render={switch} />
            </main>
        </BrowserRouter>
    }
}

fn switch(routes: Route) -> Html {
    debug!("Route switch: {:?}", routes);
    match routes {
        Route::MatchAdmin => {
            debug!("Rendering match admin page");
            html! { <MatchAdminPage /> }
        },
        Route::NotFound => {
            debug!("Rendering 404 Not Found");
            html! { <NotFound /> }
        },
    }
}

#[wasm_bindgen]
pub async fn run_app() -> Result<(), JsValue> {
    info!("Initializing match admin console...");

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    info!("Logger initialized");

    // Set up panic hook
    console_error_panic_hook::set_once();
    info!("Panic hook set");

    info!("Mounting application");
    yew::Renderer::<App>::new().render();
    info!("Application mounted");

    Ok(())
}

// Entry point Trunk calls
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run_app().await {
            web_sys::console::error_1(&e);
        }
    });
    Ok(())
}
