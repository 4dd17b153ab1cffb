use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct NotFoundProps {}

#[function_component(NotFound)]
pub fn not_found(_props: &NotFoundProps) -> Html {
    html! {
        <div class="not-found-page">
            <h1>{"404"}</h1>
            <p>{"This console only serves the match administration page."}</p>
            <Link<Route> to={Route::MatchAdmin}>{"Go to match administration"}</Link<Route>>
        </div>
    }
}
