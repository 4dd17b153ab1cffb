use log::debug;
use shared::MatchAdminMessages;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::matches::HttpMatchApi;
use crate::bootstrap::read_bootstrap;
use crate::config::Config;
use crate::controller::{MatchAdminController, MatchAdminView};

type Controller = MatchAdminController<HttpMatchApi>;

#[derive(Properties, PartialEq, Clone, Debug)]
pub struct MatchAdminPageProps {}

#[function_component(MatchAdminPage)]
pub fn match_admin_page(_props: &MatchAdminPageProps) -> Html {
    let redraw = use_force_update();
    let controller: Rc<Controller> = {
        let redraw = redraw.clone();
        use_memo((), move |_| {
            let messages = MatchAdminMessages::new(Config::locale());
            MatchAdminController::new(HttpMatchApi, messages)
                .with_on_change(Callback::from(move |_| redraw.force_update()))
        })
    };

    // Page data and the first listing
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            match read_bootstrap(Config::bootstrap_element_id()) {
                Ok(bootstrap) => {
                    controller.set_experts(bootstrap.experts);
                    controller.set_matches(bootstrap.matches);
                }
                Err(e) => controller.show_error(e.to_string()),
            }

            spawn_local(async move {
                if let Err(e) = controller.load_unmatched("").await {
                    debug!("Initial listing failed: {}", e);
                }
            });
            || ()
        });
    }

    let view = controller.view();
    let messages = *controller.messages();

    let on_search = {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(e) = controller.on_search_input(&value).await {
                    debug!("Search reload failed: {}", e);
                }
            });
        })
    };

    let on_expert_change = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            controller.select_expert(&select.value());
        })
    };

    let on_create = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(e) = controller.on_create_match_click().await {
                    debug!("Match creation failed: {}", e);
                }
            });
        })
    };

    let on_check_all = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            controller.on_select_all_toggle(input.checked());
        })
    };

    html! {
        <div class="match-admin-page">
            <div class="card">
                <div class="card-header">
                    <input
                        id="user_search"
                        type="text"
                        class="form-control"
                        placeholder={messages.search_placeholder()}
                        value={view.search.clone()}
                        oninput={on_search}
                    />
                </div>
                { render_user_list(&view, &controller, &messages) }
                <div class="card-footer d-flex gap-2">
                    <select id="assign_expert" class="form-select" onchange={on_expert_change}>
                        <option value="" selected={view.selected_expert.is_empty()}>
                            { messages.expert_placeholder() }
                        </option>
                        { for view.experts.iter().map(|expert| html! {
                            <option
                                value={expert.value()}
                                selected={expert.value() == view.selected_expert}
                            >
                                { &expert.username }
                            </option>
                        }) }
                    </select>
                    <button
                        id="create_match_btn"
                        class="btn btn-primary"
                        disabled={view.submitting}
                        onclick={on_create}
                    >
                        { messages.create_button() }
                    </button>
                </div>
                <div id="createmsg">
                    if let Some(status) = view.status.as_ref() {
                        <span class={status.kind.css_class()}>{ &status.text }</span>
                    }
                </div>
            </div>

            <table class="table">
                <thead>
                    <tr>
                        <th>
                            <input
                                id="chkall"
                                type="checkbox"
                                checked={view.select_all}
                                onchange={on_check_all}
                            />
                        </th>
                        <th>{ "ID" }</th>
                        <th>{ "User" }</th>
                        <th>{ "Expert" }</th>
                        <th>{ "Status" }</th>
                        <th>{ "Created" }</th>
                    </tr>
                </thead>
                <tbody>
                    { render_match_rows(&view, &controller) }
                </tbody>
            </table>
        </div>
    }
}

fn render_user_list(
    view: &MatchAdminView,
    controller: &Rc<Controller>,
    messages: &MatchAdminMessages,
) -> Html {
    if view.users.is_empty() && !view.loading {
        return html! {
            <ul id="unmatched_users_list" class="list-group">
                <li class="list-group-item text-muted">{ messages.no_unmatched_users() }</li>
            </ul>
        };
    }

    html! {
        <ul id="unmatched_users_list" class="list-group">
            { for view.users.iter().map(|row| {
                let user_id = row.user.id;
                let onchange = {
                    let controller = controller.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        debug!("User {} checked: {}", user_id, input.checked());
                        controller.toggle_user(user_id, input.checked());
                    })
                };
                html! {
                    <li class="list-group-item" key={user_id.to_string()}>
                        <input
                            type="checkbox"
                            class="userids"
                            value={row.user.checkbox_value()}
                            checked={row.checked}
                            {onchange}
                        />
                        { " " }{ row.user.label() }
                    </li>
                }
            }) }
        </ul>
    }
}

fn render_match_rows(view: &MatchAdminView, controller: &Rc<Controller>) -> Html {
    html! {
        <>
        { for view.matches.iter().map(|row| {
            let match_id = row.summary.id;
            let onchange = {
                let controller = controller.clone();
                Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    controller.toggle_match(match_id, input.checked());
                })
            };
            html! {
                <tr key={match_id.to_string()}>
                    <td>
                        <input
                            type="checkbox"
                            name="selected_matches"
                            value={match_id.to_string()}
                            checked={row.checked}
                            {onchange}
                        />
                    </td>
                    <td>{ match_id.to_string() }</td>
                    <td>{ format!("{} {}", row.summary.user_id, row.summary.user_email) }</td>
                    <td>{ row.summary.expert_name.clone().unwrap_or_else(|| "-".to_string()) }</td>
                    <td>{ row.summary.status.to_string() }</td>
                    <td>{ row.summary.created_at.format("%Y-%m-%d %H:%M").to_string() }</td>
                </tr>
            }
        }) }
        </>
    }
}
