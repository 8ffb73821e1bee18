use dioxus::prelude::*;
use dioxus_router::use_navigator;
use practice_core::model::Problem;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::ProblemVm;

#[derive(Clone, Debug, PartialEq)]
enum SearchState {
    Idle,
    Searching,
    Found(Problem),
    NotFound(String),
}

#[component]
pub fn StartView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let clock = ctx.sessions().clock();

    let mut query = use_signal(String::new);
    let mut search = use_signal(|| SearchState::Idle);
    let mut error = use_signal(|| None::<ViewError>);

    let open_problem = use_callback(move |problem: Problem| {
        let sessions = ctx.sessions();
        spawn(async move {
            match sessions.create_session(problem).await {
                Ok(session) => {
                    navigator.push(Route::Solve {
                        session_id: session.id().to_string(),
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "starting session failed");
                    error.set(Some(ViewError::Unknown));
                }
            }
        });
    });

    let on_search = {
        let catalog = catalog.clone();
        move |_| {
            let input = query();
            if input.trim().is_empty() {
                return;
            }
            search.set(SearchState::Searching);
            let catalog = catalog.clone();
            spawn(async move {
                let found = catalog.search(&input).cloned();
                search.set(match found {
                    Some(problem) => SearchState::Found(problem),
                    None => SearchState::NotFound(input),
                });
            });
        }
    };

    let on_register = move |_| {
        if let SearchState::NotFound(input) = search() {
            match Problem::manual(&input, clock.now()) {
                Ok(problem) => open_problem.call(problem),
                Err(_) => error.set(Some(ViewError::Unknown)),
            }
        }
    };

    let cards: Vec<(ProblemVm, Problem)> = catalog
        .problems()
        .iter()
        .map(|problem| (ProblemVm::from(problem), problem.clone()))
        .collect();

    rsx! {
        div { class: "page",
            h2 { "Start a problem" }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }

            section { class: "card search",
                label { r#for: "problem-search", "Problem URL or number" }
                div { class: "search-row",
                    input {
                        id: "problem-search",
                        r#type: "text",
                        placeholder: "https://www.acmicpc.net/problem/1920",
                        value: "{query}",
                        oninput: move |evt| query.set(evt.value()),
                    }
                    button {
                        class: "btn primary",
                        disabled: search() == SearchState::Searching,
                        onclick: on_search,
                        "Search"
                    }
                }
                match search() {
                    SearchState::Idle => rsx! {},
                    SearchState::Searching => rsx! {
                        p { class: "muted", "Searching..." }
                    },
                    SearchState::Found(problem) => {
                        let vm = ProblemVm::from(&problem);
                        rsx! {
                            p { class: "success", "Found it." }
                            ProblemCard {
                                problem: vm,
                                on_open: move |_| open_problem.call(problem.clone()),
                            }
                        }
                    }
                    SearchState::NotFound(input) => rsx! {
                        p { class: "error", "No problem matches \"{input}\"." }
                        button { class: "btn", onclick: on_register, "Register it manually" }
                    },
                }
            }

            h3 { "Problems" }
            ul { class: "problem-list",
                for (vm, problem) in cards {
                    ProblemCard {
                        key: "{vm.id}",
                        problem: vm.clone(),
                        on_open: move |_| open_problem.call(problem.clone()),
                    }
                }
            }
        }
    }
}

#[component]
fn ProblemCard(problem: ProblemVm, on_open: EventHandler<()>) -> Element {
    rsx! {
        li { class: "card problem",
            div { class: "problem-head",
                h4 { "{problem.title}" }
                button { class: "btn primary", onclick: move |_| on_open.call(()), "Solve" }
            }
            div { class: "meta",
                span { class: "{problem.platform_class}", "{problem.platform}" }
                span { class: "dot", "•" }
                span { class: "{problem.difficulty_class}", "{problem.difficulty}" }
                for tag in problem.tags.iter() {
                    span { class: "badge", "{tag}" }
                }
            }
        }
    }
}
