use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, LogView, ReviewDevView, ReviewView, SolveView, StartView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/start", StartView)] Start {},
        #[route("/solve/:session_id", SolveView)] Solve { session_id: String },
        #[route("/log", LogView)] Log {},
        #[route("/review", ReviewView)] Review {},
        #[route("/review/dev", ReviewDevView)] ReviewDev {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Practice" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Start {}, "Start" } }
                li { Link { to: Route::Review {}, "Review" } }
                li { Link { to: Route::Log {}, "Log" } }
            }
        }
    }
}
