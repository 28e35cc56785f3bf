use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AdminTaskView, CourseContentView, HomeView, UserTaskView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/admin/tasks", AdminTaskView)] AdminTasks {},
        #[route("/tasks", UserTaskView)] UserTasks {},
        #[route("/courses/:course_id", CourseContentView)] Course { course_id: String },
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
            h1 { "LMS" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::AdminTasks {}, "Admin Tasks" } }
                li { Link { to: Route::UserTasks {}, "My Tasks" } }
            }
        }
    }
}
