use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut course_id = use_signal(String::new);

    let login = ctx.session().map_or_else(
        || "Not logged in".to_owned(),
        |session| format!("Logged in as {}", session.user_id()),
    );

    rsx! {
        div { class: "page",
            h2 { "Home" }
            p { class: "muted", "{login}" }

            ul { class: "home-links",
                li { Link { to: Route::AdminTasks {}, "Manage tasks" } }
                li { Link { to: Route::UserTasks {}, "My tasks" } }
            }

            div { class: "open-course",
                label { r#for: "course-id", "Course ID" }
                input {
                    id: "course-id",
                    r#type: "text",
                    value: "{course_id}",
                    oninput: move |evt| course_id.set(evt.value()),
                }
                button {
                    r#type: "button",
                    disabled: course_id.read().trim().is_empty(),
                    onclick: move |_| {
                        let id = course_id.read().trim().to_owned();
                        navigator.push(Route::Course { course_id: id });
                    },
                    "Open course"
                }
            }
        }
    }
}
