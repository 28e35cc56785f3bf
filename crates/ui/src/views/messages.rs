use dioxus::prelude::*;

use crate::vm::MessageLog;

#[component]
pub fn MessageList(log: Signal<MessageLog>) -> Element {
    let entries = log.read().entries().to_vec();
    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "messages",
            for entry in entries {
                div { key: "{entry.id}", class: entry.kind.css_class(),
                    span { "{entry.text}" }
                    button {
                        class: "message-dismiss",
                        r#type: "button",
                        onclick: move |_| {
                            let mut log = log;
                            log.write().dismiss(entry.id);
                        },
                        "×"
                    }
                }
            }
        }
    }
}
