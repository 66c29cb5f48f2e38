use crate::session::Action;
use crate::types::{ChatMessage, GroundingLink, Role};
use crate::ui::Controller;
use crate::views::shared::markdown_to_html;
use dioxus::events::Key;
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

const SCROLL_TO_BOTTOM: &str = r#"
const list = document.getElementById("chat-list");
if (list) { list.scrollTop = list.scrollHeight; }
"#;

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn format_message_timestamp(timestamp: OffsetDateTime) -> Option<String> {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

fn composer_placeholder(has_displayed_image: bool) -> &'static str {
    if has_displayed_image {
        "Ask a question or describe a change, e.g. \"make the sofa green\""
    } else {
        "Ask the designer anything about your space"
    }
}

#[component]
pub fn ChatPanel() -> Element {
    let controller = use_context::<Controller>();
    let session = controller.session();
    let mut input = use_signal(String::new);

    let message_count = use_memo(move || session.read().chat_messages.len());
    use_effect(move || {
        if message_count() > 0 {
            let _ = document::eval(SCROLL_TO_BOTTOM);
        }
    });

    let snapshot = session.read();
    let busy = snapshot.is_busy();
    let messages = snapshot.chat_messages.clone();
    let placeholder = composer_placeholder(snapshot.displayed_image().is_some());
    drop(snapshot);

    let mut send_message = move || {
        let text = input();
        if text.trim().is_empty() || session.read().is_busy() {
            return;
        }
        controller.dispatch(Action::ChatSubmitted(text));
        input.set(String::new());
    };

    rsx! {
        div { class: "chat-wrap",
            div { class: "chat-header",
                h2 { "Design Assistant" }
                p { class: "text-muted", "Ask for advice, product ideas, or edits to your room." }
            }
            div { id: "chat-list", class: "chat-list",
                if messages.is_empty() {
                    div { class: "chat-empty text-muted",
                        "Try \"add a reading nook by the window\" or \"where can I buy a rug like this?\""
                    }
                }
                for msg in messages.iter() {
                    MessageRow { key: "{msg.id}", message: msg.clone() }
                }
                if busy {
                    div { class: "message-row model",
                        div { class: "typing", aria_label: "Assistant is thinking",
                            span {}
                            span {}
                            span {}
                        }
                    }
                }
            }
            form { class: "composer",
                onsubmit: move |ev| {
                    ev.prevent_default();
                    send_message();
                },
                textarea {
                    rows: "2",
                    placeholder: placeholder,
                    value: "{input}",
                    oninput: move |ev| input.set(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            send_message();
                        }
                    },
                    disabled: busy,
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy || input().trim().is_empty(),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage) -> Element {
    let class = role_class(message.role);
    rsx! {
        div { class: "message-row {class}",
            div { class: "message-stack",
                div { class: "bubble {class}",
                    if matches!(message.role, Role::Model) {
                        div { class: "md", dangerous_inner_html: markdown_to_html(&message.text) }
                    } else {
                        "{message.text}"
                    }
                }
                if !message.grounding.is_empty() {
                    GroundingLinks { links: message.grounding.clone() }
                }
                if let Some(ts) = format_message_timestamp(message.timestamp) {
                    div { class: "message-meta",
                        span { class: "message-timestamp", "{ts}" }
                    }
                }
            }
        }
    }
}

#[component]
fn GroundingLinks(links: Vec<GroundingLink>) -> Element {
    rsx! {
        div { class: "sources",
            span { class: "sources-title", "Sources" }
            for link in links.iter() {
                a {
                    class: "source-link",
                    href: "{link.uri}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    title: "{link.uri}",
                    "{link.title}"
                }
            }
        }
    }
}
