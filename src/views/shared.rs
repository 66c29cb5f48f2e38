use crate::session::Action;
use crate::ui::Controller;
use comrak::{ComrakOptions, markdown_to_html as render_markdown};
use dioxus::prelude::*;
use once_cell::sync::Lazy;

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
});

/// Renders model text. Raw HTML in the input is escaped.
pub fn markdown_to_html(md: &str) -> String {
    render_markdown(md, &MARKDOWN_OPTIONS)
}

#[component]
pub fn ErrorBanner(message: String) -> Element {
    let controller = use_context::<Controller>();
    rsx! {
        div { class: "error-banner", role: "alert",
            span { "{message}" }
            button {
                class: "action-btn",
                r#type: "button",
                title: "Dismiss",
                onclick: move |_| controller.dispatch(Action::ErrorDismissed),
                "Dismiss"
            }
        }
    }
}
