use crate::types::{ProcessingStatus, RoomImage};
use crate::ui::Controller;
use crate::views::CompareView;
use dioxus::prelude::*;

fn busy_caption(status: ProcessingStatus) -> Option<&'static str> {
    match status {
        ProcessingStatus::Generating => Some("Designing your room..."),
        ProcessingStatus::Editing => Some("Applying your changes..."),
        ProcessingStatus::Idle | ProcessingStatus::Error => None,
    }
}

fn download_name(image: &RoomImage) -> String {
    let extension = match image.url.mime_type() {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    };
    format!("roomcraft-{}.{extension}", image.id)
}

/// The main image area: compare slider once a design exists, otherwise the
/// original photo on its own.
#[component]
pub fn Stage() -> Element {
    let controller = use_context::<Controller>();
    let session = controller.session();
    let snapshot = session.read();
    let Some(original) = snapshot.original_image.clone() else {
        return rsx! {};
    };
    let displayed = snapshot.displayed_image().cloned();
    let caption = busy_caption(snapshot.status);
    drop(snapshot);

    rsx! {
        div { class: "stage",
            if let Some(image) = displayed {
                CompareView { before: original.clone(), after: image.url.clone() }
                div { class: "stage-meta",
                    span { class: "tag-pill", "{image.style_name}" }
                    if let Some(description) = image.description.as_ref() {
                        span { class: "text-muted", "“{description}”" }
                    }
                    a {
                        class: "action-btn",
                        href: "{image.url}",
                        download: download_name(&image),
                        "Download"
                    }
                }
            } else {
                div { class: "stage-original",
                    img { src: "{original}", alt: "Your room" }
                    p { class: "stage-hint", "Pick a style below to generate a redesign." }
                }
            }
            if let Some(caption) = caption {
                div { class: "stage-overlay",
                    div { class: "spinner" }
                    span { "{caption}" }
                }
            }
        }
    }
}
