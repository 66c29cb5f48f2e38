use crate::session::Action;
use crate::ui::Controller;
use dioxus::prelude::*;

fn thumb_class(active: bool) -> &'static str {
    if active { "thumb active" } else { "thumb" }
}

#[component]
pub fn Gallery() -> Element {
    let controller = use_context::<Controller>();
    let session = controller.session();
    let snapshot = session.read();
    if snapshot.generated_images.is_empty() {
        return rsx! {};
    }
    let busy = snapshot.is_busy();
    let selected = snapshot.selected_index;
    let images = snapshot.generated_images.clone();
    drop(snapshot);

    rsx! {
        div { class: "gallery",
            h3 { class: "section-title", "History" }
            div { class: "gallery-strip",
                for (index, image) in images.into_iter().enumerate() {
                    button {
                        key: "{image.id}",
                        class: thumb_class(selected == Some(index)),
                        r#type: "button",
                        disabled: busy,
                        title: image.description.clone().unwrap_or_else(|| image.style_name.clone()),
                        onclick: move |_| controller.dispatch(Action::ImageSelected(index)),
                        img { src: "{image.url}", alt: "{image.style_name}" }
                        span { class: "thumb-label", "{image.style_name}" }
                    }
                }
            }
        }
    }
}
