use crate::session::Action;
use crate::styles::STYLE_PRESETS;
use crate::ui::Controller;
use dioxus::prelude::*;

#[component]
pub fn StylePicker() -> Element {
    let controller = use_context::<Controller>();
    let session = controller.session();
    let disabled = {
        let snapshot = session.read();
        snapshot.is_busy() || snapshot.original_image.is_none()
    };

    rsx! {
        div { class: "style-picker",
            h3 { class: "section-title", "Choose a style" }
            div { class: "style-grid",
                for preset in STYLE_PRESETS.iter() {
                    button {
                        key: "{preset.id}",
                        class: "style-option",
                        r#type: "button",
                        disabled: disabled,
                        title: preset.prompt,
                        onclick: move |_| controller.dispatch(Action::StyleSelected(preset)),
                        span { class: "style-swatch", style: "background: {preset.swatch};" }
                        span { "{preset.name}" }
                    }
                }
            }
        }
    }
}
