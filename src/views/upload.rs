use crate::data_url::DataUrl;
use crate::session::Action;
use crate::ui::Controller;
use anyhow::Context;
use dioxus::prelude::*;
use tracing::warn;

/// Reads the first selected file, if any, as a data URL.
async fn read_first_image(evt: &FormEvent) -> anyhow::Result<Option<DataUrl>> {
    let Some(engine) = evt.files() else {
        return Ok(None);
    };
    let Some(name) = engine.files().into_iter().next() else {
        return Ok(None);
    };
    let bytes = engine
        .read_file(&name)
        .await
        .with_context(|| format!("could not read {name}"))?;
    Ok(Some(DataUrl::from_bytes(&bytes)))
}

#[component]
pub fn UploadPanel(compact: bool) -> Element {
    let controller = use_context::<Controller>();
    let on_change = move |evt: FormEvent| async move {
        match read_first_image(&evt).await {
            Ok(Some(image)) => controller.dispatch(Action::ImageUploaded(image)),
            Ok(None) => {}
            Err(err) => warn!("upload failed: {:#}", err),
        }
    };

    if compact {
        return rsx! {
            label { class: "btn btn-ghost upload-compact",
                "New photo"
                input { r#type: "file", accept: "image/*", hidden: true, onchange: on_change }
            }
        };
    }

    rsx! {
        label { class: "upload-drop",
            div { class: "upload-copy",
                h2 { "Reimagine your room" }
                p { class: "text-muted",
                    "Upload a photo of your space, pick a style, then refine it by chatting with the designer."
                }
                span { class: "btn btn-primary", "Upload a photo" }
            }
            input { r#type: "file", accept: "image/*", hidden: true, onchange: on_change }
        }
    }
}
