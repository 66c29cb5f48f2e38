use crate::ai::{DesignGateway, GeminiGateway};
use crate::config::AppConfig;
use crate::controller::run_effect;
use crate::session::{Action, Session, reduce};
use crate::views::{ChatPanel, ErrorBanner, Gallery, Stage, StylePicker, UploadPanel};
use dioxus::prelude::*;
use std::rc::Rc;
use std::time::Duration;

const APP_CSS: Asset = asset!("/assets/roomcraft.css");

/// Owns the session signal and runs gateway effects.
///
/// Every update replaces the whole session value; views only read it.
#[derive(Clone, Copy)]
pub struct Controller {
    session: Signal<Session>,
    gateway: Signal<Rc<dyn DesignGateway>>,
    timeout: Duration,
}

impl Controller {
    pub fn session(&self) -> Signal<Session> {
        self.session
    }

    pub fn dispatch(&self, action: Action) {
        let mut session = self.session;
        let mut next = session.peek().clone();
        let effects = reduce(&mut next, action);
        session.set(next);

        for effect in effects {
            let gateway = self.gateway.peek().clone();
            let controller = *self;
            // Root-scoped so the call outlives whichever view dispatched it.
            spawn_forever(async move {
                let completion = run_effect(&*gateway, effect, controller.timeout).await;
                controller.dispatch(completion);
            });
        }
    }
}

fn use_controller() -> Controller {
    let config = use_hook(AppConfig::load);
    let timeout = config.request_timeout;
    let session = use_signal(Session::default);
    let gateway = use_signal(move || Rc::new(GeminiGateway::new(config)) as Rc<dyn DesignGateway>);
    use_context_provider(|| Controller {
        session,
        gateway,
        timeout,
    })
}

#[component]
pub fn App() -> Element {
    let controller = use_controller();
    let session = controller.session();
    let has_photo = session.read().original_image.is_some();
    let error = session.read().error_message.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: APP_CSS }
        AppHeader { has_photo: has_photo }
        if let Some(message) = error {
            ErrorBanner { message: message }
        }
        div { class: "workspace",
            section { class: "studio",
                if has_photo {
                    Stage {}
                    StylePicker {}
                    Gallery {}
                } else {
                    UploadPanel { compact: false }
                }
            }
            aside { class: "chat-panel",
                ChatPanel {}
            }
        }
    }
}

#[component]
fn AppHeader(has_photo: bool) -> Element {
    let controller = use_context::<Controller>();
    rsx! {
        div { class: "header",
            div { class: "header-content",
                h1 { class: "wordmark", "Roomcraft" }
                if has_photo {
                    div { class: "header-actions",
                        UploadPanel { compact: true }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| controller.dispatch(Action::Reset),
                            "Start over"
                        }
                    }
                }
            }
        }
    }
}
