//! Session state and the reducer that drives it.
//!
//! All state transitions go through [`reduce`]. It never performs I/O: work
//! against the gateway is returned as [`Effect`]s, and their outcomes come
//! back in as completion [`Action`]s carrying the ticket they were issued
//! with.

use crate::ai::{ChatReply, GatewayError};
use crate::data_url::DataUrl;
use crate::intent::{Intent, classify};
use crate::styles::StylePreset;
use crate::types::{ChatMessage, ProcessingStatus, RoomImage};
use tracing::{debug, info, warn};

pub const CUSTOM_EDIT_LABEL: &str = "Custom Edit";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate design. Please try again.";
pub const EDIT_STARTED_MESSAGE: &str = "I'm applying those changes to your room now...";
pub const EDIT_DONE_MESSAGE: &str =
    "Done! I've updated the design. Take a look and let me know what else you'd like to change.";
pub const EDIT_FAILED_MESSAGE: &str =
    "I'm sorry, I wasn't able to apply that change. Please try describing it differently.";
pub const CHAT_FAILED_MESSAGE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Identifies one gateway call. Completions with any other ticket are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub original_image: Option<DataUrl>,
    pub generated_images: Vec<RoomImage>,
    pub selected_index: Option<usize>,
    pub chat_messages: Vec<ChatMessage>,
    pub error_message: Option<String>,
    pub status: ProcessingStatus,
    in_flight: Option<RequestTicket>,
    tickets_issued: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    ImageUploaded(DataUrl),
    StyleSelected(&'static StylePreset),
    ChatSubmitted(String),
    ImageSelected(usize),
    ErrorDismissed,
    Reset,
    RegenerateFinished {
        ticket: RequestTicket,
        style_label: String,
        result: Result<DataUrl, GatewayError>,
    },
    EditFinished {
        ticket: RequestTicket,
        instruction: String,
        result: Result<DataUrl, GatewayError>,
    },
    ChatFinished {
        ticket: RequestTicket,
        result: Result<ChatReply, GatewayError>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Regenerate {
        ticket: RequestTicket,
        image: DataUrl,
        style: &'static StylePreset,
    },
    Edit {
        ticket: RequestTicket,
        image: DataUrl,
        instruction: String,
    },
    ChatTurn {
        ticket: RequestTicket,
        history: Vec<ChatMessage>,
        message: String,
        context_image: Option<DataUrl>,
    },
}

impl Session {
    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    /// Status as the UI shows it: an idle session with a pending error
    /// reports `Error`.
    pub fn display_status(&self) -> ProcessingStatus {
        match self.status {
            ProcessingStatus::Idle if self.error_message.is_some() => ProcessingStatus::Error,
            status => status,
        }
    }

    /// The selected generated image, if any.
    pub fn displayed_image(&self) -> Option<&RoomImage> {
        self.selected_index
            .and_then(|index| self.generated_images.get(index))
    }

    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    fn begin(&mut self, status: ProcessingStatus) -> RequestTicket {
        self.tickets_issued += 1;
        let ticket = RequestTicket(self.tickets_issued);
        self.status = status;
        self.in_flight = Some(ticket);
        ticket
    }

    /// Consumes the in-flight ticket if `ticket` is current.
    fn finish(&mut self, ticket: RequestTicket) -> bool {
        if self.in_flight != Some(ticket) {
            debug!("dropping stale completion {:?}", ticket);
            return false;
        }
        self.in_flight = None;
        self.status = ProcessingStatus::Idle;
        true
    }

    fn push_image(&mut self, image: RoomImage) {
        self.selected_index = Some(self.generated_images.len());
        self.generated_images.push(image);
    }

    fn clear(&mut self) {
        let tickets_issued = self.tickets_issued;
        *self = Session {
            tickets_issued,
            ..Session::default()
        };
    }
}

pub fn reduce(session: &mut Session, action: Action) -> Vec<Effect> {
    match action {
        Action::ImageUploaded(image) => {
            info!("new photo uploaded: {:?}", image);
            session.clear();
            session.original_image = Some(image);
            Vec::new()
        }
        Action::Reset => {
            info!("session reset");
            session.clear();
            Vec::new()
        }
        Action::ErrorDismissed => {
            session.error_message = None;
            Vec::new()
        }
        Action::ImageSelected(index) => {
            if !session.is_busy() && index < session.generated_images.len() {
                session.selected_index = Some(index);
            }
            Vec::new()
        }
        Action::StyleSelected(style) => start_regenerate(session, style),
        Action::ChatSubmitted(text) => submit_chat(session, text),
        Action::RegenerateFinished {
            ticket,
            style_label,
            result,
        } => {
            if session.finish(ticket) {
                match result {
                    Ok(url) => session.push_image(RoomImage::new(url, style_label, None)),
                    Err(err) => {
                        warn!("style generation failed: {}", err);
                        session.error_message = Some(GENERATION_FAILED_MESSAGE.to_string());
                    }
                }
            }
            Vec::new()
        }
        Action::EditFinished {
            ticket,
            instruction,
            result,
        } => {
            if session.finish(ticket) {
                match result {
                    Ok(url) => {
                        session.push_image(RoomImage::new(
                            url,
                            CUSTOM_EDIT_LABEL,
                            Some(instruction),
                        ));
                        session
                            .chat_messages
                            .push(ChatMessage::model(EDIT_DONE_MESSAGE));
                    }
                    Err(err) => {
                        warn!("edit failed: {}", err);
                        session
                            .chat_messages
                            .push(ChatMessage::model(EDIT_FAILED_MESSAGE));
                    }
                }
            }
            Vec::new()
        }
        Action::ChatFinished { ticket, result } => {
            if session.finish(ticket) {
                let message = match result {
                    Ok(reply) => ChatMessage::model_with_grounding(reply.text, reply.grounding),
                    Err(err) => {
                        warn!("chat turn failed: {}", err);
                        ChatMessage::model(CHAT_FAILED_MESSAGE)
                    }
                };
                session.chat_messages.push(message);
            }
            Vec::new()
        }
    }
}

fn start_regenerate(session: &mut Session, style: &'static StylePreset) -> Vec<Effect> {
    if session.is_busy() {
        return Vec::new();
    }
    let Some(image) = session.original_image.clone() else {
        return Vec::new();
    };

    session.error_message = None;
    let ticket = session.begin(ProcessingStatus::Generating);
    info!("generating {} design", style.name);
    vec![Effect::Regenerate {
        ticket,
        image,
        style,
    }]
}

fn submit_chat(session: &mut Session, text: String) -> Vec<Effect> {
    let text = text.trim();
    if session.is_busy() || text.is_empty() {
        return Vec::new();
    }

    let history = session.chat_messages.clone();
    session.chat_messages.push(ChatMessage::user(text));

    let edit_target = session.displayed_image().map(|image| image.url.clone());
    match (classify(text), edit_target) {
        (Intent::Edit, Some(image)) => {
            session
                .chat_messages
                .push(ChatMessage::model(EDIT_STARTED_MESSAGE));
            let ticket = session.begin(ProcessingStatus::Editing);
            info!("editing displayed image");
            vec![Effect::Edit {
                ticket,
                image,
                instruction: text.to_string(),
            }]
        }
        (_, displayed) => {
            let context_image = displayed.or_else(|| session.original_image.clone());
            let ticket = session.begin(ProcessingStatus::Generating);
            info!("asking designer");
            vec![Effect::ChatTurn {
                ticket,
                history,
                message: text.to_string(),
                context_image,
            }]
        }
    }
}
