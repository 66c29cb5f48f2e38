//! Integration tests for the effect runner
//!
//! Runs full user flows against an in-memory gateway.

use async_trait::async_trait;
use roomcraft::ai::{ChatReply, DesignGateway, GatewayError, GatewayResult};
use roomcraft::controller::run_effect;
use roomcraft::data_url::DataUrl;
use roomcraft::session::{Action, EDIT_DONE_MESSAGE, EDIT_STARTED_MESSAGE, Session, reduce};
use roomcraft::styles::find_style;
use roomcraft::types::{ChatMessage, GroundingLink, ProcessingStatus, Role};
use std::sync::Mutex;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeGateway {
    fail: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    async fn respond<T>(&self, call: String, ok: T) -> GatewayResult<T> {
        self.calls.lock().expect("calls lock").push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            Err(GatewayError::Transport("connection refused".into()))
        } else {
            Ok(ok)
        }
    }
}

#[async_trait]
impl DesignGateway for FakeGateway {
    async fn regenerate(&self, _image: &DataUrl, style_prompt: &str) -> GatewayResult<DataUrl> {
        let output = DataUrl::from_base64("image/png", "U1RZTEVE");
        self.respond(format!("regenerate:{style_prompt}"), output)
            .await
    }

    async fn edit(&self, _image: &DataUrl, instruction: &str) -> GatewayResult<DataUrl> {
        let output = DataUrl::from_base64("image/png", "RURJVEVE");
        self.respond(format!("edit:{instruction}"), output).await
    }

    async fn chat_turn(
        &self,
        history: &[ChatMessage],
        message: &str,
        context_image: Option<&DataUrl>,
    ) -> GatewayResult<ChatReply> {
        let reply = ChatReply {
            text: format!("Designer reply to {message}"),
            grounding: vec![GroundingLink {
                uri: "https://shop.example/lamp".into(),
                title: "Lamp".into(),
            }],
        };
        let call = format!(
            "chat:{message}:history={}:image={}",
            history.len(),
            context_image.is_some()
        );
        self.respond(call, reply).await
    }
}

/// Dispatches `action` and runs every resulting effect to completion.
async fn drive(session: &mut Session, gateway: &FakeGateway, action: Action) {
    let mut pending = vec![action];
    while let Some(action) = pending.pop() {
        for effect in reduce(session, action) {
            assert!(session.is_busy(), "effects only start from a busy session");
            pending.push(run_effect(gateway, effect, TIMEOUT).await);
        }
    }
}

fn photo() -> DataUrl {
    DataUrl::new("data:image/jpeg;base64,UEhPVE8=")
}

#[tokio::test]
async fn style_then_edit_flow() {
    let gateway = FakeGateway::default();
    let mut session = Session::default();
    let style = find_style("scandinavian").expect("preset exists");

    drive(&mut session, &gateway, Action::ImageUploaded(photo())).await;
    drive(&mut session, &gateway, Action::StyleSelected(style)).await;
    drive(
        &mut session,
        &gateway,
        Action::ChatSubmitted("add more plants".into()),
    )
    .await;

    assert_eq!(
        gateway.calls(),
        vec![
            format!("regenerate:{}", style.prompt),
            "edit:add more plants".to_string(),
        ]
    );
    assert_eq!(session.status, ProcessingStatus::Idle);
    let labels: Vec<_> = session
        .generated_images
        .iter()
        .map(|image| image.style_name.as_str())
        .collect();
    assert_eq!(labels, vec!["Scandinavian Style", "Custom Edit"]);
    assert_eq!(session.selected_index, Some(1));

    let transcript: Vec<_> = session
        .chat_messages
        .iter()
        .map(|m| (m.role, m.text.as_str()))
        .collect();
    assert_eq!(
        transcript,
        vec![
            (Role::User, "add more plants"),
            (Role::Model, EDIT_STARTED_MESSAGE),
            (Role::Model, EDIT_DONE_MESSAGE),
        ]
    );
}

#[tokio::test]
async fn question_gets_grounded_reply() {
    let gateway = FakeGateway::default();
    let mut session = Session::default();

    drive(&mut session, &gateway, Action::ImageUploaded(photo())).await;
    drive(
        &mut session,
        &gateway,
        Action::ChatSubmitted("what's a good lamp for this room?".into()),
    )
    .await;

    assert_eq!(
        gateway.calls(),
        vec!["chat:what's a good lamp for this room?:history=0:image=true".to_string()]
    );
    let reply = session.chat_messages.last().expect("reply appended");
    assert_eq!(reply.role, Role::Model);
    assert_eq!(reply.grounding.len(), 1);
    assert_eq!(reply.grounding[0].title, "Lamp");
    assert!(session.generated_images.is_empty());
}

#[tokio::test]
async fn failures_always_return_to_idle() {
    let gateway = FakeGateway::failing();
    let mut session = Session::default();
    let style = find_style("modern").expect("preset exists");

    drive(&mut session, &gateway, Action::ImageUploaded(photo())).await;
    drive(&mut session, &gateway, Action::StyleSelected(style)).await;
    assert_eq!(session.status, ProcessingStatus::Idle);
    assert!(session.generated_images.is_empty());
    assert!(session.error_message.is_some());

    drive(&mut session, &gateway, Action::ChatSubmitted("any ideas?".into())).await;
    assert_eq!(session.status, ProcessingStatus::Idle);
    assert_eq!(session.chat_messages.len(), 2);
    assert!(session.generated_images.is_empty());
}

#[tokio::test(start_paused = true)]
async fn hung_call_times_out_as_failure() {
    let gateway = FakeGateway::slow(Duration::from_secs(600));
    let mut session = Session::default();
    reduce(&mut session, Action::ImageUploaded(photo()));

    let style = find_style("modern").expect("preset exists");
    let effect = reduce(&mut session, Action::StyleSelected(style))
        .pop()
        .expect("regenerate effect");
    let completion = run_effect(&gateway, effect, Duration::from_secs(2)).await;

    match &completion {
        Action::RegenerateFinished { result, .. } => {
            assert_eq!(
                result,
                &Err(GatewayError::Timeout(Duration::from_secs(2)))
            );
        }
        other => panic!("unexpected completion {other:?}"),
    }
    reduce(&mut session, completion);
    assert_eq!(session.status, ProcessingStatus::Idle);
    assert!(session.error_message.is_some());
}
