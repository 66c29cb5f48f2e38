use crate::ai::{DesignGateway, GatewayError, GatewayResult};
use crate::session::{Action, Effect};
use futures::future::{Either, select};
use std::future::Future;
use std::pin::pin;
use std::time::Duration;
use tracing::debug;

/// Performs one effect against the gateway and reports its completion.
///
/// Always resolves to a completion action, success or failure, so the
/// session returns to idle on every path that settles.
pub async fn run_effect<G>(gateway: &G, effect: Effect, timeout: Duration) -> Action
where
    G: DesignGateway + ?Sized,
{
    match effect {
        Effect::Regenerate {
            ticket,
            image,
            style,
        } => {
            debug!("regenerate {:?} as {}", ticket, style.id);
            let result = with_timeout(timeout, gateway.regenerate(&image, style.prompt)).await;
            Action::RegenerateFinished {
                ticket,
                style_label: style.label(),
                result,
            }
        }
        Effect::Edit {
            ticket,
            image,
            instruction,
        } => {
            debug!("edit {:?}", ticket);
            let result = with_timeout(timeout, gateway.edit(&image, &instruction)).await;
            Action::EditFinished {
                ticket,
                instruction,
                result,
            }
        }
        Effect::ChatTurn {
            ticket,
            history,
            message,
            context_image,
        } => {
            debug!("chat turn {:?}", ticket);
            let result = with_timeout(
                timeout,
                gateway.chat_turn(&history, &message, context_image.as_ref()),
            )
            .await;
            Action::ChatFinished { ticket, result }
        }
    }
}

async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = GatewayResult<T>>,
) -> GatewayResult<T> {
    race_deadline(limit, call, deadline(limit)).await
}

#[cfg(not(target_arch = "wasm32"))]
fn deadline(limit: Duration) -> impl Future<Output = ()> {
    tokio::time::sleep(limit)
}

#[cfg(target_arch = "wasm32")]
fn deadline(limit: Duration) -> impl Future<Output = ()> {
    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis)
}

/// Resolves to the call's result, or to `Timeout(limit)` if `timer` fires first.
async fn race_deadline<T>(
    limit: Duration,
    call: impl Future<Output = GatewayResult<T>>,
    timer: impl Future<Output = ()>,
) -> GatewayResult<T> {
    match select(pin!(call), pin!(timer)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(GatewayError::Timeout(limit)),
    }
}
