use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, SessionOutcome};
use crate::services::logging::Logger;

/// Where the one-shot session check stands for this component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Checking,
    Authorized,
    Unauthorized,
}

/// Issue one "who am I" call on mount and report the outcome.
///
/// The cancellation flag is set in the effect cleanup so a response that
/// lands after unmount never touches a torn-down component's state. No
/// retry, no polling.
#[hook]
pub fn use_session(api_client: &ApiClient) -> SessionStatus {
    let status = use_state(|| SessionStatus::Checking);

    use_effect_with((), {
        let api_client = api_client.clone();
        let status = status.clone();

        move |_| {
            let cancelled = Rc::new(Cell::new(false));
            let flag = cancelled.clone();

            spawn_local(async move {
                let outcome = api_client.check_session().await;
                if flag.get() {
                    Logger::debug("use_session", "Session check resolved after unmount, dropped");
                    return;
                }
                status.set(match outcome {
                    SessionOutcome::Authorized => SessionStatus::Authorized,
                    SessionOutcome::Redirect(_) => SessionStatus::Unauthorized,
                });
            });

            move || cancelled.set(true)
        }
    });

    *status
}
