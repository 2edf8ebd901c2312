use yew::prelude::*;

use crate::hooks::use_session::{use_session, SessionStatus};
use crate::services::api::ApiClient;
use crate::Page;

#[derive(Properties, PartialEq)]
pub struct SessionGuardProps {
    /// Emitted with the login page when the session check says redirect.
    /// Navigation stays with the caller; the guard only reports.
    pub on_redirect: Callback<Page>,
    pub children: Children,
}

/// Gate protected content behind one session check per mount.
///
/// Renders nothing while the check is pending, the children once it
/// passes, and nothing (plus the redirect callback) when it fails.
#[function_component(SessionGuard)]
pub fn session_guard(props: &SessionGuardProps) -> Html {
    let api_client = ApiClient::new();
    let status = use_session(&api_client);

    use_effect_with(status, {
        let on_redirect = props.on_redirect.clone();
        move |status: &SessionStatus| {
            if *status == SessionStatus::Unauthorized {
                on_redirect.emit(Page::Login);
            }
            || ()
        }
    });

    match status {
        SessionStatus::Authorized => html! { <>{ for props.children.iter() }</> },
        SessionStatus::Checking | SessionStatus::Unauthorized => html! {},
    }
}
