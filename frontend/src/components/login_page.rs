use shared::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_session::{use_session, SessionStatus};
use crate::services::api::ApiClient;
use crate::services::i18n::use_language;
use crate::services::storage;
use crate::Page;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let i18n = use_language();
    let api_client = ApiClient::new();

    // Already-signed-in users skip the form entirely.
    let session = use_session(&api_client);

    let email = use_state(String::new);
    let password = use_state(String::new);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    use_effect_with(session, {
        let on_navigate = props.on_navigate.clone();
        move |session: &SessionStatus| {
            if *session == SessionStatus::Authorized {
                on_navigate.emit(Page::Dashboard);
            }
            || ()
        }
    });

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let onsubmit = {
        let api_client = api_client.clone();
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        let error = error.clone();
        let on_navigate = props.on_navigate.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let api_client = api_client.clone();
            let loading = loading.clone();
            let error = error.clone();
            let on_navigate = on_navigate.clone();
            let request = LoginRequest {
                email: (*email).clone(),
                password: (*password).clone(),
            };

            spawn_local(async move {
                error.set(None);
                loading.set(true);

                match api_client.login(&request).await {
                    Ok(profile) => {
                        storage::save_user_profile(&profile);
                        on_navigate.emit(Page::Dashboard);
                    }
                    Err(e) => {
                        error.set(Some(e.to_string()));
                    }
                }

                loading.set(false);
            });
        })
    };

    let to_register = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Register))
    };

    if session == SessionStatus::Checking {
        return html! {
            <div class="container">
                <div class="card">
                    <h1>{ i18n.t("login_title") }</h1>
                    <p class="muted">{ i18n.t("session_checking") }</p>
                </div>
            </div>
        };
    }

    html! {
        <div class="container">
            <div class="card">
                <h1>{ i18n.t("login_title") }</h1>
                <p class="muted">{ i18n.t("login_subtitle") }</p>

                <form class="form" {onsubmit}>
                    <label class="label">
                        { i18n.t("login_email") }
                        <input
                            class="input"
                            type="email"
                            autocomplete="email"
                            required=true
                            value={(*email).clone()}
                            oninput={on_email_input}
                        />
                    </label>

                    <label class="label">
                        { i18n.t("login_password") }
                        <input
                            class="input"
                            type="password"
                            autocomplete="current-password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_input}
                        />
                    </label>

                    {if let Some(message) = (*error).as_ref() {
                        html! { <div class="error">{ message }</div> }
                    } else {
                        html! {}
                    }}

                    <button class="button" type="submit" disabled={*loading}>
                        { if *loading { i18n.t("login_loading") } else { i18n.t("login_button") } }
                    </button>

                    <button class="button secondary" type="button" onclick={to_register}>
                        { i18n.t("login_register") }
                    </button>
                </form>
            </div>
        </div>
    }
}
