use shared::{Currency, LoginRequest, RegisterRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::i18n::use_language;
use crate::services::storage;
use crate::Page;

#[derive(Properties, PartialEq)]
pub struct RegisterPageProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(RegisterPage)]
pub fn register_page(props: &RegisterPageProps) -> Html {
    let i18n = use_language();
    let api_client = ApiClient::new();

    let email = use_state(String::new);
    let password = use_state(String::new);
    let default_currency = use_state(|| Currency::CAD);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

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

    let on_currency_change = {
        let default_currency = default_currency.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(currency) = select.value().parse::<Currency>() {
                default_currency.set(currency);
            }
        })
    };

    // Register, then sign straight in so the dashboard has a session and
    // the budget panel has a cached profile.
    let onsubmit = {
        let api_client = api_client.clone();
        let email = email.clone();
        let password = password.clone();
        let default_currency = default_currency.clone();
        let loading = loading.clone();
        let error = error.clone();
        let on_navigate = props.on_navigate.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let api_client = api_client.clone();
            let loading = loading.clone();
            let error = error.clone();
            let on_navigate = on_navigate.clone();
            let register_request = RegisterRequest {
                email: (*email).clone(),
                password: (*password).clone(),
                default_currency: *default_currency,
            };
            let login_request = LoginRequest {
                email: (*email).clone(),
                password: (*password).clone(),
            };

            spawn_local(async move {
                error.set(None);
                loading.set(true);

                let outcome = async {
                    api_client.register(&register_request).await?;
                    api_client.login(&login_request).await
                }
                .await;

                match outcome {
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

    let back_to_login = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Login))
    };

    html! {
        <div class="container">
            <div class="card">
                <h1>{ i18n.t("register_title") }</h1>
                <p class="muted">{ i18n.t("register_subtitle") }</p>

                <form class="form" {onsubmit}>
                    <label class="label">
                        { i18n.t("register_email") }
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
                        { i18n.t("register_password") }
                        <input
                            class="input"
                            type="password"
                            autocomplete="new-password"
                            required=true
                            minlength="6"
                            value={(*password).clone()}
                            oninput={on_password_input}
                        />
                    </label>

                    <label class="label">
                        { i18n.t("register_currency") }
                        <select class="input" onchange={on_currency_change}>
                            {for Currency::ALL.iter().map(|currency| {
                                html! {
                                    <option
                                        value={currency.as_str()}
                                        selected={*currency == *default_currency}
                                    >
                                        { currency.as_str() }
                                    </option>
                                }
                            })}
                        </select>
                    </label>

                    {if let Some(message) = (*error).as_ref() {
                        html! { <div class="error">{ message }</div> }
                    } else {
                        html! {}
                    }}

                    <button class="button" type="submit" disabled={*loading}>
                        { if *loading { i18n.t("register_loading") } else { i18n.t("register_button") } }
                    </button>

                    <button class="button secondary" type="button" onclick={back_to_login}>
                        { i18n.t("register_back_to_login") }
                    </button>
                </form>
            </div>
        </div>
    }
}
