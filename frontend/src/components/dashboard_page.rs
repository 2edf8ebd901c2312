use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::expenses_tabs::ExpensesTabs;
use crate::components::receipt_upload::ReceiptUpload;
use crate::services::api::ApiClient;
use crate::services::i18n::{use_language, Lang};
use crate::services::logging::Logger;
use crate::services::storage;
use crate::Page;

#[derive(Clone, Copy, PartialEq, Eq)]
enum DashboardTab {
    Receipt,
    Expenses,
}

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let i18n = use_language();
    let api_client = ApiClient::new();
    let tab = use_state(|| DashboardTab::Receipt);

    let select_tab = |next: DashboardTab| {
        let tab = tab.clone();
        Callback::from(move |_| tab.set(next))
    };

    let select_lang = |next: Lang| {
        let set_lang = i18n.set_lang.clone();
        Callback::from(move |_| set_lang.emit(next))
    };

    // Logout clears the session server-side when it can, but the user
    // lands on the login page either way.
    let logout = {
        let api_client = api_client.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| {
            let api_client = api_client.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                if let Err(e) = api_client.logout().await {
                    Logger::warn("dashboard", &format!("Logout call failed: {}", e));
                }
                storage::clear_user_profile();
                on_navigate.emit(Page::Login);
            });
        })
    };

    let tab_class = |this: DashboardTab| {
        if *tab == this { "tab active" } else { "tab" }
    };
    let lang_class = |this: Lang| {
        if i18n.lang == this { "tab active" } else { "tab" }
    };

    html! {
        <div class="container wide">
            <div class="topbar">
                <div>
                    <h1>{ i18n.t("app_title") }</h1>
                    <div class="muted">{ i18n.t("app_subtitle") }</div>
                </div>
                <div class="row">
                    <button class={tab_class(DashboardTab::Receipt)} onclick={select_tab(DashboardTab::Receipt)}>
                        { i18n.t("tab_upload_receipt") }
                    </button>
                    <button class={tab_class(DashboardTab::Expenses)} onclick={select_tab(DashboardTab::Expenses)}>
                        { i18n.t("tab_expenses") }
                    </button>
                    <button class={lang_class(Lang::En)} onclick={select_lang(Lang::En)}>{"EN"}</button>
                    <button class={lang_class(Lang::Es)} onclick={select_lang(Lang::Es)}>{"ES"}</button>
                    <button class="button secondary" onclick={logout}>
                        { i18n.t("action_logout") }
                    </button>
                </div>
            </div>

            {match *tab {
                DashboardTab::Receipt => html! { <ReceiptUpload /> },
                DashboardTab::Expenses => html! { <ExpensesTabs /> },
            }}
        </div>
    }
}
