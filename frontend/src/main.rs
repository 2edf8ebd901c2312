mod components;
mod hooks;
mod services;

use yew::prelude::*;

use components::dashboard_page::DashboardPage;
use components::login_page::LoginPage;
use components::register_page::RegisterPage;
use components::session_guard::SessionGuard;
use services::i18n::{Lang, LanguageContext};
use services::logging::Logger;
use services::storage;

/// Top-level pages. No router; navigation is a state swap and the guard
/// around the dashboard bounces unauthenticated visitors to login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Dashboard,
}

#[function_component(App)]
fn app() -> Html {
    // Land on the dashboard; the session guard redirects if needed.
    let page = use_state(|| Page::Dashboard);
    let lang = use_state(|| storage::load_lang().unwrap_or(Lang::En));

    let navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| {
            Logger::debug("app", &format!("Navigating to {:?}", next));
            page.set(next);
        })
    };

    let set_lang = {
        let lang = lang.clone();
        Callback::from(move |next: Lang| {
            storage::save_lang(next);
            lang.set(next);
        })
    };

    let language = LanguageContext {
        lang: *lang,
        set_lang,
    };

    html! {
        <ContextProvider<LanguageContext> context={language}>
            {match *page {
                Page::Login => html! { <LoginPage on_navigate={navigate.clone()} /> },
                Page::Register => html! { <RegisterPage on_navigate={navigate.clone()} /> },
                Page::Dashboard => html! {
                    <SessionGuard on_redirect={navigate.clone()}>
                        <DashboardPage on_navigate={navigate.clone()} />
                    </SessionGuard>
                },
            }}
        </ContextProvider<LanguageContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
