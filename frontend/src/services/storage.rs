use shared::UserProfile;
use web_sys::Storage;

use crate::services::i18n::Lang;

const LANG_KEY: &str = "ai_finance_lang";
const USER_KEY: &str = "user";

/// Local storage is a best-effort cache: every failure path (no window,
/// storage disabled, quota) is swallowed and callers fall back to defaults.
fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// The persisted UI language tag, if one was saved and still parses.
pub fn load_lang() -> Option<Lang> {
    let raw = local_storage()?.get_item(LANG_KEY).ok().flatten()?;
    raw.parse().ok()
}

pub fn save_lang(lang: Lang) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(LANG_KEY, lang.as_str());
    }
}

/// The cached profile blob written at login, used by the budget panel to
/// lock the entry currency to the account's default.
pub fn load_user_profile() -> Option<UserProfile> {
    let raw = local_storage()?.get_item(USER_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

pub fn save_user_profile(profile: &UserProfile) {
    if let Some(storage) = local_storage() {
        if let Ok(raw) = serde_json::to_string(profile) {
            let _ = storage.set_item(USER_KEY, &raw);
        }
    }
}

pub fn clear_user_profile() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(USER_KEY);
    }
}
