/// Component-tagged console logger.
///
/// The backend exposes no log-ingestion endpoint, so the sink is the
/// browser console.
pub struct Logger;

impl Logger {
    pub fn debug(component: &str, message: &str) {
        gloo::console::debug!(format!("[{}] {}", component, message));
    }

    pub fn info(component: &str, message: &str) {
        gloo::console::info!(format!("[{}] {}", component, message));
    }

    pub fn warn(component: &str, message: &str) {
        gloo::console::warn!(format!("[{}] {}", component, message));
    }

    pub fn error(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
    }
}
