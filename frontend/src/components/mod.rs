pub mod budget_panel;
pub mod dashboard_page;
pub mod expenses_tabs;
pub mod login_page;
pub mod progress_ring;
pub mod receipt_upload;
pub mod register_page;
pub mod session_guard;
