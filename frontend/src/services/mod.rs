pub mod api;
pub mod date_utils;
pub mod i18n;
pub mod logging;
pub mod storage;
