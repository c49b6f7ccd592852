pub mod api_utils;
pub mod clipboard;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod modal;
