pub mod adapter;
pub mod api;
pub mod storage;

pub use adapter::{AuthAdapter, HttpAuthAdapter};
