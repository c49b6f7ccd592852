pub mod a001_referral;
pub mod a002_referral_click;
pub mod a003_finance_entry;
pub mod a004_promo_code;
pub mod a005_activity_event;
pub mod common;
