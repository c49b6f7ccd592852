pub mod chart;
pub mod dashboard;
pub mod sections;

pub use dashboard::{NotificationToast, PartnerDashboard};
