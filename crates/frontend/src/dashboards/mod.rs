pub mod d100_partner;

pub use d100_partner::ui::PartnerDashboard;
