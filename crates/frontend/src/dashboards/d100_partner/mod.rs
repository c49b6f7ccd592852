pub mod aggregation;
pub mod api;
pub mod error;
pub mod filters;
pub mod mutations;
pub mod period;
pub mod reducer;
pub mod seed;
pub mod state;
pub mod store;
pub mod ui;
