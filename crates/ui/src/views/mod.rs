mod home;
mod log;
mod quick_log;
mod review;
mod review_dev;
mod solve;
mod start;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use log::LogView;
pub use quick_log::QuickLogForm;
pub use review::ReviewView;
pub use review_dev::ReviewDevView;
pub use solve::SolveView;
pub use start::StartView;
pub use state::{ViewError, ViewState, view_state_from_resource};
