pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod polling;
pub mod scroll;
pub mod service_worker;

pub use api::ApiClient;
pub use config::DashboardConfig;
pub use error::DashboardError;
pub use logging::Logger;
