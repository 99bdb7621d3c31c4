pub mod config;
pub mod controller;
pub mod error;
pub mod files;
pub mod models;
pub mod notifications;
pub mod services;
pub mod utils;
pub mod view;
pub mod wizard;

pub use config::DashboardConfig;
pub use controller::Dashboard;
pub use error::{DashboardError, DashboardResult};
pub use services::backend::DashboardBackend;
pub use services::http_backend::HttpBackend;
pub use services::poller::NotificationPoller;
pub use view::DashboardView;
