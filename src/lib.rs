pub mod build;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod load;
pub mod model;
pub mod table;

pub use config::DashboardConfig;
pub use dashboard::{render, run, Dashboard, Selections};
pub use load::{load_tables, WageTables};
pub use model::WageMetric;
