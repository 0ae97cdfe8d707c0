pub mod dashboard_controller;
pub mod wind_controller;
