pub mod power_curve;
pub mod projection;
pub mod wind_model;
pub mod wind_service;
