pub mod aggregation;
pub mod calculation_service;
pub mod dispatcher;
pub mod portfolio;
pub mod portfolio_charts;
pub mod projection;
pub mod service_config;
pub mod session_yaml;
