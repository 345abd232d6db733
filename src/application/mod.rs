// Application layer - Gateway port and dashboard orchestration
pub mod dashboard_gateway;
pub mod dashboard_service;
