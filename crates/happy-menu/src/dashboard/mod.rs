//! JSON surface over the screens, one request-scoped pipeline per call.

pub mod router;
pub mod service;

pub use router::dashboard_router;
pub use service::DashboardService;
