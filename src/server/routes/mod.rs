//! HTTP route modules

pub mod pricing;
pub mod roi;
pub mod scenario;
pub mod storage;
