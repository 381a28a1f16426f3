//! Monitor module - the per-session refresh flow.

mod monitor_service;
mod monitor_traits;

pub use monitor_service::*;
pub use monitor_traits::*;
