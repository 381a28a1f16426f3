//! Fundwatch Feed Data Crate
//!
//! This crate provides provider-agnostic estimate feed fetching for the
//! fundwatch application.
//!
//! # Overview
//!
//! The feed data crate supports:
//! - Fetching the intraday valuation-estimate table for open-end funds
//! - Normalizing the provider's loosely-schematized table onto a fixed schema
//! - A TTL cache so repeated refreshes within the window reuse the last fetch
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   FeedService    |  (cache-fronted entry point)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    TtlCache      |  (per-key single-flight, time-bounded reuse)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   Normalizer     |  (alias table + positional fallback)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   FeedProvider   |  (Eastmoney, mocks, ...)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RawTable`] - The provider's table as received, shape not guaranteed
//! - [`NormalizedFeed`] - The fixed four-column view the rest of the system uses
//! - [`FeedRow`] - One fund's estimate within a normalized snapshot
//! - [`NavPoint`] - One settled unit-value observation in a fund's history

pub mod cache;
pub mod errors;
pub mod models;
pub mod normalizer;
pub mod provider;
pub mod service;

pub use cache::TtlCache;
pub use errors::FeedError;
pub use models::{FeedRow, NavPoint, NormalizedFeed, RawTable};
pub use normalizer::normalize;
pub use provider::{EastmoneyConfig, EastmoneyProvider, FeedProvider};
pub use service::{FeedService, FeedServiceConfig, FeedServiceTrait};
