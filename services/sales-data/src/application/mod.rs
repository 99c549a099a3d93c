//! Application layer

pub mod aggregator;
pub mod generator;
pub mod service;

pub use aggregator::{MonthlyAggregate, SalesSummary, monthly_rollup, summarize};
pub use generator::SalesGenerator;
pub use service::SalesService;
