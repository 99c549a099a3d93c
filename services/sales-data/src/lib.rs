//! sales-data - 合成销售数据服务
//!
//! 每个请求重新生成一批销售记录，并以原始列表、整体汇总或按月聚合的形式返回

pub mod api;
pub mod application;
pub mod domain;

pub use api::{AppState, routes};
pub use application::{MonthlyAggregate, SalesGenerator, SalesService, SalesSummary};
pub use domain::{DateWindow, Money, SaleRecord};
