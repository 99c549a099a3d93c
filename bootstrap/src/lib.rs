//! salesgen-bootstrap - 统一服务启动骨架
//!
//! 配置加载、日志初始化、健康检查与 metrics 端点、HTTP 服务器与 graceful shutdown

mod health;
mod metrics;
mod runtime;
mod starter;

pub use self::health::*;
pub use self::metrics::*;
pub use self::runtime::*;
pub use self::starter::*;
