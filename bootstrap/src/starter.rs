//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::any::Any;
use std::net::SocketAddr;

use axum::{
    Router,
    http::Uri,
    middleware,
    response::{IntoResponse, Response},
};
use salesgen_config::AppConfig;
use salesgen_errors::{AppError, AppResult};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::health::{HealthChecker, health_routes};
use crate::metrics::{MetricsRecorder, track_http_metrics};
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 所有服务的统一入口点。它负责：
/// 1. 加载配置
/// 2. 初始化运行时（日志）
/// 3. 安装 Prometheus recorder（可选）
/// 4. 调用用户提供的闭包构建业务路由并注册就绪探针
/// 5. 挂载健康检查、metrics 与通用中间件
/// 6. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use salesgen_bootstrap::run;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run("config", |config, health| {
///         Ok(my_routes(config))
///     }).await
/// }
/// ```
pub async fn run<F>(config_dir: &str, app_builder: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&AppConfig, &mut HealthChecker) -> AppResult<Router>,
{
    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    // 3. 初始化 Metrics 记录器
    let metrics = if config.telemetry.metrics {
        match MetricsRecorder::install() {
            Ok(recorder) => Some(recorder),
            Err(e) => {
                warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
                None
            }
        }
    } else {
        None
    };

    // 4. 构建业务路由
    let mut health = HealthChecker::new();
    let app = app_builder(&config, &mut health)?;

    // 5. 挂载通用路由与中间件
    let app = assemble(app, health, metrics);

    // 6. 启动服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}

/// 在业务路由之上挂载健康检查、metrics、404 兜底与通用中间件
pub fn assemble(app: Router, health: HealthChecker, metrics: Option<MetricsRecorder>) -> Router {
    app.merge(health_routes(health, metrics))
        .route_layer(middleware::from_fn(track_http_metrics))
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("no route for {}", uri.path()))
}

/// 处理器 panic 时返回通用的 500，panic 信息只写入日志
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!(panic = %message, "Request handler panicked");

    AppError::internal("internal server error").into_response()
}
