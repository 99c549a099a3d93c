//! salesgen-config - 配置加载库
//!
//! 加载顺序（后者覆盖前者）：
//! 内置默认值 → `default.toml` → `{APP_ENV}.toml` → `profiles/{SALESGEN_PROFILE}.toml` → `SALESGEN_*` 环境变量

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 环境变量前缀，嵌套字段用 `__` 分隔（如 `SALESGEN_SERVER__PORT`）
pub const ENV_PREFIX: &str = "SALESGEN_";

/// 选择预设配置文件的环境变量
pub const PROFILE_ENV: &str = "SALESGEN_PROFILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 闭区间 `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> Bounds<T> {
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// 遥测配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 输出 JSON 格式日志（生产环境始终为 JSON）
    #[serde(default)]
    pub json: bool,
    /// 是否安装 Prometheus recorder 并暴露 `/metrics`
    #[serde(default = "default_metrics")]
    pub metrics: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metrics() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
            metrics: default_metrics(),
        }
    }
}

/// 生成日期窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowConfig {
    /// 以当天为锚点向前滚动的 N 天
    Trailing { days: u32 },
    /// 固定自然年
    CalendarYear { year: i32 },
}

/// 目录配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub products: Vec<String>,
    pub regions: Vec<String>,
    pub salespeople: Vec<String>,
    pub customer_prefix: String,
    pub customer_number: Bounds<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let products = [
            "Laptop",
            "Phone",
            "Tablet",
            "Monitor",
            "Keyboard",
            "Mouse",
            "Headphones",
        ];
        let regions = ["North", "South", "East", "West"];

        Self {
            products: products.iter().map(|s| s.to_string()).collect(),
            regions: regions.iter().map(|s| s.to_string()).collect(),
            salespeople: (1..=20).map(|n| format!("SP{}", n)).collect(),
            customer_prefix: "CUST".to_string(),
            customer_number: Bounds::new(1000, 9999),
        }
    }
}

/// 数据生成器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub window: WindowConfig,
    pub records_per_day: Bounds<u32>,
    pub quantity: Bounds<u32>,
    pub unit_price: Bounds<f64>,
    /// 固定种子：设置后每次请求生成相同的数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::Trailing { days: 30 },
            records_per_day: Bounds::new(5, 15),
            quantity: Bounds::new(1, 10),
            unit_price: Bounds::new(50.0, 1500.0),
            seed: None,
            catalog: CatalogConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// 校验生成参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.window {
            WindowConfig::Trailing { days: 0 } => {
                return Err(invalid("generator.window.days must be at least 1"));
            }
            WindowConfig::CalendarYear { year } if !(1..=9999).contains(&year) => {
                return Err(invalid(format!(
                    "generator.window.year {} is out of range",
                    year
                )));
            }
            _ => {}
        }

        if self.records_per_day.min == 0 || !self.records_per_day.is_ordered() {
            return Err(invalid(
                "generator.records_per_day requires 1 <= min <= max",
            ));
        }
        if self.quantity.min == 0 || !self.quantity.is_ordered() {
            return Err(invalid("generator.quantity requires 1 <= min <= max"));
        }
        self.validate_unit_price()?;
        if !self.catalog.customer_number.is_ordered() {
            return Err(invalid(
                "generator.catalog.customer_number requires min <= max",
            ));
        }

        let catalogs = [
            ("products", &self.catalog.products),
            ("regions", &self.catalog.regions),
            ("salespeople", &self.catalog.salespeople),
        ];
        for (name, entries) in catalogs {
            if entries.is_empty() {
                return Err(invalid(format!(
                    "generator.catalog.{} must not be empty",
                    name
                )));
            }
        }

        Ok(())
    }
}

impl GeneratorConfig {
    /// 单价按分取整后校验：最低 1 分，且最坏情况下的总金额不超出 `i64` 分
    fn validate_unit_price(&self) -> Result<(), ConfigError> {
        let min_cents = to_cents(self.unit_price.min);
        let max_cents = to_cents(self.unit_price.max);

        if !(min_cents >= 1.0 && min_cents <= max_cents) {
            return Err(invalid(
                "generator.unit_price requires 0.01 <= min <= max once rounded to cents",
            ));
        }
        if max_cents > i64::MAX as f64 {
            return Err(invalid("generator.unit_price.max is too large"));
        }

        let days = match self.window {
            WindowConfig::Trailing { days } => u128::from(days),
            WindowConfig::CalendarYear { .. } => 366,
        };
        let worst_total = (max_cents as u128)
            .checked_mul(u128::from(self.quantity.max))
            .and_then(|v| v.checked_mul(u128::from(self.records_per_day.max)))
            .and_then(|v| v.checked_mul(days));

        match worst_total {
            Some(total) if total <= i64::MAX as u128 => Ok(()),
            _ => Err(invalid(
                "generator.unit_price.max is too large for the configured quantity and window",
            )),
        }
    }
}

fn to_cents(amount: f64) -> f64 {
    (amount * 100.0).round()
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

/// 响应格式：信封包装或裸数组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    Envelope,
    Bare,
}

/// 单价字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    UnitPrice,
    Price,
}

impl PriceField {
    /// JSON 字段名
    pub fn key(&self) -> &'static str {
        match self {
            Self::UnitPrice => "unit_price",
            Self::Price => "price",
        }
    }
}

/// 根路由的输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexFormat {
    Html,
    Json,
}

/// HTTP 接口配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub style: ResponseStyle,
    pub price_field: PriceField,
    pub index: IndexFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            style: ResponseStyle::Envelope,
            price_field: PriceField::UnitPrice,
            index: IndexFormat::Html,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for AppConfig {
    /// 滚动 30 天、信封响应
    fn default() -> Self {
        Self {
            app_name: "sales-data".to_string(),
            app_env: "development".to_string(),
            server: ServerConfig::default(),
            telemetry: TelemetryConfig::default(),
            generator: GeneratorConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// 固定自然年、裸数组响应
    pub fn annual(year: i32) -> Self {
        let mut config = Self::default();
        config.generator.window = WindowConfig::CalendarYear { year };
        config.generator.records_per_day = Bounds::new(3, 5);
        config.api = ApiConfig {
            style: ResponseStyle::Bare,
            price_field: PriceField::Price,
            index: IndexFormat::Json,
        };
        config
    }

    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Serialized::default("app_env", &env));

        if let Ok(profile) = std::env::var(PROFILE_ENV) {
            figment = figment.merge(Toml::file(format!(
                "{}/profiles/{}.toml",
                config_dir, profile
            )));
        }

        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
