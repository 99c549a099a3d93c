//! 请求级业务入口
//!
//! 每次调用都重新生成一份数据，调用之间不共享任何可变状态

use chrono::{Local, NaiveDate};
use metrics::counter;
use rand::SeedableRng;
use rand::rngs::StdRng;
use salesgen_bootstrap::ReadinessProbe;
use salesgen_config::GeneratorConfig;
use salesgen_errors::AppResult;
use tracing::debug;

use super::aggregator::{MonthlyAggregate, SalesSummary, monthly_rollup, summarize};
use super::generator::SalesGenerator;
use crate::domain::SaleRecord;

pub struct SalesService {
    generator: SalesGenerator,
    seed: Option<u64>,
    pinned_today: Option<NaiveDate>,
}

impl SalesService {
    pub fn new(config: &GeneratorConfig) -> AppResult<Self> {
        Ok(Self {
            generator: SalesGenerator::new(config)?,
            seed: config.seed,
            pinned_today: None,
        })
    }

    /// 固定“今天”，滚动窗口不再跟随系统时钟
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.pinned_today = Some(today);
        self
    }

    pub fn generator(&self) -> &SalesGenerator {
        &self.generator
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// 原始记录
    pub fn records(&self) -> Vec<SaleRecord> {
        let today = self.today();
        let mut rng = self.rng();
        let records = self.generator.generate(&mut rng, today);

        counter!("sales_records_generated_total").increment(records.len() as u64);
        debug!(
            %today,
            seeded = self.seed.is_some(),
            count = records.len(),
            "Generated sales records"
        );

        records
    }

    /// 整体汇总
    pub fn summary(&self) -> SalesSummary {
        summarize(&self.records())
    }

    /// 按月聚合
    pub fn monthly(&self) -> Vec<MonthlyAggregate> {
        monthly_rollup(&self.records())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl ReadinessProbe for SalesService {
    fn name(&self) -> &'static str {
        "sales-generator"
    }

    fn probe(&self) -> Result<(), String> {
        let window = self.generator.window();
        if window.dates(self.today()).is_empty() {
            return Err(format!("date window {:?} yields no days", window));
        }
        Ok(())
    }
}
