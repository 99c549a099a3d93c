//! 合成销售数据生成器

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rand::Rng;
use salesgen_config::GeneratorConfig;
use salesgen_errors::{AppError, AppResult};

use crate::domain::{Catalog, DateWindow, Money, SaleRecord};

/// 按日期窗口逐日生成销售记录
///
/// 每天的记录数以及每条记录的各字段都独立、均匀地抽样
#[derive(Debug, Clone)]
pub struct SalesGenerator {
    window: DateWindow,
    catalog: Catalog,
    records_per_day: RangeInclusive<u32>,
    quantity: RangeInclusive<u32>,
    unit_price_cents: RangeInclusive<i64>,
}

impl SalesGenerator {
    pub fn new(config: &GeneratorConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let price_min = Money::from_decimal(config.unit_price.min);
        let price_max = Money::from_decimal(config.unit_price.max);

        Ok(Self {
            window: DateWindow::from_config(config.window)?,
            catalog: Catalog::from_config(&config.catalog)?,
            records_per_day: config.records_per_day.min..=config.records_per_day.max,
            quantity: config.quantity.min..=config.quantity.max,
            unit_price_cents: price_min.cents()..=price_max.cents(),
        })
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// 生成窗口内全部记录，按“日期，再日内生成顺序”排列
    pub fn generate<R: Rng>(&self, rng: &mut R, today: NaiveDate) -> Vec<SaleRecord> {
        let dates = self.window.dates(today);
        let mut records = Vec::with_capacity(dates.len() * *self.records_per_day.end() as usize);

        for date in dates {
            let count = rng.gen_range(self.records_per_day.clone());
            for _ in 0..count {
                records.push(self.draw_record(rng, date));
            }
        }

        records
    }

    fn draw_record<R: Rng>(&self, rng: &mut R, date: NaiveDate) -> SaleRecord {
        let product = self.catalog.pick_product(rng).to_string();
        let region = self.catalog.pick_region(rng).to_string();
        let quantity = rng.gen_range(self.quantity.clone());
        let unit_price = Money::from_cents(rng.gen_range(self.unit_price_cents.clone()));
        let customer_id = self.catalog.draw_customer_id(rng);
        let salesperson = self.catalog.pick_salesperson(rng).to_string();

        SaleRecord::new(
            date,
            product,
            region,
            quantity,
            unit_price,
            customer_id,
            salesperson,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use salesgen_config::{AppConfig, Bounds};
    use std::collections::BTreeMap;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window_counts_per_day() {
        let generator = SalesGenerator::new(&AppConfig::default().generator).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let records = generator.generate(&mut rng, ymd(2024, 5, 15));

        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in &records {
            *per_day.entry(record.date()).or_default() += 1;
        }

        assert_eq!(per_day.len(), 30);
        assert!(per_day.values().all(|n| (5..=15).contains(n)));
        assert_eq!(records.first().map(SaleRecord::date), Some(ymd(2024, 5, 15)));
    }

    #[test]
    fn test_fields_respect_bounds() {
        let generator = SalesGenerator::new(&AppConfig::default().generator).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        for record in generator.generate(&mut rng, ymd(2024, 5, 15)) {
            assert!((1..=10).contains(&record.quantity()));
            assert!((5_000..=150_000).contains(&record.unit_price().cents()));
            assert!(record.customer_id().starts_with("CUST"));
            assert!(record.salesperson().starts_with("SP"));
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let generator = SalesGenerator::new(&AppConfig::annual(2024).generator).unwrap();
        let today = ymd(2025, 1, 1);

        let first = generator.generate(&mut StdRng::seed_from_u64(99), today);
        let second = generator.generate(&mut StdRng::seed_from_u64(99), today);

        assert_eq!(first, second);
    }

    #[test]
    fn test_single_record_per_day() {
        let mut config = AppConfig::default().generator;
        config.window = salesgen_config::WindowConfig::Trailing { days: 1 };
        config.records_per_day = Bounds::new(1, 1);
        let generator = SalesGenerator::new(&config).unwrap();

        let records = generator.generate(&mut StdRng::seed_from_u64(3), ymd(2024, 1, 1));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default().generator;
        config.records_per_day = Bounds::new(4, 2);

        let err = SalesGenerator::new(&config).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unit_price_bounds_checked_in_cents() {
        let mut config = AppConfig::default().generator;
        config.unit_price = Bounds::new(0.001, 0.004);
        let err = SalesGenerator::new(&config).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        config.unit_price = Bounds::new(1.0e17, 1.0e17);
        let err = SalesGenerator::new(&config).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_smallest_price_is_one_cent() {
        let mut config = AppConfig::default().generator;
        config.unit_price = Bounds::new(0.01, 0.01);
        let generator = SalesGenerator::new(&config).unwrap();

        for record in generator.generate(&mut StdRng::seed_from_u64(4), ymd(2024, 1, 1)) {
            assert_eq!(record.unit_price().cents(), 1);
        }
    }
}
