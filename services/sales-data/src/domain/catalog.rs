//! 抽样目录

use std::ops::RangeInclusive;

use rand::Rng;
use salesgen_config::CatalogConfig;
use salesgen_errors::{AppError, AppResult};

/// 固定的有限取值集合，等概率抽样
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<String>,
    regions: Vec<String>,
    salespeople: Vec<String>,
    customer_prefix: String,
    customer_numbers: RangeInclusive<u32>,
}

impl Catalog {
    pub fn from_config(config: &CatalogConfig) -> AppResult<Self> {
        for (name, entries) in [
            ("products", &config.products),
            ("regions", &config.regions),
            ("salespeople", &config.salespeople),
        ] {
            if entries.is_empty() {
                return Err(AppError::validation(format!("catalog {} is empty", name)));
            }
        }

        let numbers = config.customer_number;
        if numbers.min > numbers.max {
            return Err(AppError::validation("customer number range is inverted"));
        }

        Ok(Self {
            products: config.products.clone(),
            regions: config.regions.clone(),
            salespeople: config.salespeople.clone(),
            customer_prefix: config.customer_prefix.clone(),
            customer_numbers: numbers.min..=numbers.max,
        })
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn salespeople(&self) -> &[String] {
        &self.salespeople
    }

    pub fn pick_product<R: Rng>(&self, rng: &mut R) -> &str {
        pick(&self.products, rng)
    }

    pub fn pick_region<R: Rng>(&self, rng: &mut R) -> &str {
        pick(&self.regions, rng)
    }

    pub fn pick_salesperson<R: Rng>(&self, rng: &mut R) -> &str {
        pick(&self.salespeople, rng)
    }

    /// 前缀 + 随机数字后缀，如 `CUST1234`
    pub fn draw_customer_id<R: Rng>(&self, rng: &mut R) -> String {
        let number = rng.gen_range(self.customer_numbers.clone());
        format!("{}{}", self.customer_prefix, number)
    }
}

// 构造时已保证非空
fn pick<'a, R: Rng>(entries: &'a [String], rng: &mut R) -> &'a str {
    &entries[rng.gen_range(0..entries.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::from_config(&CatalogConfig::default()).unwrap();

        assert_eq!(catalog.products().len(), 7);
        assert_eq!(catalog.regions().len(), 4);
        assert_eq!(catalog.salespeople().first().map(String::as_str), Some("SP1"));
        assert_eq!(catalog.salespeople().last().map(String::as_str), Some("SP20"));
    }

    #[test]
    fn test_picks_come_from_catalog() {
        let catalog = Catalog::from_config(&CatalogConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let product = catalog.pick_product(&mut rng).to_string();
            assert!(catalog.products().contains(&product));

            let region = catalog.pick_region(&mut rng).to_string();
            assert!(catalog.regions().contains(&region));

            let customer = catalog.draw_customer_id(&mut rng);
            let number: u32 = customer.strip_prefix("CUST").unwrap().parse().unwrap();
            assert!((1000..=9999).contains(&number));
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let config = CatalogConfig {
            products: vec![],
            ..CatalogConfig::default()
        };

        let err = Catalog::from_config(&config).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
