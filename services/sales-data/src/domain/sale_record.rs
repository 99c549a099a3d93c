//! 销售记录

use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;

/// 一笔合成的销售交易
///
/// 生成后不可变：字段只读，`total_amount` 在构造时由数量和单价算出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    date: NaiveDate,
    product: String,
    region: String,
    quantity: u32,
    unit_price: Money,
    total_amount: Money,
    customer_id: String,
    salesperson: String,
}

impl SaleRecord {
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        region: impl Into<String>,
        quantity: u32,
        unit_price: Money,
        customer_id: impl Into<String>,
        salesperson: impl Into<String>,
    ) -> Self {
        Self {
            date,
            product: product.into(),
            region: region.into(),
            quantity,
            unit_price,
            total_amount: unit_price * quantity,
            customer_id: customer_id.into(),
            salesperson: salesperson.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn salesperson(&self) -> &str {
        &self.salesperson
    }

    /// 月份键 `YYYY-MM`
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
