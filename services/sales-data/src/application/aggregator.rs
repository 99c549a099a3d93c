//! 汇总与按月聚合

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Money, SaleRecord};

/// 整体汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_sales_amount: Money,
    pub total_quantity_sold: u64,
    pub total_transactions: usize,
    pub average_transaction_value: f64,
}

/// 单月聚合
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub month: String,
    pub total_sales: Money,
    pub total_quantity: u64,
    pub record_count: usize,
    pub average_sale: f64,
}

#[derive(Debug, Default)]
struct MonthAccumulator {
    total_sales: Money,
    total_quantity: u64,
    record_count: usize,
}

impl MonthAccumulator {
    fn add(&mut self, record: &SaleRecord) {
        self.total_sales += record.total_amount();
        self.total_quantity += u64::from(record.quantity());
        self.record_count += 1;
    }
}

/// 计算总额、总数量、交易数和平均交易额
///
/// 空序列的平均值为 0
pub fn summarize(records: &[SaleRecord]) -> SalesSummary {
    let total_sales_amount: Money = records.iter().map(SaleRecord::total_amount).sum();
    let total_quantity_sold = records.iter().map(|r| u64::from(r.quantity())).sum();

    SalesSummary {
        total_sales_amount,
        total_quantity_sold,
        total_transactions: records.len(),
        average_transaction_value: average(total_sales_amount, records.len()),
    }
}

/// 按 `YYYY-MM` 分组，按月份升序输出
pub fn monthly_rollup(records: &[SaleRecord]) -> Vec<MonthlyAggregate> {
    let mut months: BTreeMap<String, MonthAccumulator> = BTreeMap::new();

    for record in records {
        months.entry(record.month_key()).or_default().add(record);
    }

    months
        .into_iter()
        .map(|(month, acc)| MonthlyAggregate {
            month,
            total_sales: acc.total_sales,
            total_quantity: acc.total_quantity,
            record_count: acc.record_count,
            average_sale: average(acc.total_sales, acc.record_count),
        })
        .collect()
}

/// `round(total / count, 2)`，`count == 0` 时为 0
fn average(total: Money, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total.cents() as f64 / count as f64).round() / 100.0
}
