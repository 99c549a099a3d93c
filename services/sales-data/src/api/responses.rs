//! HTTP 响应结构

use chrono::Local;
use salesgen_config::PriceField;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::application::SalesSummary;
use crate::domain::SaleRecord;

/// 可用端点（路径、说明）
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("/api/sales", "Get all sales data (JSON)"),
    ("/api/sales/summary", "Get sales summary"),
    ("/api/sales/monthly", "Get sales aggregated by month"),
];

/// 按配置的单价字段名序列化一条记录
pub struct RecordView<'a> {
    record: &'a SaleRecord,
    price_field: PriceField,
}

impl<'a> RecordView<'a> {
    pub fn new(record: &'a SaleRecord, price_field: PriceField) -> Self {
        Self {
            record,
            price_field,
        }
    }
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.record;
        let mut state = serializer.serialize_struct("SaleRecord", 8)?;
        state.serialize_field("date", &record.date())?;
        state.serialize_field("product", record.product())?;
        state.serialize_field("region", record.region())?;
        state.serialize_field("quantity", &record.quantity())?;
        state.serialize_field(self.price_field.key(), &record.unit_price())?;
        state.serialize_field("total_amount", &record.total_amount())?;
        state.serialize_field("customer_id", record.customer_id())?;
        state.serialize_field("salesperson", record.salesperson())?;
        state.end()
    }
}

/// `/api/sales` 信封
#[derive(Serialize)]
pub struct SalesEnvelope<'a> {
    pub status: &'static str,
    pub timestamp: String,
    pub total_records: usize,
    pub data: Vec<RecordView<'a>>,
}

impl<'a> SalesEnvelope<'a> {
    pub fn success(data: Vec<RecordView<'a>>) -> Self {
        Self {
            status: "success",
            timestamp: timestamp(),
            total_records: data.len(),
            data,
        }
    }
}

/// `/api/sales/summary` 信封
#[derive(Serialize)]
pub struct SummaryEnvelope {
    pub status: &'static str,
    pub timestamp: String,
    pub summary: SalesSummary,
}

impl SummaryEnvelope {
    pub fn success(summary: SalesSummary) -> Self {
        Self {
            status: "success",
            timestamp: timestamp(),
            summary,
        }
    }
}

/// 根路由的 JSON 端点列表
#[derive(Serialize)]
pub struct EndpointIndex {
    pub service: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub description: &'static str,
}

impl EndpointIndex {
    pub fn new() -> Self {
        Self {
            service: "Sales Data API",
            endpoints: ENDPOINTS
                .iter()
                .map(|&(path, description)| EndpointInfo { path, description })
                .collect(),
        }
    }
}

impl Default for EndpointIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// 根路由的 HTML 端点列表
pub fn index_html() -> String {
    let items: String = ENDPOINTS
        .iter()
        .map(|(path, description)| {
            format!(
                "        <li><a href=\"{path}\">{path}</a> - {description}</li>\n",
                path = path,
                description = description
            )
        })
        .collect();

    format!(
        "<h1>Sales Data API</h1>\n<p>Available endpoints:</p>\n<ul>\n{}</ul>\n",
        items
    )
}

/// 本地时间的 ISO 8601 时间戳（微秒精度）
fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Money;
    use chrono::NaiveDate;

    fn record() -> SaleRecord {
        SaleRecord::new(
            NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            "Tablet",
            "West",
            2,
            Money::from_cents(12_345),
            "CUST2000",
            "SP3",
        )
    }

    #[test]
    fn test_record_view_uses_configured_price_key() {
        let record = record();

        let json = serde_json::to_value(RecordView::new(&record, PriceField::UnitPrice)).unwrap();
        assert_eq!(json["unit_price"], 123.45);
        assert!(json.get("price").is_none());

        let json = serde_json::to_value(RecordView::new(&record, PriceField::Price)).unwrap();
        assert_eq!(json["price"], 123.45);
        assert!(json.get("unit_price").is_none());
        assert_eq!(json["total_amount"], 246.9);
    }

    #[test]
    fn test_sales_envelope_counts_records() {
        let record = record();
        let envelope = SalesEnvelope::success(vec![
            RecordView::new(&record, PriceField::UnitPrice),
            RecordView::new(&record, PriceField::UnitPrice),
        ]);

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["total_records"], 2);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_index_html_lists_every_endpoint() {
        let html = index_html();
        for (path, _) in ENDPOINTS {
            assert!(html.contains(&format!("href=\"{}\"", path)));
        }
    }
}
