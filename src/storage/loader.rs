//! CSV dataset loader
//!
//! Reads the sales export into typed records. Columns are matched by
//! header label; missing columns and blank cells fall back to defaults.
//! Numeric cells that do not parse load as zero. An unparsable date fails
//! the whole load and names the offending line.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{StoreError, StoreResult};
use crate::model::SalesRecord;
use crate::planner::parse_date;

/// Row as it appears in the file, before typing
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    #[serde(rename = "Transaction ID")]
    transaction_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Phone Number")]
    phone_number: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Customer Region")]
    customer_region: String,
    #[serde(rename = "Customer Type")]
    customer_type: String,
    #[serde(rename = "Product ID")]
    product_id: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Product Category")]
    product_category: String,
    #[serde(rename = "Tags")]
    tags: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Price per Unit")]
    price_per_unit: String,
    #[serde(rename = "Discount Percentage", alias = "Discount")]
    discount_percentage: String,
    #[serde(rename = "Total Amount")]
    total_amount: String,
    #[serde(rename = "Final Amount")]
    final_amount: String,
    #[serde(rename = "Payment Method")]
    payment_method: String,
    #[serde(rename = "Order Status")]
    order_status: String,
    #[serde(rename = "Delivery Type")]
    delivery_type: String,
    #[serde(rename = "Store ID")]
    store_id: String,
    #[serde(rename = "Store Location")]
    store_location: String,
    #[serde(rename = "Salesperson ID")]
    salesperson_id: String,
    #[serde(rename = "Employee Name")]
    employee_name: String,
}

impl RawRow {
    fn into_record(self, line: u64) -> StoreResult<SalesRecord> {
        let date = parse_record_date(&self.date).ok_or_else(|| StoreError::InvalidCsv {
            line,
            message: format!("unparsable date '{}'", self.date),
        })?;

        Ok(SalesRecord {
            transaction_id: self.transaction_id,
            date,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            gender: self.gender,
            age: parse_count(&self.age),
            customer_region: self.customer_region,
            customer_type: self.customer_type,
            product_id: self.product_id,
            product_name: self.product_name,
            brand: self.brand,
            product_category: self.product_category,
            tags: self.tags,
            quantity: parse_count(&self.quantity),
            price_per_unit: parse_amount(&self.price_per_unit),
            discount_percentage: parse_amount(&self.discount_percentage),
            total_amount: parse_amount(&self.total_amount),
            final_amount: parse_amount(&self.final_amount),
            payment_method: self.payment_method,
            order_status: self.order_status,
            delivery_type: self.delivery_type,
            store_id: self.store_id,
            store_location: self.store_location,
            salesperson_id: self.salesperson_id,
            employee_name: self.employee_name,
        })
    }
}

/// Loads one CSV file
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads and types every row
    pub fn load(&self) -> StoreResult<Vec<SalesRecord>> {
        let file = File::open(&self.path).map_err(|e| StoreError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        read_records(file)
    }
}

/// Reads records from any CSV stream with a header row
pub fn read_records<R: Read>(reader: R) -> StoreResult<Vec<SalesRecord>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        let row = row.map_err(|e| StoreError::InvalidCsv {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        // Header is line 1; data starts at line 2
        let line = records.len() as u64 + 2;
        records.push(row.into_record(line)?);
    }
    Ok(records)
}

/// Dataset dates: ISO first, then the day-first and US slash forms seen
/// in spreadsheet exports, then timestamps.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    for format in ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    parse_date(value)
}

fn parse_count(value: &str) -> u32 {
    if let Ok(n) = value.parse::<u32>() {
        return n;
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f.trunc() as u32)
        .unwrap_or(0)
}

fn parse_amount(value: &str) -> Decimal {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .unwrap_or(Decimal::ZERO)
}
