//! Sales record type

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::field::SalesField;

/// One sales transaction.
///
/// Serializes with the human-readable labels as keys ("Customer Name",
/// "Total Amount", ...). Existing dashboard consumers depend on these keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesRecord {
    #[serde(rename = "Transaction ID")]
    pub transaction_id: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Customer ID")]
    pub customer_id: String,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Customer Region")]
    pub customer_region: String,
    #[serde(rename = "Customer Type")]
    pub customer_type: String,
    #[serde(rename = "Product ID")]
    pub product_id: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Product Category")]
    pub product_category: String,
    /// Comma-delimited free-text labels
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Price per Unit", with = "rust_decimal::serde::float")]
    pub price_per_unit: Decimal,
    #[serde(rename = "Discount Percentage", with = "rust_decimal::serde::float")]
    pub discount_percentage: Decimal,
    /// Amount before discount
    #[serde(rename = "Total Amount", with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Amount after discount
    #[serde(rename = "Final Amount", with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    #[serde(rename = "Payment Method")]
    pub payment_method: String,
    #[serde(rename = "Order Status")]
    pub order_status: String,
    #[serde(rename = "Delivery Type")]
    pub delivery_type: String,
    #[serde(rename = "Store ID")]
    pub store_id: String,
    #[serde(rename = "Store Location")]
    pub store_location: String,
    #[serde(rename = "Salesperson ID")]
    pub salesperson_id: String,
    #[serde(rename = "Employee Name")]
    pub employee_name: String,
}

/// Borrowed view of a single field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
}

impl SalesRecord {
    /// Returns the value of `field`
    pub fn value(&self, field: SalesField) -> FieldValue<'_> {
        match field {
            SalesField::TransactionId => FieldValue::Text(&self.transaction_id),
            SalesField::Date => FieldValue::Date(self.date),
            SalesField::CustomerId => FieldValue::Text(&self.customer_id),
            SalesField::CustomerName => FieldValue::Text(&self.customer_name),
            SalesField::PhoneNumber => FieldValue::Text(&self.phone_number),
            SalesField::Gender => FieldValue::Text(&self.gender),
            SalesField::Age => FieldValue::Integer(i64::from(self.age)),
            SalesField::CustomerRegion => FieldValue::Text(&self.customer_region),
            SalesField::CustomerType => FieldValue::Text(&self.customer_type),
            SalesField::ProductId => FieldValue::Text(&self.product_id),
            SalesField::ProductName => FieldValue::Text(&self.product_name),
            SalesField::Brand => FieldValue::Text(&self.brand),
            SalesField::ProductCategory => FieldValue::Text(&self.product_category),
            SalesField::Tags => FieldValue::Text(&self.tags),
            SalesField::Quantity => FieldValue::Integer(i64::from(self.quantity)),
            SalesField::PricePerUnit => FieldValue::Decimal(self.price_per_unit),
            SalesField::DiscountPercentage => FieldValue::Decimal(self.discount_percentage),
            SalesField::TotalAmount => FieldValue::Decimal(self.total_amount),
            SalesField::FinalAmount => FieldValue::Decimal(self.final_amount),
            SalesField::PaymentMethod => FieldValue::Text(&self.payment_method),
            SalesField::OrderStatus => FieldValue::Text(&self.order_status),
            SalesField::DeliveryType => FieldValue::Text(&self.delivery_type),
            SalesField::StoreId => FieldValue::Text(&self.store_id),
            SalesField::StoreLocation => FieldValue::Text(&self.store_location),
            SalesField::SalespersonId => FieldValue::Text(&self.salesperson_id),
            SalesField::EmployeeName => FieldValue::Text(&self.employee_name),
        }
    }

    /// Individual tags: comma-split, trimmed, empties dropped
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }

    /// Discount granted on this transaction (total minus final)
    pub fn discount_amount(&self) -> Decimal {
        self.total_amount - self.final_amount
    }
}
