//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use salesdash::executor::SalesQueryEngine;
use salesdash::model::SalesRecord;
use salesdash::storage::MemoryStore;

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Customer half of a fixture record; `sold` and `paid` fill in the rest
pub fn record(id: &str, date: (i32, u32, u32), name: &str, gender: &str, age: u32) -> SalesRecord {
    SalesRecord {
        transaction_id: id.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        customer_id: format!("C-{}", id),
        customer_name: name.to_string(),
        phone_number: format!("98765{:05}", age * 7),
        gender: gender.to_string(),
        age,
        customer_type: "Regular".to_string(),
        product_id: format!("P-{}", id),
        brand: "Acme".to_string(),
        discount_percentage: Decimal::ZERO,
        order_status: "Completed".to_string(),
        delivery_type: "Standard".to_string(),
        store_id: "S1".to_string(),
        store_location: "Mumbai".to_string(),
        salesperson_id: "E1".to_string(),
        employee_name: "Ravi".to_string(),
        ..Default::default()
    }
}

pub trait RecordFixture {
    fn sold(self, region: &str, category: &str, tags: &str) -> Self;
    fn paid(self, quantity: u32, total: &str, final_amount: &str, payment: &str) -> Self;
}

impl RecordFixture for SalesRecord {
    fn sold(mut self, region: &str, category: &str, tags: &str) -> Self {
        self.customer_region = region.to_string();
        self.product_category = category.to_string();
        self.product_name = format!("{} item", category);
        self.tags = tags.to_string();
        self
    }

    fn paid(mut self, quantity: u32, total: &str, final_amount: &str, payment: &str) -> Self {
        self.quantity = quantity;
        self.price_per_unit = dec(total) / Decimal::from(quantity.max(1));
        self.total_amount = dec(total);
        self.final_amount = dec(final_amount);
        self.payment_method = payment.to_string();
        self
    }
}

/// Eight records across regions, categories and ages
pub fn dataset() -> Vec<SalesRecord> {
    vec![
        record("T001", (2023, 1, 5), "Aisha Khan", "Female", 29)
            .sold("North", "Electronics", "Electronics,Gadget")
            .paid(2, "200.00", "180.00", "UPI"),
        record("T002", (2023, 2, 14), "Rahul Verma", "Male", 41)
            .sold("South", "Clothing", "fashion, new")
            .paid(3, "90.00", "90.00", "Cash"),
        record("T003", (2023, 3, 1), "Meera Iyer", "Female", 35)
            .sold("East", "Beauty", "skincare")
            .paid(1, "45.50", "40.95", "Credit Card"),
        record("T004", (2023, 4, 20), "Vikram Singh", "Male", 52)
            .sold("North", "Electronics", "phone, gadget")
            .paid(1, "700.00", "630.00", "UPI"),
        record("T005", (2023, 5, 9), "aisha rao", "Female", 23)
            .sold("West", "Clothing", "")
            .paid(4, "120.00", "108.00", "Debit Card"),
        record("T006", (2023, 6, 30), "Karan Mehta", "Male", 31)
            .sold("South", "Beauty", "new")
            .paid(2, "60.00", "60.00", "UPI"),
        record("T007", (2023, 7, 15), "Neha Gupta", "Female", 47)
            .sold("East", "Electronics", "Gadget")
            .paid(1, "10.005", "10.005", "Cash"),
        record("T008", (2023, 8, 2), "Arjun Nair", "Male", 19)
            .sold("West", "Clothing", "fashion")
            .paid(5, "10.005", "10.005", "Wallet"),
    ]
}

pub fn engine() -> SalesQueryEngine {
    SalesQueryEngine::new(Arc::new(MemoryStore::new(dataset())))
}
