//! Field catalog for sales records
//!
//! Every record attribute is listed here exactly once, together with the
//! human-readable label used on the wire and in CSV headers, the Postgres
//! column it lives in, and the kind of value it holds. Sort-field resolution
//! and SQL generation both go through this table.

use std::collections::HashSet;
use std::fmt;

/// Kind of value a field holds, which decides how it compares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Date,
}

impl FieldKind {
    /// Integer and decimal fields compare numerically
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Decimal)
    }
}

/// A sales record attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalesField {
    TransactionId,
    Date,
    CustomerId,
    CustomerName,
    PhoneNumber,
    Gender,
    Age,
    CustomerRegion,
    CustomerType,
    ProductId,
    ProductName,
    Brand,
    ProductCategory,
    Tags,
    Quantity,
    PricePerUnit,
    DiscountPercentage,
    TotalAmount,
    FinalAmount,
    PaymentMethod,
    OrderStatus,
    DeliveryType,
    StoreId,
    StoreLocation,
    SalespersonId,
    EmployeeName,
}

impl SalesField {
    /// All fields, in CSV/wire column order
    pub const ALL: [SalesField; 26] = [
        SalesField::TransactionId,
        SalesField::Date,
        SalesField::CustomerId,
        SalesField::CustomerName,
        SalesField::PhoneNumber,
        SalesField::Gender,
        SalesField::Age,
        SalesField::CustomerRegion,
        SalesField::CustomerType,
        SalesField::ProductId,
        SalesField::ProductName,
        SalesField::Brand,
        SalesField::ProductCategory,
        SalesField::Tags,
        SalesField::Quantity,
        SalesField::PricePerUnit,
        SalesField::DiscountPercentage,
        SalesField::TotalAmount,
        SalesField::FinalAmount,
        SalesField::PaymentMethod,
        SalesField::OrderStatus,
        SalesField::DeliveryType,
        SalesField::StoreId,
        SalesField::StoreLocation,
        SalesField::SalespersonId,
        SalesField::EmployeeName,
    ];

    /// Human-readable label; the key used in JSON payloads and CSV headers
    pub fn label(&self) -> &'static str {
        match self {
            SalesField::TransactionId => "Transaction ID",
            SalesField::Date => "Date",
            SalesField::CustomerId => "Customer ID",
            SalesField::CustomerName => "Customer Name",
            SalesField::PhoneNumber => "Phone Number",
            SalesField::Gender => "Gender",
            SalesField::Age => "Age",
            SalesField::CustomerRegion => "Customer Region",
            SalesField::CustomerType => "Customer Type",
            SalesField::ProductId => "Product ID",
            SalesField::ProductName => "Product Name",
            SalesField::Brand => "Brand",
            SalesField::ProductCategory => "Product Category",
            SalesField::Tags => "Tags",
            SalesField::Quantity => "Quantity",
            SalesField::PricePerUnit => "Price per Unit",
            SalesField::DiscountPercentage => "Discount Percentage",
            SalesField::TotalAmount => "Total Amount",
            SalesField::FinalAmount => "Final Amount",
            SalesField::PaymentMethod => "Payment Method",
            SalesField::OrderStatus => "Order Status",
            SalesField::DeliveryType => "Delivery Type",
            SalesField::StoreId => "Store ID",
            SalesField::StoreLocation => "Store Location",
            SalesField::SalespersonId => "Salesperson ID",
            SalesField::EmployeeName => "Employee Name",
        }
    }

    /// Postgres column name
    pub fn column(&self) -> &'static str {
        match self {
            SalesField::TransactionId => "transaction_id",
            SalesField::Date => "date",
            SalesField::CustomerId => "customer_id",
            SalesField::CustomerName => "customer_name",
            SalesField::PhoneNumber => "phone_number",
            SalesField::Gender => "gender",
            SalesField::Age => "age",
            SalesField::CustomerRegion => "customer_region",
            SalesField::CustomerType => "customer_type",
            SalesField::ProductId => "product_id",
            SalesField::ProductName => "product_name",
            SalesField::Brand => "brand",
            SalesField::ProductCategory => "product_category",
            SalesField::Tags => "tags",
            SalesField::Quantity => "quantity",
            SalesField::PricePerUnit => "price_per_unit",
            SalesField::DiscountPercentage => "discount_percentage",
            SalesField::TotalAmount => "total_amount",
            SalesField::FinalAmount => "final_amount",
            SalesField::PaymentMethod => "payment_method",
            SalesField::OrderStatus => "order_status",
            SalesField::DeliveryType => "delivery_type",
            SalesField::StoreId => "store_id",
            SalesField::StoreLocation => "store_location",
            SalesField::SalespersonId => "salesperson_id",
            SalesField::EmployeeName => "employee_name",
        }
    }

    /// Value kind of the field
    pub fn kind(&self) -> FieldKind {
        match self {
            SalesField::Date => FieldKind::Date,
            SalesField::Age | SalesField::Quantity => FieldKind::Integer,
            SalesField::PricePerUnit
            | SalesField::DiscountPercentage
            | SalesField::TotalAmount
            | SalesField::FinalAmount => FieldKind::Decimal,
            _ => FieldKind::Text,
        }
    }

    /// Resolves a client-supplied field name.
    ///
    /// Exact label match first (plus the "Discount" alias used by the
    /// dashboard's sort menu), then a normalized match against labels and
    /// column names that ignores case, spaces and underscores.
    pub fn resolve(name: &str) -> Option<SalesField> {
        let name = name.trim();
        if name == "Discount" {
            return Some(SalesField::DiscountPercentage);
        }
        if let Some(field) = Self::ALL.iter().find(|f| f.label() == name) {
            return Some(*field);
        }

        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        if wanted == "discount" {
            return Some(SalesField::DiscountPercentage);
        }
        Self::ALL
            .iter()
            .find(|f| normalize(f.label()) == wanted || normalize(f.column()) == wanted)
            .copied()
    }
}

impl fmt::Display for SalesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Checks the catalog once at boot.
///
/// Labels, column names and their normalized forms must all be distinct,
/// otherwise name resolution would be ambiguous.
pub fn validate_catalog() -> Result<(), String> {
    let mut labels = HashSet::new();
    let mut columns = HashSet::new();
    let mut normalized = HashSet::new();

    for field in SalesField::ALL {
        if !labels.insert(field.label()) {
            return Err(format!("duplicate field label '{}'", field.label()));
        }
        if !columns.insert(field.column()) {
            return Err(format!("duplicate column '{}'", field.column()));
        }
        if !normalized.insert(normalize(field.label())) {
            return Err(format!("ambiguous field label '{}'", field.label()));
        }
        if SalesField::resolve(field.label()) != Some(field)
            || SalesField::resolve(field.column()) != Some(field)
        {
            return Err(format!("field '{}' does not resolve to itself", field.label()));
        }
    }

    Ok(())
}
