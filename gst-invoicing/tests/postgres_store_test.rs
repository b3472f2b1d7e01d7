use chrono::NaiveDate;
use gst_invoicing::models::{InvoiceInput, InvoiceType, TaxMode};
use gst_invoicing::services::{Database, InvoiceStore};
use rust_decimal::Decimal;
use service_core::error::AppError;
use std::str::FromStr;
use uuid::Uuid;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn database() -> Database {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let db = Database::new(&url, 2, 0)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations().await.expect("Failed to run migrations");
    db
}

fn input(number: &str, invoice_type: InvoiceType, date: (i32, u32, u32)) -> InvoiceInput {
    InvoiceInput {
        invoice_number: number.to_string(),
        invoice_type,
        invoice_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        customer_name: "Acme Traders".to_string(),
        customer_gstin: "27AAPFU0939F1ZV".to_string(),
        commodity: String::new(),
        taxable_amount: d("1000.00"),
        tax_rate: d("9"),
        tax_mode: TaxMode::RateIsEach,
        cgst: d("90.00"),
        sgst: d("90.00"),
        total: d("1180.00"),
    }
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn insert_and_query_by_period() {
    let db = database().await;
    // A far-future year keeps runs from seeing each other's rows.
    let year = 3000 + (Uuid::new_v4().as_u128() % 5000) as i32;

    let later = db
        .insert(&input("PG-2", InvoiceType::Sale, (year, 6, 20)))
        .await
        .unwrap();
    let earlier = db
        .insert(&input("PG-1", InvoiceType::Sale, (year, 6, 2)))
        .await
        .unwrap();
    db.insert(&input("PG-3", InvoiceType::Purchase, (year, 6, 5)))
        .await
        .unwrap();

    let sales = db
        .query_by_type_and_period(InvoiceType::Sale, 6, year)
        .await
        .unwrap();

    let ids: Vec<i64> = sales.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![earlier.id, later.id]);
    assert_eq!(sales[0].total, d("1180.00"));
    assert_eq!(sales[0].tax_mode, TaxMode::RateIsEach);

    let empty = db
        .query_by_type_and_period(InvoiceType::Sale, 13, year)
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn unreconciled_total_is_a_database_error() {
    let db = database().await;
    let mut bad = input("PG-BAD", InvoiceType::Sale, (2999, 1, 1));
    bad.total = d("1.00");

    let err = db.insert(&bad).await.unwrap_err();

    assert!(matches!(err, AppError::DatabaseError(_)));
}
