//! Database service for gst-invoicing.

use crate::models::{InvoiceInput, InvoiceRecord, InvoiceType, TaxMode};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::InvoiceStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Raw `invoices` row; enum columns are stored as text.
#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: i64,
    invoice_number: String,
    invoice_type: String,
    invoice_date: NaiveDate,
    customer_name: String,
    customer_gstin: String,
    commodity: String,
    taxable_amount: Decimal,
    tax_rate: Decimal,
    tax_mode: String,
    cgst: Decimal,
    sgst: Decimal,
    total: Decimal,
    created_utc: DateTime<Utc>,
}

impl From<InvoiceRow> for InvoiceRecord {
    fn from(row: InvoiceRow) -> Self {
        let tax_mode = TaxMode::from_string(&row.tax_mode).unwrap_or_else(|| {
            warn!(id = row.id, tax_mode = %row.tax_mode, "Unknown tax mode on stored invoice");
            TaxMode::default()
        });

        InvoiceRecord {
            id: row.id,
            invoice_number: row.invoice_number,
            invoice_type: InvoiceType::from_string(&row.invoice_type),
            invoice_date: row.invoice_date,
            customer_name: row.customer_name,
            customer_gstin: row.customer_gstin,
            commodity: row.commodity,
            taxable_amount: row.taxable_amount,
            tax_rate: row.tax_rate,
            tax_mode,
            cgst: row.cgst,
            sgst: row.sgst,
            total: row.total,
            created_utc: row.created_utc,
        }
    }
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "gst-invoicing"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for Database {
    /// Insert an invoice; the row id comes from the sequence.
    #[instrument(
        skip(self, input),
        fields(invoice_number = %input.invoice_number, invoice_type = input.invoice_type.as_str())
    )]
    async fn insert(&self, input: &InvoiceInput) -> Result<InvoiceRecord, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_invoice"])
            .start_timer();

        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            INSERT INTO invoices (
                invoice_number, invoice_type, invoice_date, customer_name, customer_gstin,
                commodity, taxable_amount, tax_rate, tax_mode, cgst, sgst, total
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, invoice_number, invoice_type, invoice_date, customer_name, customer_gstin,
                commodity, taxable_amount, tax_rate, tax_mode, cgst, sgst, total, created_utc
            "#,
        )
        .bind(&input.invoice_number)
        .bind(input.invoice_type.as_str())
        .bind(input.invoice_date)
        .bind(&input.customer_name)
        .bind(&input.customer_gstin)
        .bind(&input.commodity)
        .bind(input.taxable_amount)
        .bind(input.tax_rate)
        .bind(input.tax_mode.as_str())
        .bind(input.cgst)
        .bind(input.sgst)
        .bind(input.total)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_check_violation() => {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Invoice '{}' rejected by constraint {}",
                    input.invoice_number,
                    db_err.constraint().unwrap_or("unknown")
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create invoice: {}", e)),
        })?;

        timer.observe_duration();

        info!(id = row.id, "Invoice created");

        Ok(row.into())
    }

    /// Invoices of one type for a calendar month, oldest first.
    #[instrument(skip(self), fields(invoice_type = invoice_type.as_str()))]
    async fn query_by_type_and_period(
        &self,
        invoice_type: InvoiceType,
        month: i32,
        year: i32,
    ) -> Result<Vec<InvoiceRecord>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["query_by_type_and_period"])
            .start_timer();

        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, invoice_number, invoice_type, invoice_date, customer_name, customer_gstin,
                commodity, taxable_amount, tax_rate, tax_mode, cgst, sgst, total, created_utc
            FROM invoices
            WHERE invoice_type = $1
              AND EXTRACT(MONTH FROM invoice_date)::int = $2
              AND EXTRACT(YEAR FROM invoice_date)::int = $3
            ORDER BY invoice_date ASC, id ASC
            "#,
        )
        .bind(invoice_type.as_str())
        .bind(month)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list invoices: {}", e)))?;

        timer.observe_duration();

        Ok(rows.into_iter().map(InvoiceRecord::from).collect())
    }

    /// Check database health.
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}
