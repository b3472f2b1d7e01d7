//! Services module for gst-invoicing.

pub mod database;
pub mod metrics;
pub mod report;
pub mod store;
pub mod tax_calculator;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use report::{build_report, load_report};
pub use store::{InvoiceStore, MemoryStore};
pub use tax_calculator::{derive_tax_fields, round_money, round_rate, TaxFields};
