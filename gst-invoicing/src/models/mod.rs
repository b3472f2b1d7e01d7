//! Domain models for gst-invoicing.

mod invoice;
mod report;

pub use invoice::{InvoiceInput, InvoiceRecord, InvoiceType, TaxMode};
pub use report::{AggregateTotals, InvoiceReport, Partition, Period};
