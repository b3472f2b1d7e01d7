pub mod invoices;
pub mod reports;

pub use invoices::{CreateInvoiceForm, FormValue, TaxDeriveRequest};
pub use reports::PeriodParams;
