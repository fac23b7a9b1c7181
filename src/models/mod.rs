pub mod record;

pub use record::{header_row, DiagnosticRecord};
