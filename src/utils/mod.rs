pub mod errors;

pub use errors::{ScannerError, Result};
