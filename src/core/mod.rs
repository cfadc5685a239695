// src/core/mod.rs

pub mod csv;
pub mod net;
pub mod record;

pub use csv::parse_records;
pub use net::{SiteTransport, Transport};
pub use record::Record;
