pub mod csv;
pub mod metrics;
