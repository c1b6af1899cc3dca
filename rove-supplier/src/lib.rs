pub mod client;
pub mod config;

pub use client::{HttpSupplierClient, OperationClass};
pub use config::{RetryPolicy, SupplierConfig, TimeoutTiers};
