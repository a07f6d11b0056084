//! Price data ingestion: providers, retry, normalization

pub mod csv_import;
pub mod ingest;
pub mod provider;
pub mod retry;
pub mod yahoo;

pub use csv_import::CsvProvider;
pub use ingest::{ingest, IngestResult};
pub use provider::{DataSource, FetchResult, PriceProvider, ProviderError, StaticProvider};
pub use retry::RetryPolicy;
pub use yahoo::YahooProvider;
