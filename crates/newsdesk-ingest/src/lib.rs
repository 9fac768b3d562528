//! News ingestion: fetch, normalize, classify, dedupe.
//!
//! [`Pipeline`] is the entry point. It pulls from the structured-search
//! endpoint and the configured RSS/Atom feeds through an injected
//! [`Fetch`] transport and never fails as a whole; broken sources degrade
//! to empty results and are logged through [`IngestLog`].

pub mod classify;
pub mod dates;
pub mod dedup;
pub mod error;
pub mod ident;
pub mod log;
pub mod normalize;
pub mod pipeline;
pub mod sources;
pub mod transport;

pub use classify::{Classification, Classifier};
pub use dedup::{dedupe, merge_sorted, sort_newest_first};
pub use error::IngestError;
pub use ident::{hash_code, RandomTokens, TokenSource};
pub use log::{IngestLog, LogLevel, LogRecord, RecordingLog, TracingLog};
pub use pipeline::{
    CategoryError, FetchNewsResult, Pacer, Pipeline, TokioPacer, DEFAULT_CATEGORY_DELAY,
};
pub use sources::{build_geo_query, category_query, search_url, SourceFailure, SourceOutcome};
pub use transport::{Fetch, FetchResponse, HttpFetcher};
