use thiserror::Error;

/// Failures raised inside a single source fetch.
///
/// None of these escape the pipeline: adapters catch them at their boundary,
/// log them, and degrade to an empty result for that source.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("unexpected content type {content_type:?} from {url}")]
    UnexpectedContentType {
        content_type: Option<String>,
        url: String,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
