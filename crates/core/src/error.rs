use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("input does not exist: {0:?}")]
    MissingInput(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("xml parse error in {path:?}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },
    #[error("malformed document {path:?}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },
    #[error("trying to render a non-object value: {0}")]
    NotStructured(&'static str),
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, LookupError>;
