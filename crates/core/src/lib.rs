mod books;
mod config;
mod error;
mod flatten;
mod inspect;
mod markup;
mod model;
mod normalize;
mod query;
mod render;
mod session;
mod store;

pub use books::{book_title, resolve_book, SOURCE_BOOKS};
pub use config::{
    InspectConfig, LookupConfig, PathsConfig, QueryConfig, DEFAULT_CONFIG, DEFAULT_DATA_DIR,
    DEFAULT_FLATTENED, DEFAULT_INSPECT_COUNT, DEFAULT_MAX_RESULTS, DEFAULT_PROCESSED,
};
pub use error::{LookupError, Result};
pub use flatten::{flatten, flatten_file};
pub use inspect::{sample, sample_file};
pub use markup::{discover, document_id, parse_document, read_document};
pub use model::{Entry, FlatStore, NormalizedStore, RawDocument, Section};
pub use normalize::{normalize, normalize_document, process, SKIP_KEYS};
pub use query::{provenance, rank, token_sort_ratio, Hit, Match, Provenance, QueryEngine};
pub use render::{render_entry, render_json};
pub use session::{is_exit, render_hits, Session, PROMPT};
pub use store::{load_json, save_json};
