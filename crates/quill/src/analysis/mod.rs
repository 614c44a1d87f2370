//! Response normalization: span extraction, schema classification, and the
//! typed items the renderer consumes.

pub mod classify;
pub mod extract;
pub mod types;

pub use classify::{classify, fallback_envelope, normalize};
pub use extract::extract_json_span;
pub use types::{DEFAULT_CATEGORY, ItemBody, ResponseEnvelope, ResultItem};
