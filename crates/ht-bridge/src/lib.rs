//! Everything around the pure compiler that touches the outside world:
//! settings files, classifier backends, and document I/O.

pub mod backend;
pub mod document;
pub mod error;
pub mod fixture;
pub mod http;
pub mod settings;

pub use backend::{ClassifierBackend, fallback_count};
pub use document::{DocumentReport, OutputClaims, OutputKind, collect_inputs, process_document};
pub use error::{BridgeError, Result};
pub use fixture::FixtureClassifier;
pub use http::HttpClassifier;
pub use settings::{BackendKind, ClassifierSettings, Settings};
