//! confpilot-store — schema and values lookup for confpilot.
//!
//! Both stores are plain key lookups over a directory of JSON files, one
//! file per application:
//!
//! | Kind | File |
//! |---|---|
//! | Schema | `<dir>/<app>.schema.json` |
//! | Values | `<dir>/<app>.values.json` |
//!
//! Files are read fresh on every lookup; there is no cache and no write path.
//!
//! # Sources
//!
//! The coordinator sees a store only through [`DocumentSource`]:
//!
//! ```text
//! DocumentSource
//!   ├── DocumentStore  (in-process directory read)
//!   └── HttpSource     (GET {base_url}/{app} against a store service)
//! ```

pub mod error;
pub mod source;
pub mod store;

pub use error::{FetchError, StoreError, StoreResult};
pub use source::{DocumentSource, HttpSource};
pub use store::{DocumentKind, DocumentStore};
