//! # bibtex-normalizer
//!
//! Turns a BibTeX bibliography into normalized publication records for a
//! personal academic website.
//!
//! ## Features
//!
//! - Zero-copy BibTeX parsing with `@string` expansion and source locations
//!   in errors
//! - LaTeX and brace cleanup of field text
//! - Author lists with highlight, corresponding (`*`) and co-author (`#`)
//!   markers
//! - Year/status labels, month resolution, type and research-area
//!   classification
//! - Citation-ready BibTeX reconstruction
//! - Search, filters and facets over the result
//!
//! ## Example
//!
//! ```
//! use bibtex_normalizer::{Normalizer, NormalizerConfig, PublicationType};
//!
//! let input = r#"
//!     @inproceedings{lovelace2024,
//!         author = {Lovelace, Ada* and Babbage, Charles},
//!         title = {{Spiking} Engines},
//!         booktitle = {Proc. of {NeurIPS}},
//!         year = 2024,
//!         month = sep
//!     }
//! "#;
//!
//! let normalizer = Normalizer::new(NormalizerConfig::new().highlight_name("Ada Lovelace"));
//! let pubs = normalizer.parse(input)?;
//!
//! assert_eq!(pubs.len(), 1);
//! assert_eq!(pubs[0].title, "Spiking Engines");
//! assert_eq!(pubs[0].publication_type, PublicationType::Conference);
//! assert!(pubs[0].authors[0].is_highlighted);
//! assert_eq!(pubs[0].month.as_ref().and_then(|m| m.number()), Some(9));
//! # Ok::<(), bibtex_normalizer::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    missing_debug_implementations
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod error;
pub mod model;
pub mod parser;
pub mod query;
pub mod writer;

mod author;
mod bibliography;
mod classify;
mod clean;
mod config;
mod date;
mod publication;

pub use author::{parse_authors, Author};
pub use bibliography::Bibliography;
pub use classify::{PublicationType, ResearchArea};
pub use clean::clean;
pub use config::NormalizerConfig;
pub use date::{parse_year, Month, YearStatus, DEFAULT_YEAR_LABEL};
pub use error::{Error, Result};
pub use model::{Entry, Field, Value};
pub use publication::{
    parse_publications, parse_publications_file, Normalizer, Publication, Status, UNTITLED,
};
pub use query::{type_facets, year_facets, PublicationQuery, YearFacets, YearFilter};
pub use writer::{reconstruct, Writer};

/// Re-export of the common types
pub mod prelude {
    pub use crate::{
        Author, Bibliography, Entry, Error, Normalizer, NormalizerConfig, Publication,
        PublicationQuery, PublicationType, ResearchArea, Result, YearFilter,
    };
}

/// Parse a bibliography from a string
pub fn parse(input: &str) -> Result<Bibliography<'_>> {
    Bibliography::parse(input)
}
