//! Best-effort extras for displayed repositories: refreshed counts, language
//! breakdown and the labels used by open issues.

mod card;
mod stats;

pub use card::{RepositoryEnricher, RepositoryEnrichment, TOP_LABELS, TOP_LANGUAGES};
pub use stats::{label_histogram, language_shares, LabelUsage, LanguageShare};
