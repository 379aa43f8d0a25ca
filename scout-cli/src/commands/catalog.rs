use scout_core::labels::{search_catalog, AVAILABLE_LANGUAGES, COMMON_ISSUE_LABELS};

use crate::cli::{CatalogArgs, CatalogKind};

pub fn run(args: CatalogArgs) {
    let catalog: &[&str] = match args.kind {
        CatalogKind::Languages => &AVAILABLE_LANGUAGES,
        CatalogKind::Labels => &COMMON_ISSUE_LABELS,
    };
    for entry in search_catalog(catalog, args.filter.as_deref().unwrap_or("")) {
        println!("{}", entry);
    }
}
