//! Offline browsing of the hand-curated restaurant catalog.

use anyhow::Context;
use gogoeat_core::{load_catalog, AppConfig};
use gogoeat_search::{apply_filters, pick_random, Selection};

use crate::filters::FilterArgs;
use crate::output::{print_candidates, print_selection, Format};

/// Load the catalog, apply `filters`, and print the result or a random pick.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or fails validation.
pub(crate) fn run_catalog(
    config: &AppConfig,
    filters: &FilterArgs,
    format: Format,
) -> anyhow::Result<()> {
    let catalog = load_catalog(&config.catalog_path)
        .with_context(|| format!("failed to load catalog {}", config.catalog_path.display()))?;
    let visible = apply_filters(&catalog.candidates(), &filters.to_criteria());

    if visible.is_empty() {
        println!("no restaurants match the selected filters");
        return Ok(());
    }

    let origin = config.default_center;
    if !filters.random {
        return print_candidates(&visible, origin, format);
    }

    match pick_random(&visible) {
        Some(pick) => print_selection(
            &Selection {
                candidate: pick.clone(),
                details: None,
            },
            origin,
            format,
        ),
        None => Ok(()),
    }
}
