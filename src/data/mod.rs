//! CSV datasets loaded once at startup and shared read-only afterwards.

pub mod catalog;
pub mod history;
pub mod rules;

pub use catalog::{Catalog, CatalogEntry};
pub use history::UserHistory;
pub use rules::{Antecedent, Rule};

use std::path::Path;

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

/// Everything the recommendation flow reads from disk
#[derive(Debug, Clone)]
pub struct Datasets {
    /// Product catalog; `None` when the catalog file is absent or unreadable
    pub catalog: Option<Catalog>,
    pub history: UserHistory,
    pub rules: Vec<Rule>,
}

/// Loads all datasets named by the configuration.
///
/// Interactions and rules are required: a missing or unreadable file is a
/// fatal error. The catalog is optional and degrades to `None`.
pub fn load_datasets(config: &Config) -> AppResult<Datasets> {
    let history_path = config.user_item_path();
    let rules_path = config.rules_path();

    require_file(&history_path)?;
    require_file(&rules_path)?;

    let history = UserHistory::from_path(&history_path)?;
    let rules = rules::load_rules(&rules_path)?;
    let catalog = load_catalog(&config.products_path());

    tracing::info!(
        users = history.user_count(),
        interactions = history.total_interactions(),
        rules = rules.len(),
        catalog_items = catalog.as_ref().map(Catalog::len).unwrap_or(0),
        "Datasets loaded"
    );

    Ok(Datasets {
        catalog,
        history,
        rules,
    })
}

fn require_file(path: &Path) -> AppResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AppError::MissingData(format!(
            "required dataset {} not found",
            path.display()
        )))
    }
}

fn load_catalog(path: &Path) -> Option<Catalog> {
    if !path.is_file() {
        tracing::warn!(
            path = %path.display(),
            "Product catalog not found, item metadata will be unknown"
        );
        return None;
    }

    match Catalog::from_path(path) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            tracing::error!(
                error = %e,
                path = %path.display(),
                "Failed to read product catalog, item metadata will be unknown"
            );
            None
        }
    }
}
