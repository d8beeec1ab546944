//! Bilingual job catalog.
//!
//! The catalog is a JSON document with `categories`, `regions` and `jobs`.
//! Every display string carries a Georgian (`ka`) and an English (`en`)
//! form; [`Locale`] picks one.
//!
//! ```json
//! {
//!   "categories": [{ "id": "it", "name": { "ka": "IT", "en": "IT" } }],
//!   "regions":    [{ "id": "tbilisi", "name": { "ka": "თბილისი", "en": "Tbilisi" } }],
//!   "jobs": [{
//!     "id": "1", "company": "Orbi", "category": "it", "region": "tbilisi",
//!     "title": { "ka": "დეველოპერი", "en": "Developer" }
//!   }]
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use droplist::option::SelectOption;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const SAMPLE: &str = include_str!("../data/sample_catalog.json");

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Georgian.
    #[default]
    Ka,
    /// English.
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ka => write!(f, "ka"),
            Self::En => write!(f, "en"),
        }
    }
}

/// A string in both display languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub ka: String,
    pub en: String,
}

impl Localized {
    pub fn new(ka: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ka: ka.into(),
            en: en.into(),
        }
    }

    /// The text for `locale`.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ka => &self.ka,
            Locale::En => &self.en,
        }
    }

    /// Whether either language contains `needle` (already lowercased).
    #[must_use]
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.ka.to_lowercase().contains(needle) || self.en.to_lowercase().contains(needle)
    }
}

/// A filter facet entry: a category or a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub id: String,
    pub name: Localized,
    /// Shown in the dropdown but not selectable.
    #[serde(default)]
    pub disabled: bool,
}

/// A job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: Localized,
    pub company: String,
    pub category: String,
    pub region: String,
}

/// Errors from loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind} id must not be empty; \"\" selects all")]
    EmptyId { kind: &'static str },
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
    #[error("job '{job}' references unknown {kind} '{id}'")]
    UnknownReference {
        job: String,
        kind: &'static str,
        id: String,
    },
}

/// Categories, regions and jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Facet>,
    pub regions: Vec<Facet>,
    pub jobs: Vec<Job>,
}

impl Catalog {
    /// Parses and validates a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the JSON is malformed, an id repeats, or
    /// a job names a category or region that does not exist.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
    /// [`from_json`](Self::from_json).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            jobs = catalog.jobs.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The built-in sample catalog.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded sample is malformed.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let categories = facet_ids("category", &self.categories)?;
        let regions = facet_ids("region", &self.regions)?;
        unique_ids("job", self.jobs.iter().map(|j| j.id.as_str()))?;

        for job in &self.jobs {
            if !categories.contains(job.category.as_str()) {
                return Err(CatalogError::UnknownReference {
                    job: job.id.clone(),
                    kind: "category",
                    id: job.category.clone(),
                });
            }
            if !regions.contains(job.region.as_str()) {
                return Err(CatalogError::UnknownReference {
                    job: job.id.clone(),
                    kind: "region",
                    id: job.region.clone(),
                });
            }
        }
        Ok(())
    }

    /// Category dropdown options, led by "all" (value `""`).
    #[must_use]
    pub fn category_options(&self, locale: Locale) -> Vec<SelectOption> {
        facet_options(&self.categories, locale)
    }

    /// Region dropdown options, led by "all" (value `""`).
    #[must_use]
    pub fn region_options(&self, locale: Locale) -> Vec<SelectOption> {
        facet_options(&self.regions, locale)
    }

    /// Display name of a category id, or `None` for "all" and unknown ids.
    #[must_use]
    pub fn category_name(&self, id: &str, locale: Locale) -> Option<&str> {
        facet_name(&self.categories, id, locale)
    }

    /// Display name of a region id, or `None` for "all" and unknown ids.
    #[must_use]
    pub fn region_name(&self, id: &str, locale: Locale) -> Option<&str> {
        facet_name(&self.regions, id, locale)
    }
}

/// Label of the leading "all" option.
#[must_use]
pub const fn all_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Ka => "ყველა",
        Locale::En => "All",
    }
}

fn facet_ids<'a>(
    kind: &'static str,
    facets: &'a [Facet],
) -> Result<HashSet<&'a str>, CatalogError> {
    if facets.iter().any(|f| f.id.is_empty()) {
        return Err(CatalogError::EmptyId { kind });
    }
    unique_ids(kind, facets.iter().map(|f| f.id.as_str()))
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

fn facet_options(facets: &[Facet], locale: Locale) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", all_label(locale)))
        .chain(
            facets
                .iter()
                .map(|f| SelectOption::new(f.id.clone(), f.name.get(locale)).disabled(f.disabled)),
        )
        .collect()
}

fn facet_name<'a>(facets: &'a [Facet], id: &str, locale: Locale) -> Option<&'a str> {
    facets
        .iter()
        .find(|f| f.id == id)
        .map(|f| f.name.get(locale))
}
