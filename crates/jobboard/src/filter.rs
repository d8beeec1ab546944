//! Job filtering.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Job, Locale};

/// The active search: category, region and keyword. Empty strings mean
/// "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub keyword: String,
}

impl Filter {
    /// Whether the filter narrows nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.region.is_empty() && self.keyword.trim().is_empty()
    }

    /// Whether `job` passes the filter.
    ///
    /// The keyword matches case-insensitively against the title in either
    /// language and the company name.
    #[must_use]
    pub fn matches(&self, job: &Job) -> bool {
        if !self.category.is_empty() && job.category != self.category {
            return false;
        }
        if !self.region.is_empty() && job.region != self.region {
            return false;
        }
        let keyword = self.keyword.trim().to_lowercase();
        keyword.is_empty()
            || job.title.contains_lowercase(&keyword)
            || job.company.to_lowercase().contains(&keyword)
    }

    /// Jobs in catalog order that pass the filter.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Job> {
        catalog.jobs.iter().filter(|job| self.matches(job)).collect()
    }

    /// One-line summary, e.g. `IT / Programming · Tbilisi · "rust"`.
    #[must_use]
    pub fn describe(&self, catalog: &Catalog, locale: Locale) -> String {
        let mut parts = Vec::new();
        if let Some(name) = catalog.category_name(&self.category, locale) {
            parts.push(name.to_string());
        }
        if let Some(name) = catalog.region_name(&self.region, locale) {
            parts.push(name.to_string());
        }
        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            parts.push(format!("\"{keyword}\""));
        }
        if parts.is_empty() {
            parts.push(crate::catalog::all_label(locale).to_string());
        }
        parts.join(" · ")
    }
}
