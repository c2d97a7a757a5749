use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::backend::PositionSource;
use crate::lifecycle::ViewLifecycle;

/// A job category and the roles listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCategory {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl PositionCategory {
    fn new(title: &str, items: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            items: items.iter().map(|item| item.to_string()).collect(),
        }
    }
}

const FALLBACK_POSITIONS: [(&str, [&str; 3]); 12] = [
    (
        "Agentic Builder",
        ["Internship Program", "Part-time", "Full-time"],
    ),
    (
        "Backend",
        ["Python Developer", "Node.js Developer", "Go Developer"],
    ),
    (
        "Content / Marketing",
        ["Content Creator", "Digital Marketing", "Social Media Manager"],
    ),
    (
        "Data Science",
        ["Data Analyst", "Data Engineer", "Machine Learning Engineer"],
    ),
    (
        "Graphic",
        ["Graphic Designer", "Motion Graphics", "Art Director"],
    ),
    (
        "Meta",
        ["Metaverse Developer", "3D Modeler", "Unity Developer"],
    ),
    ("NLP", ["NLP Engineer", "Linguist", "AI Researcher"]),
    (
        "Sales",
        ["Sales Executive", "Account Manager", "Business Development"],
    ),
    (
        "Software Development",
        ["Full Stack Developer", "Frontend Developer", "Software Engineer"],
    ),
    (
        "TTS/ASR",
        ["Speech Engineer", "Audio Engineer", "Signal Processing"],
    ),
    ("UX/UI", ["UX Researcher", "UI Designer", "Product Designer"]),
    (
        "Web App",
        ["React Developer", "Vue Developer", "Angular Developer"],
    ),
];

/// Compiled-in catalog shown until (and unless) the remote catalog arrives.
pub fn fallback_catalog() -> Vec<PositionCategory> {
    FALLBACK_POSITIONS
        .iter()
        .map(|(title, items)| PositionCategory::new(title, items))
        .collect()
}

/// Where the displayed catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    Fallback,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    pub positions: Vec<PositionCategory>,
    pub source: CatalogOrigin,
}

/// Result of the single catalog load attempt made per mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The remote catalog replaced the fallback.
    Replaced { count: usize },
    /// The remote catalog was empty.
    KeptFallback,
    /// The read was aborted; nothing logged, nothing changed.
    Aborted,
    /// The read failed; logged, fallback kept.
    Failed,
    /// The view unmounted before the read resolved.
    Discarded,
    /// A load was already attempted for this mount.
    Skipped,
}

/// Displayed catalog. Starts as the fallback and is only ever swapped wholesale for a
/// non-empty catalog, so it is never empty.
#[derive(Debug)]
pub struct CatalogState {
    current: Mutex<CatalogSnapshot>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(CatalogSnapshot {
                positions: fallback_catalog(),
                source: CatalogOrigin::Fallback,
            }),
        }
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn positions(&self) -> Vec<PositionCategory> {
        self.snapshot().positions
    }

    /// Swaps in a remote catalog. Empty catalogs are refused.
    pub fn replace(&self, positions: Vec<PositionCategory>) -> bool {
        if positions.is_empty() {
            return false;
        }
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = CatalogSnapshot {
            positions,
            source: CatalogOrigin::Remote,
        };
        true
    }

    /// Reads the remote catalog once and applies it if the view is still mounted.
    pub async fn load_from<S>(&self, source: &S, lifecycle: &ViewLifecycle) -> LoadOutcome
    where
        S: PositionSource,
    {
        let result = lifecycle.guard(source.fetch_positions()).await;

        if !lifecycle.is_mounted() {
            debug!("view unmounted before catalog resolved; discarding result");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(positions) => {
                let count = positions.len();
                if self.replace(positions) {
                    info!(count, "remote position catalog applied");
                    LoadOutcome::Replaced { count }
                } else {
                    info!("remote position catalog empty; keeping fallback");
                    LoadOutcome::KeptFallback
                }
            }
            Err(err) if err.is_aborted() => LoadOutcome::Aborted,
            Err(err) => {
                error!(error = %err, "error fetching positions");
                LoadOutcome::Failed
            }
        }
    }
}
