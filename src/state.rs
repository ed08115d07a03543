use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::data::filter::{Criteria, select_with_limit};
use crate::data::loader::{LoadReport, load_and_normalize};
use crate::data::model::{Listing, ListingTable};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// File the current table was read from.
    pub source_path: Option<PathBuf>,

    /// Loaded table (None until a file loads).  Replaced wholesale on reload.
    pub table: Option<Arc<ListingTable>>,

    /// Row counts of the last successful load.
    pub report: Option<LoadReport>,

    /// Current filter selections.
    pub criteria: Criteria,

    /// Top rows for the current criteria (cached).
    pub results: Vec<Listing>,

    /// Matches before truncation.
    pub total_matches: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            source_path: None,
            table: None,
            report: None,
            criteria: Criteria::default(),
            results: Vec::new(),
            total_matches: 0,
            status_message: None,
        }
    }

    /// Load `path`, replacing the current table on success.  On failure the
    /// previous table stays in place and the error lands in `status_message`.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let outcome = load_and_normalize(path, &self.settings)
            .with_context(|| format!("loading {}", path.display()));

        match outcome {
            Ok((table, report)) => {
                self.source_path = Some(path.to_path_buf());
                self.set_table(table, report);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    /// Re-read the current source file.  Criteria are kept.
    pub fn reload(&mut self) -> Result<()> {
        let path = self
            .source_path
            .clone()
            .context("no file loaded yet")?;
        let criteria = self.criteria.clone();
        self.open(&path)?;
        self.criteria = criteria;
        self.refilter();
        Ok(())
    }

    /// Ingest a newly loaded table and reset filters to their initial values.
    pub fn set_table(&mut self, table: ListingTable, report: LoadReport) {
        self.criteria = Criteria::initial_for(&table);
        self.table = Some(Arc::new(table));
        self.report = Some(report);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `results` after a criteria change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            self.results.clear();
            self.total_matches = 0;
            return;
        };
        let selection = select_with_limit(&table.listings, &self.criteria, self.settings.result_limit);
        self.total_matches = selection.total_matches;
        self.results = selection.rows.into_iter().cloned().collect();
    }
}
