//! User preference sets and CSV loading
//!
//! Input rows are `user, label, label, ...` with no fixed schema beyond the
//! first field being the user identifier. Labels are normalized on the way in
//! and stop words are dropped. Malformed rows are skipped and reported; they
//! never abort a load.

use crate::error::{Error, Result};
use crate::normalize::TextNormalizer;
use crate::{Category, CategorySet};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Options controlling how input rows are read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoadOptions {
    /// Skip the first row as a header
    pub has_headers: bool,
    /// Split each cell on commas, for cells holding a quoted list of labels
    pub split_cells: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_headers: false,
            split_cells: true,
        }
    }
}

/// A row that was not loaded
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

/// Summary of a load
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub users_loaded: usize,
    /// Labels dropped as stop words or noise
    pub labels_dropped: usize,
    /// Users that appeared on more than one row; the last row wins
    pub duplicate_users: Vec<String>,
    pub skipped: Vec<SkippedRow>,
}

/// Per-user normalized category sets, in first-seen order
///
/// Built once per load and read-only afterwards; user indices match the
/// rows and columns of any matrix built from it.
#[derive(Debug, Clone, Default)]
pub struct UserPreferences {
    users: Vec<String>,
    sets: Vec<CategorySet>,
    index: AHashMap<String, usize>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user's set
    ///
    /// A replaced user keeps its original position. Returns true on replace.
    pub fn insert(&mut self, user: impl Into<String>, categories: CategorySet) -> bool {
        let user = user.into();
        match self.index.get(&user) {
            Some(&i) => {
                self.sets[i] = categories;
                true
            }
            None => {
                self.index.insert(user.clone(), self.users.len());
                self.users.push(user);
                self.sets.push(categories);
                false
            }
        }
    }

    /// Read rows from any CSV source
    pub fn from_reader<R: io::Read>(
        reader: R,
        normalizer: &TextNormalizer,
        options: &LoadOptions,
    ) -> Result<(Self, LoadReport)> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(options.has_headers)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut loader = Loader::new(normalizer, options);
        let offset = usize::from(options.has_headers);

        // Physical line of a record; blank lines are skipped by the reader,
        // so the record counter is only a fallback.
        let line_of = |position: Option<&csv::Position>, idx: usize| {
            position.map_or(idx + 1 + offset, |p| p.line() as usize)
        };

        for (idx, result) in csv_reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let line = line_of(record.position(), idx);
                    let fields: Vec<&str> = record.iter().collect();
                    loader.ingest(line, &fields);
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => loader.skip(Error::InvalidRow {
                    line: line_of(e.position(), idx),
                    reason: e.to_string(),
                }),
            }
        }

        Ok(loader.finish())
    }

    /// Load a CSV file
    pub fn load_csv<P: AsRef<Path>>(
        path: P,
        normalizer: &TextNormalizer,
        options: &LoadOptions,
    ) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let (prefs, report) = Self::from_reader(file, normalizer, options)?;
        info!(
            "Loaded {} users from {} ({} rows skipped)",
            report.users_loaded,
            path.display(),
            report.skipped.len()
        );
        Ok((prefs, report))
    }

    /// Build from in-memory rows; each row is `[user, label, label, ...]`
    pub fn from_rows<I, R, S>(
        rows: I,
        normalizer: &TextNormalizer,
        options: &LoadOptions,
    ) -> (Self, LoadReport)
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut loader = Loader::new(normalizer, options);
        for (idx, row) in rows.into_iter().enumerate() {
            let owned: Vec<S> = row.into_iter().collect();
            let fields: Vec<&str> = owned.iter().map(|s| s.as_ref().trim()).collect();
            loader.ingest(idx + 1, &fields);
        }
        loader.finish()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// User identifiers in index order
    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn index_of(&self, user: &str) -> Option<usize> {
        self.index.get(user).copied()
    }

    pub fn get(&self, user: &str) -> Option<&CategorySet> {
        self.index_of(user).map(|i| &self.sets[i])
    }

    /// Category set of the user at `index`
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn categories_at(&self, index: usize) -> &CategorySet {
        &self.sets[index]
    }

    pub fn sets(&self) -> &[CategorySet] {
        &self.sets
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategorySet)> {
        self.users.iter().map(String::as_str).zip(self.sets.iter())
    }

    /// Every category used by at least one user
    pub fn all_categories(&self) -> CategorySet {
        self.sets.iter().flatten().cloned().collect()
    }

    /// Number of users per category, most popular first, ties by name
    pub fn category_popularity(&self) -> Vec<(Category, usize)> {
        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for category in self.sets.iter().flatten() {
            *counts.entry(category.as_str()).or_insert(0) += 1;
        }

        let mut popularity: Vec<(Category, usize)> = counts
            .into_iter()
            .map(|(c, n)| (c.to_string(), n))
            .collect();
        popularity.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        popularity
    }
}

struct Loader<'a> {
    normalizer: &'a TextNormalizer,
    options: &'a LoadOptions,
    prefs: UserPreferences,
    report: LoadReport,
}

impl<'a> Loader<'a> {
    fn new(normalizer: &'a TextNormalizer, options: &'a LoadOptions) -> Self {
        Self {
            normalizer,
            options,
            prefs: UserPreferences::new(),
            report: LoadReport::default(),
        }
    }

    fn ingest(&mut self, line: usize, fields: &[&str]) {
        self.report.rows_read += 1;
        match self.parse_row(line, fields) {
            Ok((user, categories)) => {
                debug!(user = %user, categories = categories.len(), "row loaded");
                if self.prefs.insert(user.clone(), categories) {
                    warn!(
                        "User '{}' appears more than once; line {} replaces earlier row",
                        user, line
                    );
                    self.report.duplicate_users.push(user);
                }
            }
            Err(e) => self.skip(e),
        }
    }

    fn parse_row(&mut self, line: usize, fields: &[&str]) -> Result<(String, CategorySet)> {
        let Some((user, labels)) = fields.split_first() else {
            return Err(Error::InvalidRow {
                line,
                reason: "empty row".to_string(),
            });
        };

        let user = user.trim();
        if user.is_empty() {
            let reason = if labels.iter().all(|l| l.trim().is_empty()) {
                "empty row"
            } else {
                "missing user identifier"
            };
            return Err(Error::InvalidRow {
                line,
                reason: reason.to_string(),
            });
        }

        let mut categories = CategorySet::new();
        for cell in labels {
            let pieces: Vec<&str> = if self.options.split_cells {
                cell.split(',').collect()
            } else {
                vec![*cell]
            };

            for label in pieces.into_iter().map(str::trim).filter(|l| !l.is_empty()) {
                let category = self.normalizer.normalize(label);
                if self.normalizer.is_stop_word(&category) {
                    self.report.labels_dropped += 1;
                    continue;
                }
                categories.insert(category);
            }
        }

        Ok((user.to_string(), categories))
    }

    fn skip(&mut self, err: Error) {
        warn!("{}; skipping row", err);
        if let Error::InvalidRow { line, reason } = err {
            self.report.skipped.push(SkippedRow { line, reason });
        }
    }

    fn finish(mut self) -> (UserPreferences, LoadReport) {
        self.report.users_loaded = self.prefs.len();
        (self.prefs, self.report)
    }
}
