//! Batch extraction over a whole dataset.
//!
//! Records are independent, so with the `parallel` feature they are spread
//! across a rayon pool. Output row `i` always belongs to input record `i`.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

use tracing::{debug, info};
#[cfg(feature = "parallel")]
use tracing::warn;

use crate::dataset::{Dataset, Labels, Record};
use crate::features::{FeatureExtractor, FeatureVector};
use crate::{HamusError, Result};

/// Feature rows aligned with their record ids and labels
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
    ids: Vec<Option<String>>,
    labels: Option<Labels>,
}

impl FeatureTable {
    /// Stack feature vectors into a table.
    ///
    /// Every vector must carry the same names in the same order as the
    /// first one.
    pub fn from_vectors(vectors: Vec<FeatureVector>, ids: Vec<Option<String>>, labels: Option<Labels>) -> Result<Self> {
        let columns: Vec<String> =
            vectors.first().map(|v| v.names().map(str::to_string).collect()).unwrap_or_default();

        if let Some(row) = vectors.iter().position(|v| !v.has_names(&columns)) {
            return Err(HamusError::InconsistentFeatures { row });
        }

        let rows = vectors.iter().map(FeatureVector::values).collect();
        Ok(Self { columns, rows, ids, labels })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn ids(&self) -> &[Option<String>] {
        &self.ids
    }

    pub fn labels(&self) -> Option<&Labels> {
        self.labels.as_ref()
    }

    /// Value of a named feature in one row
    pub fn get(&self, row: usize, name: &str) -> Option<f64> {
        let column = self.columns.iter().position(|c| c == name)?;
        self.rows.get(row).map(|r| r[column])
    }

    /// Every value of a named feature, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let column = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[column]).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Labels first, then one feature vector per record
pub(crate) fn extract_batch(extractor: &FeatureExtractor, dataset: &Dataset) -> Result<FeatureTable> {
    let start = Instant::now();
    let labels = dataset.labels()?;

    info!(records = dataset.len(), families = ?extractor.config().families, "Extracting features");

    let vectors = extract_rows(extractor, dataset.records());
    let ids = dataset.records().iter().map(|r| r.id.clone()).collect();
    let table = FeatureTable::from_vectors(vectors, ids, labels)?;

    info!(
        records = table.len(),
        features = table.columns().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Feature extraction finished"
    );

    Ok(table)
}

#[cfg(feature = "parallel")]
fn extract_rows(extractor: &FeatureExtractor, records: &[Record]) -> Vec<FeatureVector> {
    let run = || -> Vec<FeatureVector> { records.par_iter().map(|r| extractor.extract_record(r)).collect() };

    if let Some(threads) = extractor.config().threads {
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => {
                debug!(threads, "Using dedicated thread pool");
                return pool.install(run);
            }
            Err(e) => warn!(error = %e, "Could not build thread pool, using the global pool"),
        }
    }

    run()
}

#[cfg(not(feature = "parallel"))]
fn extract_rows(extractor: &FeatureExtractor, records: &[Record]) -> Vec<FeatureVector> {
    if extractor.config().threads.is_some() {
        debug!("Thread count ignored without the parallel feature");
    }
    records.iter().map(|r| extractor.extract_record(r)).collect()
}
