use crate::aggregate::{ConsistencyReport, StructureAggregator};
use crate::analysis::engine::{AnalysisEngine, FileAnalysis};
use crate::error::AnalysisError;
use crate::parser::JsonSource;
use rayon::prelude::*;
use serde::Serialize;

/// Worker stack size; parsing recurses once per nesting level up to
/// `MAX_DEPTH_CEILING`
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// A source that could not be analyzed
#[derive(Debug, Serialize)]
pub struct BatchFailure {
    pub id: String,
    pub message: String,
    #[serde(skip)]
    pub error: AnalysisError,
}

/// Outcome of analyzing several sources together
#[derive(Debug)]
pub struct BatchAnalysis {
    /// Successful analyses, in input order
    pub analyses: Vec<FileAnalysis>,
    pub failures: Vec<BatchFailure>,
    /// Consistency view over the successful analyses
    pub report: ConsistencyReport,
}

impl AnalysisEngine {
    /// Analyze labelled sources and aggregate their structures.
    ///
    /// A source that fails (invalid JSON, too deep, too large) is recorded
    /// as a failure and left out of the aggregation; the rest of the batch
    /// still runs.
    pub fn analyze_batch(&self, sources: &[(String, JsonSource)]) -> BatchAnalysis {
        self.analyze_batch_with(sources, |_| {})
    }

    /// Like [`AnalysisEngine::analyze_batch`], calling `on_done` with each
    /// source id once its extraction finishes.
    pub fn analyze_batch_with<F>(&self, sources: &[(String, JsonSource)], on_done: F) -> BatchAnalysis
    where
        F: Fn(&str) + Sync,
    {
        // Extraction is independent per source; aggregation below is sequential
        let extract_all = || -> Vec<_> {
            sources
                .par_iter()
                .map(|(id, source)| {
                    let result = self.analyze_source(id, source);
                    on_done(id.as_str());
                    (id, result)
                })
                .collect()
        };

        let results = match rayon::ThreadPoolBuilder::new()
            .stack_size(WORKER_STACK_SIZE)
            .build()
        {
            Ok(pool) => pool.install(extract_all),
            Err(error) => {
                tracing::warn!(error = %error, "falling back to the global thread pool");
                extract_all()
            }
        };

        let mut aggregator = StructureAggregator::new();
        let mut analyses = Vec::new();
        let mut failures = Vec::new();

        for (id, result) in results {
            match result.and_then(|analysis| {
                aggregator.add(&analysis.structure)?;
                Ok(analysis)
            }) {
                Ok(analysis) => analyses.push(analysis),
                Err(error) => {
                    tracing::warn!(file = id.as_str(), error = %error, "skipping file");
                    failures.push(BatchFailure {
                        id: id.clone(),
                        message: error.user_message(),
                        error,
                    });
                }
            }
        }

        let report = aggregator.finish();
        tracing::info!(
            files = report.file_count,
            failed = failures.len(),
            paths = report.entries.len(),
            conflicts = report.conflicts.len(),
            "batch analysis finished"
        );

        BatchAnalysis {
            analyses,
            failures,
            report,
        }
    }
}
