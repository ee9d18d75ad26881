//! Failure isolation for enrichment sub-fetches.
//!
//! Every optional lookup (a group roster, an organization's UDFs, an
//! employee's supervisor, ...) goes through [`Diagnostics::attempt`]: on
//! failure the error is logged, recorded, and replaced with the type's empty
//! value so the surrounding row is still emitted.

use std::fmt::Display;
use std::future::Future;

/// One recovered enrichment failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentFailure {
    /// What was being fetched, e.g. `"group members"`.
    pub category: &'static str,
    /// Id of the node or employee the fetch was for.
    pub subject: String,
    pub message: String,
}

/// Accumulates recovered failures for one extraction pass.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    failures: Vec<EnrichmentFailure>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Awaits `fut`, returning its value, or `T::default()` after recording the error.
    pub async fn attempt<T, E, F>(&mut self, category: &'static str, subject: &str, fut: F) -> T
    where
        T: Default,
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        match fut.await {
            Ok(value) => value,
            Err(err) => {
                self.record(category, subject, &err);
                T::default()
            }
        }
    }

    /// Records a failure that the caller has already recovered from.
    pub fn record(&mut self, category: &'static str, subject: &str, err: &dyn Display) {
        tracing::warn!(
            "{} fetch failed for {}, continuing without it: {}",
            category,
            subject,
            err
        );
        self.failures.push(EnrichmentFailure {
            category,
            subject: subject.to_string(),
            message: err.to_string(),
        });
    }

    pub fn failures(&self) -> &[EnrichmentFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures recorded for a given category.
    pub fn count(&self, category: &str) -> usize {
        self.failures.iter().filter(|f| f.category == category).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_passes_value_through() {
        let mut diag = Diagnostics::new();
        let v: Vec<u8> = diag
            .attempt("roster", "g1", async { Ok::<_, String>(vec![1, 2]) })
            .await;
        assert_eq!(v, vec![1, 2]);
        assert!(diag.is_empty());
    }

    #[tokio::test]
    async fn failure_yields_default_and_is_recorded() {
        let mut diag = Diagnostics::new();
        let v: Vec<u8> = diag
            .attempt("roster", "g1", async { Err::<Vec<u8>, _>("boom") })
            .await;
        assert!(v.is_empty());
        assert_eq!(diag.len(), 1);
        assert_eq!(
            diag.failures()[0],
            EnrichmentFailure {
                category: "roster",
                subject: "g1".to_string(),
                message: "boom".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn counts_by_category() {
        let mut diag = Diagnostics::new();
        let _: Option<u8> = diag.attempt("udfs", "o1", async { Err::<Option<u8>, _>("x") }).await;
        let _: Option<u8> = diag.attempt("udfs", "o2", async { Err::<Option<u8>, _>("y") }).await;
        let _: Option<u8> = diag
            .attempt("skills", "o1", async { Err::<Option<u8>, _>("z") })
            .await;
        assert_eq!(diag.count("udfs"), 2);
        assert_eq!(diag.count("skills"), 1);
        assert_eq!(diag.count("job titles"), 0);
    }
}
