//! Collaborators the selector depends on, bundled into one context

use crate::{Error, Result, SelectorConfig};
use std::collections::HashMap;
use std::sync::Arc;
use sync_model::{Resource, ResourcePath, SyncRecord};

/// Source of sync records, refreshed out of band.
pub trait SyncInfoProvider: Send + Sync {
    /// The record for `resource`, `None` when it is in sync or unknown.
    fn sync_info(&self, resource: &Resource) -> Result<Option<Arc<SyncRecord>>>;
}

/// Receives failures that are swallowed so a selection can still complete.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, context: &str, error: &Error);
}

/// Reports through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, context: &str, error: &Error) {
        tracing::error!(context, %error, "Selection step failed; entry excluded");
    }
}

/// Immutable set of records for one refresh cycle, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct SyncSnapshot {
    records: HashMap<ResourcePath, Arc<SyncRecord>>,
}

impl SyncSnapshot {
    pub fn new(records: impl IntoIterator<Item = SyncRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.resource().path.clone(), Arc::new(record)))
                .collect(),
        }
    }

    pub fn get(&self, path: &ResourcePath) -> Option<&Arc<SyncRecord>> {
        self.records.get(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resources with a record, sorted by path.
    pub fn resources(&self) -> Vec<Resource> {
        let mut resources: Vec<Resource> =
            self.records.values().map(|record| record.resource().clone()).collect();
        resources.sort();
        resources
    }
}

impl SyncInfoProvider for SyncSnapshot {
    fn sync_info(&self, resource: &Resource) -> Result<Option<Arc<SyncRecord>>> {
        Ok(self.records.get(&resource.path).cloned())
    }
}

/// Everything a selection or a command dispatch needs, passed explicitly.
#[derive(Clone)]
pub struct SyncContext {
    provider: Arc<dyn SyncInfoProvider>,
    reporter: Arc<dyn ErrorReporter>,
    config: SelectorConfig,
}

impl SyncContext {
    pub fn new(provider: Arc<dyn SyncInfoProvider>) -> Self {
        Self {
            provider,
            reporter: Arc::new(TracingReporter),
            config: SelectorConfig::default(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_config(mut self, config: SelectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn SyncInfoProvider {
        self.provider.as_ref()
    }

    /// Look up a record, reporting failures and treating them as absent.
    pub fn lookup(&self, resource: &Resource) -> Option<Arc<SyncRecord>> {
        match self.provider.sync_info(resource) {
            Ok(record) => record,
            Err(error) => {
                self.reporter.report(resource.path.as_str(), &error);
                None
            }
        }
    }

    /// Like [`SyncContext::lookup`], but tells a failure apart from a gap.
    pub(crate) fn probe(&self, resource: &Resource) -> Probe {
        match self.provider.sync_info(resource) {
            Ok(Some(record)) => Probe::Found(record),
            Ok(None) => Probe::Missing,
            Err(error) => {
                self.reporter.report(resource.path.as_str(), &error);
                Probe::Failed
            }
        }
    }
}

/// Outcome of a record lookup during the ancestor walk.
pub(crate) enum Probe {
    Found(Arc<SyncRecord>),
    Missing,
    Failed,
}

impl std::fmt::Debug for SyncContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncContext").field("config", &self.config).finish_non_exhaustive()
    }
}
