//! Driving port for finding developers who have not submitted timesheets.

use async_trait::async_trait;

use crate::domain::Error;

/// Port answering "who is late right now?".
///
/// Implementations must be deterministic for a fixed data snapshot and return
/// an empty list, not an error, when nobody is late.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LateDevelopersQuery: Send + Sync {
    /// Return the chat identifiers of late developers, in a stable order.
    async fn find_late_developers(&self) -> Result<Vec<String>, Error>;
}

/// Fixture query returning a fixed list of identifiers.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FixtureLateDevelopersQuery {
    ids: Vec<String>,
}

#[cfg(any(test, feature = "test-support"))]
impl FixtureLateDevelopersQuery {
    /// Build a fixture that always returns `ids`.
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl LateDevelopersQuery for FixtureLateDevelopersQuery {
    async fn find_late_developers(&self) -> Result<Vec<String>, Error> {
        Ok(self.ids.clone())
    }
}
