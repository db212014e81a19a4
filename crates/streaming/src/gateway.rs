//! Contract for the backend viewport query.
//!
//! The backend owns query execution; this module only fixes the call shape
//! and ships an in-memory implementation for local runs and tests.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use parking_lot::RwLock;
use scene::Truck;

use crate::error::GatewayError;
use crate::protocol::ViewportQuery;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of trucks inside a bounding box.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility. No retry, paging or
/// caching is expected of an implementation.
pub trait TruckQueryGateway: Send + Sync {
    fn trucks_in_viewport(
        &self,
        query: ViewportQuery,
    ) -> BoxFuture<'_, Result<Vec<Truck>, GatewayError>>;
}

/// Gateway over a fixed list of trucks.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    trucks: RwLock<Vec<Truck>>,
}

impl InMemoryGateway {
    pub fn new(trucks: Vec<Truck>) -> Self {
        Self {
            trucks: RwLock::new(trucks),
        }
    }

    /// Load a JSON array of trucks in the backend's record shape.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let bytes = std::fs::read(path.as_ref())?;
        let trucks: Vec<Truck> = serde_json::from_slice(&bytes)?;
        Ok(Self::new(trucks))
    }

    /// Swap in a new truck list, as if vendors had moved.
    pub fn replace(&self, trucks: Vec<Truck>) {
        *self.trucks.write() = trucks;
    }

    pub fn len(&self) -> usize {
        self.trucks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.read().is_empty()
    }

    fn query_now(&self, query: ViewportQuery) -> Vec<Truck> {
        self.trucks
            .read()
            .iter()
            .filter(|t| query.contains(t.coordinate))
            .cloned()
            .collect()
    }
}

impl TruckQueryGateway for InMemoryGateway {
    fn trucks_in_viewport(
        &self,
        query: ViewportQuery,
    ) -> BoxFuture<'_, Result<Vec<Truck>, GatewayError>> {
        let hits = self.query_now(query);
        Box::pin(async move { Ok(hits) })
    }
}
