use std::sync::Arc;

use foundation::bounds::ViewportBounds;
use foundation::coordinate::Coordinate;
use parking_lot::RwLock;
use scene::{FetchStatus, Truck, TruckSelectionStore, annotate};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::gateway::TruckQueryGateway;
use crate::protocol::ViewportQuery;
use crate::request::{Request, RequestSequencer};

/// Store handle shared between the query loop and whatever renders it.
pub type SharedStore = Arc<RwLock<TruckSelectionStore>>;

/// What happened to one viewport query's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Trucks replaced the store contents.
    Applied { request: Request, trucks: usize },
    /// A newer query was already applied; the response was dropped.
    Stale { request: Request },
    /// The backend failed; the previous trucks stay visible.
    Failed { request: Request, message: String },
}

/// Viewport-driven nearby-truck retrieval.
///
/// Data flow: settled bounds → [`TruckQueryGateway`] → [`annotate`] →
/// [`TruckSelectionStore`]. Filtering and sorting happen when the store's
/// view is read.
///
/// Notes:
/// - No query is issued while bounds are unknown.
/// - While a query is in flight the old trucks stay in the store.
/// - Responses are applied in arrival order, except that a response older
///   than one already settled (applied or failed) is discarded.
/// - Fetch failures never escape: they keep the last trucks and set
///   [`FetchStatus::Failed`].
pub struct NearbyTrucks {
    gateway: Arc<dyn TruckQueryGateway>,
    store: SharedStore,
    sequencer: RequestSequencer,
    last_result: Vec<Truck>,
    user_location: Option<Coordinate>,
}

impl NearbyTrucks {
    pub fn new(gateway: Arc<dyn TruckQueryGateway>) -> Self {
        Self::with_store(gateway, Arc::new(RwLock::new(TruckSelectionStore::new())))
    }

    pub fn with_store(gateway: Arc<dyn TruckQueryGateway>, store: SharedStore) -> Self {
        Self {
            gateway,
            store,
            sequencer: RequestSequencer::new(),
            last_result: Vec::new(),
            user_location: None,
        }
    }

    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    /// Start a query for `bounds`, or do nothing while bounds are unknown.
    pub fn begin(&mut self, bounds: Option<ViewportBounds>) -> Option<(Request, ViewportQuery)> {
        let bounds = bounds?;
        let request = self.sequencer.issue();
        let query = ViewportQuery::from(bounds);
        self.store.write().set_fetch_status(FetchStatus::Loading);
        debug!(
            %request,
            top_lat = query.top_lat,
            bottom_lat = query.bottom_lat,
            left_lng = query.left_lng,
            right_lng = query.right_lng,
            "issuing viewport query"
        );
        Some((request, query))
    }

    /// Apply the response for `request`.
    pub fn complete(
        &mut self,
        request: Request,
        result: Result<Vec<Truck>, GatewayError>,
    ) -> QueryOutcome {
        match result {
            Ok(trucks) => {
                if !self.sequencer.try_apply(request) {
                    debug!(%request, "discarding response superseded by a newer query");
                    return QueryOutcome::Stale { request };
                }
                let count = trucks.len();
                self.last_result = trucks;
                let annotated = annotate(&self.last_result, self.user_location);

                let mut store = self.store.write();
                store.set_trucks(annotated);
                store.set_fetch_status(if self.sequencer.has_outstanding() {
                    FetchStatus::Loading
                } else {
                    FetchStatus::Ready
                });
                debug!(%request, trucks = count, "applied viewport query");
                QueryOutcome::Applied {
                    request,
                    trucks: count,
                }
            }
            Err(err) => {
                if !self.sequencer.try_settle(request) {
                    debug!(%request, "ignoring failure of a superseded query");
                    return QueryOutcome::Stale { request };
                }
                let message = err.to_string();
                warn!(%request, error = %message, "viewport query failed; keeping last trucks");
                // A newer query may still succeed; only the latest one reports failure.
                if self.sequencer.latest_issued() == Some(request) {
                    self.store
                        .write()
                        .set_fetch_status(FetchStatus::Failed(message.clone()));
                }
                QueryOutcome::Failed { request, message }
            }
        }
    }

    /// Recompute distances of the last accepted trucks for a new location.
    pub fn set_user_location(&mut self, location: Option<Coordinate>) {
        self.user_location = location;
        let annotated = annotate(&self.last_result, location);
        self.store.write().set_trucks(annotated);
    }

    /// Query the gateway for `bounds` and apply the answer.
    ///
    /// Returns `None` without touching the gateway while bounds are unknown.
    pub async fn refresh(&mut self, bounds: Option<ViewportBounds>) -> Option<QueryOutcome> {
        let (request, query) = self.begin(bounds)?;
        let result = self.gateway.trucks_in_viewport(query).await;
        Some(self.complete(request, result))
    }

    /// Drive the pipeline from settled bounds and location updates.
    ///
    /// Every bounds change issues a query immediately; queries may overlap.
    /// Returns once the bounds sender is gone and no query is in flight.
    pub async fn run(
        &mut self,
        mut bounds_rx: watch::Receiver<Option<ViewportBounds>>,
        mut location_rx: watch::Receiver<Option<Coordinate>>,
    ) {
        let mut in_flight: JoinSet<(Request, Result<Vec<Truck>, GatewayError>)> = JoinSet::new();

        let location = *location_rx.borrow_and_update();
        self.set_user_location(location);
        let bounds = *bounds_rx.borrow_and_update();
        self.spawn_query(bounds, &mut in_flight);

        let mut bounds_open = true;
        let mut location_open = true;
        info!("nearby truck pipeline started");

        loop {
            if !bounds_open && in_flight.is_empty() {
                break;
            }

            tokio::select! {
                changed = bounds_rx.changed(), if bounds_open => {
                    if changed.is_err() {
                        bounds_open = false;
                        continue;
                    }
                    let bounds = *bounds_rx.borrow_and_update();
                    self.spawn_query(bounds, &mut in_flight);
                }
                changed = location_rx.changed(), if location_open => {
                    if changed.is_err() {
                        location_open = false;
                        continue;
                    }
                    let location = *location_rx.borrow_and_update();
                    self.set_user_location(location);
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    match joined {
                        Ok((request, result)) => {
                            self.complete(request, result);
                        }
                        Err(err) => warn!(error = %err, "viewport query task failed"),
                    }
                }
                else => break,
            }
        }

        info!("nearby truck pipeline stopped");
    }

    fn spawn_query(
        &mut self,
        bounds: Option<ViewportBounds>,
        in_flight: &mut JoinSet<(Request, Result<Vec<Truck>, GatewayError>)>,
    ) {
        let Some((request, query)) = self.begin(bounds) else {
            return;
        };
        let gateway = Arc::clone(&self.gateway);
        in_flight.spawn(async move {
            let result = gateway.trucks_in_viewport(query).await;
            (request, result)
        });
    }
}
