use std::path::Path;
use std::sync::Arc;

use foundation::bounds::ViewportBounds;
use foundation::coordinate::Coordinate;
use foundation::ids::TruckId;
use foundation::time::Timestamp;
use runtime::debounce::Debouncer;
use scene::{CategoryFilter, SortKey, TruckSelectionStore};
use streaming::{CameraEvent, InMemoryGateway, NearbyTrucks, QueryOutcome};
use tracing::{info, warn};

use crate::config::Config;
use crate::output::{TruckRow, render_json, render_table, rows};

/// How the list is narrowed, ordered and navigated.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub user_location: Option<Coordinate>,
    pub categories: Vec<String>,
    pub sort: Option<SortKey>,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct NearbyArgs {
    pub bounds: ViewportBounds,
    pub view: ViewOptions,
    pub select: Option<String>,
    /// Steps forward (positive) or backward (negative) from the selection.
    pub step: i32,
}

#[derive(Debug, Clone)]
pub struct ReplayArgs {
    pub events: Vec<CameraEvent>,
    pub view: ViewOptions,
}

fn load_pipeline(config: &Config) -> Result<NearbyTrucks, String> {
    let gateway = InMemoryGateway::from_json_file(&config.trucks_path)
        .map_err(|e| format!("load trucks from {:?}: {e}", config.trucks_path))?;
    info!(
        trucks = gateway.len(),
        path = %config.trucks_path.display(),
        "loaded truck fixture"
    );
    Ok(NearbyTrucks::new(Arc::new(gateway)))
}

fn configure_store(store: &mut TruckSelectionStore, view: &ViewOptions) {
    store.set_category_filters(view.categories.iter().cloned().collect::<CategoryFilter>());
    store.set_sort_key(view.sort);
}

fn render(store: &TruckSelectionStore, json: bool) -> Result<String, String> {
    let table: Vec<TruckRow> = rows(&store.visible_trucks(), store.selected_truck_id());
    if json {
        render_json(&table).map(|s| s + "\n")
    } else {
        Ok(render_table(&table))
    }
}

/// Query one viewport and print the ranked list.
pub async fn cmd_nearby(config: &Config, args: NearbyArgs) -> Result<String, String> {
    let mut pipeline = load_pipeline(config)?;
    pipeline.set_user_location(args.view.user_location.or(config.user_location));

    if let Some(QueryOutcome::Failed { message, .. }) = pipeline.refresh(Some(args.bounds)).await {
        return Err(format!("viewport query failed: {message}"));
    }

    let store = pipeline.store();
    let mut store = store.write();
    configure_store(&mut store, &args.view);

    if let Some(id) = &args.select {
        if !store.select_truck(&TruckId::new(id.as_str())) {
            warn!("truck {id} is not in the current view; nothing selected");
        }
    }
    for _ in 0..args.step.unsigned_abs() {
        let moved = if args.step > 0 {
            store.next_truck()
        } else {
            store.previous_truck()
        };
        if !moved {
            break;
        }
    }

    render(&store, args.view.json)
}

/// Replay a recorded camera session and print the list after every settle.
pub async fn cmd_replay(config: &Config, args: ReplayArgs) -> Result<String, String> {
    let mut pipeline = load_pipeline(config)?;
    pipeline.set_user_location(args.view.user_location.or(config.user_location));
    configure_store(&mut pipeline.store().write(), &args.view);

    let mut debouncer = Debouncer::new(config.settle);
    let mut out = String::new();
    let mut settles = 0usize;

    let mut events = args.events;
    events.sort_by_key(|e| e.at_ms);

    for event in &events {
        let now = Timestamp::from_millis(event.at_ms);
        if let Some(deadline) = debouncer.deadline() {
            if let Some(bounds) = debouncer.poll(now) {
                settles += 1;
                out.push_str(&settle_report(&mut pipeline, deadline, bounds, args.view.json).await?);
            }
        }
        debouncer.push(now, event.bounds);
    }
    if let Some(deadline) = debouncer.deadline() {
        if let Some(bounds) = debouncer.poll(deadline) {
            settles += 1;
            out.push_str(&settle_report(&mut pipeline, deadline, bounds, args.view.json).await?);
        }
    }

    info!(
        events = events.len(),
        settles,
        settle_ms = debouncer.quiet().as_millis(),
        "replay finished"
    );
    Ok(out)
}

async fn settle_report(
    pipeline: &mut NearbyTrucks,
    at: Timestamp,
    bounds: ViewportBounds,
    json: bool,
) -> Result<String, String> {
    let mut report = format!("-- settled at {} ms\n", at.as_millis());
    match pipeline.refresh(Some(bounds)).await {
        Some(QueryOutcome::Failed { message, .. }) => {
            report.push_str(&format!("query failed: {message}\n"));
        }
        _ => {
            let store = pipeline.store();
            let store = store.read();
            report.push_str(&render(&store, json)?);
        }
    }
    Ok(report)
}

/// Read a recorded camera session (`[{"atMs": .., "bounds": {..}}]`).
pub fn load_camera_events(path: &Path) -> Result<Vec<CameraEvent>, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("read {path:?}: {e}"))?;
    serde_json::from_slice(&bytes).map_err(|e| format!("parse {path:?}: {e}"))
}
