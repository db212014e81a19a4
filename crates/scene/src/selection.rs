use foundation::ids::TruckId;
use tracing::debug;

use crate::query::{CategoryFilter, SortKey, apply};
use crate::truck::Truck;

/// Status of the most recent viewport fetch, for a non-blocking indicator.
///
/// None of these states clear the truck list: while `Loading` or after
/// `Failed` the last accepted trucks stay visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Session-scoped truck state: the last accepted trucks, the active filter and
/// sort, and the selected truck.
///
/// Selection contract:
/// - `selected` is either `None` or the id of a truck in [`Self::visible_trucks`].
/// - Any mutation that removes the selected truck from the view clears it.
/// - Invalid requests (unknown id, navigating with nothing selected) are
///   silent no-ops; nothing here panics.
#[derive(Debug, Clone, Default)]
pub struct TruckSelectionStore {
    all_trucks: Vec<Truck>,
    selected: Option<TruckId>,
    category_filters: CategoryFilter,
    sort_key: Option<SortKey>,
    fetch_status: FetchStatus,
}

impl TruckSelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_trucks(&self) -> &[Truck] {
        &self.all_trucks
    }

    pub fn selected_truck_id(&self) -> Option<&TruckId> {
        self.selected.as_ref()
    }

    pub fn selected_truck(&self) -> Option<&Truck> {
        let id = self.selected.as_ref()?;
        self.all_trucks.iter().find(|t| &t.id == id)
    }

    pub fn category_filters(&self) -> &CategoryFilter {
        &self.category_filters
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn fetch_status(&self) -> &FetchStatus {
        &self.fetch_status
    }

    pub fn set_fetch_status(&mut self, status: FetchStatus) {
        self.fetch_status = status;
    }

    /// The filtered and sorted list that the UI renders.
    pub fn visible_trucks(&self) -> Vec<Truck> {
        apply(&self.all_trucks, &self.category_filters, self.sort_key)
    }

    /// Replace the whole truck set. No merging with the previous set.
    pub fn set_trucks(&mut self, trucks: Vec<Truck>) {
        self.all_trucks = trucks;
        self.reconcile_selection();
    }

    pub fn set_category_filters(&mut self, filters: CategoryFilter) {
        self.category_filters = filters;
        self.reconcile_selection();
    }

    /// Add `category` to the filter set, or remove it if already present.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.category_filters.remove(category) {
            self.category_filters.insert(category);
        }
        self.reconcile_selection();
    }

    pub fn set_sort_key(&mut self, sort_key: Option<SortKey>) {
        self.sort_key = sort_key;
    }

    /// Select `id` if it is in the current view.
    ///
    /// Returns `true` if the selection changed.
    pub fn select_truck(&mut self, id: &TruckId) -> bool {
        if self.selected.as_ref() == Some(id) {
            return false;
        }
        if !self.visible_ids().any(|v| v == id) {
            debug!(%id, "ignoring selection of truck outside the current view");
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move to the next truck in the view. Stops at the last one.
    pub fn next_truck(&mut self) -> bool {
        self.step(1)
    }

    /// Move to the previous truck in the view. Stops at the first one.
    pub fn previous_truck(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        let Some(current) = self.selected.as_ref() else {
            return false;
        };
        let view = self.visible_trucks();
        let Some(index) = view.iter().position(|t| &t.id == current) else {
            return false;
        };
        let Some(target) = index.checked_add_signed(delta) else {
            return false;
        };
        let Some(truck) = view.get(target) else {
            return false;
        };
        self.selected = Some(truck.id.clone());
        true
    }

    fn visible_ids(&self) -> impl Iterator<Item = &TruckId> + '_ {
        // Sorting never changes membership, so filtering alone decides visibility.
        self.all_trucks
            .iter()
            .filter(|t| self.category_filters.matches(t))
            .map(|t| &t.id)
    }

    fn reconcile_selection(&mut self) {
        let Some(id) = self.selected.as_ref() else {
            return;
        };
        if !self.visible_ids().any(|v| v == id) {
            debug!(%id, "selected truck left the view; clearing selection");
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchStatus, TruckSelectionStore};
    use crate::query::{CategoryFilter, SortKey};
    use crate::truck::Truck;
    use foundation::coordinate::Coordinate;
    use foundation::ids::TruckId;
    use pretty_assertions::assert_eq;

    fn truck(id: &str, rating: f64, distance: f64) -> Truck {
        let mut t = Truck::new(id, id, Coordinate::new(0.0, 0.0)).with_rating(rating);
        t.distance = Some(distance);
        t
    }

    fn store() -> TruckSelectionStore {
        let mut s = TruckSelectionStore::new();
        s.set_trucks(vec![
            truck("t1", 3.0, 5.0).with_categories(["Burgers"]),
            truck("t2", 5.0, 2.0).with_categories(["Tacos", "Mexican"]),
            truck("t3", 4.0, 1.0).with_categories(["Tacos"]),
        ]);
        s
    }

    fn id(s: &str) -> TruckId {
        TruckId::new(s)
    }

    fn visible_ids(s: &TruckSelectionStore) -> Vec<String> {
        s.visible_trucks().iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn view_follows_sort_key() {
        let mut s = store();
        s.set_sort_key(Some(SortKey::Distance));
        assert_eq!(visible_ids(&s), vec!["t3", "t2", "t1"]);
        s.set_sort_key(Some(SortKey::Rating));
        assert_eq!(visible_ids(&s), vec!["t2", "t3", "t1"]);
    }

    #[test]
    fn select_known_truck() {
        let mut s = store();
        assert!(s.select_truck(&id("t2")));
        assert_eq!(s.selected_truck_id(), Some(&id("t2")));
        assert_eq!(s.selected_truck().map(|t| t.rating), Some(Some(5.0)));
        assert!(!s.select_truck(&id("t2")));
    }

    #[test]
    fn select_unknown_or_filtered_out_truck_is_noop() {
        let mut s = store();
        s.select_truck(&id("t3"));
        assert!(!s.select_truck(&id("nope")));
        assert_eq!(s.selected_truck_id(), Some(&id("t3")));

        s.set_category_filters(["Tacos"].into_iter().collect());
        assert!(!s.select_truck(&id("t1")));
        assert_eq!(s.selected_truck_id(), Some(&id("t3")));
    }

    #[test]
    fn next_and_previous_walk_the_sorted_view() {
        let mut s = store();
        s.set_sort_key(Some(SortKey::Distance));
        s.select_truck(&id("t3"));
        assert!(s.next_truck());
        assert_eq!(s.selected_truck_id(), Some(&id("t2")));
        assert!(s.next_truck());
        assert_eq!(s.selected_truck_id(), Some(&id("t1")));
        assert!(s.previous_truck());
        assert_eq!(s.selected_truck_id(), Some(&id("t2")));
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut s = store();
        s.set_sort_key(Some(SortKey::Distance));

        s.select_truck(&id("t3"));
        assert!(!s.previous_truck());
        assert_eq!(s.selected_truck_id(), Some(&id("t3")));

        s.select_truck(&id("t1"));
        assert!(!s.next_truck());
        assert_eq!(s.selected_truck_id(), Some(&id("t1")));
    }

    #[test]
    fn navigation_without_selection_is_noop() {
        let mut s = store();
        assert!(!s.next_truck());
        assert!(!s.previous_truck());
        assert_eq!(s.selected_truck_id(), None);

        let mut empty = TruckSelectionStore::new();
        assert!(!empty.next_truck());
    }

    #[test]
    fn new_trucks_without_selected_id_clear_selection() {
        let mut s = store();
        s.select_truck(&id("t1"));
        s.set_trucks(vec![truck("t2", 5.0, 2.0), truck("t9", 1.0, 9.0)]);
        assert_eq!(s.selected_truck_id(), None);
    }

    #[test]
    fn new_trucks_keeping_selected_id_keep_selection() {
        let mut s = store();
        s.select_truck(&id("t2"));
        s.set_trucks(vec![truck("t2", 4.5, 0.5)]);
        assert_eq!(s.selected_truck_id(), Some(&id("t2")));
        assert_eq!(s.selected_truck().and_then(|t| t.distance), Some(0.5));
    }

    #[test]
    fn filter_change_clears_hidden_selection() {
        let mut s = store();
        s.select_truck(&id("t1"));
        s.toggle_category("Tacos");
        assert_eq!(s.selected_truck_id(), None);
        assert_eq!(visible_ids(&s), vec!["t2", "t3"]);

        s.toggle_category("Tacos");
        assert!(s.category_filters().is_empty());
        assert_eq!(visible_ids(&s).len(), 3);
    }

    #[test]
    fn filter_change_keeps_visible_selection() {
        let mut s = store();
        s.select_truck(&id("t2"));
        s.set_category_filters(CategoryFilter::from_iter(["Mexican"]));
        assert_eq!(s.selected_truck_id(), Some(&id("t2")));
    }

    #[test]
    fn fetch_status_does_not_touch_trucks() {
        let mut s = store();
        s.set_fetch_status(FetchStatus::Loading);
        assert_eq!(s.all_trucks().len(), 3);
        s.set_fetch_status(FetchStatus::Failed("offline".into()));
        assert_eq!(s.all_trucks().len(), 3);
        assert_eq!(s.fetch_status(), &FetchStatus::Failed("offline".into()));
    }
}
