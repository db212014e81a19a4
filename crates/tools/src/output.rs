use foundation::ids::TruckId;
use scene::Truck;
use serde::Serialize;

/// One rendered line of the truck list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckRow {
    pub id: String,
    pub name: String,
    pub open: bool,
    pub categories: Vec<String>,
    pub rating: Option<f64>,
    pub distance_mi: Option<f64>,
    pub drive_min: Option<u64>,
    pub walk_min: Option<u64>,
    pub selected: bool,
}

pub fn rows(view: &[Truck], selected: Option<&TruckId>) -> Vec<TruckRow> {
    view.iter()
        .map(|t| {
            let travel = t.travel_estimate();
            TruckRow {
                id: t.id.to_string(),
                name: t.name.clone(),
                open: t.open_status,
                categories: t.categories.iter().cloned().collect(),
                rating: t.rating,
                distance_mi: t.distance,
                drive_min: travel.map(|e| whole_minutes(e.drive_minutes)),
                walk_min: travel.map(|e| whole_minutes(e.walk_minutes)),
                selected: selected == Some(&t.id),
            }
        })
        .collect()
}

fn whole_minutes(m: f64) -> u64 {
    m.round().max(0.0) as u64
}

pub fn render_json(rows: &[TruckRow]) -> Result<String, String> {
    serde_json::to_string_pretty(rows).map_err(|e| format!("json: {e}"))
}

pub fn render_table(rows: &[TruckRow]) -> String {
    if rows.is_empty() {
        return "no trucks in view\n".to_string();
    }

    let name_w = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(4).max(4);
    let mut out = format!(
        "  {:<name_w$}  {:<6}  {:>6}  {:>8}  {:>7}  {:>6}  {}\n",
        "NAME", "STATUS", "RATING", "MILES", "DRIVE", "WALK", "CATEGORIES"
    );
    for r in rows {
        let marker = if r.selected { '>' } else { ' ' };
        let status = if r.open { "open" } else { "closed" };
        let rating = r.rating.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string());
        let miles = r.distance_mi.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string());
        let drive = r.drive_min.map(|v| format!("{v} min")).unwrap_or_else(|| "-".to_string());
        let walk = r.walk_min.map(|v| format!("{v} min")).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{marker} {:<name_w$}  {:<6}  {:>6}  {:>8}  {:>7}  {:>6}  {}\n",
            r.name,
            status,
            rating,
            miles,
            drive,
            walk,
            r.categories.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{render_table, rows};
    use foundation::coordinate::Coordinate;
    use foundation::ids::TruckId;
    use scene::Truck;

    fn truck() -> Truck {
        let mut t = Truck::new("t1", "Taco Loco", Coordinate::new(0.0, 0.0))
            .with_rating(4.5)
            .with_open_status(true)
            .with_categories(["Tacos", "Mexican"]);
        t.distance = Some(1.26);
        t
    }

    #[test]
    fn rows_carry_travel_estimates() {
        let r = rows(&[truck()], Some(&TruckId::new("t1")));
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].drive_min, Some(4));
        assert_eq!(r[0].walk_min, Some(25));
        assert!(r[0].selected);
        assert_eq!(r[0].categories, vec!["Mexican", "Tacos"]);
    }

    #[test]
    fn unannotated_rows_have_no_estimates() {
        let mut t = truck();
        t.distance = None;
        let r = rows(&[t], None);
        assert_eq!(r[0].distance_mi, None);
        assert_eq!(r[0].walk_min, None);
        assert!(!r[0].selected);
    }

    #[test]
    fn table_marks_selection() {
        let table = render_table(&rows(&[truck()], Some(&TruckId::new("t1"))));
        let line = table.lines().nth(1).unwrap();
        assert!(line.starts_with("> Taco Loco"));
        assert!(line.contains("1.26"));
        assert!(line.contains("open"));
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(render_table(&[]), "no trucks in view\n");
    }
}
