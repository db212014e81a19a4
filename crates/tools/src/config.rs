use std::env;
use std::path::PathBuf;
use std::time::Duration;

use foundation::coordinate::Coordinate;
use streaming::DEFAULT_CAMERA_SETTLE;
use tracing::warn;

pub const DEFAULT_TRUCKS_PATH: &str = "data/trucks.json";

/// Runtime settings, read from the environment and overridable by CLI flags.
///
/// - `MUNCHMAP_TRUCKS`: truck fixture JSON (default `data/trucks.json`)
/// - `MUNCHMAP_SETTLE_MS`: camera settle window in ms (default 1000)
/// - `MUNCHMAP_USER_LAT` / `MUNCHMAP_USER_LNG`: default user location, only
///   used when both are set
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub trucks_path: PathBuf,
    pub settle: Duration,
    pub user_location: Option<Coordinate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trucks_path: PathBuf::from(DEFAULT_TRUCKS_PATH),
            settle: DEFAULT_CAMERA_SETTLE,
            user_location: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let trucks_path = lookup("MUNCHMAP_TRUCKS")
            .map(PathBuf::from)
            .unwrap_or(defaults.trucks_path);
        let settle = Duration::from_millis(var_u64(
            &lookup,
            "MUNCHMAP_SETTLE_MS",
            u64::try_from(defaults.settle.as_millis()).unwrap_or(1000),
        ));
        let lat = var_f64(&lookup, "MUNCHMAP_USER_LAT");
        let lng = var_f64(&lookup, "MUNCHMAP_USER_LNG");
        let user_location = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        };

        Self {
            trucks_path,
            settle,
            user_location,
        }
    }
}

fn var_u64(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> u64 {
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {name}={raw:?}; using {default}");
            default
        }),
        None => default,
    }
}

fn var_f64(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<f64> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring invalid {name}={raw:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use foundation::coordinate::Coordinate;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_env() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
        assert_eq!(Config::default().settle, Duration::from_millis(1000));
    }

    #[test]
    fn reads_all_variables() {
        let cfg = Config::from_lookup(lookup(&[
            ("MUNCHMAP_TRUCKS", "/tmp/trucks.json"),
            ("MUNCHMAP_SETTLE_MS", "250"),
            ("MUNCHMAP_USER_LAT", "37.77"),
            ("MUNCHMAP_USER_LNG", "-122.42"),
        ]));
        assert_eq!(
            cfg,
            Config {
                trucks_path: PathBuf::from("/tmp/trucks.json"),
                settle: Duration::from_millis(250),
                user_location: Some(Coordinate::new(37.77, -122.42)),
            }
        );
    }

    #[test]
    fn half_a_location_is_ignored() {
        let cfg = Config::from_lookup(lookup(&[("MUNCHMAP_USER_LAT", "37.77")]));
        assert_eq!(cfg.user_location, None);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let cfg = Config::from_lookup(lookup(&[
            ("MUNCHMAP_SETTLE_MS", "soon"),
            ("MUNCHMAP_USER_LAT", "north"),
            ("MUNCHMAP_USER_LNG", "-122.0"),
        ]));
        assert_eq!(cfg.settle, Duration::from_millis(1000));
        assert_eq!(cfg.user_location, None);
    }
}
