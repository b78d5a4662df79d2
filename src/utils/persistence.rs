//! Generic JSON persistence helpers for ~/.strata/ record files.
//!
//! The binary save holds the live run; small JSON sidecar files hold
//! cross-run records (deepest dig, prestige history) that are convenient
//! to inspect and harmless to lose.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.strata/ directory path, creating it if needed.
pub fn strata_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".strata");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a record file in ~/.strata/.
pub fn record_path(filename: &str) -> io::Result<PathBuf> {
    Ok(strata_dir()?.join(filename))
}

/// Load a JSON file from ~/.strata/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match record_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.strata/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = record_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Cross-run dig records, shown on the stats panel.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct DigRecords {
    pub deepest_depth: f64,
    pub most_layers_in_a_run: u64,
    pub total_prestiges: u64,
}

impl DigRecords {
    pub const FILENAME: &'static str = "records.json";

    pub fn load() -> Self {
        load_json_or_default(Self::FILENAME)
    }

    pub fn store(&self) -> io::Result<()> {
        save_json(Self::FILENAME, self)
    }

    /// Folds a run's final numbers into the records. Returns true if any
    /// record improved.
    pub fn absorb(&mut self, depth: f64, layers_broken: u64, total_prestiges: u64) -> bool {
        let mut improved = false;
        if depth > self.deepest_depth {
            self.deepest_depth = depth;
            improved = true;
        }
        if layers_broken > self.most_layers_in_a_run {
            self.most_layers_in_a_run = layers_broken;
            improved = true;
        }
        if total_prestiges > self.total_prestiges {
            self.total_prestiges = total_prestiges;
            improved = true;
        }
        improved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_tracks_maxima() {
        let mut records = DigRecords::default();

        assert!(records.absorb(120.0, 30, 0));
        assert_eq!(records.deepest_depth, 120.0);
        assert_eq!(records.most_layers_in_a_run, 30);

        // A shallower run changes nothing
        assert!(!records.absorb(50.0, 10, 0));
        assert_eq!(records.deepest_depth, 120.0);

        // Partial improvement still counts
        assert!(records.absorb(100.0, 99, 1));
        assert_eq!(records.most_layers_in_a_run, 99);
        assert_eq!(records.total_prestiges, 1);
    }

    #[test]
    fn test_load_json_or_default_handles_missing_file() {
        let records: DigRecords = load_json_or_default("definitely_missing_strata_test.json");
        assert_eq!(records.deepest_depth, 0.0);
    }
}
