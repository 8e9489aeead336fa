//! Model artifact bundle loading.
//!
//! A bundle is three files: the ONNX model, the fitted scaler parameters
//! (JSON) and the seed window of the last `WINDOW_SIZE` prices (CSV or JSON).

use crate::domain::errors::ArtifactError;
use crate::domain::forecast::{Window, WINDOW_SIZE};
use crate::domain::ml::{ScalerParams, ValueScaler};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Returns `path` if it exists, else `fallback_dir/<file name>` if that exists.
pub fn resolve_artifact(path: &Path, fallback_dir: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    let candidate = fallback_dir.join(path.file_name()?);
    if candidate.exists() {
        info!("Using fallback artifact path {:?}", candidate);
        Some(candidate)
    } else {
        None
    }
}

/// Like [`resolve_artifact`], but reports the primary path as missing.
pub fn require_artifact(
    kind: &'static str,
    path: &Path,
    fallback_dir: &Path,
) -> Result<PathBuf, ArtifactError> {
    resolve_artifact(path, fallback_dir).ok_or_else(|| {
        warn!("{} artifact not found at {:?}", kind, path);
        ArtifactError::NotFound {
            kind,
            path: path.display().to_string(),
        }
    })
}

pub fn load_scaler(path: &Path) -> Result<ValueScaler, ArtifactError> {
    info!("Loading scaler from {:?}", path);
    let file = File::open(path).map_err(|e| unreadable("scaler", path, e))?;
    let params: ScalerParams =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| unreadable("scaler", path, e))?;
    params.validate().map_err(|reason| unreadable("scaler", path, reason))?;
    Ok(ValueScaler::new(params))
}

/// Loads the seed window. `.json` files hold an array of numbers; anything
/// else is read as CSV with the price in the first column.
pub fn load_seed(path: &Path) -> Result<Window, ArtifactError> {
    info!("Loading seed window from {:?}", path);
    let values = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let file = File::open(path).map_err(|e| unreadable("seed", path, e))?;
            serde_json::from_reader::<_, Vec<f64>>(BufReader::new(file))
                .map_err(|e| unreadable("seed", path, e))?
        }
        _ => read_seed_csv(path)?,
    };

    let actual = values.len();
    Window::new(values).map_err(|_| ArtifactError::SeedLength {
        path: path.display().to_string(),
        expected: WINDOW_SIZE,
        actual,
    })
}

fn read_seed_csv(path: &Path) -> Result<Vec<f64>, ArtifactError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| unreadable("seed", path, e))?;

    let mut values = Vec::with_capacity(WINDOW_SIZE);
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| unreadable("seed", path, e))?;
        let Some(field) = record.get(0) else {
            continue;
        };
        match field.parse::<f64>() {
            Ok(value) => values.push(value),
            // Optional header row
            Err(_) if row == 0 => continue,
            Err(e) => {
                return Err(unreadable(
                    "seed",
                    path,
                    format!("row {}: {:?} ({})", row + 1, field, e),
                ));
            }
        }
    }
    Ok(values)
}

fn unreadable(kind: &'static str, path: &Path, reason: impl ToString) -> ArtifactError {
    ArtifactError::Unreadable {
        kind,
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_seed_csv_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut content = String::from("price\n");
        for i in 0..WINDOW_SIZE {
            content.push_str(&format!("{}\n", 1900.0 + i as f64));
        }
        let path = write_file(dir.path(), "seed.csv", &content);

        let window = load_seed(&path).unwrap();
        assert_eq!(window.as_ref()[0], 1900.0);
        assert_eq!(window.last(), 1959.0);
    }

    #[test]
    fn test_seed_csv_rejects_garbage_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "seed.csv", "1900.0\nabc\n1901.0\n");
        assert!(matches!(
            load_seed(&path),
            Err(ArtifactError::Unreadable { kind: "seed", .. })
        ));
    }

    #[test]
    fn test_seed_wrong_length() {
        let dir = tempfile::tempdir().unwrap();
        let json = serde_json::to_string(&vec![1800.0; 59]).unwrap();
        let path = write_file(dir.path(), "seed.json", &json);
        assert!(matches!(
            load_seed(&path),
            Err(ArtifactError::SeedLength { actual: 59, .. })
        ));
    }

    #[test]
    fn test_scaler_with_empty_feature_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "scaler.json",
            r#"{"kind":"min_max","data_min":1000.0,"data_max":2000.0,"feature_range":[0.5,0.5]}"#,
        );
        assert!(matches!(
            load_scaler(&path),
            Err(ArtifactError::Unreadable { kind: "scaler", .. })
        ));
    }

    #[test]
    fn test_scaler_loads_valid_params() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "scaler.json",
            r#"{"kind":"standard","mean":1800.0,"std":250.0}"#,
        );
        let scaler = load_scaler(&path).unwrap();
        assert_eq!(scaler, ValueScaler::standard(1800.0, 250.0));
    }

    #[test]
    fn test_resolve_artifact_fallback() {
        let primary = tempfile::tempdir().unwrap();
        let fallback = tempfile::tempdir().unwrap();
        let fallback_file = write_file(fallback.path(), "scaler.json", "{}");

        let missing = primary.path().join("scaler.json");
        assert_eq!(
            resolve_artifact(&missing, fallback.path()),
            Some(fallback_file)
        );
        assert!(resolve_artifact(&primary.path().join("model.onnx"), fallback.path()).is_none());
    }
}
