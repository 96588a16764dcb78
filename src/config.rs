use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DATASET_ROOT: &str = "datasets";
pub const IMAGE_DIR: &str = "datasets/images";
pub const LABEL_DIR: &str = "datasets/labels";
pub const DATA_CONFIG: &str = "datasets/data.yaml";
pub const CLASS_NAME: &str = "first_aid_kit";
/// Committed boxes must exceed this on both axes, in source pixels.
pub const MIN_BOX_SIDE: i32 = 10;

/// Fixed per-session settings. There are no command-line flags.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub image_dir: PathBuf,
    pub label_dir: PathBuf,
    pub class_name: String,
    pub min_box_side: i32,
    pub window_title: String,
    pub window_size: [f32; 2],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from(IMAGE_DIR),
            label_dir: PathBuf::from(LABEL_DIR),
            class_name: CLASS_NAME.to_string(),
            min_box_side: MIN_BOX_SIDE,
            window_title: format!("Box Labeler - {CLASS_NAME}"),
            window_size: [1280.0, 720.0],
        }
    }
}

/// Dataset description read by the training side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
    pub train: String,
    pub val: String,
    pub nc: usize,
    pub names: Vec<String>,
}

impl DataConfig {
    pub fn single_class(class_name: &str) -> Self {
        Self {
            path: format!("{DATASET_ROOT}/"),
            train: "train/images".to_string(),
            val: "val/images".to_string(),
            nc: 1,
            names: vec![class_name.to_string()],
        }
    }
}

pub fn write_data_config(path: &Path, config: &DataConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_yaml::to_string(config)?)?;
    Ok(())
}

pub fn read_data_config(path: &Path) -> Result<DataConfig> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Writes the data config only when none exists yet. Returns whether it wrote.
pub fn ensure_data_config(path: &Path, class_name: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_data_config(path, &DataConfig::single_class(class_name))?;
    log::info!("wrote data config {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_config_round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.yaml");

        assert!(ensure_data_config(&path, "first_aid_kit").unwrap());
        let cfg = read_data_config(&path).unwrap();
        assert_eq!(cfg, DataConfig::single_class("first_aid_kit"));
        assert_eq!(cfg.nc, 1);
        assert_eq!(cfg.train, "train/images");

        // an existing file is left alone
        assert!(!ensure_data_config(&path, "other").unwrap());
        assert_eq!(read_data_config(&path).unwrap().names, vec!["first_aid_kit"]);
    }
}
