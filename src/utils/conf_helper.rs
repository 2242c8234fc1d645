use std::fs;
use std::path::Path;
use tracing::info;

use serde_json::Value;

use crate::core::error::{AsdError, Result};
use crate::models::config::CompositeConfig;

/// Read a JSON run file; fields it leaves out keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CompositeConfig> {
    load_config_with(path, CompositeConfig::default())
}

/// Read a JSON run file on top of `defaults`: fields the file sets win,
/// everything else comes from `defaults`.
pub fn load_config_with<P: AsRef<Path>>(
    path: P,
    defaults: CompositeConfig,
) -> Result<CompositeConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;

    let mut merged = serde_json::to_value(defaults)?;
    let overrides: Value = serde_json::from_str(&data)?;
    match (merged.as_object_mut(), overrides) {
        (Some(base), Value::Object(fields)) => base.extend(fields),
        (_, other) => {
            return Err(AsdError::ParseError(format!(
                "run file {} must hold a JSON object, got {}",
                path.display(),
                other
            )))
        }
    }
    let config: CompositeConfig = serde_json::from_value(merged)?;

    info!("Config loaded from {}", path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "set_2_index": 20, "debug": true }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.set_2_index, 20);
        assert!(config.debug);
        assert_eq!(config.set_1_count, 10);
    }

    #[test]
    fn test_load_config_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "set_2_count": 5 }"#).unwrap();

        let defaults = CompositeConfig {
            set_1_count: 1,
            set_2_count: 10,
            ..CompositeConfig::default()
        };
        let config = load_config_with(&path, defaults).unwrap();
        assert_eq!(config.set_1_count, 1);
        assert_eq!(config.set_2_count, 5);
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_config(dir.path().join("missing.json")),
            Err(AsdError::Io(_))
        ));

        let path = dir.path().join("bad.json");
        fs::write(&path, "{ set_1_index: ").unwrap();
        assert!(matches!(load_config(&path), Err(AsdError::Config(_))));

        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(load_config(&path), Err(AsdError::ParseError(_))));
    }
}
