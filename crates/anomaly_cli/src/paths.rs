//! Cross-platform application paths

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    /// `None` when the platform has no config directory.
    pub fn locate() -> Option<Self> {
        let base = dirs::config_dir()?;
        Some(Self {
            config_dir: base.join("anomaly_demo"),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_under_app_dir() {
        let paths = AppPaths {
            config_dir: PathBuf::from("/tmp/cfg/anomaly_demo"),
        };
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/cfg/anomaly_demo/config.json")
        );
    }
}
