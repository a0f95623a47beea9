use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::{
    lookup_app::LookupConfig,
    result::{LookupError, Result},
};

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("ghlookup.toml")
    } else {
        PathBuf::from("ghlookup.toml")
    }
}

/// Loads the config at `config_file`, writing the defaults there first if it is missing.
pub fn load_config(config_file: &Path) -> Result<LookupConfig> {
    confy::load_path(config_file)
        .map_err(|e| LookupError::config_load_error(config_file.to_path_buf(), e))
}

pub fn save_config(config_file: &Path, config: &LookupConfig) -> Result<()> {
    confy::store_path(config_file, config)
        .map_err(|e| LookupError::config_save_error(config_file.to_path_buf(), e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{NextPageRule, PageSize};

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ghlookup.toml");
        let config = LookupConfig {
            default_username: Some("octocat".into()),
            page_size: PageSize::Hundred,
            next_page_rule: NextPageRule::RepoCountDivision,
            ..LookupConfig::default()
        };

        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghlookup.toml");

        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded, LookupConfig::default());
        assert!(path.exists());
    }
}
