use crate::error::{DeskError, Result};
use crate::project_identity;
use directories::UserDirs;
use std::path::{Path, PathBuf};

pub fn home_dir() -> Result<PathBuf> {
    let user_dirs = UserDirs::new()
        .ok_or_else(|| DeskError::Other("Could not determine user home directory".to_string()))?;
    Ok(user_dirs.home_dir().to_path_buf())
}

pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home_dir()?;
    if path_str == "~" {
        return Ok(home);
    }

    let stripped = path_str
        .strip_prefix("~/")
        .or_else(|| path_str.strip_prefix("~\\"))
        .ok_or_else(|| DeskError::Other(format!("Invalid path format: {}", path_str)))?;

    Ok(home.join(stripped))
}

/// `~/.scoopdesk`
pub fn data_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(project_identity::DATA_DIR_NAME))
}

/// Config file path; `SCOOPDESK_CONFIG` overrides the default location.
pub fn config_file() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(project_identity::env_key("CONFIG"))
        && !path.is_empty()
    {
        return expand_home(Path::new(&path));
    }
    Ok(data_dir()?.join(project_identity::CONFIG_FILE_BASENAME))
}

/// Activity log file next to the config file.
pub fn log_file_for(config_file: &Path) -> PathBuf {
    config_file
        .parent()
        .map(|dir| dir.join(project_identity::LOG_FILE_BASENAME))
        .unwrap_or_else(|| PathBuf::from(project_identity::LOG_FILE_BASENAME))
}

/// Default storage root of the base manager (`~/scoop`).
pub fn default_base_root() -> Result<PathBuf> {
    Ok(home_dir()?.join("scoop"))
}

#[cfg(test)]
mod tests;
