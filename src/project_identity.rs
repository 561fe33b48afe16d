//! Central project identity contract.
//!
//! Runtime names, directories and environment keys are defined here only.

pub const DISPLAY_NAME: &str = "ScoopDesk";
pub const BINARY_NAME: &str = "scoopdesk";
pub const DATA_DIR_NAME: &str = ".scoopdesk";
pub const CONFIG_FILE_BASENAME: &str = "config.json";
pub const LOG_FILE_BASENAME: &str = "scoopdesk.log";
pub const SNAPSHOT_FILE_BASENAME: &str = "scoopdesk-backup.json";
pub const ENV_PREFIX: &str = "SCOOPDESK";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn cli_with(args: &str) -> String {
    format!("{} {}", BINARY_NAME, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_uses_prefix() {
        assert_eq!(env_key("CONFIG"), "SCOOPDESK_CONFIG");
    }

    #[test]
    fn cli_with_prefixes_binary() {
        assert_eq!(cli_with("status"), "scoopdesk status");
    }
}
