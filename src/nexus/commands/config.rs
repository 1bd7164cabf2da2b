use crate::commands::{CmdMessage, CmdResult};
use crate::config::NexusConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Shows or changes the insight settings stored in `dir`.
pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = NexusConfig::load(dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let message = match config.get(&key) {
                Some(value) => CmdMessage::info(value),
                None => CmdMessage::error(format!("Unknown config key: {}", key)),
            };
            let mut result = CmdResult::default();
            result.add_message(message);
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(dir)?;

            let stored = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::applied();
            result.add_message(CmdMessage::success(format!("{} set to {}", key, stored)));
            if key == "insight-key-env" && std::env::var_os(&stored).is_none() {
                result.add_message(CmdMessage::warning(format!(
                    "${} is not set; insights will show the fallback text",
                    stored
                )));
            }
            Ok(result.with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_then_show_key() {
        let dir = TempDir::new().unwrap();

        let result = run(
            dir.path(),
            ConfigAction::Set("insight-model".into(), "tiny".into()),
        )
        .unwrap();
        assert!(result.applied);

        let result = run(dir.path(), ConfigAction::ShowKey("insight-model".into())).unwrap();
        assert_eq!(result.messages[0].content, "tiny");
    }

    #[test]
    fn unset_key_variable_is_flagged() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("insight-key-env".into(), "NEXUS_UNSET_KEY_VAR".into()),
        )
        .unwrap();

        assert!(result.applied);
        assert!(matches!(
            result.messages[1].level,
            crate::commands::MessageLevel::Warning
        ));
        assert_eq!(
            NexusConfig::load(dir.path()).unwrap().insight_key_env,
            "NEXUS_UNSET_KEY_VAR"
        );
    }

    #[test]
    fn invalid_endpoint_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("insight-endpoint".into(), "ftp://example.com".into()),
        )
        .unwrap();

        assert!(!result.applied);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_reports_error() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::Set("nope".into(), "x".into())).unwrap();
        assert!(!result.applied);
        assert!(matches!(
            result.messages[0].level,
            crate::commands::MessageLevel::Error
        ));
        assert!(!dir.path().join("config.json").exists());
    }
}
