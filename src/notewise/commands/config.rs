use crate::commands::{CmdMessage, CmdResult};
use crate::config::NotewiseConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = NotewiseConfig::load(data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => result.add_message(CmdMessage::info(value)),
            None => result.add_message(CmdMessage::error(format!("Unknown config key: {}", key))),
        },
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(data_dir)?;
            let shown = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            result = result.with_config(config);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::SummaryStyle;
    use tempfile::TempDir;

    #[test]
    fn set_persists_and_get_reads_back() {
        let dir = TempDir::new().unwrap();
        run(
            dir.path(),
            ConfigAction::Set("default-style".into(), "teacher".into()),
        )
        .unwrap();

        let loaded = NotewiseConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_style, SummaryStyle::Teacher);

        let result = run(dir.path(), ConfigAction::ShowKey("default-style".into())).unwrap();
        assert_eq!(result.messages[0].content, "teacher");
    }

    #[test]
    fn invalid_value_is_reported_not_saved() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("temperature".into(), "hot".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(NotewiseConfig::default()));
    }
}
