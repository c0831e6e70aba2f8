use crate::commands::{CmdMessage, CmdResult, ShelfPaths};
use crate::config::ShelfConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

fn unknown_key(key: &str) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::error(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        ShelfConfig::KEYS.join(", ")
    )));
    result
}

pub fn run(paths: &ShelfPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = ShelfConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = ShelfConfig::load(dir)?;
            let Some(val) = config.get(&key) else {
                return Ok(unknown_key(&key));
            };
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(val));
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if !ShelfConfig::KEYS.contains(&key.as_str()) {
                return Ok(unknown_key(&key));
            }
            let mut config = ShelfConfig::load(dir)?;
            let before = config.get(&key);
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }

            let after = config.get(&key).unwrap_or_default();
            let mut result = CmdResult::default();
            if before.as_deref() == Some(after.as_str()) {
                result.add_message(CmdMessage::info(format!("{} is already {}", key, after)));
                return Ok(result.with_config(config));
            }

            config.save(dir)?;
            result.add_message(CmdMessage::success(format!("{} set to {}", key, after)));
            if key == "storage-key" {
                result.add_message(CmdMessage::info(format!(
                    "Books are now read from {}",
                    dir.join(format!("{}.json", after)).display()
                )));
            }
            Ok(result.with_config(config))
        }
    }
}
