//! 用户配置
//!
//! 从配置目录读 JSON，环境变量覆盖文件值。
//! 面板挂载的上下文（网络 / 实例）也从这里来。

use serde::{Deserialize, Serialize};

use lb_console_api::ApiContext;

const CONFIG_DIR: &str = "lb-console";
const CONFIG_FILE: &str = "config.json";

/// 用户配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// 平台地址
    pub api_base_url: String,
    /// 主题："dark" 或 "light"
    pub theme: String,
    /// 网络页签上下文
    pub network_id: Option<String>,
    /// 实例页签上下文
    pub instance_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            theme: "dark".to_string(),
            network_id: None,
            instance_id: None,
        }
    }
}

impl Config {
    /// 加载配置：文件 → 环境变量覆盖
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        config.apply_env();
        config
    }

    fn from_file() -> Option<Self> {
        let path = dirs::config_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
        let text = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&text) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("config parse failure: {e}");
                None
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(value) = std::env::var("LB_CONSOLE_API") {
            self.api_base_url = value;
        }
        if let Ok(value) = std::env::var("LB_CONSOLE_THEME") {
            self.theme = value;
        }
        if let Ok(value) = std::env::var("LB_CONSOLE_NETWORK") {
            self.network_id = Some(value);
        }
        if let Ok(value) = std::env::var("LB_CONSOLE_INSTANCE") {
            self.instance_id = Some(value);
        }
    }

    /// 面板上下文
    pub fn context(&self) -> ApiContext {
        ApiContext {
            network_id: self.network_id.clone(),
            instance_id: self.instance_id.clone(),
        }
    }

    /// 主题索引：0 = Dark, 1 = Light
    pub fn theme_index(&self) -> u8 {
        u8::from(self.theme.eq_ignore_ascii_case("light"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_dark_theme() {
        let config = Config::default();
        assert_eq!(config.theme_index(), 0);
        assert!(config.context().network_id.is_none());
    }

    #[test]
    fn light_theme_maps_to_index_one() {
        let config = Config {
            theme: "Light".to_string(),
            ..Config::default()
        };
        assert_eq!(config.theme_index(), 1);
    }

    #[test]
    fn context_carries_configured_ids() {
        let config = Config {
            network_id: Some("net-1".to_string()),
            instance_id: Some("inst-1".to_string()),
            ..Config::default()
        };
        let ctx = config.context();
        assert_eq!(ctx.network_id.as_deref(), Some("net-1"));
        assert_eq!(ctx.instance_id.as_deref(), Some("inst-1"));
    }
}
