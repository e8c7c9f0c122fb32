use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// 0 picks the first free port in the default range.
    #[serde(default)]
    pub port: u16,

    #[serde(default = "ConfigHelper::default_open_browser")]
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            open_browser: ConfigHelper::default_open_browser(),
        }
    }
}
