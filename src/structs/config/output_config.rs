use serde::{Deserialize, Serialize};
use crate::enums::output_format::OutputFormat;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub save_reports: bool,

    #[serde(default = "ConfigHelper::default_output_dir")]
    pub output_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            save_reports: false,
            output_dir: ConfigHelper::default_output_dir(),
        }
    }
}
