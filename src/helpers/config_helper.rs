use crate::config::constants::{
    ANTHROPIC_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_OPEN_BROWSER, DEFAULT_OUTPUT_DIR, DEFAULT_PROVIDER, DEFAULT_TIMEOUT_SECS,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_provider() -> String {
        DEFAULT_PROVIDER.to_string()
    }

    pub fn default_model() -> String {
        DEFAULT_MODEL.to_string()
    }

    pub fn default_max_tokens() -> u32 {
        DEFAULT_MAX_TOKENS
    }

    pub fn default_api_key_env() -> String {
        ANTHROPIC_API_KEY_ENV.to_string()
    }

    pub fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    pub fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT_SECS
    }

    pub fn default_output_dir() -> String {
        DEFAULT_OUTPUT_DIR.to_string()
    }

    pub fn default_open_browser() -> bool {
        DEFAULT_OPEN_BROWSER
    }
}
