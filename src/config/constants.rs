use std::time::Duration;

pub const DEFAULT_PROVIDER: &str = "anthropic";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_OUTPUT_DIR: &str = "./snippet-review-results";
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const CONFIG_DIR_NAME: &str = "snippet-review";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const SUPPORTED_PROVIDERS: &[&str] = &["anthropic"];

pub const DEFAULT_SERVER_PORT_RANGE_START: u16 = 8080;
pub const DEFAULT_SERVER_PORT_RANGE_END: u16 = 8200;
pub const SERVER_SHUTDOWN_GRACE_PERIOD_MS: u64 = 100;
pub const DEFAULT_OPEN_BROWSER: bool = true;

pub const MIN_QUALITY_SCORE: i64 = 0;
pub const MAX_QUALITY_SCORE: i64 = 100;

pub const SCORE_GOOD_THRESHOLD: u8 = 80;
pub const SCORE_FAIR_THRESHOLD: u8 = 60;

pub const SPINNER_FRAME_INTERVAL_MS: u64 = 150;

pub fn timeout_duration_secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

pub fn sleep_duration_millis(milliseconds: u64) -> Duration {
    Duration::from_millis(milliseconds)
}
