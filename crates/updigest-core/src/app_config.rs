use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub monday_api_key: String,
    pub monday_api_url: String,
    pub monday_team_url: String,
    pub board_id: u64,
    pub items_limit: u32,
    pub lookback_days: i64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub default_avatar: String,
    pub rules_path: Option<PathBuf>,
    pub browser_path: Option<PathBuf>,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("monday_api_key", &"[redacted]")
            .field("monday_api_url", &self.monday_api_url)
            .field("monday_team_url", &self.monday_team_url)
            .field("board_id", &self.board_id)
            .field("items_limit", &self.items_limit)
            .field("lookback_days", &self.lookback_days)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("output_dir", &self.output_dir)
            .field("default_avatar", &self.default_avatar)
            .field("rules_path", &self.rules_path)
            .field("browser_path", &self.browser_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}
