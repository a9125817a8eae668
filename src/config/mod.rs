use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub chatwork_api_token: String,
    pub chatwork_room_id: String,
    pub chatwork_api_base: String,
    pub github_token: String,
    pub github_repo_owner: String,
    pub github_repo_name: String,
    pub github_branch: String,
    pub github_api_base: String,
    pub member_file_path: String,
    pub log_file_path: String,
    pub server_host: String,
    pub server_port: u16,
    pub announcer_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let server_port = match optional(&["SERVER_PORT", "PORT"]) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value: raw,
            })?,
            None => 5000,
        };

        let announcer_enabled = match optional(&["ANNOUNCER_ENABLED"]) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                name: "ANNOUNCER_ENABLED",
                value: raw,
            })?,
            None => false,
        };

        Ok(Config {
            chatwork_api_token: required("CHATWORK_API_TOKEN")?,
            chatwork_room_id: optional(&["CHATWORK_ROOM_ID", "CHATWORK_GROUP_ID"])
                .ok_or(ConfigError::Missing("CHATWORK_ROOM_ID"))?,
            chatwork_api_base: optional(&["CHATWORK_API_BASE"])
                .unwrap_or_else(|| "https://api.chatwork.com/v2".into()),
            github_token: required("GITHUB_TOKEN")?,
            github_repo_owner: required("GITHUB_REPO_OWNER")?,
            github_repo_name: required("GITHUB_REPO_NAME")?,
            github_branch: optional(&["GITHUB_BRANCH_NAME"]).unwrap_or_else(|| "main".into()),
            github_api_base: optional(&["GITHUB_API_BASE"])
                .unwrap_or_else(|| "https://api.github.com".into()),
            member_file_path: optional(&["MEMBER_FILE_PATH"])
                .unwrap_or_else(|| "data/members.json".into()),
            log_file_path: optional(&["LOG_FILE_PATH"]).unwrap_or_else(|| "data/logs.json".into()),
            server_host: optional(&["SERVER_HOST"]).unwrap_or_else(|| "0.0.0.0".into()),
            server_port,
            announcer_enabled,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(&[name]).ok_or(ConfigError::Missing(name))
}

// 按顺序读取第一个非空变量
fn optional(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn parses_common_flag_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
