use std::env;

use super::env::{
    AppConfig, ClassifierConfig, ConfigError, DirectoryConfig, LoggingConfig, OpenAiConfig,
    ServerConfig, TriageConfig, YouTubeConfig,
};

const DEFAULT_THRESHOLD: f32 = 0.5;
const DEFAULT_MAX_TOKENS: usize = 128;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT").unwrap_or(8000),
        };

        let youtube = YouTubeConfig {
            api_key: non_empty("YOUTUBE_API_KEY"),
            api_base: env::var("YOUTUBE_API_BASE")
                .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string()),
        };

        let openai = OpenAiConfig {
            api_key: non_empty("OPENAI_API_KEY"),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
        };

        let classifier = ClassifierConfig {
            endpoint: env::var("CLASSIFIER_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            threshold: parse_var::<f32>("CLASSIFIER_THRESHOLD")
                .filter(|t| (0.0..=1.0).contains(t))
                .unwrap_or(DEFAULT_THRESHOLD),
            max_tokens: parse_var::<usize>("CLASSIFIER_MAX_TOKENS")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let triage = TriageConfig {
            refine_comments: parse_bool("REFINE_COMMENTS").unwrap_or(true),
            analysis_max_comments: parse_var::<usize>("ANALYSIS_MAX_COMMENTS")
                .filter(|n| *n > 0)
                .unwrap_or(100),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            server,
            youtube,
            openai,
            classifier,
            triage,
            directories,
            logging,
        })
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse::<T>().ok())
}

fn parse_bool(key: &str) -> Option<bool> {
    env::var(key).ok().and_then(|value| bool_from_str(&value))
}

fn bool_from_str(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_values_accept_common_spellings() {
        assert_eq!(bool_from_str("TRUE"), Some(true));
        assert_eq!(bool_from_str(" off "), Some(false));
        assert_eq!(bool_from_str("maybe"), None);
    }
}
