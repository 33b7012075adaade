use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    pub url: String,
    pub request_timeout_secs: u64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: String::from("http://127.0.0.1:5000"),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polling {
    pub period_ms: u64,
}

impl Default for Polling {
    fn default() -> Self {
        Self { period_ms: 1000 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: Backend,
    pub polling: Polling,
}
