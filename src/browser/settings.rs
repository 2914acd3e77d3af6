use serde_json::{Value, json};
use std::env;

/// Chrome binary inside the cloud container image.
const CLOUD_CHROME_BINARY: &str = "/usr/bin/google-chrome";

/// Launch settings derived from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub cloud: bool,
    pub headless: bool,
    pub binary: Option<String>,
}

impl BrowserSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `CLOUD_RUN_JOB` / `K_SERVICE` mark a cloud run (headless, bundled
    /// Chrome); `USE_HEADLESS` forces headless locally; `CHROME_BINARY`
    /// overrides the binary.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());

        let cloud = set("CLOUD_RUN_JOB") || set("K_SERVICE");
        let headless = cloud || set("USE_HEADLESS");
        let binary = lookup("CHROME_BINARY")
            .filter(|v| !v.is_empty())
            .or_else(|| cloud.then(|| CLOUD_CHROME_BINARY.to_string()));

        Self {
            cloud,
            headless,
            binary,
        }
    }

    pub fn chrome_args(&self) -> Vec<String> {
        let mut args: Vec<String> = [
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-extensions",
            "--disable-infobars",
            "--disable-popup-blocking",
            "--disable-notifications",
            "--ignore-certificate-errors",
            "--log-level=3",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if self.headless {
            args.push("--headless=new".to_string());
            args.push("--window-size=1920,1080".to_string());
        }
        if !self.cloud {
            args.push("--remote-debugging-port=9222".to_string());
        }
        args
    }

    /// W3C new-session capabilities for Chrome.
    pub fn capabilities(&self) -> Value {
        let mut chrome = json!({ "args": self.chrome_args() });
        if let Some(bin) = &self.binary {
            chrome["binary"] = Value::String(bin.clone());
        }

        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": chrome
                }
            }
        })
    }
}
