//! Minimal W3C WebDriver client (the subset the scraper needs).

use crate::browser::{Browser, BrowserSettings, ElementRef, Locator};
use crate::errors::{AppError, AppResult};
use reqwest::Method;
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::time::Duration;

/// Key of an element reference in WebDriver responses.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

pub struct WebDriverSession {
    client: Client,
    base: String,
    session_id: String,
}

/// Error object returned by the remote end.
struct WireError {
    code: String,
    message: String,
}

impl WebDriverSession {
    /// Start a new browser session on the WebDriver server at `base_url`.
    pub fn start(base_url: &str, settings: &BrowserSettings) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        let base = base_url.trim_end_matches('/').to_string();

        let resp: Value = client
            .post(format!("{base}/session"))
            .json(&settings.capabilities())
            .send()?
            .json()?;

        if let Some(err) = wire_error(&resp) {
            return Err(AppError::Browser(format!(
                "session not created: {}: {}",
                err.code, err.message
            )));
        }

        let session_id = resp["value"]["sessionId"]
            .as_str()
            .or_else(|| resp["sessionId"].as_str())
            .ok_or_else(|| AppError::Browser("missing sessionId in response".to_string()))?
            .to_string();

        Ok(Self {
            client,
            base,
            session_id,
        })
    }

    fn call_raw(&self, method: Method, path: &str, body: Option<Value>) -> AppResult<Result<Value, WireError>> {
        let url = format!("{}/session/{}{}", self.base, self.session_id, path);
        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp: Value = req.send()?.json()?;
        match wire_error(&resp) {
            Some(err) => Ok(Err(err)),
            None => Ok(Ok(resp["value"].clone())),
        }
    }

    fn call(&self, method: Method, path: &str, body: Option<Value>) -> AppResult<Value> {
        self.call_raw(method, path, body)?
            .map_err(|e| AppError::Browser(format!("{}: {}", e.code, e.message)))
    }
}

fn wire_error(resp: &Value) -> Option<WireError> {
    let code = resp["value"]["error"].as_str()?;
    Some(WireError {
        code: code.to_string(),
        message: resp["value"]["message"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
    })
}

impl Browser for WebDriverSession {
    fn navigate(&mut self, url: &str) -> AppResult<()> {
        self.call(Method::POST, "/url", Some(json!({ "url": url })))?;
        Ok(())
    }

    fn find(&mut self, locator: &Locator) -> AppResult<Option<ElementRef>> {
        let (using, value) = match locator {
            Locator::Css(s) => ("css selector", s),
            Locator::XPath(s) => ("xpath", s),
        };

        match self.call_raw(
            Method::POST,
            "/element",
            Some(json!({ "using": using, "value": value })),
        )? {
            Ok(v) => Ok(v[ELEMENT_KEY].as_str().map(|id| ElementRef(id.to_string()))),
            Err(e) if e.code == "no such element" => Ok(None),
            Err(e) => Err(AppError::Browser(format!("{}: {}", e.code, e.message))),
        }
    }

    fn click(&mut self, element: &ElementRef) -> AppResult<()> {
        self.call(
            Method::POST,
            &format!("/element/{}/click", element.0),
            Some(json!({})),
        )?;
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementRef, text: &str) -> AppResult<()> {
        self.call(
            Method::POST,
            &format!("/element/{}/value", element.0),
            Some(json!({ "text": text })),
        )?;
        Ok(())
    }

    fn text(&mut self, element: &ElementRef) -> AppResult<String> {
        let v = self.call(Method::GET, &format!("/element/{}/text", element.0), None)?;
        Ok(v.as_str().unwrap_or_default().to_string())
    }

    fn is_clickable(&mut self, element: &ElementRef) -> AppResult<bool> {
        let displayed = self.call(Method::GET, &format!("/element/{}/displayed", element.0), None)?;
        if !displayed.as_bool().unwrap_or(false) {
            return Ok(false);
        }
        let enabled = self.call(Method::GET, &format!("/element/{}/enabled", element.0), None)?;
        Ok(enabled.as_bool().unwrap_or(false))
    }

    fn execute_script(&mut self, script: &str) -> AppResult<()> {
        self.call(
            Method::POST,
            "/execute/sync",
            Some(json!({ "script": script, "args": [] })),
        )?;
        Ok(())
    }

    fn page_source(&mut self) -> AppResult<String> {
        let v = self.call(Method::GET, "/source", None)?;
        Ok(v.as_str().unwrap_or_default().to_string())
    }

    fn quit(&mut self) -> AppResult<()> {
        self.call(Method::DELETE, "", None)?;
        Ok(())
    }
}
