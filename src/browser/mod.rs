//! Browser automation contract used by the CRM scraper.

mod settings;
mod webdriver;

pub use settings::BrowserSettings;
pub use webdriver::WebDriverSession;

use crate::errors::{AppError, AppResult};
use std::thread;
use std::time::{Duration, Instant};

/// Delay between two lookups while waiting for an element.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(s: &str) -> Self {
        Locator::Css(s.to_string())
    }

    pub fn xpath(s: &str) -> Self {
        Locator::XPath(s.to_string())
    }

    /// `#id` shorthand.
    pub fn id(id: &str) -> Self {
        Locator::Css(format!("#{id}"))
    }

    pub fn describe(&self) -> &str {
        match self {
            Locator::Css(s) | Locator::XPath(s) => s,
        }
    }
}

/// Opaque handle to an element on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef(pub String);

pub trait Browser {
    fn navigate(&mut self, url: &str) -> AppResult<()>;

    /// Look the element up once; `Ok(None)` when it is not on the page.
    fn find(&mut self, locator: &Locator) -> AppResult<Option<ElementRef>>;

    fn click(&mut self, element: &ElementRef) -> AppResult<()>;

    fn send_keys(&mut self, element: &ElementRef, text: &str) -> AppResult<()>;

    fn text(&mut self, element: &ElementRef) -> AppResult<String>;

    fn execute_script(&mut self, script: &str) -> AppResult<()>;

    fn page_source(&mut self) -> AppResult<String>;

    /// End the session. Called exactly once, on every exit path.
    fn quit(&mut self) -> AppResult<()>;

    /// Whether the element is displayed and enabled.
    fn is_clickable(&mut self, element: &ElementRef) -> AppResult<bool>;

    /// Poll for an element until `timeout` elapses.
    fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> AppResult<ElementRef> {
        poll(self, locator, timeout, false)
    }

    /// Poll until the element is on the page and can be clicked.
    fn wait_for_clickable(&mut self, locator: &Locator, timeout: Duration) -> AppResult<ElementRef> {
        poll(self, locator, timeout, true)
    }
}

fn poll<B: Browser + ?Sized>(
    browser: &mut B,
    locator: &Locator,
    timeout: Duration,
    clickable: bool,
) -> AppResult<ElementRef> {
    let started = Instant::now();
    loop {
        if let Some(el) = browser.find(locator)?
            && (!clickable || browser.is_clickable(&el)?)
        {
            return Ok(el);
        }
        let elapsed = started.elapsed();
        if elapsed >= timeout {
            let state = if clickable { "clickable " } else { "" };
            return Err(AppError::Browser(format!(
                "timed out after {}s waiting for {state}'{}'",
                timeout.as_secs(),
                locator.describe()
            )));
        }
        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}
