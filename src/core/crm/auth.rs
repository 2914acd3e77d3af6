use crate::browser::{Browser, Locator};
use crate::config::CrmConfig;
use crate::db::Warehouse;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, warning};
use std::thread;
use std::time::Duration;

/// What happened at the verification-code step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// No code prompt appeared.
    NotRequested,
    /// A code was found and submitted.
    Submitted(String),
    /// The prompt appeared but no code was available (or submitting failed).
    Unresolved,
}

/// Log the public IP of this host. Best-effort.
pub fn log_public_ip(echo_url: &str) {
    if echo_url.is_empty() {
        return;
    }
    match reqwest::blocking::get(echo_url).and_then(|r| r.text()) {
        Ok(ip) => info(format!("My IP address is {}", ip.trim())),
        Err(e) => warning(format!("Could not determine public IP: {e}")),
    }
}

/// Log into the CRM, handling the optional verification-code prompt.
///
/// A failure to fill the login form is fatal; everything after it is not.
pub fn login(
    browser: &mut dyn Browser,
    warehouse: &mut dyn Warehouse,
    cfg: &CrmConfig,
) -> AppResult<Verification> {
    log_public_ip(&cfg.ip_echo_url);
    browser.navigate(&cfg.base_url)?;

    let timeout = Duration::from_secs(cfg.element_timeout_secs);

    if let Err(e) = submit_credentials(browser, cfg, timeout) {
        error(format!("Error: {e}"));
        if let Ok(source) = browser.page_source() {
            error(format!("Page Source: {source}"));
        }
        return Err(AppError::Browser(format!(
            "There was an issue with logging in: {e}"
        )));
    }

    thread::sleep(Duration::from_secs(cfg.login_settle_secs));

    Ok(verify(browser, warehouse, cfg, timeout))
}

fn submit_credentials(
    browser: &mut dyn Browser,
    cfg: &CrmConfig,
    timeout: Duration,
) -> AppResult<()> {
    let username = browser.wait_for(&Locator::id("username"), timeout)?;
    browser.send_keys(&username, &cfg.username)?;

    let password = browser
        .find(&Locator::id("password"))?
        .ok_or_else(|| AppError::Browser("password field not found".to_string()))?;
    browser.send_keys(&password, &cfg.password)?;

    let submit = browser
        .find(&Locator::css("button[type='submit']"))?
        .ok_or_else(|| AppError::Browser("submit button not found".to_string()))?;
    browser.click(&submit)
}

/// Wait for the code prompt; when it shows, give the side channel time to
/// deliver the code, then look it up once.
fn verify(
    browser: &mut dyn Browser,
    warehouse: &mut dyn Warehouse,
    cfg: &CrmConfig,
    timeout: Duration,
) -> Verification {
    let Ok(prompt) = browser.wait_for(&Locator::xpath("//*[@id='verification-code']"), timeout)
    else {
        info("No verification code element found, continuing with login");
        return Verification::NotRequested;
    };

    info(format!(
        "Waiting for {} seconds for verification code",
        cfg.verification_wait_secs
    ));
    thread::sleep(Duration::from_secs(cfg.verification_wait_secs));

    let code = match warehouse.verification_code(&cfg.verification_table) {
        Ok(Some(c)) => c,
        Ok(None) => {
            warning("No verification code found in warehouse");
            return Verification::Unresolved;
        }
        Err(e) => {
            warning(format!("Could not read verification code: {e}"));
            return Verification::Unresolved;
        }
    };

    let submitted = browser.send_keys(&prompt, &code).and_then(|_| {
        let button = browser
            .find(&Locator::xpath(
                "//button[contains(@class, 'submit') or contains(@type, 'submit')]",
            ))?
            .ok_or_else(|| AppError::Browser("verification submit button not found".to_string()))?;
        browser.click(&button)
    });

    match submitted {
        Ok(()) => {
            info(format!("Verification code {code} submitted"));
            Verification::Submitted(code)
        }
        Err(e) => {
            warning(format!("Submitting verification code failed: {e}"));
            Verification::Unresolved
        }
    }
}
