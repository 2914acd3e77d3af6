use crate::browser::{Browser, Locator};
use crate::config::CrmConfig;
use crate::errors::AppResult;
use crate::models::contact::{ContactEnrichment, ContactField, null_if_sentinel};
use crate::ui::messages::{info, warning};
use std::time::Duration;

/// Button that expands the collapsed customer-fields panel.
pub const VIEW_MORE_BUTTON: &str =
    r#"button[data-qa="contact-basic-info-customer-fields-view-more-button"]"#;

const ZOOM_SCRIPT: &str = "document.body.style.zoom='67%'";

pub fn contact_url(base_url: &str, contact_id: &str) -> String {
    format!(
        "{}/contacts/{contact_id}/details",
        base_url.trim_end_matches('/')
    )
}

/// Expand the details panel. Best-effort: `false` when it could not be
/// clicked.
pub fn click_view_more(browser: &mut dyn Browser, timeout: Duration) -> bool {
    let clicked = browser
        .wait_for_clickable(&Locator::css(VIEW_MORE_BUTTON), timeout)
        .and_then(|button| browser.click(&button));

    match clicked {
        Ok(()) => true,
        Err(e) => {
            warning(format!("Error clicking view more button: {e}"));
            false
        }
    }
}

fn read_field(browser: &mut dyn Browser, field: ContactField, timeout: Duration) -> AppResult<String> {
    let el = browser.wait_for(&Locator::css(field.selector()), timeout)?;
    Ok(browser.text(&el)?.trim().to_string())
}

fn value_of(record: &ContactEnrichment, field: ContactField) -> &str {
    match field {
        ContactField::ExternalId => &record.external_id,
        ContactField::LastAccountContact => &record.last_account_contact,
        ContactField::LastContactResponse => &record.last_contact_response,
    }
}

/// Scrape one contact's details page.
///
/// Navigation errors propagate (the caller skips the contact). Fields that
/// cannot be read keep the sentinel.
pub fn scrape_contact(
    browser: &mut dyn Browser,
    cfg: &CrmConfig,
    contact_id: &str,
) -> AppResult<ContactEnrichment> {
    browser.navigate(&contact_url(&cfg.base_url, contact_id))?;
    browser.execute_script(ZOOM_SCRIPT)?;

    let timeout = Duration::from_secs(cfg.element_timeout_secs);
    click_view_more(browser, timeout);

    let mut record = ContactEnrichment::unresolved(contact_id);
    for field in ContactField::ALL {
        match read_field(browser, field, timeout) {
            Ok(text) => field.set(&mut record, text),
            Err(e) => warning(format!("Error finding {} element: {e}", field.as_str())),
        }
    }

    for field in ContactField::ALL {
        retry_field(browser, cfg, contact_id, field, &mut record);
    }

    info(format!(
        "[{}, {}, {}, {}]",
        record.contact_id,
        record.external_id,
        record.last_account_contact,
        record.last_contact_response
    ));
    Ok(record)
}

/// Re-expand the panel and re-read a field still empty or at the sentinel,
/// up to `field_retries` times.
fn retry_field(
    browser: &mut dyn Browser,
    cfg: &CrmConfig,
    contact_id: &str,
    field: ContactField,
    record: &mut ContactEnrichment,
) {
    let timeout = Duration::from_secs(cfg.element_timeout_secs);

    for attempt in 1..=cfg.field_retries {
        if null_if_sentinel(value_of(record, field)).is_some() {
            return;
        }
        info(format!(
            "Retry attempt {attempt} for contact {contact_id} and element {}",
            field.as_str()
        ));

        if !click_view_more(browser, timeout) {
            continue;
        }
        match browser
            .find(&Locator::css(field.selector()))
            .and_then(|el| match el {
                Some(el) => browser.text(&el).map(Some),
                None => Ok(None),
            }) {
            Ok(Some(text)) if !text.trim().is_empty() => {
                info(format!("Found {} on retry: {}", field.as_str(), text.trim()));
                field.set(record, text.trim().to_string());
                return;
            }
            Ok(_) => {}
            Err(e) => warning(format!(
                "Error finding {} in retry attempt {attempt}: {e}",
                field.as_str()
            )),
        }
    }
}
