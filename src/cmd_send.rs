//! `send` and `message` handlers: the user-facing triggers of the relay.

use std::sync::Arc;

use tracing::{info, warn};

use docrelay_config::Config;
use docrelay_core::{MessageRouter, RelayError, SendTarget};
use docrelay_driver::DriverReport;
use docrelay_protocols::{Action, Platform};

/// Capture the given source and relay it, then wait for the destination driver.
pub(crate) async fn send(
    config: Config,
    url: Option<String>,
    tab: Option<String>,
    platform: Option<Platform>,
    prompt: Option<String>,
    summarize: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = match (url, tab) {
        (Some(url), _) => SendTarget::Url(url),
        (None, Some(tab)) => SendTarget::Tab(tab),
        (None, None) => SendTarget::Active,
    };

    let browser = crate::browser(&config);
    let router = Arc::new(MessageRouter::new(config, browser.clone()));

    let result = router.send(target, prompt, platform, summarize).await;
    let ticket = match result {
        Ok(ticket) => ticket,
        Err(RelayError::Ineligible(url)) => {
            println!("Not a PDF or YouTube video page: {}", url);
            return Ok(());
        }
        Err(e) => {
            println!("Relay failed: {}", e);
            return Err(e.into());
        }
    };

    println!(
        "Staged {:?} ({} bytes) for {} in tab {}",
        ticket.kind,
        ticket.len,
        ticket.platform.display_name(),
        ticket.destination
    );

    for report in router.wait_for_deliveries().await {
        print_report(&report);
    }

    if browser.launched_chrome().await {
        info!("Leaving the Chrome instance started by docrelay open");
    }
    browser.close().await?;
    Ok(())
}

/// Route one JSON action and print the response.
pub(crate) async fn message(config: Config, json: &str) -> Result<(), Box<dyn std::error::Error>> {
    let action = Action::from_json(json)?;
    info!("Routing {} from the command line", action.name());

    let browser = crate::browser(&config);
    let router = Arc::new(MessageRouter::new(config, browser.clone()));

    let response = router.route(action).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    for report in router.wait_for_deliveries().await {
        print_report(&report);
    }

    browser.close().await?;
    Ok(())
}

fn print_report(report: &DriverReport) {
    if report.is_noop() {
        warn!("{} had nothing to claim", report.platform.display_name());
        println!("{}: nothing was pending", report.platform.display_name());
        return;
    }

    let submitted = match report.submit {
        Some(submit) => format!("submitted ({:?})", submit),
        None => "not submitted".to_string(),
    };
    println!(
        "{}: {} after {:?}",
        report.platform.display_name(),
        submitted,
        report.state()
    );
    for failure in &report.failures {
        println!("  - {}", failure);
    }
}
