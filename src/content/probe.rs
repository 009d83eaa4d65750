//! HTTPS probe content view.
//!
//! A terminal cannot render the hosted page, so this view does the part of a
//! browser the shell cares about: it fetches each document, reports the load
//! lifecycle, surfaces redirects as navigation requests and pulls out the
//! document title. It keeps its own back-stack so `can_go_back` behaves like a
//! real view's.

use crate::app::event::{AppEvent, ContentEvent};
use crate::config::ContentConfig;
use anyhow::{anyhow, bail, Context, Result};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url::Url;

use super::ContentView;

/// Upper bound on how much of a response body is read.
const MAX_RESPONSE_BYTES: usize = 512 * 1024;

/// Consecutive redirects followed before the load is reported as failed.
const MAX_REDIRECTS: u32 = 20;

pub struct ProbeView {
    client: Client,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    history: Vec<Url>,
    injected_script: String,
    outbox: Vec<String>,
    /// Redirects followed since the last user-initiated load.
    redirects: u32,
    task: Option<JoinHandle<()>>,
}

impl ProbeView {
    pub fn new(config: &ContentConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Result<Self> {
        // Redirects come back to the shell so it can veto off-origin hops
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .redirect(Policy::none())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            event_tx,
            history: Vec::new(),
            injected_script: String::new(),
            outbox: Vec::new(),
            redirects: 0,
            task: None,
        })
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    #[cfg(test)]
    pub fn history(&self) -> &[Url] {
        &self.history
    }

    /// Messages posted to the page so far. A probe has no DOM to run the
    /// injected script, so they are only kept here.
    #[cfg(test)]
    pub fn outbox(&self) -> &[String] {
        &self.outbox
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// (Re)fetch the top of the history stack, abandoning any load in flight.
    fn start(&mut self) -> Result<()> {
        let url = self
            .history
            .last()
            .cloned()
            .ok_or_else(|| anyhow!("Nothing has been loaded yet"))?;
        self.abort_in_flight();

        tracing::debug!(
            "probing {} ({} bytes of injected script)",
            url,
            self.injected_script.len()
        );
        let can_go_back = self.can_go_back();
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        self.task = Some(tokio::spawn(async move {
            run_probe(url, can_go_back, client, event_tx).await;
        }));
        Ok(())
    }
}

impl ContentView for ProbeView {
    fn load(&mut self, url: &Url, injected_script: &str) -> Result<()> {
        self.injected_script = injected_script.to_string();
        self.history.clear();
        self.history.push(url.clone());
        self.redirects = 0;
        self.start()
    }

    fn reload(&mut self) -> Result<()> {
        self.redirects = 0;
        self.start()
    }

    fn go_back(&mut self) -> Result<()> {
        if !self.can_go_back() {
            bail!("There is no previous page");
        }
        self.history.pop();
        self.redirects = 0;
        self.start()
    }

    fn navigate(&mut self, url: &Url) -> Result<()> {
        self.history.push(url.clone());
        self.redirects = 0;
        self.start()
    }

    fn replace(&mut self, url: &Url) -> Result<()> {
        self.redirects += 1;
        if self.redirects > MAX_REDIRECTS {
            self.abort_in_flight();
            let _ = self.event_tx.send(AppEvent::Content(ContentEvent::LoadError {
                url: url.to_string(),
                code: None,
                description: Some(format!("Too many redirects (more than {})", MAX_REDIRECTS)),
            }));
            return Ok(());
        }
        match self.history.last_mut() {
            Some(top) => *top = url.clone(),
            None => self.history.push(url.clone()),
        }
        self.start()
    }

    fn post_message(&mut self, data: &str) -> Result<()> {
        self.outbox.push(data.to_string());
        tracing::debug!("post_message #{} {}", self.outbox.len(), data);
        Ok(())
    }
}

impl Drop for ProbeView {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

async fn run_probe(
    url: Url,
    can_go_back: bool,
    client: Client,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) {
    let send = |event: ContentEvent| {
        let _ = event_tx.send(AppEvent::Content(event));
    };

    send(ContentEvent::LoadStart {
        url: url.to_string(),
    });
    send(ContentEvent::NavigationStateChange {
        url: url.to_string(),
        can_go_back,
        redirect: false,
    });

    let events = match fetch(&client, &url).await {
        Ok(response) => outcome(&url, can_go_back, &response),
        Err(e) => {
            let timed_out = e
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout);
            let description = if timed_out {
                "The request timed out.".to_string()
            } else {
                format!("{:#}", e)
            };
            vec![ContentEvent::LoadError {
                url: url.to_string(),
                code: None,
                description: Some(description),
            }]
        }
    };
    for event in events {
        send(event);
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ProbeResponse {
    status: u16,
    reason: String,
    location: Option<String>,
    title: Option<String>,
}

async fn fetch(client: &Client, url: &Url) -> Result<ProbeResponse> {
    let mut response = client.get(url.as_str()).send().await?;

    let status = response.status();
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
        if body.len() >= MAX_RESPONSE_BYTES {
            break;
        }
    }

    Ok(ProbeResponse {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        location,
        title: extract_title(&String::from_utf8_lossy(&body)),
    })
}

fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find("</title")?;
    let title = html_escape::decode_html_entities(&html[start..end]);
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Translate a response into the events a browser would have reported.
fn outcome(url: &Url, can_go_back: bool, response: &ProbeResponse) -> Vec<ContentEvent> {
    let mut events = Vec::new();
    match response.status {
        200..=299 => {
            if let Some(title) = &response.title {
                events.push(ContentEvent::PageTitle {
                    title: title.clone(),
                });
            }
            events.push(ContentEvent::LoadEnd {
                url: url.to_string(),
            });
        }
        300..=399 if response.location.is_some() => {
            let location = response.location.as_deref().unwrap_or_default();
            let target = url
                .join(location)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| location.to_string());
            events.push(ContentEvent::LoadEnd {
                url: url.to_string(),
            });
            events.push(ContentEvent::NavigationStateChange {
                url: target,
                can_go_back,
                redirect: true,
            });
        }
        status => {
            let description = if response.reason.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {} {}", status, response.reason)
            };
            events.push(ContentEvent::LoadError {
                url: url.to_string(),
                code: Some(i32::from(status)),
                description: Some(description),
            });
        }
    }
    events
}
