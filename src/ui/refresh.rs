use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ui::controller::{Effect, VoteController};

static RESULTS_PANEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".card:last-of-type .card-body").expect("valid selector"));

/// Errors that can occur while re-fetching the voting page
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Page fetch returned status {0}")]
    Status(u16),
}

/// Why a tick did not touch the results panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSkip {
    Detached,
    NotVotingView,
    Hidden,
    SelectionInProgress,
}

#[derive(Debug, PartialEq)]
pub enum RefreshOutcome {
    Skipped(RefreshSkip),
    /// Network or HTTP failure; stale content stays
    Failed,
    /// The fetched page had no results panel
    MissingPanel,
    Updated(Vec<Effect>),
}

/// Source of the current page's markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, RefreshError>;
}

/// Plain HTTP GET of the page
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, RefreshError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, RefreshError> {
        tracing::debug!("Refreshing results from: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(RefreshError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Inner markup of the results panel (`.card:last-of-type .card-body`)
pub fn extract_results_panel(document: &str) -> Option<String> {
    let html = Html::parse_document(document);
    html.select(&RESULTS_PANEL).next().map(|panel| panel.inner_html())
}

/// Periodically splices fresh results into an idle voting view
pub struct AutoRefresher<F> {
    fetcher: F,
    page_url: String,
    interval: Duration,
}

impl<F: PageFetcher> AutoRefresher<F> {
    pub fn new(fetcher: F, page_url: impl Into<String>, interval: Duration) -> Self {
        Self {
            fetcher,
            page_url: page_url.into(),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// One refresh attempt
    ///
    /// The controller lock is only held for the gate check and the splice,
    /// never across the fetch.
    pub async fn tick(&self, controller: &Mutex<VoteController>, visible: bool) -> RefreshOutcome {
        let gate = controller.lock().await.refresh_gate(visible);
        if let Err(skip) = gate {
            return RefreshOutcome::Skipped(skip);
        }

        let document = match self.fetcher.fetch_page(&self.page_url).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Results refresh failed: {}", e);
                return RefreshOutcome::Failed;
            }
        };

        let Some(fragment) = extract_results_panel(&document) else {
            tracing::debug!("Fetched page has no results panel");
            return RefreshOutcome::MissingPanel;
        };

        let spliced = controller.lock().await.splice_results(fragment);
        match spliced {
            Ok(effects) => RefreshOutcome::Updated(effects),
            Err(skip) => {
                tracing::debug!("Discarding refreshed results: {:?}", skip);
                RefreshOutcome::Skipped(skip)
            }
        }
    }
}

impl<F: PageFetcher + 'static> AutoRefresher<F> {
    /// Run ticks on a timer until the handle is stopped or dropped
    ///
    /// Effects of successful splices are sent to `effects`; the loop ends
    /// when the receiver is gone or the controller is detached.
    pub fn spawn(
        self,
        controller: Arc<Mutex<VoteController>>,
        visibility: Arc<AtomicBool>,
        effects: mpsc::UnboundedSender<Vec<Effect>>,
    ) -> RefreshHandle {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let visible = visibility.load(Ordering::Relaxed);
                match self.tick(&controller, visible).await {
                    RefreshOutcome::Updated(update) => {
                        if effects.send(update).is_err() {
                            break;
                        }
                    }
                    RefreshOutcome::Skipped(RefreshSkip::Detached) => {
                        tracing::debug!("Controller detached, stopping results refresh");
                        break;
                    }
                    outcome => tracing::trace!("Refresh tick: {:?}", outcome),
                }
            }
        });

        RefreshHandle { task }
    }
}

/// Running refresh loop; dropping it stops the timer
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(self) {
        drop(self);
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiSettings;
    use crate::models::VotingOption;
    use crate::ui::controller::{PollPage, UiEvent};
    use std::sync::atomic::AtomicUsize;

    const PAGE: &str = r#"<html><body><div class="container">
        <div class="card"><div class="card-body">form</div></div>
        <div class="card"><div class="card-body"><div class="progress-bar" style="width: 75%">3</div></div></div>
    </div></body></html>"#;

    struct StaticFetcher {
        body: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch_page(&self, _url: &str) -> Result<String, RefreshError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn controller() -> Arc<Mutex<VoteController>> {
        let page = PollPage {
            path: "/".to_string(),
            options: vec![VotingOption::new("0", "A"), VotingOption::new("1", "B")],
            has_vote_form: true,
            results_html: "old".to_string(),
            edit_pairs: vec![],
        };
        let mut controller = VoteController::new(page, UiSettings::default());
        controller.attach();
        Arc::new(Mutex::new(controller))
    }

    #[test]
    fn test_extract_results_panel_uses_last_card() {
        let panel = extract_results_panel(PAGE).unwrap();
        assert!(panel.contains("width: 75%"));
        assert!(!panel.contains("form"));
        assert_eq!(extract_results_panel("<p>nothing</p>"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_loop_refreshes_and_respects_selection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = StaticFetcher {
            body: PAGE.to_string(),
            calls: calls.clone(),
        };
        let controller = controller();
        let visibility = Arc::new(AtomicBool::new(true));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = AutoRefresher::new(fetcher, "http://poll.local/", Duration::from_secs(30)).spawn(
            controller.clone(),
            visibility,
            tx,
        );

        let update = rx.recv().await.unwrap();
        assert!(matches!(update[0], Effect::ReplaceResults(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        controller
            .lock()
            .await
            .handle(UiEvent::OptionClicked("1".to_string()));
        let results_before = controller.lock().await.results_html().to_string();

        tokio::time::sleep(Duration::from_secs(95)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let guard = controller.lock().await;
        assert_eq!(guard.results_html(), results_before);
        assert!(guard.is_selected("1"));
        drop(guard);

        assert!(handle.is_running());
        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_ends_loop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = StaticFetcher {
            body: PAGE.to_string(),
            calls: calls.clone(),
        };
        let controller = controller();
        let (tx, _rx) = mpsc::unbounded_channel();

        let handle = AutoRefresher::new(fetcher, "http://poll.local/", Duration::from_secs(30)).spawn(
            controller.clone(),
            Arc::new(AtomicBool::new(true)),
            tx,
        );
        controller.lock().await.detach();

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_loop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = StaticFetcher {
            body: PAGE.to_string(),
            calls: calls.clone(),
        };
        let (tx, _rx) = mpsc::unbounded_channel();

        let handle = AutoRefresher::new(fetcher, "http://poll.local/", Duration::from_secs(30)).spawn(
            controller(),
            Arc::new(AtomicBool::new(true)),
            tx,
        );
        drop(handle);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
