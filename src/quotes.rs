use std::fmt;
use std::time::Duration;

use rand::seq::IndexedRandom;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::models::CachedQuote;
use crate::state::AppState;

pub const FALLBACK_QUOTES: [(&str, &str); 3] = [
    ("The secret of getting ahead is getting started.", "Mark Twain"),
    (
        "You don't have to be great to start, but you have to start to be great.",
        "Zig Ziglar",
    ),
    (
        "Small daily improvements lead to stunning results.",
        "Robin Sharma",
    ),
];

const DEFAULT_ENDPOINT: &str = "https://type.fit/api/quotes";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const REFRESH_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    text: Option<String>,
    author: Option<String>,
}

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Status(StatusCode),
    NoValidQuotes,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(err) => write!(f, "request failed: {err}"),
            FetchError::Status(status) => write!(f, "unexpected status {status}"),
            FetchError::NoValidQuotes => write!(f, "response contained no usable quotes"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

#[derive(Clone)]
pub struct QuoteProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl QuoteProvider {
    pub fn new(endpoint: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        let endpoint =
            std::env::var("QUOTES_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }

    pub async fn fetch(&self) -> Quote {
        match self.fetch_remote().await {
            Ok(quotes) => pick(&quotes),
            Err(err) => {
                warn!("quote fetch failed, using fallback: {err}");
                fallback()
            }
        }
    }

    async fn fetch_remote(&self) -> Result<Vec<Quote>, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        let entries: Vec<QuoteEntry> = response.json().await?;
        let quotes = valid_quotes(entries);
        if quotes.is_empty() {
            return Err(FetchError::NoValidQuotes);
        }
        Ok(quotes)
    }
}

pub fn fallback() -> Quote {
    let mut rng = rand::rng();
    let (text, author) = FALLBACK_QUOTES
        .choose(&mut rng)
        .copied()
        .unwrap_or(FALLBACK_QUOTES[0]);
    Quote {
        text: text.to_string(),
        author: author.to_string(),
    }
}

fn pick(quotes: &[Quote]) -> Quote {
    let mut rng = rand::rng();
    quotes.choose(&mut rng).cloned().unwrap_or_else(fallback)
}

fn valid_quotes(entries: Vec<QuoteEntry>) -> Vec<Quote> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let text = entry.text?.trim().to_string();
            if text.is_empty() {
                return None;
            }
            let author = entry
                .author
                .map(|author| author.replace(", type.fit", ""))
                .filter(|author| !author.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string());
            Some(Quote { text, author })
        })
        .collect()
}

pub async fn quote_of_the_day(state: &AppState) -> Quote {
    let today = state.clock.now().date_naive().to_string();
    if let Some(cached) = state.store.cached_quote().await {
        if cached.date == today {
            return Quote {
                text: cached.text,
                author: cached.author,
            };
        }
    }
    let quote = state.quotes.fetch().await;
    let cached = CachedQuote {
        date: today,
        text: quote.text.clone(),
        author: quote.author.clone(),
    };
    if let Err(err) = state.store.cache_quote(cached).await {
        warn!("failed to persist daily quote: {}", err.message);
    }
    quote
}

pub async fn run_refresh(state: AppState, mut shutdown: watch::Receiver<bool>) {
    let mut interval = tokio::time::interval(REFRESH_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let quote = quote_of_the_day(&state).await;
                debug!("daily quote ready: {} ({})", quote.text, quote.author);
            }
            _ = shutdown.changed() => {
                info!("quote refresh task stopping");
                return;
            }
        }
    }
}
