//! Simulated market data
//!
//! Generates the asset buckets shown by the ticker, marquee and market
//! overview. Prices are random at startup and static afterwards; there
//! is no order matching anywhere in the platform.

use protrade_core::MarketConfig;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::debug;

/// Market segments and their asset code prefixes
const SEGMENTS: [(&str, &str); 5] = [
    ("crypto", "CR"),
    ("equities", "EQ"),
    ("forex", "FX"),
    ("commodities", "CM"),
    ("global", "GL"),
];

/// A simulated tradable asset
#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    pub code: String,
    pub name: String,
    pub price: f64,
    /// Daily change in percent, -3.0..=3.0
    pub change: f64,
}

/// One market segment and its generated assets
#[derive(Debug, Clone, Serialize)]
pub struct MarketSegment {
    pub key: String,
    pub assets: Vec<Asset>,
}

/// A news feed entry
#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub tag: String,
    pub time: String,
    pub summary: String,
}

/// Display mode of the admin-controlled market feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    Live,
    Delayed,
}

impl std::fmt::Display for FeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedMode::Live => write!(f, "live"),
            FeedMode::Delayed => write!(f, "delayed"),
        }
    }
}

impl std::str::FromStr for FeedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(FeedMode::Live),
            "delayed" => Ok(FeedMode::Delayed),
            _ => Err(format!("Unknown feed mode: {}", s)),
        }
    }
}

/// Simulated market data, generated once at startup
pub struct MarketData {
    segments: Vec<MarketSegment>,
    news: Vec<NewsItem>,
    feed_mode: RwLock<FeedMode>,
    marquee_size: usize,
    overview_size: usize,
}

impl MarketData {
    pub fn generate(config: &MarketConfig) -> Self {
        let segments = SEGMENTS
            .iter()
            .map(|(key, prefix)| MarketSegment {
                key: key.to_string(),
                assets: (0..config.assets_per_segment)
                    .map(|i| Asset {
                        code: format!("{}{:03}", prefix, i + 1),
                        name: format!("{} Asset {:03}", key.to_uppercase(), i + 1),
                        price: round2(10.0 + fastrand::f64() * 900.0),
                        change: round2((fastrand::f64() - 0.5) * 6.0),
                    })
                    .collect(),
            })
            .collect();

        debug!(
            "Generated {} market segments with {} assets each",
            SEGMENTS.len(),
            config.assets_per_segment
        );

        Self {
            segments,
            news: sample_news(),
            feed_mode: RwLock::new(FeedMode::Live),
            marquee_size: config.marquee_size,
            overview_size: config.overview_size,
        }
    }

    /// All segments with their full asset lists
    pub fn segments(&self) -> &[MarketSegment] {
        &self.segments
    }

    /// The leading slice of all assets, for the ticker marquee
    pub fn marquee(&self) -> Vec<Asset> {
        self.segments
            .iter()
            .flat_map(|s| s.assets.iter().cloned())
            .take(self.marquee_size)
            .collect()
    }

    /// Per-segment overview: the first few assets of each segment
    pub fn overview(&self) -> Vec<MarketSegment> {
        self.segments
            .iter()
            .map(|s| MarketSegment {
                key: s.key.clone(),
                assets: s.assets.iter().take(self.overview_size).cloned().collect(),
            })
            .collect()
    }

    /// Look up an asset by segment key and code
    pub fn find_asset(&self, segment: &str, code: &str) -> Option<&Asset> {
        self.segments
            .iter()
            .find(|s| s.key == segment)?
            .assets
            .iter()
            .find(|a| a.code == code)
    }

    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    pub fn feed_mode(&self) -> FeedMode {
        *self.feed_mode.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_feed_mode(&self, mode: FeedMode) {
        *self.feed_mode.write().unwrap_or_else(|e| e.into_inner()) = mode;
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sample_news() -> Vec<NewsItem> {
    let items = [
        (
            "Central bank rate guidance updated",
            "Macro",
            "08:45",
            "Pressure on the dollar index eased across emerging-market pairs while the local currency outlook stayed neutral.",
        ),
        (
            "Energy commodities pull back mildly",
            "Commodities",
            "09:10",
            "Rising supply is balancing oil contracts while gold regains its safe-haven bid.",
        ),
        (
            "Institutional demand grows in crypto assets",
            "Crypto",
            "10:05",
            "On-chain data shows accelerating BTC transfers out of institutional wallets.",
        ),
        (
            "Record dividends from index heavyweights",
            "Equities",
            "10:40",
            "Banking sector earnings support the index while industrials trade flat.",
        ),
        (
            "Key support level holds in the pair",
            "Forex",
            "11:25",
            "EUR/USD managed to hold above 1.07; central bank remarks may add volatility.",
        ),
    ];

    items
        .into_iter()
        .map(|(title, tag, time, summary)| NewsItem {
            title: title.to_string(),
            tag: tag.to_string(),
            time: time.to_string(),
            summary: summary.to_string(),
        })
        .collect()
}
