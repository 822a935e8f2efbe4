//! Thin driver over the storefront DOM. Selectors match the ids the web
//! frontend renders.
use std::time::Duration;

use cafe_core::{OrderStage, Section};
use once_cell::sync::Lazy;
use regex::Regex;
use thirtyfour::prelude::*;
use thiserror::Error;

static CLOCK: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\s*(?P<min>\d{2}):(?P<sec>[0-5]\d)\s*$").ok());

/// Time given to the app to re-render after a click.
const SETTLE: Duration = Duration::from_millis(150);

#[derive(Debug, Error)]
pub enum PageError {
    #[error("{selector} not found on the page")]
    Missing {
        selector: String,
        #[source]
        source: WebDriverError,
    },
    #[error("countdown shows {0:?}, expected MM:SS")]
    Clock(String),
    #[error(transparent)]
    Driver(#[from] WebDriverError),
}

/// Seconds shown by an `MM:SS` countdown.
pub fn parse_clock(text: &str) -> Option<u32> {
    let caps = CLOCK.as_ref()?.captures(text)?;
    let min: u32 = caps["min"].parse().ok()?;
    let sec: u32 = caps["sec"].parse().ok()?;
    Some(min * 60 + sec)
}

#[derive(Debug, Clone)]
pub struct StorefrontPage<'a> {
    driver: &'a WebDriver,
}

impl<'a> StorefrontPage<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    async fn find(&self, selector: &str) -> Result<WebElement, PageError> {
        self.driver
            .find(By::Css(selector))
            .await
            .map_err(|source| PageError::Missing {
                selector: selector.to_string(),
                source,
            })
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        self.find(selector).await?.click().await?;
        tokio::time::sleep(SETTLE).await;
        Ok(())
    }

    pub async fn open(&self, url: &str) -> Result<(), PageError> {
        self.driver.goto(url).await?;
        self.find("#main").await?;
        Ok(())
    }

    pub async fn show(&self, section: Section) -> Result<(), PageError> {
        self.click(&format!("#nav-{}", section.key())).await
    }

    /// Press the add button of the menu card for `item_id`.
    pub async fn add_item(&self, item_id: &str) -> Result<(), PageError> {
        self.click(&format!("[data-item='{item_id}'] .add-btn")).await
    }

    pub async fn select_stage(&self, stage: OrderStage) -> Result<(), PageError> {
        self.click(&format!("#stage-{}", stage.key())).await
    }

    pub async fn is_disabled(&self, stage: OrderStage) -> Result<bool, PageError> {
        let button = self.find(&format!("#stage-{}", stage.key())).await?;
        Ok(!button.is_enabled().await?)
    }

    pub async fn text(&self, selector: &str) -> Result<String, PageError> {
        Ok(self.find(selector).await?.text().await?)
    }

    pub async fn countdown_secs(&self) -> Result<u32, PageError> {
        let text = self.text("#countdown").await?;
        parse_clock(&text).ok_or(PageError::Clock(text))
    }
}
