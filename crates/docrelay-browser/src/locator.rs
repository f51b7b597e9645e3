//! Ordered element-location strategies.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::manager::BrowserError;
use crate::page::{ElementHandle, ElementInfo, Page};

/// One way of finding elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    /// Every element matching a CSS selector.
    Css { selector: String },
    /// Elements matching `selector` whose aria-label or text contains any of
    /// `contains`, compared case-insensitively.
    Text {
        selector: String,
        contains: Vec<String>,
    },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css {
            selector: selector.into(),
        }
    }

    pub fn text<I, S>(selector: impl Into<String>, contains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Locator::Text {
            selector: selector.into(),
            contains: contains.into_iter().map(Into::into).collect(),
        }
    }

    /// Matches in document order.
    pub async fn resolve(
        &self,
        page: &dyn Page,
        scope: Option<&ElementHandle>,
    ) -> Result<Vec<ElementInfo>, BrowserError> {
        match self {
            Locator::Css { selector } => page.query(selector, scope).await,
            Locator::Text { selector, contains } => {
                let candidates = page.query(selector, scope).await?;
                Ok(candidates
                    .into_iter()
                    .filter(|el| el.mentions_any(contains))
                    .collect())
            }
        }
    }
}

/// An ordered list of locators; earlier locators take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorStrategy {
    locators: Vec<Locator>,
}

impl SelectorStrategy {
    pub fn new(locators: Vec<Locator>) -> Self {
        Self { locators }
    }

    /// Strategy of plain CSS selectors.
    pub fn css<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(selectors.into_iter().map(Locator::css).collect())
    }

    /// Append a locator.
    pub fn then(mut self, locator: Locator) -> Self {
        self.locators.push(locator);
        self
    }

    pub fn locators(&self) -> &[Locator] {
        &self.locators
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Every match of every locator, in locator order, without duplicates.
    pub async fn find_all(
        &self,
        page: &dyn Page,
        scope: Option<&ElementHandle>,
    ) -> Result<Vec<ElementInfo>, BrowserError> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for locator in &self.locators {
            for el in locator.resolve(page, scope).await? {
                if seen.insert(el.handle.clone()) {
                    found.push(el);
                }
            }
        }
        Ok(found)
    }

    /// First match accepted by `accept`, trying locators in order.
    pub async fn find_first<F>(
        &self,
        page: &dyn Page,
        scope: Option<&ElementHandle>,
        accept: F,
    ) -> Result<Option<ElementInfo>, BrowserError>
    where
        F: Fn(&ElementInfo) -> bool + Send + Sync,
    {
        for locator in &self.locators {
            let matches = locator.resolve(page, scope).await?;
            if let Some(el) = matches.into_iter().find(|el| accept(el)) {
                return Ok(Some(el));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
