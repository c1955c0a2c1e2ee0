//! In-memory session driver for exercising the workflow steps.

use crate::driver::{Locator, PageElement, SessionDriver, WaitCondition};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type ActionLog = Arc<Mutex<Vec<String>>>;

#[derive(Clone, Default)]
pub struct FakeElement {
    name: String,
    attributes: HashMap<String, String>,
    children: HashMap<Locator, Vec<FakeElement>>,
    log: ActionLog,
}

impl FakeElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(mut self, locator: Locator, element: FakeElement) -> Self {
        self.children.entry(locator).or_default().push(element);
        self
    }

    fn with_log(mut self, log: &ActionLog) -> Self {
        self.log = log.clone();
        self.children = self
            .children
            .into_iter()
            .map(|(k, v)| (k, v.into_iter().map(|e| e.with_log(log)).collect()))
            .collect();
        self
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attributes.get(name).cloned())
    }

    async fn click(&self) -> Result<()> {
        self.log.lock().unwrap().push(format!("click {}", self.name));
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("keys {} {}", self.name, text));
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>> {
        Ok(self.children.get(locator).cloned().unwrap_or_default())
    }
}

/// Page contents keyed by locator; anything absent times out
#[derive(Default)]
pub struct FakeDriver {
    elements: HashMap<Locator, Vec<FakeElement>>,
    unclickable: HashSet<Locator>,
    pub log: ActionLog,
    pub navigations: Vec<String>,
    pub quit_calls: usize,
    pub broken: bool,
    disconnect_at: Option<Locator>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: Locator, element: FakeElement) -> Self {
        let element = element.with_log(&self.log);
        self.elements.entry(locator).or_default().push(element);
        self
    }

    /// Present in the DOM but never clickable
    pub fn unclickable(mut self, locator: Locator) -> Self {
        self.unclickable.insert(locator);
        self
    }

    /// Every call fails as if the browser connection dropped
    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }

    /// The connection drops as soon as `locator` is waited on
    pub fn disconnect_at(mut self, locator: Locator) -> Self {
        self.disconnect_at = Some(locator);
        self
    }

    fn touch(&mut self, locator: &Locator) {
        if self.disconnect_at.as_ref() == Some(locator) {
            self.broken = true;
        }
    }

    pub fn actions(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn check_connection(&self) -> Result<()> {
        if self.broken {
            return Err(Error::Cdp("connection closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionDriver for FakeDriver {
    type Element = FakeElement;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.check_connection()?;
        self.navigations.push(url.to_string());
        Ok(())
    }

    async fn wait_for(
        &mut self,
        locator: &Locator,
        condition: WaitCondition,
        timeout: Duration,
    ) -> Result<FakeElement> {
        self.touch(locator);
        self.check_connection()?;
        let blocked =
            condition == WaitCondition::Clickable && self.unclickable.contains(locator);
        match self.elements.get(locator).and_then(|v| v.first()) {
            Some(element) if !blocked => Ok(element.clone()),
            _ => Err(Error::Timeout {
                locator: locator.to_string(),
                waited: timeout,
            }),
        }
    }

    async fn wait_for_all(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<FakeElement>> {
        self.touch(locator);
        self.check_connection()?;
        match self.elements.get(locator) {
            Some(elements) if !elements.is_empty() => Ok(elements.clone()),
            _ => Err(Error::Timeout {
                locator: locator.to_string(),
                waited: timeout,
            }),
        }
    }

    async fn quit(&mut self) -> Result<()> {
        self.quit_calls += 1;
        Ok(())
    }
}
