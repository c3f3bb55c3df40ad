//! A small key/value store.
//!
//! Keys are identifiers (`[_a-zA-Z][_a-zA-Z0-9]*`) and values are single
//! lines of text, so the data maps onto `key=value` lines that are easy to
//! read in any language. Persistence is delegated to a [`Driver`].

mod driver;

pub use driver::{Driver, FileDriver, MemoryDriver};

use regex::Regex;
use std::collections::HashMap;
use std::io;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Key/value pairs as held by a [`Store`] and exchanged with drivers.
pub type Map = HashMap<String, String>;

/// Errors produced by the store and its drivers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid key '{0}'")]
    InvalidKey(String),
    #[error("invalid value for '{0}'")]
    InvalidValue(String),
    #[error("line {line}: expected key=value, found '{text}'")]
    Parse { line: usize, text: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").unwrap())
}

fn value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\n]*$").unwrap())
}

/// Returns true if `k` is a valid key.
pub fn check_key(k: &str) -> bool {
    key_regex().is_match(k)
}

/// Returns true if `v` is a valid value, i.e. it holds no line feed.
pub fn check_value(v: &str) -> bool {
    value_regex().is_match(v)
}

fn validate(data: &Map) -> Result<(), StoreError> {
    for (k, v) in data {
        if !check_key(k) {
            return Err(StoreError::InvalidKey(k.clone()));
        }
        if !check_value(v) {
            return Err(StoreError::InvalidValue(k.clone()));
        }
    }
    Ok(())
}

/// Key/value pairs plus the driver used to load and save them.
pub struct Store {
    data: Map,
    driver: Box<dyn Driver>,
}

impl Store {
    /// Creates an empty store backed by a [`MemoryDriver`].
    pub fn new() -> Self {
        Self::from_map(Map::new())
    }

    /// Creates a store holding `data`, backed by a [`MemoryDriver`].
    ///
    /// The pairs are taken as-is; use [`Store::set`] for checked inserts.
    pub fn from_map(data: Map) -> Self {
        Self {
            data,
            driver: Box::new(MemoryDriver::new()),
        }
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn set_driver(&mut self, driver: Box<dyn Driver>) {
        self.driver = driver;
    }

    /// Replaces all pairs with the ones loaded from the current driver.
    ///
    /// On error the store keeps its previous contents.
    pub fn load(&mut self) -> Result<(), StoreError> {
        self.data = Self::load_checked(&*self.driver)?;
        Ok(())
    }

    /// Like [`Store::load`] but reads from `driver` instead.
    pub fn load_via_driver(&mut self, driver: &dyn Driver) -> Result<(), StoreError> {
        self.data = Self::load_checked(driver)?;
        Ok(())
    }

    /// Writes all pairs through the current driver.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.driver.save(&self.data)
    }

    /// Writes all pairs through `driver`.
    pub fn save_via_driver(&self, driver: &mut dyn Driver) -> Result<(), StoreError> {
        driver.save(&self.data)
    }

    pub fn get(&self, k: &str) -> Option<&str> {
        self.data.get(k).map(String::as_str)
    }

    /// First character of the value.
    pub fn get_char(&self, k: &str) -> Option<char> {
        self.data.get(k).and_then(|v| v.chars().next())
    }

    /// Parses the value as `T`.
    ///
    /// `None` if the key is absent, `Some(Err(_))` if the value doesn't parse.
    pub fn get_parsed<T: FromStr>(&self, k: &str) -> Option<Result<T, T::Err>> {
        self.data.get(k).map(|v| v.parse::<T>())
    }

    /// Inserts or replaces a pair, returning the old value.
    pub fn set(
        &mut self,
        k: impl Into<String>,
        v: impl Into<String>,
    ) -> Result<Option<String>, StoreError> {
        let (k, v) = (k.into(), v.into());
        if !check_key(&k) {
            return Err(StoreError::InvalidKey(k));
        }
        if !check_value(&v) {
            return Err(StoreError::InvalidValue(k));
        }
        Ok(self.data.insert(k, v))
    }

    pub fn remove(&mut self, k: &str) -> Option<String> {
        self.data.remove(k)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn load_checked(driver: &dyn Driver) -> Result<Map, StoreError> {
        let data = driver.load()?;
        validate(&data)?;
        debug!(entries = data.len(), "loaded store");
        Ok(data)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
