use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// AliasName related errors
#[derive(Debug, Error, PartialEq)]
pub enum AliasNameError {
    #[error("Alias name cannot be empty")]
    Empty,

    #[error("'{0}' is not a valid alias")]
    NotAnIdentifier(String),
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("alias pattern is a valid regex")
    })
}

/// Name under which a manifest URL is registered.
///
/// Aliases are plain identifiers: a letter or underscore followed by letters,
/// digits or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AliasName {
    name: String,
}

impl AliasName {
    pub fn new(name: &str) -> Result<Self, AliasNameError> {
        if name.is_empty() {
            return Err(AliasNameError::Empty);
        }
        if !identifier_pattern().is_match(name) {
            return Err(AliasNameError::NotAnIdentifier(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for AliasName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for AliasName {
    type Err = AliasNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AliasName {
    type Error = AliasNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<AliasName> for String {
    fn from(alias: AliasName) -> Self {
        alias.name
    }
}
