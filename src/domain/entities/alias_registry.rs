use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::domain::value_objects::alias_name::AliasName;

/// Alias registry errors
#[derive(Debug, Error)]
pub enum AliasError {
    #[error("Alias '{0}' already exists, you should delete the alias first")]
    AlreadyExists(String),

    #[error("The alias '{0}' is not known")]
    Unknown(String),
}

/// Manifest URLs registered under short names, persisted across invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRegistry {
    #[serde(default)]
    aliases: BTreeMap<AliasName, String>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let alias = AliasName::new(name).ok()?;
        self.aliases.get(&alias).map(String::as_str)
    }

    /// Resolves `name` or fails; alias lookups always feed a required URL.
    pub fn resolve(&self, name: &str) -> Result<&str, AliasError> {
        self.get(name)
            .ok_or_else(|| AliasError::Unknown(name.to_string()))
    }

    pub fn add(&mut self, name: AliasName, url: impl Into<String>) -> Result<(), AliasError> {
        if self.aliases.contains_key(&name) {
            return Err(AliasError::AlreadyExists(name.to_string()));
        }
        self.aliases.insert(name, url.into());
        Ok(())
    }

    /// Returns `false` when nothing was registered under `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        match AliasName::new(name) {
            Ok(alias) => self.aliases.remove(&alias).is_some(),
            Err(_) => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AliasName, &str)> {
        self.aliases.iter().map(|(name, url)| (name, url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl fmt::Display for AliasRegistry {
    /// One `name => url` line per alias, sorted, arrows aligned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .aliases
            .keys()
            .map(|name| name.as_str().len())
            .max()
            .unwrap_or(0);
        writeln!(f, "Aliases:")?;
        for (name, url) in self.iter() {
            writeln!(f, "  {:<width$} => {}", name.as_str(), url, width = width)?;
        }
        Ok(())
    }
}
