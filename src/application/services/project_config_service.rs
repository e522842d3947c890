//! Parsing of `wtsrc.yml` into a [`ProjectConfig`].
//!
//! The document is deserialized with strict visitors: every section must be a
//! mapping, hook and action texts must be YAML strings (a bare `5` or `true`
//! is rejected rather than coerced), and entries are kept in document order so
//! duplicated names reach the model and are reported instead of the last one
//! silently winning.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::entities::command_registry::CommandRegistry;
use crate::domain::entities::project_config::{
    Action, CommandHooks, ConfigWarning, ProjectConfig, ProjectModelError,
};

/// Fatal problems with a project file.
#[derive(Debug, Error)]
pub enum ProjectConfigError {
    #[error("Cannot read project file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid project file {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid project file {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: ProjectModelError,
    },
}

/// Builds project configurations from YAML text.
pub struct ProjectConfigService<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> ProjectConfigService<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }

    /// Parses `source`; `origin` only labels errors.
    pub fn parse_str(&self, source: &str, origin: &Path) -> Result<ProjectConfig, ProjectConfigError> {
        let document: ProjectDocument = if source.trim().is_empty() {
            ProjectDocument::default()
        } else {
            serde_yaml::from_str::<Option<ProjectDocument>>(source)
                .map_err(|source| ProjectConfigError::Schema {
                    path: origin.to_path_buf(),
                    source,
                })?
                .unwrap_or_default()
        };

        self.build(document).map_err(|source| ProjectConfigError::Model {
            path: origin.to_path_buf(),
            source,
        })
    }

    fn build(&self, document: ProjectDocument) -> Result<ProjectConfig, ProjectModelError> {
        let mut config = ProjectConfig::new();

        match document.commands {
            Some(Section(entries)) => {
                for (name, hooks) in entries {
                    let hooks = hooks.unwrap_or_default();
                    config.add_command(CommandHooks::new(name, hooks.pre, hooks.post), self.registry)?;
                }
            }
            None => config.warn(ConfigWarning::MissingSection { section: "commands" }),
        }

        match document.actions {
            Some(Section(entries)) => {
                for (name, entry) in entries {
                    let mut action = Action::new(name, entry.action);
                    action.comment = entry.comment;
                    config.add_action(action)?;
                }
            }
            None => config.warn(ConfigWarning::MissingSection { section: "actions" }),
        }

        Ok(config)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProjectDocument {
    #[serde(default, deserialize_with = "present")]
    commands: Option<Section<Option<CommandEntry>>>,

    #[serde(default, deserialize_with = "present")]
    actions: Option<Section<ActionEntry>>,
}

#[derive(Debug, Default, Deserialize)]
struct CommandEntry {
    #[serde(default, deserialize_with = "optional_string")]
    pre: Option<String>,

    #[serde(default, deserialize_with = "optional_string")]
    post: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionEntry {
    #[serde(deserialize_with = "required_string")]
    action: String,

    #[serde(default, deserialize_with = "optional_string")]
    comment: Option<String>,
}

/// A mapping section, entries in document order, duplicates preserved.
#[derive(Debug)]
struct Section<T>(Vec<(String, T)>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Section<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for SectionVisitor<T> {
            type Value = Section<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of names to definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, value)) = map.next_entry::<String, T>()? {
                    entries.push((name, value));
                }
                Ok(Section(entries))
            }
        }

        deserializer.deserialize_any(SectionVisitor(PhantomData))
    }
}

/// Accepts only YAML strings.
struct StrictString;

impl<'de> Visitor<'de> for StrictString {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }
}

fn required_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(StrictString)
}

/// A key that is present must hold a string; only absence means "none".
fn optional_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    required_string(deserializer).map(Some)
}

/// A section that is present must be a mapping, even when it is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
