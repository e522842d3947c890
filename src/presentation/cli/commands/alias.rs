use crate::common::result::WtsrcResult;
use crate::infrastructure::filesystem::alias_store::{AliasDefinition, AliasStore};

/// Handler for the add-alias command
pub struct AddAliasCommand {
    pub definition: AliasDefinition,
}

impl AddAliasCommand {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            definition: AliasDefinition::new(name, url),
        }
    }

    pub fn execute(&self, store: &AliasStore) -> WtsrcResult<()> {
        let name = self.definition.validated_name()?;
        let mut registry = store.load()?;
        registry.add(name, self.definition.url.clone())?;
        store.save(&registry)?;
        tracing::info!("added alias '{}'", self.definition.name);
        Ok(())
    }
}

/// Handler for the remove-alias command
pub struct RemoveAliasCommand {
    pub name: String,
}

impl RemoveAliasCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn execute(&self, store: &AliasStore) -> WtsrcResult<()> {
        let mut registry = store.load()?;
        if registry.remove(&self.name) {
            store.save(&registry)?;
        } else {
            tracing::warn!("The alias '{}' is not known", self.name);
        }
        Ok(())
    }
}

/// Handler for the aliases command
pub struct ListAliasesCommand;

impl ListAliasesCommand {
    /// The alias file location followed by its aliases.
    pub fn render(&self, store: &AliasStore) -> WtsrcResult<String> {
        let registry = store.load()?;
        Ok(format!("File: {}\n{}", store.path().display(), registry))
    }

    pub fn execute(&self, store: &AliasStore) -> WtsrcResult<()> {
        print!("{}", self.render(store)?);
        Ok(())
    }
}

/// URL registered under `name`; unknown aliases are fatal.
pub fn resolve_alias(store: &AliasStore, name: &str) -> WtsrcResult<String> {
    let registry = store.load()?;
    Ok(registry.resolve(name)?.to_string())
}
