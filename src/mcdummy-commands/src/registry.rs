//! Command registry mapping aliases to definitions.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::command::CommandDefinition;
use crate::error::RegistryError;

/// Somewhere command definitions come from.
pub trait CommandSource {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Produce every definition this source offers.
    fn definitions(&self) -> Vec<CommandDefinition>;
}

/// Outcome of loading a [`CommandSource`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Definitions that were registered.
    pub registered: usize,
    /// Definitions ignored because they declare no alias.
    pub without_aliases: usize,
    /// Definitions rejected, in source order.
    pub errors: Vec<RegistryError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Registry of commands keyed by every alias.
///
/// All aliases of one definition share the same `Arc`; `list` reports each
/// family once, under its primary alias.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: RwLock<HashMap<String, Arc<CommandDefinition>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding everything `source` offers.
    pub fn from_source(source: &dyn CommandSource) -> (Self, LoadReport) {
        let registry = Self::new();
        let report = registry.load(source);
        (registry, report)
    }

    /// Register every definition from `source`.
    ///
    /// Bad definitions are skipped and recorded in the report; the rest of
    /// the source still loads.
    pub fn load(&self, source: &dyn CommandSource) -> LoadReport {
        let mut commands = self.commands.write();
        let report = Self::load_into(&mut commands, source);
        drop(commands);
        Self::log_report(source, &report);
        report
    }

    /// Replace the whole table with the definitions from `source`.
    pub fn reload(&self, source: &dyn CommandSource) -> LoadReport {
        let mut fresh = HashMap::new();
        let report = Self::load_into(&mut fresh, source);
        *self.commands.write() = fresh;
        Self::log_report(source, &report);
        report
    }

    fn load_into(
        commands: &mut HashMap<String, Arc<CommandDefinition>>,
        source: &dyn CommandSource,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        for definition in source.definitions() {
            if definition.aliases().is_empty() {
                report.without_aliases += 1;
                continue;
            }
            match Self::insert(commands, definition) {
                Ok(()) => report.registered += 1,
                Err(err) => {
                    tracing::warn!(source = source.name(), "Skipping command: {err}");
                    report.errors.push(err);
                }
            }
        }
        report
    }

    fn log_report(source: &dyn CommandSource, report: &LoadReport) {
        tracing::debug!(
            source = source.name(),
            registered = report.registered,
            skipped = report.errors.len() + report.without_aliases,
            "Loaded commands"
        );
    }

    /// Register one definition.
    ///
    /// Later registrations take over any alias they share with earlier ones.
    /// A definition with no aliases is accepted and ignored.
    pub fn register(&self, definition: CommandDefinition) -> Result<(), RegistryError> {
        Self::insert(&mut self.commands.write(), definition)
    }

    fn insert(
        commands: &mut HashMap<String, Arc<CommandDefinition>>,
        definition: CommandDefinition,
    ) -> Result<(), RegistryError> {
        for alias in definition.aliases() {
            validate_alias(alias)?;
        }
        let definition = Arc::new(definition);
        for alias in definition.aliases() {
            commands.insert(alias.clone(), Arc::clone(&definition));
        }
        Ok(())
    }

    /// Look up a definition by any of its aliases.
    pub fn get(&self, alias: &str) -> Option<Arc<CommandDefinition>> {
        self.commands.read().get(alias).cloned()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.commands.read().contains_key(alias)
    }

    /// Distinct definitions, ordered by primary alias.
    ///
    /// A definition whose primary alias was taken over by a later
    /// registration is left out.
    pub fn list(&self) -> Vec<Arc<CommandDefinition>> {
        let mut definitions: Vec<Arc<CommandDefinition>> = self
            .commands
            .read()
            .iter()
            .filter(|(alias, definition)| definition.primary_alias() == Some(alias.as_str()))
            .map(|(_, definition)| Arc::clone(definition))
            .collect();
        definitions.sort_by(|a, b| a.primary_alias().cmp(&b.primary_alias()));
        definitions
    }

    /// Every registered alias, sorted.
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = self.commands.read().keys().cloned().collect();
        aliases.sort();
        aliases
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.commands.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.read().is_empty()
    }

    pub fn clear(&self) {
        self.commands.write().clear();
    }
}

fn validate_alias(alias: &str) -> Result<(), RegistryError> {
    if alias.is_empty() {
        return Err(RegistryError::EmptyAlias);
    }
    if alias.chars().any(char::is_whitespace) {
        return Err(RegistryError::WhitespaceInAlias {
            alias: alias.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Arity;
    use crate::context::CommandContext;
    use crate::error::CommandResult;

    fn noop(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandResult {
        Ok(())
    }

    fn definition(aliases: &[&str]) -> CommandDefinition {
        CommandDefinition::builder(aliases.iter().copied())
            .help("test")
            .default_handler(Arity::ANY, noop)
            .build()
    }

    struct Fixed(Vec<Vec<&'static str>>);

    impl CommandSource for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn definitions(&self) -> Vec<CommandDefinition> {
            self.0.iter().map(|aliases| definition(aliases)).collect()
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = CommandRegistry::new();
        registry.register(definition(&["save", "save-all"])).unwrap();

        assert!(registry.contains("save"));
        assert!(registry.contains("save-all"));
        assert!(!registry.contains("stop"));
        assert_eq!(registry.len(), 2);

        let a = registry.get("save").unwrap();
        let b = registry.get("save-all").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_list_is_distinct_and_sorted() {
        let registry = CommandRegistry::new();
        registry.register(definition(&["tellraw"])).unwrap();
        registry.register(definition(&["save", "save-all"])).unwrap();
        registry.register(definition(&["help"])).unwrap();

        let primaries: Vec<String> = registry
            .list()
            .iter()
            .filter_map(|d| d.primary_alias().map(str::to_string))
            .collect();
        assert_eq!(primaries, ["help", "save", "tellraw"]);
        assert_eq!(registry.aliases(), ["help", "save", "save-all", "tellraw"]);
    }

    #[test]
    fn test_rejects_bad_aliases() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.register(definition(&["  "])),
            Err(RegistryError::EmptyAlias)
        );
        assert_eq!(
            registry.register(definition(&["ok", "save all"])),
            Err(RegistryError::WhitespaceInAlias {
                alias: "save all".to_string()
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_skips_bad_definitions() {
        let registry = CommandRegistry::new();
        let report = registry.load(&Fixed(vec![
            vec!["help"],
            vec!["bad alias"],
            vec![],
            vec!["list"],
        ]));

        assert_eq!(report.registered, 2);
        assert_eq!(report.without_aliases, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(!report.is_clean());
        assert_eq!(registry.aliases(), ["help", "list"]);
    }

    #[test]
    fn test_reload_replaces_table() {
        let (registry, report) = CommandRegistry::from_source(&Fixed(vec![vec!["help"]]));
        assert!(report.is_clean());

        registry.reload(&Fixed(vec![vec!["list"]]));
        assert!(!registry.contains("help"));
        assert!(registry.contains("list"));
    }

    #[test]
    fn test_later_registration_takes_alias() {
        let registry = CommandRegistry::new();
        registry.register(definition(&["save"])).unwrap();
        registry.register(definition(&["save", "save-all"])).unwrap();

        let definition = registry.get("save").unwrap();
        assert_eq!(definition.aliases(), ["save", "save-all"]);
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn test_list_drops_definition_that_lost_primary_alias() {
        let registry = CommandRegistry::new();
        registry.register(definition(&["save", "save-all"])).unwrap();
        registry.register(definition(&["save"])).unwrap();

        let listed = registry.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].aliases(), ["save"]);
        assert!(Arc::ptr_eq(&listed[0], &registry.get("save").unwrap()));
        assert_eq!(registry.get("save-all").unwrap().aliases(), ["save", "save-all"]);
    }
}
