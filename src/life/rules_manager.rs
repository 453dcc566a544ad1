//! Ordered registry of uniquely named rules

use super::Rule;
use crate::error::LifeError;

/// Keeps the active rules in registration order.
///
/// The order is the order in which candidate states are collected every
/// generation, so it takes part in order-sensitive tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct RulesManager {
    rules: Vec<Rule>,
}

impl RulesManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with an initial rule set, rejecting duplicate names
    pub fn with_rules<I>(rules: I) -> Result<Self, LifeError>
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        let mut manager = Self::new();
        for rule in rules {
            manager.add(rule.into())?;
        }
        Ok(manager)
    }

    /// Register a rule at the end of the iteration order
    pub fn add(&mut self, rule: Rule) -> Result<(), LifeError> {
        if self.has(rule.name()) {
            return Err(LifeError::DuplicateRule {
                name: rule.name().to_string(),
            });
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Unregister a rule and hand it back
    pub fn remove(&mut self, name: &str) -> Result<Rule, LifeError> {
        let position = self.position(name)?;
        Ok(self.rules.remove(position))
    }

    pub fn has(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name() == name)
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Result<&Rule, LifeError> {
        let position = self.position(name)?;
        Ok(&self.rules[position])
    }

    /// All rules, in registration order
    pub fn all(&self) -> &[Rule] {
        &self.rules
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::name).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn position(&self, name: &str) -> Result<usize, LifeError> {
        self.rules
            .iter()
            .position(|rule| rule.name() == name)
            .ok_or_else(|| LifeError::UnknownRule {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::{BuiltinRule, Cell};

    fn noop(name: &str) -> Rule {
        Rule::new(name, "does nothing", |_: Cell, _: &[Cell]| None)
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut manager = RulesManager::new();
        manager.add(noop("first")).unwrap();
        assert_eq!(
            manager.add(noop("first")),
            Err(LifeError::DuplicateRule {
                name: "first".to_string()
            })
        );
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_duplicate_does_not_overwrite() {
        let original = noop("rule");
        let mut manager = RulesManager::with_rules([original.clone()]).unwrap();
        assert!(manager.add(noop("rule")).is_err());
        assert!(manager.get("rule").unwrap().ptr_eq(&original));
    }

    #[test]
    fn test_remove_unknown() {
        let mut manager = RulesManager::new();
        assert_eq!(
            manager.remove("ghost").unwrap_err(),
            LifeError::UnknownRule {
                name: "ghost".to_string()
            }
        );
        assert!(manager.get("ghost").is_err());
    }

    #[test]
    fn test_remove_returns_same_rule() {
        let rule = noop("keeper");
        let mut manager = RulesManager::new();
        manager.add(rule.clone()).unwrap();

        let removed = manager.remove("keeper").unwrap();
        assert!(removed.ptr_eq(&rule));
        assert!(!manager.has("keeper"));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut manager = RulesManager::with_rules(BuiltinRule::conway()).unwrap();
        assert_eq!(
            manager.names(),
            vec!["loneliness", "overpopulation", "survival", "reproduction"]
        );

        manager.remove("overpopulation").unwrap();
        manager.add(noop("custom")).unwrap();
        assert_eq!(
            manager.names(),
            vec!["loneliness", "survival", "reproduction", "custom"]
        );
    }

    #[test]
    fn test_with_rules_rejects_duplicates() {
        let rules = [BuiltinRule::MajorityBirth, BuiltinRule::MajorityBirth];
        assert!(matches!(
            RulesManager::with_rules(rules),
            Err(LifeError::DuplicateRule { .. })
        ));
    }
}
