//! Named, validated state-transition rules

use super::cell::count_matching;
use super::{Cell, Team};
use crate::error::LifeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The pure function stored inside a rule.
///
/// Given a cell and its neighbors, propose the next state or return `None`
/// when the rule has no opinion. Neighbor order is defined by the board
/// topology and must not be relied upon.
pub trait Expression: Send + Sync {
    fn evaluate(&self, cell: Cell, neighbors: &[Cell]) -> Option<Cell>;
}

impl<F> Expression for F
where
    F: Fn(Cell, &[Cell]) -> Option<Cell> + Send + Sync,
{
    fn evaluate(&self, cell: Cell, neighbors: &[Cell]) -> Option<Cell> {
        self(cell, neighbors)
    }
}

/// A rule that can propose a new state for a cell based on its neighbors.
///
/// Cloning a rule is cheap and keeps the same expression.
#[derive(Clone)]
pub struct Rule {
    name: String,
    details: String,
    expression: Arc<dyn Expression>,
}

impl Rule {
    /// Create a rule from any expression
    pub fn new(
        name: impl Into<String>,
        details: impl Into<String>,
        expression: impl Expression + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
            expression: Arc::new(expression),
        }
    }

    /// Unique key of the rule inside a rules manager
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description, no semantic effect
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Apply the rule to a cell and its neighbors.
    ///
    /// Barriers are never judged: the expression is not even called for them.
    /// A proposed `Barrier` is rejected with [`LifeError::InvalidRuleOutput`].
    pub fn execute(&self, cell: Cell, neighbors: &[Cell]) -> Result<Option<Cell>, LifeError> {
        if cell == Cell::Barrier {
            return Ok(None);
        }

        match self.expression.evaluate(cell, neighbors) {
            Some(output) if !output.is_rule_output() => Err(LifeError::InvalidRuleOutput {
                rule: self.name.clone(),
                output,
            }),
            state => Ok(state),
        }
    }

    /// Whether both handles share the same underlying expression
    pub fn ptr_eq(&self, other: &Rule) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.expression, &other.expression)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("details", &self.details)
            .finish_non_exhaustive()
    }
}

/// Catalog of built-in rules that can be described in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuiltinRule {
    /// A team cell with fewer than `min` same-team neighbors dies
    Loneliness { min: usize },
    /// A team cell with more than `max` same-team neighbors dies
    Overpopulation { max: usize },
    /// A team cell with `min..=max` same-team neighbors stays
    Survival { min: usize, max: usize },
    /// An empty cell with exactly `count` neighbors of one team (and fewer of
    /// the other) is claimed by that team
    Reproduction { count: usize },
    /// An empty cell with at least `min` neighbors of one team is claimed by
    /// that team, team A checked first
    Birth { min: usize },
    /// An empty cell is claimed by the team holding a strict majority of its
    /// team neighbors
    MajorityBirth,
    /// A team cell outnumbered by the other team among its neighbors defects
    TeamChange,
}

impl BuiltinRule {
    /// The classic Conway rule set, played per team
    pub fn conway() -> Vec<BuiltinRule> {
        vec![
            BuiltinRule::Loneliness { min: 2 },
            BuiltinRule::Overpopulation { max: 3 },
            BuiltinRule::Survival { min: 2, max: 3 },
            BuiltinRule::Reproduction { count: 3 },
        ]
    }

    /// The two-team rule set: lonely and crowded cells die, outnumbered
    /// cells defect, and three neighbors are enough for a birth
    pub fn two_team() -> Vec<BuiltinRule> {
        vec![
            BuiltinRule::Loneliness { min: 2 },
            BuiltinRule::TeamChange,
            BuiltinRule::Overpopulation { max: 3 },
            BuiltinRule::Birth { min: 3 },
        ]
    }

    /// One rule of every kind, with its default parameters
    pub fn catalog() -> Vec<BuiltinRule> {
        vec![
            BuiltinRule::Loneliness { min: 2 },
            BuiltinRule::Overpopulation { max: 3 },
            BuiltinRule::Survival { min: 2, max: 3 },
            BuiltinRule::Reproduction { count: 3 },
            BuiltinRule::Birth { min: 3 },
            BuiltinRule::MajorityBirth,
            BuiltinRule::TeamChange,
        ]
    }

    pub fn name(&self) -> String {
        match self {
            BuiltinRule::Loneliness { .. } => "loneliness".to_string(),
            BuiltinRule::Overpopulation { .. } => "overpopulation".to_string(),
            BuiltinRule::Survival { .. } => "survival".to_string(),
            BuiltinRule::Reproduction { .. } => "reproduction".to_string(),
            BuiltinRule::Birth { .. } => "birth".to_string(),
            BuiltinRule::MajorityBirth => "majority_birth".to_string(),
            BuiltinRule::TeamChange => "team_change".to_string(),
        }
    }

    pub fn details(&self) -> String {
        match self {
            BuiltinRule::Loneliness { min } => {
                format!("A team cell with fewer than {} same-team neighbors becomes empty", min)
            }
            BuiltinRule::Overpopulation { max } => {
                format!("A team cell with more than {} same-team neighbors becomes empty", max)
            }
            BuiltinRule::Survival { min, max } => {
                format!("A team cell with {} to {} same-team neighbors stays alive", min, max)
            }
            BuiltinRule::Reproduction { count } => {
                format!("An empty cell with exactly {} neighbors of one team joins that team", count)
            }
            BuiltinRule::Birth { min } => {
                format!("An empty cell with {} or more neighbors of one team joins that team", min)
            }
            BuiltinRule::MajorityBirth => {
                "An empty cell joins the team holding the majority of its neighbors".to_string()
            }
            BuiltinRule::TeamChange => {
                "A team cell with fewer same-team than other-team neighbors changes teams"
                    .to_string()
            }
        }
    }

    /// Evaluate the built-in behavior directly
    pub fn evaluate(&self, cell: Cell, neighbors: &[Cell]) -> Option<Cell> {
        match *self {
            BuiltinRule::Loneliness { min } => {
                let team = cell.team()?;
                (count_matching(neighbors, team.cell()) < min).then_some(Cell::Empty)
            }
            BuiltinRule::Overpopulation { max } => {
                let team = cell.team()?;
                (count_matching(neighbors, team.cell()) > max).then_some(Cell::Empty)
            }
            BuiltinRule::Survival { min, max } => {
                let team = cell.team()?;
                let same = count_matching(neighbors, team.cell());
                (min..=max).contains(&same).then_some(cell)
            }
            BuiltinRule::Reproduction { count } => {
                if cell != Cell::Empty {
                    return None;
                }
                let a = count_matching(neighbors, Cell::TeamA);
                let b = count_matching(neighbors, Cell::TeamB);
                if a == count && b < count {
                    Some(Cell::TeamA)
                } else if b == count && a < count {
                    Some(Cell::TeamB)
                } else {
                    None
                }
            }
            BuiltinRule::Birth { min } => {
                if cell != Cell::Empty {
                    return None;
                }
                [Team::A, Team::B]
                    .into_iter()
                    .find(|team| count_matching(neighbors, team.cell()) >= min)
                    .map(Team::cell)
            }
            BuiltinRule::TeamChange => {
                let team = cell.team()?;
                let same = count_matching(neighbors, team.cell());
                let other = count_matching(neighbors, team.opponent().cell());
                (same < other).then_some(team.opponent().cell())
            }
            BuiltinRule::MajorityBirth => {
                if cell != Cell::Empty {
                    return None;
                }
                let a = count_matching(neighbors, Cell::TeamA);
                let b = count_matching(neighbors, Cell::TeamB);
                match a.cmp(&b) {
                    std::cmp::Ordering::Greater => Some(Team::A.cell()),
                    std::cmp::Ordering::Less => Some(Team::B.cell()),
                    std::cmp::Ordering::Equal => None,
                }
            }
        }
    }
}

impl Expression for BuiltinRule {
    fn evaluate(&self, cell: Cell, neighbors: &[Cell]) -> Option<Cell> {
        BuiltinRule::evaluate(self, cell, neighbors)
    }
}

impl From<BuiltinRule> for Rule {
    fn from(builtin: BuiltinRule) -> Self {
        Rule::new(builtin.name(), builtin.details(), builtin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(cell: Cell) -> Rule {
        Rule::new("always", "always proposes the same state", move |_: Cell, _: &[Cell]| Some(cell))
    }

    #[test]
    fn test_barrier_is_never_judged() {
        let rule = always(Cell::TeamA);
        assert_eq!(rule.execute(Cell::Barrier, &[Cell::TeamA; 8]), Ok(None));
        assert_eq!(rule.execute(Cell::Barrier, &[]), Ok(None));

        // Even a misbehaving rule is short-circuited on barriers
        let bad = always(Cell::Barrier);
        assert_eq!(bad.execute(Cell::Barrier, &[]), Ok(None));
    }

    #[test]
    fn test_invalid_output_names_rule() {
        let rule = Rule::new("walls", "builds walls", |_: Cell, _: &[Cell]| Some(Cell::Barrier));
        let err = rule.execute(Cell::TeamA, &[]).unwrap_err();
        assert_eq!(
            err,
            LifeError::InvalidRuleOutput {
                rule: "walls".to_string(),
                output: Cell::Barrier
            }
        );
        assert!(err.to_string().contains("walls"));
    }

    #[test]
    fn test_no_opinion_passes_through() {
        let rule = Rule::new("silent", "", |_: Cell, _: &[Cell]| None);
        assert_eq!(rule.execute(Cell::TeamB, &[]), Ok(None));
    }

    #[test]
    fn test_loneliness_and_overpopulation() {
        let lonely = Rule::from(BuiltinRule::Loneliness { min: 2 });
        let crowded = Rule::from(BuiltinRule::Overpopulation { max: 3 });

        let one_friend = [Cell::TeamA, Cell::TeamB, Cell::TeamB, Cell::Empty];
        assert_eq!(lonely.execute(Cell::TeamA, &one_friend), Ok(Some(Cell::Empty)));
        assert_eq!(lonely.execute(Cell::TeamB, &one_friend), Ok(None));
        assert_eq!(lonely.execute(Cell::Empty, &one_friend), Ok(None));

        let four_friends = [Cell::TeamB; 4];
        assert_eq!(crowded.execute(Cell::TeamB, &four_friends), Ok(Some(Cell::Empty)));
        assert_eq!(crowded.execute(Cell::TeamA, &four_friends), Ok(None));
    }

    #[test]
    fn test_survival_keeps_cell() {
        let survival = Rule::from(BuiltinRule::Survival { min: 2, max: 3 });
        let neighbors = [Cell::TeamA, Cell::TeamA, Cell::TeamB];
        assert_eq!(survival.execute(Cell::TeamA, &neighbors), Ok(Some(Cell::TeamA)));
        assert_eq!(survival.execute(Cell::TeamB, &neighbors), Ok(None));
    }

    #[test]
    fn test_reproduction() {
        let rule = Rule::from(BuiltinRule::Reproduction { count: 3 });
        let three_a = [Cell::TeamA, Cell::TeamA, Cell::TeamA, Cell::TeamB];
        assert_eq!(rule.execute(Cell::Empty, &three_a), Ok(Some(Cell::TeamA)));
        assert_eq!(rule.execute(Cell::TeamB, &three_a), Ok(None));

        let three_each = [Cell::TeamA, Cell::TeamA, Cell::TeamA, Cell::TeamB, Cell::TeamB, Cell::TeamB];
        assert_eq!(rule.execute(Cell::Empty, &three_each), Ok(None));
    }

    #[test]
    fn test_majority_birth() {
        let rule = Rule::from(BuiltinRule::MajorityBirth);
        assert_eq!(rule.execute(Cell::Empty, &[Cell::TeamB, Cell::TeamB, Cell::TeamA]), Ok(Some(Cell::TeamB)));
        assert_eq!(rule.execute(Cell::Empty, &[Cell::TeamB, Cell::TeamA]), Ok(None));
        assert_eq!(rule.execute(Cell::Empty, &[Cell::Empty, Cell::Barrier]), Ok(None));
    }

    #[test]
    fn test_birth_threshold() {
        let rule = Rule::from(BuiltinRule::Birth { min: 3 });
        let four_b = [Cell::TeamB; 4];
        assert_eq!(rule.execute(Cell::Empty, &four_b), Ok(Some(Cell::TeamB)));
        assert_eq!(rule.execute(Cell::TeamA, &four_b), Ok(None));

        // Both teams qualify: team A is checked first
        let both = [Cell::TeamB, Cell::TeamB, Cell::TeamB, Cell::TeamA, Cell::TeamA, Cell::TeamA];
        assert_eq!(rule.execute(Cell::Empty, &both), Ok(Some(Cell::TeamA)));

        assert_eq!(rule.execute(Cell::Empty, &[Cell::TeamA, Cell::TeamA]), Ok(None));
    }

    #[test]
    fn test_team_change() {
        let rule = Rule::from(BuiltinRule::TeamChange);
        let outnumbered = [Cell::TeamA, Cell::TeamA, Cell::TeamB, Cell::Empty];
        assert_eq!(rule.execute(Cell::TeamB, &outnumbered), Ok(Some(Cell::TeamA)));
        assert_eq!(rule.execute(Cell::TeamA, &outnumbered), Ok(None));
        assert_eq!(rule.execute(Cell::Empty, &outnumbered), Ok(None));

        // A tie is not enough
        assert_eq!(rule.execute(Cell::TeamA, &[Cell::TeamA, Cell::TeamB]), Ok(None));
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let names: std::collections::HashSet<String> =
            BuiltinRule::catalog().iter().map(BuiltinRule::name).collect();
        assert_eq!(names.len(), BuiltinRule::catalog().len());
        assert_eq!(
            BuiltinRule::two_team().iter().map(BuiltinRule::name).collect::<Vec<_>>(),
            vec!["loneliness", "team_change", "overpopulation", "birth"]
        );
    }

    #[test]
    fn test_builtin_names_and_yaml() {
        let rule = Rule::from(BuiltinRule::Loneliness { min: 2 });
        assert_eq!(rule.name(), "loneliness");
        assert!(rule.details().contains("fewer than 2"));

        let parsed: BuiltinRule = serde_yaml::from_str("kind: overpopulation\nmax: 3\n").unwrap();
        assert_eq!(parsed, BuiltinRule::Overpopulation { max: 3 });

        let parsed: BuiltinRule = serde_yaml::from_str("kind: team_change\n").unwrap();
        assert_eq!(parsed, BuiltinRule::TeamChange);
    }

    #[test]
    fn test_clone_shares_expression() {
        let rule = always(Cell::TeamA);
        let copy = rule.clone();
        assert!(rule.ptr_eq(&copy));
        assert!(!rule.ptr_eq(&always(Cell::TeamA)));
    }
}
