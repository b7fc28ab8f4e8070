use std::fmt;

use indexmap::{IndexMap, IndexSet};

use super::EPSILON;
use crate::error::GrammarError;
use crate::pda::BOTTOM_MARK;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    Variable(String),
}

impl Symbol {
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(name.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Symbol::Variable(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(e) | Symbol::Variable(e) => e.as_str(),
        }
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Symbol::Variable(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single rewrite `left -> right`. An empty `right` is the epsilon production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub left: String,
    pub right: Vec<Symbol>,
}

impl Production {
    pub fn new(left: impl Into<String>, right: Vec<Symbol>) -> Self {
        Self {
            left: left.into(),
            right,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.right.is_empty()
    }

    /// The variable `B` when this is a unit production `A -> B`.
    pub fn unit_target(&self) -> Option<&str> {
        match self.right.as_slice() {
            [Symbol::Variable(target)] => Some(target),
            _ => None,
        }
    }

    pub fn leading_variable(&self) -> Option<&str> {
        self.right.first().and_then(Symbol::as_variable)
    }

    pub fn is_left_recursive(&self) -> bool {
        self.leading_variable() == Some(self.left.as_str())
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.right.is_empty() {
            return write!(f, "{} -> {}", self.left, EPSILON);
        }
        let right = self
            .right
            .iter()
            .map(Symbol::name)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} -> {}", self.left, right)
    }
}

/// A context-free grammar. Values are immutable once built: every
/// transformation returns a new `Grammar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub(crate) start: String,
    pub(crate) terminals: IndexSet<String>,
    pub(crate) variables: IndexSet<String>,
    pub(crate) productions: IndexSet<Production>,
}

impl Grammar {
    /// Builds a grammar, rejecting it unless the start symbol and every
    /// production head are variables, every body symbol is declared, and the
    /// terminal and variable sets are disjoint. Duplicate productions collapse.
    pub fn new<S, T, V, P>(
        start: S,
        terminals: T,
        variables: V,
        productions: P,
    ) -> Result<Self, GrammarError>
    where
        S: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
        P: IntoIterator<Item = Production>,
    {
        let mut terminal_set = IndexSet::new();
        terminals
            .into_iter()
            .map(Into::into)
            .try_for_each(|t: String| {
                if terminal_set.contains(&t) {
                    Err(GrammarError::DuplicateTerminal(t))
                } else {
                    terminal_set.insert(t);
                    Ok(())
                }
            })?;

        let mut variable_set = IndexSet::new();
        variables
            .into_iter()
            .map(Into::into)
            .try_for_each(|v: String| {
                if variable_set.contains(&v) {
                    Err(GrammarError::DuplicateVariable(v))
                } else {
                    variable_set.insert(v);
                    Ok(())
                }
            })?;

        let g = Self {
            start: start.into(),
            terminals: terminal_set,
            variables: variable_set,
            productions: productions.into_iter().collect(),
        };
        g.validate()?;
        Ok(g)
    }

    pub(crate) fn assemble(
        start: String,
        terminals: IndexSet<String>,
        variables: IndexSet<String>,
        productions: IndexSet<Production>,
    ) -> Self {
        let g = Self {
            start,
            terminals,
            variables,
            productions,
        };
        debug_assert_eq!(g.validate(), Ok(()));
        g
    }

    pub fn validate(&self) -> Result<(), GrammarError> {
        if let Some(x) = self.variables.intersection(&self.terminals).next() {
            return Err(GrammarError::TerminalVariable(x.clone()));
        }
        if self.variables.contains(BOTTOM_MARK) || self.terminals.contains(BOTTOM_MARK) {
            return Err(GrammarError::ReservedSymbol(BOTTOM_MARK.to_string()));
        }
        if !self.variables.contains(&self.start) {
            return Err(GrammarError::StartNotVariable(self.start.clone()));
        }
        for p in &self.productions {
            if !self.variables.contains(&p.left) {
                return Err(GrammarError::LeftNotVariable(p.left.clone()));
            }
            for s in &p.right {
                let declared = match s {
                    Symbol::Terminal(t) => self.terminals.contains(t),
                    Symbol::Variable(v) => self.variables.contains(v),
                };
                if !declared {
                    return Err(GrammarError::UndeclaredSymbol {
                        left: p.left.clone(),
                        symbol: s.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn terminals(&self) -> &IndexSet<String> {
        &self.terminals
    }

    pub fn variables(&self) -> &IndexSet<String> {
        &self.variables
    }

    pub fn productions(&self) -> &IndexSet<Production> {
        &self.productions
    }

    pub fn contains(&self, production: &Production) -> bool {
        self.productions.contains(production)
    }

    pub fn productions_of<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a Production> {
        self.productions.iter().filter(move |p| p.left == variable)
    }

    pub fn bodies_of<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a Vec<Symbol>> {
        self.productions_of(variable).map(|p| &p.right)
    }

    pub fn fresh_variable(&self, hint: &str) -> String {
        fresh_variable(&self.variables, &self.terminals, hint)
    }

    /// For every variable, the variables that can appear as the leftmost
    /// symbol of a sentential form derived from it in one or more steps.
    pub fn left_corners(&self) -> IndexMap<String, IndexSet<String>> {
        let mut relation: IndexMap<String, IndexSet<String>> = self
            .variables
            .iter()
            .map(|v| (v.clone(), IndexSet::new()))
            .collect();
        for p in &self.productions {
            if let (Some(lead), Some(set)) = (p.leading_variable(), relation.get_mut(&p.left)) {
                set.insert(lead.to_string());
            }
        }
        transitive_closure(&relation)
    }

    pub fn left_recursive_variables(&self) -> IndexSet<String> {
        self.left_corners()
            .into_iter()
            .filter(|(v, corners)| corners.contains(v))
            .map(|(v, _)| v)
            .collect()
    }

    pub fn is_epsilon_free(&self) -> bool {
        self.productions
            .iter()
            .all(|p| !p.is_epsilon() || p.left == self.start)
    }

    pub fn has_unit_productions(&self) -> bool {
        self.productions.iter().any(|p| p.unit_target().is_some())
    }

    pub fn has_immediate_left_recursion(&self) -> bool {
        self.productions.iter().any(Production::is_left_recursive)
    }

    /// Every body is a terminal followed by zero or more variables; `start -> ε`
    /// is the one permitted exception.
    pub fn is_greibach(&self) -> bool {
        self.productions.iter().all(|p| match p.right.split_first() {
            None => p.left == self.start,
            Some((first, rest)) => {
                first.is_terminal() && rest.iter().all(|s| !s.is_terminal())
            }
        })
    }
}

/// Appends `'` to `hint` until the name is neither a variable nor a terminal.
pub fn fresh_variable(
    variables: &IndexSet<String>,
    terminals: &IndexSet<String>,
    hint: &str,
) -> String {
    let mut name = hint.to_string();
    while variables.contains(&name) || terminals.contains(&name) {
        name.push('\'');
    }
    name
}

pub fn transitive_closure(
    relation: &IndexMap<String, IndexSet<String>>,
) -> IndexMap<String, IndexSet<String>> {
    let mut closure = relation.clone();
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..closure.len() {
            let reached: Vec<String> = closure[i]
                .iter()
                .filter_map(|v| closure.get(v))
                .flatten()
                .cloned()
                .collect();
            let set = &mut closure[i];
            for v in reached {
                changed |= set.insert(v);
            }
        }
    }
    closure
}
