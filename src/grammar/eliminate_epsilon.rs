use indexmap::IndexSet;
use log::debug;

use super::{
    grammar::{Production, Symbol},
    nullable::nullable_variants,
    Grammar,
};

/// What happens to the empty string when epsilon productions are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyStringPolicy {
    /// Drop every epsilon production; the empty string leaves the language.
    #[default]
    Discard,
    /// Keep a single `start -> ε` when the start variable is nullable.
    RetainAtStart,
}

impl Grammar {
    pub fn eliminate_epsilon(&self, policy: EmptyStringPolicy) -> Grammar {
        let nullable = self.nullable_variables();
        debug!("nullable variables: {:?}", nullable);

        let mut productions: IndexSet<Production> = IndexSet::new();
        for production in self.productions.iter().filter(|p| !p.is_epsilon()) {
            for right in nullable_variants(&production.right, &nullable) {
                productions.insert(Production::new(production.left.clone(), right));
            }
        }

        let mut start = self.start.clone();
        let mut variables = self.variables.clone();
        if policy == EmptyStringPolicy::RetainAtStart && nullable.contains(&self.start) {
            let start_symbol = Symbol::Variable(self.start.clone());
            if productions.iter().any(|p| p.right.contains(&start_symbol)) {
                // the retained ε must not be reachable from any other body
                start = self.fresh_variable(&self.start);
                debug!("start variable {} replaced by {}", self.start, start);
                variables.insert(start.clone());
                productions.insert(Production::new(start.clone(), vec![start_symbol]));
            }
            productions.insert(Production::new(start.clone(), Vec::new()));
        }

        let g = Grammar::assemble(start, self.terminals.clone(), variables, productions);
        debug_assert!(g.is_epsilon_free());
        g
    }
}
