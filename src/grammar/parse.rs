use indexmap::IndexSet;

use super::{
    grammar::{Production, Symbol},
    Grammar, EPSILON,
};
use crate::error::GrammarError;

impl Grammar {
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut variables: IndexSet<String> = IndexSet::new();
        let mut raw_productions: Vec<(usize, &str)> = Vec::new();

        let mut previous_left: Option<usize> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(GrammarError::TooManyArrows(i + 1));
            }
            let (left, rights): (usize, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(GrammarError::EmptyLeft(i + 1));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(GrammarError::LeftContainsWhitespace(i + 1));
                }
                (variables.insert_full(left_str.to_string()).0, parts[1].trim())
            } else {
                match (previous_left, parts[0].trim().strip_prefix('|')) {
                    (Some(idx), Some(rest)) => (idx, rest.trim()),
                    _ => return Err(GrammarError::MissingLeft(i + 1)),
                }
            };

            previous_left = Some(left);
            raw_productions.push((left, rights));
        }

        let start = variables.first().cloned().ok_or(GrammarError::Empty)?;

        let mut terminals: IndexSet<String> = IndexSet::new();
        let mut productions: Vec<Production> = Vec::new();
        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols = right
                    .split_whitespace()
                    .filter(|s| !is_epsilon(s))
                    .map(|s| {
                        if variables.contains(s) {
                            Symbol::variable(s)
                        } else {
                            terminals.insert(s.to_string());
                            Symbol::terminal(s)
                        }
                    })
                    .collect();
                productions.push(Production::new(variables[left].clone(), symbols));
            }
        }

        Grammar::new(start, terminals, variables, productions)
    }
}

fn is_epsilon(s: &str) -> bool {
    s == EPSILON || s == "eps"
}
