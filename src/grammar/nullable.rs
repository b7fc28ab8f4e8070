use indexmap::IndexSet;
use itertools::Itertools;

use super::{grammar::Symbol, Grammar};

impl Grammar {
    pub fn nullable_variables(&self) -> IndexSet<String> {
        let mut nullable: IndexSet<String> = self
            .productions
            .iter()
            .filter(|p| p.is_epsilon())
            .map(|p| p.left.clone())
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for p in &self.productions {
                if nullable.contains(&p.left) {
                    continue;
                }
                if is_composed_of(&p.right, &nullable) {
                    nullable.insert(p.left.clone());
                    changed = true;
                }
            }
        }
        nullable
    }
}

pub fn is_composed_of(body: &[Symbol], set: &IndexSet<String>) -> bool {
    body.iter()
        .all(|s| s.as_variable().map_or(false, |v| set.contains(v)))
}

/// All-kept variant first, empty variant dropped.
pub fn nullable_variants(body: &[Symbol], nullable: &IndexSet<String>) -> Vec<Vec<Symbol>> {
    if body.is_empty() {
        return Vec::new();
    }
    body.iter()
        .map(|s| {
            if s.as_variable().map_or(false, |v| nullable.contains(v)) {
                vec![Some(s), None]
            } else {
                vec![Some(s)]
            }
        })
        .multi_cartesian_product()
        .map(|choice| choice.into_iter().flatten().cloned().collect::<Vec<_>>())
        .filter(|variant| !variant.is_empty())
        .unique()
        .collect()
}
