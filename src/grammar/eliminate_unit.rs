use indexmap::{IndexMap, IndexSet};
use log::debug;

use super::{
    grammar::{transitive_closure, Production},
    Grammar,
};

impl Grammar {
    pub fn eliminate_unit_productions(&self) -> Grammar {
        let mut units: IndexMap<String, IndexSet<String>> = self
            .variables
            .iter()
            .map(|v| (v.clone(), IndexSet::new()))
            .collect();
        for p in &self.productions {
            if let (Some(target), Some(set)) = (p.unit_target(), units.get_mut(&p.left)) {
                set.insert(target.to_string());
            }
        }
        let closure = transitive_closure(&units);
        debug!("unit closure: {:?}", closure);

        let mut productions: IndexSet<Production> = IndexSet::new();
        for p in &self.productions {
            let Some(target) = p.unit_target() else {
                productions.insert(p.clone());
                continue;
            };
            let reachable = std::iter::once(target)
                .chain(closure.get(target).into_iter().flatten().map(String::as_str));
            for variable in reachable {
                for q in self.productions_of(variable) {
                    if q.unit_target().is_none() {
                        productions.insert(Production::new(p.left.clone(), q.right.clone()));
                    }
                }
            }
        }

        let g = Grammar::assemble(
            self.start.clone(),
            self.terminals.clone(),
            self.variables.clone(),
            productions,
        );
        debug_assert!(!g.has_unit_productions());
        g
    }
}
