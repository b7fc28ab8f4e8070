use indexmap::{IndexMap, IndexSet};
use log::debug;

use super::{
    grammar::{fresh_variable, Production, Symbol},
    Grammar,
};

impl Grammar {
    pub fn to_greibach(&self) -> Grammar {
        let expanded = self.expand_leading_variables();

        // a variable stands in for a terminal only if that terminal is all it derives
        let mut stand_ins: IndexMap<String, String> = IndexMap::new();
        for (nt, bodies) in &expanded {
            if bodies.len() != 1 {
                continue;
            }
            if let Some([Symbol::Terminal(a)]) = bodies.first().map(Vec::as_slice) {
                stand_ins.entry(a.clone()).or_insert_with(|| nt.clone());
            }
        }

        let mut variables = self.variables.clone();
        let mut helpers: Vec<Production> = Vec::new();
        for a in &self.terminals {
            if stand_ins.contains_key(a) {
                continue;
            }
            let helper = fresh_variable(&variables, &self.terminals, &format!("T_{}", a));
            debug!("terminal {} gets helper variable {}", a, helper);
            variables.insert(helper.clone());
            helpers.push(Production::new(helper.clone(), vec![Symbol::Terminal(a.clone())]));
            stand_ins.insert(a.clone(), helper);
        }

        let rewrite_tail = |s: &Symbol| match s {
            Symbol::Terminal(a) => stand_ins
                .get(a)
                .map_or_else(|| s.clone(), |v| Symbol::Variable(v.clone())),
            Symbol::Variable(_) => s.clone(),
        };

        let mut productions: IndexSet<Production> = IndexSet::new();
        for (nt, bodies) in &expanded {
            for body in bodies {
                let right = match body.split_first() {
                    Some((first, rest)) if !rest.is_empty() => std::iter::once(first.clone())
                        .chain(rest.iter().map(rewrite_tail))
                        .collect(),
                    _ => body.clone(),
                };
                productions.insert(Production::new(nt.clone(), right));
            }
        }
        productions.extend(helpers);

        let g = Grammar::assemble(self.start.clone(), self.terminals.clone(), variables, productions);
        debug_assert!(g.is_greibach());
        g
    }

    // left corners are expanded before the variables that lead with them
    fn expand_leading_variables(&self) -> IndexMap<String, IndexSet<Vec<Symbol>>> {
        let mut order: IndexSet<String> = IndexSet::new();
        for nt in &self.variables {
            self.visit_left_corners(nt, &mut order, &mut IndexSet::new());
        }

        let mut expanded: IndexMap<String, IndexSet<Vec<Symbol>>> = IndexMap::new();
        for nt in order {
            let mut bodies: IndexSet<Vec<Symbol>> = IndexSet::new();
            for body in self.bodies_of(&nt) {
                match body.first().and_then(Symbol::as_variable) {
                    Some(lead) => {
                        debug_assert!(expanded.contains_key(lead), "{} is left recursive", lead);
                        for prefix in expanded.get(lead).into_iter().flatten() {
                            bodies.insert(prefix.iter().chain(&body[1..]).cloned().collect());
                        }
                    }
                    None => {
                        bodies.insert(body.clone());
                    }
                }
            }
            expanded.insert(nt, bodies);
        }

        // back to declaration order
        self.variables
            .iter()
            .filter_map(|nt| expanded.swap_remove_entry(nt))
            .collect()
    }

    fn visit_left_corners(
        &self,
        nt: &str,
        order: &mut IndexSet<String>,
        on_path: &mut IndexSet<String>,
    ) {
        if order.contains(nt) || !on_path.insert(nt.to_string()) {
            return;
        }
        for p in self.productions_of(nt) {
            if let Some(lead) = p.leading_variable() {
                self.visit_left_corners(lead, order, on_path);
            }
        }
        on_path.swap_remove(nt);
        order.insert(nt.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Symbol {
        Symbol::terminal(s)
    }

    fn v(s: &str) -> Symbol {
        Symbol::variable(s)
    }

    #[test]
    fn bare_terminals_get_helpers() {
        // S -> a S b | a b
        let g = Grammar::new(
            "S",
            ["a", "b"],
            ["S"],
            [
                Production::new("S", vec![t("a"), v("S"), t("b")]),
                Production::new("S", vec![t("a"), t("b")]),
            ],
        )
        .unwrap()
        .to_greibach();

        assert!(g.is_greibach());
        assert!(g.contains(&Production::new("S", vec![t("a"), v("S"), v("T_b")])));
        assert!(g.contains(&Production::new("S", vec![t("a"), v("T_b")])));
        assert!(g.contains(&Production::new("T_a", vec![t("a")])));
        assert!(g.contains(&Production::new("T_b", vec![t("b")])));
        assert_eq!(g.productions().len(), 4);
    }

    #[test]
    fn sole_terminal_producer_is_reused() {
        // S -> a S b | a b, B -> b, A -> a
        let g = Grammar::new(
            "S",
            ["a", "b"],
            ["S", "B", "A"],
            [
                Production::new("S", vec![t("a"), v("S"), t("b")]),
                Production::new("S", vec![t("a"), t("b")]),
                Production::new("B", vec![t("b")]),
                Production::new("A", vec![t("a")]),
            ],
        )
        .unwrap()
        .to_greibach();
        assert!(g.contains(&Production::new("S", vec![t("a"), v("S"), v("B")])));
        assert!(g.contains(&Production::new("S", vec![t("a"), v("B")])));
        assert_eq!(g.variables().len(), 3);
    }

    #[test]
    fn terminal_with_other_alternatives_is_not_reused() {
        // S -> a b, B -> b | c
        let g = Grammar::new(
            "S",
            ["a", "b", "c"],
            ["S", "B"],
            [
                Production::new("S", vec![t("a"), t("b")]),
                Production::new("B", vec![t("b")]),
                Production::new("B", vec![t("c")]),
            ],
        )
        .unwrap()
        .to_greibach();
        assert!(g.contains(&Production::new("S", vec![t("a"), v("T_b")])));
        assert!(!g.contains(&Production::new("S", vec![t("a"), v("B")])));
    }

    #[test]
    fn leading_variables_are_substituted() {
        // S -> A B, A -> a | B b, B -> c
        let g = Grammar::new(
            "S",
            ["a", "b", "c"],
            ["S", "A", "B"],
            [
                Production::new("S", vec![v("A"), v("B")]),
                Production::new("A", vec![t("a")]),
                Production::new("A", vec![v("B"), t("b")]),
                Production::new("B", vec![t("c")]),
            ],
        )
        .unwrap()
        .to_greibach();

        assert!(g.is_greibach());
        assert!(g.contains(&Production::new("S", vec![t("a"), v("B")])));
        assert!(g.contains(&Production::new("S", vec![t("c"), v("T_b"), v("B")])));
        assert!(g.contains(&Production::new("A", vec![t("c"), v("T_b")])));
    }

    #[test]
    fn rerun_is_idempotent() {
        let once = Grammar::new(
            "S",
            ["a", "b"],
            ["S"],
            [
                Production::new("S", vec![t("a"), v("S"), t("b")]),
                Production::new("S", vec![t("a"), t("b")]),
            ],
        )
        .unwrap()
        .to_greibach();
        assert_eq!(once, once.to_greibach());
    }
}
