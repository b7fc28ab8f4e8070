use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use log::debug;

use super::{
    grammar::{fresh_variable, Production, Symbol},
    Grammar,
};

impl Grammar {
    /// `A -> A α | β` becomes `A -> β A' | β`, `A' -> α A' | α`.
    pub fn eliminate_left_recursion(&self) -> Grammar {
        let corners = self.left_corners();
        let reaches = |from: &str, to: &str| corners.get(from).map_or(false, |c| c.contains(to));

        let mut variables = self.variables.clone();
        let mut rewritten: IndexMap<String, Vec<Vec<Symbol>>> = IndexMap::new();
        let mut auxiliaries: Vec<(String, Vec<Vec<Symbol>>)> = Vec::new();

        for nt in &self.variables {
            let mut pending: VecDeque<Vec<Symbol>> = self.bodies_of(nt).cloned().collect();
            let mut bodies: Vec<Vec<Symbol>> = Vec::new();
            let mut recursive: Vec<Vec<Symbol>> = Vec::new();

            while let Some(body) = pending.pop_front() {
                match body.first().and_then(Symbol::as_variable) {
                    Some(lead) if lead == nt.as_str() => recursive.push(body[1..].to_vec()),
                    Some(lead) if rewritten.contains_key(lead) && reaches(lead, nt.as_str()) => {
                        for prefix in &rewritten[lead] {
                            pending.push_back(prefix.iter().chain(&body[1..]).cloned().collect());
                        }
                    }
                    _ => bodies.push(body),
                }
            }

            if recursive.is_empty() {
                rewritten.insert(nt.clone(), bodies);
                continue;
            }

            let nt_prime = fresh_variable(&variables, &self.terminals, nt);
            debug!("{} is left recursive, introducing {}", nt, nt_prime);
            variables.insert(nt_prime.clone());

            let prime = Symbol::Variable(nt_prime.clone());
            let with_prime = |body: Vec<Symbol>| {
                let mut continued = body.clone();
                continued.push(prime.clone());
                [continued, body]
            };
            let bodies = bodies.into_iter().flat_map(with_prime).collect();
            let tails = recursive.into_iter().flat_map(with_prime).collect();

            rewritten.insert(nt.clone(), bodies);
            auxiliaries.push((nt_prime, tails));
        }

        let productions: IndexSet<Production> = rewritten
            .into_iter()
            .chain(auxiliaries)
            .flat_map(|(left, bodies)| {
                bodies
                    .into_iter()
                    .map(move |right| Production::new(left.clone(), right))
            })
            .collect();

        let g = Grammar::assemble(self.start.clone(), self.terminals.clone(), variables, productions);
        debug_assert!(g.left_recursive_variables().is_empty());
        g
    }
}
