pub mod eliminate_epsilon;
pub mod eliminate_left_recursion;
pub mod eliminate_unit;
pub mod grammar;
pub mod greibach;
pub mod nullable;
pub mod parse;
pub mod pretty_print;
pub use eliminate_epsilon::EmptyStringPolicy;
pub use grammar::{Grammar, Production, Symbol};

pub const EPSILON: &str = "ε";

impl Grammar {
    pub fn normalize(&self, policy: EmptyStringPolicy) -> Grammar {
        self.eliminate_epsilon(policy)
            .eliminate_unit_productions()
            .eliminate_left_recursion()
            .to_greibach()
    }
}
