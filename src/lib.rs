extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

mod error;
pub mod grammar;
pub mod pda;
pub use error::GrammarError;
pub use grammar::{EmptyStringPolicy, Grammar, Production, Symbol};
pub use pda::PushDownAutomaton;

fn error_to_json(e: GrammarError) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn greibach_to_json(grammar: &str) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(g) => g
            .normalize(EmptyStringPolicy::Discard)
            .to_production_output_vec()
            .to_json(),
        Err(e) => error_to_json(e),
    }
}

#[wasm_bindgen]
pub fn pda_to_json(grammar: &str) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(g) => g
            .to_pda(EmptyStringPolicy::Discard)
            .to_transition_output_vec()
            .to_json(),
        Err(e) => error_to_json(e),
    }
}
