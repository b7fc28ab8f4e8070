use crowbook_text_processing::escape;
use serde::Serialize;

use super::{PushDownAutomaton, Transition};
use crate::grammar::EPSILON;

#[derive(Debug, Serialize)]
struct TransitionOutput {
    from: String,
    read: String,
    pop: String,
    to: String,
    push: Vec<String>,
}

impl From<&Transition> for TransitionOutput {
    fn from(t: &Transition) -> Self {
        Self {
            from: t.from.to_string(),
            read: t.read.clone().unwrap_or_else(|| EPSILON.to_string()),
            pop: t.pop.to_string(),
            to: t.to.to_string(),
            push: t.push.iter().map(ToString::to_string).collect(),
        }
    }
}

impl TransitionOutput {
    fn push_plaintext(&self) -> String {
        if self.push.is_empty() {
            EPSILON.to_string()
        } else {
            self.push.join(" ")
        }
    }

    fn to_plaintext(&self) -> String {
        format!(
            "{{{}, {}, {}}} => {{{}, {}}}",
            self.from,
            self.read,
            self.pop,
            self.to,
            self.push_plaintext()
        )
    }

    fn to_latex(&self) -> String {
        let push = if self.push.is_empty() {
            "\\epsilon".to_string()
        } else {
            self.push
                .iter()
                .map(|s| escape::tex(s.as_str()))
                .collect::<Vec<_>>()
                .join("\\,")
        };
        format!(
            "\\delta({}, {}, {}) & \\ni & ({}, {})",
            state_to_latex(&self.from),
            escape::tex(self.read.as_str()).replace(EPSILON, "\\epsilon"),
            escape::tex(self.pop.as_str()),
            state_to_latex(&self.to),
            push
        )
    }
}

fn state_to_latex(state: &str) -> String {
    format!("{}_{{{}}}", &state[..1], &state[1..])
}

#[derive(Debug, Serialize)]
pub struct TransitionOutputVec {
    states: Vec<String>,
    start: String,
    input_alphabet: Vec<String>,
    stack_alphabet: Vec<String>,
    initial_stack_symbol: String,
    final_states: Vec<String>,
    transitions: Vec<TransitionOutput>,
}

impl TransitionOutputVec {
    pub fn to_plaintext(&self) -> String {
        self.transitions
            .iter()
            .map(|t| t.to_plaintext())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{rcl}".to_string())
            .chain(self.transitions.iter().map(|t| t.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl PushDownAutomaton {
    pub fn to_transition_output_vec(&self) -> TransitionOutputVec {
        TransitionOutputVec {
            states: self.states.iter().map(ToString::to_string).collect(),
            start: self.start.to_string(),
            input_alphabet: self.input_alphabet.iter().cloned().collect(),
            stack_alphabet: self.stack_alphabet.iter().map(ToString::to_string).collect(),
            initial_stack_symbol: self.initial_stack_symbol.to_string(),
            final_states: self.final_states.iter().map(ToString::to_string).collect(),
            transitions: self.transitions.iter().map(TransitionOutput::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{EmptyStringPolicy, Grammar};

    #[test]
    fn plaintext_uses_brace_notation() {
        let pda = Grammar::parse("S -> a S B | a B\nB -> b")
            .unwrap()
            .to_pda(EmptyStringPolicy::Discard);
        let text = pda.to_transition_output_vec().to_plaintext();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "{q0, ε, $} => {q1, S $}",
                "{q1, a, S} => {q1, S B}",
                "{q1, a, S} => {q1, B}",
                "{q1, b, B} => {q1, ε}",
                "{q1, a, T_a} => {q1, ε}",
                "{q1, ε, $} => {qf, $}",
            ]
        );
    }

    #[test]
    fn latex_names_states_with_subscripts() {
        let pda = Grammar::parse("S -> a").unwrap().to_pda(EmptyStringPolicy::Discard);
        let latex = pda.to_transition_output_vec().to_latex();
        assert!(latex.contains("\\delta(q_{1}, a, S) & \\ni & (q_{1}, \\epsilon)"));
        assert!(latex.contains("\\delta(q_{0}, \\epsilon, "));
    }

    #[test]
    fn json_carries_the_whole_automaton() {
        let pda = Grammar::parse("S -> a").unwrap().to_pda(EmptyStringPolicy::Discard);
        let json: serde_json::Value =
            serde_json::from_str(&pda.to_transition_output_vec().to_json()).unwrap();
        assert_eq!(json["start"], "q0");
        assert_eq!(json["final_states"][0], "qf");
        assert_eq!(json["transitions"].as_array().unwrap().len(), 3);
    }
}
