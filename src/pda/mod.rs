use std::fmt;

use indexmap::IndexSet;
use log::debug;

use crate::grammar::{EmptyStringPolicy, Grammar, Symbol};

pub mod pretty_print;

pub const BOTTOM_MARK: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    Initial,
    Working,
    Accepting,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Initial => write!(f, "q0"),
            State::Working => write!(f, "q1"),
            State::Accepting => write!(f, "qf"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StackSymbol {
    Bottom,
    Terminal(String),
    Variable(String),
}

impl From<&Symbol> for StackSymbol {
    fn from(s: &Symbol) -> Self {
        match s {
            Symbol::Terminal(t) => StackSymbol::Terminal(t.clone()),
            Symbol::Variable(v) => StackSymbol::Variable(v.clone()),
        }
    }
}

impl fmt::Display for StackSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackSymbol::Bottom => write!(f, "{}", BOTTOM_MARK),
            StackSymbol::Terminal(x) | StackSymbol::Variable(x) => write!(f, "{}", x),
        }
    }
}

/// `{from, read, pop} => {to, push}`; `read == None` consumes no input.
/// The first symbol of `push` ends up on top of the stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: State,
    pub read: Option<String>,
    pub pop: StackSymbol,
    pub to: State,
    pub push: Vec<StackSymbol>,
}

/// Pushdown automaton accepting by final state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushDownAutomaton {
    states: IndexSet<State>,
    start: State,
    input_alphabet: IndexSet<String>,
    stack_alphabet: IndexSet<StackSymbol>,
    initial_stack_symbol: StackSymbol,
    final_states: IndexSet<State>,
    transitions: IndexSet<Transition>,
}

impl PushDownAutomaton {
    pub fn states(&self) -> &IndexSet<State> {
        &self.states
    }

    pub fn start(&self) -> State {
        self.start
    }

    pub fn input_alphabet(&self) -> &IndexSet<String> {
        &self.input_alphabet
    }

    pub fn stack_alphabet(&self) -> &IndexSet<StackSymbol> {
        &self.stack_alphabet
    }

    pub fn initial_stack_symbol(&self) -> &StackSymbol {
        &self.initial_stack_symbol
    }

    pub fn final_states(&self) -> &IndexSet<State> {
        &self.final_states
    }

    pub fn transitions(&self) -> &IndexSet<Transition> {
        &self.transitions
    }
}

/// Simulates leftmost derivations: the stack holds the part of the sentential
/// form still to be matched. A Greibach production `A -> a α` becomes one
/// transition reading `a`, popping `A` and pushing `α`.
impl From<&Grammar> for PushDownAutomaton {
    fn from(g: &Grammar) -> Self {
        let mut transitions: IndexSet<Transition> = IndexSet::new();

        transitions.insert(Transition {
            from: State::Initial,
            read: None,
            pop: StackSymbol::Bottom,
            to: State::Working,
            push: vec![StackSymbol::Variable(g.start().to_string()), StackSymbol::Bottom],
        });

        let mut matched_terminals: IndexSet<&str> = IndexSet::new();
        for p in g.productions() {
            let pop = StackSymbol::Variable(p.left.clone());
            let transition = match p.right.split_first() {
                Some((Symbol::Terminal(a), rest)) => {
                    matched_terminals.extend(rest.iter().filter(|s| s.is_terminal()).map(Symbol::name));
                    Transition {
                        from: State::Working,
                        read: Some(a.clone()),
                        pop,
                        to: State::Working,
                        push: rest.iter().map(StackSymbol::from).collect(),
                    }
                }
                // outside Greibach form: expand without reading
                _ => {
                    matched_terminals.extend(p.right.iter().filter(|s| s.is_terminal()).map(Symbol::name));
                    Transition {
                        from: State::Working,
                        read: None,
                        pop,
                        to: State::Working,
                        push: p.right.iter().map(StackSymbol::from).collect(),
                    }
                }
            };
            transitions.insert(transition);
        }

        for a in matched_terminals {
            transitions.insert(Transition {
                from: State::Working,
                read: Some(a.to_string()),
                pop: StackSymbol::Terminal(a.to_string()),
                to: State::Working,
                push: Vec::new(),
            });
        }

        transitions.insert(Transition {
            from: State::Working,
            read: None,
            pop: StackSymbol::Bottom,
            to: State::Accepting,
            push: vec![StackSymbol::Bottom],
        });
        debug!("synthesized {} transitions", transitions.len());

        let stack_alphabet = g
            .terminals()
            .iter()
            .map(|t| StackSymbol::Terminal(t.clone()))
            .chain(g.variables().iter().map(|v| StackSymbol::Variable(v.clone())))
            .chain(std::iter::once(StackSymbol::Bottom))
            .collect();

        PushDownAutomaton {
            states: [State::Initial, State::Working, State::Accepting]
                .into_iter()
                .collect(),
            start: State::Initial,
            input_alphabet: g.terminals().clone(),
            stack_alphabet,
            initial_stack_symbol: StackSymbol::Bottom,
            final_states: std::iter::once(State::Accepting).collect(),
            transitions,
        }
    }
}

impl Grammar {
    pub fn to_pda(&self, policy: EmptyStringPolicy) -> PushDownAutomaton {
        PushDownAutomaton::from(&self.normalize(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Production;

    fn t(s: &str) -> Symbol {
        Symbol::terminal(s)
    }

    fn v(s: &str) -> Symbol {
        Symbol::variable(s)
    }

    /// S -> a S B | a B, B -> b
    fn greibach() -> Grammar {
        Grammar::new(
            "S",
            ["a", "b"],
            ["S", "B"],
            [
                Production::new("S", vec![t("a"), v("S"), v("B")]),
                Production::new("B", vec![t("b")]),
                Production::new("S", vec![t("a"), v("B")]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn one_transition_per_production_plus_entry_and_exit() {
        let g = greibach();
        let pda = PushDownAutomaton::from(&g);
        assert_eq!(pda.transitions().len(), g.productions().len() + 2);
        assert_eq!(pda.states().len(), 3);
        assert_eq!(pda.start(), State::Initial);
        assert_eq!(pda.initial_stack_symbol(), &StackSymbol::Bottom);
        assert!(pda.final_states().contains(&State::Accepting));
        assert_eq!(pda.input_alphabet(), g.terminals());
    }

    #[test]
    fn stack_alphabet_is_terminals_variables_and_bottom() {
        let pda = PushDownAutomaton::from(&greibach());
        let expected: IndexSet<StackSymbol> = [
            StackSymbol::Terminal("a".to_string()),
            StackSymbol::Terminal("b".to_string()),
            StackSymbol::Variable("S".to_string()),
            StackSymbol::Variable("B".to_string()),
            StackSymbol::Bottom,
        ]
        .into_iter()
        .collect();
        assert_eq!(pda.stack_alphabet(), &expected);
    }

    #[test]
    fn productions_become_reading_transitions() {
        let pda = PushDownAutomaton::from(&greibach());
        let entry = Transition {
            from: State::Initial,
            read: None,
            pop: StackSymbol::Bottom,
            to: State::Working,
            push: vec![StackSymbol::Variable("S".to_string()), StackSymbol::Bottom],
        };
        let recursive = Transition {
            from: State::Working,
            read: Some("a".to_string()),
            pop: StackSymbol::Variable("S".to_string()),
            to: State::Working,
            push: vec![
                StackSymbol::Variable("S".to_string()),
                StackSymbol::Variable("B".to_string()),
            ],
        };
        let terminal = Transition {
            from: State::Working,
            read: Some("b".to_string()),
            pop: StackSymbol::Variable("B".to_string()),
            to: State::Working,
            push: vec![],
        };
        let exit = Transition {
            from: State::Working,
            read: None,
            pop: StackSymbol::Bottom,
            to: State::Accepting,
            push: vec![StackSymbol::Bottom],
        };
        for transition in [entry, recursive, terminal, exit] {
            assert!(pda.transitions().contains(&transition));
        }
    }

    #[test]
    fn variable_led_bodies_expand_without_reading() {
        // S -> A b, A -> a
        let g = Grammar::new(
            "S",
            ["a", "b"],
            ["S", "A"],
            [
                Production::new("S", vec![v("A"), t("b")]),
                Production::new("A", vec![t("a")]),
            ],
        )
        .unwrap();
        let pda = PushDownAutomaton::from(&g);
        let expand = Transition {
            from: State::Working,
            read: None,
            pop: StackSymbol::Variable("S".to_string()),
            to: State::Working,
            push: vec![
                StackSymbol::Variable("A".to_string()),
                StackSymbol::Terminal("b".to_string()),
            ],
        };
        let matched = Transition {
            from: State::Working,
            read: Some("b".to_string()),
            pop: StackSymbol::Terminal("b".to_string()),
            to: State::Working,
            push: vec![],
        };
        assert!(pda.transitions().contains(&expand));
        assert!(pda.transitions().contains(&matched));
        // entry, S, A, match b, exit
        assert_eq!(pda.transitions().len(), 5);

        let text = pda.to_transition_output_vec().to_plaintext();
        assert!(text.contains("{q1, ε, S} => {q1, A b}"));
        assert!(text.contains("{q1, b, b} => {q1, ε}"));
    }

    #[test]
    fn retained_empty_string_pops_start() {
        let pda = Grammar::parse("S -> a S b | ε")
            .unwrap()
            .to_pda(EmptyStringPolicy::RetainAtStart);
        assert!(pda.transitions().contains(&Transition {
            from: State::Working,
            read: None,
            pop: StackSymbol::Variable("S'".to_string()),
            to: State::Working,
            push: vec![],
        }));
    }
}
