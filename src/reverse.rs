//! Tail-to-head rendering of any [`NodeSequence`].
//!
//! All four strategies emit the elements in reverse visiting order, separated
//! by [`SEPARATOR`](crate::sequence::SEPARATOR), with an empty string for an
//! empty container. They differ only in where the deferred elements are kept:
//!
//! | strategy | extra space | source |
//! |---|---|---|
//! | [`reverse_with_stack`] | O(n) vector used as a stack | read only |
//! | [`reverse_with_list`] | O(n) auxiliary linked list | read only |
//! | [`reverse_recursive`] | O(n) call stack | read only |
//! | [`reverse_in_place`] | O(1) | links reversed as a side effect |

use std::collections::LinkedList;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::sequence::{NodeSequence, ReversibleSequence};

pub fn reverse_with_stack<S: NodeSequence>(seq: &S) -> String {
    let mut stack = Vec::new();
    for node in seq.begin() {
        stack.push(node);
    }

    let mut result = String::new();
    let mut first = true;
    while let Some(node) = stack.pop() {
        S::append_element(node, &mut first, &mut result);
    }
    result
}

pub fn reverse_with_list<S: NodeSequence>(seq: &S) -> String {
    let mut reversed = LinkedList::new();
    for node in seq.begin() {
        reversed.push_front(node);
    }

    let mut result = String::new();
    let mut first = true;
    for node in reversed {
        S::append_element(node, &mut first, &mut result);
    }
    result
}

pub fn reverse_recursive<S: NodeSequence>(seq: &S) -> String {
    let mut result = String::new();
    let mut first = true;
    render_rest::<S>(seq.begin(), &mut first, &mut result);
    result
}

fn render_rest<'s, S>(mut rest: S::Iter<'s>, first: &mut bool, result: &mut String)
where
    S: NodeSequence + 's,
{
    let Some(node) = rest.next() else {
        return;
    };
    render_rest::<S>(rest, first, result);
    S::append_element(node, first, result);
}

/// Reverses `seq` natively, then renders it front to back. `seq` is left
/// reversed.
pub fn reverse_in_place<S: ReversibleSequence>(seq: &mut S) -> String {
    seq.reverse();
    render_forward(&*seq)
}

/// Head-to-tail rendering, no reversal.
pub fn render_forward<S: NodeSequence>(seq: &S) -> String {
    let mut result = String::new();
    let mut first = true;
    for node in seq.begin() {
        S::append_element(node, &mut first, &mut result);
    }
    result
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown strategy '{0}' (expected stack, auxiliary-list, recursive or in-place)")]
pub struct UnknownStrategy(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Stack,
    AuxiliaryList,
    Recursive,
    InPlace,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Stack,
        Strategy::AuxiliaryList,
        Strategy::Recursive,
        Strategy::InPlace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Stack => "stack",
            Strategy::AuxiliaryList => "auxiliary-list",
            Strategy::Recursive => "recursive",
            Strategy::InPlace => "in-place",
        }
    }

    pub fn mutates_source(self) -> bool {
        matches!(self, Strategy::InPlace)
    }

    pub fn render<S: ReversibleSequence>(self, seq: &mut S) -> String {
        match self {
            Strategy::Stack => reverse_with_stack(seq),
            Strategy::AuxiliaryList => reverse_with_list(seq),
            Strategy::Recursive => reverse_recursive(seq),
            Strategy::InPlace => reverse_in_place(seq),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::List;
    use crate::node::{Node, NodeArena};

    fn cases() -> Vec<(Vec<&'static str>, &'static str)> {
        vec![
            (vec![], ""),
            (vec![""], ""),
            (vec!["delak"], "delak"),
            (vec!["delak", "bolek"], "bolek.delak"),
            (
                vec!["delak", "bolek", "patryk", "monika", "milosz"],
                "milosz.monika.patryk.bolek.delak",
            ),
        ]
    }

    fn build_list<'a>(arena: &'a NodeArena, names: &[&str]) -> List<'a> {
        let mut list = List::new();
        for name in names {
            list.push_back(arena.make_ident(*name));
        }
        list
    }

    fn check_read_only(render: fn(&List<'_>) -> String) {
        for (input, expected) in cases() {
            let arena = NodeArena::new();
            let mut list = build_list(&arena, &input);
            assert_eq!(list.len(), input.len());

            assert_eq!(render(&list), expected, "input {:?}", input);
            assert_eq!(render_forward(&list), input.join("."));

            list.clear();
            assert_eq!(list.len(), 0);
        }
    }

    #[test]
    fn test_reverse_with_stack() {
        check_read_only(|list| reverse_with_stack(list));
    }

    #[test]
    fn test_reverse_with_list() {
        check_read_only(|list| reverse_with_list(list));
    }

    #[test]
    fn test_reverse_recursive() {
        check_read_only(|list| reverse_recursive(list));
    }

    #[test]
    fn test_reverse_in_place_mutates_source() {
        for (input, expected) in cases() {
            let arena = NodeArena::new();
            let mut list = build_list(&arena, &input);

            assert_eq!(reverse_in_place(&mut list), expected);
            assert_eq!(render_forward(&list), expected);
            assert_eq!(list.len(), input.len());
        }
    }

    #[test]
    fn test_strategies_agree_on_ints() {
        let mut list = List::new();
        for value in [3, -1, 40, 0] {
            list.push_back(value);
        }
        for strategy in Strategy::ALL {
            let mut copy = list.copy(|cell| cell.payload());
            assert_eq!(strategy.render(&mut copy), "0.40.-1.3", "{}", strategy);
        }
    }

    #[test]
    fn test_std_linked_list() {
        let arena = NodeArena::new();
        let mut nodes: LinkedList<&dyn Node> = LinkedList::new();
        nodes.push_back(arena.make_ident("delak"));
        nodes.push_back(arena.make_ident("bolek"));

        assert_eq!(reverse_with_stack(&nodes), "bolek.delak");
        assert_eq!(reverse_with_list(&nodes), "bolek.delak");
        assert_eq!(reverse_recursive(&nodes), "bolek.delak");
    }

    #[test]
    fn test_vec_in_place() {
        let mut words = vec!["delak", "bolek", "patryk"];
        assert_eq!(reverse_in_place(&mut words), "patryk.bolek.delak");
        assert_eq!(words, ["patryk", "bolek", "delak"]);
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!(
            "backwards".parse::<Strategy>(),
            Err(UnknownStrategy("backwards".to_string()))
        );
        assert!(Strategy::InPlace.mutates_source());
        assert!(!Strategy::Recursive.mutates_source());
    }
}
