//! Per-container capability descriptors.
//!
//! The reversal algorithms in [`crate::reverse`] only ever talk to a container
//! through [`NodeSequence`]: how to walk it and how to render one element.
//! Containers that can reverse their own links without extra space also
//! implement [`ReversibleSequence`].

use std::collections::LinkedList;
use std::fmt::{self, Write};

use crate::cell::{ListCell, Payload};
use crate::list::{self, List};

/// Separator placed between rendered elements.
pub const SEPARATOR: &str = ".";

pub trait NodeSequence {
    /// What the iterator yields for one element.
    type Node<'s>: Copy
    where
        Self: 's;

    /// Head-to-tail walk. Reaching `None` is reaching the end.
    type Iter<'s>: Iterator<Item = Self::Node<'s>>
    where
        Self: 's;

    fn begin(&self) -> Self::Iter<'_>;

    /// Appends `node` to `result`, preceded by [`SEPARATOR`] unless `first`
    /// is set, then clears `first`.
    fn append_element<'s>(node: Self::Node<'s>, first: &mut bool, result: &mut String)
    where
        Self: 's;
}

pub trait ReversibleSequence: NodeSequence {
    fn reverse(&mut self);
}

/// Shared body of every `append_element`.
pub fn append_display(value: impl fmt::Display, first: &mut bool, result: &mut String) {
    if !*first {
        result.push_str(SEPARATOR);
    }
    // writing into a String cannot fail
    let _ = write!(result, "{}", value);
    *first = false;
}

impl<'a> NodeSequence for List<'a> {
    type Node<'s> = &'s ListCell<'a> where Self: 's;
    type Iter<'s> = list::Iter<'s, 'a> where Self: 's;

    fn begin(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn append_element<'s>(node: Self::Node<'s>, first: &mut bool, result: &mut String)
    where
        Self: 's,
    {
        match node.payload() {
            Payload::Int(value) => append_display(value, first, result),
            Payload::Ptr(node) => append_display(node, first, result),
        }
    }
}

impl ReversibleSequence for List<'_> {
    fn reverse(&mut self) {
        List::reverse(self)
    }
}

impl<T: fmt::Display> NodeSequence for LinkedList<T> {
    type Node<'s> = &'s T where Self: 's;
    type Iter<'s> = std::collections::linked_list::Iter<'s, T> where Self: 's;

    fn begin(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn append_element<'s>(node: Self::Node<'s>, first: &mut bool, result: &mut String)
    where
        Self: 's,
    {
        append_display(node, first, result)
    }
}

impl<T: fmt::Display> NodeSequence for Vec<T> {
    type Node<'s> = &'s T where Self: 's;
    type Iter<'s> = std::slice::Iter<'s, T> where Self: 's;

    fn begin(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn append_element<'s>(node: Self::Node<'s>, first: &mut bool, result: &mut String)
    where
        Self: 's,
    {
        append_display(node, first, result)
    }
}

impl<T: fmt::Display> ReversibleSequence for Vec<T> {
    fn reverse(&mut self) {
        self.as_mut_slice().reverse()
    }
}
