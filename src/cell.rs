use std::fmt;

use crate::error::ListError;
use crate::node::{Ident, Integer, Node};

/// The value a cell carries. The variant is chosen when the cell is pushed and
/// never changes afterwards.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Int(i32),
    Ptr(&'a dyn Node),
}

impl<'a> Payload<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Int(_) => "int",
            Payload::Ptr(node) => node.tag().name(),
        }
    }
}

impl fmt::Display for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Int(value) => write!(f, "{}", value),
            Payload::Ptr(node) => write!(f, "{}", node),
        }
    }
}

// Only these conversions exist, so pushing any other type is a compile error.

impl From<i32> for Payload<'_> {
    fn from(value: i32) -> Self {
        Payload::Int(value)
    }
}

impl<'a> From<&'a dyn Node> for Payload<'a> {
    fn from(node: &'a dyn Node) -> Self {
        Payload::Ptr(node)
    }
}

impl<'a> From<&'a Ident> for Payload<'a> {
    fn from(node: &'a Ident) -> Self {
        Payload::Ptr(node)
    }
}

impl<'a> From<&'a Integer> for Payload<'a> {
    fn from(node: &'a Integer) -> Self {
        Payload::Ptr(node)
    }
}

/// One link of a [`List`](crate::List). `next` is the slot index of the
/// following cell inside the owning list.
#[derive(Debug, Clone)]
pub struct ListCell<'a> {
    payload: Payload<'a>,
    pub(crate) next: Option<usize>,
}

impl<'a> ListCell<'a> {
    pub(crate) fn new(payload: Payload<'a>) -> Self {
        ListCell {
            payload,
            next: None,
        }
    }

    pub fn payload(&self) -> Payload<'a> {
        self.payload
    }

    pub fn int_value(&self) -> Option<i32> {
        match self.payload {
            Payload::Int(value) => Some(value),
            Payload::Ptr(_) => None,
        }
    }

    pub fn ptr_value(&self) -> Option<&'a dyn Node> {
        match self.payload {
            Payload::Ptr(node) => Some(node),
            Payload::Int(_) => None,
        }
    }

    /// Recovers the concrete node behind a pointer cell.
    pub fn cast<T: Node>(&self) -> Result<&'a T, ListError> {
        let node = self.ptr_value().ok_or(ListError::PayloadMismatch {
            expected: std::any::type_name::<T>(),
            found: "int",
        })?;
        node.downcast_ref::<T>()
            .ok_or_else(|| ListError::PayloadMismatch {
                expected: std::any::type_name::<T>(),
                found: node.tag().name(),
            })
    }
}
