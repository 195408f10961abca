//! Element payloads carried by pointer cells.
//!
//! A list never owns the nodes its cells point at. Nodes are allocated in a
//! [`NodeArena`] held by the caller, and every list borrowing from that arena
//! must be gone before the arena is dropped.

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::fmt;
use typed_arena::Arena;

use crate::error::ListError;

/// Kind of record a node (or a list header) is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    List,
    Ident,
    Integer,
}

impl NodeTag {
    pub fn name(self) -> &'static str {
        match self {
            NodeTag::List => "List",
            NodeTag::Ident => "Ident",
            NodeTag::Integer => "Integer",
        }
    }
}

/// A polymorphic element a pointer cell can refer to.
///
/// `Display` is the element's rendered text, which is what the reversal
/// algorithms emit.
pub trait Node: Any + fmt::Display + fmt::Debug {
    fn tag(&self) -> NodeTag;

    fn as_any(&self) -> &dyn Any;
}

impl<'n> dyn Node + 'n {
    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Node>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// An identifier node. The name can be changed through a shared reference so
/// that deep and shallow copies can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    name: RefCell<String>,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident {
            name: RefCell::new(name.into()),
        }
    }

    pub fn name(&self) -> Ref<'_, str> {
        Ref::map(self.name.borrow(), String::as_str)
    }

    pub fn rename(&self, name: impl Into<String>) {
        *self.name.borrow_mut() = name.into();
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.borrow())
    }
}

impl Node for Ident {
    fn tag(&self) -> NodeTag {
        NodeTag::Ident
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A boxed integer value node, distinct from an integer stored directly in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer {
    pub value: i64,
}

impl Integer {
    pub fn new(value: i64) -> Self {
        Integer { value }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Node for Integer {
    fn tag(&self) -> NodeTag {
        NodeTag::Integer
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Caller-owned storage for nodes. Allocation hands out shared references that
/// live as long as the arena; nothing is freed until the arena itself drops.
#[derive(Default)]
pub struct NodeArena {
    idents: Arena<Ident>,
    integers: Arena<Integer>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_ident(&self, name: impl Into<String>) -> &Ident {
        self.idents.alloc(Ident::new(name))
    }

    pub fn make_integer(&self, value: i64) -> &Integer {
        self.integers.alloc(Integer::new(value))
    }

    /// Allocates a fresh copy of `node` of the same kind. Only kinds the
    /// arena stores can be cloned.
    pub fn clone_node(&self, node: &dyn Node) -> Result<&dyn Node, ListError> {
        if let Some(ident) = node.downcast_ref::<Ident>() {
            Ok(self.idents.alloc(ident.clone()))
        } else if let Some(integer) = node.downcast_ref::<Integer>() {
            Ok(self.integers.alloc(*integer))
        } else {
            Err(ListError::PayloadMismatch {
                expected: "Ident or Integer",
                found: node.tag().name(),
            })
        }
    }

    pub fn allocated(&self) -> usize {
        self.idents.len() + self.integers.len()
    }
}

impl fmt::Debug for NodeArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeArena")
            .field("idents", &self.idents.len())
            .field("integers", &self.integers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_display_and_rename() {
        let ident = Ident::new("delak");
        assert_eq!(ident.to_string(), "delak");
        assert_eq!(&*ident.name(), "delak");

        ident.rename("bolek");
        assert_eq!(ident.to_string(), "bolek");
    }

    #[test]
    fn test_downcast_by_kind() {
        let arena = NodeArena::new();
        let ident: &dyn Node = arena.make_ident("patryk");
        let integer: &dyn Node = arena.make_integer(42);

        assert!(ident.is::<Ident>());
        assert!(ident.downcast_ref::<Integer>().is_none());
        assert_eq!(integer.downcast_ref::<Integer>().map(|i| i.value), Some(42));
        assert_eq!(ident.tag(), NodeTag::Ident);
        assert_eq!(integer.tag().name(), "Integer");
    }

    #[test]
    fn test_clone_node_is_independent() {
        let arena = NodeArena::new();
        let original = arena.make_ident("monika");
        let copy = arena.clone_node(original).unwrap();

        original.rename("milosz");
        assert_eq!(copy.to_string(), "monika");
        assert_eq!(arena.allocated(), 2);
    }

    #[test]
    fn test_empty_ident_renders_empty() {
        let arena = NodeArena::new();
        assert_eq!(arena.make_ident("").to_string(), "");
    }
}
