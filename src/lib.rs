//! Singly-linked cell lists of integers and node pointers, plus four
//! interchangeable ways of rendering any node sequence tail-to-head.
//!
//! ```
//! use cell_list::{reverse_with_stack, List, NodeArena};
//!
//! let arena = NodeArena::new();
//! let mut list = List::new();
//! list.push_back(arena.make_ident("delak"));
//! list.push_back(arena.make_ident("bolek"));
//!
//! assert_eq!(reverse_with_stack(&list), "bolek.delak");
//! ```

pub mod cell;
pub mod error;
pub mod list;
pub mod node;
pub mod reverse;
pub mod scenario;
pub mod sequence;

pub use cell::{ListCell, Payload};
pub use error::ListError;
pub use list::{Cursor, Iter, List, ListHolder, ListId};
pub use node::{Ident, Integer, Node, NodeArena, NodeTag};
pub use reverse::{
    render_forward, reverse_in_place, reverse_recursive, reverse_with_list, reverse_with_stack,
    Strategy,
};
pub use sequence::{NodeSequence, ReversibleSequence, SEPARATOR};
