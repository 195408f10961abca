//! Singly-linked cell list with O(1) append, prepend and length.
//!
//! Cells live in a slot vector owned by the list and link to each other by
//! slot index. Erased slots go on a free list and are recycled with a bumped
//! generation, so a [`Cursor`] that still points at an erased cell is detected
//! instead of silently reading whatever reused the slot.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Deref, DerefMut, Index};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::cell::{ListCell, Payload};
use crate::error::ListError;
use crate::node::NodeTag;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one list instance, carried by its cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(u64);

impl ListId {
    fn fresh() -> Self {
        ListId(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellHandle {
    index: usize,
    generation: u64,
}

struct Slot<'a> {
    cell: Option<ListCell<'a>>,
    generation: u64,
}

/// List header: head, tail and length over cells whose pointer payloads
/// borrow from caller-owned storage for `'a`.
pub struct List<'a> {
    id: ListId,
    kind: NodeTag,
    slots: Vec<Slot<'a>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    length: usize,
}

impl<'a> List<'a> {
    pub fn new() -> Self {
        List {
            id: ListId::fresh(),
            kind: NodeTag::List,
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            length: 0,
        }
    }

    pub fn new_boxed() -> Box<Self> {
        Box::new(Self::new())
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn kind(&self) -> NodeTag {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    // ---------------------------------------------------------------------
    // Slot management
    // ---------------------------------------------------------------------

    fn alloc(&mut self, cell: ListCell<'a>) -> usize {
        match self.free.pop() {
            Some(index) => {
                trace!("list {:?}: reusing cell slot {}", self.id, index);
                self.slots[index].cell = Some(cell);
                index
            }
            None => {
                self.slots.push(Slot {
                    cell: Some(cell),
                    generation: 0,
                });
                self.slots.len() - 1
            }
        }
    }

    /// Makes sure the next `alloc` and the matching `release` cannot allocate.
    fn reserve_slot(&mut self) -> Result<(), ListError> {
        if self.free.is_empty() {
            self.slots.try_reserve(1)?;
            self.free.try_reserve(self.slots.len() + 1)?;
        }
        Ok(())
    }

    fn release(&mut self, index: usize) -> Option<ListCell<'a>> {
        let slot = &mut self.slots[index];
        let cell = slot.cell.take();
        slot.generation += 1;
        self.free.push(index);
        cell
    }

    fn next_of(&self, index: usize) -> Option<usize> {
        self.slots[index].cell.as_ref().and_then(|cell| cell.next)
    }

    fn set_next(&mut self, index: usize, next: Option<usize>) {
        if let Some(cell) = self.slots[index].cell.as_mut() {
            cell.next = next;
        }
    }

    fn cursor_at(&self, index: Option<usize>) -> Cursor {
        Cursor {
            list: self.id,
            at: index.map(|index| CellHandle {
                index,
                generation: self.slots[index].generation,
            }),
        }
    }

    fn resolve(&self, cursor: Cursor) -> Result<usize, ListError> {
        if cursor.list != self.id {
            return Err(ListError::ForeignCursor);
        }
        let handle = cursor.at.ok_or(ListError::EndOfList)?;
        match self.slots.get(handle.index) {
            Some(slot) if slot.generation == handle.generation && slot.cell.is_some() => {
                Ok(handle.index)
            }
            _ => Err(ListError::StaleCursor {
                index: handle.index,
            }),
        }
    }

    // ---------------------------------------------------------------------
    // Insertion
    // ---------------------------------------------------------------------

    pub fn push_back(&mut self, value: impl Into<Payload<'a>>) {
        let index = self.alloc(ListCell::new(value.into()));
        match self.tail {
            Some(tail) => self.set_next(tail, Some(index)),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.length += 1;
    }

    /// Inserts at the head. The tail only moves when the list was empty.
    pub fn push_front(&mut self, value: impl Into<Payload<'a>>) {
        let index = self.alloc(ListCell::new(value.into()));
        self.set_next(index, self.head);
        if self.head.is_none() {
            self.tail = Some(index);
        }
        self.head = Some(index);
        self.length += 1;
    }

    pub fn try_push_back(&mut self, value: impl Into<Payload<'a>>) -> Result<(), ListError> {
        self.reserve_slot()?;
        self.push_back(value);
        Ok(())
    }

    pub fn try_push_front(&mut self, value: impl Into<Payload<'a>>) -> Result<(), ListError> {
        self.reserve_slot()?;
        self.push_front(value);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Cursors
    // ---------------------------------------------------------------------

    pub fn begin(&self) -> Cursor {
        self.cursor_at(self.head)
    }

    /// The end sentinel. It never refers to a cell and must not be dereferenced.
    pub fn end(&self) -> Cursor {
        self.cursor_at(None)
    }

    pub fn try_get(&self, cursor: Cursor) -> Result<&ListCell<'a>, ListError> {
        let index = self.resolve(cursor)?;
        self.slots[index]
            .cell
            .as_ref()
            .ok_or(ListError::StaleCursor { index })
    }

    /// Dereferences `cursor`.
    ///
    /// # Panics
    ///
    /// If `cursor` is the end sentinel, was erased, or belongs to another list.
    pub fn get(&self, cursor: Cursor) -> &ListCell<'a> {
        match self.try_get(cursor) {
            Ok(cell) => cell,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_successor(&self, cursor: Cursor) -> Result<Cursor, ListError> {
        let index = self.resolve(cursor)?;
        Ok(self.cursor_at(self.next_of(index)))
    }

    pub fn successor(&self, cursor: Cursor) -> Cursor {
        match self.try_successor(cursor) {
            Ok(next) => next,
            Err(err) => panic!("{}", err),
        }
    }

    /// First cell matching `pred`, or [`end`](Self::end) when none does.
    pub fn find<P>(&self, mut pred: P) -> Cursor
    where
        P: FnMut(&ListCell<'a>) -> bool,
    {
        let mut current = self.head;
        while let Some(index) = current {
            match self.slots[index].cell.as_ref() {
                Some(cell) if pred(cell) => return self.cursor_at(Some(index)),
                Some(cell) => current = cell.next,
                None => break,
            }
        }
        self.end()
    }

    // ---------------------------------------------------------------------
    // Removal
    // ---------------------------------------------------------------------

    /// Unlinks and frees the cell under `cursor`, returning a cursor to its
    /// successor. The payload the cell pointed at is left alone.
    ///
    /// Finding the predecessor walks from the head, so this is O(n).
    pub fn try_erase(&mut self, cursor: Cursor) -> Result<Cursor, ListError> {
        let index = self.resolve(cursor)?;
        let prev = self.predecessor(index);
        let next = self.next_of(index);

        match prev {
            Some(prev) => self.set_next(prev, next),
            None => self.head = next,
        }
        if self.tail == Some(index) {
            self.tail = prev;
        }
        self.length -= 1;
        self.release(index);

        Ok(self.cursor_at(next))
    }

    /// # Panics
    ///
    /// If `cursor` is the end sentinel, was already erased, or belongs to
    /// another list.
    pub fn erase(&mut self, cursor: Cursor) -> Cursor {
        match self.try_erase(cursor) {
            Ok(next) => next,
            Err(err) => panic!("{}", err),
        }
    }

    fn predecessor(&self, index: usize) -> Option<usize> {
        let mut prev = None;
        let mut current = self.head;
        while let Some(at) = current {
            if at == index {
                break;
            }
            prev = Some(at);
            current = self.next_of(at);
        }
        prev
    }

    /// Erases every cell, head first. Payloads are not touched; afterwards the
    /// list behaves like a freshly constructed one.
    pub fn clear(&mut self) {
        let released = self.length;
        let mut current = self.begin();
        while !current.is_end() {
            current = self.erase(current);
        }
        debug!("list {:?}: cleared {} cells", self.id, released);
    }

    // ---------------------------------------------------------------------
    // Whole-list operations
    // ---------------------------------------------------------------------

    /// Builds a new list of the same length and order, with each payload
    /// produced by `clone` from the corresponding original cell.
    pub fn copy<'b, F>(&self, mut clone: F) -> List<'b>
    where
        F: FnMut(&ListCell<'a>) -> Payload<'b>,
    {
        let mut copy = List::new();
        for cell in self {
            copy.push_back(clone(cell));
        }
        copy
    }

    pub fn try_copy<'b, F, E>(&self, mut clone: F) -> Result<List<'b>, E>
    where
        F: FnMut(&ListCell<'a>) -> Result<Payload<'b>, E>,
    {
        let mut copy = List::new();
        for cell in self {
            copy.push_back(clone(cell)?);
        }
        Ok(copy)
    }

    /// Reverses the links in place. Cells keep their slots, so cursors stay
    /// valid and now walk in the opposite order.
    pub fn reverse(&mut self) {
        let mut prev = None;
        let mut current = self.head;
        while let Some(index) = current {
            current = self.next_of(index);
            self.set_next(index, prev);
            prev = Some(index);
        }
        self.tail = self.head;
        self.head = prev;
    }

    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.length,
        }
    }

    pub fn front(&self) -> Option<&ListCell<'a>> {
        self.head.and_then(|index| self.slots[index].cell.as_ref())
    }

    pub fn back(&self) -> Option<&ListCell<'a>> {
        self.tail.and_then(|index| self.slots[index].cell.as_ref())
    }

    /// Positional comparison by rendered payload text.
    pub fn same_rendering(&self, other: &List<'_>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .map(|cell| cell.payload().to_string())
                .eq(other.iter().map(|cell| cell.payload().to_string()))
    }
}

impl Default for List<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Index<Cursor> for List<'a> {
    type Output = ListCell<'a>;

    fn index(&self, cursor: Cursor) -> &Self::Output {
        self.get(cursor)
    }
}

impl fmt::Debug for List<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, cell) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", cell.payload())?;
        }
        write!(f, "]")
    }
}

impl<'l, 'a> IntoIterator for &'l List<'a> {
    type Item = &'l ListCell<'a>;
    type IntoIter = Iter<'l, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing head-to-tail iterator over cells.
#[derive(Clone)]
pub struct Iter<'l, 'a> {
    list: &'l List<'a>,
    current: Option<usize>,
    remaining: usize,
}

impl<'l, 'a> Iterator for Iter<'l, 'a> {
    type Item = &'l ListCell<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        let cell = self.list.slots[index].cell.as_ref()?;
        self.current = cell.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}

impl FusedIterator for Iter<'_, '_> {}

/// Forward-only position in a [`List`].
///
/// A cursor is a plain token; reading or advancing it goes through the list it
/// came from. Two cursors are equal when they come from the same list and sit
/// on the same cell (or are both at the end). Cursors from different lists
/// never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    list: ListId,
    at: Option<CellHandle>,
}

impl Cursor {
    pub fn is_end(&self) -> bool {
        self.at.is_none()
    }

    pub fn list_id(&self) -> ListId {
        self.list
    }

    /// Pre-increment: moves to the next cell and returns the new position.
    ///
    /// # Panics
    ///
    /// If the cursor is already at the end or is not valid for `list`.
    pub fn advance(&mut self, list: &List<'_>) -> Cursor {
        *self = list.successor(*self);
        *self
    }

    /// Post-increment: moves to the next cell and returns the old position.
    pub fn post_advance(&mut self, list: &List<'_>) -> Cursor {
        let previous = *self;
        self.advance(list);
        previous
    }
}

/// Clears the wrapped list when dropped, on every exit path including early
/// returns and unwinding. Payloads are not freed.
pub struct ListHolder<'l, 'a> {
    list: &'l mut List<'a>,
}

impl<'l, 'a> ListHolder<'l, 'a> {
    pub fn new(list: &'l mut List<'a>) -> Self {
        ListHolder { list }
    }

    pub fn list(&mut self) -> &mut List<'a> {
        self.list
    }
}

impl<'a> Deref for ListHolder<'_, 'a> {
    type Target = List<'a>;

    fn deref(&self) -> &Self::Target {
        self.list
    }
}

impl<'a> DerefMut for ListHolder<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.list
    }
}

impl Drop for ListHolder<'_, '_> {
    fn drop(&mut self) {
        trace!("list holder releasing list {:?}", self.list.id());
        self.list.clear();
    }
}
