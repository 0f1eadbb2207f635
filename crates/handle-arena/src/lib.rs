//! A generic, single-threaded persistent-handle fabric.
//!
//! This crate is domain-agnostic: it knows nothing about blocks or pages. It
//! exists because both `page` and `page-buffer` need the same property —
//! "a handle a caller is holding keeps pointing at the same logical entry
//! even after the container that used to own it erases, replaces, or moves
//! it" — and the bookkeeping for that property is identical in both places.
//!
//! # Shape
//!
//! A container (a `Page`, a `PageBuffer`) keeps its own ordering of entries
//! (e.g. `Vec<Key>`) separately from the arena that actually owns the
//! payloads. [`Key`] is what the container stores in its ordering; [`Handle`]
//! is what a long-lived caller holds on to.
//!
//! ```text
//!  container's ordering:      [ Key(0,g0), Key(2,g0), Key(1,g1) ]
//!                                    |          |          |
//!  arena slots (by index):   slot 0      slot 1      slot 2
//!                             (g0)        (g1)        (g0)
//! ```
//!
//! Removing an entry from the container's ordering does not, by itself, free
//! its payload: a [`Handle`] clones the slot's `Rc<RefCell<T>>` up front, so
//! the payload stays alive for as long as any handle (or the arena itself)
//! still references it — ordinary `Rc` refcounting does the "last handle
//! dropped" bookkeeping for free. What the arena *does* track is the slot's
//! generation, bumped every time a slot is vacated or replaced, so a stale
//! [`Key`] can be told "no longer reachable from the container" without
//! touching the payload at all.

#![forbid(unsafe_code)]

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// A lightweight, copyable reference to an arena slot.
///
/// `Key` is what a container stores in its own ordering (e.g. a `Vec<Key>`
/// for a `Page`'s blocks). It carries no payload and does not keep anything
/// alive by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    index: usize,
    generation: u32,
}

struct Slot<T> {
    generation: u32,
    payload: Option<Rc<RefCell<T>>>,
}

/// A dense store of entries addressed by [`Key`].
///
/// `Arena` never decides *ordering* — that is the container's job. It only
/// owns payloads and answers "is this key still reachable from the
/// container" (i.e. has it been removed/replaced since the key was minted).
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new entry, returning the key that addresses it.
    pub fn insert(&mut self, value: T) -> Key {
        let payload = Some(Rc::new(RefCell::new(value)));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.payload = payload;
            Key {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                payload,
            });
            Key {
                index,
                generation: 0,
            }
        }
    }

    /// True if `key` still addresses a live entry in this arena.
    pub fn contains(&self, key: Key) -> bool {
        self.slots
            .get(key.index)
            .is_some_and(|slot| slot.generation == key.generation && slot.payload.is_some())
    }

    /// Returns a handle to `key`'s entry, or `None` if it is no longer
    /// reachable (removed or replaced).
    pub fn handle(&self, key: Key) -> Option<Handle<T>> {
        let slot = self.slots.get(key.index)?;
        if slot.generation != key.generation {
            return None;
        }
        let payload = slot.payload.clone()?;
        Some(Handle { key, payload })
    }

    /// Removes `key`'s entry from the arena's bookkeeping, bumping the
    /// slot's generation so existing handles become invalid (H2: this does
    /// *not* drop the payload — any `Handle` that already cloned the `Rc`
    /// keeps it alive).
    ///
    /// Returns `false` if `key` did not address a live entry.
    pub fn remove(&mut self, key: Key) -> bool {
        let Some(slot) = self.slots.get_mut(key.index) else {
            return false;
        };
        if slot.generation != key.generation || slot.payload.is_none() {
            return false;
        }
        slot.payload = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index);
        true
    }

    /// Replaces `key`'s entry with `value`, returning the new key. The old
    /// key (and any handle holding it) becomes invalid, mirroring
    /// [`Arena::remove`] followed by [`Arena::insert`], but reuses the same
    /// slot so iteration order metadata the container keeps (e.g. "this
    /// slot is at position N") does not need to be recomputed by the arena
    /// itself.
    pub fn replace(&mut self, key: Key, value: T) -> Option<Key> {
        let slot = self.slots.get_mut(key.index)?;
        if slot.generation != key.generation || slot.payload.is_none() {
            return None;
        }
        slot.payload = Some(Rc::new(RefCell::new(value)));
        slot.generation = slot.generation.wrapping_add(1);
        Some(Key {
            index: key.index,
            generation: slot.generation,
        })
    }
}

/// A caller-held reference to one arena entry.
///
/// A `Handle` always gives safe read access to its payload, whether or not
/// its [`Key`] is still reachable from the container that minted it (H2).
/// Navigation (asking a container "what comes after the entry this handle
/// points to") through an invalid handle is the container's responsibility
/// to reject; `Handle` itself only tracks "can I still be found".
#[derive(Debug, Clone)]
pub struct Handle<T> {
    key: Key,
    payload: Rc<RefCell<T>>,
}

impl<T> Handle<T> {
    /// The key this handle was minted from.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Borrows the payload for reading. Always succeeds, even if the
    /// handle's key is no longer reachable from its container.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.payload.borrow()
    }

    /// Borrows the payload for writing.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.payload.borrow_mut()
    }

    /// True if `arena` still reaches this handle's entry through its key.
    pub fn is_valid(&self, arena: &Arena<T>) -> bool {
        arena.contains(self.key)
    }
}
