//! Per-render memoization keyed on referential or value equality of inputs.
//!
//! A memo only ever holds the value for the latest key. It never serves a value computed from
//! different inputs.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::sync::Arc;

/// Compares two `Arc`s by address, like a reference-equality check on props.
///
/// Holding the `Arc` keeps the allocation alive, so an equal address always means the same
/// value.
pub struct ByPtr<T: ?Sized>(pub Arc<T>);

impl<T: ?Sized> Clone for ByPtr<T> {
    fn clone(&self) -> Self {
        ByPtr(self.0.clone())
    }
}

impl<T: ?Sized> PartialEq for ByPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> From<&Arc<T>> for ByPtr<T> {
    fn from(value: &Arc<T>) -> Self {
        ByPtr(value.clone())
    }
}

/// A single-slot memo.
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    computes: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            computes: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.slot.as_ref().is_some_and(|(k, _)| *k == key) {
            log::trace!("memo hit");
        } else {
            log::trace!("memo miss");
            self.slot = None;
            self.computes += 1;
        }
        let (_, v) = self.slot.get_or_insert_with(|| (key, compute()));
        v
    }

    /// How many times the value has been (re)computed.
    pub fn computes(&self) -> u64 {
        self.computes
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

/// One memo slot per `S`, for list items rendered side by side.
pub struct KeyedMemo<S, K, V> {
    slots: HashMap<S, (K, V)>,
    computes: u64,
}

impl<S, K, V> Default for KeyedMemo<S, K, V> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            computes: 0,
        }
    }
}

impl<S: Hash + Eq, K: PartialEq, V> KeyedMemo<S, K, V> {
    pub fn get_or_compute(&mut self, slot: S, key: K, compute: impl FnOnce() -> V) -> &V {
        match self.slots.entry(slot) {
            Entry::Occupied(mut e) => {
                if e.get().0 != key {
                    self.computes += 1;
                    e.insert((key, compute()));
                }
                &e.into_mut().1
            }
            Entry::Vacant(e) => {
                self.computes += 1;
                &e.insert((key, compute())).1
            }
        }
    }

    /// Drops every slot for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(&S) -> bool) {
        self.slots.retain(|s, _| keep(s));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn computes(&self) -> u64 {
        self.computes
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
