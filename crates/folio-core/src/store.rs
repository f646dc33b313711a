//! Single-threaded publish/subscribe cell with exactly one writer.
//!
//! Used for header visibility: the active scroll choreographer holds the
//! writer, the header and nav only subscribe.

use crate::error::StoreError;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(&T)>;

struct Inner<T> {
    value: T,
    subscribers: Vec<(u64, Callback<T>)>,
    // ids dropped while their callback was checked out for a notification
    removed: Vec<u64>,
    notifying: bool,
    next_id: u64,
    writer_live: bool,
}

pub struct Store<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value: initial,
                subscribers: Vec::new(),
                removed: Vec::new(),
                notifying: false,
                next_id: 0,
                writer_live: false,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Register `callback` for future changes. Dropping the returned
    /// `Subscription` unsubscribes.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription<T> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    pub fn writer(&self) -> Result<StoreWriter<T>, StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.writer_live {
            return Err(StoreError::WriterTaken);
        }
        inner.writer_live = true;
        Ok(StoreWriter {
            inner: self.inner.clone(),
            release: None,
        })
    }

    pub fn has_writer(&self) -> bool {
        self.inner.borrow().writer_live
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

fn publish<T: Clone + PartialEq>(cell: &Rc<RefCell<Inner<T>>>, value: T) {
    let mut taken = {
        let mut inner = cell.borrow_mut();
        if inner.value == value {
            return;
        }
        inner.value = value;
        if inner.notifying {
            // the running notification delivers the newest value when it loops
            return;
        }
        inner.notifying = true;
        std::mem::take(&mut inner.subscribers)
    };
    loop {
        let current = cell.borrow().value.clone();
        for (id, cb) in taken.iter_mut() {
            if cell.borrow().removed.contains(id) {
                continue;
            }
            cb(&current);
        }
        let mut inner = cell.borrow_mut();
        // keep subscribers added during the notification
        taken.append(&mut inner.subscribers);
        if inner.value == current {
            let removed = std::mem::take(&mut inner.removed);
            taken.retain(|(id, _)| !removed.contains(id));
            inner.subscribers = taken;
            inner.notifying = false;
            return;
        }
    }
}

/// The one handle allowed to change a `Store`.
pub struct StoreWriter<T: Clone + PartialEq> {
    inner: Rc<RefCell<Inner<T>>>,
    release: Option<T>,
}

impl<T: Clone + PartialEq> StoreWriter<T> {
    /// Publish `value`; subscribers run only when it differs.
    pub fn set(&self, value: T) {
        publish(&self.inner, value);
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Publish `value` when this writer is dropped.
    pub fn release_to(mut self, value: T) -> Self {
        self.release = Some(value);
        self
    }
}

impl<T: Clone + PartialEq> Drop for StoreWriter<T> {
    fn drop(&mut self) {
        if let Some(v) = self.release.take() {
            publish(&self.inner, v);
        }
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.writer_live = false;
        }
    }
}

pub struct Subscription<T> {
    id: u64,
    store: Weak<RefCell<Inner<T>>>,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        let Some(cell) = self.store.upgrade() else {
            return;
        };
        let Ok(mut inner) = cell.try_borrow_mut() else {
            return;
        };
        let before = inner.subscribers.len();
        let id = self.id;
        inner.subscribers.retain(|(sid, _)| *sid != id);
        if inner.subscribers.len() == before {
            // callback is checked out by an in-flight notification
            inner.removed.push(id);
        }
    }
}
