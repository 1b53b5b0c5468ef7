//! In-memory category set with synchronous change notification.
//!
//! `CategoryStore` is a cheap handle; clones share the same state. Views receive it
//! through context, subscribe on mount, and drop their [`Subscription`] on unmount.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rust_decimal::Decimal;

use crate::models::{Category, CategoryInput, CategoryPatch, ChartSlice, DEFAULT_PERIOD};

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Inner {
    categories: RefCell<Vec<Category>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
    notifying: Cell<bool>,
    queued_rounds: Cell<usize>,
}

impl Inner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(l, _)| *l == id)
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(l, _)| *l != id);
    }
}

#[derive(Clone, Default)]
pub struct CategoryStore {
    inner: Rc<Inner>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        let store = Self::new();
        *store.inner.categories.borrow_mut() = categories;
        store
    }

    /// Snapshot in insertion order. Later mutations are not reflected in it.
    pub fn list(&self) -> Vec<Category> {
        self.inner.categories.borrow().clone()
    }

    pub fn get(&self, id: i64) -> Option<Category> {
        self.inner
            .categories
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.categories.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a new category with the next free id, zero spend, and the default
    /// period unless one is given.
    pub fn add(&self, input: CategoryInput) -> Category {
        let category = {
            let mut categories = self.inner.categories.borrow_mut();
            let id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let category = Category {
                id,
                name: input.name,
                budget_limit: input.budget_limit,
                spent: Decimal::ZERO,
                color: input.color,
                period: input.period.unwrap_or_else(|| DEFAULT_PERIOD.to_string()),
            };
            categories.push(category.clone());
            category
        };
        tracing::debug!(id = category.id, name = %category.name, "category added");
        self.notify();
        category
    }

    /// Returns whether a record was removed. Absent ids are a silent no-op.
    pub fn remove(&self, id: i64) -> bool {
        let removed = {
            let mut categories = self.inner.categories.borrow_mut();
            let before = categories.len();
            categories.retain(|c| c.id != id);
            categories.len() != before
        };
        if removed {
            tracing::debug!(id, "category removed");
            self.notify();
        }
        removed
    }

    /// Merges `patch` into the record with `id`. Returns false if there is none.
    pub fn update(&self, id: i64, patch: CategoryPatch) -> bool {
        let updated = {
            let mut categories = self.inner.categories.borrow_mut();
            match categories.iter_mut().find(|c| c.id == id) {
                Some(category) => {
                    patch.apply_to(category);
                    true
                }
                None => false,
            }
        };
        if updated {
            tracing::debug!(id, "category updated");
            self.notify();
        }
        updated
    }

    /// Inserts a server-issued record, or replaces the one with the same id in place.
    pub fn upsert(&self, category: Category) {
        {
            let mut categories = self.inner.categories.borrow_mut();
            match categories.iter_mut().find(|c| c.id == category.id) {
                Some(existing) => *existing = category,
                None => categories.push(category),
            }
        }
        self.notify();
    }

    /// Replaces the whole set, e.g. with a fresh server listing.
    pub fn replace_all(&self, categories: Vec<Category>) {
        let count = categories.len();
        *self.inner.categories.borrow_mut() = categories;
        tracing::debug!(count, "category store replaced");
        self.notify();
    }

    /// Chart-ready view of current state, recomputed on every call.
    pub fn projection(&self) -> Vec<ChartSlice> {
        self.inner
            .categories
            .borrow()
            .iter()
            .map(|c| ChartSlice {
                name: c.name.clone(),
                value: c.spent,
                color: c.color.clone(),
            })
            .collect()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    // Listeners run in subscription order, once per mutation. A mutation made from
    // inside a listener queues another full round instead of recursing.
    fn notify(&self) {
        let inner = &self.inner;
        if inner.notifying.get() {
            inner.queued_rounds.set(inner.queued_rounds.get() + 1);
            return;
        }

        inner.notifying.set(true);
        let mut rounds = 1;
        while rounds > 0 {
            rounds -= 1;
            let listeners: Vec<(u64, Listener)> = inner.listeners.borrow().clone();
            tracing::debug!(listeners = listeners.len(), "notifying category listeners");
            for (id, listener) in listeners {
                if inner.is_subscribed(id) {
                    listener();
                }
            }
            rounds += inner.queued_rounds.replace(0);
        }
        inner.notifying.set(false);
    }
}

impl PartialEq for CategoryStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Keeps a listener registered. Dropping it, or calling [`Subscription::unsubscribe`],
/// deregisters the listener for good.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    store: Weak<Inner>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.unsubscribe(self.id);
        }
    }
}
