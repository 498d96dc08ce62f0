use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type SubId = usize;

/// Observable value. Clones share the same cell.
pub struct Signal<T>(Rc<Inner<T>>);

struct Inner<T> {
    value: RefCell<Rc<T>>,
    subs: RefCell<Vec<(SubId, Rc<dyn Fn(&T)>)>>,
    next_sub: Cell<SubId>,
    notifying: Cell<bool>,
    dirty: Cell<bool>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(Rc::new(value)),
            subs: RefCell::new(Vec::new()),
            next_sub: Cell::new(0),
            notifying: Cell::new(false),
            dirty: Cell::new(false),
        }))
    }
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        (*self.snapshot()).clone()
    }
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.snapshot())
    }
    pub fn set(&self, v: T) {
        *self.0.value.borrow_mut() = Rc::new(v);
        self.notify();
    }
    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        {
            let mut value = self.0.value.borrow_mut();
            f(Rc::make_mut(&mut *value));
        }
        self.notify();
    }
    /// Replaces the value with one computed from the current value.
    pub fn replace_with<F: FnOnce(&T) -> T>(&self, f: F) {
        let next = f(&*self.snapshot());
        *self.0.value.borrow_mut() = Rc::new(next);
        self.notify();
    }
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let id = self.0.next_sub.get();
        self.0.next_sub.set(id + 1);
        self.0.subs.borrow_mut().push((id, Rc::new(f)));
        id
    }
    pub fn unsubscribe(&self, id: SubId) {
        self.0.subs.borrow_mut().retain(|(sub, _)| *sub != id);
    }
    pub fn ptr_eq(&self, other: &Signal<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn snapshot(&self) -> Rc<T> {
        self.0.value.borrow().clone()
    }

    /// Subscribers may write the signal. Such a write is delivered in a
    /// follow-up round once every subscriber has seen the current value.
    fn notify(&self) {
        if self.0.notifying.get() {
            self.0.dirty.set(true);
            return;
        }
        self.0.notifying.set(true);
        let _round = NotifyRound(&self.0.notifying);
        loop {
            self.0.dirty.set(false);
            let value = self.snapshot();
            let subs: Vec<_> = self.0.subs.borrow().iter().map(|(_, f)| f.clone()).collect();
            for s in subs {
                s(&*value);
            }
            if !self.0.dirty.get() {
                break;
            }
        }
    }
}

/// Clears the notifying flag even if a subscriber panics.
struct NotifyRound<'a>(&'a Cell<bool>);

impl Drop for NotifyRound<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
