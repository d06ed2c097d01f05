//! Signal - shared value cell with change subscriptions
//!
//! `Signal<T>` holds a value behind `Rc<RefCell<T>>`. Clones share the same
//! value and the same subscriber list. Every `set` or `update` calls the
//! subscribers in subscription order with the new value.
//!
//! Subscribers run after the value borrow is released, so they may read the
//! signal, set other signals and add subscriptions while being notified.
//! Subscriptions added during a notification take effect from the next one.
//!
//! ## Example
//!
//! ```
//! use multipage_pages::Signal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = Signal::new(0);
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = seen.clone();
//! count.subscribe(move |n| sink.set(*n));
//!
//! count.set(42);
//! assert_eq!(seen.get(), 42);
//! ```

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle returned by [`Signal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
	value: RefCell<T>,
	subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
}

/// A shared value that notifies subscribers when it changes.
pub struct Signal<T: 'static> {
	inner: Rc<Inner<T>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Creates a signal with no subscribers.
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(Inner {
				value: RefCell::new(value),
				subscribers: RefCell::new(Vec::new()),
			}),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.inner.value.borrow().clone()
	}

	/// Calls `f` with a reference to the current value.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.inner.value.borrow())
	}

	/// Replaces the value and notifies subscribers.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.inner.value.borrow_mut() = value;
		self.notify();
	}

	/// Mutates the value in place and notifies subscribers.
	pub fn update(&self, f: impl FnOnce(&mut T))
	where
		T: Clone,
	{
		f(&mut self.inner.value.borrow_mut());
		self.notify();
	}

	/// Registers `f` to run after every change.
	pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
		let id = SubscriptionId::next();
		self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));
		id
	}

	/// Removes a subscription. Returns `false` if it was not registered here.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut subscribers = self.inner.subscribers.borrow_mut();
		let before = subscribers.len();
		subscribers.retain(|(sub_id, _)| *sub_id != id);
		subscribers.len() != before
	}

	/// Returns the number of live subscriptions.
	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.borrow().len()
	}

	/// Returns whether both handles share the same value.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	fn notify(&self)
	where
		T: Clone,
	{
		let value = self.inner.value.borrow().clone();
		let subscribers: Vec<Subscriber<T>> = self
			.inner
			.subscribers
			.borrow()
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();
		for subscriber in subscribers {
			subscriber(&value);
		}
	}
}

impl<T: Default + 'static> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.inner.value.borrow())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_clones_share_value() {
		let a = Signal::new(String::from("x"));
		let b = a.clone();
		b.set("y".to_string());
		assert_eq!(a.get(), "y");
		assert!(a.ptr_eq(&b));
	}

	#[rstest]
	fn test_subscribers_run_in_order() {
		let signal = Signal::new(0);
		let log = Rc::new(RefCell::new(Vec::new()));

		let first = log.clone();
		signal.subscribe(move |n| first.borrow_mut().push(("first", *n)));
		let second = log.clone();
		signal.subscribe(move |n| second.borrow_mut().push(("second", *n)));

		signal.set(1);
		signal.update(|n| *n += 1);

		assert_eq!(
			*log.borrow(),
			vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
		);
	}

	#[rstest]
	fn test_unsubscribe() {
		let signal = Signal::new(0);
		let calls = Rc::new(Cell::new(0));

		let sink = calls.clone();
		let id = signal.subscribe(move |_| sink.set(sink.get() + 1));
		signal.set(1);

		assert!(signal.unsubscribe(id));
		assert!(!signal.unsubscribe(id));
		signal.set(2);

		assert_eq!(calls.get(), 1);
		assert_eq!(signal.subscriber_count(), 0);
	}

	#[rstest]
	fn test_subscriber_may_read_and_subscribe() {
		let signal = Signal::new(0);
		let observed = Rc::new(Cell::new(0));

		let inner_signal = signal.clone();
		let sink = observed.clone();
		signal.subscribe(move |_| {
			sink.set(inner_signal.get());
			inner_signal.subscribe(|_| {});
		});

		signal.set(7);
		assert_eq!(observed.get(), 7);
		assert_eq!(signal.subscriber_count(), 2);
	}

	#[rstest]
	fn test_chained_signals() {
		let source = Signal::new(2);
		let doubled = Signal::new(0);

		let target = doubled.clone();
		source.subscribe(move |n| target.set(n * 2));
		source.set(21);

		assert_eq!(doubled.get(), 42);
	}
}
