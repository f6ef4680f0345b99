use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// A one-shot signal which threads can block on
///
/// Once triggered a latch stays triggered, so waiters
/// arriving late return immediately.
#[derive(Default)]
pub(crate) struct Latch {
	/// Whether the latch has been triggered
	set: Mutex<bool>,
	/// Condition variable for waiting threads
	condvar: Condvar,
}

impl Latch {
	/// Creates a new untriggered latch
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Trigger the latch, returning false if it was already set
	pub(crate) fn trigger(&self) -> bool {
		let mut set = self.set.lock();
		if *set {
			return false;
		}
		*set = true;
		self.condvar.notify_all();
		true
	}

	/// Whether the latch has been triggered
	pub(crate) fn is_set(&self) -> bool {
		*self.set.lock()
	}

	/// Block until the latch is triggered
	pub(crate) fn wait(&self) {
		let mut set = self.set.lock();
		while !*set {
			self.condvar.wait(&mut set);
		}
	}

	/// Block until the latch is triggered or the timeout
	/// elapses, returning whether the latch was triggered
	pub(crate) fn wait_timeout(&self, timeout: Duration) -> bool {
		// A deadline too far away to represent never expires
		let Some(deadline) = Instant::now().checked_add(timeout) else {
			self.wait();
			return true;
		};
		let mut set = self.set.lock();
		while !*set {
			if self.condvar.wait_until(&mut set, deadline).timed_out() {
				break;
			}
		}
		*set
	}
}
