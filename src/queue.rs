use std::collections::VecDeque;

/// The FIFO of cars standing in the waiting area
///
/// This queue performs no synchronization of its own. The
/// station only reaches it through the mutex semaphore, and
/// the empty and full semaphores bound how many entries it
/// can hold at once.
#[derive(Debug)]
pub struct BoundedQueue<T> {
	/// The queued entries in insertion order
	entries: VecDeque<T>,
}

impl<T> BoundedQueue<T> {
	/// Creates a queue sized for the given waiting area
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: VecDeque::with_capacity(capacity),
		}
	}

	/// Add an entry at the back of the queue
	pub fn push(&mut self, entry: T) {
		self.entries.push_back(entry);
	}

	/// Remove the entry at the front of the queue
	pub fn pop(&mut self) -> Option<T> {
		self.entries.pop_front()
	}

	/// The number of queued entries
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the queue holds no entries
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
