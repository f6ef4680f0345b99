// Copyright © SurrealDB Ltd
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This module stores the counting semaphore used by the station.

use crate::err::{Error, Result};
use parking_lot::{Condvar, Mutex};

struct State {
	permits: usize, // Number of available permits
	closed: bool,   // Whether waiters should give up
}

/// A blocking counting semaphore
pub struct Semaphore {
	state: Mutex<State>, // Permit count and closed flag
	condvar: Condvar,    // Condition variable for waiting threads
}

impl Semaphore {
	/// Create a new semaphore with `permits` available
	pub fn new(permits: usize) -> Self {
		Self {
			state: Mutex::new(State {
				permits,
				closed: false,
			}),
			condvar: Condvar::new(),
		}
	}

	/// Acquire a permit (blocking if none are available)
	///
	/// Returns [`Error::Closed`] if the semaphore is closed
	/// before or while waiting for a permit.
	pub fn acquire(&self) -> Result<()> {
		let mut state = self.state.lock();
		loop {
			// Give up once the semaphore is closed
			if state.closed {
				return Err(Error::Closed);
			}
			// Consume a permit if one is available
			if state.permits > 0 {
				state.permits -= 1;
				return Ok(());
			}
			// Spurious wakeups fall through to a re-check
			self.condvar.wait(&mut state);
		}
	}

	/// Acquire a permit only if one is immediately available
	pub fn try_acquire(&self) -> bool {
		let mut state = self.state.lock();
		if state.closed || state.permits == 0 {
			return false;
		}
		state.permits -= 1;
		true
	}

	/// Acquire a permit which is released when the guard is dropped
	pub fn access(&self) -> Result<Permit<'_>> {
		self.acquire()?;
		Ok(Permit {
			semaphore: self,
		})
	}

	/// Release a permit, allowing another waiting thread to proceed
	pub fn release(&self) {
		let mut state = self.state.lock();
		state.permits += 1;
		self.condvar.notify_one(); // Wake up one waiting thread
	}

	/// The number of permits currently available
	///
	/// The value may be stale by the time it is read, so it
	/// must only be used for reporting.
	pub fn available_permits(&self) -> usize {
		self.state.lock().permits
	}

	/// Close the semaphore, waking every waiting thread
	pub fn close(&self) {
		let mut state = self.state.lock();
		state.closed = true;
		self.condvar.notify_all();
	}

	/// Whether this semaphore has been closed
	pub fn is_closed(&self) -> bool {
		self.state.lock().closed
	}
}

/// A held semaphore permit, released on drop
#[must_use = "the permit is released as soon as it is dropped"]
pub struct Permit<'a> {
	semaphore: &'a Semaphore,
}

impl Drop for Permit<'_> {
	fn drop(&mut self) {
		self.semaphore.release();
	}
}
