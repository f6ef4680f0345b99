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

//! This module stores a value guarded by a binary semaphore.

use crate::err::Result;
use crate::semaphore::{Permit, Semaphore};
use parking_lot::{Mutex, MutexGuard};
use std::ops::{Deref, DerefMut};

/// A value which can only be accessed while holding
/// the single permit of its guarding semaphore
pub struct Exclusive<T> {
	/// The binary semaphore guarding the value
	mutex: Semaphore,
	/// The guarded value, only locked by the permit holder
	value: Mutex<T>,
}

impl<T> Exclusive<T> {
	/// Wrap a value behind a new binary semaphore
	pub fn new(value: T) -> Self {
		Self {
			mutex: Semaphore::new(1),
			value: Mutex::new(value),
		}
	}

	/// Acquire the mutex permit, blocking until it is free
	pub fn lock(&self) -> Result<ExclusiveGuard<'_, T>> {
		let permit = self.mutex.access()?;
		// Never contended, the permit holder is the only locker
		let value = self.value.lock();
		Ok(ExclusiveGuard {
			value,
			_permit: permit,
		})
	}

	/// Close the guarding semaphore, failing any waiting lockers
	pub fn close(&self) {
		self.mutex.close();
	}

	/// Consume the wrapper and return the guarded value
	pub fn into_inner(self) -> T {
		self.value.into_inner()
	}
}

/// Exclusive access to the value in an [`Exclusive`]
///
/// The value lock is declared first so it is unlocked
/// before the semaphore permit is handed back.
pub struct ExclusiveGuard<'a, T> {
	value: MutexGuard<'a, T>,
	_permit: Permit<'a>,
}

impl<T> Deref for ExclusiveGuard<'_, T> {
	type Target = T;
	fn deref(&self) -> &T {
		&self.value
	}
}

impl<T> DerefMut for ExclusiveGuard<'_, T> {
	fn deref_mut(&mut self) -> &mut T {
		&mut self.value
	}
}
