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

//! This module stores the state shared by every station thread.

use crate::car::Car;
use crate::event::{Event, Observer};
use crate::exclusive::Exclusive;
use crate::options::StationOptions;
use crate::queue::BoundedQueue;
use crate::semaphore::Semaphore;
use crate::signal::Latch;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// The shared state of a running station
pub(crate) struct Inner {
	/// The waiting area, guarded by the mutex semaphore
	pub(crate) queue: Exclusive<BoundedQueue<Car>>,
	/// Free slots in the waiting area
	pub(crate) empty: Semaphore,
	/// Cars queued and ready to be serviced
	pub(crate) full: Semaphore,
	/// Free service bays
	pub(crate) pumps: Semaphore,
	/// The number of cars serviced so far
	pub(crate) serviced: AtomicUsize,
	/// The number of cars arriving at the station
	pub(crate) total: usize,
	/// The options this station was opened with
	pub(crate) options: StationOptions,
	/// Where simulation events are delivered
	pub(crate) observer: Arc<dyn Observer>,
	/// Set once every car has been serviced
	pub(crate) complete: Latch,
	/// Set once the station threads should stop
	pub(crate) stopped: Latch,
}

impl Inner {
	/// Creates the shared state with the four station semaphores
	pub(crate) fn new(options: StationOptions, total: usize, observer: Arc<dyn Observer>) -> Self {
		Self {
			queue: Exclusive::new(BoundedQueue::with_capacity(options.waiting_area)),
			empty: Semaphore::new(options.waiting_area),
			full: Semaphore::new(0),
			pumps: Semaphore::new(options.pump_count),
			serviced: AtomicUsize::new(0),
			total,
			options,
			observer,
			complete: Latch::new(),
			stopped: Latch::new(),
		}
	}

	/// Deliver an event to the observer
	pub(crate) fn emit(&self, event: Event) {
		tracing::trace!(%event, "station event");
		self.observer.notify(&event);
	}

	/// Count one more serviced car, completing the
	/// simulation when it was the last one
	pub(crate) fn record_serviced(&self) {
		// Increment and compare in a single step
		let serviced = self.serviced.fetch_add(1, Ordering::AcqRel) + 1;
		// Every car is only ever serviced once
		debug_assert!(serviced <= self.total);
		// Check if this was the final car
		if serviced == self.total {
			self.emit(Event::AllServiced);
			self.complete.trigger();
			self.stop();
		}
	}

	/// Stop every station thread without draining
	pub(crate) fn stop(&self) {
		// Only the first caller closes the semaphores
		if self.stopped.trigger() {
			tracing::debug!("Stopping station threads");
			self.full.close();
			self.pumps.close();
			self.queue.close();
			self.empty.close();
		}
	}
}
