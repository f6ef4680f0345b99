//! This module stores the arriving car producer task.

use crate::err::Result;
use crate::event::Event;
use crate::inner::Inner;

/// The progress of a car through the station entrance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CarState {
	/// The car has pulled in
	Arrived,
	/// The car is waiting for a slot in the waiting area
	Waiting,
	/// The car is in the queue for a pump
	Enqueued,
}

/// A car arriving at the station
#[derive(Debug)]
pub(crate) struct Car {
	/// The name this car is reported under
	name: String,
	/// Where this car is in its arrival
	state: CarState,
}

impl Car {
	/// Creates a newly arrived car
	pub(crate) fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			state: CarState::Arrived,
		}
	}

	/// The name of this car
	pub(crate) fn name(&self) -> &str {
		&self.name
	}

	/// The current state of this car
	#[cfg(test)]
	pub(crate) fn state(&self) -> CarState {
		self.state
	}

	/// Move this car into its next state
	fn transition(&mut self, state: CarState) {
		tracing::trace!(car = %self.name, from = ?self.state, to = ?state, "Car state change");
		self.state = state;
	}

	/// Enter the station, moving this car into the queue
	///
	/// The car is handed over to the queue once a slot in
	/// the waiting area is free, and this returns without
	/// waiting for the car to be serviced.
	pub(crate) fn run(mut self, inner: &Inner) -> Result<()> {
		// Announce the arrival
		inner.emit(Event::Arrived {
			car: self.name.clone(),
		});
		// Report when every bay looks busy, this read may be stale
		if inner.pumps.available_permits() == 0 {
			inner.emit(Event::Waiting {
				car: self.name.clone(),
			});
		}
		// Wait for a free slot in the waiting area
		self.transition(CarState::Waiting);
		inner.empty.acquire()?;
		// Hand the car over to the queue
		{
			let mut queue = inner.queue.lock()?;
			let name = self.name.clone();
			self.transition(CarState::Enqueued);
			queue.push(self);
			inner.emit(Event::Enqueued {
				car: name,
			});
		}
		// Signal that one more car is ready
		inner.full.release();
		Ok(())
	}
}

#[cfg(test)]
mod tests {

	use super::*;
	use crate::event::EventLog;
	use crate::options::StationOptions;
	use std::sync::Arc;

	fn inner(waiting_area: usize, pumps: usize, log: Arc<EventLog>) -> Inner {
		Inner::new(StationOptions::new(waiting_area, pumps), 1, log)
	}

	#[test]
	fn car_enqueues_and_signals() {
		let log = Arc::new(EventLog::new());
		let inner = inner(2, 1, log.clone());
		Car::new("A").run(&inner).unwrap();
		assert_eq!(inner.empty.available_permits(), 1);
		assert_eq!(inner.full.available_permits(), 1);
		let car = inner.queue.lock().unwrap().pop().unwrap();
		assert_eq!(car.name(), "A");
		assert_eq!(car.state(), CarState::Enqueued);
		let events = log.drain();
		assert_eq!(
			events,
			vec![
				Event::Arrived {
					car: "A".to_string()
				},
				Event::Enqueued {
					car: "A".to_string()
				},
			]
		);
	}

	#[test]
	fn car_reports_waiting_when_bays_are_busy() {
		let log = Arc::new(EventLog::new());
		let inner = inner(1, 1, log.clone());
		assert!(inner.pumps.try_acquire());
		Car::new("B").run(&inner).unwrap();
		let events = log.drain();
		assert_eq!(
			events[1],
			Event::Waiting {
				car: "B".to_string()
			}
		);
		assert_eq!(events.len(), 3);
	}

	#[test]
	fn car_gives_up_when_station_stops() {
		let log = Arc::new(EventLog::new());
		let inner = inner(1, 1, log.clone());
		// Fill the only slot in the waiting area
		assert!(inner.empty.try_acquire());
		inner.stop();
		assert!(Car::new("C").run(&inner).is_err());
		assert_eq!(inner.full.available_permits(), 0);
		assert!(inner.queue.into_inner().is_empty());
	}
}
