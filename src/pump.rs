//! This module stores the bay-servicing pump consumer task.

use crate::err::{Error, Result};
use crate::event::Event;
use crate::inner::Inner;

/// What a pump is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PumpState {
	/// Waiting for a car to be queued
	Idle,
	/// A car has been taken from the queue
	Occupied,
	/// The car in the bay is being serviced
	Servicing,
}

/// A pump servicing one car at a time in its own bay
#[derive(Debug)]
pub(crate) struct Pump {
	/// The pump number, which is also its bay number
	id: usize,
	/// What this pump is currently doing
	state: PumpState,
}

impl Pump {
	/// Creates an idle pump
	pub(crate) fn new(id: usize) -> Self {
		Self {
			id,
			state: PumpState::Idle,
		}
	}

	/// The current state of this pump
	#[cfg(test)]
	pub(crate) fn state(&self) -> PumpState {
		self.state
	}

	/// Move this pump into its next state
	fn transition(&mut self, state: PumpState) {
		tracing::trace!(pump = self.id, from = ?self.state, to = ?state, "Pump state change");
		self.state = state;
	}

	/// Service cars until the station stops
	///
	/// This only returns with an error, which is
	/// [`Error::Closed`] when the station stopped normally.
	pub(crate) fn run(&mut self, inner: &Inner) -> Result<()> {
		loop {
			self.service(inner)?;
		}
	}

	/// Service a single car from the queue
	pub(crate) fn service(&mut self, inner: &Inner) -> Result<()> {
		// Wait until a car is queued
		inner.full.acquire()?;
		// Claim a bay before touching the queue
		let bay = inner.pumps.access()?;
		// Take the car at the front of the queue
		let car = {
			let mut queue = inner.queue.lock()?;
			let car = queue.pop().ok_or(Error::EmptyQueue(self.id))?;
			self.transition(PumpState::Occupied);
			inner.emit(Event::Occupied {
				pump: self.id,
				car: car.name().to_string(),
			});
			inner.emit(Event::Login {
				pump: self.id,
				car: car.name().to_string(),
			});
			inner.emit(Event::BeginService {
				pump: self.id,
				car: car.name().to_string(),
				bay: self.id,
			});
			car
		};
		// Free the slot the car held in the waiting area
		inner.empty.release();
		// Service the car, unless the station stops first
		self.transition(PumpState::Servicing);
		if inner.stopped.wait_timeout(inner.options.service_duration) {
			tracing::debug!("Pump {} abandoned {} mid-service", self.id, car.name());
			return Err(Error::Closed);
		}
		inner.emit(Event::FinishService {
			pump: self.id,
			car: car.name().to_string(),
		});
		inner.emit(Event::BayFree {
			pump: self.id,
			bay: self.id,
		});
		// Free the bay before counting the car
		self.transition(PumpState::Idle);
		drop(bay);
		inner.record_serviced();
		Ok(())
	}
}

#[cfg(test)]
mod tests {

	use super::*;
	use crate::car::Car;
	use crate::event::EventLog;
	use crate::options::StationOptions;
	use std::sync::Arc;
	use std::thread;
	use std::time::Duration;

	fn inner(total: usize, log: Arc<EventLog>) -> Inner {
		let opts = StationOptions::new(2, 1).with_service_duration(Duration::ZERO);
		Inner::new(opts, total, log)
	}

	#[test]
	fn pump_services_a_queued_car() {
		let log = Arc::new(EventLog::new());
		let inner = inner(2, log.clone());
		Car::new("A").run(&inner).unwrap();
		log.drain();
		let mut pump = Pump::new(1);
		pump.service(&inner).unwrap();
		assert_eq!(pump.state(), PumpState::Idle);
		assert_eq!(inner.serviced.load(std::sync::atomic::Ordering::SeqCst), 1);
		// Every permit is handed back
		assert_eq!(inner.empty.available_permits(), 2);
		assert_eq!(inner.full.available_permits(), 0);
		assert_eq!(inner.pumps.available_permits(), 1);
		let lines: Vec<String> = log.drain().iter().map(ToString::to_string).collect();
		assert_eq!(
			lines,
			vec![
				"Pump 1: A Occupied",
				"Pump 1: A login",
				"Pump 1: A begins service at Bay 1",
				"Pump 1: A finishes service",
				"Pump 1: Bay 1 is now free",
			]
		);
		assert!(!inner.complete.is_set());
	}

	#[test]
	fn last_car_completes_the_simulation() {
		let log = Arc::new(EventLog::new());
		let inner = inner(1, log.clone());
		Car::new("A").run(&inner).unwrap();
		let mut pump = Pump::new(1);
		pump.service(&inner).unwrap();
		assert!(inner.complete.is_set());
		assert!(inner.stopped.is_set());
		assert_eq!(log.drain().last(), Some(&Event::AllServiced));
		// The loop ends once the semaphores are closed
		assert!(matches!(pump.run(&inner), Err(Error::Closed)));
	}

	#[test]
	fn unbounded_service_ends_when_station_stops() {
		let log = Arc::new(EventLog::new());
		let opts = StationOptions::new(1, 1).with_service_duration(Duration::MAX);
		let inner = Arc::new(Inner::new(opts, 1, log.clone()));
		Car::new("A").run(&inner).unwrap();
		// Stop the station while the car is being serviced
		let stopper = {
			let inner = inner.clone();
			thread::spawn(move || {
				thread::sleep(Duration::from_millis(50));
				inner.stop();
			})
		};
		let mut pump = Pump::new(1);
		assert!(matches!(pump.service(&inner), Err(Error::Closed)));
		assert_eq!(pump.state(), PumpState::Servicing);
		stopper.join().unwrap();
		assert!(!log.drain().iter().any(|e| matches!(e, Event::FinishService { .. })));
	}

	#[test]
	fn signalled_pump_rejects_an_empty_queue() {
		let log = Arc::new(EventLog::new());
		let inner = inner(1, log);
		inner.full.release();
		let mut pump = Pump::new(1);
		assert!(matches!(pump.service(&inner), Err(Error::EmptyQueue(1))));
		// The bay permit is not stranded
		assert_eq!(inner.pumps.available_permits(), 1);
	}
}
