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

//! This module stores the station coordinator.

use crate::car::Car;
use crate::err::{Error, Result};
use crate::event::{Observer, TracingObserver};
use crate::inner::Inner;
use crate::options::StationOptions;
use crate::pump::Pump;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A running gas station simulation
///
/// Opening a station starts one thread per pump, and an
/// arrivals thread which starts one thread per car. The
/// simulation completes once every car has been serviced,
/// at which point every remaining thread is stopped.
pub struct Station {
	/// The state shared with the station threads
	inner: Arc<Inner>,
	/// Handles to the pump and car threads
	workers: Arc<Mutex<Vec<JoinHandle<()>>>>,
	/// Handle to the arrivals thread
	arrivals: RwLock<Option<JoinHandle<()>>>,
}

impl Station {
	/// Open a station and start the arrival of the given cars,
	/// reporting every event through `tracing`
	pub fn open<I, S>(options: StationOptions, cars: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::open_with_observer(options, cars, Arc::new(TracingObserver))
	}

	/// Open a station and start the arrival of the given cars,
	/// delivering every event to the given observer
	pub fn open_with_observer<I, S>(
		options: StationOptions,
		cars: I,
		observer: Arc<dyn Observer>,
	) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		// Check the station can make progress
		options.validate()?;
		// Collect the cars in arrival order
		let cars: Vec<Car> = cars.into_iter().map(Car::new).collect();
		if cars.is_empty() {
			return Err(Error::NoCars);
		}
		// Create the shared station state
		let inner = Arc::new(Inner::new(options, cars.len(), observer));
		// Create the station before spawning so it is cleaned up on failure
		let station = Self {
			inner,
			workers: Arc::new(Mutex::new(Vec::new())),
			arrivals: RwLock::new(None),
		};
		// Start the pumps
		station.spawn_pumps()?;
		// Start the arrivals
		station.spawn_arrivals(cars)?;
		// All ok
		Ok(station)
	}

	/// Spawns one thread for each pump
	fn spawn_pumps(&self) -> Result<()> {
		for id in 1..=self.inner.options.pump_count {
			// Clone the shared state for the worker thread
			let inner = self.inner.clone();
			// Spawn the pump worker thread
			let handle = thread::Builder::new()
				.name(format!("pump-{id}"))
				.spawn(move || {
					let mut pump = Pump::new(id);
					match pump.run(&inner) {
						Err(Error::Closed) | Ok(()) => {
							tracing::debug!("Pump {id} stopped");
						}
						Err(e) => {
							tracing::error!("Pump {id} failed: {e}");
						}
					}
				})
				.map_err(Error::Spawn)?;
			// Store and track the thread handle
			self.workers.lock().push(handle);
		}
		Ok(())
	}

	/// Spawns the thread which starts each car in turn
	fn spawn_arrivals(&self, cars: Vec<Car>) -> Result<()> {
		// Clone necessary fields for the arrivals thread
		let inner = self.inner.clone();
		let workers = self.workers.clone();
		// Spawn the arrivals thread
		let handle = thread::Builder::new()
			.name("station-arrivals".to_string())
			.spawn(move || {
				for (index, car) in cars.into_iter().enumerate() {
					// Pace the arrivals, stopping early if requested
					if index > 0 && inner.stopped.wait_timeout(inner.options.arrival_interval) {
						break;
					}
					// Start the car on its own thread
					let name = car.name().to_string();
					let label = name.clone();
					let shared = inner.clone();
					// Car names are free text, so threads are numbered
					let spawned = thread::Builder::new()
						.name(format!("car-{}", index + 1))
						.spawn(move || match car.run(&shared) {
							Ok(()) => {}
							Err(Error::Closed) => {
								tracing::debug!("Car {label} left the closed station");
							}
							Err(e) => {
								tracing::error!("Car {label} failed to enter the station: {e}");
							}
						});
					match spawned {
						Ok(handle) => workers.lock().push(handle),
						Err(e) => {
							// The simulation can no longer complete
							tracing::error!("Failed to spawn car {name}: {e}");
							inner.stop();
							break;
						}
					}
				}
			})
			.map_err(Error::Spawn)?;
		// Store the thread handle
		*self.arrivals.write() = Some(handle);
		Ok(())
	}

	/// Block until the simulation stops, returning
	/// whether every car was serviced
	pub fn wait(&self) -> bool {
		self.inner.stopped.wait();
		self.inner.complete.is_set()
	}

	/// Block until the simulation stops or the timeout
	/// elapses, returning whether every car was serviced
	pub fn wait_timeout(&self, timeout: Duration) -> bool {
		self.inner.stopped.wait_timeout(timeout) && self.inner.complete.is_set()
	}

	/// Whether every car has been serviced
	pub fn is_complete(&self) -> bool {
		self.inner.complete.is_set()
	}

	/// The number of cars serviced so far
	pub fn serviced(&self) -> usize {
		self.inner.serviced.load(Ordering::Acquire)
	}

	/// The number of cars arriving at this station
	pub fn total_cars(&self) -> usize {
		self.inner.total
	}

	/// The options this station was opened with
	pub fn options(&self) -> &StationOptions {
		&self.inner.options
	}

	/// Stop the simulation without waiting for it to complete
	///
	/// Cars which have not been serviced yet are abandoned,
	/// including any car currently being serviced.
	pub fn shutdown(&self) {
		self.inner.stop();
	}
}

impl Drop for Station {
	/// Stops and joins every station thread
	fn drop(&mut self) {
		// Signal shutdown to the station threads
		self.inner.stop();
		// Stop the arrivals first so no more cars are started
		if let Some(handle) = self.arrivals.write().take() {
			let _ = handle.join();
		}
		// Stop the pump and car threads
		let handles = std::mem::take(&mut *self.workers.lock());
		for handle in handles {
			let _ = handle.join();
		}
	}
}

#[cfg(test)]
mod tests {

	use super::*;
	use crate::event::{Event, EventLog};

	fn quick(waiting_area: usize, pumps: usize) -> StationOptions {
		StationOptions::new(waiting_area, pumps)
			.with_arrival_interval(Duration::ZERO)
			.with_service_duration(Duration::from_millis(5))
	}

	#[test]
	fn open_rejects_invalid_configuration() {
		let res = Station::open(quick(1, 0), ["A"]);
		assert!(matches!(res, Err(Error::InvalidPumpCount)));
		let res = Station::open(quick(0, 1), ["A"]);
		assert!(matches!(res, Err(Error::InvalidWaitingArea)));
		let res = Station::open(quick(1, 1), Vec::<String>::new());
		assert!(matches!(res, Err(Error::NoCars)));
	}

	#[test]
	fn station_services_every_car() {
		let log = Arc::new(EventLog::new());
		let cars = ["A", "B", "C"];
		let station = Station::open_with_observer(quick(2, 2), cars, log.clone()).unwrap();
		assert_eq!(station.options().pump_count, 2);
		assert_eq!(station.options().waiting_area, 2);
		assert!(station.wait_timeout(Duration::from_secs(10)));
		assert!(station.is_complete());
		assert_eq!(station.serviced(), 3);
		assert_eq!(station.total_cars(), 3);
		drop(station);
		let events = log.drain();
		assert_eq!(events.last(), Some(&Event::AllServiced));
		assert_eq!(events.iter().filter(|e| **e == Event::AllServiced).count(), 1);
	}

	#[test]
	fn any_car_name_is_serviced() {
		let log = Arc::new(EventLog::new());
		let cars = ["A", "B\0C", "", "a very long car name with spaces and ünïcödé"];
		let station = Station::open_with_observer(quick(2, 1), cars, log.clone()).unwrap();
		assert!(station.wait_timeout(Duration::from_secs(10)));
		assert_eq!(station.serviced(), 4);
		drop(station);
		let events = log.drain();
		assert!(events.iter().any(|e| e.car() == Some("B\0C")));
	}

	#[test]
	fn unbounded_intervals_stop_cleanly() {
		let log = Arc::new(EventLog::new());
		let opts = quick(1, 1)
			.with_arrival_interval(Duration::MAX)
			.with_service_duration(Duration::MAX);
		let station = Station::open_with_observer(opts, ["A", "B"], log.clone()).unwrap();
		// Wait until the first car is being serviced
		while !log.drain().iter().any(|e| matches!(e, Event::BeginService { .. })) {
			thread::sleep(Duration::from_millis(1));
		}
		// The pump and arrivals threads are still alive
		assert!(!station.wait_timeout(Duration::from_millis(50)));
		station.shutdown();
		assert!(!station.wait());
		// Every thread exits without panicking
		let arrivals = station.arrivals.write().take();
		assert!(arrivals.map(|h| h.join().is_ok()).unwrap_or(true));
		let workers = std::mem::take(&mut *station.workers.lock());
		for handle in workers {
			assert!(handle.join().is_ok());
		}
		assert_eq!(station.serviced(), 0);
	}

	#[test]
	fn shutdown_abandons_the_simulation() {
		let log = Arc::new(EventLog::new());
		let opts = quick(1, 1).with_service_duration(Duration::from_secs(60));
		let station = Station::open_with_observer(opts, ["A", "B"], log.clone()).unwrap();
		// Wait until the first car is being serviced
		while !log.drain().iter().any(|e| matches!(e, Event::BeginService { .. })) {
			thread::sleep(Duration::from_millis(1));
		}
		station.shutdown();
		assert!(!station.wait());
		assert!(!station.is_complete());
		assert_eq!(station.serviced(), 0);
		// Dropping joins every thread without waiting on the service
		drop(station);
		assert!(!log.drain().contains(&Event::AllServiced));
	}
}
