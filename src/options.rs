use crate::err::{Error, Result};
use std::time::Duration;

/// Default number of slots in the waiting area.
pub const DEFAULT_WAITING_AREA: usize = 5;

/// Default number of pumps, and therefore service bays.
pub const DEFAULT_PUMP_COUNT: usize = 3;

/// Default pause between two consecutive car arrivals.
pub const DEFAULT_ARRIVAL_INTERVAL: Duration = Duration::from_millis(300);

/// Default time a pump spends servicing a single car.
pub const DEFAULT_SERVICE_DURATION: Duration = Duration::from_secs(2);

/// Largest value accepted when prompting interactively.
pub const MAX_PROMPT_VALUE: usize = 10;

/// Configuration options for [`Station`](crate::Station).
#[derive(Debug, Clone)]
pub struct StationOptions {
	/// Number of cars which may wait for a pump at once.
	pub waiting_area: usize,
	/// Number of pumps servicing cars concurrently.
	pub pump_count: usize,
	/// Pause between starting consecutive cars.
	pub arrival_interval: Duration,
	/// Time a pump spends servicing each car.
	pub service_duration: Duration,
}

impl Default for StationOptions {
	fn default() -> Self {
		Self {
			waiting_area: DEFAULT_WAITING_AREA,
			pump_count: DEFAULT_PUMP_COUNT,
			arrival_interval: DEFAULT_ARRIVAL_INTERVAL,
			service_duration: DEFAULT_SERVICE_DURATION,
		}
	}
}

impl StationOptions {
	/// Create new station options with the given capacities
	pub fn new(waiting_area: usize, pump_count: usize) -> Self {
		Self {
			waiting_area,
			pump_count,
			..Self::default()
		}
	}

	/// Set the waiting area capacity
	pub fn with_waiting_area(mut self, waiting_area: usize) -> Self {
		self.waiting_area = waiting_area;
		self
	}

	/// Set the number of pumps
	pub fn with_pump_count(mut self, pump_count: usize) -> Self {
		self.pump_count = pump_count;
		self
	}

	/// Set the pause between car arrivals
	pub fn with_arrival_interval(mut self, interval: Duration) -> Self {
		self.arrival_interval = interval;
		self
	}

	/// Set the time spent servicing each car
	pub fn with_service_duration(mut self, duration: Duration) -> Self {
		self.service_duration = duration;
		self
	}

	/// Check that the station can make progress with these options
	pub fn validate(&self) -> Result<()> {
		if self.waiting_area == 0 {
			return Err(Error::InvalidWaitingArea);
		}
		// A station without pumps would block every car forever
		if self.pump_count == 0 {
			return Err(Error::InvalidPumpCount);
		}
		Ok(())
	}
}
