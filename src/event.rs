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

//! This module stores the simulation events and their observers.

use crossbeam_queue::SegQueue;
use std::fmt;

/// An observable step of the simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	/// A car arrived at the station
	Arrived {
		car: String,
	},
	/// A car arrived while every bay was busy
	Waiting {
		car: String,
	},
	/// A car took a slot in the waiting area
	Enqueued {
		car: String,
	},
	/// A pump took a car from the waiting area
	Occupied {
		pump: usize,
		car: String,
	},
	/// A car logged in at a pump
	Login {
		pump: usize,
		car: String,
	},
	/// A pump started servicing a car
	BeginService {
		pump: usize,
		car: String,
		bay: usize,
	},
	/// A pump finished servicing a car
	FinishService {
		pump: usize,
		car: String,
	},
	/// A bay became available again
	BayFree {
		pump: usize,
		bay: usize,
	},
	/// Every car has been serviced
	AllServiced,
}

impl Event {
	/// The car this event refers to, if any
	pub fn car(&self) -> Option<&str> {
		match self {
			Self::Arrived {
				car,
			}
			| Self::Waiting {
				car,
			}
			| Self::Enqueued {
				car,
			}
			| Self::Occupied {
				car,
				..
			}
			| Self::Login {
				car,
				..
			}
			| Self::BeginService {
				car,
				..
			}
			| Self::FinishService {
				car,
				..
			} => Some(car),
			Self::BayFree {
				..
			}
			| Self::AllServiced => None,
		}
	}

	/// The pump this event refers to, if any
	pub fn pump(&self) -> Option<usize> {
		match self {
			Self::Occupied {
				pump,
				..
			}
			| Self::Login {
				pump,
				..
			}
			| Self::BeginService {
				pump,
				..
			}
			| Self::FinishService {
				pump,
				..
			}
			| Self::BayFree {
				pump,
				..
			} => Some(*pump),
			_ => None,
		}
	}
}

impl fmt::Display for Event {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Arrived {
				car,
			} => write!(f, "{car} arrived"),
			Self::Waiting {
				car,
			} => write!(f, "{car} arrived and waiting"),
			Self::Enqueued {
				car,
			} => write!(f, "{car} entered the waiting area"),
			Self::Occupied {
				pump,
				car,
			} => write!(f, "Pump {pump}: {car} Occupied"),
			Self::Login {
				pump,
				car,
			} => write!(f, "Pump {pump}: {car} login"),
			Self::BeginService {
				pump,
				car,
				bay,
			} => write!(f, "Pump {pump}: {car} begins service at Bay {bay}"),
			Self::FinishService {
				pump,
				car,
			} => write!(f, "Pump {pump}: {car} finishes service"),
			Self::BayFree {
				pump,
				bay,
			} => write!(f, "Pump {pump}: Bay {bay} is now free"),
			Self::AllServiced => write!(f, "All cars processed; simulation ends"),
		}
	}
}

/// A sink for simulation events
///
/// Observers are called from the car and pump threads,
/// sometimes while the queue mutex is held, so they
/// should return quickly and must never block on the
/// station itself.
pub trait Observer: Send + Sync {
	/// Receive a single event
	fn notify(&self, event: &Event);
}

/// An observer which reports events through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
	fn notify(&self, event: &Event) {
		tracing::info!("{event}");
	}
}

/// An observer which records every event in arrival order
#[derive(Debug, Default)]
pub struct EventLog {
	/// The recorded events
	events: SegQueue<Event>,
}

impl EventLog {
	/// Creates a new empty event log
	pub fn new() -> Self {
		Self::default()
	}

	/// The number of events recorded and not yet drained
	pub fn len(&self) -> usize {
		self.events.len()
	}

	/// Whether no events are waiting to be drained
	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}

	/// Take every recorded event, oldest first
	pub fn drain(&self) -> Vec<Event> {
		let mut out = Vec::with_capacity(self.events.len());
		while let Some(event) = self.events.pop() {
			out.push(event);
		}
		out
	}
}

impl Observer for EventLog {
	fn notify(&self, event: &Event) {
		self.events.push(event.clone());
	}
}
