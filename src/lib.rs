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

//! A gas station simulation coordinated with counting semaphores.
//!
//! Cars arrive at a station with a bounded waiting area and a fixed
//! number of pumps. Each car and each pump runs on its own thread,
//! and they are coordinated through four semaphores:
//!
//! - `empty` counts the free slots in the waiting area,
//! - `full` counts the cars queued for a pump,
//! - `mutex` guards the queue itself,
//! - `pumps` counts the free service bays.
//!
//! ```no_run
//! use servicestation::{Station, StationOptions};
//!
//! let station = Station::open(StationOptions::new(2, 1), ["A", "B", "C"])?;
//! assert!(station.wait());
//! # Ok::<(), servicestation::Error>(())
//! ```

mod car;
mod err;
mod event;
mod exclusive;
mod inner;
mod options;
mod pump;
mod queue;
mod semaphore;
mod signal;
mod station;

pub use crate::err::{Error, Result};
pub use crate::event::{Event, EventLog, Observer, TracingObserver};
pub use crate::exclusive::{Exclusive, ExclusiveGuard};
pub use crate::options::*;
pub use crate::queue::BoundedQueue;
pub use crate::semaphore::{Permit, Semaphore};
pub use crate::station::Station;
