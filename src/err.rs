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

//! This module stores the station error types.

use std::io::Error as IoError;
use thiserror::Error;

/// A specialised result type for station operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors which can be emitted from a station.
#[derive(Error, Debug)]
pub enum Error {
	/// The waiting area has no slots.
	#[error("Waiting area capacity must be at least 1")]
	InvalidWaitingArea,

	/// The station has no service bays.
	#[error("Number of pumps must be at least 1")]
	InvalidPumpCount,

	/// No cars were given to the station.
	#[error("At least one car must arrive at the station")]
	NoCars,

	/// A semaphore was closed while waiting on it.
	#[error("Semaphore is closed")]
	Closed,

	/// A pump was signalled but found the queue empty.
	#[error("Pump {0} was signalled but the queue was empty")]
	EmptyQueue(usize),

	/// A worker thread could not be spawned.
	#[error("Failed to spawn thread: {0}")]
	Spawn(IoError),

	/// An IO error occurred.
	#[error("IO error: {0}")]
	Io(#[from] IoError),
}
