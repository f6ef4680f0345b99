//! servicestation CLI
//!
//! Runs a single gas station simulation and prints its event log.

use clap::Parser;
use servicestation::{Error, Result, Station, StationOptions, MAX_PROMPT_VALUE};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "servicestation")]
#[command(about = "Simulate a gas station with a bounded waiting area", long_about = None)]
#[command(version)]
struct Cli {
	/// Waiting area capacity (prompted for when omitted)
	#[arg(short, long, env = "STATION_WAITING_AREA")]
	waiting_area: Option<usize>,

	/// Number of service bays (prompted for when omitted)
	#[arg(short, long, env = "STATION_PUMPS")]
	pumps: Option<usize>,

	/// Milliseconds between consecutive car arrivals
	#[arg(long, default_value = "300")]
	arrival_ms: u64,

	/// Milliseconds a pump spends servicing each car
	#[arg(long, default_value = "2000")]
	service_ms: u64,

	/// Log level (error, warn, info, debug, trace)
	#[arg(long, default_value = "info")]
	log_level: String,

	/// Cars arriving, in order (prompted for when omitted)
	cars: Vec<String>,
}

/// Initialize tracing subscriber with environment-based filtering.
fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.without_time()
		.compact()
		.init();
}

/// Print a prompt and read a single line from stdin.
fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
	print!("{message}");
	io::stdout().flush()?;
	let mut line = String::new();
	if input.read_line(&mut line)? == 0 {
		return Err(Error::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input")));
	}
	Ok(line.trim().to_string())
}

/// Prompt until a number between 1 and the advisory maximum is entered.
fn prompt_count(input: &mut impl BufRead, message: &str) -> Result<usize> {
	loop {
		let line = prompt(input, message)?;
		match line.parse::<usize>() {
			Ok(value) if (1..=MAX_PROMPT_VALUE).contains(&value) => return Ok(value),
			_ => println!("Please enter a number between 1 and {MAX_PROMPT_VALUE}"),
		}
	}
}

/// Prompt until at least one car name is entered.
fn prompt_cars(input: &mut impl BufRead) -> Result<Vec<String>> {
	loop {
		let line = prompt(input, "Cars arriving (order): ")?;
		let cars: Vec<String> = line.split_whitespace().map(str::to_string).collect();
		if !cars.is_empty() {
			return Ok(cars);
		}
		println!("Please enter at least one car");
	}
}

/// Build the station configuration from arguments and prompts.
fn configure(cli: &Cli, input: &mut impl BufRead) -> Result<(StationOptions, Vec<String>)> {
	let waiting_area = match cli.waiting_area {
		Some(value) => value,
		None => prompt_count(&mut *input, "Waiting area capacity: ")?,
	};
	let pumps = match cli.pumps {
		Some(value) => value,
		None => prompt_count(&mut *input, "Number of service bays (pumps): ")?,
	};
	let cars = if cli.cars.is_empty() {
		prompt_cars(&mut *input)?
	} else {
		cli.cars.clone()
	};
	let options = StationOptions::new(waiting_area, pumps)
		.with_arrival_interval(Duration::from_millis(cli.arrival_ms))
		.with_service_duration(Duration::from_millis(cli.service_ms));
	Ok((options, cars))
}

fn run(cli: Cli) -> Result<bool> {
	let (options, cars) = configure(&cli, &mut io::stdin().lock())?;
	tracing::debug!(?options, cars = cars.len(), "Opening station");
	let station = Station::open(options, cars)?;
	Ok(station.wait())
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(&cli.log_level);
	match run(cli) {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => {
			tracing::error!("Simulation stopped before every car was serviced");
			ExitCode::FAILURE
		}
		Err(e) => {
			tracing::error!("{e}");
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod tests {

	use super::*;

	#[test]
	fn arguments_skip_the_prompts() {
		let cli = Cli::parse_from(["servicestation", "-w", "2", "-p", "1", "A", "B"]);
		let mut input = io::Cursor::new("");
		let (options, cars) = configure(&cli, &mut input).unwrap();
		assert_eq!(options.waiting_area, 2);
		assert_eq!(options.pump_count, 1);
		assert_eq!(cars, vec!["A", "B"]);
	}

	#[test]
	fn prompts_fill_in_missing_values() {
		let cli = Cli::parse_from(["servicestation", "--service-ms", "5"]);
		let mut input = io::Cursor::new("0\n11\n3\n2\n\nA B  C\n");
		let (options, cars) = configure(&cli, &mut input).unwrap();
		assert_eq!(options.waiting_area, 3);
		assert_eq!(options.pump_count, 2);
		assert_eq!(options.service_duration, Duration::from_millis(5));
		assert_eq!(cars, vec!["A", "B", "C"]);
	}

	#[test]
	fn exhausted_input_is_an_error() {
		let cli = Cli::parse_from(["servicestation", "-w", "1", "-p", "1"]);
		let mut input = io::Cursor::new("");
		assert!(matches!(configure(&cli, &mut input), Err(Error::Io(_))));
	}
}
