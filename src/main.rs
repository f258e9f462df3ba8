// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{fmt::{Debug, Display}, path::PathBuf, process::ExitCode};


macro_rules! days { ( $( $day:literal ),+ $(,)? ) => { paste::paste! {
	$( mod [<day $day>]; )+

	const DAYS: &[u8] = &[$( $day ),+];

	fn solve(day: u8, part: u8, input: &str) -> Result<String, Error> {
		match (day, part) {
			$(
				($day, 1) => answer(day, part, [<day $day>]::part1(input)),
				($day, 2) => answer(day, part, [<day $day>]::part2(input)),
			)+
			_ => Err(Error::Unsolvable { day, part }),
		}
	}
} } }

days!(11, 12, 13, 14);


/// Solutions to (some of) the 2022 puzzles, reading each day’s input from `<INPUTS>/dayNN.txt`.
#[derive(Debug, clap::Parser)]
struct Args {
	/// Directory containing the input files
	#[arg(short, long, default_value = "inputs")]
	inputs: PathBuf,

	/// The part to run, both if omitted
	#[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
	part: Option<u8>,

	/// The days to run, all if omitted
	#[arg(value_parser = parse_day)]
	days: Vec<u8>,
}

fn parse_day(s: &str) -> Result<u8, String> {
	let day = s.parse::<u8>().map_err(|e| e.to_string())?;
	if DAYS.contains(&day) { Ok(day) }
	else { Err(format!("no solution for day {day} (try one of {DAYS:?})")) }
}


#[allow(dead_code)]
#[derive(Debug)]
enum Error {
	Read { path: PathBuf, source: std::io::Error },
	Solve { day: u8, part: u8, source: Box<dyn Debug> },
	Unsolvable { day: u8, part: u8 },
}

fn answer(day: u8, part: u8, result: Result<impl Display, impl Debug + 'static>) -> Result<String, Error> {
	result
		.map(|answer| answer.to_string())
		.map_err(|e| Error::Solve { day, part, source: Box::new(e) })
}

fn run(args: &Args) -> Result<(), Error> {
	let days = if args.days.is_empty() { DAYS } else { args.days.as_slice() };
	let parts = args.part.map_or(1..=2, |part| part..=part);

	for &day in days {
		let path = args.inputs.join(format!("day{day:02}.txt"));
		let input = std::fs::read_to_string(&path).map_err(|source| Error::Read { path, source })?;
		for part in parts.clone() {
			println!("Day {day:02} part {part}: {}", solve(day, part, &input)?);
		}
	}

	Ok(())
}

fn main() -> ExitCode {
	use clap::Parser as _;
	match run(&Args::parse()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("{err:?}");
			ExitCode::FAILURE
		}
	}
}


#[test]
fn tests() {
	use clap::Parser as _;

	let args = Args::try_parse_from(["advent22"]).unwrap();
	assert_eq!((args.inputs, args.part, args.days), (PathBuf::from("inputs"), None, vec![]));
	let args = Args::try_parse_from(["advent22", "--inputs", "data", "-p", "2", "14", "12"]).unwrap();
	assert_eq!((args.inputs, args.part, args.days), (PathBuf::from("data"), Some(2), vec![14, 12]));
	assert!(Args::try_parse_from(["advent22", "3"]).is_err());
	assert!(Args::try_parse_from(["advent22", "--part", "3"]).is_err());

	const INPUT: &str = "498,4 -> 498,6 -> 496,6\n503,4 -> 502,4 -> 502,9 -> 494,9\n";
	assert_eq!(solve(14, 1, INPUT).unwrap(), "24");
	assert_eq!(solve(14, 2, INPUT).unwrap(), "93");
	assert!(matches!(solve(14, 1, "498,4 -> 496,6"), Err(Error::Solve { day: 14, part: 1, .. })));
	let err = solve(11, 2, "Monkey 1:").unwrap_err();
	assert!(format!("{err:?}").starts_with("Solve { day: 11, part: 2, source: Monkeys(Line { line: 1"));
	assert!(matches!(solve(12, 3, ""), Err(Error::Unsolvable { day: 12, part: 3 })));

	let missing = Args { inputs: PathBuf::from("/nonexistent"), part: None, days: vec![12] };
	assert!(matches!(run(&missing), Err(Error::Read { .. })));
}
