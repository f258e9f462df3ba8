// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashSet;


const ORIGIN: [isize; 2] = [500, 0];


struct Cave {
	rocks: HashSet<[isize; 2]>,
}

impl Cave {
	/// The `y` of the lowest rock (or of the origin if there are none).
	fn lowest(&self) -> isize {
		self.rocks.iter().map(|&[_, y]| y).max().unwrap_or(ORIGIN[1])
	}
}


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Mode {
	/// Sand falling past the lowest rock flows into the abyss.
	Open,
	/// An infinitely wide floor lies two rows below the lowest rock.
	Closed,
}

struct Simulation {
	cave: Cave,
	mode: Mode,
	lowest: isize,
	sand: HashSet<[isize; 2]>,
	current: Option<[isize; 2]>,
	done: bool,
}

impl Simulation {
	fn new(cave: Cave, mode: Mode) -> Self {
		// Rocks above the origin can’t stop anything falling from it
		let lowest = cave.lowest().max(ORIGIN[1]);
		Self { cave, mode, lowest, sand: HashSet::new(), current: None, done: false }
	}

	fn floor(&self) -> Option<isize> {
		(self.mode == Mode::Closed).then_some(self.lowest + 2)
	}

	fn is_occupied(&self, pos: [isize; 2]) -> bool {
		self.floor().is_some_and(|floor| pos[1] >= floor)
			|| self.cave.rocks.contains(&pos)
			|| self.sand.contains(&pos)
	}

	/// Every cell holding either rock or sand at rest.
	fn occupied(&self) -> HashSet<[isize; 2]> {
		self.cave.rocks.union(&self.sand).copied().collect()
	}

	/// Moves the falling unit of sand one step, or releases a new one at the
	/// origin. Returns whether the simulation reached its end state.
	fn tick(&mut self) -> bool {
		if self.done { return true }

		let from = match self.current.take() {
			Some(from) => from,
			None if self.is_occupied(ORIGIN) => { self.done = true; return true }
			None => ORIGIN,
		};

		if self.mode == Mode::Open && from[1] > self.lowest {
			self.done = true;
			return true
		}

		for to in [
			[from[0], from[1] + 1],
			[from[0] - 1, from[1] + 1],
			[from[0] + 1, from[1] + 1]] {
			if !self.is_occupied(to) {
				self.current = Some(to);
				return false
			}
		}

		self.sand.insert(from);
		self.done = from == ORIGIN;
		self.done
	}

	/// Runs the simulation to its end, returning the number of units of sand at rest.
	fn run(&mut self) -> usize {
		while !self.tick() {}
		#[cfg(LOGGING)]
		println!("{self}");
		self.sand.len()
	}
}


fn input_cave_from_str(s: &str) -> Result<Cave, parsing::CaveError> {
	s.parse()
}


fn part1_impl(input_cave: Cave) -> usize {
	Simulation::new(input_cave, Mode::Open).run()
}

pub(crate) fn part1(input: &str) -> Result<usize, impl std::fmt::Debug> {
	input_cave_from_str(input).map(part1_impl)
}


fn part2_impl(input_cave: Cave) -> usize {
	Simulation::new(input_cave, Mode::Closed).run()
}

pub(crate) fn part2(input: &str) -> Result<usize, impl std::fmt::Debug> {
	input_cave_from_str(input).map(part2_impl)
}


mod parsing {
	use std::{mem, num::ParseIntError, str::FromStr};
	use super::Cave;

	#[derive(Debug)]
	pub(super) enum PosError {
		Format,
		X(ParseIntError),
		Y(ParseIntError),
	}

	fn try_pos_from_str(s: &str) -> Result<[isize; 2], PosError> {
		let (x, y) = s.trim().split_once(',').ok_or(PosError::Format)?;
		Ok([x.parse().map_err(PosError::X)?, y.parse().map_err(PosError::Y)?])
	}

	#[derive(Debug)]
	pub(super) enum StructureErrorKind {
		Pos(PosError),
		Unaligned([[isize; 2]; 2]),
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) struct StructureError { column: usize, kind: StructureErrorKind }

	/// Calls `f` with every pair of consecutive vertices of the structure. A
	/// structure of just one vertex is passed as a pair of identical vertices.
	fn try_with_segments_from_str(s: &str, mut f: impl FnMut([[isize; 2]; 2]))
	-> Result<(), StructureError> {
		use {itertools::Itertools as _, StructureError as E, StructureErrorKind as EK};

		let vertices = s.split("->")
			.scan(0, |c, vertex| Some((mem::replace(c, *c + vertex.len() + 2), vertex)))
			.map(|(c, vertex)| try_pos_from_str(vertex)
				.map(|pos| (c, pos))
				.map_err(|e| E { column: c + 1, kind: EK::Pos(e) }))
			.collect::<Result<Vec<_>, _>>()?;

		if let [(_, pos)] = vertices.as_slice() { f([*pos, *pos]) }
		for ((_, pos0), (c, pos1)) in vertices.into_iter().tuple_windows() {
			if pos0[0] != pos1[0] && pos0[1] != pos1[1] {
				return Err(E { column: c + 1, kind: EK::Unaligned([pos0, pos1]) })
			}
			f([pos0, pos1]);
		}
		Ok(())
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) struct CaveError { line: usize, source: StructureError }

	impl FromStr for Cave {
		type Err = CaveError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use itertools::iproduct;
			let mut rocks = std::collections::HashSet::new();
			for (l, line) in s.lines().enumerate() {
				try_with_segments_from_str(line, |[[x0, y0], [x1, y1]]| {
					rocks.extend(iproduct!(x0.min(x1)..=x0.max(x1), y0.min(y1)..=y0.max(y1)).map(|(x, y)| [x, y]));
				}).map_err(|e| CaveError { line: l + 1, source: e })?;
			}
			Ok(Cave { rocks })
		}
	}

	#[test]
	fn tests() {
		use std::collections::HashSet;
		let cave: Cave = "498,4 -> 498,6 -> 496,6".parse().unwrap();
		assert_eq!(cave.rocks, HashSet::from([[498, 4], [498, 5], [498, 6], [497, 6], [496, 6]]));
		let cave: Cave = "500,3\n".parse().unwrap();
		assert_eq!(cave.rocks, HashSet::from([[500, 3]]));
		assert!("".parse::<Cave>().unwrap().rocks.is_empty());

		assert!(matches!("498,4 -> 496,6".parse::<Cave>(), Err(CaveError {
			line: 1, source: StructureError { column: 9, kind: StructureErrorKind::Unaligned([[498, 4], [496, 6]]) } })));
		assert!(matches!("498,4 -> 498,6\n498,4 498,6".parse::<Cave>(), Err(CaveError {
			line: 2, source: StructureError { column: 1, kind: StructureErrorKind::Pos(PosError::Y(_)) } })));
		assert!(matches!("498,4 -> 498;6".parse::<Cave>(), Err(CaveError {
			line: 1, source: StructureError { column: 9, kind: StructureErrorKind::Pos(PosError::Format) } })));
		assert!(matches!("498,4 -> ,6".parse::<Cave>(), Err(CaveError {
			line: 1, source: StructureError { kind: StructureErrorKind::Pos(PosError::X(_)), .. } })));
	}
}


#[cfg(any(test, LOGGING))]
mod fmt {
	use std::fmt::Write;
	use super::{Simulation, ORIGIN};

	impl std::fmt::Display for Simulation {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			use itertools::Itertools as _;

			let (x0, x1) = self.cave.rocks.iter()
				.chain(&self.sand)
				.chain(self.current.as_ref())
				.chain(std::iter::once(&ORIGIN))
				.map(|&[x, _]| x)
				.minmax()
				.into_option()
				.unwrap_or((ORIGIN[0], ORIGIN[0]));
			let y1 = self.floor().unwrap_or(self.lowest);

			for y in ORIGIN[1]..=y1 {
				for x in x0..=x1 {
					f.write_char(match [x, y] {
						xy if self.sand.contains(&xy) => 'o',
						xy if Some(xy) == self.current => '~',
						xy if xy == ORIGIN => '+',
						xy if self.is_occupied(xy) => '#',
						_ => '.',
					})?
				}
				if y < y1 { f.write_char('\n')? }
			}
			Ok(())
		}
	}
}
