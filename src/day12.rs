// Copyright (c) 2022 Bastiaan Marinus van de Weerd


const MAX_HEIGHT: u8 = 25;


struct Heightmap {
	heights: Vec<u8>,
	stride: usize,
	start: usize,
	end: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Visit { Unvisited, Start, From(usize) }

/// Visitation state of a single traversal, indexed like [`Heightmap::heights`].
struct Visits(Vec<Visit>);

impl Visits {
	fn is_visited(&self, pos: usize) -> bool {
		!matches!(self.0[pos], Visit::Unvisited)
	}

	/// Walks the predecessors back from `to`. The returned path starts at
	/// the traversal’s start and ends at `to` (both inclusive).
	fn path_to(&self, to: usize) -> Option<Vec<usize>> {
		if !self.is_visited(to) { return None }
		let mut path = std::iter::successors(Some(to), |&pos| match self.0[pos] {
			Visit::From(prev) => Some(prev),
			Visit::Start | Visit::Unvisited => None,
		}).collect::<Vec<_>>();
		path.reverse();
		Some(path)
	}
}

impl Heightmap {
	fn climbable(from_height: u8, to_height: u8) -> bool {
		to_height <= from_height + 1
	}

	#[cfg(any(test, LOGGING))]
	fn xy(&self, pos: usize) -> [usize; 2] {
		[pos % self.stride, pos / self.stride]
	}

	fn adjacent_positions(&self, pos: usize) -> impl Iterator<Item = usize> {
		let (s, l) = (self.stride, self.heights.len());
		let above = (pos >= s).then(|| pos - s);
		let left = (pos % s > 0).then(|| pos - 1);
		let right = (pos % s < s - 1).then(|| pos + 1);
		let below = (pos + s < l).then(|| pos + s);
		[above, left, right, below].into_iter().flatten()
	}

	fn traverse(&self, from: usize, can_step: impl Fn(u8, u8) -> bool) -> Visits {
		use std::collections::VecDeque;

		// Breadth-first search; positions are marked upon discovery, so
		// each is queued at most once and first reached along a shortest path
		let mut visits = Visits(vec![Visit::Unvisited; self.heights.len()]);
		visits.0[from] = Visit::Start;
		let mut queue = VecDeque::from([from]);

		while let Some(pos) = queue.pop_front() {
			let height = self.heights[pos];

			#[cfg(LOGGING)]
			{
				let [x, y] = self.xy(pos);
				println!("{x},{y}: {height}");
			}

			for adj_pos in self.adjacent_positions(pos) {
				if visits.is_visited(adj_pos) || !can_step(height, self.heights[adj_pos]) { continue }
				visits.0[adj_pos] = Visit::From(pos);
				queue.push_back(adj_pos);
			}
		}

		visits
	}

	fn shortest_path(&self, from: usize) -> Option<Vec<usize>> {
		self.traverse(from, Self::climbable).path_to(self.end)
	}

	/// Returns an [`Iterator`] over the shortest paths to the end from either only
	/// the start, or from every position of the lowest height (including the start).
	/// Starting positions from which the end cannot be reached are skipped.
	fn shortest_paths(&self, all_lowest: bool) -> impl Iterator<Item = Vec<usize>> + '_ {
		(0..self.heights.len())
			.filter(move |&pos| if all_lowest { self.heights[pos] == 0 } else { pos == self.start })
			.filter_map(move |from| self.shortest_path(from))
	}

	fn fewest_steps(&self, all_lowest: bool) -> Option<usize> {
		self.shortest_paths(all_lowest).map(|path| path.len() - 1).min()
	}
}


#[allow(dead_code)]
#[derive(Debug)]
enum Error {
	Heightmap(parsing::HeightmapError),
	NoPath,
}

fn input_heightmap_from_str(s: &str) -> Result<Heightmap, Error> {
	s.parse().map_err(Error::Heightmap)
}


fn part1_impl(input_heightmap: &Heightmap) -> Option<usize> {
	input_heightmap.fewest_steps(false)
}

pub(crate) fn part1(input: &str) -> Result<usize, impl std::fmt::Debug> {
	input_heightmap_from_str(input)
		.and_then(|heightmap| part1_impl(&heightmap).ok_or(Error::NoPath))
}


fn part2_impl(input_heightmap: &Heightmap) -> Option<usize> {
	input_heightmap.fewest_steps(true)
}

pub(crate) fn part2(input: &str) -> Result<usize, impl std::fmt::Debug> {
	input_heightmap_from_str(input)
		.and_then(|heightmap| part2_impl(&heightmap).ok_or(Error::NoPath))
}


mod parsing {
	use std::str::FromStr;
	use super::{Heightmap, MAX_HEIGHT};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum HeightmapError {
		Empty,
		LineLen { line: usize, len: usize, found: usize },
		InvalidByte { line: usize, column: usize, found: u8 },
		DuplicateStart { line: usize, column: usize },
		DuplicateEnd { line: usize, column: usize },
		NoStart,
		NoEnd,
	}

	impl FromStr for Heightmap {
		type Err = HeightmapError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use HeightmapError::*;

			let mut heights = Vec::with_capacity(s.len());
			let mut stride = None;
			let (mut start, mut end) = (None, None);

			for (l, line) in s.lines().enumerate() {
				match stride {
					None => stride = Some(line.len()),
					Some(len) if line.len() != len =>
						return Err(LineLen { line: l + 1, len, found: line.len() }),
					Some(_) => (),
				}

				for (c, b) in line.bytes().enumerate() {
					macro_rules! set_once { ( $which:ident, $which_err:ident ) => {
						if $which.replace(heights.len()).is_some() {
							return Err($which_err { line: l + 1, column: c + 1 })
						}
					} }

					heights.push(match b {
						b'S' => { set_once!(start, DuplicateStart); 0 }
						b'E' => { set_once!(end, DuplicateEnd); MAX_HEIGHT }
						b'a'..=b'z' => b - b'a',
						found => return Err(InvalidByte { line: l + 1, column: c + 1, found }),
					});
				}
			}

			Ok(Heightmap {
				heights,
				stride: stride.filter(|&s| s > 0).ok_or(Empty)?,
				start: start.ok_or(NoStart)?,
				end: end.ok_or(NoEnd)?,
			})
		}
	}

	#[test]
	fn tests() {
		use HeightmapError::*;
		let heightmap: Heightmap = "Sbc\nayE\n".parse().unwrap();
		assert_eq!(heightmap.heights, [0, 1, 2, 0, 24, 25]);
		assert_eq!((heightmap.stride, heightmap.start, heightmap.end), (3, 0, 5));
		assert!(matches!("".parse::<Heightmap>(), Err(Empty)));
		assert!(matches!("Sab\naE\n".parse::<Heightmap>(), Err(LineLen { line: 2, len: 3, found: 2 })));
		assert!(matches!("SaE\naEa\n".parse::<Heightmap>(), Err(DuplicateEnd { line: 2, column: 2 })));
		assert!(matches!("SaE\nSaa\n".parse::<Heightmap>(), Err(DuplicateStart { line: 2, column: 1 })));
		assert!(matches!("Sa#\naaE\n".parse::<Heightmap>(), Err(InvalidByte { line: 1, column: 3, found: b'#' })));
		assert!(matches!("aaa\naaE\n".parse::<Heightmap>(), Err(NoStart)));
		assert!(matches!("Saa\naaa\n".parse::<Heightmap>(), Err(NoEnd)));
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		Sabqponm
		abcryxxl
		accszExk
		acctuvwj
		abdefghi
	" };

	/// Small grids with walls, dead ends, and cliffs (`E` is unreachable in some).
	const FIXTURES: [&str; 3] = [
		indoc::indoc! { "
			Sbcd
			azye
			Ezgf
		" },
		indoc::indoc! { "
			Sacb
			bdaE
			cedc
		" },
		indoc::indoc! { "
			SazE
			bcxy
			dcbw
		" },
	];

	fn flood_fill(heightmap: &Heightmap, from: usize) -> Vec<bool> {
		let mut seen = vec![false; heightmap.heights.len()];
		let mut stack = vec![from];
		while let Some(pos) = stack.pop() {
			if std::mem::replace(&mut seen[pos], true) { continue }
			stack.extend(heightmap.adjacent_positions(pos)
				.filter(|&p| Heightmap::climbable(heightmap.heights[pos], heightmap.heights[p])));
		}
		seen
	}

	/// Enumerates every simple path from `from` to `to`.
	fn brute_force_steps(heightmap: &Heightmap, from: usize, to: usize) -> Option<usize> {
		fn walk(heightmap: &Heightmap, pos: usize, to: usize, on_path: &mut [bool], steps: usize) -> Option<usize> {
			if pos == to { return Some(steps) }
			on_path[pos] = true;
			let best = heightmap.adjacent_positions(pos)
				.filter(|&p| !on_path[p] && Heightmap::climbable(heightmap.heights[pos], heightmap.heights[p]))
				.collect::<Vec<_>>()
				.into_iter()
				.filter_map(|p| walk(heightmap, p, to, on_path, steps + 1))
				.min();
			on_path[pos] = false;
			best
		}
		walk(heightmap, from, to, &mut vec![false; heightmap.heights.len()], 0)
	}

	#[test]
	fn visits_reachable() {
		for input in FIXTURES.into_iter().chain([INPUT]) {
			let heightmap = input_heightmap_from_str(input).unwrap();
			for from in 0..heightmap.heights.len() {
				let visits = heightmap.traverse(from, Heightmap::climbable);
				let reachable = flood_fill(&heightmap, from);
				for pos in 0..heightmap.heights.len() {
					assert_eq!(visits.is_visited(pos), reachable[pos]);
					match visits.0[pos] {
						Visit::Start => assert_eq!(pos, from),
						Visit::From(prev) => {
							assert!(heightmap.adjacent_positions(prev).any(|p| p == pos));
							assert!(Heightmap::climbable(heightmap.heights[prev], heightmap.heights[pos]));
						}
						Visit::Unvisited => (),
					}
				}
			}
		}
	}

	#[test]
	fn shortest() {
		for input in FIXTURES {
			let heightmap = input_heightmap_from_str(input).unwrap();
			for from in 0..heightmap.heights.len() {
				let visits = heightmap.traverse(from, Heightmap::climbable);
				for to in 0..heightmap.heights.len() {
					let path = visits.path_to(to);
					assert_eq!(path.as_ref().map(|p| p.len() - 1), brute_force_steps(&heightmap, from, to));
					if let Some(path) = path {
						assert_eq!((path[0], path[path.len() - 1]), (from, to));
					}
				}
			}
		}
	}

	#[test]
	fn all_lowest() {
		for input in FIXTURES.into_iter().chain([INPUT]) {
			let heightmap = input_heightmap_from_str(input).unwrap();
			match (heightmap.fewest_steps(false), heightmap.fewest_steps(true)) {
				(Some(start), Some(all_lowest)) => assert!(all_lowest <= start),
				(Some(_), None) => panic!("The start should be among the lowest positions"),
				(None, _) => (),
			}
		}
	}

	#[test]
	fn tests() {
		let heightmap = input_heightmap_from_str(INPUT).unwrap();
		let path = heightmap.shortest_path(heightmap.start).unwrap();
		assert_eq!(heightmap.xy(path[0]), [0, 0]);
		assert_eq!(heightmap.xy(path[path.len() - 1]), [5, 2]);
		assert_eq!(heightmap.shortest_path(heightmap.end), Some(vec![heightmap.end]));
		assert_eq!(heightmap.shortest_paths(true).count(), 6);

		assert_eq!(part1_impl(&heightmap), Some(31));
		assert_eq!(part2_impl(&heightmap), Some(29));
		assert_eq!(part1(INPUT).unwrap(), 31);
		assert_eq!(part2(INPUT).unwrap(), 29);

		let unreachable = input_heightmap_from_str(FIXTURES[0]).unwrap();
		assert_eq!(part1_impl(&unreachable), None);
		assert!(matches!(input_heightmap_from_str("SaE\naEa\n"), Err(Error::Heightmap(_))));
		assert_eq!(format!("{:?}", part1(FIXTURES[0]).unwrap_err()), "NoPath");
		assert_eq!(format!("{:?}", part2(FIXTURES[0]).unwrap_err()), "NoPath");
	}
}
