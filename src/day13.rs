// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::cmp::Ordering;


#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
enum Packet {
	Int(u32),
	List(Vec<Packet>),
}

impl Ord for Packet {
	fn cmp(&self, other: &Self) -> Ordering {
		use {std::slice::from_ref, Packet::*};
		match (self, other) {
			(Int(lhs), Int(rhs)) => lhs.cmp(rhs),
			// Lexicographic, so a list that runs out of items first is less
			(List(lhs), List(rhs)) => lhs.iter().cmp(rhs.iter()),
			(Int(_), List(rhs)) => from_ref(self).cmp(rhs.as_slice()),
			(List(lhs), Int(_)) => lhs.as_slice().cmp(from_ref(other)),
		}
	}
}

/// Equal when neither is ordered before the other, so `[[2]]` equals `2`.
impl PartialEq for Packet {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Packet {}

impl PartialOrd for Packet {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Packet {
	fn divider(n: u32) -> Self {
		Packet::List(vec![Packet::List(vec![Packet::Int(n)])])
	}
}


fn part1_impl(input_packets: &[Packet]) -> usize {
	use itertools::Itertools as _;
	input_packets.chunks_exact(2)
		.positions(|pair| pair[0] < pair[1])
		.map(|i| i + 1)
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<usize, impl std::fmt::Debug> {
	parsing::try_packets_from_str(input).map(|packets| part1_impl(&packets))
}


/// The product of the dividers’ 1-based positions, each counting only the
/// packets strictly before it.
fn part2_impl(input_packets: &[Packet]) -> usize {
	let dividers = [2, 6].map(Packet::divider);

	#[cfg(LOGGING)]
	{
		use itertools::Itertools as _;
		for packet in input_packets.iter().chain(&dividers).sorted() { println!("{packet}") }
	}

	dividers.iter()
		.map(|divider| 1 + input_packets.iter().chain(&dividers).filter(|&p| p < divider).count())
		.product()
}

pub(crate) fn part2(input: &str) -> Result<usize, impl std::fmt::Debug> {
	parsing::try_packets_from_str(input).map(|packets| part2_impl(&packets))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::Packet;

	#[derive(Debug)]
	pub(super) enum PacketErrorKind {
		Format,
		Int(ParseIntError),
		Trailing,
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) struct PacketError { column: usize, kind: PacketErrorKind }

	/// Parses one packet from the start of `s`, returning it with the rest of `s`.
	/// Columns in errors are relative to `s0`, of which `s` must be a suffix.
	fn try_packet_prefix_from_str<'a>(s0: &str, s: &'a str) -> Result<(Packet, &'a str), PacketError> {
		use {PacketError as E, PacketErrorKind as EK};
		let c = |s: &str| s0.len() - s.len() + 1;

		let Some(mut s) = s.strip_prefix('[') else {
			let len = s.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(s.len());
			if len == 0 { return Err(E { column: c(s), kind: EK::Format }) }
			let int = s[..len].parse().map_err(|e| E { column: c(s), kind: EK::Int(e) })?;
			return Ok((Packet::Int(int), &s[len..]))
		};

		let mut items = vec![];
		if let Some(rest) = s.strip_prefix(']') { return Ok((Packet::List(items), rest)) }
		loop {
			let (item, rest) = try_packet_prefix_from_str(s0, s)?;
			items.push(item);
			if let Some(rest) = rest.strip_prefix(',') { s = rest }
			else if let Some(rest) = rest.strip_prefix(']') { return Ok((Packet::List(items), rest)) }
			else { return Err(E { column: c(rest), kind: EK::Format }) }
		}
	}

	impl FromStr for Packet {
		type Err = PacketError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (packet, rest) = try_packet_prefix_from_str(s, s)?;
			if !rest.is_empty() {
				return Err(PacketError { column: s.len() - rest.len() + 1, kind: PacketErrorKind::Trailing })
			}
			Ok(packet)
		}
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum PacketsError {
		Packet { line: usize, source: PacketError },
		Separator { line: usize },
		Unpaired { line: usize },
	}

	/// Parses pairs of packets on consecutive lines, separated by empty lines.
	pub(super) fn try_packets_from_str(s: &str) -> Result<Vec<Packet>, PacketsError> {
		let packets = s.lines()
			.enumerate()
			.filter_map(|(l, line)| match (l % 3, line) {
				(2, "") => None,
				(2, _) => Some(Err(PacketsError::Separator { line: l + 1 })),
				(_, line) => Some(line.parse()
					.map_err(|e| PacketsError::Packet { line: l + 1, source: e })),
			})
			.collect::<Result<Vec<_>, _>>()?;
		if packets.len() % 2 != 0 {
			return Err(PacketsError::Unpaired { line: s.lines().count() })
		}
		Ok(packets)
	}

	#[test]
	fn tests() {
		use {Packet::*, PacketErrorKind as EK};
		assert_eq!("[]".parse::<Packet>().unwrap(), List(vec![]));
		assert_eq!("[1,[2,[]],10]".parse::<Packet>().unwrap(),
			List(vec![Int(1), List(vec![Int(2), List(vec![])]), Int(10)]));
		assert_eq!("7".parse::<Packet>().unwrap(), Int(7));

		assert!(matches!("[1,2".parse::<Packet>(), Err(PacketError { column: 5, kind: EK::Format })));
		assert!(matches!("[1;2]".parse::<Packet>(), Err(PacketError { column: 3, kind: EK::Format })));
		assert!(matches!("[1,,2]".parse::<Packet>(), Err(PacketError { column: 4, kind: EK::Format })));
		assert!(matches!("[1]]".parse::<Packet>(), Err(PacketError { column: 4, kind: EK::Trailing })));
		assert!(matches!("[99999999999]".parse::<Packet>(), Err(PacketError { column: 2, kind: EK::Int(_) })));

		assert!(matches!(try_packets_from_str("[1]\n[2]\n[3]\n"), Err(PacketsError::Separator { line: 3 })));
		assert!(matches!(try_packets_from_str("[1]\n[2]\n\n[3]\n"), Err(PacketsError::Unpaired { line: 4 })));
		assert!(matches!(try_packets_from_str("[1]\n[2]\n\n[3]\n[x]\n"),
			Err(PacketsError::Packet { line: 5, source: PacketError { column: 2, kind: EK::Format } })));
	}
}


#[cfg(any(test, LOGGING))]
mod fmt {
	use super::Packet;

	impl std::fmt::Display for Packet {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			match self {
				Packet::Int(int) => write!(f, "{int}"),
				Packet::List(items) => {
					f.write_str("[")?;
					for (i, item) in items.iter().enumerate() {
						if i > 0 { f.write_str(",")? }
						write!(f, "{item}")?;
					}
					f.write_str("]")
				}
			}
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		[1,1,3,1,1]
		[1,1,5,1,1]

		[[1],[2,3,4]]
		[[1],4]

		[9]
		[[8,7,6]]

		[[4,4],4,4]
		[[4,4],4,4,4]

		[7,7,7,7]
		[7,7,7]

		[]
		[3]

		[[[]]]
		[[]]

		[1,[2,[3,[4,[5,6,7]]]],8,9]
		[1,[2,[3,[4,[5,6,0]]]],8,9]
	" };

	#[test]
	fn ordering() {
		let packets = parsing::try_packets_from_str(INPUT).unwrap();
		let orderings = packets.chunks(2).map(|pair| pair[0].cmp(&pair[1])).collect::<Vec<_>>();
		use Ordering::*;
		assert_eq!(orderings, [Less, Less, Greater, Less, Greater, Less, Greater, Greater]);

		let packet = |s: &str| s.parse::<Packet>().unwrap();
		assert_eq!(packet("[[1],4]").cmp(&packet("[1,4]")), Equal);
		assert_eq!(packet("3").cmp(&packet("[[3]]")), Equal);
		assert_eq!(packet("[3]").cmp(&packet("[[3],0]")), Less);
		assert_eq!(packet("[[]]").cmp(&packet("[]")), Greater);
		assert_eq!(packet("[2]"), packet("[[2]]"));
		assert_ne!(packet("[2]"), packet("[2,2]"));
		for pair in packets.chunks(2) {
			assert_eq!(pair[0].cmp(&pair[1]), pair[1].cmp(&pair[0]).reverse());
			assert_eq!(pair[0].to_string().parse::<Packet>().unwrap(), pair[0]);
		}
	}

	#[test]
	fn tests() {
		let packets = parsing::try_packets_from_str(INPUT).unwrap();
		assert_eq!(part1_impl(&packets), 13);
		assert_eq!(part2_impl(&packets), 140);
		assert_eq!(part1(INPUT).unwrap(), 13);
		assert_eq!(part2(INPUT).unwrap(), 140);
		assert!(format!("{:?}", part1("[1]\n[2\n").unwrap_err()).starts_with("Packet { line: 2"));
	}

	#[test]
	fn ties() {
		// Packets equal to a divider don’t come before it
		let packets = parsing::try_packets_from_str("[[2]]\n[2]\n\n[2]\n[1]\n").unwrap();
		assert_eq!(part1_impl(&packets), 0);
		assert_eq!(part2_impl(&packets), 2 * 6);
		assert_eq!(part2("[[6]]\n[6]\n").unwrap(), 2);
	}
}
