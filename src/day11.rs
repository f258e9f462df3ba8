// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::VecDeque;


#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum Operand { Old, Num(u64) }

#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum Operator { Add, Mul }

/// The right-hand side of `new = <lhs> <operator> <rhs>`.
#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
struct Operation {
	lhs: Operand,
	operator: Operator,
	rhs: Operand,
}

impl Operation {
	/// Returns `None` when the new worry level doesn’t fit.
	fn apply(&self, old: u64) -> Option<u64> {
		let value = |operand| match operand { Operand::Old => old, Operand::Num(num) => num };
		match self.operator {
			Operator::Add => value(self.lhs).checked_add(value(self.rhs)),
			Operator::Mul => value(self.lhs).checked_mul(value(self.rhs)),
		}
	}
}

#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
struct Monkey {
	items: VecDeque<u64>,
	operation: Operation,
	divisor: u64,
	if_true: usize,
	if_false: usize,
}

#[derive(Clone, Copy)]
enum Relief {
	Divide(u64),
	/// By a common multiple of all divisors, which keeps every test’s outcome intact.
	Modulo(u64),
}

#[allow(dead_code)]
#[derive(Debug)]
enum Error {
	Monkeys(parsing::MonkeysError),
	Overflow { round: usize, monkey: usize, item: u64 },
	Modulus,
}

/// Returns the number of items inspected by each monkey.
fn inspections(monkeys: &mut [Monkey], rounds: usize, relief: Relief) -> Result<Vec<u64>, Error> {
	let mut inspections = vec![0; monkeys.len()];
	for round in 0..rounds {
		for m in 0..monkeys.len() {
			while let Some(item) = monkeys[m].items.pop_front() {
				inspections[m] += 1;
				let monkey = &monkeys[m];
				let worry = monkey.operation.apply(item)
					.ok_or(Error::Overflow { round: round + 1, monkey: m, item })?;
				let worry = match relief {
					Relief::Divide(divisor) => worry / divisor,
					Relief::Modulo(modulus) => worry % modulus,
				};
				let target = if worry % monkey.divisor == 0 { monkey.if_true } else { monkey.if_false };
				monkeys[target].items.push_back(worry);
			}
		}

		#[cfg(LOGGING)]
		if [1, 20].contains(&(round + 1)) || (round + 1) % 1000 == 0 {
			println!("== After round {} ==", round + 1);
			for (m, count) in inspections.iter().enumerate() {
				println!("Monkey {m} inspected items {count} times.");
			}
		}
	}
	Ok(inspections)
}

fn monkey_business(mut monkeys: Vec<Monkey>, rounds: usize, relief: Relief) -> Result<u64, Error> {
	use itertools::Itertools as _;
	Ok(inspections(&mut monkeys, rounds, relief)?.into_iter()
		.sorted()
		.rev()
		.take(2)
		.product())
}


fn part1_impl(input_monkeys: Vec<Monkey>) -> Result<u64, Error> {
	monkey_business(input_monkeys, 20, Relief::Divide(3))
}

pub(crate) fn part1(input: &str) -> Result<u64, impl std::fmt::Debug> {
	parsing::try_monkeys_from_str(input).map_err(Error::Monkeys).and_then(part1_impl)
}


fn part2_impl(mut input_monkeys: Vec<Monkey>) -> Result<u64, Error> {
	use num_integer::Integer as _;
	let modulus = input_monkeys.iter()
		.try_fold(1u64, |lcm, m| (lcm / lcm.gcd(&m.divisor)).checked_mul(m.divisor))
		.ok_or(Error::Modulus)?;
	for item in input_monkeys.iter_mut().flat_map(|m| m.items.iter_mut()) { *item %= modulus }
	monkey_business(input_monkeys, 10_000, Relief::Modulo(modulus))
}

pub(crate) fn part2(input: &str) -> Result<u64, impl std::fmt::Debug> {
	parsing::try_monkeys_from_str(input).map_err(Error::Monkeys).and_then(part2_impl)
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::{Monkey, Operand, Operation, Operator};

	impl FromStr for Operand {
		type Err = ParseIntError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			match s {
				"old" => Ok(Operand::Old),
				num => num.parse().map(Operand::Num),
			}
		}
	}

	#[derive(Debug)]
	pub(super) enum OperationError {
		Format,
		Lhs(ParseIntError),
		Operator(String),
		Rhs(ParseIntError),
	}

	impl FromStr for Operation {
		type Err = OperationError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use {itertools::Itertools as _, OperationError as E};
			let (lhs, operator, rhs) = s.split_whitespace().collect_tuple().ok_or(E::Format)?;
			let operator = match operator {
				"+" => Operator::Add,
				"*" => Operator::Mul,
				invalid => return Err(E::Operator(invalid.to_owned())),
			};
			Ok(Operation {
				lhs: lhs.parse().map_err(E::Lhs)?,
				operator,
				rhs: rhs.parse().map_err(E::Rhs)?,
			})
		}
	}

	#[derive(Debug)]
	pub(super) enum MonkeyErrorKind {
		Format,
		Id { expected: usize, found: Result<usize, ParseIntError> },
		Item(ParseIntError),
		Operation(OperationError),
		Divisor(Option<ParseIntError>),
		Target(ParseIntError),
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum MonkeysError {
		Line { line: usize, kind: MonkeyErrorKind },
		Target { monkey: usize, target: usize },
	}

	pub(super) fn try_monkeys_from_str(s: &str) -> Result<Vec<Monkey>, MonkeysError> {
		use {MonkeyErrorKind as EK, MonkeysError as E};

		let mut lines = s.lines().enumerate().map(|(l, line)| (l + 1, line.trim())).peekable();
		let mut last_line = 0;
		let mut monkeys = vec![];

		loop {
			macro_rules! next_line { ( $prefix:literal ) => { {
				let (line, text) = lines.next().ok_or(E::Line { line: last_line + 1, kind: EK::Format })?;
				last_line = line;
				(line, text.strip_prefix($prefix).ok_or(E::Line { line, kind: EK::Format })?.trim_start())
			} } }

			let (line, id) = next_line!("Monkey");
			let id = id.strip_suffix(':').ok_or(E::Line { line, kind: EK::Format })?.parse();
			if id.as_ref().ok() != Some(&monkeys.len()) {
				return Err(E::Line { line, kind: EK::Id { expected: monkeys.len(), found: id } })
			}

			let (line, items) = next_line!("Starting items:");
			let items = items.split(',')
				.map(str::trim)
				.filter(|item| !item.is_empty())
				.map(|item| item.parse().map_err(|e| E::Line { line, kind: EK::Item(e) }))
				.collect::<Result<_, _>>()?;

			let (line, operation) = next_line!("Operation: new =");
			let operation = operation.parse().map_err(|e| E::Line { line, kind: EK::Operation(e) })?;

			let (line, divisor) = next_line!("Test: divisible by");
			let divisor = match divisor.parse::<u64>() {
				Ok(0) => return Err(E::Line { line, kind: EK::Divisor(None) }),
				Ok(divisor) => divisor,
				Err(e) => return Err(E::Line { line, kind: EK::Divisor(Some(e)) }),
			};

			let (line, if_true) = next_line!("If true: throw to monkey");
			let if_true = if_true.parse().map_err(|e| E::Line { line, kind: EK::Target(e) })?;
			let (line, if_false) = next_line!("If false: throw to monkey");
			let if_false = if_false.parse().map_err(|e| E::Line { line, kind: EK::Target(e) })?;

			monkeys.push(Monkey { items, operation, divisor, if_true, if_false });

			match lines.next() {
				None => break,
				Some((_, "")) if lines.peek().is_none() => break,
				Some((_, "")) => continue,
				Some((line, _)) => return Err(E::Line { line, kind: EK::Format }),
			}
		}

		// Throwing to oneself would never finish a turn
		for (m, monkey) in monkeys.iter().enumerate() {
			for target in [monkey.if_true, monkey.if_false] {
				if target == m || target >= monkeys.len() {
					return Err(E::Target { monkey: m, target })
				}
			}
		}

		Ok(monkeys)
	}

	#[test]
	fn tests() {
		use {Operand::*, Operator::*};
		assert_eq!("old * 19".parse::<Operation>().unwrap(), Operation { lhs: Old, operator: Mul, rhs: Num(19) });
		assert_eq!("old + old".parse::<Operation>().unwrap(), Operation { lhs: Old, operator: Add, rhs: Old });
		assert!(matches!("old - 3".parse::<Operation>(), Err(OperationError::Operator(op)) if op == "-"));
		assert!(matches!("old *".parse::<Operation>(), Err(OperationError::Format)));
		assert!(matches!("x * old".parse::<Operation>(), Err(OperationError::Lhs(_))));

		let monkeys = try_monkeys_from_str(super::tests::INPUT).unwrap();
		assert_eq!(monkeys.len(), 4);
		assert_eq!(monkeys[0].items, [79, 98]);
		assert_eq!((monkeys[3].divisor, monkeys[3].if_true, monkeys[3].if_false), (17, 0, 1));

		const MONKEY: &str = indoc::indoc! { "
			Monkey 0:
			  Starting items:
			  Operation: new = old + 6
			  Test: divisible by 19
			    If true: throw to monkey 1
			    If false: throw to monkey 0
		" };
		assert!(matches!(try_monkeys_from_str(MONKEY), Err(MonkeysError::Target { monkey: 0, target: 1 })));
		let monkey = MONKEY.replace("monkey 1", "monkey 0");
		assert!(matches!(try_monkeys_from_str(&monkey), Err(MonkeysError::Target { monkey: 0, target: 0 })));
		let monkey = MONKEY.replace("by 19", "by 0");
		assert!(matches!(try_monkeys_from_str(&monkey), Err(MonkeysError::Line { line: 4, kind: MonkeyErrorKind::Divisor(None) })));
		let monkey = MONKEY.replace("Monkey 0", "Monkey 1");
		assert!(matches!(try_monkeys_from_str(&monkey), Err(MonkeysError::Line { line: 1, kind: MonkeyErrorKind::Id { expected: 0, .. } })));
		assert!(matches!(try_monkeys_from_str(&MONKEY[..60]), Err(MonkeysError::Line { line: 4, kind: MonkeyErrorKind::Format })));
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	pub(super) const INPUT: &str = indoc::indoc! { "
		Monkey 0:
		  Starting items: 79, 98
		  Operation: new = old * 19
		  Test: divisible by 23
		    If true: throw to monkey 2
		    If false: throw to monkey 3

		Monkey 1:
		  Starting items: 54, 65, 75, 74
		  Operation: new = old + 6
		  Test: divisible by 19
		    If true: throw to monkey 2
		    If false: throw to monkey 0

		Monkey 2:
		  Starting items: 79, 60, 97
		  Operation: new = old * old
		  Test: divisible by 13
		    If true: throw to monkey 1
		    If false: throw to monkey 3

		Monkey 3:
		  Starting items: 74
		  Operation: new = old + 3
		  Test: divisible by 17
		    If true: throw to monkey 0
		    If false: throw to monkey 1
	" };

	#[test]
	fn rounds() {
		let monkeys = parsing::try_monkeys_from_str(INPUT).unwrap();

		let mut after_one = monkeys.clone();
		assert_eq!(inspections(&mut after_one, 1, Relief::Divide(3)).unwrap(), [2, 4, 3, 5]);
		assert_eq!(after_one[0].items, [20, 23, 27, 26]);
		assert_eq!(after_one[1].items, [2080, 25, 167, 207, 401, 1046]);
		assert!(after_one[2].items.is_empty() && after_one[3].items.is_empty());

		assert_eq!(inspections(&mut monkeys.clone(), 20, Relief::Divide(3)).unwrap(), [101, 95, 7, 105]);
		let modulus = 23 * 19 * 13 * 17;
		assert_eq!(inspections(&mut monkeys.clone(), 20, Relief::Modulo(modulus)).unwrap(), [99, 97, 8, 103]);
		assert_eq!(inspections(&mut monkeys.clone(), 1000, Relief::Modulo(modulus)).unwrap(), [5204, 4792, 199, 5192]);
	}

	#[test]
	fn tests() {
		let operation = Operation { lhs: Operand::Old, operator: Operator::Mul, rhs: Operand::Old };
		assert_eq!(operation.apply(79), Some(6241));
		assert_eq!(Operation { rhs: Operand::Num(3), operator: Operator::Add, ..operation }.apply(74), Some(77));
		assert_eq!(operation.apply(1 << 32), None);
		assert_eq!(Operation { rhs: Operand::Num(1), operator: Operator::Add, ..operation }.apply(u64::MAX), None);

		let monkeys = parsing::try_monkeys_from_str(INPUT).unwrap();
		assert_eq!(part1_impl(monkeys.clone()).unwrap(), 10605);
		assert_eq!(part2_impl(monkeys).unwrap(), 2_713_310_158);
		assert_eq!(part1(INPUT).unwrap(), 10605);
		assert_eq!(part2(INPUT).unwrap(), 2_713_310_158);
	}

	#[test]
	fn overflow() {
		let input = INPUT.replace("old * 19", "old * 999999999999999999");
		assert!(matches!(parsing::try_monkeys_from_str(&input).map_err(Error::Monkeys).and_then(part1_impl),
			Err(Error::Overflow { round: 1, monkey: 0, item: 79 })));
		assert!(format!("{:?}", part1(&input).unwrap_err()).starts_with("Overflow"));

		// Starting items are reduced before the first inspection
		let input = INPUT.replace("79, 98", "79, 98, 18446744073709551615");
		let mut monkeys = parsing::try_monkeys_from_str(&input).unwrap();
		assert!(matches!(part1_impl(monkeys.clone()), Err(Error::Overflow { monkey: 0, .. })));
		assert!(part2_impl(monkeys.clone()).is_ok());

		for (m, divisor) in [(0, 18446744073709551557), (1, 18446744073709551533)] {
			monkeys[m].divisor = divisor;
		}
		assert!(matches!(part2_impl(monkeys), Err(Error::Modulus)));
	}
}
