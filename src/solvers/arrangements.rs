//! Counting the arrangements of a damaged-spring record.
//!
//! A record is a row of springs, each operational (`.`), damaged (`#`) or
//! unknown (`?`), followed by the sizes of the contiguous damaged groups in
//! order, e.g. `???.### 1,1,3`. The count is the number of ways to resolve
//! every unknown so that the damaged runs match the group list exactly.
//!
//! ## Recurrence
//!
//! ```text
//!   count(springs, groups)
//!     groups empty        → 1 if no '#' remains, else 0
//!     springs empty       → 0
//!     '.' s..             → count(s.., groups)
//!     '#' s..             → count(after group + separator, groups[1..])
//!                           if groups[0] fits here, else 0
//!     '?' s..             → count('.' s.., groups) + count('#' s.., groups)
//! ```
//!
//! Unfolded records branch exponentially, but only `O(len × groups)`
//! distinct `(springs suffix, groups suffix)` pairs exist. The counter keeps
//! them in a [`Memoized`] cache shared by every row it counts.
//!
//! ## Example
//!
//! ```
//! use memokit::solvers::arrangements::{count_arrangements, parse_line};
//!
//! let row = parse_line("?###???????? 3,2,1").unwrap();
//! assert_eq!(count_arrangements(&row), 10);
//! assert_eq!(count_arrangements(&row.unfold(5)), 506_250);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::builder::MemoBuilder;
use crate::error::ParseError;
use crate::memo::{MemoStats, Memoized};

/// Condition of a single spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spring {
    Operational,
    Damaged,
    Unknown,
}

impl Spring {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Spring::Operational),
            '#' => Some(Spring::Damaged),
            '?' => Some(Spring::Unknown),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Spring::Operational => '.',
            Spring::Damaged => '#',
            Spring::Unknown => '?',
        }
    }
}

/// One condition record: springs plus damaged-group sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    springs: Vec<Spring>,
    groups: Vec<usize>,
}

impl Row {
    pub fn new(springs: Vec<Spring>, groups: Vec<usize>) -> Self {
        Self { springs, groups }
    }

    /// Parses `"<springs> <g1>,<g2>,..."`.
    ///
    /// Errors carry line `0`; [`total_arrangements`] attaches line numbers.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut fields = line.split_whitespace();
        let (Some(record), Some(sizes), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseError::new(
                0,
                format!("expected `<springs> <groups>`, got {line:?}"),
            ));
        };

        let springs = record
            .chars()
            .map(|c| {
                Spring::from_char(c)
                    .ok_or_else(|| ParseError::new(0, format!("invalid spring {c:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let groups = sizes
            .split(',')
            .map(|size| match size.parse::<usize>() {
                Ok(0) => Err(ParseError::new(0, "group sizes must be positive")),
                Ok(n) => Ok(n),
                Err(err) => Err(ParseError::new(
                    0,
                    format!("invalid group size {size:?}: {err}"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { springs, groups })
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn groups(&self) -> &[usize] {
        &self.groups
    }

    /// Repeats the record `copies` times joined by `?`, and the group list
    /// `copies` times. `unfold(1)` is the identity; `unfold(0)` is empty.
    pub fn unfold(&self, copies: usize) -> Self {
        let mut springs = Vec::with_capacity((self.springs.len() + 1) * copies);
        for copy in 0..copies {
            if copy > 0 {
                springs.push(Spring::Unknown);
            }
            springs.extend_from_slice(&self.springs);
        }
        Self {
            springs,
            groups: self.groups.repeat(copies),
        }
    }
}

impl FromStr for Row {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spring in &self.springs {
            write!(f, "{}", spring.as_char())?;
        }
        f.write_str(" ")?;
        for (i, size) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{size}")?;
        }
        Ok(())
    }
}

type SubProblem = (Vec<Spring>, Vec<usize>);

/// Arrangement counter with a sub-problem cache shared across rows.
pub struct ArrangementCounter {
    count: Memoized<SubProblem, SubProblem, u64>,
}

impl ArrangementCounter {
    /// Creates a counter whose cache is registered as `"arrangements"`.
    pub fn new() -> Self {
        Self::with_builder(MemoBuilder::new().name("arrangements"))
    }

    /// Creates a counter whose cache is configured by `builder`.
    pub fn with_builder(builder: MemoBuilder) -> Self {
        Self {
            count: builder.build_recursive(|sub: &SubProblem| sub.clone(), count_sub_problem),
        }
    }

    pub fn count(&self, row: &Row) -> u64 {
        self.count.call((row.springs.clone(), row.groups.clone()))
    }

    /// Statistics of the shared sub-problem cache.
    pub fn stats(&self) -> MemoStats {
        self.count.stats()
    }
}

impl Default for ArrangementCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArrangementCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrangementCounter")
            .field("cache", &self.count.cache())
            .finish()
    }
}

fn count_sub_problem(
    count: &Memoized<SubProblem, SubProblem, u64>,
    (springs, groups): SubProblem,
) -> u64 {
    let Some((&size, remaining_groups)) = groups.split_first() else {
        return u64::from(!springs.contains(&Spring::Damaged));
    };
    match springs.first().copied() {
        None => 0,
        Some(Spring::Operational) => count.call((springs[1..].to_vec(), groups)),
        Some(Spring::Damaged) => {
            if !group_fits(&springs, size) {
                return 0;
            }
            // Skip the group and the separator after it, if any.
            let rest = springs.get(size + 1..).unwrap_or_default();
            count.call((rest.to_vec(), remaining_groups.to_vec()))
        },
        Some(Spring::Unknown) => {
            let as_operational = count.call((springs[1..].to_vec(), groups.clone()));
            let mut as_damaged = springs;
            as_damaged[0] = Spring::Damaged;
            as_operational + count.call((as_damaged, groups))
        },
    }
}

// A damaged group of `size` can start at springs[0] only if the next `size`
// springs can all be damaged and the one after them can be operational.
fn group_fits(springs: &[Spring], size: usize) -> bool {
    size <= springs.len()
        && !springs[..size].contains(&Spring::Operational)
        && springs.get(size) != Some(&Spring::Damaged)
}

/// Counts the arrangements of a single row with a fresh, unregistered cache.
pub fn count_arrangements(row: &Row) -> u64 {
    ArrangementCounter::with_builder(MemoBuilder::new().unregistered()).count(row)
}

/// Parses one `"<springs> <groups>"` line.
pub fn parse_line(line: &str) -> Result<Row, ParseError> {
    Row::parse(line)
}

/// Sums the arrangement counts of every non-blank line of `input`, each
/// unfolded `copies` times.
pub fn total_arrangements(input: &str, copies: usize) -> Result<u64, ParseError> {
    let counter = ArrangementCounter::new();
    let mut total = 0;
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = Row::parse(line).map_err(|err| ParseError::new(index + 1, err.message()))?;
        total += counter.count(&row.unfold(copies));
    }
    tracing::debug!(total, copies, cache = %counter.stats(), "counted arrangements");
    Ok(total)
}
