//! Benchmark scenario files.
//!
//! A scenario file lists one agent per line, optionally preceded by a
//! `version <v>` header:
//!
//! ```text
//! version 1
//! <bucket> <map> <width> <height> <start x> <start y> <goal x> <goal y> <optimal length>
//! ```
//!
//! Version 0 files omit the map width and height columns. Files without a
//! header are version 0. `x` is the column and `y` the row.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use octile_core::Agent;

/// Errors produced while reading a scenario file.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported scenario version `{0}`, expected 0 or 1")]
    UnsupportedVersion(String),
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Scenario file format revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Version {
    #[default]
    V0,
    V1,
}

impl Version {
    fn parse(token: &str) -> Result<Self, ScenarioError> {
        match token.parse::<f64>() {
            Ok(v) if v == 0.0 => Ok(Self::V0),
            Ok(v) if v == 1.0 => Ok(Self::V1),
            _ => Err(ScenarioError::UnsupportedVersion(token.to_string())),
        }
    }

    const fn field_count(self) -> usize {
        match self {
            Self::V0 => 7,
            Self::V1 => 9,
        }
    }
}

/// One benchmark problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub bucket: usize,
    pub map_name: String,
    /// Map (width, height) as recorded in the file; version 1 only.
    pub map_size: Option<(usize, usize)>,
    pub agent: Agent,
    pub optimal_length: f64,
}

/// Every scenario of a file, grouped by bucket.
#[derive(Debug, Clone, Default)]
pub struct ScenarioSet {
    version: Version,
    buckets: BTreeMap<usize, Vec<Scenario>>,
}

impl ScenarioSet {
    /// Parse a scenario file. Blank lines are skipped; errors carry the
    /// 1-based line number.
    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .peekable();

        let mut version = Version::V0;
        if let Some(&(_, first)) = lines.peek() {
            let mut tokens = first.split_whitespace();
            if tokens.next() == Some("version") {
                version = Version::parse(tokens.next().unwrap_or_default())?;
                lines.next();
            }
        }

        let mut set = Self {
            version,
            buckets: BTreeMap::new(),
        };
        for (line, text) in lines {
            set.push(parse_row(line, text, version)?);
        }
        debug!(
            "parsed {} scenarios in {} buckets ({:?})",
            set.len(),
            set.buckets.len(),
            version
        );
        Ok(set)
    }

    /// Read and [`parse`](Self::parse) a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn push(&mut self, scenario: Scenario) {
        self.buckets.entry(scenario.bucket).or_default().push(scenario);
    }

    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Scenarios keyed by bucket number. Only buckets that occur in the
    /// file are present.
    #[inline]
    pub fn buckets(&self) -> &BTreeMap<usize, Vec<Scenario>> {
        &self.buckets
    }

    /// All scenarios, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.buckets.values().flatten()
    }

    /// Number of scenarios across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_row(line: usize, text: &str, version: Version) -> Result<Scenario, ScenarioError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != version.field_count() {
        return Err(ScenarioError::FieldCount {
            line,
            expected: version.field_count(),
            found: fields.len(),
        });
    }

    let field = |i: usize, name: &'static str| -> Result<i64, ScenarioError> {
        fields[i].parse().map_err(|_| ScenarioError::InvalidField {
            line,
            field: name,
            value: fields[i].to_string(),
        })
    };
    let unsigned = |i: usize, name: &'static str| -> Result<usize, ScenarioError> {
        usize::try_from(field(i, name)?).map_err(|_| ScenarioError::InvalidField {
            line,
            field: name,
            value: fields[i].to_string(),
        })
    };
    let cell = |i: usize, name: &'static str| -> Result<i32, ScenarioError> {
        i32::try_from(field(i, name)?).map_err(|_| ScenarioError::InvalidField {
            line,
            field: name,
            value: fields[i].to_string(),
        })
    };

    let bucket = unsigned(0, "bucket")?;
    let (map_size, first) = match version {
        Version::V0 => (None, 2),
        Version::V1 => (Some((unsigned(2, "width")?, unsigned(3, "height")?)), 4),
    };
    let start_x = cell(first, "start x")?;
    let start_y = cell(first + 1, "start y")?;
    let goal_x = cell(first + 2, "goal x")?;
    let goal_y = cell(first + 3, "goal y")?;
    let optimal = fields[first + 4];
    let optimal_length = optimal
        .parse::<f64>()
        .map_err(|_| ScenarioError::InvalidField {
            line,
            field: "optimal length",
            value: optimal.to_string(),
        })?;

    Ok(Scenario {
        bucket,
        map_name: fields[1].to_string(),
        map_size,
        agent: Agent::from_cells(start_y, start_x, goal_y, goal_x),
        optimal_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use octile_core::Coordinate;

    const V1: &str = "\
version 1
0\tarena.map\t49\t49\t1\t11\t1\t12\t1
0\tarena.map\t49\t49\t1\t13\t4\t12\t3.41421356
3\tarena.map\t49\t49\t7\t2\t30\t40\t45.5
";

    #[test]
    fn parse_version_one() {
        let set = ScenarioSet::parse(V1).unwrap();
        assert_eq!(set.version(), Version::V1);
        assert_eq!(set.len(), 3);
        assert_eq!(set.buckets().len(), 2);
        assert_eq!(set.buckets()[&0].len(), 2);
        assert!(!set.buckets().contains_key(&1));

        let s = &set.buckets()[&3][0];
        assert_eq!(s.map_name, "arena.map");
        assert_eq!(s.map_size, Some((49, 49)));
        assert_eq!(s.agent.start(), Coordinate::new(2, 7));
        assert_eq!(s.agent.goal(), Coordinate::new(40, 30));
        assert_eq!(s.optimal_length, 45.5);
    }

    #[test]
    fn missing_header_means_version_zero() {
        let set = ScenarioSet::parse("1 maze.map 0 0 3 4 5\n\n2 maze.map 1 1 2 2 1.0\n").unwrap();
        assert_eq!(set.version(), Version::V0);
        let all: Vec<_> = set.iter().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].map_size, None);
        assert_eq!(all[0].agent, Agent::from_cells(0, 0, 4, 3));
        assert_eq!(all[1].bucket, 2);
    }

    #[test]
    fn explicit_version_zero() {
        let set = ScenarioSet::parse("version 0.0\n0 m 1 2 3 4 5\n").unwrap();
        assert_eq!(set.version(), Version::V0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            ScenarioSet::parse("version 2\n"),
            Err(ScenarioError::UnsupportedVersion(v)) if v == "2"
        ));
        assert!(matches!(
            ScenarioSet::parse("version\n"),
            Err(ScenarioError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            ScenarioSet::parse("version 1\n0 m 4 4 1 1 2 2\n"),
            Err(ScenarioError::FieldCount { line: 2, expected: 9, found: 8 })
        ));
        assert!(matches!(
            ScenarioSet::parse("0 m 1 x 3 4 5\n"),
            Err(ScenarioError::InvalidField { line: 1, field: "start y", .. })
        ));
        assert!(matches!(
            ScenarioSet::parse("-1 m 1 2 3 4 5\n"),
            Err(ScenarioError::InvalidField { field: "bucket", .. })
        ));
        assert!(matches!(
            ScenarioSet::parse("0 m 1 2 3 4 far\n"),
            Err(ScenarioError::InvalidField { field: "optimal length", .. })
        ));
    }

    #[test]
    fn sparse_bucket_numbers() {
        let set = ScenarioSet::parse("4000000000 m 1 2 3 4 5\n7 m 0 0 1 1 1\n").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.buckets().keys().copied().collect::<Vec<_>>(), [7, 4_000_000_000]);
        assert_eq!(set.iter().next().map(|s| s.bucket), Some(7));
    }

    #[test]
    fn empty_file_is_empty_set() {
        let set = ScenarioSet::parse("").unwrap();
        assert!(set.is_empty());
        assert!(matches!(
            ScenarioSet::load("/no/such/file.scen"),
            Err(ScenarioError::Io(_))
        ));
    }
}
