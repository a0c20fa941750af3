use std::fmt;

/// Number of whitespace-separated fields in an encoded record
const FIELD_COUNT: usize = 5;

/// Source location of a finding: absolute file path plus 1-based line,
/// serialized as `path:line`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub line: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// One coding-standard violation entry in the index file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationRecord {
    /// Display token for human navigation affordances (`jump_to_violation_<n>`)
    pub jump_label: String,
    /// Lookup token (`violation_<n>`), unique within an index
    pub identifier: String,
    /// Coding-standard family (e.g. "autosar")
    pub ruleset: String,
    /// Rule identifier within the ruleset
    pub rule_id: String,
    /// Where the violation was found
    pub location: Location,
}

/// Why an index line failed to decode
#[derive(Debug)]
pub enum MalformedRecord {
    /// Line did not split into exactly five whitespace-separated fields
    FieldCount(usize),
    /// Last field was not `path:line` with a single `:` and a positive line
    Location(String),
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRecord::FieldCount(found) => {
                write!(f, "expected {} fields, found {}", FIELD_COUNT, found)
            }
            MalformedRecord::Location(field) => {
                write!(f, "invalid location '{}', expected path:line", field)
            }
        }
    }
}

impl std::error::Error for MalformedRecord {}

impl ViolationRecord {
    /// Build a record for violation number `n`, deriving the jump label and
    /// identifier from the numbering convention
    pub fn new(n: u32, ruleset: &str, rule_id: &str, location: Location) -> Self {
        Self {
            jump_label: format!("jump_to_violation_{}", n),
            identifier: format!("violation_{}", n),
            ruleset: ruleset.to_string(),
            rule_id: rule_id.to_string(),
            location,
        }
    }

    /// Encode as one index line: five fields joined by single spaces.
    /// Fields are opaque tokens; callers must not embed whitespace in one.
    pub fn encode(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.jump_label, self.identifier, self.ruleset, self.rule_id, self.location
        )
    }

    /// Decode one index line
    pub fn decode(line: &str) -> Result<Self, MalformedRecord> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(MalformedRecord::FieldCount(fields.len()));
        }

        Ok(Self {
            jump_label: fields[0].to_string(),
            identifier: fields[1].to_string(),
            ruleset: fields[2].to_string(),
            rule_id: fields[3].to_string(),
            location: parse_location(fields[4])?,
        })
    }
}

fn parse_location(field: &str) -> Result<Location, MalformedRecord> {
    let malformed = || MalformedRecord::Location(field.to_string());

    let mut parts = field.split(':');
    let path = parts.next().ok_or_else(malformed)?;
    let line = parts.next().ok_or_else(malformed)?;
    if parts.next().is_some() || path.is_empty() {
        return Err(malformed());
    }

    let line: u32 = line.parse().map_err(|_| malformed())?;
    if line == 0 {
        return Err(malformed());
    }

    Ok(Location {
        path: path.to_string(),
        line,
    })
}
