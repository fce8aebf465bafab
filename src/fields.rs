//! Canonical output fields and the ordered column-name rules that feed them.
//!
//! Rules are evaluated top to bottom and the first pattern that matches the
//! start of a column name wins. Columns that no rule claims are dropped.

use std::{fmt, sync::LazyLock};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    FirstName,
    LastName,
    BusinessName,
    Phone,
    State,
    Zip,
    Email,
}

impl CanonicalField {
    /// Output column order.
    pub const ALL: [CanonicalField; 7] = [
        CanonicalField::FirstName,
        CanonicalField::LastName,
        CanonicalField::BusinessName,
        CanonicalField::Phone,
        CanonicalField::State,
        CanonicalField::Zip,
        CanonicalField::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::FirstName => "first_name",
            CanonicalField::LastName => "last_name",
            CanonicalField::BusinessName => "business_name",
            CanonicalField::Phone => "phone",
            CanonicalField::State => "state",
            CanonicalField::Zip => "zip",
            CanonicalField::Email => "email",
        }
    }

    pub fn headers() -> Vec<String> {
        Self::ALL.iter().map(|f| f.as_str().to_string()).collect()
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a matched column feeds in the canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Field(CanonicalField),
    /// A full-name column split into `first_name` and `last_name`.
    NamePair,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Field(field) => write!(f, "{field}"),
            Target::NamePair => f.write_str("first_name+last_name"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    target: Target,
}

impl PatternRule {
    /// Builds a rule from alternative phrases. Spaces inside a phrase match any
    /// amount of whitespace, including none.
    pub fn new(phrases: &[&str], target: Target) -> Result<Self, regex::Error> {
        let alternatives = phrases
            .iter()
            .map(|phrase| {
                phrase
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s*")
            })
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!("^(?:{alternatives})"))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern, target })
    }

    pub fn matches(&self, column: &str) -> bool {
        self.pattern.is_match(column)
    }

    pub fn target(&self) -> Target {
        self.target
    }
}

const RULE_TABLE: &[(&[&str], Target)] = &[
    (
        &[
            "full name",
            "contact name",
            "labeler name",
            "legal contact name",
            "tc name",
            "pi name",
            "ri poc name",
        ],
        Target::NamePair,
    ),
    (&["first name"], Target::Field(CanonicalField::FirstName)),
    (&["last name"], Target::Field(CanonicalField::LastName)),
    (
        &["company name", "business name"],
        Target::Field(CanonicalField::BusinessName),
    ),
    (
        &[
            "mobile phone",
            "cell phone",
            "smartphone",
            "cellular",
            "phone",
            "contact phone",
            "business phone",
            "company phone",
            "legal phone",
            "invoice phone",
            "tc phone",
            "pi phone",
            "ri poc phone",
        ],
        Target::Field(CanonicalField::Phone),
    ),
    (
        &[
            "state",
            "business state",
            "legal state",
            "invoice state",
            "tc state",
            "mailing state",
            "company state",
        ],
        Target::Field(CanonicalField::State),
    ),
    (
        &[
            "zip",
            "zipcode",
            "postal code",
            "business zip",
            "legal zip",
            "invoice zip",
            "tc zip",
            "mailing zip",
        ],
        Target::Field(CanonicalField::Zip),
    ),
    (
        &["email", "email address", "contact email", "pi email"],
        Target::Field(CanonicalField::Email),
    ),
];

#[derive(Debug, Clone)]
pub struct FieldMatcher {
    rules: Vec<PatternRule>,
}

impl FieldMatcher {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// The fixed lead-export rule set.
    pub fn canonical() -> Result<Self, regex::Error> {
        let rules = RULE_TABLE
            .iter()
            .map(|(phrases, target)| PatternRule::new(phrases, *target))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    pub fn match_column(&self, column: &str) -> Option<Target> {
        let column = column.trim_start();
        self.rules
            .iter()
            .find(|rule| rule.matches(column))
            .map(PatternRule::target)
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }
}

static CANONICAL_MATCHER: LazyLock<FieldMatcher> = LazyLock::new(|| {
    FieldMatcher::canonical().expect("canonical column patterns are valid regular expressions")
});

/// Shared matcher built from the fixed rule set.
pub fn canonical_matcher() -> &'static FieldMatcher {
    &CANONICAL_MATCHER
}

/// Convenience wrapper over [`canonical_matcher`].
pub fn match_column(column: &str) -> Option<Target> {
    canonical_matcher().match_column(column)
}
