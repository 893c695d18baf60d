use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::StatementError;
use super::feature::Feature;
use super::feature_table::FeatureTable;
use super::match_result::MatchResult;

/// Deepest statement tree that can be constructed. Evaluation recurses once
/// per level, so this bounds stack usage for adversarial rules.
pub const MAX_DEPTH: usize = 512;

/// The closed set of condition-tree node shapes.
///
/// A `StatementKind` is inert until it passes through [`Statement::new`],
/// which is the only way to obtain an evaluable node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatementKind {
    /// Satisfied when the feature has at least one location.
    Leaf(Feature),
    /// Satisfied when every child is satisfied. Never empty.
    And(Vec<Statement>),
    /// Satisfied when any child is satisfied. Never empty.
    Or(Vec<Statement>),
    /// Satisfied when the child is not.
    Not(Box<Statement>),
    /// Satisfied when at least `threshold` children are satisfied.
    Some {
        threshold: usize,
        children: Vec<Statement>,
    },
    /// Satisfied when the feature's location count lies in `min..=max`.
    /// `max: None` is unbounded.
    Range {
        feature: Feature,
        min: u64,
        max: Option<u64>,
    },
}

impl StatementKind {
    /// Ordered child statements. Empty for `Leaf` and `Range`.
    #[must_use]
    pub fn children(&self) -> &[Statement] {
        match self {
            StatementKind::And(children)
            | StatementKind::Or(children)
            | StatementKind::Some { children, .. } => children,
            StatementKind::Not(child) => std::slice::from_ref(&**child),
            StatementKind::Leaf(_) | StatementKind::Range { .. } => &[],
        }
    }

    /// Lower-case name of the node shape.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StatementKind::Leaf(_) => "feature",
            StatementKind::And(_) => "and",
            StatementKind::Or(_) => "or",
            StatementKind::Not(_) => "not",
            StatementKind::Some { .. } => "some",
            StatementKind::Range { .. } => "range",
        }
    }
}

/// A validated, immutable node of a rule's condition tree.
///
/// # Example
///
/// ```
/// use capmatch::{Feature, FeatureTable, Location, Statement};
///
/// let rule = Statement::or(vec![
///     Statement::leaf(Feature::Api("CreateFileA".into())),
///     Statement::leaf(Feature::Api("CreateFileW".into())),
/// ])
/// .unwrap();
///
/// let table = FeatureTable::new().set(Feature::Api("CreateFileW".into()), [Location::Absolute(0x401000)]);
/// assert!(rule.evaluate(&table).success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawStatement"))]
pub struct Statement {
    kind: StatementKind,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    description: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    depth: usize,
}

impl Statement {
    /// Validate `kind` and wrap it as a statement.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError`] if an `And`/`Or` has no children, a `Range`
    /// has `min > max`, or the resulting tree is deeper than [`MAX_DEPTH`].
    pub fn new(kind: StatementKind) -> Result<Self, StatementError> {
        match &kind {
            StatementKind::And(children) | StatementKind::Or(children) if children.is_empty() => {
                return Err(StatementError::EmptyChildren { kind: kind.name() });
            }
            StatementKind::Range {
                min,
                max: Some(max),
                ..
            } if max < min => {
                return Err(StatementError::InvalidRange {
                    min: *min,
                    max: *max,
                });
            }
            _ => {}
        }

        let depth = 1 + kind
            .children()
            .iter()
            .map(Statement::depth)
            .max()
            .unwrap_or(0);
        if depth > MAX_DEPTH {
            return Err(StatementError::TooDeep {
                depth,
                limit: MAX_DEPTH,
            });
        }

        Ok(Self {
            kind,
            description: None,
            depth,
        })
    }

    #[must_use]
    pub fn leaf(feature: impl Into<Feature>) -> Self {
        Self {
            kind: StatementKind::Leaf(feature.into()),
            description: None,
            depth: 1,
        }
    }

    /// # Errors
    ///
    /// Fails on an empty `children` or when the tree would exceed [`MAX_DEPTH`].
    pub fn and(children: Vec<Statement>) -> Result<Self, StatementError> {
        Self::new(StatementKind::And(children))
    }

    /// # Errors
    ///
    /// Fails on an empty `children` or when the tree would exceed [`MAX_DEPTH`].
    pub fn or(children: Vec<Statement>) -> Result<Self, StatementError> {
        Self::new(StatementKind::Or(children))
    }

    /// # Errors
    ///
    /// Fails only when the tree would exceed [`MAX_DEPTH`].
    pub fn negate(child: Statement) -> Result<Self, StatementError> {
        Self::new(StatementKind::Not(Box::new(child)))
    }

    /// At least `threshold` of `children`. A threshold of zero is always
    /// satisfied; one larger than `children.len()` never is.
    ///
    /// # Errors
    ///
    /// Fails only when the tree would exceed [`MAX_DEPTH`].
    pub fn some(threshold: usize, children: Vec<Statement>) -> Result<Self, StatementError> {
        Self::new(StatementKind::Some {
            threshold,
            children,
        })
    }

    /// Location count of `feature` within `min..=max` (`max: None` is unbounded).
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::InvalidRange`] when `max < min`.
    pub fn range(
        feature: impl Into<Feature>,
        min: u64,
        max: Option<u64>,
    ) -> Result<Self, StatementError> {
        Self::new(StatementKind::Range {
            feature: feature.into(),
            min,
            max,
        })
    }

    /// Range with default bounds (`0..=inf`), satisfied by any table.
    #[must_use]
    pub fn count(feature: impl Into<Feature>) -> Self {
        Self {
            kind: StatementKind::Range {
                feature: feature.into(),
                min: 0,
                max: None,
            },
            description: None,
            depth: 1,
        }
    }

    /// Attach a human-readable annotation, shown when rendering.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> &StatementKind {
        &self.kind
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of levels in this tree; a lone leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn children(&self) -> &[Statement] {
        self.kind.children()
    }

    /// Every feature referenced by the tree, depth-first in declaration order.
    #[must_use]
    pub fn features(&self) -> Vec<&Feature> {
        let mut out = Vec::new();
        collect_features(self, &mut out);
        out
    }

    /// One-line label for this node alone, without its children.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.kind {
            StatementKind::Leaf(feature) => feature.to_string(),
            StatementKind::Some { threshold, .. } => format!("{threshold} or more"),
            StatementKind::Range { feature, min, max } => match max {
                Some(max) => format!("range({feature}, min={min}, max={max})"),
                None => format!("range({feature}, min={min}, max=inf)"),
            },
            kind => kind.name().to_owned(),
        }
    }

    /// Evaluate against `table`, stopping `And`/`Or` early once decided.
    pub fn evaluate<'a>(&'a self, table: &FeatureTable) -> MatchResult<'a> {
        crate::evaluate::evaluate(self, table, true)
    }

    /// Evaluate against `table`. With `short_circuit` off every child of
    /// `And`/`Or` is visited and captured.
    pub fn evaluate_with<'a>(&'a self, table: &FeatureTable, short_circuit: bool) -> MatchResult<'a> {
        crate::evaluate::evaluate(self, table, short_circuit)
    }
}

fn collect_features<'a>(statement: &'a Statement, out: &mut Vec<&'a Feature>) {
    match &statement.kind {
        StatementKind::Leaf(feature) | StatementKind::Range { feature, .. } => out.push(feature),
        kind => {
            for child in kind.children() {
                collect_features(child, out);
            }
        }
    }
}

impl From<Feature> for Statement {
    fn from(feature: Feature) -> Self {
        Statement::leaf(feature)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatementKind::Leaf(_) | StatementKind::Range { .. } => {
                write!(f, "{}", self.label())?;
            }
            kind => {
                write!(f, "{}(", self.label())?;
                for (i, child) in kind.children().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")?;
            }
        }
        if let Some(description) = &self.description {
            write!(f, " = {description}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawStatement {
    kind: StatementKind,
    #[serde(default)]
    description: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawStatement> for Statement {
    type Error = StatementError;

    fn try_from(raw: RawStatement) -> Result<Self, Self::Error> {
        let statement = Statement::new(raw.kind)?;
        Ok(match raw.description {
            Some(description) => statement.with_description(description),
            None => statement,
        })
    }
}
