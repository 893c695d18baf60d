use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use super::location::Location;
use super::statement::{Statement, StatementKind};

/// Outcome of evaluating one [`Statement`] node, with the evidence behind it.
///
/// Borrows the statement it was produced from. `children` holds only the
/// child results actually visited, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[must_use]
pub struct MatchResult<'a> {
    success: bool,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_label"))]
    statement: &'a Statement,
    locations: BTreeSet<Location>,
    children: Vec<MatchResult<'a>>,
}

impl<'a> MatchResult<'a> {
    pub(crate) fn new(
        success: bool,
        statement: &'a Statement,
        locations: BTreeSet<Location>,
        children: Vec<MatchResult<'a>>,
    ) -> Self {
        Self {
            success,
            statement,
            locations,
            children,
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// The statement this result was produced from.
    #[must_use]
    pub fn statement(&self) -> &'a Statement {
        self.statement
    }

    /// Evidence for `Leaf` and `Range` nodes. Always empty on composite nodes.
    #[must_use]
    pub fn locations(&self) -> &BTreeSet<Location> {
        &self.locations
    }

    #[must_use]
    pub fn children(&self) -> &[MatchResult<'a>] {
        &self.children
    }

    /// Locations that contributed to this result being satisfied.
    ///
    /// Walks successful nodes only. Negations contribute nothing, since a
    /// satisfied `not` is backed by absence rather than by a location.
    #[must_use]
    pub fn matched_locations(&self) -> BTreeSet<Location> {
        let mut out = BTreeSet::new();
        self.collect_matched(&mut out);
        out
    }

    fn collect_matched(&self, out: &mut BTreeSet<Location>) {
        if !self.success {
            return;
        }
        match self.statement.kind() {
            StatementKind::Leaf(_) | StatementKind::Range { .. } => {
                out.extend(self.locations.iter().copied());
            }
            StatementKind::Not(_) => {}
            StatementKind::And(_) | StatementKind::Or(_) | StatementKind::Some { .. } => {
                for child in &self.children {
                    child.collect_matched(out);
                }
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let mark = if self.success { '✓' } else { '✗' };
        write!(f, "{:indent$}{mark} {}", "", self.statement.label())?;
        if let Some(description) = self.statement.description() {
            write!(f, " = {description}")?;
        }
        if !self.locations.is_empty() {
            let locs: Vec<String> = self.locations.iter().map(ToString::to_string).collect();
            write!(f, " @ {}", locs.join(", "))?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, indent + 2)?;
        }
        Ok(())
    }
}

impl fmt::Display for MatchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(feature = "serde")]
fn serialize_label<S: Serializer>(statement: &&Statement, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&statement.label())
}
