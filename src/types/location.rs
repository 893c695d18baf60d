use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where in the analyzed program a feature was observed.
///
/// The engine only compares and counts locations; the variants exist so a
/// reporter can render them meaningfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Location {
    /// Absolute virtual address.
    Absolute(u64),
    /// Address relative to the image base.
    Relative(u64),
    /// Offset into the raw file.
    FileOffset(u64),
    /// A call observed in a dynamic trace.
    Call { thread: u64, id: u64 },
    /// Observed without a specific location, e.g. a file-wide property.
    None,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Absolute(va) => write!(f, "{va:#x}"),
            Location::Relative(rva) => write!(f, "base+{rva:#x}"),
            Location::FileOffset(off) => write!(f, "file+{off:#x}"),
            Location::Call { thread, id } => write!(f, "thread {thread} call {id}"),
            Location::None => write!(f, "global"),
        }
    }
}
