use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An observable trait of analyzed code, used as an evidence lookup key.
///
/// Two features are equal only when both the tag and the payload match:
/// `Number(1)` and `Offset(1)` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum Feature {
    /// An immediate constant operand.
    Number(i64),
    /// A structure offset operand.
    Offset(i64),
    /// An exact string literal.
    String(String),
    /// A fragment of a string literal.
    Substring(String),
    /// A call to a named API.
    Api(String),
    /// An instruction mnemonic.
    Mnemonic(String),
    /// A named structural property (e.g. `nzxor`, `loop`).
    Characteristic(String),
    /// A raw byte sequence.
    Bytes(Vec<u8>),
    /// An imported symbol.
    Import(String),
    /// An exported symbol.
    Export(String),
    /// A section name.
    Section(String),
}

impl Feature {
    /// The feature's type tag, as it appears in rendered output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Number(_) => "number",
            Feature::Offset(_) => "offset",
            Feature::String(_) => "string",
            Feature::Substring(_) => "substring",
            Feature::Api(_) => "api",
            Feature::Mnemonic(_) => "mnemonic",
            Feature::Characteristic(_) => "characteristic",
            Feature::Bytes(_) => "bytes",
            Feature::Import(_) => "import",
            Feature::Export(_) => "export",
            Feature::Section(_) => "section",
        }
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, v: i64) -> fmt::Result {
    if v < 0 {
        write!(f, "-{:#x}", v.unsigned_abs())
    } else {
        write!(f, "{v:#x}")
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        match self {
            Feature::Number(v) | Feature::Offset(v) => write_hex(f, *v)?,
            Feature::String(s) => write!(f, "\"{s}\"")?,
            Feature::Bytes(bytes) => {
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{b:02X}")?;
                }
            }
            Feature::Substring(s)
            | Feature::Api(s)
            | Feature::Mnemonic(s)
            | Feature::Characteristic(s)
            | Feature::Import(s)
            | Feature::Export(s)
            | Feature::Section(s) => write!(f, "{s}")?,
        }
        write!(f, ")")
    }
}

impl From<i64> for Feature {
    fn from(v: i64) -> Self {
        Feature::Number(v)
    }
}

impl From<i32> for Feature {
    fn from(v: i32) -> Self {
        Feature::Number(i64::from(v))
    }
}
