use serde::Serialize;

/// Core type system for HumanScript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Type {
    /// 32-bit integer (`number`)
    Number,

    /// 64-bit integer (`lnumber`)
    LNumber,

    /// String (`text`)
    Text,

    /// Boolean (`logic`)
    Logic,

    /// Double-precision float (`riel`)
    Riel,

    /// No value
    Void,

    /// Not yet analyzed
    #[default]
    Unknown,
}

impl Type {
    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Number | Type::LNumber | Type::Riel)
    }

    /// True for every type a value can actually have.
    pub fn is_value(self) -> bool {
        !matches!(self, Type::Void | Type::Unknown)
    }

    /// Rank used for numeric widening: `number` < `lnumber` < `riel`.
    pub fn numeric_rank(self) -> Option<u8> {
        match self {
            Type::Number => Some(0),
            Type::LNumber => Some(1),
            Type::Riel => Some(2),
            _ => None,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Number => write!(f, "number"),
            Type::LNumber => write!(f, "lnumber"),
            Type::Text => write!(f, "text"),
            Type::Logic => write!(f, "logic"),
            Type::Riel => write!(f, "riel"),
            Type::Void => write!(f, "void"),
            Type::Unknown => write!(f, "unknown"),
        }
    }
}
