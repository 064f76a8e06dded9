//! Operator tables for the three operator-carrying expression kinds. The
//! strum serializations are the names stored in a container under `.op`.

use strum::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ArithmeticOperator {
    Plus, // +x
    Minus, // -x
    #[strum(serialize = "inc")]
    Increment, // ++x
    #[strum(serialize = "dec")]
    Decrement, // --x
    Add, // +
    #[strum(serialize = "sub")]
    Subtract, // -
    #[strum(serialize = "mult")]
    Multiply, // *
    #[strum(serialize = "div")]
    Divide, // /
    #[strum(serialize = "mod")]
    Modulus, // %
}

impl ArithmeticOperator {
    /// Unary forms still occupy the same record shape, they simply leave
    /// their right hand side empty
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Self::Plus | Self::Minus | Self::Increment | Self::Decrement
        )
    }

    pub fn wire_name(self) -> &'static str {
        self.into()
    }
}

impl core::fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus | Self::Add => write!(f, "+"),
            Self::Minus | Self::Subtract => write!(f, "-"),
            Self::Increment => write!(f, "++"),
            Self::Decrement => write!(f, "--"),
            Self::Multiply => write!(f, "*"),
            Self::Divide => write!(f, "/"),
            Self::Modulus => write!(f, "%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum ComparisonOperator {
    #[strum(serialize = "equal")]
    Equals, // ==
    #[strum(serialize = "notequal")]
    NotEquals, // !=
    #[strum(serialize = "lessthan")]
    LessThan, // <
    #[strum(serialize = "gtrthan")]
    GreaterThan, // >
    #[strum(serialize = "lessequal")]
    LessThanOrEqualTo, // <=
    #[strum(serialize = "gtrequal")]
    GreaterThanOrEqualTo, // >=
}

impl ComparisonOperator {
    pub fn wire_name(self) -> &'static str {
        self.into()
    }
}

impl core::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equals => write!(f, "=="),
            Self::NotEquals => write!(f, "!="),
            Self::LessThan => write!(f, "<"),
            Self::GreaterThan => write!(f, ">"),
            Self::LessThanOrEqualTo => write!(f, "<="),
            Self::GreaterThanOrEqualTo => write!(f, ">="),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum AssignmentOperator {
    #[strum(serialize = "equal")]
    Assign, // =
    #[strum(serialize = "multequal")]
    Multiply, // *=
    #[strum(serialize = "divequal")]
    Divide, // /=
    #[strum(serialize = "modequal")]
    Modulus, // %=
    #[strum(serialize = "addequal")]
    Add, // +=
    #[strum(serialize = "subequal")]
    Subtract, // -=
    #[strum(serialize = "lshiftequal")]
    ShiftLeft, // <<=
    #[strum(serialize = "rshiftequal")]
    ShiftRight, // >>=
    #[strum(serialize = "andequal")]
    BitwiseAnd, // &=
    #[strum(serialize = "xorequal")]
    BitwiseXor, // ^=
    #[strum(serialize = "orequal")]
    BitwiseOr, // |=
}

impl AssignmentOperator {
    pub fn wire_name(self) -> &'static str {
        self.into()
    }
}

impl core::fmt::Display for AssignmentOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assign => write!(f, "="),
            Self::Multiply => write!(f, "*="),
            Self::Divide => write!(f, "/="),
            Self::Modulus => write!(f, "%="),
            Self::Add => write!(f, "+="),
            Self::Subtract => write!(f, "-="),
            Self::ShiftLeft => write!(f, "<<="),
            Self::ShiftRight => write!(f, ">>="),
            Self::BitwiseAnd => write!(f, "&="),
            Self::BitwiseXor => write!(f, "^="),
            Self::BitwiseOr => write!(f, "|="),
        }
    }
}
