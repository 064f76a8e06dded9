use strum::{EnumIter, EnumString, IntoStaticStr};

/// Value of a statement record's `.type` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum StatementTag {
    #[strum(serialize = "decl-init")]
    DeclInit,
    #[strum(serialize = "expr-stmt")]
    Expression,
    #[strum(serialize = "for-stmt")]
    For,
    #[strum(serialize = "ret-stmt")]
    Return,
}

impl StatementTag {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Value of an expression record's `.type` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum ExpressionTag {
    #[strum(serialize = "ident-expr")]
    Identifier,
    #[strum(serialize = "int-const")]
    IntConstant,
    #[strum(serialize = "float-const")]
    FloatConstant,
    #[strum(serialize = "arith-expr")]
    Arithmetic,
    #[strum(serialize = "comp-expr")]
    Comparison,
    #[strum(serialize = "assign-expr")]
    Assignment,
}

impl ExpressionTag {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
