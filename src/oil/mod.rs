//! The OIL tree: a small C-like intermediate language made of modules,
//! declarations, statements and expressions.
//!
//! Every declaration is owned by exactly one [`IndexVec`] (the module's type
//! declarations, globals and functions, or a function's parameters and
//! locals). Expressions refer back to declarations through [`DeclRef`]
//! indices, so the whole tree is dropped at once with its module.
//!
//! Equality between trees is structural. Generated names are an artifact of
//! serialization and are ignored by every `PartialEq` impl in here.

use crate::{index::IndexVec, naming::OilName};

pub mod id;
pub mod operator;
pub mod pretty_print;


pub use id::*;
pub use operator::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub type_declarations: IndexVec<TypeDeclId, TypeDecl>,
    pub globals: IndexVec<GlobalId, VarDecl>,
    pub functions: IndexVec<FunctionId, FunctionDefinition>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_declarations: IndexVec::new(),
            globals: IndexVec::new(),
            functions: IndexVec::new(),
        }
    }

    pub fn add_type(&mut self, ty: TypeDecl) -> TypeDeclId {
        self.type_declarations.push(ty)
    }

    pub fn add_global(&mut self, global: VarDecl) -> GlobalId {
        self.globals.push(global)
    }

    pub fn add_function(&mut self, function: FunctionDefinition) -> FunctionId {
        self.functions.push(function)
    }

    /// Looks up the declaration a reference points at. Parameter and local
    /// references need the function they appear in; without one (e.g. in a
    /// global initializer) they resolve to nothing.
    pub fn declaration<'a>(
        &'a self,
        function: Option<&'a FunctionDefinition>,
        reference: DeclRef,
    ) -> Option<Declaration<'a>> {
        match reference {
            DeclRef::Global(id) => self.globals.get(id).map(Declaration::Variable),
            DeclRef::Function(id) => self.functions.get(id).map(Declaration::Function),
            DeclRef::Parameter(id) => function?.parameters.get(id).map(Declaration::Parameter),
            DeclRef::Local(id) => function?.locals.get(id).map(Declaration::Variable),
        }
    }
}

/// Borrowed, uniform view over the four declaration kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Declaration<'a> {
    Type(&'a TypeDecl),
    Variable(&'a VarDecl),
    Parameter(&'a ParamDecl),
    Function(&'a FunctionDefinition),
}

impl<'a> Declaration<'a> {
    /// The source-level name (not the generated one)
    pub fn name(self) -> &'a str {
        match self {
            Declaration::Type(ty) => &ty.name,
            Declaration::Variable(var) => &var.name,
            Declaration::Parameter(param) => &param.name,
            Declaration::Function(function) => &function.name,
        }
    }

    pub fn oil_name(self) -> Option<OilName> {
        match self {
            Declaration::Type(ty) => ty.oil_name,
            Declaration::Variable(var) => var.oil_name,
            Declaration::Parameter(param) => param.oil_name,
            Declaration::Function(function) => function.oil_name,
        }
    }
}

/// A type, referred to by name only. Aggregate types have no structure yet.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub oil_name: Option<OilName>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oil_name: None,
        }
    }
}

impl PartialEq for TypeDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A global or local variable
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub ty: TypeDecl,
    pub initializer: Option<Expression>,
    pub oil_name: Option<OilName>,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, ty: TypeDecl) -> Self {
        Self {
            name: name.into(),
            ty,
            initializer: None,
            oil_name: None,
        }
    }

    pub fn with_initializer(mut self, initializer: Expression) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

impl PartialEq for VarDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty && self.initializer == other.initializer
    }
}

#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeDecl,
    pub oil_name: Option<OilName>,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: TypeDecl) -> Self {
        Self {
            name: name.into(),
            ty,
            oil_name: None,
        }
    }
}

impl PartialEq for ParamDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDefinition {
    pub name: String,
    pub return_type: TypeDecl,
    pub parameters: IndexVec<ParamId, ParamDecl>,
    pub is_variadic: bool,
    pub locals: IndexVec<LocalId, VarDecl>,
    pub body: Vec<Statement>,
    pub is_inline: bool,
    pub oil_name: Option<OilName>,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, return_type: TypeDecl) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: IndexVec::new(),
            is_variadic: false,
            locals: IndexVec::new(),
            body: Vec::new(),
            is_inline: false,
            oil_name: None,
        }
    }

    pub fn add_parameter(&mut self, parameter: ParamDecl) -> ParamId {
        self.parameters.push(parameter)
    }

    pub fn add_local(&mut self, local: VarDecl) -> LocalId {
        self.locals.push(local)
    }
}

impl PartialEq for FunctionDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.return_type == other.return_type
            && self.parameters == other.parameters
            && self.is_variadic == other.is_variadic
            && self.locals == other.locals
            && self.body == other.body
            && self.is_inline == other.is_inline
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Initialization of a previously declared variable
    DeclInit { decl: VarRef, init: Expression },
    Expression(Expression),
    /// The four slots are kept exactly as produced by the frontend; no loop
    /// semantics are attached to them here
    For {
        init: Vec<Statement>,
        cond: Option<Expression>,
        test: Option<Expression>,
        step: Option<Expression>,
        body: Vec<Statement>,
    },
    Return(Option<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(DeclRef),
    IntConstant(i32),
    FloatConstant(f64),
    Arithmetic {
        operator: ArithmeticOperator,
        lhs: Box<Expression>,
        /// Empty for the unary operators
        rhs: Option<Box<Expression>>,
    },
    Comparison {
        operator: ComparisonOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Assignment {
        operator: AssignmentOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(operator: ArithmeticOperator, lhs: Expression, rhs: Expression) -> Self {
        Self::Arithmetic {
            operator,
            lhs: Box::new(lhs),
            rhs: Some(Box::new(rhs)),
        }
    }

    pub fn unary(operator: ArithmeticOperator, operand: Expression) -> Self {
        Self::Arithmetic {
            operator,
            lhs: Box::new(operand),
            rhs: None,
        }
    }

    pub fn compare(operator: ComparisonOperator, lhs: Expression, rhs: Expression) -> Self {
        Self::Comparison {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn assign(operator: AssignmentOperator, lhs: Expression, rhs: Expression) -> Self {
        Self::Assignment {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}
