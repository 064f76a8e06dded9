use crate::index::simple_index;

simple_index! {
    /// Position of a type declaration within its module
    pub struct TypeDeclId;
}

simple_index! {
    /// Position of a global variable within its module
    pub struct GlobalId;
}

simple_index! {
    /// Position of a function definition within its module
    pub struct FunctionId;
}

simple_index! {
    /// Position of a parameter within its function. Only meaningful together
    /// with the function that owns it.
    pub struct ParamId;
}

simple_index! {
    /// Position of a local variable within its function. Only meaningful
    /// together with the function that owns it.
    pub struct LocalId;
}

/// A non-owning reference from an expression to the declaration it names.
/// Parameter and local references are relative to the enclosing function.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DeclRef {
    Global(GlobalId),
    Function(FunctionId),
    Parameter(ParamId),
    Local(LocalId),
}

/// The subset of references that can name a variable being initialized
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum VarRef {
    Global(GlobalId),
    Local(LocalId),
}

impl From<VarRef> for DeclRef {
    fn from(value: VarRef) -> Self {
        match value {
            VarRef::Global(id) => DeclRef::Global(id),
            VarRef::Local(id) => DeclRef::Local(id),
        }
    }
}

impl TryFrom<DeclRef> for VarRef {
    type Error = DeclRef;

    fn try_from(value: DeclRef) -> Result<Self, Self::Error> {
        match value {
            DeclRef::Global(id) => Ok(VarRef::Global(id)),
            DeclRef::Local(id) => Ok(VarRef::Local(id)),
            DeclRef::Function(_) | DeclRef::Parameter(_) => Err(value),
        }
    }
}
