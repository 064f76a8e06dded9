//! Generated names. Before a module is written every declaration gets a
//! short identifier made of a class prefix and its position in the owning
//! list (`t0`, `g3`, `f1`, `p0`, `l2`). The writer uses these names as path
//! segments and references; the reader routes lookups on the prefix.

use crate::oil::{FunctionDefinition, Module};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameClass {
    Type,
    Global,
    Function,
    Parameter,
    Local,
}

impl NameClass {
    pub fn prefix(self) -> char {
        match self {
            NameClass::Type => 't',
            NameClass::Global => 'g',
            NameClass::Function => 'f',
            NameClass::Parameter => 'p',
            NameClass::Local => 'l',
        }
    }

    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            't' => Some(NameClass::Type),
            'g' => Some(NameClass::Global),
            'f' => Some(NameClass::Function),
            'p' => Some(NameClass::Parameter),
            'l' => Some(NameClass::Local),
            _ => None,
        }
    }

    /// Classes whose names live in the module-wide scope. Parameters and
    /// locals live in the per-function scope.
    pub fn is_module_scoped(self) -> bool {
        matches!(self, NameClass::Type | NameClass::Global | NameClass::Function)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OilName {
    pub class: NameClass,
    pub ordinal: usize,
}

impl OilName {
    pub fn new(class: NameClass, ordinal: usize) -> Self {
        Self { class, ordinal }
    }
}

impl core::fmt::Display for OilName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.class.prefix(), self.ordinal)
    }
}

/// Names every declaration reachable from the module. Running this twice
/// produces the same names.
pub fn name_module(module: &mut Module) {
    for (ordinal, ty) in module.type_declarations.iter_mut().enumerate() {
        ty.oil_name = Some(OilName::new(NameClass::Type, ordinal));
    }

    for (ordinal, global) in module.globals.iter_mut().enumerate() {
        global.oil_name = Some(OilName::new(NameClass::Global, ordinal));
    }

    for (ordinal, function) in module.functions.iter_mut().enumerate() {
        function.oil_name = Some(OilName::new(NameClass::Function, ordinal));
        name_function(function);
    }
}

/// Parameter and local numbering restarts for every function
fn name_function(function: &mut FunctionDefinition) {
    for (ordinal, parameter) in function.parameters.iter_mut().enumerate() {
        parameter.oil_name = Some(OilName::new(NameClass::Parameter, ordinal));
    }

    for (ordinal, local) in function.locals.iter_mut().enumerate() {
        local.oil_name = Some(OilName::new(NameClass::Local, ordinal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oil::{FunctionDefinition, ParamDecl, TypeDecl, VarDecl};

    fn sample_module() -> Module {
        let mut module = Module::new("m");
        module.add_type(TypeDecl::new("int"));
        module.add_type(TypeDecl::new("float"));
        module.add_global(VarDecl::new("counter", TypeDecl::new("int")));

        let mut first = FunctionDefinition::new("first", TypeDecl::new("int"));
        first.add_parameter(ParamDecl::new("a", TypeDecl::new("int")));
        first.add_parameter(ParamDecl::new("b", TypeDecl::new("int")));
        first.add_local(VarDecl::new("x", TypeDecl::new("int")));
        module.add_function(first);

        let mut second = FunctionDefinition::new("second", TypeDecl::new("void"));
        second.add_local(VarDecl::new("y", TypeDecl::new("float")));
        second.add_local(VarDecl::new("z", TypeDecl::new("float")));
        module.add_function(second);

        module
    }

    fn collect_names(module: &Module) -> Vec<String> {
        let mut names = vec![];
        names.extend(module.type_declarations.iter().map(|t| t.oil_name));
        names.extend(module.globals.iter().map(|g| g.oil_name));
        for function in &module.functions {
            names.push(function.oil_name);
            names.extend(function.parameters.iter().map(|p| p.oil_name));
            names.extend(function.locals.iter().map(|l| l.oil_name));
        }
        names
            .into_iter()
            .map(|name| name.map(|n| n.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn names_follow_list_order_per_class() {
        let mut module = sample_module();
        name_module(&mut module);

        assert_eq!(
            collect_names(&module),
            ["t0", "t1", "g0", "f0", "p0", "p1", "l0", "f1", "l0", "l1"]
        );
    }

    #[test]
    fn naming_is_idempotent() {
        let mut module = sample_module();
        name_module(&mut module);
        let first = collect_names(&module);
        name_module(&mut module);

        assert_eq!(first, collect_names(&module));
    }

    #[test]
    fn prefixes_round_trip() {
        for class in [
            NameClass::Type,
            NameClass::Global,
            NameClass::Function,
            NameClass::Parameter,
            NameClass::Local,
        ] {
            assert_eq!(NameClass::from_prefix(class.prefix()), Some(class));
        }
        assert_eq!(NameClass::from_prefix('x'), None);
    }

    #[test]
    fn large_ordinals_are_kept_whole() {
        let name = OilName::new(NameClass::Local, usize::MAX);
        assert_eq!(name.to_string(), format!("l{}", usize::MAX));
    }
}
