//! Rebuilds a module from dotted-path records, resolving references as they
//! are met. Names become visible in declaration order: globals and functions
//! in the module-wide scope, parameters then locals in a scope that only
//! lives while its function is being read.

use std::str::FromStr;

use tracing::{debug, trace, warn};

use super::{
    EMPTY_LIST_MARKER, FORMAT_VERSION, LoadError, UnresolvedReason, VERSION_KEY,
    scope::Scope,
    tags::{ExpressionTag, StatementTag},
};
use crate::{
    container::{Container, Value},
    naming::NameClass,
    oil::{
        ArithmeticOperator, AssignmentOperator, ComparisonOperator, DeclRef, Expression,
        FunctionDefinition, Module, ParamDecl, Statement, TypeDecl, VarDecl, VarRef,
    },
};

pub(crate) struct Reader<'c, C: Container + ?Sized> {
    container: &'c C,
    /// Globals and functions read so far
    globals: Scope,
}

impl<'c, C: Container + ?Sized> Reader<'c, C> {
    pub fn read_module(container: &'c C) -> Result<Module, LoadError> {
        let mut reader = Self {
            container,
            globals: Scope::new(),
        };

        reader.check_version();

        let mut module = Module::new(container.get_string("module.name")?);

        for key in container.child_keys("module.typedefs") {
            let name = container.get_string(&format!("module.typedefs.{key}.name"))?;
            module.add_type(TypeDecl::new(name));
        }

        // Global initializers cannot see parameters or locals
        let no_locals = Scope::new();

        for key in container.child_keys("module.globals") {
            let global = reader.read_var_decl(&format!("module.globals.{key}"), &no_locals)?;
            let id = module.add_global(global);
            reader.globals.bind(key, DeclRef::Global(id));
        }

        for key in container.child_keys("module.funcs") {
            // Bound before the body is read so a function can refer to itself
            let id = module.functions.next_index();
            reader.globals.bind(key, DeclRef::Function(id));

            let function = reader.read_function(&format!("module.funcs.{key}"))?;
            module.add_function(function);
        }

        debug!(
            "Read module `{}` with {} functions",
            module.name,
            module.functions.len()
        );

        Ok(module)
    }

    /// The version stamp is informational only
    fn check_version(&self) {
        match self.container.value(VERSION_KEY) {
            Some(Value::String(version)) if version == FORMAT_VERSION => {}
            Some(Value::String(version)) => {
                warn!("Container was written as version {version}, reading it as {FORMAT_VERSION}")
            }
            Some(_) | None => warn!("Container has no usable `{VERSION_KEY}` stamp"),
        }
    }

    fn read_function(&self, path: &str) -> Result<FunctionDefinition, LoadError> {
        let container = self.container;

        let mut function = FunctionDefinition::new(
            container.get_string(&format!("{path}.name"))?,
            self.read_type(&format!("{path}.return-type"))?,
        );

        debug!("Reading function `{}` from {path}", function.name);

        function.is_variadic = self.read_flag(&format!("{path}.variadic"))?;
        function.is_inline = self.read_flag(&format!("{path}.inline"))?;

        let mut locals = Scope::new();

        for key in container.child_keys(&format!("{path}.params")) {
            let parameter_path = format!("{path}.params.{key}");
            let parameter = ParamDecl::new(
                container.get_string(&format!("{parameter_path}.name"))?,
                self.read_type(&format!("{parameter_path}.type"))?,
            );

            let id = function.add_parameter(parameter);
            locals.bind(key, DeclRef::Parameter(id));
        }

        for key in container.child_keys(&format!("{path}.locals")) {
            let local = self.read_var_decl(&format!("{path}.locals.{key}"), &locals)?;
            let id = function.add_local(local);
            locals.bind(key, DeclRef::Local(id));
        }

        trace!("{} parameter and local names in scope for {path}", locals.len());

        function.body = self.read_statement_list(&format!("{path}.body"), &locals)?;

        Ok(function)
    }

    fn read_type(&self, path: &str) -> Result<TypeDecl, LoadError> {
        Ok(TypeDecl::new(self.container.get_string(path)?))
    }

    /// Flags are only written when set
    fn read_flag(&self, path: &str) -> Result<bool, LoadError> {
        if self.container.value(path).is_none() {
            return Ok(false);
        }

        Ok(self.container.get_int(path)? != 0)
    }

    /// The initializer is read before the variable itself is bound, so it
    /// cannot refer to the variable it initializes
    fn read_var_decl(&self, path: &str, locals: &Scope) -> Result<VarDecl, LoadError> {
        let mut var = VarDecl::new(
            self.container.get_string(&format!("{path}.name"))?,
            self.read_type(&format!("{path}.type"))?,
        );

        var.initializer = self.read_optional_expression(&format!("{path}.init"), locals)?;

        Ok(var)
    }

    fn read_statement_list(&self, path: &str, locals: &Scope) -> Result<Vec<Statement>, LoadError> {
        let keys = self.container.child_keys(path);

        // A list is either the marker or statements, never both
        if !keys.is_empty() {
            if let Some(found) = self.container.value(path) {
                return Err(LoadError::InvalidStatementList {
                    path: path.to_owned(),
                    found: found.clone(),
                });
            }
        }

        if keys.is_empty() {
            return match self.container.get(path)? {
                Value::String(marker) if marker == EMPTY_LIST_MARKER => Ok(vec![]),
                found => Err(LoadError::InvalidStatementList {
                    path: path.to_owned(),
                    found: found.clone(),
                }),
            };
        }

        let mut statements = Vec::with_capacity(keys.len());

        for key in keys {
            if let Some(statement) = self.read_statement(&format!("{path}.{key}"), locals)? {
                statements.push(statement);
            }
        }

        Ok(statements)
    }

    /// `Ok(None)` means the record holds something this reader does not
    /// support. That is not an error: the statement is dropped.
    fn read_statement(&self, path: &str, locals: &Scope) -> Result<Option<Statement>, LoadError> {
        let tag = self.container.get_string(&format!("{path}.type"))?;

        let Ok(tag) = StatementTag::from_str(tag) else {
            warn!("Skipping statement of unsupported type `{tag}` at {path}");
            return Ok(None);
        };

        trace!("Reading {} at {path}", tag.as_str());

        let statement = match tag {
            StatementTag::DeclInit => {
                let decl = self.resolve_variable(&format!("{path}.var"), locals)?;

                let Some(init) = self.read_expression(&format!("{path}.expr"), locals)? else {
                    return Ok(None);
                };

                Statement::DeclInit { decl, init }
            }
            StatementTag::Expression => {
                let Some(expression) = self.read_expression(&format!("{path}.expr"), locals)?
                else {
                    return Ok(None);
                };

                Statement::Expression(expression)
            }
            StatementTag::For => Statement::For {
                init: self.read_statement_list(&format!("{path}.decl1"), locals)?,
                cond: self.read_optional_expression(&format!("{path}.expr1"), locals)?,
                test: self.read_optional_expression(&format!("{path}.expr2"), locals)?,
                step: self.read_optional_expression(&format!("{path}.expr3"), locals)?,
                body: self.read_statement_list(&format!("{path}.body"), locals)?,
            },
            StatementTag::Return => {
                Statement::Return(self.read_optional_expression(&format!("{path}.expr"), locals)?)
            }
        };

        Ok(Some(statement))
    }

    /// Reads an expression slot that may legitimately be left out
    fn read_optional_expression(
        &self,
        path: &str,
        locals: &Scope,
    ) -> Result<Option<Expression>, LoadError> {
        if !self.container.contains(path) {
            return Ok(None);
        }

        self.read_expression(path, locals)
    }

    /// `Ok(None)` means the expression (or a required operand of it) has an
    /// unsupported type
    fn read_expression(&self, path: &str, locals: &Scope) -> Result<Option<Expression>, LoadError> {
        let container = self.container;
        let tag = container.get_string(&format!("{path}.type"))?;

        let Ok(tag) = ExpressionTag::from_str(tag) else {
            warn!("Skipping expression of unsupported type `{tag}` at {path}");
            return Ok(None);
        };

        let expression = match tag {
            ExpressionTag::Identifier => {
                let (_, reference) = self.resolve(&format!("{path}.ref"), locals)?;
                Expression::Identifier(reference)
            }
            ExpressionTag::IntConstant => {
                let value_path = format!("{path}.val");
                let value = container.get_int(&value_path)?;
                let value = i32::try_from(value).map_err(|_| LoadError::IntegerOutOfRange {
                    path: value_path,
                    value,
                })?;

                Expression::IntConstant(value)
            }
            ExpressionTag::FloatConstant => {
                Expression::FloatConstant(container.get_float(&format!("{path}.val"))?)
            }
            ExpressionTag::Arithmetic => {
                let operator: ArithmeticOperator = self.read_operator(path, "arithmetic")?;

                let Some(lhs) = self.read_expression(&format!("{path}.lhs"), locals)? else {
                    return Ok(None);
                };

                let rhs_path = format!("{path}.rhs");
                let rhs = if operator.is_unary() {
                    self.read_optional_expression(&rhs_path, locals)?
                } else {
                    let Some(rhs) = self.read_expression(&rhs_path, locals)? else {
                        return Ok(None);
                    };
                    Some(rhs)
                };

                Expression::Arithmetic {
                    operator,
                    lhs: Box::new(lhs),
                    rhs: rhs.map(Box::new),
                }
            }
            ExpressionTag::Comparison => {
                let operator: ComparisonOperator = self.read_operator(path, "comparison")?;

                let (Some(lhs), Some(rhs)) = (
                    self.read_expression(&format!("{path}.lhs"), locals)?,
                    self.read_expression(&format!("{path}.rhs"), locals)?,
                ) else {
                    return Ok(None);
                };

                Expression::compare(operator, lhs, rhs)
            }
            ExpressionTag::Assignment => {
                let operator: AssignmentOperator = self.read_operator(path, "assignment")?;

                let (Some(lhs), Some(rhs)) = (
                    self.read_expression(&format!("{path}.lhs"), locals)?,
                    self.read_expression(&format!("{path}.rhs"), locals)?,
                ) else {
                    return Ok(None);
                };

                Expression::assign(operator, lhs, rhs)
            }
        };

        Ok(Some(expression))
    }

    fn read_operator<O: FromStr>(&self, path: &str, family: &'static str) -> Result<O, LoadError> {
        let operator_path = format!("{path}.op");
        let name = self.container.get_string(&operator_path)?;

        name.parse().map_err(|_| LoadError::UnknownOperator {
            family,
            name: name.to_owned(),
            path: operator_path,
        })
    }

    /// Resolves the reference stored at `path`. The first character of the
    /// name decides which scope is searched.
    fn resolve(&self, path: &str, locals: &Scope) -> Result<(&'c str, DeclRef), LoadError> {
        let container = self.container;
        let name = container.get_string(path)?;

        // Type names are never the target of a reference
        let Some(class) = name
            .chars()
            .next()
            .and_then(NameClass::from_prefix)
            .filter(|class| *class != NameClass::Type)
        else {
            return Err(unresolved(path, name, UnresolvedReason::UnknownPrefix));
        };

        let scope = if class.is_module_scoped() {
            &self.globals
        } else {
            locals
        };

        let reference = scope
            .lookup(name)
            .ok_or_else(|| unresolved(path, name, UnresolvedReason::NotInScope))?;

        Ok((name, reference))
    }

    fn resolve_variable(&self, path: &str, locals: &Scope) -> Result<VarRef, LoadError> {
        let (name, reference) = self.resolve(path, locals)?;

        VarRef::try_from(reference)
            .map_err(|_| unresolved(path, name, UnresolvedReason::NotAVariable))
    }
}

fn unresolved(path: &str, name: &str, reason: UnresolvedReason) -> LoadError {
    LoadError::UnresolvedReference {
        path: path.to_owned(),
        name: name.to_owned(),
        reason,
    }
}
