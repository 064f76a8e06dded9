//! Flattens a named module into dotted-path records. Every primitive value
//! in the tree becomes one container entry; the layout mirrors the tree.

use tracing::{debug, trace, warn};

use super::{
    EMPTY_LIST_MARKER, FORMAT_VERSION, VERSION_KEY,
    tags::{ExpressionTag, StatementTag},
};
use crate::{
    container::Container,
    naming::OilName,
    oil::{DeclRef, Expression, FunctionDefinition, Module, Statement, VarDecl},
};

pub(crate) struct Writer<'a, C: Container + ?Sized> {
    container: &'a mut C,
    module: &'a Module,
}

impl<'a, C: Container + ?Sized> Writer<'a, C> {
    /// Expects the module to have been through the name generator. Anything
    /// without a generated name is skipped with a warning. Existing records
    /// under `module` are replaced, other keys are left alone.
    pub fn write_module(container: &'a mut C, module: &'a Module) {
        let mut writer = Self { container, module };

        // Records left over from an earlier save would be read back as part
        // of this module
        writer.container.remove(VERSION_KEY);
        writer.container.remove("module");

        writer.container.set_string(VERSION_KEY, FORMAT_VERSION);
        writer.container.set_string("module.name", &module.name);

        for ty in &module.type_declarations {
            let Some(oil_name) = ty.oil_name else {
                warn!("Skipping unnamed type declaration `{}`", ty.name);
                continue;
            };

            writer
                .container
                .set_string(&format!("module.typedefs.{oil_name}.name"), &ty.name);
        }

        for global in &module.globals {
            let Some(oil_name) = global.oil_name else {
                warn!("Skipping unnamed global `{}`", global.name);
                continue;
            };

            writer.write_var_decl(&format!("module.globals.{oil_name}"), global, None);
        }

        for function in &module.functions {
            writer.write_function(function);
        }
    }

    fn write_function(&mut self, function: &FunctionDefinition) {
        let Some(oil_name) = function.oil_name else {
            warn!("Skipping unnamed function `{}`", function.name);
            return;
        };

        debug!("Writing function `{}` as {oil_name}", function.name);

        let path = format!("module.funcs.{oil_name}");

        self.container
            .set_string(&format!("{path}.name"), &function.name);
        self.container
            .set_string(&format!("{path}.return-type"), &function.return_type.name);

        if function.is_variadic {
            self.container.set_int(&format!("{path}.variadic"), 1);
        }

        if function.is_inline {
            self.container.set_int(&format!("{path}.inline"), 1);
        }

        for parameter in &function.parameters {
            let Some(parameter_name) = parameter.oil_name else {
                warn!("Skipping unnamed parameter `{}`", parameter.name);
                continue;
            };

            let parameter_path = format!("{path}.params.{parameter_name}");
            self.container
                .set_string(&format!("{parameter_path}.name"), &parameter.name);
            self.container
                .set_string(&format!("{parameter_path}.type"), &parameter.ty.name);
        }

        for local in &function.locals {
            let Some(local_name) = local.oil_name else {
                warn!("Skipping unnamed local `{}`", local.name);
                continue;
            };

            self.write_var_decl(&format!("{path}.locals.{local_name}"), local, Some(function));
        }

        self.write_statement_list(&format!("{path}.body"), &function.body, Some(function));
    }

    fn write_var_decl(&mut self, path: &str, var: &VarDecl, function: Option<&FunctionDefinition>) {
        self.container.set_string(&format!("{path}.name"), &var.name);
        self.container
            .set_string(&format!("{path}.type"), &var.ty.name);

        if let Some(initializer) = &var.initializer {
            self.write_expression(&format!("{path}.init"), initializer, function);
        }
    }

    fn write_statement_list(
        &mut self,
        path: &str,
        statements: &[Statement],
        function: Option<&FunctionDefinition>,
    ) {
        if statements.is_empty() {
            self.container.set_string(path, EMPTY_LIST_MARKER);
            return;
        }

        for (index, statement) in statements.iter().enumerate() {
            self.write_statement(&format!("{path}.s{index}"), statement, function);
        }
    }

    fn write_statement(
        &mut self,
        path: &str,
        statement: &Statement,
        function: Option<&FunctionDefinition>,
    ) {
        trace!("Writing statement at {path}");

        match statement {
            Statement::DeclInit { decl, init } => {
                let Some(var_name) = self.reference_name((*decl).into(), function) else {
                    warn!("Skipping initialization of a missing variable at {path}");
                    return;
                };

                self.write_tag(path, StatementTag::DeclInit.as_str());
                self.container
                    .set_string(&format!("{path}.var"), &var_name.to_string());
                self.write_expression(&format!("{path}.expr"), init, function);
            }
            Statement::Expression(expression) => {
                self.write_tag(path, StatementTag::Expression.as_str());
                self.write_expression(&format!("{path}.expr"), expression, function);
            }
            Statement::For {
                init,
                cond,
                test,
                step,
                body,
            } => {
                self.write_tag(path, StatementTag::For.as_str());
                self.write_statement_list(&format!("{path}.decl1"), init, function);

                for (slot, expression) in [("expr1", cond), ("expr2", test), ("expr3", step)] {
                    if let Some(expression) = expression {
                        self.write_expression(&format!("{path}.{slot}"), expression, function);
                    }
                }

                self.write_statement_list(&format!("{path}.body"), body, function);
            }
            Statement::Return(value) => {
                self.write_tag(path, StatementTag::Return.as_str());

                if let Some(value) = value {
                    self.write_expression(&format!("{path}.expr"), value, function);
                }
            }
        }
    }

    fn write_expression(
        &mut self,
        path: &str,
        expression: &Expression,
        function: Option<&FunctionDefinition>,
    ) {
        match expression {
            Expression::Identifier(reference) => {
                let Some(name) = self.reference_name(*reference, function) else {
                    warn!("Skipping reference to a missing declaration at {path}");
                    return;
                };

                self.write_tag(path, ExpressionTag::Identifier.as_str());
                self.container
                    .set_string(&format!("{path}.ref"), &name.to_string());
            }
            Expression::IntConstant(value) => {
                self.write_tag(path, ExpressionTag::IntConstant.as_str());
                self.container
                    .set_int(&format!("{path}.val"), i64::from(*value));
            }
            Expression::FloatConstant(value) => {
                self.write_tag(path, ExpressionTag::FloatConstant.as_str());
                self.container.set_float(&format!("{path}.val"), *value);
            }
            Expression::Arithmetic { operator, lhs, rhs } => {
                self.write_tag(path, ExpressionTag::Arithmetic.as_str());
                self.write_expression(&format!("{path}.lhs"), lhs, function);
                self.container
                    .set_string(&format!("{path}.op"), operator.wire_name());

                if let Some(rhs) = rhs {
                    self.write_expression(&format!("{path}.rhs"), rhs, function);
                }
            }
            Expression::Comparison { operator, lhs, rhs } => {
                self.write_tag(path, ExpressionTag::Comparison.as_str());
                self.write_expression(&format!("{path}.lhs"), lhs, function);
                self.container
                    .set_string(&format!("{path}.op"), operator.wire_name());
                self.write_expression(&format!("{path}.rhs"), rhs, function);
            }
            Expression::Assignment { operator, lhs, rhs } => {
                self.write_tag(path, ExpressionTag::Assignment.as_str());
                self.write_expression(&format!("{path}.lhs"), lhs, function);
                self.container
                    .set_string(&format!("{path}.op"), operator.wire_name());
                self.write_expression(&format!("{path}.rhs"), rhs, function);
            }
        }
    }

    fn write_tag(&mut self, path: &str, tag: &str) {
        self.container.set_string(&format!("{path}.type"), tag);
    }

    /// The generated name of whatever the reference points at, if it exists
    /// and has been named
    fn reference_name(
        &self,
        reference: DeclRef,
        function: Option<&FunctionDefinition>,
    ) -> Option<OilName> {
        self.module.declaration(function, reference)?.oil_name()
    }
}
