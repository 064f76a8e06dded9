//! Renders a module as colored, C-like source. Only meant for people; the
//! output is not parsed back.

use colored::Colorize;
use itertools::Itertools;

use super::{DeclRef, Expression, FunctionDefinition, Module, Statement, VarDecl};

const INDENT: &str = "    ";

pub struct PrettyModule<'a> {
    module: &'a Module,
}

impl Module {
    pub fn pretty(&self) -> PrettyModule<'_> {
        PrettyModule { module: self }
    }
}

impl core::fmt::Display for PrettyModule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let module = self.module;

        writeln!(f, "{} {}", "module".magenta(), module.name.blue())?;

        if !module.type_declarations.is_empty() {
            writeln!(f)?;
        }
        for ty in &module.type_declarations {
            writeln!(f, "{} {};", "typedef".magenta(), ty.name.cyan())?;
        }

        if !module.globals.is_empty() {
            writeln!(f)?;
        }
        for global in &module.globals {
            self.write_var_decl(f, global, None)?;
            writeln!(f)?;
        }

        for function in &module.functions {
            writeln!(f)?;
            self.write_function(f, function)?;
        }

        Ok(())
    }
}

impl PrettyModule<'_> {
    fn write_function(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        function: &FunctionDefinition,
    ) -> std::fmt::Result {
        if function.is_inline {
            write!(f, "{} ", "inline".magenta())?;
        }

        let mut parameters = function
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.ty.name.cyan(), p.name))
            .collect::<Vec<_>>();
        if function.is_variadic {
            parameters.push("...".to_owned());
        }

        writeln!(
            f,
            "{} {}({}) {{",
            function.return_type.name.cyan(),
            function.name.blue(),
            parameters.iter().join(", ")
        )?;

        for local in &function.locals {
            f.write_str(INDENT)?;
            self.write_var_decl(f, local, Some(function))?;
            writeln!(f)?;
        }

        for statement in &function.body {
            self.write_statement(f, statement, function, 1)?;
        }

        writeln!(f, "}}")
    }

    fn write_var_decl(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        var: &VarDecl,
        function: Option<&FunctionDefinition>,
    ) -> std::fmt::Result {
        write!(f, "{} {}", var.ty.name.cyan(), var.name)?;

        if let Some(initializer) = &var.initializer {
            f.write_str(" = ")?;
            self.write_expression(f, initializer, function, false)?;
        }

        f.write_str(";")
    }

    fn write_statement(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        statement: &Statement,
        function: &FunctionDefinition,
        depth: usize,
    ) -> std::fmt::Result {
        f.write_str(&INDENT.repeat(depth))?;

        match statement {
            Statement::For {
                init,
                cond,
                test,
                step,
                body,
            } => {
                self.write_for_header(f, init, [cond, test, step], function)?;
                writeln!(f, " {{")?;

                for statement in body {
                    self.write_statement(f, statement, function, depth + 1)?;
                }

                writeln!(f, "{}}}", INDENT.repeat(depth))
            }
            other => {
                self.write_inline_statement(f, other, function)?;
                writeln!(f)
            }
        }
    }

    /// Single-line form, used for statement lists inside a for header
    fn write_inline_statement(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        statement: &Statement,
        function: &FunctionDefinition,
    ) -> std::fmt::Result {
        match statement {
            Statement::DeclInit { decl, init } => {
                self.write_reference(f, (*decl).into(), Some(function))?;
                f.write_str(" = ")?;
                self.write_expression(f, init, Some(function), false)?;
                f.write_str(";")
            }
            Statement::Expression(expression) => {
                self.write_expression(f, expression, Some(function), false)?;
                f.write_str(";")
            }
            Statement::For {
                init,
                cond,
                test,
                step,
                body,
            } => {
                self.write_for_header(f, init, [cond, test, step], function)?;
                f.write_str(" {")?;
                for statement in body {
                    f.write_str(" ")?;
                    self.write_inline_statement(f, statement, function)?;
                }
                f.write_str(" }")
            }
            Statement::Return(value) => {
                write!(f, "{}", "return".magenta())?;
                if let Some(value) = value {
                    f.write_str(" ")?;
                    self.write_expression(f, value, Some(function), false)?;
                }
                f.write_str(";")
            }
        }
    }

    fn write_for_header(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        init: &[Statement],
        slots: [&Option<Expression>; 3],
        function: &FunctionDefinition,
    ) -> std::fmt::Result {
        write!(f, "{} (", "for".magenta())?;

        if init.is_empty() {
            f.write_str(";")?;
        }
        for (index, statement) in init.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            self.write_inline_statement(f, statement, function)?;
        }

        for (index, slot) in slots.into_iter().enumerate() {
            f.write_str(" ")?;
            if let Some(expression) = slot {
                self.write_expression(f, expression, Some(function), false)?;
            }
            if index < 2 {
                f.write_str(";")?;
            }
        }

        f.write_str(")")
    }

    fn write_expression(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        expression: &Expression,
        function: Option<&FunctionDefinition>,
        nested: bool,
    ) -> std::fmt::Result {
        match expression {
            Expression::Identifier(reference) => self.write_reference(f, *reference, function),
            Expression::IntConstant(value) => write!(f, "{}", value.to_string().purple()),
            Expression::FloatConstant(value) => write!(f, "{}", format!("{value:?}").purple()),
            Expression::Arithmetic { operator, lhs, rhs } => match rhs {
                Some(rhs) => {
                    self.write_binary(f, lhs, &operator.to_string(), rhs, function, nested)
                }
                None => {
                    write!(f, "{operator}")?;
                    self.write_expression(f, lhs, function, true)
                }
            },
            Expression::Comparison { operator, lhs, rhs } => {
                self.write_binary(f, lhs, &operator.to_string(), rhs, function, nested)
            }
            Expression::Assignment { operator, lhs, rhs } => {
                self.write_binary(f, lhs, &operator.to_string(), rhs, function, nested)
            }
        }
    }

    fn write_binary(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        lhs: &Expression,
        operator: &str,
        rhs: &Expression,
        function: Option<&FunctionDefinition>,
        nested: bool,
    ) -> std::fmt::Result {
        if nested {
            f.write_str("(")?;
        }

        self.write_expression(f, lhs, function, true)?;
        write!(f, " {operator} ")?;
        self.write_expression(f, rhs, function, true)?;

        if nested {
            f.write_str(")")?;
        }

        Ok(())
    }

    fn write_reference(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        reference: DeclRef,
        function: Option<&FunctionDefinition>,
    ) -> std::fmt::Result {
        match self.module.declaration(function, reference) {
            Some(declaration) => f.write_str(declaration.name()),
            None => write!(f, "{}", format!("<unresolved {reference:?}>").red()),
        }
    }
}
