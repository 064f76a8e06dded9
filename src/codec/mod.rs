//! Conversion between OIL trees and path-keyed containers.
//!
//! Saving names every declaration (see [`crate::naming`]) and then writes one
//! record per primitive value:
//!
//! ```text
//! module.name                                : string
//! module.funcs.<fname>.name                  : string
//! module.funcs.<fname>.return-type           : string
//! module.funcs.<fname>.params.<pname>.{name,type}
//! module.funcs.<fname>.locals.<lname>.{name,type}
//! module.funcs.<fname>.body                  : "empty" | statement list
//! <list>.s<idx>.type                         : decl-init | expr-stmt | for-stmt | ret-stmt
//! <expr>.type                                : ident-expr | int-const | float-const
//!                                              | arith-expr | comp-expr | assign-expr
//! ```
//!
//! Type declarations and globals go under `module.typedefs` and
//! `module.globals`. Loading is all or nothing: any error means no module.

use std::path::Path;

use thiserror::Error;

use crate::{
    container::{Container, ContainerError, KeyTree, Value},
    naming::name_module,
    oil::Module,
};

mod reader;
mod scope;
mod tags;
mod writer;


pub use scope::Scope;
pub use tags::{ExpressionTag, StatementTag};

pub const FORMAT_VERSION: &str = "0.2.0";
pub const VERSION_KEY: &str = "OILCan.version";
/// Stored in place of the children of an empty statement list
pub const EMPTY_LIST_MARKER: &str = "empty";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("unresolved reference `{name}` at `{path}`: {reason}")]
    UnresolvedReference {
        path: String,
        name: String,
        reason: UnresolvedReason,
    },
    #[error("statement list at `{path}` holds the value {found:?}")]
    InvalidStatementList { path: String, found: Value },
    #[error("unknown {family} operator `{name}` at `{path}`")]
    UnknownOperator {
        path: String,
        family: &'static str,
        name: String,
    },
    #[error("integer constant {value} at `{path}` does not fit in 32 bits")]
    IntegerOutOfRange { path: String, value: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnresolvedReason {
    #[error("the name does not start with a referenceable class prefix")]
    UnknownPrefix,
    #[error("no declaration with that name is in scope")]
    NotInScope,
    #[error("the declaration is not a variable")]
    NotAVariable,
}

/// Names the module and writes it into `container`, replacing any module
/// saved there before. Keys outside `module` and the version stamp are left
/// alone.
pub fn save<C: Container + ?Sized>(module: &mut Module, container: &mut C) {
    name_module(module);
    writer::Writer::write_module(container, module);
}

/// Rebuilds a module from `container`
pub fn load<C: Container + ?Sized>(container: &C) -> Result<Module, LoadError> {
    reader::Reader::read_module(container)
}

pub fn save_to_file(module: &mut Module, path: impl AsRef<Path>) -> Result<(), ContainerError> {
    let mut tree = KeyTree::new();
    save(module, &mut tree);
    tree.save_to(path)
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Module, LoadError> {
    let tree = KeyTree::load_from(path)?;
    load(&tree)
}
