//! Saving and loading OIL trees through path-keyed containers.

pub mod codec;
pub mod container;
pub mod index;
pub mod naming;
pub mod oil;

pub use codec::{LoadError, load, load_from_file, save, save_to_file};
pub use container::{Container, ContainerError, KeyTree, Value};
pub use oil::Module;
