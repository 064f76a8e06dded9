use hashbrown::HashMap;

use crate::oil::DeclRef;

/// Maps generated names to the declarations they were read as. A load owns
/// one module-wide scope for its whole duration and a fresh local scope per
/// function.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, DeclRef>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later bindings for the same name replace earlier ones
    pub fn bind(&mut self, name: &str, reference: DeclRef) {
        self.bindings.insert(name.to_owned(), reference);
    }

    pub fn lookup(&self, name: &str) -> Option<DeclRef> {
        self.bindings.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
