use std::collections::HashMap;

use crate::runtime::object::Object;

/// One scope of name bindings. Call scopes borrow the scope of their caller,
/// so they can never outlive the call that created them.
#[derive(Debug, Default)]
pub struct Environment<'a> {
    bindings: HashMap<String, Object>,
    parent: Option<&'a Environment<'a>>,
}

impl<'a> Environment<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enclosed(parent: &'a Environment<'a>) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Nearest binding for `name`, searching outward through parent scopes.
    pub fn get(&self, name: &str) -> Option<&Object> {
        match self.bindings.get(name) {
            Some(value) => Some(value),
            None => self.parent.and_then(|parent| parent.get(name)),
        }
    }

    /// Binds in this scope only; an outer binding of the same name is shadowed,
    /// never overwritten.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.bindings.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_parents() {
        let mut root = Environment::new();
        root.set("x", Object::Integer(1));
        let child = Environment::enclosed(&root);
        assert_eq!(child.get("x"), Some(&Object::Integer(1)));
        assert_eq!(child.get("y"), None);
    }

    #[test]
    fn set_shadows_without_touching_parent() {
        let mut root = Environment::new();
        root.set("x", Object::Integer(1));
        {
            let mut child = Environment::enclosed(&root);
            child.set("x", Object::Integer(2));
            assert_eq!(child.get("x"), Some(&Object::Integer(2)));
        }
        assert_eq!(root.get("x"), Some(&Object::Integer(1)));
    }
}
