//! Handler registry
//!
//! Registration order is kept and used as the lookup tie-break. Names are not
//! deduplicated: registering the same name twice leaves the second handler
//! shadowed by the first.

use alloc::vec::Vec;

use crate::handler::Handler;

/// Registered handlers, in registration order
///
/// Holds borrowed handlers only; their storage belongs to the registering
/// module and must outlive the registry.
#[derive(Default)]
pub struct Registry<'a> {
    handlers: Vec<&'a dyn Handler>,
}

impl<'a> Registry<'a> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append a handler
    pub fn register(&mut self, handler: &'a dyn Handler) {
        self.handlers.push(handler);
    }

    /// First registered handler named `name` (case-sensitive)
    pub fn lookup(&self, name: &str) -> Option<&'a dyn Handler> {
        self.handlers.iter().copied().find(|h| h.name() == name)
    }

    /// Handlers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'a dyn Handler> + '_ {
        self.handlers.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Capabilities;

    struct Named {
        name: &'static str,
        id: u8,
    }

    impl Handler for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::default()
        }

        fn get<'b>(&self, _path: &[&str], buf: &'b mut [u8]) -> Result<&'b str, crate::Error> {
            crate::value::str_from_value(&crate::Value::Int8(self.id as i8), buf)
        }
    }

    fn id_of(handler: &dyn Handler) -> u8 {
        let mut buf = [0u8; 4];
        handler.get(&[], &mut buf).unwrap().parse().unwrap()
    }

    #[test]
    fn test_lookup_by_name() {
        let net = Named { name: "net", id: 1 };
        let log = Named { name: "log", id: 2 };
        let mut registry = Registry::new();
        registry.register(&net);
        registry.register(&log);

        assert_eq!(registry.len(), 2);
        assert_eq!(id_of(registry.lookup("log").unwrap()), 2);
        assert_eq!(id_of(registry.lookup("net").unwrap()), 1);
        assert!(registry.lookup("Net").is_none());
        assert!(registry.lookup("bogus").is_none());
    }

    #[test]
    fn test_duplicate_name_first_registered_wins() {
        let first = Named { name: "net", id: 1 };
        let second = Named { name: "net", id: 2 };
        let mut registry = Registry::new();
        registry.register(&first);
        registry.register(&second);

        assert_eq!(id_of(registry.lookup("net").unwrap()), 1);
        assert_eq!(registry.iter().map(id_of).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("net").is_none());
    }
}
