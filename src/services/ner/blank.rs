//! Degraded entity backend.

use crate::models::Entity;

use super::{NerBackend, NerError};

/// Backend that is always available and never finds entities.
///
/// Substituted for the full backend when its resource cannot be loaded, so
/// callers keep a single code path.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankNerBackend;

impl BlankNerBackend {
    pub fn new() -> Self {
        Self
    }
}

impl NerBackend for BlankNerBackend {
    fn backend_id(&self) -> &str {
        "blank"
    }

    fn is_degraded(&self) -> bool {
        true
    }

    fn extract(&self, _text: &str) -> Result<Vec<Entity>, NerError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_backend_finds_nothing() {
        let backend = BlankNerBackend::new();
        assert!(backend.is_degraded());
        assert_eq!(backend.backend_id(), "blank");
        assert!(backend
            .extract("President Joe Biden met NATO leaders in Brussels")
            .unwrap()
            .is_empty());
    }
}
