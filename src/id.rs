use serde::{Deserialize, Deserializer};

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RepositoryId {
    value: u64,
}

/// Monotonic id handed to every dispatched fetch. Completions carrying an
/// older generation than the one the store is waiting for are discarded.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Generation {
    value: u64,
}

impl RepositoryId {
    pub fn new(id: u64) -> Self {
        Self { value: id }
    }
}

impl Generation {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn next(self) -> Self {
        Self { value: self.value.wrapping_add(1) }
    }
}

impl<'de> Deserialize<'de> for RepositoryId {
    fn deserialize<D>(deserializer: D) -> Result<RepositoryId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = u64::deserialize(deserializer)?;
        Ok(RepositoryId::new(id))
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_are_monotonic() {
        let first = Generation::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.next(), Generation::new(2));
    }

    #[test]
    fn repository_id_deserializes_from_integer() {
        let id: RepositoryId = serde_json::from_str("1296269").unwrap();
        assert_eq!(id, RepositoryId::new(1296269));
        assert_eq!(id.to_string(), "1296269");
    }
}
