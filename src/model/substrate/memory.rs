use std::collections::HashMap;

use crate::error::Result;

use super::Substrate;

/// A substrate that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySubstrate {
    blobs: HashMap<String, String>,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Substrate for MemorySubstrate {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<()> {
        self.blobs.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_put_remove() {
        let mut substrate = MemorySubstrate::new();
        assert_eq!(substrate.get("votes").unwrap(), None);

        substrate.put("votes", "[]".to_string()).unwrap();
        assert_eq!(substrate.get("votes").unwrap().as_deref(), Some("[]"));

        substrate.put("votes", "[1]".to_string()).unwrap();
        assert_eq!(substrate.get("votes").unwrap().as_deref(), Some("[1]"));

        substrate.remove("votes").unwrap();
        substrate.remove("votes").unwrap();
        assert_eq!(substrate.get("votes").unwrap(), None);
    }
}
