use crate::error::Result;
use std::cell::RefCell;
use std::collections::BTreeMap;

pub const VOLUNTEERS_KEY: &str = "volunteers";
pub const SESSION_TIME_KEY: &str = "sessionTime";

/// String-keyed slot storage. Each slot holds one serialized value.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Runs a read-modify-write sequence as one unit. Nothing `f` wrote is
    /// kept when it returns an error.
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>;
}

impl<K: KvStore> KvStore for &K {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        (**self).transact(|_| f(self))
    }
}

/// In-process slots, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl KvStore for MemorySlots {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        let before = self.slots.borrow().clone();
        let result = f(self);
        if result.is_err() {
            *self.slots.borrow_mut() = before;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::{KvStore, MemorySlots};
    use crate::error::StoreError;

    #[test]
    fn memory_slots_get_set_remove() {
        let slots = MemorySlots::new();
        assert!(slots.get("a").expect("get").is_none());
        slots.set("a", "1").expect("set");
        assert_eq!(slots.get("a").expect("get").as_deref(), Some("1"));
        slots.remove("a").expect("remove");
        assert!(slots.is_empty());
    }

    #[test]
    fn memory_transact_rolls_back_on_error() {
        let slots = MemorySlots::new();
        slots.set("a", "1").expect("set");
        let result: Result<(), StoreError> = slots.transact(|kv| {
            kv.set("a", "2")?;
            kv.set("b", "3")?;
            Err(StoreError::NotFound("abort".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(slots.get("a").expect("get").as_deref(), Some("1"));
        assert!(slots.get("b").expect("get").is_none());
    }
}
