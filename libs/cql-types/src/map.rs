use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use crate::cursor::{CursorKey, HostCursor, SeqCursor};
use crate::error::{Result, ValueError};
use crate::hash;
use crate::types::{CqlType, TypeArg};
use crate::value::Value;

/// Key/value collection. Keys are unique under value equality; entries keep
/// their first insertion position when overwritten.
#[derive(Debug, Clone)]
pub struct Map {
    ty: Arc<CqlType>,
    keys: HashMap<Value, u64>,
    entries: BTreeMap<u64, (Value, Value)>,
    next_seq: u64,
    hash: OnceLock<u64>,
    cursor: SeqCursor,
}

impl Map {
    pub fn new(key: impl Into<TypeArg>, value: impl Into<TypeArg>) -> Result<Self> {
        let ty = CqlType::map(key.into().resolve()?, value.into().resolve()?);
        Ok(Self::empty(Arc::new(ty)))
    }

    pub fn with_type(ty: impl Into<Arc<CqlType>>) -> Result<Self> {
        let ty = ty.into();
        match &*ty {
            CqlType::Map(..) => Ok(Self::empty(ty)),
            other => Err(ValueError::invalid_argument(format!(
                "type must be a map type, {other} given"
            ))),
        }
    }

    fn empty(ty: Arc<CqlType>) -> Self {
        Self {
            ty,
            keys: HashMap::new(),
            entries: BTreeMap::new(),
            next_seq: 0,
            hash: OnceLock::new(),
            cursor: SeqCursor::default(),
        }
    }

    pub fn cql_type(&self) -> &CqlType {
        &self.ty
    }

    pub fn key_type(&self) -> &CqlType {
        match &*self.ty {
            CqlType::Map(key, _) => key,
            other => other,
        }
    }

    pub fn value_type(&self) -> &CqlType {
        match &*self.ty {
            CqlType::Map(_, value) => value,
            other => other,
        }
    }

    pub fn set(&mut self, key: Value, value: Value) -> Result<()> {
        self.key_type().validate(&key)?;
        self.value_type().validate(&value)?;
        match self.keys.get(&key) {
            Some(seq) => {
                if let Some(entry) = self.entries.get_mut(seq) {
                    entry.1 = value;
                }
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.keys.insert(key.clone(), seq);
                self.entries.insert(seq, (key, value));
            }
        }
        self.hash.take();
        Ok(())
    }

    pub fn get(&self, key: &Value) -> Result<Option<&Value>> {
        self.key_type().validate(key)?;
        Ok(self
            .keys
            .get(key)
            .and_then(|seq| self.entries.get(seq))
            .map(|(_, v)| v))
    }

    pub fn remove(&mut self, key: &Value) -> Result<bool> {
        self.key_type().validate(key)?;
        let Some(seq) = self.keys.remove(key) else {
            return Ok(false);
        };
        self.entries.remove(&seq);
        self.hash.take();
        Ok(true)
    }

    pub fn has(&self, key: &Value) -> Result<bool> {
        self.key_type().validate(key)?;
        Ok(self.keys.contains_key(key))
    }

    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.values().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.values().map(|(k, v)| (k, v))
    }

    /// Entries sorted by key.
    pub fn sorted_entries(&self) -> Vec<(&Value, &Value)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort();
        entries
    }

    pub fn hash_code(&self) -> u64 {
        *self.hash.get_or_init(|| {
            let entries = self.iter().fold(0, |acc, (k, v)| {
                hash::unordered_combine(acc, hash::combine_hash(k.hash_code(), v.hash_code()))
            });
            hash::combine_hash(hash::bytes_hash(self.ty.to_string().as_bytes()), entries)
        })
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.count() == other.count()
            && self
                .iter()
                .all(|(k, v)| other.get(k).ok().flatten() == Some(v))
    }
}

impl Eq for Map {}

impl Ord for Map {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ty
            .cmp(&other.ty)
            .then_with(|| self.count().cmp(&other.count()))
            .then_with(|| self.sorted_entries().cmp(&other.sorted_entries()))
    }
}

impl PartialOrd for Map {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HostCursor for Map {
    fn count(&self) -> usize {
        self.keys.len()
    }

    fn rewind(&mut self) {
        self.cursor = SeqCursor::start(self.entries.keys().next().copied());
    }

    fn valid(&self) -> bool {
        self.cursor.position().is_some()
    }

    fn current(&self) -> Option<Value> {
        self.cursor
            .position()
            .and_then(|seq| self.entries.get(&seq))
            .map(|(_, v)| v.clone())
    }

    fn key(&self) -> Option<CursorKey> {
        self.cursor
            .position()
            .and_then(|seq| self.entries.get(&seq))
            .map(|(k, _)| CursorKey::Value(k.clone()))
    }

    fn next(&mut self) {
        if let Some(seq) = self.cursor.position() {
            let following = self.entries.range(seq + 1..).next().map(|(s, _)| *s);
            self.cursor.advance(following);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn set_get_remove() {
        let mut map = Map::new("int", "varchar").unwrap();
        map.set(Value::Int(1), "one".into()).unwrap();
        map.set(Value::Int(2), "two".into()).unwrap();
        map.set(Value::Int(1), "uno".into()).unwrap();
        assert_eq!(map.count(), 2);
        assert_eq!(map.get(&Value::Int(1)).unwrap(), Some(&Value::from("uno")));
        assert_eq!(map.keys().next(), Some(&Value::Int(1)));
        assert!(map.remove(&Value::Int(1)).unwrap());
        assert!(!map.has(&Value::Int(1)).unwrap());
        assert_eq!(map.get(&Value::Int(9)).unwrap(), None);
    }

    #[test]
    fn validates_keys_and_values() {
        let mut map = Map::new("int", "varchar").unwrap();
        assert_eq!(
            map.set("k".into(), "v".into()).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert!(map.set(Value::Int(1), Value::Int(1)).is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = Map::new("int", "int").unwrap();
        let mut b = Map::new("int", "int").unwrap();
        for i in 0..5 {
            a.set(Value::Int(i), Value::Int(i * 10)).unwrap();
            b.set(Value::Int(4 - i), Value::Int((4 - i) * 10)).unwrap();
        }
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        b.set(Value::Int(0), Value::Int(-1)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn cursor_reports_entry_keys() {
        let mut map = Map::new("varchar", "int").unwrap();
        map.set("a".into(), Value::Int(1)).unwrap();
        map.set("b".into(), Value::Int(2)).unwrap();
        map.rewind();
        assert_eq!(map.key(), Some(CursorKey::Value("a".into())));
        map.next();
        assert_eq!(map.current(), Some(Value::Int(2)));
        map.next();
        assert!(!map.valid());
    }
}
