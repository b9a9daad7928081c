use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use crate::cursor::{CursorKey, HostCursor, SeqCursor};
use crate::error::{Result, ValueError};
use crate::hash;
use crate::types::{CqlType, TypeArg};
use crate::value::Value;

/// Deduplicated collection of values conforming to one element type.
///
/// Membership is by value equality. Elements are kept in insertion order so
/// iteration is deterministic; elements added while a cursor is live are
/// visited by that cursor.
#[derive(Debug, Clone)]
pub struct Set {
    ty: Arc<CqlType>,
    members: HashMap<Value, u64>,
    order: BTreeMap<u64, Value>,
    next_seq: u64,
    hash: OnceLock<u64>,
    cursor: SeqCursor,
}

impl Set {
    /// `element` is a scalar type name or a full type descriptor.
    pub fn new(element: impl Into<TypeArg>) -> Result<Self> {
        let element = element.into().resolve()?;
        Ok(Self::empty(Arc::new(CqlType::set(element))))
    }

    /// Set for a declared `set<...>` type.
    pub fn with_type(ty: impl Into<Arc<CqlType>>) -> Result<Self> {
        let ty = ty.into();
        match &*ty {
            CqlType::Set(_) => Ok(Self::empty(ty)),
            other => Err(ValueError::invalid_argument(format!(
                "type must be a set type, {other} given"
            ))),
        }
    }

    fn empty(ty: Arc<CqlType>) -> Self {
        Self {
            ty,
            members: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
            hash: OnceLock::new(),
            cursor: SeqCursor::default(),
        }
    }

    pub fn cql_type(&self) -> &CqlType {
        &self.ty
    }

    pub fn element_type(&self) -> &CqlType {
        match &*self.ty {
            CqlType::Set(element) => element,
            other => other,
        }
    }

    /// Insert `value` unless an equal element is present. Returns whether
    /// the set changed.
    pub fn add(&mut self, value: Value) -> Result<bool> {
        self.element_type().validate(&value)?;
        if self.members.contains_key(&value) {
            return Ok(false);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.members.insert(value.clone(), seq);
        self.order.insert(seq, value);
        self.hash.take();
        Ok(true)
    }

    pub fn remove(&mut self, value: &Value) -> Result<bool> {
        self.element_type().validate(value)?;
        let Some(seq) = self.members.remove(value) else {
            return Ok(false);
        };
        self.order.remove(&seq);
        self.hash.take();
        Ok(true)
    }

    pub fn has(&self, value: &Value) -> Result<bool> {
        self.element_type().validate(value)?;
        Ok(self.members.contains_key(value))
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.order.values()
    }

    /// Elements sorted by value ordering.
    pub fn sorted_values(&self) -> Vec<&Value> {
        let mut values: Vec<&Value> = self.order.values().collect();
        values.sort();
        values
    }

    pub fn hash_code(&self) -> u64 {
        *self.hash.get_or_init(|| {
            let elements = self
                .members
                .keys()
                .fold(0, |acc, v| hash::unordered_combine(acc, v.hash_code()));
            hash::combine_hash(hash::bytes_hash(self.ty.to_string().as_bytes()), elements)
        })
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.members.len() == other.members.len()
            && self.members.keys().all(|v| other.members.contains_key(v))
    }
}

impl Eq for Set {}

impl Ord for Set {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ty
            .cmp(&other.ty)
            .then_with(|| self.members.len().cmp(&other.members.len()))
            .then_with(|| self.sorted_values().cmp(&other.sorted_values()))
    }
}

impl PartialOrd for Set {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HostCursor for Set {
    fn count(&self) -> usize {
        self.members.len()
    }

    fn rewind(&mut self) {
        self.cursor = SeqCursor::start(self.order.keys().next().copied());
    }

    fn valid(&self) -> bool {
        self.cursor.position().is_some()
    }

    fn current(&self) -> Option<Value> {
        self.cursor.position().and_then(|seq| self.order.get(&seq)).cloned()
    }

    fn key(&self) -> Option<CursorKey> {
        self.valid().then(|| CursorKey::Index(self.cursor.index()))
    }

    fn next(&mut self) {
        if let Some(seq) = self.cursor.position() {
            let following = self.order.range(seq + 1..).next().map(|(s, _)| *s);
            self.cursor.advance(following);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::numeric::Smallint;
    use crate::types::ScalarKind;

    fn varchar_set(items: &[&str]) -> Set {
        let mut set = Set::new("varchar").unwrap();
        for item in items {
            set.add(Value::from(*item)).unwrap();
        }
        set
    }

    #[test]
    fn add_is_idempotent() {
        let mut set = Set::new("varchar").unwrap();
        assert!(set.add("a".into()).unwrap());
        assert!(!set.add("a".into()).unwrap());
        assert_eq!(set.count(), 1);
        assert!(set.has(&"a".into()).unwrap());
        assert!(set.remove(&"a".into()).unwrap());
        assert!(!set.has(&"a".into()).unwrap());
        assert!(!set.remove(&"a".into()).unwrap());
    }

    #[test]
    fn rejects_non_conforming_values_without_mutation() {
        let mut set = Set::new(ScalarKind::Smallint).unwrap();
        set.add(Smallint::new(1).unwrap().into()).unwrap();
        let before = set.clone();
        let err = set.add(Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(set, before);
        assert!(set.has(&Value::from("x")).is_err());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = varchar_set(&["x", "y", "z"]);
        let b = varchar_set(&["z", "x", "y"]);
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn cardinality_orders_before_contents() {
        let small = varchar_set(&["z"]);
        let large = varchar_set(&["a", "b"]);
        assert_ne!(small, large);
        assert!(small < large);
    }

    #[test]
    fn different_element_types_differ() {
        let a = Set::new("varchar").unwrap();
        let b = Set::new("text").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_refreshed_after_mutation() {
        let mut set = varchar_set(&["a"]);
        let h1 = set.hash_code();
        set.add("b".into()).unwrap();
        let h2 = set.hash_code();
        assert_ne!(h1, h2);
        set.remove(&"b".into()).unwrap();
        assert_eq!(set.hash_code(), h1);
    }

    #[test]
    fn sorted_values_are_deterministic() {
        let set = varchar_set(&["c", "a", "b"]);
        let sorted: Vec<_> = set.sorted_values().into_iter().cloned().collect();
        assert_eq!(sorted, vec![Value::from("a"), Value::from("b"), Value::from("c")]);
        let inserted: Vec<_> = set.iter().cloned().collect();
        assert_eq!(inserted[0], Value::from("c"));
    }

    #[test]
    fn cursor_walks_and_counts() {
        let mut set = varchar_set(&["a", "b", "c"]);
        set.rewind();
        let mut seen = Vec::new();
        while set.valid() {
            seen.push((set.key(), set.current()));
            set.next();
        }
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2].0, Some(CursorKey::Index(2)));
        assert_eq!(seen[0].1, Some(Value::from("a")));
    }

    #[test]
    fn removing_current_element_keeps_cursor_safe() {
        let mut set = varchar_set(&["a", "b", "c"]);
        set.rewind();
        set.next();
        assert_eq!(set.current(), Some(Value::from("b")));
        set.remove(&"b".into()).unwrap();
        assert!(set.valid());
        assert_eq!(set.current(), None);
        set.next();
        assert_eq!(set.current(), Some(Value::from("c")));
        assert_eq!(set.key(), Some(CursorKey::Index(2)));
        set.next();
        assert!(!set.valid());
    }

    #[test]
    fn elements_added_during_iteration_are_visited() {
        let mut set = varchar_set(&["a"]);
        set.rewind();
        set.add("b".into()).unwrap();
        set.next();
        assert_eq!(set.current(), Some(Value::from("b")));
    }

    #[test]
    fn with_type_requires_set_descriptor() {
        assert!(Set::with_type(CqlType::set(ScalarKind::Int.into())).is_ok());
        assert!(Set::with_type(CqlType::list(ScalarKind::Int.into())).is_err());
    }
}
