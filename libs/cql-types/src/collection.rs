use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use crate::cursor::{CursorKey, HostCursor, IndexCursor};
use crate::error::{Result, ValueError};
use crate::hash;
use crate::types::{CqlType, TypeArg};
use crate::value::Value;

/// Ordered list of values conforming to one element type.
#[derive(Debug, Clone)]
pub struct Collection {
    ty: Arc<CqlType>,
    values: Vec<Value>,
    hash: OnceLock<u64>,
    cursor: IndexCursor,
}

impl Collection {
    pub fn new(element: impl Into<TypeArg>) -> Result<Self> {
        let element = element.into().resolve()?;
        Ok(Self::empty(Arc::new(CqlType::list(element))))
    }

    pub fn with_type(ty: impl Into<Arc<CqlType>>) -> Result<Self> {
        let ty = ty.into();
        match &*ty {
            CqlType::List(_) => Ok(Self::empty(ty)),
            other => Err(ValueError::invalid_argument(format!(
                "type must be a list type, {other} given"
            ))),
        }
    }

    fn empty(ty: Arc<CqlType>) -> Self {
        Self { ty, values: Vec::new(), hash: OnceLock::new(), cursor: IndexCursor::default() }
    }

    pub fn cql_type(&self) -> &CqlType {
        &self.ty
    }

    pub fn element_type(&self) -> &CqlType {
        match &*self.ty {
            CqlType::List(element) => element,
            other => other,
        }
    }

    /// Append every value, or none of them if any fails validation.
    pub fn add(&mut self, values: impl IntoIterator<Item = Value>) -> Result<()> {
        let values: Vec<Value> = values.into_iter().collect();
        for value in &values {
            self.element_type().validate(value)?;
        }
        self.values.extend(values);
        self.hash.take();
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Position of the first element equal to `value`.
    pub fn find(&self, value: &Value) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.values.len() {
            return false;
        }
        self.values.remove(index);
        self.hash.take();
        true
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn hash_code(&self) -> u64 {
        *self.hash.get_or_init(|| {
            self.values.iter().fold(
                hash::bytes_hash(self.ty.to_string().as_bytes()),
                |acc, v| hash::combine_hash(acc, v.hash_code()),
            )
        })
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.values == other.values
    }
}

impl Eq for Collection {}

impl Ord for Collection {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ty
            .cmp(&other.ty)
            .then_with(|| self.values.len().cmp(&other.values.len()))
            .then_with(|| self.values.cmp(&other.values))
    }
}

impl PartialOrd for Collection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HostCursor for Collection {
    fn count(&self) -> usize {
        self.values.len()
    }

    fn rewind(&mut self) {
        self.cursor = IndexCursor::default();
    }

    fn valid(&self) -> bool {
        self.cursor.position < self.values.len()
    }

    fn current(&self) -> Option<Value> {
        self.values.get(self.cursor.position).cloned()
    }

    fn key(&self) -> Option<CursorKey> {
        self.valid().then(|| CursorKey::Index(self.cursor.position))
    }

    fn next(&mut self) {
        self.cursor.position += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_all_or_nothing() {
        let mut list = Collection::new("int").unwrap();
        list.add([Value::Int(1), Value::Int(2)]).unwrap();
        assert!(list.add([Value::Int(3), Value::from("x")]).is_err());
        assert_eq!(list.count(), 2);
        assert_eq!(list.find(&Value::Int(2)), Some(1));
        assert!(list.remove(0));
        assert!(!list.remove(5));
        assert_eq!(list.get(0), Some(&Value::Int(2)));
    }

    #[test]
    fn order_matters_for_equality() {
        let mut a = Collection::new("int").unwrap();
        let mut b = Collection::new("int").unwrap();
        a.add([Value::Int(1), Value::Int(2)]).unwrap();
        b.add([Value::Int(2), Value::Int(1)]).unwrap();
        assert_ne!(a, b);
        b.remove(0);
        b.add([Value::Int(2)]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn cursor_walks_in_order() {
        let mut list = Collection::new("int").unwrap();
        list.add((0..3).map(Value::Int)).unwrap();
        list.rewind();
        let mut keys = Vec::new();
        while list.valid() {
            keys.push(list.key());
            list.next();
        }
        assert_eq!(keys, vec![Some(CursorKey::Index(0)), Some(CursorKey::Index(1)), Some(CursorKey::Index(2))]);
    }
}
