use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use crate::cursor::{CursorKey, HostCursor, IndexCursor};
use crate::error::{Result, ValueError};
use crate::hash;
use crate::types::{CqlType, TypeArg};
use crate::value::Value;

/// Fixed-arity sequence of optional slots, one per declared type.
#[derive(Debug, Clone)]
pub struct Tuple {
    ty: Arc<CqlType>,
    values: Vec<Option<Value>>,
    hash: OnceLock<u64>,
    cursor: IndexCursor,
}

impl Tuple {
    pub fn new(types: Vec<TypeArg>) -> Result<Self> {
        let types = types
            .into_iter()
            .map(TypeArg::resolve)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::empty(Arc::new(CqlType::tuple(types))))
    }

    pub fn with_type(ty: impl Into<Arc<CqlType>>) -> Result<Self> {
        let ty = ty.into();
        match &*ty {
            CqlType::Tuple(_) => Ok(Self::empty(ty)),
            other => Err(ValueError::invalid_argument(format!(
                "type must be a tuple type, {other} given"
            ))),
        }
    }

    fn empty(ty: Arc<CqlType>) -> Self {
        let arity = ty.tuple_types().map_or(0, <[CqlType]>::len);
        Self { ty, values: vec![None; arity], hash: OnceLock::new(), cursor: IndexCursor::default() }
    }

    pub fn cql_type(&self) -> &CqlType {
        &self.ty
    }

    pub fn types(&self) -> &[CqlType] {
        self.ty.tuple_types().unwrap_or_default()
    }

    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let ty = self
            .types()
            .get(index)
            .ok_or_else(|| ValueError::invalid_argument("Index out of bounds"))?;
        ty.validate(&value)?;
        self.values[index] = Some(value);
        self.hash.take();
        Ok(())
    }

    /// Return slot `index` to the unset state.
    pub fn clear(&mut self, index: usize) -> Result<()> {
        let slot = self
            .values
            .get_mut(index)
            .ok_or_else(|| ValueError::invalid_argument("Index out of bounds"))?;
        *slot = None;
        self.hash.take();
        Ok(())
    }

    /// Stored value, or `None` when unset or out of bounds.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Arity.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Slots in declared order; unset slots are `None`.
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn hash_code(&self) -> u64 {
        *self.hash.get_or_init(|| {
            self.values.iter().fold(
                hash::bytes_hash(self.ty.to_string().as_bytes()),
                |acc, slot| hash::combine_hash(acc, slot.as_ref().map_or(0, Value::hash_code)),
            )
        })
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.values == other.values
    }
}

impl Eq for Tuple {}

impl Ord for Tuple {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ty
            .cmp(&other.ty)
            .then_with(|| self.values.len().cmp(&other.values.len()))
            .then_with(|| self.values.cmp(&other.values))
    }
}

impl PartialOrd for Tuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HostCursor for Tuple {
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
        self.get(self.cursor.position).cloned()
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
    use crate::error::ErrorKind;
    use crate::numeric::Bigint;
    use crate::types::ScalarKind;

    fn int_text_bigint() -> Tuple {
        Tuple::new(vec!["int".into(), "text".into(), ScalarKind::Bigint.into()]).unwrap()
    }

    #[test]
    fn arity_is_fixed_by_type() {
        let t = int_text_bigint();
        assert_eq!(t.count(), 3);
        assert_eq!(t.get(1), None);
        assert_eq!(t.values(), &[None, None, None]);
        assert_eq!(t.cql_type().to_string(), "tuple<int, text, bigint>");
    }

    #[test]
    fn set_validates_index_and_type() {
        let mut t = int_text_bigint();
        t.set(0, Value::Int(7)).unwrap();
        assert_eq!(t.get(0), Some(&Value::Int(7)));

        let err = t.set(3, Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.message(), "Index out of bounds");

        let err = t.set(1, Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(t.get(1), None);
    }

    #[test]
    fn equality_is_slot_wise() {
        let mut a = int_text_bigint();
        let mut b = int_text_bigint();
        assert_eq!(a, b);
        a.set(2, Bigint::new(5).unwrap().into()).unwrap();
        assert_ne!(a, b);
        assert!(b < a);
        b.set(2, Bigint::new(5).unwrap().into()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn cursor_walks_declared_slots() {
        let mut t = int_text_bigint();
        t.set(1, "x".into()).unwrap();
        t.rewind();
        let mut slots = Vec::new();
        while t.valid() {
            slots.push(t.current());
            t.next();
        }
        assert_eq!(slots, vec![None, Some(Value::from("x")), None]);
    }
}
