use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use crate::cursor::{CursorKey, HostCursor, IndexCursor};
use crate::error::{Result, ValueError};
use crate::hash;
use crate::types::{CqlType, TypeArg};
use crate::value::Value;

/// Record with a fixed, ordered set of named fields.
#[derive(Debug, Clone)]
pub struct UserTypeValue {
    ty: Arc<CqlType>,
    values: Vec<Option<Value>>,
    hash: OnceLock<u64>,
    cursor: IndexCursor,
}

impl UserTypeValue {
    pub fn new(fields: Vec<(String, TypeArg)>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(fields.len());
        for (name, ty) in fields {
            if !seen.insert(name.clone()) {
                return Err(ValueError::invalid_argument(format!(
                    "Duplicate field name '{name}'"
                )));
            }
            resolved.push((name, ty.resolve()?));
        }
        Ok(Self::empty(Arc::new(CqlType::user_type(resolved))))
    }

    pub fn with_type(ty: impl Into<Arc<CqlType>>) -> Result<Self> {
        let ty = ty.into();
        match &*ty {
            CqlType::UserType { .. } => Ok(Self::empty(ty)),
            other => Err(ValueError::invalid_argument(format!(
                "type must be a user type, {other} given"
            ))),
        }
    }

    fn empty(ty: Arc<CqlType>) -> Self {
        let arity = ty.user_type_fields().map_or(0, <[(String, CqlType)]>::len);
        Self { ty, values: vec![None; arity], hash: OnceLock::new(), cursor: IndexCursor::default() }
    }

    pub fn cql_type(&self) -> &CqlType {
        &self.ty
    }

    pub fn fields(&self) -> &[(String, CqlType)] {
        self.ty.user_type_fields().unwrap_or_default()
    }

    pub fn keyspace(&self) -> Option<&str> {
        match &*self.ty {
            CqlType::UserType { keyspace, .. } => keyspace.as_deref(),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match &*self.ty {
            CqlType::UserType { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.fields()
            .iter()
            .position(|(field, _)| field == name)
            .ok_or_else(|| ValueError::invalid_argument(format!("Invalid name '{name}'")))
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let index = self.position(name)?;
        self.fields()[index].1.validate(&value)?;
        self.values[index] = Some(value);
        self.hash.take();
        Ok(())
    }

    pub fn clear(&mut self, name: &str) -> Result<()> {
        let index = self.position(name)?;
        self.values[index] = None;
        self.hash.take();
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Option<&Value>> {
        let index = self.position(name)?;
        Ok(self.values[index].as_ref())
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Fields in declared order with their values, `None` when unset.
    pub fn values(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields()
            .iter()
            .zip(&self.values)
            .map(|((name, _), value)| (name.as_str(), value.as_ref()))
    }

    pub fn hash_code(&self) -> u64 {
        *self.hash.get_or_init(|| {
            self.values().fold(
                hash::bytes_hash(self.ty.to_string().as_bytes()),
                |acc, (name, value)| {
                    let field = hash::combine_hash(
                        hash::bytes_hash(name.as_bytes()),
                        value.map_or(0, Value::hash_code),
                    );
                    hash::combine_hash(acc, field)
                },
            )
        })
    }
}

impl PartialEq for UserTypeValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.values == other.values
    }
}

impl Eq for UserTypeValue {}

impl Ord for UserTypeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ty
            .cmp(&other.ty)
            .then_with(|| self.values.cmp(&other.values))
    }
}

impl PartialOrd for UserTypeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HostCursor for UserTypeValue {
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
        self.values.get(self.cursor.position).cloned().flatten()
    }

    fn key(&self) -> Option<CursorKey> {
        self.fields()
            .get(self.cursor.position)
            .map(|(name, _)| CursorKey::Name(name.clone()))
    }

    fn next(&mut self) {
        self.cursor.position += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::ScalarKind;

    fn point() -> UserTypeValue {
        UserTypeValue::new(vec![
            ("x".to_string(), "int".into()),
            ("label".to_string(), ScalarKind::Varchar.into()),
        ])
        .unwrap()
    }

    #[test]
    fn set_and_get_by_name() {
        let mut p = point();
        assert_eq!(p.get("x").unwrap(), None);
        p.set("x", Value::Int(3)).unwrap();
        assert_eq!(p.get("x").unwrap(), Some(&Value::Int(3)));
        assert_eq!(p.count(), 2);
    }

    #[test]
    fn unknown_field_is_invalid_name() {
        let mut p = point();
        let err = p.set("y", Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.message(), "Invalid name 'y'");
        assert!(p.get("y").is_err());
    }

    #[test]
    fn field_type_is_enforced() {
        let mut p = point();
        assert!(p.set("label", Value::Int(1)).is_err());
        assert_eq!(p.get("label").unwrap(), None);
    }

    #[test]
    fn duplicate_fields_rejected() {
        let err = UserTypeValue::new(vec![
            ("a".to_string(), "int".into()),
            ("a".to_string(), "text".into()),
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn values_follow_declared_order() {
        let mut p = point();
        p.set("label", "origin".into()).unwrap();
        let names: Vec<_> = p.values().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "label"]);

        p.rewind();
        assert_eq!(p.key(), Some(CursorKey::Name("x".into())));
        assert_eq!(p.current(), None);
        p.next();
        assert_eq!(p.current(), Some(Value::from("origin")));
    }

    #[test]
    fn equality_and_hash() {
        let mut a = point();
        let mut b = point();
        a.set("x", Value::Int(1)).unwrap();
        b.set("x", Value::Int(1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        b.set("label", "z".into()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn metadata_comes_from_type() {
        let ty = CqlType::user_type(vec![("a".into(), ScalarKind::Int.into())]).with_name("ks", "t");
        let v = UserTypeValue::with_type(ty).unwrap();
        assert_eq!(v.keyspace(), Some("ks"));
        assert_eq!(v.name(), Some("t"));
    }
}
