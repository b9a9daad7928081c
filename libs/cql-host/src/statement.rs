use std::sync::atomic::{AtomicU64, Ordering};

use cql_types::Value;

use crate::error::{HostError, Result};
use crate::host_value::HostValue;
use crate::marshal::bind_parameter;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unprepared CQL statement.
///
/// Statements compare by identity: two instances are equal only when they
/// are the same object.
#[derive(Debug)]
pub struct SimpleStatement {
    id: u64,
    cql: String,
}

impl SimpleStatement {
    pub fn new(cql: &HostValue) -> Result<Self> {
        let cql = cql.as_str().ok_or_else(|| {
            HostError::invalid_argument(format!("cql must be a string, {} given", cql.describe()))
        })?;
        Ok(Self { id: NEXT_ID.fetch_add(1, Ordering::Relaxed), cql: cql.to_string() })
    }

    pub fn cql(&self) -> &str {
        &self.cql
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Host comparison: 0 for the same object, 1 otherwise.
    pub fn compare(&self, other: &SimpleStatement) -> i32 {
        i32::from(self.id != other.id)
    }

    /// Infer typed values for positional arguments. Null arguments stay unset.
    pub fn bind(&self, args: &[HostValue]) -> Result<Vec<Option<Value>>> {
        args.iter()
            .enumerate()
            .map(|(i, arg)| bind_parameter(arg).map_err(|e| e.with_context(format!("argument {i}"))))
            .collect()
    }
}
