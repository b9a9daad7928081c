use std::fmt;

use crate::hash;

/// Value of a server-side custom type: the Java class name plus its opaque
/// serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Custom {
    class_name: String,
    bytes: Vec<u8>,
}

impl Custom {
    pub fn new(class_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { class_name: class_name.into(), bytes: bytes.into() }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn hash_code(&self) -> u64 {
        hash::combine_hash(
            hash::bytes_hash(self.class_name.as_bytes()),
            hash::bytes_hash(&self.bytes),
        )
    }
}

impl fmt::Display for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'(0x{})", self.class_name, hex::encode(&self.bytes))
    }
}
