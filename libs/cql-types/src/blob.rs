use std::fmt;

/// Immutable owned byte buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Blob(Vec<u8>);

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// `0x`-prefixed lowercase hex.
    pub fn bytes(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    pub fn to_binary_string(&self) -> Vec<u8> {
        self.0.clone()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_binary_forms() {
        let raw = vec![0x00, 0xde, 0xad, 0xbe, 0xef, 0xff];
        let blob = Blob::new(raw.clone());
        assert_eq!(blob.to_binary_string(), raw);
        assert_eq!(blob.bytes(), "0x00deadbeefff");
        assert_eq!(blob.to_string(), blob.bytes());
    }

    #[test]
    fn empty_blob() {
        assert_eq!(Blob::new(Vec::new()).bytes(), "0x");
    }
}
