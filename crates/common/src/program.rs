//! Program representation for silt word streams.
//!
//! A program is a flat sequence of 16-bit words. Bytecode files are raw
//! concatenations of those words in little-endian byte order, with no
//! header or footer; the word count is the file size divided by two,
//! truncated.

/// A silt program: an immutable stream of 16-bit words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The word stream.
    pub words: Vec<u16>,
}

impl Program {
    /// Create a program from a vector of words.
    pub fn new(words: Vec<u16>) -> Self {
        Self { words }
    }

    /// Serialize the word stream to little-endian bytes.
    ///
    /// The result length is always `words.len() * 2`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * 2);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Deserialize a byte slice into a program.
    ///
    /// A trailing odd byte is dropped: the word count is `len / 2`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let words = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self { words }
    }

    /// Number of words in the stream.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the stream is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program() {
        let program = Program::new(vec![]);
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
        assert_eq!(program.to_bytes(), Vec::<u8>::new());
    }

    #[test]
    fn to_bytes_is_little_endian() {
        let program = Program::new(vec![0x0400, 0x1234]);
        assert_eq!(program.to_bytes(), vec![0x00, 0x04, 0x34, 0x12]);
    }

    #[test]
    fn roundtrip() {
        let program = Program::new(vec![0x5400, 0x002A, 0x3000]);
        let bytes = program.to_bytes();
        assert_eq!(bytes.len(), 6);
        assert_eq!(Program::from_bytes(&bytes), program);
    }

    #[test]
    fn from_bytes_drops_trailing_odd_byte() {
        let program = Program::from_bytes(&[0x00, 0x04, 0xFF]);
        assert_eq!(program.words, vec![0x0400]);
    }

    #[test]
    fn from_bytes_empty() {
        assert!(Program::from_bytes(&[]).is_empty());
    }
}
