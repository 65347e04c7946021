use core::fmt::{self, Write};
use fixed_buffer::FixedBuf;

/// A bounded append-only accumulator for the emitted JSON document.
///
/// Appends past capacity are silently dropped, so formatting never
/// fails the decoder.  Size the buffer for the packets you expect;
/// 4096 bytes comfortably holds a decoded 512-byte UDP message.
pub struct JsonBuf<const N: usize> {
    buf: FixedBuf<N>,
}

impl<const N: usize> JsonBuf<N> {
    pub fn new() -> Self {
        Self {
            buf: FixedBuf::new(),
        }
    }

    /// Appends as many bytes of `bytes` as fit.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let writable = self.buf.writable();
        let n = bytes.len().min(writable.len());
        writable[..n].copy_from_slice(&bytes[..n]);
        self.buf.wrote(n);
    }

    pub fn push_str(&mut self, s: &str) {
        self.push_bytes(s.as_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated document.  Everything appended by this crate is
    /// ASCII, so truncation cannot split a character.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.buf.readable()).unwrap_or("")
    }
}

impl<const N: usize> Default for JsonBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for JsonBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push() {
        let mut buf: JsonBuf<16> = JsonBuf::new();
        assert!(buf.is_empty());
        buf.push_str("{\"rc\":");
        let _ = write!(buf, "{}", 3);
        buf.push_str("}");
        assert_eq!("{\"rc\":3}", buf.as_str());
        assert_eq!(8, buf.len());
    }

    #[test]
    fn test_truncates_silently() {
        let mut buf: JsonBuf<4> = JsonBuf::new();
        buf.push_str("abcdef");
        assert_eq!("abcd", buf.as_str());
        buf.push_str("gh");
        assert_eq!("abcd", buf.as_str());
        let _ = write!(buf, "{}", 12345);
        assert_eq!("abcd", buf.as_str());
    }
}
