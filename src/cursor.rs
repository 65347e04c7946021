use crate::DnsError;

/// A read-only view of the unconsumed bytes of a packet.
///
/// Every read in the crate goes through [`Cursor::advance`], so bounds
/// are checked in exactly one place.  The view only ever shrinks.
/// Resolving a compression pointer never rewinds a cursor; it makes a
/// new one anchored at the target offset.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes `n` bytes and returns them.
    ///
    /// # Errors
    /// Returns `Malformed` when fewer than `n` bytes remain.  The
    /// cursor is unchanged on failure.
    pub fn advance(&mut self, n: usize) -> Result<&'a [u8], DnsError> {
        if self.bytes.len() < n {
            return Err(DnsError::Malformed);
        }
        let (consumed, rest) = self.bytes.split_at(n);
        self.bytes = rest;
        Ok(consumed)
    }

    /// # Errors
    /// Returns `Malformed` when fewer than `N` bytes remain.
    pub fn read<const N: usize>(&mut self) -> Result<[u8; N], DnsError> {
        let mut result = [0_u8; N];
        result.copy_from_slice(self.advance(N)?);
        Ok(result)
    }

    /// # Errors
    /// Returns `Malformed` when the cursor is empty.
    pub fn read_u8(&mut self) -> Result<u8, DnsError> {
        Ok(self.read::<1>()?[0])
    }

    /// # Errors
    /// Returns `Malformed` when fewer than 2 bytes remain.
    pub fn read_u16_be(&mut self) -> Result<u16, DnsError> {
        Ok(u16::from_be_bytes(self.read()?))
    }

    /// # Errors
    /// Returns `Malformed` when fewer than 4 bytes remain.
    pub fn read_u32_be(&mut self) -> Result<u32, DnsError> {
        Ok(u32::from_be_bytes(self.read()?))
    }
}
