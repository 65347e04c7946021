use crate::cursor::Cursor;
use crate::DnsError;
use fixed_buffer::FixedBuf;

/// Name decoding gives up after this many compression-pointer jumps.
/// Guarantees termination on cyclic or overlapping pointer chains.
pub const MAX_NAME_JUMPS: u32 = 20;

/// Capacity of a decoded name, counting the separator byte written
/// before every label.
pub const MAX_NAME_BYTES: usize = 256;

/// One token of a name's wire form, keyed by the top two bits of its
/// first byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelTag {
    /// `00`: a label of this many bytes.  Zero terminates the name.
    Label(u8),
    /// `11`: a 14-bit backward offset follows.
    Pointer,
    /// `01`: a length of 64 or more squeezed into a label tag.
    TooLong,
    /// `10`: reserved bit pattern.
    Reserved,
}
impl LabelTag {
    pub fn new(byte: u8) -> Self {
        match byte >> 6 {
            0b00 => LabelTag::Label(byte),
            0b11 => LabelTag::Pointer,
            0b01 => LabelTag::TooLong,
            _ => LabelTag::Reserved,
        }
    }
}

/// Maps a label byte to something safe to splice into a JSON string.
/// Non-printable bytes become `*`.  So do `"` and `\`, which would
/// otherwise break the document.
fn printable(b: u8) -> u8 {
    if (0x20..=0x7E).contains(&b) && b != b'"' && b != b'\\' {
        b
    } else {
        b'*'
    }
}

/// A decoded domain name in a fixed-size buffer.
///
/// Each label is stored with a `.` separator in front of it, so
/// `www.example.com` is held as `.www.example.com`.  [`NameBuf::as_str`]
/// strips the leading separator.  An empty name stays empty.
pub struct NameBuf {
    buf: FixedBuf<MAX_NAME_BYTES>,
}

impl NameBuf {
    pub fn new() -> Self {
        Self {
            buf: FixedBuf::new(),
        }
    }

    /// The name with its leading separator stripped.
    pub fn as_str(&self) -> &str {
        let bytes = self.buf.readable();
        let bytes = if bytes.is_empty() { bytes } else { &bytes[1..] };
        core::str::from_utf8(bytes).unwrap_or("")
    }

    /// The raw stored form, separator included.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.readable()
    }

    /// Appends a separator plus the sanitized label bytes.
    ///
    /// # Errors
    /// Returns `Unterminated` when the label does not fit.
    fn push_label(&mut self, label: &[u8]) -> Result<(), DnsError> {
        let writable = self.buf.writable();
        if writable.len() < label.len() + 1 {
            return Err(DnsError::Unterminated);
        }
        writable[0] = b'.';
        for (out, b) in writable[1..=label.len()].iter_mut().zip(label) {
            *out = printable(*b);
        }
        self.buf.wrote(label.len() + 1);
        Ok(())
    }
}

impl Default for NameBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes a possibly-compressed domain name starting at `cursor` into
/// `out`.
///
/// `message` is the whole packet starting at the header; compression
/// pointers are resolved against it.  On success the caller's cursor
/// ends just past the name's inline bytes: after the terminator for an
/// uncompressed name, or after the first 2-byte pointer for a
/// compressed one.  A jump is never resumed.
///
/// The loop is iterative with an explicit jump counter, so adversarial
/// pointer chains can exhaust neither the stack nor the CPU.
///
/// # Errors
/// - `Unterminated`: input or output space ran out before a terminator.
/// - `Malformed`: a label was longer than the remaining input.
/// - `LabelTooLong`: a length byte of 64 or more.
/// - `LabelMalformed`: the reserved `10` tag.
/// - `OffsetTooLong`: a truncated pointer, or more than
///   [`MAX_NAME_JUMPS`] jumps.
pub fn decode_name<'a>(
    message: &'a [u8],
    cursor: &mut Cursor<'a>,
    out: &mut NameBuf,
) -> Result<(), DnsError> {
    let mut active = *cursor;
    let mut jumps = 0_u32;
    loop {
        let tag_byte = match active.read_u8() {
            Ok(b) => b,
            Err(_) => return Err(DnsError::Unterminated),
        };
        match LabelTag::new(tag_byte) {
            LabelTag::Label(0) => {
                if jumps == 0 {
                    *cursor = active;
                }
                return Ok(());
            }
            LabelTag::Label(len) => {
                let label = active.advance(usize::from(len))?;
                out.push_label(label)?;
            }
            LabelTag::Pointer => {
                let second = match active.read_u8() {
                    Ok(b) => b,
                    Err(_) => return Err(DnsError::OffsetTooLong),
                };
                if jumps == 0 {
                    // The caller resumes right after the pointer no
                    // matter where the jump leads.
                    *cursor = active;
                }
                if jumps >= MAX_NAME_JUMPS {
                    return Err(DnsError::OffsetTooLong);
                }
                jumps += 1;
                let offset = usize::from(u16::from_be_bytes([tag_byte & 0x3F, second]));
                active = Cursor::new(&message[offset.min(message.len())..]);
            }
            LabelTag::TooLong => return Err(DnsError::LabelTooLong),
            LabelTag::Reserved => return Err(DnsError::LabelMalformed),
        }
    }
}

/// Decodes the exchange name of an MX rdata.
///
/// MX rdata carries a 16-bit preference in front of the name.  The
/// preference is consumed exactly once, before the first tag byte is
/// interpreted, so an rdata that is immediately a compression pointer
/// still jumps from the right position.
///
/// # Errors
/// `Malformed` when the preference is truncated, otherwise as
/// [`decode_name`].
pub fn decode_mx_name<'a>(
    message: &'a [u8],
    cursor: &mut Cursor<'a>,
    out: &mut NameBuf,
) -> Result<(), DnsError> {
    cursor.advance(2)?;
    decode_name(message, cursor, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(message: &[u8]) -> Result<String, DnsError> {
        let mut cursor = Cursor::new(message);
        let mut name = NameBuf::new();
        decode_name(message, &mut cursor, &mut name)?;
        Ok(name.as_str().to_string())
    }

    #[test]
    fn test_label_tag() {
        assert_eq!(LabelTag::Label(0), LabelTag::new(0x00));
        assert_eq!(LabelTag::Label(63), LabelTag::new(0x3F));
        assert_eq!(LabelTag::TooLong, LabelTag::new(0x40));
        assert_eq!(LabelTag::TooLong, LabelTag::new(0x7F));
        assert_eq!(LabelTag::Reserved, LabelTag::new(0x80));
        assert_eq!(LabelTag::Reserved, LabelTag::new(0xBF));
        assert_eq!(LabelTag::Pointer, LabelTag::new(0xC0));
        assert_eq!(LabelTag::Pointer, LabelTag::new(0xFF));
    }

    #[test]
    fn test_round_trip() {
        let message = [
            3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm',
            0,
        ];
        let mut cursor = Cursor::new(&message);
        let mut name = NameBuf::new();
        decode_name(&message, &mut cursor, &mut name).unwrap();
        assert_eq!(b".www.example.com", name.as_bytes());
        assert_eq!("www.example.com", name.as_str());
        assert_eq!(0, cursor.remaining());
    }

    #[test]
    fn test_empty_name() {
        let message = [0, 0xFF];
        let mut cursor = Cursor::new(&message);
        let mut name = NameBuf::new();
        decode_name(&message, &mut cursor, &mut name).unwrap();
        assert_eq!("", name.as_str());
        assert_eq!(b"", name.as_bytes());
        assert_eq!(1, cursor.remaining());
    }

    #[test]
    fn test_label_length_bounds() {
        let mut message = vec![63_u8];
        message.extend_from_slice(&[b'a'; 63]);
        message.push(0);
        assert_eq!(Ok("a".repeat(63)), decode(&message));

        let mut message = vec![64_u8];
        message.extend_from_slice(&[b'a'; 64]);
        message.push(0);
        assert_eq!(Err(DnsError::LabelTooLong), decode(&message));
    }

    #[test]
    fn test_reserved_tag() {
        assert_eq!(Err(DnsError::LabelMalformed), decode(&[0x80, 0x01, 0]));
    }

    #[test]
    fn test_truncated_label_is_malformed() {
        assert_eq!(Err(DnsError::Malformed), decode(&[5, b'a', b'b']));
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(Err(DnsError::Unterminated), decode(&[]));
        assert_eq!(Err(DnsError::Unterminated), decode(&[1, b'a']));
    }

    #[test]
    fn test_output_capacity() {
        // Four 63-byte labels fill 256 bytes of output; a fifth cannot fit.
        let mut message = Vec::new();
        for _ in 0..5 {
            message.push(63);
            message.extend_from_slice(&[b'a'; 63]);
        }
        message.push(0);
        assert_eq!(Err(DnsError::Unterminated), decode(&message));
    }

    #[test]
    fn test_sanitizes_bytes() {
        let message = [5, 0x01, b'a', 0x7F, b'"', b'\\', 0];
        assert_eq!(Ok("*a***".to_string()), decode(&message));
    }

    #[test]
    fn test_pointer_to_earlier_name() {
        let mut message = vec![
            3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm',
            0,
        ];
        let start = message.len();
        message.extend_from_slice(&[2, b'd', b'e', 0xC0, 0x04]);
        let mut cursor = Cursor::new(&message[start..]);
        let mut name = NameBuf::new();
        decode_name(&message, &mut cursor, &mut name).unwrap();
        assert_eq!("de.example.com", name.as_str());
        // The cursor resumes after the pointer, not at the jump target.
        assert_eq!(0, cursor.remaining());
    }

    fn pointer_chain(jumps: usize) -> Vec<u8> {
        let mut message = Vec::new();
        for i in 0..jumps {
            let target = 2 * (i + 1);
            message.push(0xC0 | (target >> 8) as u8);
            message.push(target as u8);
        }
        message.extend_from_slice(&[1, b'a', 0]);
        message
    }

    #[test]
    fn test_jump_depth_limit() {
        assert_eq!(Ok("a".to_string()), decode(&pointer_chain(20)));
        assert_eq!(Err(DnsError::OffsetTooLong), decode(&pointer_chain(21)));
    }

    #[test]
    fn test_cyclic_pointer_terminates() {
        assert_eq!(Err(DnsError::OffsetTooLong), decode(&[0xC0, 0x00]));
        // Two pointers pointing at each other.
        assert_eq!(
            Err(DnsError::OffsetTooLong),
            decode(&[0xC0, 0x02, 0xC0, 0x00])
        );
    }

    #[test]
    fn test_truncated_pointer() {
        assert_eq!(Err(DnsError::OffsetTooLong), decode(&[0xC0]));
    }

    #[test]
    fn test_pointer_past_end() {
        // Jump target beyond the message decodes zero bytes.
        assert_eq!(Err(DnsError::Unterminated), decode(&[0xC0, 0x30]));
    }

    #[test]
    fn test_mx_preference_skipped_once() {
        let message = [0, 10, 4, b'm', b'a', b'i', b'l', 0];
        let mut cursor = Cursor::new(&message);
        let mut name = NameBuf::new();
        decode_mx_name(&message, &mut cursor, &mut name).unwrap();
        assert_eq!("mail", name.as_str());
        assert_eq!(0, cursor.remaining());
    }

    #[test]
    fn test_mx_name_immediately_a_pointer() {
        // The preference is consumed before the tag byte is read, so
        // the pointer at rdata offset 2 is seen as a pointer, not as
        // part of the preference.
        let mut message = vec![2, b'm', b'x', 0];
        let start = message.len();
        message.extend_from_slice(&[0, 10, 0xC0, 0x00]);
        let mut cursor = Cursor::new(&message[start..]);
        let mut name = NameBuf::new();
        decode_mx_name(&message, &mut cursor, &mut name).unwrap();
        assert_eq!("mx", name.as_str());
        assert_eq!(0, cursor.remaining());
    }

    #[test]
    fn test_mx_truncated_preference() {
        let message = [0_u8];
        let mut cursor = Cursor::new(&message);
        let mut name = NameBuf::new();
        assert_eq!(
            Err(DnsError::Malformed),
            decode_mx_name(&message, &mut cursor, &mut name)
        );
    }
}
