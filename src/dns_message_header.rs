use crate::cursor::Cursor;
use crate::DnsError;

/// > 4.1.1. Header section format
/// >
/// > The header contains the following fields:
/// >
/// > ```text
/// >                                 1  1  1  1  1  1
/// >   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                      ID                       |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                    QDCOUNT                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                    ANCOUNT                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                    NSCOUNT                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > |                    ARCOUNT                    |
/// > +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// > ```
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1>
///
/// Only the fields the decoder renders are broken out.  The opcode and
/// the AA/TC/RD/RA bits are left inside the flags word and never
/// decoded individually.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DnsMessageHeader {
    /// Matched against the query by resolvers; opaque to this decoder.
    pub id: u16,
    /// The `QR` bit: query (`false`) or response (`true`).
    pub is_response: bool,
    /// The low four flag bits.
    pub response_code: u8,
    pub question_count: u16,
    pub answer_count: u16,
    pub name_server_count: u16,
    pub additional_count: u16,
}
impl DnsMessageHeader {
    /// # Errors
    /// Returns `Malformed` when fewer than 12 bytes remain.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self, DnsError> {
        let bytes: [u8; 12] = cursor.read()?;
        Ok(Self {
            id: u16::from_be_bytes([bytes[0], bytes[1]]),
            is_response: (bytes[2] >> 7) == 1,
            response_code: bytes[3] & 0xF,
            question_count: u16::from_be_bytes([bytes[4], bytes[5]]),
            answer_count: u16::from_be_bytes([bytes[6], bytes[7]]),
            name_server_count: u16::from_be_bytes([bytes[8], bytes[9]]),
            additional_count: u16::from_be_bytes([bytes[10], bytes[11]]),
        })
    }
}
