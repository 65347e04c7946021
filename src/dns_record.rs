use crate::cursor::Cursor;
use crate::dns_class::DnsClass;
use crate::dns_name::{decode_mx_name, decode_name, NameBuf};
use crate::dns_type::DnsType;
use crate::json_buf::JsonBuf;
use crate::DnsError;
use core::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};

/// The fixed fields that follow a resource record's owner name.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3>
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DnsRecordHeader {
    pub typ: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdlength: u16,
}
impl DnsRecordHeader {
    /// # Errors
    /// Returns `Malformed` when the fixed fields are truncated and
    /// `RdataTooLong` when `rdlength` promises more bytes than the
    /// message still holds.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self, DnsError> {
        let typ = cursor.read_u16_be()?;
        let class = cursor.read_u16_be()?;
        let ttl = cursor.read_u32_be()?;
        let rdlength = cursor.read_u16_be()?;
        if usize::from(rdlength) > cursor.remaining() {
            return Err(DnsError::RdataTooLong);
        }
        Ok(Self {
            typ,
            class,
            ttl,
            rdlength,
        })
    }
}

/// Renders one record's rdata as JSON fields.
///
/// On success the cursor is exactly at the end of the declared
/// `rdlength` region, whether or not the sub-parser used every byte;
/// name decoders may also roam outside it through compression
/// pointers, as the wire format allows.  On error nothing has been
/// appended to `out`, so the caller controls the malformed marker.
///
/// # Errors
/// `BadRdlength` for an A or AAAA record with the wrong rdlength,
/// otherwise whatever the name decoder reports.
pub fn write_rdata<'a, const N: usize>(
    message: &'a [u8],
    cursor: &mut Cursor<'a>,
    header: &DnsRecordHeader,
    out: &mut JsonBuf<N>,
) -> Result<(), DnsError> {
    let rdlength = usize::from(header.rdlength);
    let typ = match DnsClass::new(header.class) {
        DnsClass::Internet => DnsType::new(header.typ),
        DnsClass::Unknown(_) => DnsType::Unknown(header.typ),
    };
    match typ {
        DnsType::A => {
            if rdlength != 4 {
                return Err(DnsError::BadRdlength);
            }
            let octets: [u8; 4] = cursor.read()?;
            let _ = write!(out, "\"a\":\"{}\"", Ipv4Addr::from(octets));
        }
        DnsType::AAAA => {
            if rdlength != 16 {
                return Err(DnsError::BadRdlength);
            }
            let octets: [u8; 16] = cursor.read()?;
            let _ = write!(out, "\"aaaa\":\"{}\"", Ipv6Addr::from(octets));
        }
        DnsType::CNAME | DnsType::MX | DnsType::NS | DnsType::PTR | DnsType::SOA => {
            // Decode from a copy; the record advances by rdlength no
            // matter how much of the rdata the name used.  For SOA only
            // the primary name server is rendered; the serial and
            // timer fields are skipped with the rest of the rdata.
            let mut view = *cursor;
            let mut name = NameBuf::new();
            if typ == DnsType::MX {
                decode_mx_name(message, &mut view, &mut name)?;
            } else {
                decode_name(message, &mut view, &mut name)?;
            }
            cursor.advance(rdlength)?;
            if let Some(key) = typ.name_key() {
                let _ = write!(out, "\"{}\":\"{}\"", key, name.as_str());
            }
        }
        DnsType::TXT => {
            cursor.advance(rdlength)?;
            out.push_str("\"txt\":\"NYI\"");
        }
        DnsType::Unknown(_) => {
            cursor.advance(rdlength)?;
            let _ = write!(
                out,
                "\"type\":\"{:x}\",\"class\":\"{:x}\",\"rdlength\":{}",
                header.typ, header.class, header.rdlength
            );
        }
    }
    Ok(())
}
