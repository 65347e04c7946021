use crate::cursor::Cursor;
use crate::dns_message_header::DnsMessageHeader;
use crate::dns_name::{decode_name, NameBuf};
use crate::dns_record::{write_rdata, DnsRecordHeader};
use crate::json_buf::JsonBuf;
use crate::DnsError;
use core::fmt::Write;
use log::debug;

/// Decodes one DNS message into a single-line JSON document:
///
/// ```text
/// {"qn"|"rn":"<name>","rc":<0-15>,"rr":[{<fields>,"ttl":<u32>},...]}
/// ```
///
/// `packet` must start at the DNS header, with any transport framing
/// already removed.  Answer, authority, and additional records share
/// the `"rr"` array in that order.
///
/// The output is always syntactically valid.  Any parse failure
/// replaces the rest of the document with a `"malformed"` marker
/// holding the count of unconsumed bytes, closes the open brackets,
/// and stops: one bad record truncates everything after it, because
/// cursor positions can no longer be trusted once an invariant breaks.
pub fn write_packet_json<const N: usize>(packet: &[u8], out: &mut JsonBuf<N>) {
    out.push_str("{");
    let mut cursor = Cursor::new(packet);
    let header = match DnsMessageHeader::parse(&mut cursor) {
        Ok(header) => header,
        Err(_) => {
            debug!("truncated header, packet is {} bytes", packet.len());
            let _ = write!(out, "\"malformed\":{}}}", packet.len());
            return;
        }
    };
    // One question per message.  Anything else is not worth trusting.
    if header.question_count > 1 {
        debug!(
            "rejecting packet declaring {} questions: {:?}",
            header.question_count,
            DnsError::TooMany
        );
        let _ = write!(out, "\"malformed\":{}}}", cursor.remaining());
        return;
    }
    let name_key = if header.is_response { "rn" } else { "qn" };
    for _ in 0..header.question_count {
        let mut name = NameBuf::new();
        if let Err(e) = parse_question(packet, &mut cursor, &mut name) {
            debug!("bad question section: {:?}", e);
            let _ = write!(out, "\"malformed\":{}}}", cursor.remaining());
            return;
        }
        let _ = write!(out, "\"{}\":\"{}\",", name_key, name.as_str());
    }
    let _ = write!(out, "\"rc\":{},\"rr\":[", header.response_code);
    let record_count = usize::from(header.answer_count)
        + usize::from(header.name_server_count)
        + usize::from(header.additional_count);
    for i in 0..record_count {
        if i > 0 {
            out.push_str(",");
        }
        out.push_str("{");
        if let Err(e) = write_record(packet, &mut cursor, out) {
            debug!("bad record {} of {}: {:?}", i + 1, record_count, e);
            let _ = write!(out, "\"malformed\":{}}}]}}", cursor.remaining());
            return;
        }
    }
    out.push_str("]}");
}

/// Reads a question entry.  The qtype and qclass position the cursor
/// but are not rendered; responses repeat the question name, which is
/// the part worth keeping.
fn parse_question<'a>(
    message: &'a [u8],
    cursor: &mut Cursor<'a>,
    name: &mut NameBuf,
) -> Result<(), DnsError> {
    decode_name(message, cursor, name)?;
    let _qtype = cursor.read_u16_be()?;
    let _qclass = cursor.read_u16_be()?;
    Ok(())
}

fn write_record<'a, const N: usize>(
    message: &'a [u8],
    cursor: &mut Cursor<'a>,
    out: &mut JsonBuf<N>,
) -> Result<(), DnsError> {
    // The owner name positions the cursor; it repeats the question
    // name and is not rendered.
    let mut name = NameBuf::new();
    decode_name(message, cursor, &mut name)?;
    let header = DnsRecordHeader::parse(cursor)?;
    write_rdata(message, cursor, &header, out)?;
    let _ = write!(out, ",\"ttl\":{}}}", header.ttl);
    Ok(())
}
