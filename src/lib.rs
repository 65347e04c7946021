//! dns-json
//! ========
//! [![crates.io version](https://img.shields.io/crates/v/dns-json.svg)](https://crates.io/crates/dns-json)
//! [![license: Apache 2.0](https://gitlab.com/leonhard-llc/ops/-/raw/main/license-apache-2.0.svg)](https://gitlab.com/leonhard-llc/ops/-/raw/main/dns-json/LICENSE)
//! [![unsafe forbidden](https://gitlab.com/leonhard-llc/ops/-/raw/main/unsafe-forbidden.svg)](https://github.com/rust-secure-code/safety-dance/)
//! [![pipeline status](https://gitlab.com/leonhard-llc/ops/badges/main/pipeline.svg)](https://gitlab.com/leonhard-llc/ops/-/pipelines)
//!
//! A library that decodes captured DNS packets into compact single-line
//! JSON documents, for passive traffic metadata extraction.
//!
//! # Use Cases
//! - Summarize the DNS traffic seen on a network tap or in a pcap
//!   pipeline, one line per message.
//! - Feed queried names, response codes, and answer addresses into a
//!   metadata store without running a resolver.
//!
//! # Features
//! - Treats every packet as hostile: all reads go through a
//!   bounds-checked cursor, compression-pointer chains stop after a
//!   fixed number of jumps, and output goes into fixed-size buffers.
//! - Never panics and never loops forever.  Any parse failure turns
//!   into a `"malformed"` marker and the emitted text is always
//!   well-formed JSON.
//! - Depends only on `std`, [`fixed-buffer`](https://crates.io/crates/fixed-buffer),
//!   and the [`log`](https://crates.io/crates/log) facade
//! - `forbid(unsafe_code)`
//!
//! # Limitations
//! - Decodes messages.  Does not build queries or responses.
//! - Accepts at most one question per message.  Messages declaring more
//!   are reported as malformed.
//! - `SOA` rdata is rendered as its primary name server only.
//! - `TXT` rdata is not decoded.
//! - `OPT` and DNSSEC records fall back to a generic
//!   `type`/`class`/`rdlength` form.
//!
//! # Example
//! ```
//! use dns_json::{write_packet_json, JsonBuf};
//!
//! let packet: &[u8] = &[
//!     0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//!     7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
//!     0x00, 0x01, 0x00, 0x01,
//! ];
//! let mut out: JsonBuf<4096> = JsonBuf::new();
//! write_packet_json(packet, &mut out);
//! assert_eq!("{\"qn\":\"example.com\",\"rc\":0,\"rr\":[]}", out.as_str());
//! ```
//!
//! # Related Crates
//! - [`dns-server`](https://crates.io/crates/dns-server) answers queries;
//!   this crate only watches them go by.
//!
//! # Cargo Geiger Safety Report
//! # Changelog
//! - v0.1.0 - Initial version
#![forbid(unsafe_code)]

mod cursor;
mod dns_class;
mod dns_message;
mod dns_message_header;
mod dns_name;
mod dns_record;
mod dns_type;
mod json_buf;

pub use cursor::Cursor;
pub use dns_class::DnsClass;
pub use dns_message::write_packet_json;
pub use dns_message_header::DnsMessageHeader;
pub use dns_name::{
    decode_mx_name, decode_name, LabelTag, NameBuf, MAX_NAME_BYTES, MAX_NAME_JUMPS,
};
pub use dns_record::{write_rdata, DnsRecordHeader};
pub use dns_type::DnsType;
pub use json_buf::JsonBuf;

/// Why a decode failed.  Every variant is terminal for the current
/// packet: the driver emits a `"malformed"` marker and stops.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DnsError {
    /// Ran out of bytes where a fixed-size field was expected.
    Malformed,
    /// A label declared a length of 64 or more.
    LabelTooLong,
    /// A compression pointer was truncated or the jump limit was reached.
    OffsetTooLong,
    /// A label tag used the reserved `10` bit pattern.
    LabelMalformed,
    /// A fixed-size record type declared the wrong rdlength.
    BadRdlength,
    /// A name ran out of input or output space before its terminator.
    Unterminated,
    /// The message declared more than one question.
    TooMany,
    /// A record declared more rdata than the message holds.
    RdataTooLong,
}
