/// > TYPE fields are used in resource records.  Note that these types
/// > are a subset of QTYPEs.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.2>
///
/// > A record type is defined to store a host's IPv6 address.
///
/// <https://datatracker.ietf.org/doc/html/rfc3596#section-2>
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DnsType {
    /// IPv4 address
    A,
    /// IPv6 address
    AAAA,
    /// The canonical name for an alias
    CNAME,
    /// Mail exchange
    MX,
    /// Authoritative name server
    NS,
    /// Domain name pointer
    PTR,
    /// Marks the start of a zone of authority
    SOA,
    /// Text string
    TXT,
    Unknown(u16),
}
impl DnsType {
    pub fn new(value: u16) -> Self {
        match value {
            1 => DnsType::A,
            28 => DnsType::AAAA,
            5 => DnsType::CNAME,
            15 => DnsType::MX,
            2 => DnsType::NS,
            12 => DnsType::PTR,
            6 => DnsType::SOA,
            16 => DnsType::TXT,
            other => DnsType::Unknown(other),
        }
    }

    /// The JSON key used for types whose rdata is rendered as a single
    /// domain name.
    pub fn name_key(self) -> Option<&'static str> {
        match self {
            DnsType::CNAME => Some("cname"),
            DnsType::MX => Some("mx"),
            DnsType::NS => Some("ns"),
            DnsType::PTR => Some("ptr"),
            DnsType::SOA => Some("soa"),
            _ => None,
        }
    }
}
