/// > CLASS fields appear in resource records.
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.4>
///
/// Only the Internet class gets type-specific rendering; every other
/// class falls back to the generic `type`/`class`/`rdlength` form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DnsClass {
    /// The Internet
    Internet,
    /// CSNET, CHAOS, Hesiod, QCLASSes, and anything else
    Unknown(u16),
}
impl DnsClass {
    pub fn new(value: u16) -> Self {
        match value {
            1 => DnsClass::Internet,
            other => DnsClass::Unknown(other),
        }
    }
}
