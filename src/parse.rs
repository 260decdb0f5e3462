//! Reading forwarding tables from text.
//!
//! Route dumps are expected in the format of a router's `show ip route`
//! output: the first three columns of each line hold route codes, followed
//! by the prefix and the next-hop address, separated by whitespace.
//!
//! ```text
//! B  1.0.0.0/24        202.12.28.1
//! B  1.0.4.0/22        202.12.28.1
//!                      [20/0] via 202.12.28.1, 2w0d
//! S* 0.0.0.0/0         10.0.0.1
//! ```
//!
//! Lines with a space in the fourth column are continuation lines, and are
//! skipped.

use std::io::BufRead;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use log::warn;

use crate::types::errors::{ParseError, PrefixError};
use crate::types::{Prefix, RouteEntry};

// The number of route code columns before the prefix.
const CODE_COLUMNS: usize = 3;

/// Parses a dotted-quad IPv4 address into its integer value.
pub fn parse_addr(s: &str) -> Result<u32, ParseError> {
    Ipv4Addr::from_str(s.trim())
        .map(u32::from)
        .map_err(|_| ParseError::Address(s.to_string()))
}

/// Formats an integer as a dotted-quad IPv4 address.
pub fn format_addr(addr: u32) -> String {
    Ipv4Addr::from(addr).to_string()
}

/// Parses `a.b.c.d/n` into a prefix. An address without a length is taken
/// to be a host route (`/32`). Bits set beyond the length are cleared.
pub fn parse_prefix(s: &str) -> Result<Prefix, ParseError> {
    let s = s.trim();
    let (addr, len) = match s.split_once('/') {
        Some((addr, len)) => (
            parse_addr(addr)?,
            len.parse::<u8>()
                .map_err(|_| ParseError::Length(s.to_string()))?,
        ),
        None => (parse_addr(s)?, Prefix::MAX_LEN),
    };

    let pfx = inetnum::addr::Prefix::new_relaxed(
        IpAddr::V4(Ipv4Addr::from(addr)),
        len,
    )
    .map_err(|_| PrefixError::LengthInvalid(len))?;

    Ok(Prefix::try_from(pfx)?)
}

/// Parses one line of a route dump. Returns `Ok(None)` for continuation
/// lines, which carry no route.
pub fn parse_route_line(line: &str) -> Result<Option<RouteEntry>, ParseError> {
    let rest = match line.get(CODE_COLUMNS..) {
        Some(rest) if !rest.is_empty() && !rest.starts_with(' ') => rest,
        _ => return Ok(None),
    };

    let mut fields = rest.split_whitespace();
    let (prefix, next_hop) = match (fields.next(), fields.next()) {
        (Some(prefix), Some(next_hop)) => (prefix, next_hop),
        _ => return Err(ParseError::MissingField),
    };

    Ok(Some(RouteEntry::new(
        parse_prefix(prefix)?,
        parse_addr(next_hop)?,
    )))
}

/// Reads all routes from a route dump. Lines that cannot be parsed are
/// logged and skipped, only I/O errors abort the read. Bytes that are not
/// valid UTF-8 are replaced before a line is parsed, so they only affect the
/// line they occur on.
pub fn read_routes<R: BufRead>(mut reader: R) -> std::io::Result<Vec<RouteEntry>> {
    let mut routes = vec![];
    let mut buf = vec![];
    let mut n = 0_usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        n += 1;
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        match parse_route_line(line) {
            Ok(Some(route)) => routes.push(route),
            Ok(None) => {}
            Err(err) => {
                warn!("{}", err);
                warn!("skipped line {}: {}", n, line);
            }
        }
    }
    Ok(routes)
}
