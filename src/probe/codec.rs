//! Wire codec for the database listener ping
//!
//! The request is a single CONNECT packet whose connect data asks the listener
//! for `(COMMAND=ping)`. The listener answers with a short packet and closes
//! the connection; the reply body after the packet header must be the fixed
//! `(DESCRIPTION=(TMP=)(VSNNUM=0)(ERR=0)(ALIAS=...))` description.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Connect data carried by the ping request
pub const PING_CONNECT_DATA: &[u8] = b"(CONNECT_DATA=(COMMAND=ping))";

/// Packet header and connect body preceding the connect data
const PING_REQUEST_HEADER: [u8; 58] = [
    // packet length (87), packet checksum, type CONNECT, reserved, header checksum
    0x00, 0x57, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
    // version 312, lowest compatible 300, service options
    0x01, 0x38, 0x01, 0x2c, 0x00, 0x00,
    // SDU 2048, TDU 32767
    0x08, 0x00, 0x7f, 0xff,
    // protocol characteristics, line turnaround, value of one
    0x7f, 0x08, 0x00, 0x00, 0x01, 0x00,
    // connect data length (29) and offset (58)
    0x00, 0x1d, 0x00, 0x3a,
    // max receivable data, connect flags, trace fields
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x19, 0x30, 0x00, 0x00, 0x00, 0x8d, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Total size of the ping request frame
pub const PING_REQUEST_LEN: usize = PING_REQUEST_HEADER.len() + PING_CONNECT_DATA.len();

/// The complete ping request frame
pub const PING_REQUEST: [u8; PING_REQUEST_LEN] = build_ping_request();

/// Bytes of the reply header that are skipped before validation
pub const RESPONSE_HEADER_LEN: usize = 12;

/// Pattern the reply body must match from its first character
pub const PING_RESPONSE_PATTERN: &str =
    r"^\(DESCRIPTION=\(TMP=\)\(VSNNUM=0\)\(ERR=0\)\(ALIAS=.*?\)\)";

const fn build_ping_request() -> [u8; PING_REQUEST_LEN] {
    let mut frame = [0u8; PING_REQUEST_LEN];
    let mut i = 0;
    while i < PING_REQUEST_HEADER.len() {
        frame[i] = PING_REQUEST_HEADER[i];
        i += 1;
    }
    let mut j = 0;
    while j < PING_CONNECT_DATA.len() {
        frame[i + j] = PING_CONNECT_DATA[j];
        j += 1;
    }
    frame
}

/// Errors raised while validating a listener reply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The reply did not carry the expected ping description
    #[error("Unexpected listener response: {0}")]
    UnexpectedResponse(String),
}

fn response_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(PING_RESPONSE_PATTERN).expect("ping response pattern is a valid regex")
    })
}

/// Encode the ping request frame
pub fn encode_ping_request() -> &'static [u8] {
    &PING_REQUEST
}

/// Validate a complete listener reply
///
/// The first [`RESPONSE_HEADER_LEN`] bytes are dropped without inspection,
/// the remainder must be valid UTF-8 starting with the ping description.
pub fn decode_ping_response(raw: &[u8]) -> Result<(), ProtocolError> {
    let body = raw.get(RESPONSE_HEADER_LEN..).unwrap_or(&[]);

    let text = std::str::from_utf8(body).map_err(|_| {
        ProtocolError::UnexpectedResponse(String::from_utf8_lossy(body).into_owned())
    })?;

    if response_pattern().is_match(text) {
        Ok(())
    } else {
        Err(ProtocolError::UnexpectedResponse(text.to_string()))
    }
}
