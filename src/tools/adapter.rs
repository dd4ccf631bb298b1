//! Conversions between lists of integers and byte buffers.
//!
//! Callers (scripts, project files, the `--list` mode of the command line tool) hand the
//! codec lists of integers rather than raw bytes. These helpers validate such lists on the
//! way in and produce them on the way out, so the codec itself only ever sees `&[u8]`.

use crate::error::{Error, Result};

/// Convert a list of integers into a byte buffer. The list must not be empty and every value
/// must be in 0..=255.
pub fn to_byte_buffer(values: &[i64]) -> Result<Vec<u8>> {
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value < 0 {
                Err(Error::NegativeValue { index, value })
            } else {
                u8::try_from(value).map_err(|_| Error::ValueOutOfRange { index, value })
            }
        })
        .collect()
}

pub fn from_byte_buffer(bytes: &[u8]) -> Vec<i64> {
    bytes.iter().map(|&b| b as i64).collect()
}

/// Parse whitespace or comma separated integers, decimal or `0x` prefixed hex.
pub fn parse_int_list(text: &str) -> Result<Vec<i64>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            parse_int(token).ok_or_else(|| Error::NotAnInteger {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse one integer, decimal or `0x` prefixed hex, with an optional leading minus.
pub fn parse_int(token: &str) -> Option<i64> {
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let value = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative { -value } else { value })
}

/// Format integers as a comma separated list, 16 to a line.
pub fn format_int_list(values: &[i64]) -> String {
    let mut text = values
        .chunks(16)
        .map(|line| {
            line.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join(",\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn to_byte_buffer_test() {
        assert_eq!(to_byte_buffer(&[0, 1, 255]).unwrap(), [0, 1, 255]);
        assert!(matches!(to_byte_buffer(&[]), Err(Error::EmptyInput)));
        assert!(matches!(
            to_byte_buffer(&[1, -3]),
            Err(Error::NegativeValue { index: 1, value: -3 })
        ));
        assert!(matches!(
            to_byte_buffer(&[256]),
            Err(Error::ValueOutOfRange {
                index: 0,
                value: 256
            })
        ));
    }

    #[test]
    fn from_byte_buffer_test() {
        assert_eq!(from_byte_buffer(&[0xFF, 0x00]), [255, 0]);
    }

    #[test]
    fn parse_int_list_test() {
        assert_eq!(
            parse_int_list("1, 2,3\n0x10  -4\n").unwrap(),
            [1, 2, 3, 16, -4]
        );
        assert!(parse_int_list("").unwrap().is_empty());
    }

    #[test]
    fn not_an_integer_test() {
        match parse_int_list("1, 2.5, 3") {
            Err(Error::NotAnInteger { index, token }) => {
                assert_eq!(index, 1);
                assert_eq!(token, "2.5");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn format_round_trip_test() {
        let values: Vec<i64> = (0..40).collect();
        let text = format_int_list(&values);
        assert_eq!(text.lines().count(), 3);
        assert_eq!(parse_int_list(&text).unwrap(), values);
    }
}
