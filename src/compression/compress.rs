use log::debug;

use super::decompress::MAX_OUTPUT;
use super::search::find_match;
use crate::error::{Error, Result};
use crate::token::header::MAX_LEN;
use crate::token::writer::TokenWriter;

/*
    Greedy single pass over the input.

    From the current position we look ahead, one candidate position at a time, for the
    first place where one of the match strategies applies. Whatever we skipped over on the
    way is written out as a literal, followed by the match. If nothing turns up within 1024
    bytes, those 1024 bytes become a literal and we carry on from there.
*/

/// Compress `data` into a token stream ending with the terminator byte.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }
    if data.len() > MAX_OUTPUT {
        return Err(Error::InputTooLarge {
            size: data.len(),
            max: MAX_OUTPUT,
        });
    }

    let mut tw = TokenWriter::new(data.len() + 1);
    let mut pos = 0;

    while pos < data.len() {
        let limit = data.len().min(pos + MAX_LEN);
        let mut pos2 = pos;
        let mut found = None;

        while pos2 < limit {
            if let Some(cmd) = find_match(data, pos2) {
                found = Some(cmd);
                break;
            }
            pos2 += 1;
        }

        // Flush whatever we skipped over, then the match if we found one
        tw.literal(&data[pos..pos2]);
        pos = match found {
            Some(cmd) => {
                tw.push(&cmd);
                pos2 + cmd.decoded_len()
            }
            None => pos2,
        };
    }

    let commands = tw.commands();
    let out = tw.finish();
    debug!(
        "Compressed {} bytes into {} bytes using {} commands.",
        data.len(),
        out.len(),
        commands
    );
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fill_then_literal_test() {
        let out = compress(&[0x05, 0x05, 0x05, 0x05, 0x01, 0x02]).unwrap();
        assert_eq!(out, [0x23, 0x05, 0x01, 0x01, 0x02, 0xFF]);
    }

    #[test]
    fn single_byte_test() {
        assert_eq!(compress(&[0x42]).unwrap(), [0x00, 0x42, 0xFF]);
    }

    #[test]
    fn empty_input_test() {
        assert!(matches!(compress(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn too_large_test() {
        let data = vec![0; MAX_OUTPUT + 1];
        assert!(matches!(
            compress(&data),
            Err(Error::InputTooLarge { size: 65537, .. })
        ));
    }

    #[test]
    fn fill_surrounded_test() {
        let out = compress(&[1, 9, 9, 9, 9, 9, 2]).unwrap();
        assert_eq!(out, [0x00, 1, 0x24, 9, 0x00, 2, 0xFF]);
    }

    #[test]
    fn long_fill_is_split_test() {
        let out = compress(&vec![7; 1500]).unwrap();
        // 1024 then 476
        assert_eq!(out, [0xE7, 0xFF, 7, 0xE5, 0xDB, 7, 0xFF]);
    }

    #[test]
    fn word_fill_test() {
        let out = compress(&[0xAB, 0xCD, 0xAB, 0xCD, 0xAB, 0xCD]).unwrap();
        assert_eq!(out, [0x42, 0xAB, 0xCD, 0xFF]);
    }

    #[test]
    fn sequence_test() {
        let out = compress(&[0xFE, 0xFF, 0x00, 0x01, 0x02]).unwrap();
        assert_eq!(out, [0x64, 0xFE, 0xFF]);
    }

    #[test]
    fn copy_forward_test() {
        let data = [0x10, 0x31, 0x22, 0x47, 0x13, 0x10, 0x31, 0x22, 0x47, 0x13];
        let out = compress(&data).unwrap();
        assert_eq!(
            out,
            [0x04, 0x10, 0x31, 0x22, 0x47, 0x13, 0x84, 0x00, 0x00, 0xFF]
        );
    }

    #[test]
    fn incompressible_window_test() {
        // xorshift noise has no pattern: literals are cut at the 1024 byte look-ahead window
        let mut x: u64 = 0x2545_F491_4F6C_DD1D;
        let data: Vec<u8> = (0..1100)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                (x >> 56) as u8
            })
            .collect();
        let out = compress(&data).unwrap();
        assert_eq!(&out[..2], &[0xE3, 0xFF]);
        assert_eq!(&out[1026..1028], &[0xE0, 75]);
        assert_eq!(out.len(), 2 + 1024 + 2 + 76 + 1);
    }
}
