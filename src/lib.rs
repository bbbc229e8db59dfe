pub mod crc;
pub mod error;
pub mod ini;
pub mod volume;

pub use error::{Error, Result};

#[cfg(test)]
mod crc_tests {
    use crate::crc::*;

    #[test]
    fn empty_input() {
        assert_eq!(Crc32::new().finalize(), 0);
        assert_eq!(Crc32::calculate(&[]), 0);
    }

    #[test]
    fn known_values() {
        assert_eq!(Crc32::calculate(b"123"), 0x884863d2);
        assert_eq!(Crc32::calculate(b"123456789"), 0xcbf43926);
        assert_eq!(Crc32::calculate(b"a"), 0xe8b7be43);
        assert_eq!(Crc32::calculate(b"The quick brown fox jumps over the lazy dog"), 0x414fa339);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut crc = Crc32::new();
        crc.update_bytes(b"123");
        assert_eq!(crc.finalize(), crc.finalize());
    }

    #[test]
    fn update_after_finalize_continues() {
        let mut crc = Crc32::new();
        crc.update_bytes(b"1234");
        let _ = crc.finalize();
        crc.update_bytes(b"56789");
        assert_eq!(crc.finalize(), 0xcbf43926);
    }

    #[test]
    fn split_updates() {
        let data = b"The quick brown fox jumps over the lazy dog";
        for split in 0..=data.len() {
            let (left, right) = data.split_at(split);
            let mut crc = Crc32::new();
            crc.update_bytes(left);
            crc.update_bytes(right);
            assert_eq!(crc.finalize(), 0x414fa339, "split at {split}");
        }
    }

    #[test]
    fn reset() {
        let mut crc = Crc32::new();
        crc.update_bytes(b"garbage");
        crc.reset();
        assert_eq!(crc, Crc32::new());
        crc.update_bytes(b"123");
        assert_eq!(crc.finalize(), 0x884863d2);
    }

    #[test]
    fn batch_matches_single_bytes() {
        let data = b"ssid=home\npass=secret\n";
        let mut batch = Crc32::new();
        batch.update_bytes(data);
        let mut single = Crc32::new();
        data.iter().for_each(|byte| single.update(*byte));
        assert_eq!(batch, single);
        assert_eq!(batch.finalize(), 0x52f6de4e);
    }

    #[test]
    fn zero_length_update() {
        let mut crc = Crc32::new();
        crc.update_bytes(b"123");
        crc.update_bytes(&[]);
        crc.update_values::<u32>(&[]);
        assert_eq!(crc.finalize(), 0x884863d2);
    }

    #[test]
    fn calculate_matches_accumulator() {
        let mut crc = Crc32::default();
        crc.update_bytes(b"123456789");
        assert_eq!(Crc32::calculate(b"123456789"), crc.finalize());
    }

    #[test]
    fn values_use_memory_layout() {
        let value = 0x01020304u32;
        assert_eq!(Crc32::calculate_values(&[value]), Crc32::calculate(&value.to_ne_bytes()));

        let mut crc = Crc32::new();
        crc.update_value(&0x0102u16);
        if cfg!(target_endian = "little") {
            assert_eq!(crc.finalize(), 0x04e840eb);
        } else {
            assert_eq!(crc.finalize(), 0xb6cc4292);
        }
    }

    #[test]
    fn arrays_are_flattened() {
        let values = [[1u16, 2], [3, 4]];
        let bytes: Vec<u8> = [1u16, 2, 3, 4].iter().flat_map(|v| v.to_ne_bytes()).collect();
        assert_eq!(Crc32::calculate_values(&values), Crc32::calculate(&bytes));
        assert_eq!(Crc32::calculate_values(&[b'1', b'2', b'3']), 0x884863d2);
    }

    #[test]
    fn as_writer() {
        let mut crc = Crc32::new();
        std::io::copy(&mut &b"123456789"[..], &mut crc).unwrap();
        assert_eq!(crc.finalize(), 0xcbf43926);
    }

    #[test]
    fn parse_hex_checksums() {
        assert_eq!(parse_checksum("cbf43926"), Ok(0xcbf43926));
        assert_eq!(parse_checksum("0xcbf43926"), Ok(0xcbf43926));
        assert_eq!(parse_checksum("0XCBF43926"), Ok(0xcbf43926));
        assert!(parse_checksum("0x0xcbf43926").is_err());
        assert!(parse_checksum("0x").is_err());
        assert!(parse_checksum("1cbf43926").is_err());
    }

    #[test]
    fn as_hasher() {
        use std::hash::Hasher;
        let mut crc = Crc32::new();
        crc.write(b"123");
        assert_eq!(crc.finish(), 0x884863d2);
    }
}
