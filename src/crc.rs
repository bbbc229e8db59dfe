/// Reversed CRC-32 polynomial (0xedb88320) sampled per nibble: entry `i` is the
/// byte-wise table entry `i * 16`.
const TABLE: [u32; 16] = [
    0x00000000, 0x1db71064, 0x3b6e20c8, 0x26d930ac,
    0x76dc4190, 0x6b6b51f4, 0x4db26158, 0x5005713c,
    0xedb88320, 0xf00f9344, 0xd6d6a3e8, 0xcb61b38c,
    0x9b64c2b0, 0x86d3d2d4, 0xa00ae278, 0xbdbdf21c,
];

/// Running CRC-32 over a byte stream, fed one nibble at a time.
///
/// `finalize` only reads the state, so an accumulator can keep taking bytes
/// after a checksum has been taken from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    pub fn new() -> Self {
        Self { state: !0 }
    }

    pub fn reset(&mut self) {
        self.state = !0;
    }

    pub fn update(&mut self, byte: u8) {
        let index = (self.state ^ byte as u32) & 0x0f;
        self.state = TABLE[index as usize] ^ (self.state >> 4);
        let index = (self.state ^ (byte >> 4) as u32) & 0x0f;
        self.state = TABLE[index as usize] ^ (self.state >> 4);
    }

    pub fn update_bytes(&mut self, bytes: &[u8]) {
        bytes.iter().for_each(|byte| self.update(*byte));
    }

    /// Feeds the in-memory representation of `value`, in host byte order.
    pub fn update_value<T: RawBytes>(&mut self, value: &T) {
        value.for_each_byte(&mut |byte| self.update(byte));
    }

    pub fn update_values<T: RawBytes>(&mut self, values: &[T]) {
        values.iter().for_each(|value| self.update_value(value));
    }

    pub fn finalize(&self) -> u32 {
        !self.state
    }

    pub fn calculate(bytes: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update_bytes(bytes);
        crc.finalize()
    }

    pub fn calculate_values<T: RawBytes>(values: &[T]) -> u32 {
        let mut crc = Self::new();
        crc.update_values(values);
        crc.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::io::Write for Crc32 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::hash::Hasher for Crc32 {
    fn write(&mut self, bytes: &[u8]) {
        self.update_bytes(bytes);
    }

    fn finish(&self) -> u64 {
        self.finalize() as u64
    }
}

/// Parses a checksum written as hex, with or without a `0x`/`0X` prefix.
pub fn parse_checksum(s: &str) -> Result<u32, std::num::ParseIntError> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    u32::from_str_radix(digits, 16)
}

/// Fixed-width values that can be checksummed as the bytes they occupy in memory.
pub trait RawBytes {
    fn for_each_byte(&self, f: &mut dyn FnMut(u8));
}

macro_rules! raw_bytes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RawBytes for $ty {
                fn for_each_byte(&self, f: &mut dyn FnMut(u8)) {
                    self.to_ne_bytes().into_iter().for_each(f);
                }
            }
        )*
    };
}

raw_bytes!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl RawBytes for bool {
    fn for_each_byte(&self, f: &mut dyn FnMut(u8)) {
        f(*self as u8);
    }
}

impl RawBytes for char {
    fn for_each_byte(&self, f: &mut dyn FnMut(u8)) {
        (*self as u32).for_each_byte(f);
    }
}

impl<T: RawBytes, const N: usize> RawBytes for [T; N] {
    fn for_each_byte(&self, f: &mut dyn FnMut(u8)) {
        for value in self {
            value.for_each_byte(f);
        }
    }
}
