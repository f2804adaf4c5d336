//! The fixed-size, flat value capability stored by record lists.

/// A value that can be stored as an opaque, fixed-size byte blob.
///
/// Implementors must be flat: no pointers, no references, no heap data.
/// `SIZE` is a compile-time constant and fixes how many records fit in the
/// data area. The byte layout is the implementor's concern; the list only
/// copies `SIZE` bytes in and out.
///
/// `encode` is always handed a buffer of exactly `SIZE` bytes, and `decode`
/// is always handed exactly `SIZE` bytes previously produced by `encode`
/// (or whatever happened to be in retained memory, for a list whose
/// checksum still matched).
pub trait Record: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Write the value's bytes into `out`.
    fn encode(&self, out: &mut [u8]);

    /// Reconstruct a value from its bytes.
    fn decode(bytes: &[u8]) -> Self;
}

macro_rules! le_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn encode(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

le_record!(u8, u16, u32, u64, i16, i32, i64, f32);

impl<const N: usize> Record for [u8; N] {
    const SIZE: usize = N;

    fn encode(&self, out: &mut [u8]) {
        out.copy_from_slice(self);
    }

    fn decode(bytes: &[u8]) -> Self {
        let mut raw = [0u8; N];
        raw.copy_from_slice(bytes);
        raw
    }
}
