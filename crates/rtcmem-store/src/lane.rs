//! Lane extraction and insertion within a 32-bit cell.

/// Byte in lane `lane` (0..4) of `cell`.
#[inline]
pub(crate) fn byte_lane(cell: u32, lane: u16) -> u8 {
    (cell >> (lane * 8)) as u8
}

/// `cell` with byte lane `lane` replaced by `value`; other lanes untouched.
#[inline]
pub(crate) fn with_byte_lane(cell: u32, lane: u16, value: u8) -> u32 {
    let shift = lane * 8;
    (cell & !(0xFF << shift)) | ((value as u32) << shift)
}

/// Word in lane `lane` (0..2) of `cell`.
#[inline]
pub(crate) fn word_lane(cell: u32, lane: u16) -> u16 {
    (cell >> (lane * 16)) as u16
}

/// `cell` with word lane `lane` replaced by `value`.
#[inline]
pub(crate) fn with_word_lane(cell: u32, lane: u16, value: u16) -> u32 {
    let shift = lane * 16;
    (cell & !(0xFFFF << shift)) | ((value as u32) << shift)
}

/// A cell with `pattern` in all four byte lanes.
#[inline]
pub(crate) fn replicate(pattern: u8) -> u32 {
    u32::from_le_bytes([pattern; 4])
}
