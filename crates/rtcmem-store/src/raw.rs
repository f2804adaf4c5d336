//! Aligned reinterpretation of byte buffers as cell slices.
//!
//! Lets the aligned middle of a bulk load or store hand the caller's
//! buffer straight to [`CellStore::read_cells`] /
//! [`CellStore::write_cells`] instead of decomposing each cell.
//!
//! Only valid on little-endian targets, where the in-memory bytes of a
//! `u32` are its byte lanes in offset order. On big-endian targets both
//! functions return `None` and callers take the per-cell path.
//!
//! [`CellStore::read_cells`]: rtcmem_core::CellStore::read_cells
//! [`CellStore::write_cells`]: rtcmem_core::CellStore::write_cells

#![allow(unsafe_code)]

/// View `bytes` as cells if it is 4-byte aligned and a whole number of cells.
pub(crate) fn as_cells(bytes: &[u8]) -> Option<&[u32]> {
    if cfg!(target_endian = "big") {
        return None;
    }
    // SAFETY: every bit pattern is a valid u32, and `align_to` only places
    // correctly aligned, in-bounds elements in the middle slice.
    let (head, cells, tail) = unsafe { bytes.align_to::<u32>() };
    (head.is_empty() && tail.is_empty()).then_some(cells)
}

/// Mutable variant of [`as_cells`].
pub(crate) fn as_cells_mut(bytes: &mut [u8]) -> Option<&mut [u32]> {
    if cfg!(target_endian = "big") {
        return None;
    }
    // SAFETY: as for `as_cells`; additionally every bit pattern is a valid
    // u8, so writes through the u32 view cannot create invalid bytes.
    let (head, cells, tail) = unsafe { bytes.align_to_mut::<u32>() };
    if head.is_empty() && tail.is_empty() {
        Some(cells)
    } else {
        None
    }
}
