//! Boundary traits for the platform memory and constant source data.

/// Cell-granularity access to a battery-retained memory region.
///
/// The platform exposes the region only as 32-bit cells. Implementations
/// are synchronous and infallible for any `index < cell_count()`; callers
/// in this workspace validate ranges before issuing cell operations, so an
/// out-of-range index is a caller bug and may panic.
///
/// Byte lane `k` of a cell occupies bits `8k..8k + 8`, so the bytes of a
/// region read in offset order are the little-endian bytes of its cells.
pub trait CellStore {
    /// Number of 32-bit cells in the region.
    fn cell_count(&self) -> u16;

    /// Read the cell at `index`.
    fn read_cell(&self, index: u16) -> u32;

    /// Overwrite the cell at `index`.
    fn write_cell(&mut self, index: u16, value: u32);

    /// Read `out.len()` consecutive cells starting at `start`.
    ///
    /// Backends with a cheaper block transfer should override this.
    fn read_cells(&self, start: u16, out: &mut [u32]) {
        for (i, cell) in out.iter_mut().enumerate() {
            *cell = self.read_cell(start + i as u16);
        }
    }

    /// Write `cells` to consecutive cells starting at `start`.
    fn write_cells(&mut self, start: u16, cells: &[u32]) {
        for (i, &cell) in cells.iter().enumerate() {
            self.write_cell(start + i as u16, cell);
        }
    }

    /// Platform-chosen offset of the region within a larger shared memory.
    ///
    /// Reported for diagnostics only; nothing in the core interprets it.
    fn base_offset(&self) -> u16 {
        0
    }
}

impl<C: CellStore + ?Sized> CellStore for &mut C {
    fn cell_count(&self) -> u16 {
        (**self).cell_count()
    }

    fn read_cell(&self, index: u16) -> u32 {
        (**self).read_cell(index)
    }

    fn write_cell(&mut self, index: u16, value: u32) {
        (**self).write_cell(index, value)
    }

    fn read_cells(&self, start: u16, out: &mut [u32]) {
        (**self).read_cells(start, out)
    }

    fn write_cells(&mut self, start: u16, cells: &[u32]) {
        (**self).write_cells(start, cells)
    }

    fn base_offset(&self) -> u16 {
        (**self).base_offset()
    }
}

/// Immutable source bytes that may not be directly addressable.
///
/// Models compiled-in defaults kept in program memory, where single bytes
/// and aligned dwords are fetched through dedicated accessors rather than
/// by slicing.
pub trait ConstSource {
    /// Number of source bytes.
    fn len(&self) -> usize;

    /// Whether the source holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the byte at `index`.
    fn read_byte(&self, index: usize) -> u8;

    /// Fetch the four bytes at `index..index + 4` as a little-endian dword.
    fn read_dword(&self, index: usize) -> u32 {
        u32::from_le_bytes([
            self.read_byte(index),
            self.read_byte(index + 1),
            self.read_byte(index + 2),
            self.read_byte(index + 3),
        ])
    }
}

impl ConstSource for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read_byte(&self, index: usize) -> u8 {
        self[index]
    }

    fn read_dword(&self, index: usize) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self[index..index + 4]);
        u32::from_le_bytes(bytes)
    }
}

impl<const N: usize> ConstSource for [u8; N] {
    fn len(&self) -> usize {
        N
    }

    fn read_byte(&self, index: usize) -> u8 {
        self[index]
    }

    fn read_dword(&self, index: usize) -> u32 {
        self.as_slice().read_dword(index)
    }
}

impl<S: ConstSource + ?Sized> ConstSource for &S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn read_byte(&self, index: usize) -> u8 {
        (**self).read_byte(index)
    }

    fn read_dword(&self, index: usize) -> u32 {
        (**self).read_dword(index)
    }
}
