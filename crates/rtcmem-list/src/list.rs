//! The bounded record list.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use rtcmem_core::layout::{DATA_SIZE, REGION_SIZE};
use rtcmem_core::{CellStore, ListError, Record};
use rtcmem_store::WordStore;
use smallvec::{smallvec, SmallVec};

use crate::footer::Footer;
use crate::status::{Corruption, OpenStatus};

/// Encoding buffer for one record; spills to the heap only for records
/// larger than 32 bytes.
type RecordBuf = SmallVec<[u8; 32]>;

/// What [`RecordList::add`] does when the list is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnFull {
    /// Leave the list unchanged and return [`ListError::Full`].
    Reject,
    /// Drop the record at index 0, shift the rest down, append at the end.
    EvictOldest,
}

/// A bounded list of `T` records persisted in a retained memory region.
///
/// State machine over `len()`: empty, populated, full. Once full, adding
/// with [`OnFull::EvictOldest`] turns the list into a FIFO ring.
///
/// Every mutation writes its record bytes first and then a fresh footer,
/// so reopening the same region with [`RecordList::open`] reproduces the
/// list exactly.
pub struct RecordList<T, C> {
    store: WordStore<C>,
    len: u16,
    status: OpenStatus,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, C: CellStore> RecordList<T, C> {
    /// Maximum number of records: `(REGION_SIZE - 4) / T::SIZE`.
    ///
    /// Using a record type that is empty or does not fit the data area is
    /// a compile-time error.
    pub const MAX_LEN: u16 = {
        assert!(T::SIZE > 0, "record type has zero size");
        assert!(
            T::SIZE <= DATA_SIZE as usize,
            "record type does not fit the data area"
        );
        (DATA_SIZE as usize / T::SIZE) as u16
    };

    const RECORD_SIZE: u16 = T::SIZE as u16;

    /// Open the list persisted in `store`.
    ///
    /// Validates the footer. When the checksum does not match, or the
    /// count exceeds [`MAX_LEN`](Self::MAX_LEN), the list is reset to
    /// empty, a fresh footer is written, and the reason is available from
    /// [`open_status`](Self::open_status).
    ///
    /// Fails only when `store` is not exactly one region in size.
    pub fn open(mut store: WordStore<C>) -> Result<Self, ListError> {
        if store.size() != REGION_SIZE {
            return Err(ListError::RegionSize {
                expected: REGION_SIZE,
                found: store.size(),
            });
        }

        let (footer, corruption) = Self::inspect(&store)?;
        let (len, status) = match corruption {
            None => (footer.count, OpenStatus::Intact),
            Some(c) => {
                tracing::warn!(
                    base = store.cells().base_offset(),
                    corruption = %c,
                    "retained record list invalid, resetting to empty"
                );
                Footer::seal(&store, 0)?.write(&mut store)?;
                (0, OpenStatus::Recovered(c))
            }
        };

        tracing::debug!(len, capacity = Self::MAX_LEN, "record list opened");
        Ok(Self {
            store,
            len,
            status,
            _record: PhantomData,
        })
    }

    /// What [`open`](Self::open) found in the region.
    pub fn open_status(&self) -> OpenStatus {
        self.status
    }

    /// Number of records. Cached; no memory access.
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Whether the list holds no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the list holds [`MAX_LEN`](Self::MAX_LEN) records.
    pub fn is_full(&self) -> bool {
        self.len == Self::MAX_LEN
    }

    /// Maximum number of records.
    pub fn capacity(&self) -> u16 {
        Self::MAX_LEN
    }

    /// The underlying store.
    pub fn store(&self) -> &WordStore<C> {
        &self.store
    }

    /// Release the underlying store. The list's state stays in the region.
    pub fn into_store(self) -> WordStore<C> {
        self.store
    }

    /// Append `record`, returning its index.
    ///
    /// On a full list, [`OnFull::Reject`] returns [`ListError::Full`] and
    /// changes nothing; [`OnFull::EvictOldest`] drops record 0, shifts the
    /// others down one slot, and stores `record` at `MAX_LEN - 1`.
    pub fn add(&mut self, record: &T, on_full: OnFull) -> Result<u16, ListError> {
        if self.len < Self::MAX_LEN {
            let index = self.len;
            self.store.store(Self::slot(index), &Self::encode(record))?;
            self.len += 1;
            self.seal()?;
            return Ok(index);
        }

        if on_full == OnFull::Reject {
            return Err(ListError::Full {
                capacity: Self::MAX_LEN,
            });
        }

        let last = Self::MAX_LEN - 1;
        if last > 0 {
            self.store
                .move_within(0, Self::RECORD_SIZE, Self::RECORD_SIZE * last)?;
        }
        tracing::trace!(capacity = Self::MAX_LEN, "evicted oldest record");
        self.store.store(Self::slot(last), &Self::encode(record))?;
        self.seal()?;
        Ok(last)
    }

    /// Append `record`, failing with [`ListError::Full`] on a full list.
    pub fn push(&mut self, record: &T) -> Result<u16, ListError> {
        self.add(record, OnFull::Reject)
    }

    /// Append `record`, evicting the oldest record on a full list.
    pub fn push_evicting(&mut self, record: &T) -> Result<u16, ListError> {
        self.add(record, OnFull::EvictOldest)
    }

    /// Remove the record at `index`, shifting later records down one slot.
    pub fn remove(&mut self, index: u16) -> Result<(), ListError> {
        self.check_index(index)?;
        let last = self.len - 1;
        if index < last {
            let tail = Self::RECORD_SIZE * (last - index);
            self.store
                .move_within(Self::slot(index), Self::slot(index + 1), tail)?;
        }
        self.len -= 1;
        self.seal()
    }

    /// Read the record at `index`.
    ///
    /// Trusts the length validated at open; the checksum is not re-verified.
    pub fn get(&self, index: u16) -> Result<T, ListError> {
        self.check_index(index)?;
        let mut buf: RecordBuf = smallvec![0; T::SIZE];
        self.store.load_into(Self::slot(index), &mut buf)?;
        Ok(T::decode(&buf))
    }

    /// Read the record at `index` into `out`.
    pub fn get_into(&self, index: u16, out: &mut T) -> Result<(), ListError> {
        *out = self.get(index)?;
        Ok(())
    }

    /// The oldest record.
    pub fn first(&self) -> Option<T> {
        self.get(0).ok()
    }

    /// The newest record.
    pub fn last(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|i| self.get(i).ok())
    }

    /// Overwrite the record at `index`.
    pub fn set(&mut self, index: u16, record: &T) -> Result<(), ListError> {
        self.check_index(index)?;
        self.store.store(Self::slot(index), &Self::encode(record))?;
        self.seal()
    }

    /// Empty the list. Record bytes stay in the region but are unreachable.
    pub fn clear(&mut self) -> Result<(), ListError> {
        self.len = 0;
        self.seal()
    }

    /// Recheck the region the way [`open`](Self::open) does.
    ///
    /// `None` when the stored footer is still valid. Repairs nothing.
    pub fn verify(&self) -> Result<Option<Corruption>, ListError> {
        Ok(Self::inspect(&self.store)?.1)
    }

    /// Records from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            list: self,
            front: 0,
            back: self.len,
        }
    }

    fn inspect(store: &WordStore<C>) -> Result<(Footer, Option<Corruption>), ListError> {
        let footer = Footer::read(store)?;
        let sealed = Footer::seal(store, footer.count)?;
        let corruption = if sealed.crc != footer.crc {
            Some(Corruption::ChecksumMismatch {
                stored: footer.crc,
                computed: sealed.crc,
            })
        } else if footer.count > Self::MAX_LEN {
            Some(Corruption::CountOutOfRange {
                stored: footer.count,
                max: Self::MAX_LEN,
            })
        } else {
            None
        };
        Ok((footer, corruption))
    }

    fn check_index(&self, index: u16) -> Result<(), ListError> {
        if index >= self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn slot(index: u16) -> u16 {
        index * Self::RECORD_SIZE
    }

    fn encode(record: &T) -> RecordBuf {
        let mut buf: RecordBuf = smallvec![0; T::SIZE];
        record.encode(&mut buf);
        buf
    }

    fn seal(&mut self) -> Result<(), ListError> {
        Footer::seal(&self.store, self.len)?.write(&mut self.store)?;
        Ok(())
    }
}

impl<'a, T: Record, C: CellStore> IntoIterator for &'a RecordList<T, C> {
    type Item = T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`RecordList`], oldest first.
///
/// Yields exactly `len()` records. `front..back` always lies inside
/// `0..len`, so every slot read stays inside the data area and cannot
/// fail.
pub struct Iter<'a, T, C> {
    list: &'a RecordList<T, C>,
    front: u16,
    back: u16,
}

impl<T: Record, C: CellStore> Iterator for Iter<'_, T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let record = self.list.get(self.front).ok();
        self.front += 1;
        record
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.back - self.front) as usize;
        (n, Some(n))
    }
}

impl<T: Record, C: CellStore> DoubleEndedIterator for Iter<'_, T, C> {
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.list.get(self.back).ok()
    }
}

impl<T: Record, C: CellStore> ExactSizeIterator for Iter<'_, T, C> {}

impl<T: Record, C: CellStore> FusedIterator for Iter<'_, T, C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rtcmem_core::layout::CRC_WORD;
    use rtcmem_store::ArrayCells;
    use rtcmem_test_utils::{MockCells, Reading};

    type Readings<'a> = RecordList<Reading, &'a mut ArrayCells>;

    fn open(cells: &mut ArrayCells) -> Readings<'_> {
        RecordList::open(WordStore::new(cells).unwrap()).unwrap()
    }

    fn filled(cells: &mut ArrayCells) -> Readings<'_> {
        let mut list = open(cells);
        for n in 0..Readings::MAX_LEN as u32 {
            list.push(&Reading::numbered(n)).unwrap();
        }
        list
    }

    #[test]
    fn max_len_follows_record_size() {
        assert_eq!(RecordList::<Reading, ArrayCells>::MAX_LEN, 42);
        assert_eq!(RecordList::<u32, ArrayCells>::MAX_LEN, 127);
        assert_eq!(RecordList::<u8, ArrayCells>::MAX_LEN, 508);
        assert_eq!(RecordList::<[u8; 508], ArrayCells>::MAX_LEN, 1);
    }

    #[test]
    fn zeroed_region_opens_empty_and_recovered() {
        let mut cells = ArrayCells::new();
        let list = open(&mut cells);
        assert!(list.is_empty());
        assert_eq!(
            list.open_status(),
            OpenStatus::Recovered(Corruption::ChecksumMismatch {
                stored: 0,
                computed: 0x44B7,
            })
        );
        drop(list);
        assert_eq!(cells.as_cells()[127], 0x44B7_0000);
    }

    #[test]
    fn sealed_region_reopens_intact() {
        let mut cells = ArrayCells::new();
        drop(open(&mut cells));
        let list = open(&mut cells);
        assert_eq!(list.open_status(), OpenStatus::Intact);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn wrong_region_size_is_rejected() {
        let store = WordStore::new(MockCells::new(64)).unwrap();
        let result = RecordList::<Reading, _>::open(store);
        assert!(matches!(
            result,
            Err(ListError::RegionSize {
                expected: 512,
                found: 256
            })
        ));
    }

    #[test]
    fn add_appends_and_get_returns_it() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        assert_eq!(list.push(&Reading::numbered(1)).unwrap(), 0);
        assert_eq!(list.push(&Reading::numbered(2)).unwrap(), 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap(), Reading::numbered(2));
        assert_eq!(list.first(), Some(Reading::numbered(1)));
        assert_eq!(list.last(), Some(Reading::numbered(2)));
    }

    #[test]
    fn records_are_packed_from_offset_zero() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        list.push(&Reading::numbered(1)).unwrap();
        list.push(&Reading::numbered(2)).unwrap();
        let bytes = list.store().load(12, 4).unwrap();
        assert_eq!(bytes.as_slice(), &2u32.to_le_bytes());
    }

    #[test]
    fn full_list_rejects_without_change() {
        let mut cells = ArrayCells::new();
        let mut list = filled(&mut cells);
        assert!(list.is_full());
        let before = list.store().load(0, 512).unwrap();
        assert_eq!(
            list.add(&Reading::numbered(99), OnFull::Reject),
            Err(ListError::Full { capacity: 42 })
        );
        assert_eq!(list.store().load(0, 512).unwrap(), before);
        assert_eq!(list.len(), 42);
    }

    #[test]
    fn full_list_evicts_oldest() {
        let mut cells = ArrayCells::new();
        let mut list = filled(&mut cells);
        assert_eq!(list.push_evicting(&Reading::numbered(100)).unwrap(), 41);
        assert_eq!(list.len(), 42);
        assert_eq!(list.get(0).unwrap(), Reading::numbered(1));
        assert_eq!(list.get(40).unwrap(), Reading::numbered(41));
        assert_eq!(list.get(41).unwrap(), Reading::numbered(100));
        assert_eq!(list.verify().unwrap(), None);
    }

    #[test]
    fn single_slot_list_evicts_in_place() {
        let mut cells = ArrayCells::new();
        let mut list: RecordList<[u8; 300], _> =
            RecordList::open(WordStore::new(&mut cells).unwrap()).unwrap();
        list.push(&[1; 300]).unwrap();
        assert_eq!(list.push_evicting(&[2; 300]).unwrap(), 0);
        assert_eq!(list.get(0).unwrap(), [2; 300]);
    }

    #[test]
    fn remove_middle_shifts_later_records() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        for n in 0..5 {
            list.push(&Reading::numbered(n)).unwrap();
        }
        list.remove(1).unwrap();
        let left: Vec<u32> = list.iter().map(|r| r.seq).collect();
        assert_eq!(left, vec![0, 2, 3, 4]);
    }

    #[test]
    fn remove_last_only_shrinks() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        list.push(&Reading::numbered(0)).unwrap();
        list.push(&Reading::numbered(1)).unwrap();
        list.remove(1).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.last(), Some(Reading::numbered(0)));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        list.push(&Reading::numbered(0)).unwrap();
        let err = ListError::IndexOutOfRange { index: 1, len: 1 };
        assert_eq!(list.get(1).unwrap_err(), err);
        assert_eq!(list.remove(1).unwrap_err(), err);
        assert_eq!(list.set(1, &Reading::default()).unwrap_err(), err);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn set_updates_record_and_checksum() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        list.push(&Reading::numbered(0)).unwrap();
        let crc_before = list.store().read_word(CRC_WORD).unwrap();
        list.set(0, &Reading::numbered(5)).unwrap();
        assert_eq!(list.get(0).unwrap(), Reading::numbered(5));
        assert_ne!(list.store().read_word(CRC_WORD).unwrap(), crc_before);
        assert_eq!(list.verify().unwrap(), None);
    }

    #[test]
    fn get_into_overwrites_out() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        list.push(&Reading::numbered(3)).unwrap();
        let mut out = Reading::default();
        list.get_into(0, &mut out).unwrap();
        assert_eq!(out, Reading::numbered(3));
    }

    #[test]
    fn clear_keeps_data_bytes() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        list.push(&Reading::numbered(7)).unwrap();
        list.clear().unwrap();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.store().load(0, 4).unwrap().as_slice(), &7u32.to_le_bytes());
    }

    #[test]
    fn iter_runs_both_ways() {
        let mut cells = ArrayCells::new();
        let mut list = open(&mut cells);
        for n in 0..3 {
            list.push(&Reading::numbered(n)).unwrap();
        }
        let it = list.iter();
        assert_eq!(it.len(), 3);
        let back: Vec<u32> = list.iter().rev().map(|r| r.seq).collect();
        assert_eq!(back, vec![2, 1, 0]);
        let fwd: Vec<u32> = (&list).into_iter().map(|r| r.seq).collect();
        assert_eq!(fwd, vec![0, 1, 2]);
    }

    #[test]
    fn iter_len_holds_when_both_ends_advance() {
        let mut cells = ArrayCells::new();
        let list = filled(&mut cells);
        let mut it = list.iter();
        let mut seen = 0;
        while it.len() > 0 {
            let expected = it.len() - 1;
            let r = if seen % 2 == 0 { it.next() } else { it.next_back() };
            assert!(r.is_some());
            assert_eq!(it.len(), expected);
            seen += 1;
        }
        assert_eq!(seen, 42);
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
        assert_eq!(list.iter().count(), list.len() as usize);
    }

    #[test]
    fn count_beyond_capacity_is_recovered() {
        let mut cells = ArrayCells::new();
        {
            // 100 u32 records fit; only 42 Readings do.
            let mut list: RecordList<u32, _> =
                RecordList::open(WordStore::new(&mut cells).unwrap()).unwrap();
            for n in 0..100 {
                list.push(&n).unwrap();
            }
        }
        let list = open(&mut cells);
        assert_eq!(
            list.open_status(),
            OpenStatus::Recovered(Corruption::CountOutOfRange {
                stored: 100,
                max: 42
            })
        );
        assert!(list.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        #[derive(Clone, Debug)]
        enum Op {
            Add(u32, bool),
            Remove(u16),
            Set(u16, u32),
            Clear,
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                6 => (any::<u32>(), any::<bool>()).prop_map(|(v, e)| Op::Add(v, e)),
                2 => (0u16..50).prop_map(Op::Remove),
                2 => (0u16..50, any::<u32>()).prop_map(|(i, v)| Op::Set(i, v)),
                1 => Just(Op::Clear),
            ]
        }

        proptest! {
            #[test]
            fn matches_vecdeque_model(ops in proptest::collection::vec(arb_op(), 1..120)) {
                let mut cells = ArrayCells::new();
                let mut model: VecDeque<Reading> = VecDeque::new();
                let cap = Readings::MAX_LEN as usize;

                for op in ops {
                    let mut list = open(&mut cells);
                    prop_assert_eq!(list.len() as usize, model.len());
                    match op {
                        Op::Add(v, evict) => {
                            let r = Reading::numbered(v);
                            let on_full = if evict { OnFull::EvictOldest } else { OnFull::Reject };
                            let result = list.add(&r, on_full);
                            if model.len() < cap {
                                prop_assert_eq!(result, Ok(model.len() as u16));
                                model.push_back(r);
                            } else if evict {
                                prop_assert_eq!(result, Ok(cap as u16 - 1));
                                model.pop_front();
                                model.push_back(r);
                            } else {
                                prop_assert_eq!(result, Err(ListError::Full { capacity: cap as u16 }));
                            }
                        }
                        Op::Remove(i) => {
                            let ok = list.remove(i).is_ok();
                            prop_assert_eq!(ok, (i as usize) < model.len());
                            if ok {
                                model.remove(i as usize);
                            }
                        }
                        Op::Set(i, v) => {
                            let r = Reading::numbered(v);
                            let ok = list.set(i, &r).is_ok();
                            prop_assert_eq!(ok, (i as usize) < model.len());
                            if ok {
                                model[i as usize] = r;
                            }
                        }
                        Op::Clear => {
                            list.clear().unwrap();
                            model.clear();
                        }
                    }
                    let got: Vec<Reading> = list.iter().collect();
                    prop_assert_eq!(got, model.iter().copied().collect::<Vec<_>>());
                }

                let list = open(&mut cells);
                prop_assert!(list.open_status().is_intact());
                prop_assert_eq!(list.len() as usize, model.len());
            }
        }
    }
}
