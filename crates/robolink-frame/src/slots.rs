//! Fixed-capacity record lists where `id == 0` marks an empty slot.

use crate::error::{DeviceCategory, FrameError, Result};

/// A record stored in a fixed-size slot array.
pub(crate) trait Slot: Copy + Default {
    fn id(&self) -> u8;

    fn is_present(&self) -> bool {
        self.id() != 0
    }
}

pub(crate) fn populated<S: Slot>(slots: &[S]) -> impl Iterator<Item = &S> {
    slots.iter().filter(|slot| slot.is_present())
}

pub(crate) fn count<S: Slot>(slots: &[S]) -> usize {
    populated(slots).count()
}

pub(crate) fn find<S: Slot>(slots: &[S], id: u8) -> Option<&S> {
    if id == 0 {
        return None;
    }
    slots.iter().find(|slot| slot.id() == id)
}

pub(crate) fn find_mut<S: Slot>(slots: &mut [S], id: u8) -> Option<&mut S> {
    if id == 0 {
        return None;
    }
    slots.iter_mut().find(|slot| slot.id() == id)
}

/// Stores `record` in the first empty slot.
pub(crate) fn insert<S: Slot>(slots: &mut [S], record: S, category: DeviceCategory) -> Result<()> {
    let Some(index) = slots.iter().position(|slot| !slot.is_present()) else {
        return Err(FrameError::SlotsFull {
            category,
            capacity: slots.len(),
        });
    };
    check_new_id(slots, record.id(), index, category)?;
    slots[index] = record;
    Ok(())
}

/// Empties the slot holding `id` and returns its previous content.
pub(crate) fn remove<S: Slot>(slots: &mut [S], id: u8) -> Option<S> {
    find_mut(slots, id).map(std::mem::take)
}

/// Validates the id of the record about to land at `index`.
///
/// `existing` holds the records accepted so far in the same category.
pub(crate) fn check_new_id<S: Slot>(
    existing: &[S],
    id: u8,
    index: usize,
    category: DeviceCategory,
) -> Result<()> {
    if id == 0 {
        return Err(FrameError::InvalidDeviceId { category, index });
    }
    if find(existing, id).is_some() {
        return Err(FrameError::DuplicateDeviceId { category, id });
    }
    Ok(())
}

/// Rejects header counts the slot array cannot represent.
pub(crate) fn check_declared(category: DeviceCategory, declared: usize, capacity: usize) -> Result<()> {
    if declared > capacity {
        return Err(FrameError::CapacityExceeded {
            category,
            declared,
            capacity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Tag(u8);

    impl Slot for Tag {
        fn id(&self) -> u8 {
            self.0
        }
    }

    #[test]
    fn insert_fills_first_gap() {
        let mut slots = [Tag(3), Tag(0), Tag(5), Tag(0)];
        insert(&mut slots, Tag(9), DeviceCategory::Servo).unwrap();
        assert_eq!(slots, [Tag(3), Tag(9), Tag(5), Tag(0)]);
        assert_eq!(count(&slots), 3);
    }

    #[test]
    fn insert_rejects_zero_duplicate_and_full() {
        let mut slots = [Tag(1), Tag(0)];
        assert!(matches!(
            insert(&mut slots, Tag(0), DeviceCategory::Brushless),
            Err(FrameError::InvalidDeviceId { index: 1, .. })
        ));
        assert!(matches!(
            insert(&mut slots, Tag(1), DeviceCategory::Brushless),
            Err(FrameError::DuplicateDeviceId { id: 1, .. })
        ));
        insert(&mut slots, Tag(2), DeviceCategory::Brushless).unwrap();
        assert!(matches!(
            insert(&mut slots, Tag(3), DeviceCategory::Brushless),
            Err(FrameError::SlotsFull { capacity: 2, .. })
        ));
    }

    #[test]
    fn remove_leaves_tombstone() {
        let mut slots = [Tag(4), Tag(6)];
        assert_eq!(remove(&mut slots, 4), Some(Tag(4)));
        assert_eq!(slots, [Tag(0), Tag(6)]);
        assert_eq!(remove(&mut slots, 4), None);
        assert_eq!(remove(&mut slots, 0), None);
    }

    #[test]
    fn zero_id_never_found() {
        let slots = [Tag(0), Tag(2)];
        assert!(find(&slots, 0).is_none());
        assert_eq!(find(&slots, 2), Some(&Tag(2)));
    }
}
