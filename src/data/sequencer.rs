// ============================================================
// Layer 4 — Label Sequencer
// ============================================================
// Expands content blocks into the exact list of label slots to
// print, in three phases:
//
//   1. Skip     — `skip` blank slots, for a sheet that already
//                 has some labels peeled off
//   2. Content  — each block's trimmed text, `repeat_count` times
//   3. Padding  — blank slots up to the next sheet boundary
//
// Example with skip=2, capacity=3, blocks [(1, "A"), (2, "B")]:
//   Skip:     _ _
//   Content:  A B B         (total = 5)
//   Padding:  _             (3 - 5 % 3 = 1)
//   Result:   _ _ A B B _   (two full sheets)
//
// When the total already fills whole sheets, the padding is a
// full extra sheet of blanks (capacity - 0 = capacity), never zero.
//
// The sequence is lazy: a block's source is only read when the
// iterator reaches it, and it is read exactly once.

use std::{iter::FusedIterator, num::NonZeroUsize, rc::Rc};

use crate::domain::label::{ContentBlock, LabelSlot};
use crate::error::LabelError;

/// Number of trailing blanks needed after `total` filled or skipped slots.
pub fn padding_for(total: usize, capacity: NonZeroUsize) -> usize {
    capacity.get() - total % capacity.get()
}

/// Length of the finished sequence for `total` skipped plus content slots.
pub fn sequence_len(total: usize, capacity: NonZeroUsize) -> usize {
    total + padding_for(total, capacity)
}

/// Build the label sequence for one run.
///
/// Fails with a configuration error when `sheet_capacity` is zero.
pub fn generate_content<I>(
    skip:           usize,
    sheet_capacity: usize,
    blocks:         I,
) -> Result<LabelSequence<I::IntoIter>, LabelError>
where
    I: IntoIterator<Item = ContentBlock>,
{
    LabelSequence::new(skip, sheet_capacity, blocks)
}

/// Where the sequence currently is
#[derive(Debug)]
enum Phase {
    Skip(usize),
    NextBlock,
    Repeat { text: Rc<str>, left: usize },
    Pad(usize),
    Done,
}

/// Single-pass iterator over the slots of a label run.
///
/// Yields `Err` at most once (when a block cannot be read) and is
/// exhausted afterwards.
#[derive(Debug)]
pub struct LabelSequence<I> {
    blocks:   I,
    capacity: NonZeroUsize,
    /// Skipped slots plus the repeat counts of every block reached so far
    total:    usize,
    phase:    Phase,
}

impl<I> LabelSequence<I>
where
    I: Iterator<Item = ContentBlock>,
{
    pub fn new(
        skip:           usize,
        sheet_capacity: usize,
        blocks:         impl IntoIterator<IntoIter = I>,
    ) -> Result<Self, LabelError> {
        let capacity = NonZeroUsize::new(sheet_capacity).ok_or_else(|| {
            LabelError::configuration("Sheet capacity (label_count) must be at least 1")
        })?;

        Ok(Self {
            blocks: blocks.into_iter(),
            capacity,
            total: skip,
            phase: Phase::Skip(skip),
        })
    }

    /// Slots skipped or filled so far (padding not included)
    pub fn total(&self) -> usize {
        self.total
    }
}

impl<I> Iterator for LabelSequence<I>
where
    I: Iterator<Item = ContentBlock>,
{
    type Item = Result<LabelSlot, LabelError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::Skip(0) => self.phase = Phase::NextBlock,
                Phase::Skip(ref mut left) => {
                    *left -= 1;
                    return Some(Ok(LabelSlot::Blank));
                }

                Phase::NextBlock => match self.blocks.next() {
                    Some(block) => {
                        let count = block.repeat_count();
                        self.total += count;

                        // Read once, even for a zero count, so a bad
                        // file is reported no matter what
                        match block.read_text() {
                            Ok(text) => {
                                self.phase = Phase::Repeat { text: Rc::from(text), left: count };
                            }
                            Err(e) => {
                                self.phase = Phase::Done;
                                return Some(Err(e));
                            }
                        }
                    }
                    None => self.phase = Phase::Pad(padding_for(self.total, self.capacity)),
                },

                Phase::Repeat { left: 0, .. } => self.phase = Phase::NextBlock,
                Phase::Repeat { ref text, ref mut left } => {
                    *left -= 1;
                    return Some(Ok(LabelSlot::Content(Rc::clone(text))));
                }

                Phase::Pad(0) => self.phase = Phase::Done,
                Phase::Pad(ref mut left) => {
                    *left -= 1;
                    return Some(Ok(LabelSlot::Blank));
                }

                Phase::Done => return None,
            }
        }
    }
}

impl<I> FusedIterator for LabelSequence<I> where I: Iterator<Item = ContentBlock> {}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, io::{self, Read}};

    fn collect(skip: usize, capacity: usize, blocks: Vec<ContentBlock>) -> Vec<LabelSlot> {
        generate_content(skip, capacity, blocks)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn blank() -> LabelSlot {
        LabelSlot::Blank
    }

    fn text(s: &str) -> LabelSlot {
        LabelSlot::content(s)
    }

    #[test]
    fn test_skip_content_and_padding() {
        let slots = collect(
            2,
            3,
            vec![ContentBlock::from_text(1, "A"), ContentBlock::from_text(2, "B")],
        );

        assert_eq!(slots, vec![blank(), blank(), text("A"), text("B"), text("B"), blank()]);
    }

    #[test]
    fn test_no_blocks_gives_one_blank_sheet() {
        for capacity in 1..=12 {
            let slots = collect(0, capacity, Vec::new());
            assert_eq!(slots.len(), capacity);
            assert!(slots.iter().all(LabelSlot::is_blank));
        }
    }

    #[test]
    fn test_exact_multiple_pads_a_full_sheet() {
        let slots = collect(0, 4, vec![ContentBlock::from_text(4, "X")]);

        assert_eq!(slots.len(), 8);
        assert!(slots[..4].iter().all(|s| *s == text("X")));
        assert!(slots[4..].iter().all(LabelSlot::is_blank));
    }

    #[test]
    fn test_length_is_next_sheet_boundary() {
        for capacity in 1..=7 {
            let cap = NonZeroUsize::new(capacity).unwrap();

            for skip in 0..5 {
                for count in 0..10 {
                    let slots = collect(skip, capacity, vec![ContentBlock::from_text(count, "L")]);
                    let total = skip + count;

                    assert_eq!(slots.len() % capacity, 0);
                    assert!(slots.len() > total);
                    assert!(slots.len() - total <= capacity);
                    assert_eq!(slots.len(), sequence_len(total, cap));

                    if total > 0 && total % capacity == 0 {
                        assert_eq!(slots.len(), total + capacity);
                    }
                }
            }
        }
    }

    #[test]
    fn test_content_is_trimmed_before_repeating() {
        let slots = collect(0, 3, vec![ContentBlock::from_text(3, "  X\n")]);
        assert_eq!(slots[..3], [text("X"), text("X"), text("X")]);
    }

    #[test]
    fn test_repetitions_share_one_string() {
        let slots = collect(0, 2, vec![ContentBlock::from_text(2, "shared")]);

        match (&slots[0], &slots[1]) {
            (LabelSlot::Content(a), LabelSlot::Content(b)) => assert!(Rc::ptr_eq(a, b)),
            other => panic!("expected two content slots, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_repeat_block_emits_nothing() {
        let slots = collect(
            0,
            5,
            vec![ContentBlock::from_text(0, "gone"), ContentBlock::from_text(1, "kept")],
        );

        assert_eq!(slots, vec![text("kept"), blank(), blank(), blank(), blank()]);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = generate_content(0, 0, Vec::new()).unwrap_err();
        assert!(matches!(err, LabelError::Configuration(_)));
    }

    /// Reader that records whether anyone has touched it
    struct Watched {
        read: Rc<Cell<bool>>,
        data: io::Cursor<Vec<u8>>,
    }

    impl Read for Watched {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.read.set(true);
            self.data.read(buf)
        }
    }

    #[test]
    fn test_blocks_are_read_lazily() {
        let flag  = Rc::new(Cell::new(false));
        let block = ContentBlock::new(
            1,
            "watched.txt",
            Watched { read: Rc::clone(&flag), data: io::Cursor::new(b"late".to_vec()) },
        );

        let mut seq = generate_content(2, 4, vec![block]).unwrap();

        assert_eq!(seq.next().unwrap().unwrap(), blank());
        assert_eq!(seq.next().unwrap().unwrap(), blank());
        assert!(!flag.get());

        assert_eq!(seq.next().unwrap().unwrap(), text("late"));
        assert!(flag.get());
        assert_eq!(seq.total(), 3);
    }

    #[test]
    fn test_read_error_ends_sequence() {
        let bad = ContentBlock::new(2, "bad.bin", io::Cursor::new(vec![0xc3, 0x28]));
        let mut seq = generate_content(1, 4, vec![bad, ContentBlock::from_text(1, "never")]).unwrap();

        assert_eq!(seq.next().unwrap().unwrap(), blank());
        assert!(matches!(seq.next(), Some(Err(LabelError::Content { .. }))));
        assert!(seq.next().is_none());
        assert!(seq.next().is_none());
    }
}
