//! The 32-bit header word of an encoded transition rule.
//!
//! Fields from the most significant bit down:
//!
//! | Bits  | Width | Field                                                   |
//! |-------|-------|---------------------------------------------------------|
//! | 31-28 | 4     | month, 1-12                                             |
//! | 27-22 | 6     | day-of-month indicator + 32                             |
//! | 21-19 | 3     | day of week, 0 = none, 1-7 = Monday-Sunday              |
//! | 18-14 | 5     | hour 0-23, 24 = end of day, 31 = second-of-day follows  |
//! | 13-12 | 2     | time definition, 0 = UTC, 1 = wall, 2 = standard        |
//! | 11-4  | 8     | standard offset / 900 + 128, 255 = seconds follow       |
//! | 3-2   | 2     | (offset before - standard) / 1800, 3 = seconds follow   |
//! | 1-0   | 2     | (offset after - standard) / 1800, 3 = seconds follow    |

/// Raw field values of a rule header word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RuleHeader {
    pub month: u8,
    pub day_of_month: u8,
    pub day_of_week: u8,
    pub time: u8,
    pub time_definition: u8,
    pub standard_offset: u8,
    pub offset_before: u8,
    pub offset_after: u8,
}

/// Hour field value for a time of 24:00.
pub(super) const TIME_END_OF_DAY: u8 = 24;
/// Hour field value announcing a full second-of-day.
pub(super) const TIME_ESCAPE: u8 = 31;
/// Standard offset field value announcing full offset seconds.
pub(super) const STANDARD_ESCAPE: u8 = 255;
/// Before/after field value announcing full offset seconds.
pub(super) const SAVINGS_ESCAPE: u8 = 3;

/// Packs `header` into one word, truncating each field to its width.
pub(super) fn pack(header: &RuleHeader) -> u32 {
    (u32::from(header.month & 0xF) << 28)
        | (u32::from(header.day_of_month & 0x3F) << 22)
        | (u32::from(header.day_of_week & 0x7) << 19)
        | (u32::from(header.time & 0x1F) << 14)
        | (u32::from(header.time_definition & 0x3) << 12)
        | (u32::from(header.standard_offset) << 4)
        | (u32::from(header.offset_before & 0x3) << 2)
        | u32::from(header.offset_after & 0x3)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Every field is masked to at most 8 bits before narrowing"
)]
pub(super) const fn unpack(word: u32) -> RuleHeader {
    RuleHeader {
        month: (word >> 28) as u8,
        day_of_month: ((word >> 22) & 0x3F) as u8,
        day_of_week: ((word >> 19) & 0x7) as u8,
        time: ((word >> 14) & 0x1F) as u8,
        time_definition: ((word >> 12) & 0x3) as u8,
        standard_offset: ((word >> 4) & 0xFF) as u8,
        offset_before: ((word >> 2) & 0x3) as u8,
        offset_after: (word & 0x3) as u8,
    }
}
