//! Carousel navigation: the active index and the role of every entry around it.

/// Display role of a visible entry, relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Previous,
    Active,
    Next,
}

impl SlotRole {
    pub fn from_offset(offset: i64) -> Option<Self> {
        match offset {
            -1 => Some(SlotRole::Previous),
            0 => Some(SlotRole::Active),
            1 => Some(SlotRole::Next),
            _ => None,
        }
    }

    pub fn offset(self) -> i64 {
        match self {
            SlotRole::Previous => -1,
            SlotRole::Active => 0,
            SlotRole::Next => 1,
        }
    }

    /// Stacking order; higher paints later.
    pub fn z_order(self) -> u8 {
        match self {
            SlotRole::Active => 30,
            SlotRole::Previous | SlotRole::Next => 20,
        }
    }

    pub fn is_active(self) -> bool {
        self == SlotRole::Active
    }
}

/// A catalog entry that takes part in the current render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSlot {
    pub index: usize,
    pub role: SlotRole,
}

/// Signed distance from `active` to `entry`, folded into `[-2, 2]` on a ring of `len`.
pub fn normalized_offset(entry: usize, active: usize, len: usize) -> i64 {
    let len = len as i64;
    let mut offset = entry as i64 - active as i64;
    if offset < -2 {
        offset += len;
    } else if offset > 2 {
        offset -= len;
    }
    offset
}

/// Role of `entry` when `active` is selected, or `None` when it is out of view.
///
/// On a two-entry ring the other entry sits at both -1 and +1; it always takes
/// the `Next` slot so it is rendered once.
pub fn role_of(entry: usize, active: usize, len: usize) -> Option<SlotRole> {
    match normalized_offset(entry, active, len) {
        -1 if len == 2 => Some(SlotRole::Next),
        offset => SlotRole::from_offset(offset),
    }
}

/// Owns the selected position on a non-empty cyclic catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    active: usize,
    len: usize,
}

impl Carousel {
    /// `len` is clamped to at least one entry; `start` is clamped into range.
    pub fn new(len: usize, start: usize) -> Self {
        let len = len.max(1);
        Self {
            active: start.min(len - 1),
            len,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1) % self.len;
    }

    pub fn previous(&mut self) {
        self.active = (self.active + self.len - 1) % self.len;
    }

    /// Returns `true` when the selection actually moved.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            tracing::warn!(index, len = self.len, "ignoring jump outside the timeline");
            return false;
        }
        if index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    pub fn first(&mut self) -> bool {
        self.jump_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.jump_to(self.len - 1)
    }

    pub fn role_of(&self, entry: usize) -> Option<SlotRole> {
        role_of(entry, self.active, self.len)
    }

    /// Entries to render, each at most once, ordered back to front.
    pub fn visible_slots(&self) -> Vec<VisibleSlot> {
        let mut slots: Vec<VisibleSlot> = (0..self.len)
            .filter_map(|index| self.role_of(index).map(|role| VisibleSlot { index, role }))
            .collect();
        slots.sort_by_key(|slot| (slot.role.z_order(), slot.role.offset()));
        slots
    }

    /// Position along the timeline in `[0, 1]`; a single entry counts as the start.
    pub fn progress(&self) -> f32 {
        if self.len <= 1 {
            return 0.0;
        }
        self.active as f32 / (self.len - 1) as f32
    }
}
