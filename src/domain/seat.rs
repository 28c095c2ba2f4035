use lazy_static::lazy_static;
use std::fmt;

/// Number of seats in every screening room.
pub const SEAT_COUNT: u32 = 20;

/// One bit per seat: a1 at bit 0 through a20 at bit 19.
pub const ALL_SEATS_MASK: u32 = (1 << SEAT_COUNT) - 1;

lazy_static! {
    /// The complete seat row in ascending order, used whenever a screening
    /// has no occupancy state yet and everything is still free.
    pub static ref FULL_HOUSE: Vec<Seat> = (0..SEAT_COUNT as u8).map(Seat).collect();
}

/// A single seat of the twenty-seat row, stored as its occupancy bit index.
///
/// Values only come out of [`Seat::parse`] or [`Seat::from_index`], so the
/// inner index is always in `0..=19`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seat(u8);

impl Seat {
    /// Parses a textual seat identifier of the form `a<N>` with `N` in
    /// `1..=20`, case-insensitive letter, no leading zero. Anything else is
    /// not a seat.
    pub fn parse(id: &str) -> Option<Seat> {
        let digits = id.strip_prefix('a').or_else(|| id.strip_prefix('A'))?;
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number: u32 = digits.parse().ok()?;
        if (1..=SEAT_COUNT).contains(&number) { Some(Seat((number - 1) as u8)) } else { None }
    }

    /// Seat for a raw bit index, defined on `0..=19`.
    pub fn from_index(index: u8) -> Option<Seat> {
        if (index as u32) < SEAT_COUNT { Some(Seat(index)) } else { None }
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    /// The occupancy-word bit carried by this seat.
    pub fn mask(&self) -> u32 {
        1 << self.0
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0 + 1)
    }
}

impl fmt::Debug for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seat: a{}", self.0 + 1)
    }
}

/// True when `id` belongs to the seat grammar.
pub fn is_valid(id: &str) -> bool {
    Seat::parse(id).is_some()
}

/// ORs together the bits of every valid identifier in `ids`. Invalid
/// identifiers contribute nothing; callers that must reject them outright
/// have to parse each one first.
pub fn build_mask<S: AsRef<str>>(ids: &[S]) -> u32 {
    ids.iter().filter_map(|id| Seat::parse(id.as_ref())).fold(0, |mask, seat| mask | seat.mask())
}

/// All seats whose bit is set in `mask`, in ascending order.
pub fn seats_in_mask(mask: u32) -> Vec<Seat> {
    FULL_HOUSE.iter().copied().filter(|seat| mask & seat.mask() != 0).collect()
}
