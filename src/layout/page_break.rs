//! # Page Break Decisions
//!
//! Whether a block goes on the current page or starts a new one.
//! Blocks are never split: a wrapped paragraph moves to the next page
//! as a whole.

/// What to do with a block before placing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Place the block at the current cursor.
    Place,
    /// Start a new page and place the block at its top margin.
    MoveToNextPage,
}

/// Decide where a block goes.
///
/// `extent` is the distance from the block's first baseline to its last
/// (zero for single-line blocks), so for one-line runs this reduces to
/// "has the cursor passed the printable bound". A page that holds no runs
/// yet never gets abandoned: an oversized block is placed there and
/// overflows instead of leaving an empty page behind.
pub fn decide_break(
    cursor: f64,
    extent: f64,
    printable_bound: f64,
    page_is_empty: bool,
) -> BreakDecision {
    if page_is_empty || cursor + extent <= printable_bound {
        BreakDecision::Place
    } else {
        BreakDecision::MoveToNextPage
    }
}

/// Whether a block placed at `cursor` runs past the bound even though
/// it was placed (only possible on a fresh page).
pub fn overflows(cursor: f64, extent: f64, printable_bound: f64) -> bool {
    cursor + extent > printable_bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_fits_until_cursor_passes_bound() {
        assert_eq!(decide_break(277.0, 0.0, 277.0, false), BreakDecision::Place);
        assert_eq!(
            decide_break(277.5, 0.0, 277.0, false),
            BreakDecision::MoveToNextPage
        );
    }

    #[test]
    fn wrapped_block_that_does_not_fit_moves() {
        // Four lines at 5mm: last baseline 15mm below the first.
        assert_eq!(
            decide_break(265.0, 15.0, 277.0, false),
            BreakDecision::MoveToNextPage
        );
        assert_eq!(decide_break(262.0, 15.0, 277.0, false), BreakDecision::Place);
    }

    #[test]
    fn empty_page_always_places() {
        assert_eq!(decide_break(10.0, 500.0, 277.0, true), BreakDecision::Place);
        assert!(overflows(10.0, 500.0, 277.0));
    }
}
