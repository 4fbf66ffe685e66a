//! Cursor and scroll arithmetic for the result list and context menu
//!
//! The list is a window of `visible` rows starting at `scroll` over `len`
//! rows. The cursor stays in `0..len` (0 for an empty list) and never
//! wraps; the window only moves as far as needed to contain the cursor.

/// One row down; sticks on the last row
pub fn cursor_down(selected: usize, len: usize) -> usize {
    clamp_cursor(selected.saturating_add(1), len)
}

/// One row up; sticks on the first row
pub fn cursor_up(selected: usize) -> usize {
    selected.saturating_sub(1)
}

/// Cursor for a list that now holds `len` rows
pub fn clamp_cursor(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}

/// Smallest window move that brings `selected` on screen
///
/// Before any frame has been laid out `visible` is 0 and the window stays put.
pub fn follow_cursor(selected: usize, scroll: usize, visible: usize) -> usize {
    if visible == 0 {
        return scroll;
    }
    let lowest_top = (selected + 1).saturating_sub(visible);
    scroll.min(selected).max(lowest_top)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // cursor movement
    // =========================================================================

    #[test]
    fn test_cursor_down_stops_at_last_row() {
        assert_eq!(cursor_down(0, 3), 1);
        assert_eq!(cursor_down(2, 3), 2);
    }

    #[test]
    fn test_cursor_down_empty_list() {
        assert_eq!(cursor_down(0, 0), 0);
        assert_eq!(cursor_down(4, 0), 0);
    }

    #[test]
    fn test_cursor_up_stops_at_top() {
        assert_eq!(cursor_up(1), 0);
        assert_eq!(cursor_up(0), 0);
    }

    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor(7, 3), 2);
        assert_eq!(clamp_cursor(1, 3), 1);
        assert_eq!(clamp_cursor(5, 0), 0);
    }

    // =========================================================================
    // follow_cursor
    // =========================================================================

    #[test]
    fn test_follow_cursor_inside_window() {
        assert_eq!(follow_cursor(4, 2, 5), 2);
    }

    #[test]
    fn test_follow_cursor_above_window() {
        // top of window becomes the selection
        assert_eq!(follow_cursor(1, 4, 5), 1);
    }

    #[test]
    fn test_follow_cursor_below_window() {
        // bottom of window becomes the selection: rows 8..=12
        assert_eq!(follow_cursor(12, 0, 5), 8);
    }

    #[test]
    fn test_follow_cursor_last_visible_row() {
        assert_eq!(follow_cursor(4, 0, 5), 0);
        assert_eq!(follow_cursor(5, 0, 5), 1);
    }

    #[test]
    fn test_follow_cursor_without_layout() {
        assert_eq!(follow_cursor(9, 3, 0), 3);
    }
}
