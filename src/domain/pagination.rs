// Pagination window and page navigation
use std::fmt;

/// Pages shown on each side of the current page.
pub const WINDOW_DELTA: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationToken {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PaginationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// Page labels to render for `current_page` out of `total_pages`.
///
/// Page 1, the last page and every page within [`WINDOW_DELTA`] of the
/// current page are listed; each maximal run of other pages collapses into a
/// single ellipsis. Totals small enough to fit the full window
/// (`2 * WINDOW_DELTA + 1` pages) are listed without any ellipsis.
pub fn compute_window(current_page: u32, total_pages: u32) -> Vec<PaginationToken> {
    if total_pages <= 2 * WINDOW_DELTA + 1 {
        return (1..=total_pages).map(PaginationToken::Page).collect();
    }

    let last = total_pages;
    let low = current_page.saturating_sub(WINDOW_DELTA).max(2);
    let high = current_page.saturating_add(WINDOW_DELTA).min(last - 1);

    let mut tokens = vec![PaginationToken::Page(1)];
    if low > high {
        // Current page lies outside 2..last; everything between collapses
        tokens.push(PaginationToken::Ellipsis);
    } else {
        if low > 2 {
            tokens.push(PaginationToken::Ellipsis);
        }
        tokens.extend((low..=high).map(PaginationToken::Page));
        if high < last - 1 {
            tokens.push(PaginationToken::Ellipsis);
        }
    }
    tokens.push(PaginationToken::Page(last));
    tokens
}

/// Pagination controls for the listing currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: u32,
    pub total_pages: u32,
    pub tokens: Vec<PaginationToken>,
}

impl PageWindow {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            tokens: compute_window(current_page, total_pages),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    Prev,
    Next,
    Jump(u32),
}

/// The page to load after `movement`, or `None` when the move is a no-op
/// (prev on the first page, next on the last, a jump out of range or to the
/// page already shown).
pub fn navigate(current_page: u32, total_pages: u32, movement: PageMove) -> Option<u32> {
    match movement {
        PageMove::Prev if current_page > 1 => Some(current_page - 1),
        PageMove::Next if current_page < total_pages => Some(current_page + 1),
        PageMove::Jump(page) if (1..=total_pages).contains(&page) && page != current_page => {
            Some(page)
        }
        _ => None,
    }
}
