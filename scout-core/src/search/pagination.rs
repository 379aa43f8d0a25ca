use serde::Serialize;

use super::types::{PAGE_SIZE, SEARCH_RESULT_CAP};
use crate::{ExplorerError, Result};

/// Where a result list stands, and how far navigation may go.
///
/// The search API stops serving results after [`SEARCH_RESULT_CAP`] even when
/// `total_count` reports more, so the last reachable page is clamped to the
/// hard ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current_page: u32,
    pub total_count: u64,
    pub page_size: u32,
    pub result_cap: u32,
}

/// One entry of a rendered page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: u32, current: bool },
    Ellipsis,
}

impl PageState {
    pub fn new(current_page: u32, total_count: u64) -> Self {
        Self {
            current_page,
            total_count,
            page_size: PAGE_SIZE,
            result_cap: SEARCH_RESULT_CAP,
        }
    }

    /// Absolute page limit imposed by the API.
    pub fn hard_ceiling(&self) -> u32 {
        self.result_cap.div_ceil(self.page_size.max(1))
    }

    /// Pages implied by `total_count`, ignoring the ceiling.
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page_size.max(1)))
    }

    pub fn last_page(&self) -> u32 {
        self.total_pages().min(u64::from(self.hard_ceiling())) as u32
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page()
    }

    /// Validate a navigation target against the last reachable page.
    pub fn check(&self, page: u32) -> Result<u32> {
        if page == 0 {
            return Err(ExplorerError::validation("Page numbers start at 1"));
        }
        // Page 1 always exists, even for an empty result.
        let last = self.last_page().max(1);
        if page > last {
            return Err(ExplorerError::validation(format!(
                "Page {} is out of range, the last available page is {}",
                page, last
            )));
        }
        Ok(page)
    }

    /// Page selector around the current page: the first page, up to `span` pages
    /// around the current one, the last page, with ellipses for the gaps.
    ///
    /// Empty when everything fits on a single page.
    pub fn window(&self, span: u32) -> Vec<PageLink> {
        let last = self.last_page();
        if last <= 1 || span == 0 {
            return Vec::new();
        }

        let current = self.current_page.clamp(1, last);
        let mut start = current.saturating_sub(span / 2).max(1);
        let end = (start + span - 1).min(last);
        if end - start < span - 1 {
            start = end.saturating_sub(span - 1).max(1);
        }

        let page = |number: u32| PageLink::Page {
            number,
            current: number == current,
        };

        let mut links = Vec::new();
        if start > 1 {
            links.push(page(1));
            if start > 2 {
                links.push(PageLink::Ellipsis);
            }
        }
        links.extend((start..=end).map(page));
        if end < last {
            if end < last - 1 {
                links.push(PageLink::Ellipsis);
            }
            links.push(page(last));
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<Option<u32>> {
        links
            .iter()
            .map(|l| match l {
                PageLink::Page { number, .. } => Some(*number),
                PageLink::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn hard_ceiling_covers_the_result_cap() {
        let state = PageState::new(1, 0);
        assert_eq!(state.hard_ceiling(), 34);
    }

    #[test]
    fn last_page_is_clamped_to_ceiling() {
        assert_eq!(PageState::new(1, 250_000).last_page(), 34);
        assert_eq!(PageState::new(1, 61).last_page(), 3);
        assert_eq!(PageState::new(1, 60).last_page(), 2);
        assert_eq!(PageState::new(1, 0).last_page(), 0);
    }

    #[test]
    fn pages_beyond_last_are_rejected() {
        let state = PageState::new(1, 95);
        assert_eq!(state.check(4).unwrap(), 4);
        assert!(matches!(state.check(5), Err(ExplorerError::Validation(_))));
        assert!(state.check(0).is_err());

        let huge = PageState::new(1, 1_000_000);
        assert!(huge.check(34).is_ok());
        assert!(huge.check(35).is_err());
    }

    #[test]
    fn first_page_of_empty_result_is_valid() {
        let empty = PageState::new(1, 0);
        assert_eq!(empty.check(1).unwrap(), 1);
        assert!(empty.check(2).is_err());
        assert!(!empty.has_next());
    }

    #[test]
    fn next_and_previous() {
        let state = PageState::new(1, 90);
        assert!(!state.has_previous());
        assert!(state.has_next());

        let state = PageState::new(3, 90);
        assert!(state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn window_at_start() {
        let links = PageState::new(1, 30 * 20).window(5);
        assert_eq!(
            numbers(&links),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(20)]
        );
        assert_eq!(
            links[0],
            PageLink::Page {
                number: 1,
                current: true
            }
        );
    }

    #[test]
    fn window_in_the_middle() {
        let links = PageState::new(10, 30 * 20).window(5);
        assert_eq!(
            numbers(&links),
            vec![
                Some(1),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(20)
            ]
        );
    }

    #[test]
    fn window_at_end_without_gap() {
        let links = PageState::new(7, 30 * 7).window(5);
        assert_eq!(
            numbers(&links),
            vec![Some(1), None, Some(3), Some(4), Some(5), Some(6), Some(7)]
        );
    }

    #[test]
    fn window_stops_at_ceiling() {
        let links = PageState::new(34, 100_000).window(5);
        assert_eq!(numbers(&links).last(), Some(&Some(34)));
    }

    #[test]
    fn single_page_has_no_window() {
        assert!(PageState::new(1, 12).window(5).is_empty());
    }
}
