// Tue Jan 13 2026 - Alex

use rand::seq::SliceRandom;
use std::collections::VecDeque;

pub const RESULTS_PER_PAGE: u64 = 100;

/// Highest page index ever planned, whatever total the index reports.
pub const HARD_PAGE_CAP: u32 = 99;

/// Page indices for one query session. Consumed from the front, so a page
/// is never handed out twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pages: VecDeque<u32>,
}

impl PagePlan {
    pub fn pop_next(&mut self) -> Option<u32> {
        self.pages.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> Vec<u32> {
        self.pages.iter().copied().collect()
    }
}

pub fn total_pages(total_matches: u64, page_size: u64) -> u64 {
    if page_size == 0 || total_matches < page_size {
        return 1;
    }
    total_matches.div_ceil(page_size)
}

pub fn plan(total_matches: u64, page_size: u64, randomize: bool) -> PagePlan {
    let last = total_pages(total_matches, page_size).min(HARD_PAGE_CAP as u64) as u32;
    let mut pages: Vec<u32> = (1..=last).collect();

    if randomize {
        pages.shuffle(&mut rand::rng());
    }

    PagePlan {
        pages: pages.into(),
    }
}
