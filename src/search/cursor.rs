// Tue Jan 13 2026 - Alex

use super::{Endpoint, SearchApi, SearchError};
use std::collections::VecDeque;

pub struct PageCursor<'a, A: SearchApi> {
    api: &'a A,
    query: &'a str,
    next_page: u32,
    buffer: VecDeque<Endpoint>,
    finished: bool,
}

impl<'a, A: SearchApi> PageCursor<'a, A> {
    pub fn new(api: &'a A, query: &'a str) -> Self {
        Self {
            api,
            query,
            next_page: 1,
            buffer: VecDeque::new(),
            finished: false,
        }
    }
}

impl<A: SearchApi> Iterator for PageCursor<'_, A> {
    type Item = Result<Endpoint, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(endpoint) = self.buffer.pop_front() {
            return Some(Ok(endpoint));
        }

        if self.finished {
            return None;
        }

        match self.api.search(self.query, self.next_page) {
            Ok(page) if page.matches.is_empty() => {
                self.finished = true;
                None
            }
            Ok(page) => {
                self.next_page += 1;
                self.buffer.extend(page.matches);
                self.buffer.pop_front().map(Ok)
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
