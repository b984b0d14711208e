use std::collections::HashMap;

/// Last-known vertical scroll offset per route. Entries are written
/// immediately before a navigation begins (the departing route) and read
/// after one completes (the arriving route). Never pruned; lifetime is
/// bounded by a full page reload.
#[derive(Debug, Default)]
pub struct ScrollCache {
    offsets: HashMap<String, u32>,
}

impl ScrollCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, route: &str, offset: u32) {
        self.offsets.insert(route.to_string(), offset);
    }

    pub fn recall(&self, route: &str) -> Option<u32> {
        self.offsets.get(route).copied()
    }
}
