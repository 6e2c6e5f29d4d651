/// Countdown traversal shared by every reverse enumerator.
///
/// `remaining` starts at the sequence count and is one past the index read by the next
/// successful `advance`. It never goes below zero, so a drained cursor stays drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cursor<T> {
    remaining: usize,
    current: Option<T>,
}

impl<T> Cursor<T> {
    #[inline(always)]
    pub fn new(count: usize) -> Self {
        Self {
            remaining: count,
            current: None,
        }
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[inline(always)]
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    #[inline(always)]
    pub fn take(&mut self) -> Option<T> {
        self.current.take()
    }

    /// Steps to the previous index and caches whatever `read` returns for it. Returns `false`
    /// (and clears the cache) once the front of the sequence has been passed.
    #[inline(always)]
    pub fn advance(&mut self, read: impl FnOnce(usize) -> Option<T>) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.current = read(self.remaining);
            true
        } else {
            self.current = None;
            false
        }
    }

    /// Advances until a readable element is found and hands it out, leaving the cache empty.
    /// Positions that `read` can no longer resolve are skipped.
    #[inline(always)]
    pub fn next(&mut self, mut read: impl FnMut(usize) -> Option<T>) -> Option<T> {
        while self.advance(&mut read) {
            if let Some(item) = self.current.take() {
                return Some(item);
            }
        }
        None
    }

    #[inline(always)]
    pub fn rewind(&mut self, count: usize) {
        self.remaining = count;
        self.current = None;
    }
}

impl<T> Default for Cursor<T> {
    fn default() -> Self {
        Self::new(0)
    }
}
