/// Position in the manually browsed accessories gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryCursor {
    index: usize,
    len: usize,
}

impl GalleryCursor {
    /// Opens at `index`, falling back to the first image when out of range.
    /// Returns `None` for an empty gallery.
    pub fn open(index: usize, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        let index = if index < len { index } else { 0 };
        Some(Self { index, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.len
    }

    pub fn step_forward(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn step_back(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        let mut cursor = GalleryCursor::open(0, 5).expect("gallery");
        cursor.step_back();
        assert_eq!(cursor.index(), 4);
        cursor.step_forward();
        cursor.step_forward();
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn out_of_range_open_starts_at_first_image() {
        assert_eq!(GalleryCursor::open(9, 5).map(|c| c.index()), Some(0));
        assert!(GalleryCursor::open(0, 0).is_none());
    }
}
