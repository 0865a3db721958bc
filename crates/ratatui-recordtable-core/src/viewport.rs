/// Vertical scroll state of a fixed-height region, in terminal rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub y: u32,
    pub viewport_h: u16,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, h: u16) {
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, h: u32) {
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_h > 0 && self.content_h > self.viewport_h as u32
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn page_down(&mut self) {
        self.scroll_y_by(self.viewport_h.saturating_sub(1) as i32);
    }

    pub fn page_up(&mut self) {
        self.scroll_y_by(-(self.viewport_h.saturating_sub(1) as i32));
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    pub fn to_bottom(&mut self) {
        self.y = self.max_y();
    }

    /// Scrolls the minimum amount so that `[start, start + size)` is inside the viewport.
    pub fn ensure_visible(&mut self, start: u32, size: u32) {
        let view = self.viewport_h as u32;
        if view == 0 {
            return;
        }
        let end = start.saturating_add(size);
        if start < self.y {
            self.y = start;
        } else if end > self.y.saturating_add(view) {
            self.y = end.saturating_sub(view);
        }
        self.clamp();
    }

    pub fn percent_y(&self) -> Option<u8> {
        if !self.is_scrollable() || self.viewport_h == 0 {
            return None;
        }
        let visible_bottom = self.y.saturating_add(self.viewport_h as u32) as f64;
        let pct = (visible_bottom / self.content_h as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }

    pub fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_offset() {
        let mut s = ViewportState::default();
        s.set_viewport(5);
        s.set_content(6);
        s.y = 99;
        s.clamp();
        assert_eq!(s.y, 1);
    }

    #[test]
    fn ensure_visible_scrolls_minimally() {
        let mut s = ViewportState::default();
        s.set_viewport(4);
        s.set_content(20);
        s.ensure_visible(6, 1);
        assert_eq!(s.y, 3);
        s.ensure_visible(5, 1);
        assert_eq!(s.y, 3);
        s.ensure_visible(1, 1);
        assert_eq!(s.y, 1);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut s = ViewportState::default();
        s.set_viewport(10);
        s.set_content(3);
        s.page_down();
        assert_eq!(s.y, 0);
        assert_eq!(s.percent_y(), None);
    }
}
