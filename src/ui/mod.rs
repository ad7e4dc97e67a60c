pub mod help;
pub mod page;
pub mod popup;
pub mod theme;

use ratatui::layout::Rect;

/// A `width` x `height` rect centred in `r`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    Rect::new(
        r.x + (r.width.saturating_sub(w)) / 2,
        r.y + (r.height.saturating_sub(h)) / 2,
        w, h,
    )
}
