//! Layout system - cell rectangles and flex-based region sizing

/// Rectangle bounds in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Horizontal edge a panel is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Create rectangle from terminal dimensions (fills entire screen)
    pub fn fullscreen(cols: u16, rows: u16) -> Self {
        Rect::new(0, 0, cols, rows)
    }

    /// Get right edge x-coordinate (exclusive)
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Get bottom edge y-coordinate (exclusive)
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Whether the rectangle covers no cells
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if point is inside rectangle
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Create a subrect with padding applied
    pub fn inner(&self, padding: u16) -> Self {
        let padding2 = padding.saturating_mul(2);
        Rect {
            x: self.x.saturating_add(padding),
            y: self.y.saturating_add(padding),
            width: self.width.saturating_sub(padding2),
            height: self.height.saturating_sub(padding2),
        }
    }

    /// Full-height strip of `width` cells against one edge, clamped to self
    ///
    /// `offset` pushes the strip outward past the edge (used while a panel
    /// slides in or out); cells pushed past the edge are clipped away.
    pub fn anchored(&self, edge: Edge, width: u16, offset: u16) -> Rect {
        let width = width.min(self.width);
        let visible = width.saturating_sub(offset);
        match edge {
            Edge::Right => Rect::new(self.right() - visible, self.y, visible, self.height),
            Edge::Left => Rect::new(self.x, self.y, visible, self.height),
        }
    }

    /// Split horizontally into top and bottom
    pub fn split_horizontal(&self, top_height: u16) -> (Rect, Rect) {
        let top_height = top_height.min(self.height);
        let top = Rect::new(self.x, self.y, self.width, top_height);
        let bottom = Rect::new(
            self.x,
            self.y + top_height,
            self.width,
            self.height - top_height,
        );
        (top, bottom)
    }

    /// Split vertically into left and right
    pub fn split_vertical(&self, left_width: u16) -> (Rect, Rect) {
        let left_width = left_width.min(self.width);
        let left = Rect::new(self.x, self.y, left_width, self.height);
        let right = Rect::new(
            self.x + left_width,
            self.y,
            self.width - left_width,
            self.height,
        );
        (left, right)
    }
}

/// Flex direction for container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

/// Size constraint for flex children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    /// Fixed size in cells
    Fixed(u16),
    /// Proportional size (flex grow factor)
    Flex(u16),
}

/// Flex container layout calculator
#[derive(Debug, Clone)]
pub struct FlexLayout {
    direction: FlexDirection,
    gap: u16,
    padding: u16,
}

impl FlexLayout {
    /// Create a new flex layout
    pub fn new(direction: FlexDirection) -> Self {
        FlexLayout {
            direction,
            gap: 0,
            padding: 0,
        }
    }

    /// Set gap between children
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Set padding around container
    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Calculate child rectangles for given container and sizes
    ///
    /// Fixed children are clipped once the main axis is exhausted, so the
    /// returned rectangles never extend past the container.
    pub fn layout(&self, container: Rect, sizes: &[Size]) -> Vec<Rect> {
        if sizes.is_empty() {
            return Vec::new();
        }

        let inner = container.inner(self.padding);
        let main_size = match self.direction {
            FlexDirection::Row => inner.width,
            FlexDirection::Column => inner.height,
        };
        let flex_unit = self.flex_unit_size(main_size, sizes);

        let mut offset = 0u16;
        sizes
            .iter()
            .map(|size| {
                let wanted = match size {
                    Size::Fixed(s) => *s,
                    Size::Flex(f) => flex_unit.saturating_mul(*f),
                };
                let child_main = wanted.min(main_size.saturating_sub(offset));
                let rect = match self.direction {
                    FlexDirection::Row => {
                        Rect::new(inner.x + offset, inner.y, child_main, inner.height)
                    }
                    FlexDirection::Column => {
                        Rect::new(inner.x, inner.y + offset, inner.width, child_main)
                    }
                };
                offset = offset
                    .saturating_add(child_main)
                    .saturating_add(self.gap)
                    .min(main_size);
                rect
            })
            .collect()
    }

    fn flex_unit_size(&self, main_size: u16, sizes: &[Size]) -> u16 {
        let total_gap = self
            .gap
            .saturating_mul(sizes.len().saturating_sub(1) as u16);
        let available = main_size.saturating_sub(total_gap);

        let (fixed, units) = sizes.iter().fold((0u16, 0u16), |(fixed, units), size| match size {
            Size::Fixed(s) => (fixed.saturating_add(*s), units),
            Size::Flex(f) => (fixed, units.saturating_add(*f)),
        });

        if units > 0 {
            available.saturating_sub(fixed) / units
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(15, 15));
        assert!(r.contains(10, 10)); // edge
        assert!(!r.contains(30, 30)); // outside
        assert!(!r.contains(5, 15)); // left of rect
    }

    #[test]
    fn test_anchored_strip() {
        let screen = Rect::new(0, 0, 100, 30);

        assert_eq!(screen.anchored(Edge::Right, 54, 0), Rect::new(46, 0, 54, 30));
        assert_eq!(screen.anchored(Edge::Left, 54, 0), Rect::new(0, 0, 54, 30));

        // Wider than the container: capped at 100%
        assert_eq!(screen.anchored(Edge::Right, 900, 0), screen);

        // Sliding: half pushed past the edge
        assert_eq!(screen.anchored(Edge::Right, 40, 20), Rect::new(80, 0, 20, 30));
    }

    #[test]
    fn test_rect_split_horizontal() {
        let r = Rect::new(0, 0, 80, 24);
        let (top, bottom) = r.split_horizontal(3);

        assert_eq!(top, Rect::new(0, 0, 80, 3));
        assert_eq!(bottom, Rect::new(0, 3, 80, 21));

        let (top, bottom) = r.split_horizontal(40);
        assert_eq!(top.height, 24);
        assert!(bottom.is_empty());
    }

    #[test]
    fn test_flex_layout_column_with_gap() {
        let container = Rect::new(0, 0, 80, 24);
        let layout = FlexLayout::new(FlexDirection::Column).gap(1);

        let sizes = vec![Size::Fixed(3), Size::Flex(1), Size::Fixed(1)];
        let rects = layout.layout(container, &sizes);

        // Flex gets: 24 - 3 - 1 - 2 = 18
        assert_eq!(rects[0].height, 3);
        assert_eq!(rects[1].height, 18);
        assert_eq!(rects[2].height, 1);

        assert_eq!(rects[0].y, 0);
        assert_eq!(rects[1].y, 4);
        assert_eq!(rects[2].y, 23);
    }

    #[test]
    fn test_fixed_children_clip_at_container() {
        let container = Rect::new(0, 0, 10, 5);
        let layout = FlexLayout::new(FlexDirection::Column);

        let rects = layout.layout(container, &[Size::Fixed(4), Size::Fixed(4)]);
        assert_eq!(rects[0].height, 4);
        assert_eq!(rects[1].height, 1);
        assert!(rects.iter().all(|r| r.bottom() <= container.bottom()));
    }
}
