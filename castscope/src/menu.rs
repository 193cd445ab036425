//! Layout of the on-screen scenario picker: a scrollable column of buttons pinned to the
//! right edge of the screen.
//!
//! This module only computes geometry and labels; drawing the buttons and delivering
//! clicks is up to the host.

use alloc::string::String;
use alloc::vec::Vec;

use euclid::{Point2D, Rect, Size2D, point2, size2};

/// Unit-of-measure type for screen coordinates, with the origin at the top left and
/// +Y downward.
#[derive(Debug, Eq, PartialEq)]
pub enum Ui {}

/// A position on screen.
pub type UiPoint = Point2D<f32, Ui>;
/// A size on screen.
pub type UiSize = Size2D<f32, Ui>;
/// A rectangle on screen.
pub type UiRect = Rect<f32, Ui>;

/// One button as it should currently be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuButton {
    /// Index of the scenario this button selects.
    pub index: usize,
    /// Text on the button.
    pub label: String,
    /// Where the button is, in screen coordinates. May extend outside the
    /// [viewport](ScenarioMenu::viewport); the host should clip it.
    pub rect: UiRect,
}

/// Scroll state and layout of a list of scenario buttons.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioMenu {
    count: usize,
    /// Distance the content is scrolled up by. Never negative.
    scroll: f32,
}

impl ScenarioMenu {
    /// Size of each button.
    pub const BUTTON_SIZE: UiSize = Size2D::new(200.0, 40.0);
    /// Vertical distance from one button to the next.
    pub const ROW_PITCH: f32 = 50.0;
    /// Gap between the buttons and the right edge of the screen.
    pub const RIGHT_MARGIN: f32 = 20.0;
    /// Gap between the top of the screen and the list.
    pub const TOP_OFFSET: f32 = 10.0;

    /// Constructs a menu of `count` buttons, scrolled to the top.
    pub fn new(count: usize) -> Self {
        Self { count, scroll: 0.0 }
    }

    /// Returns the number of buttons.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns whether there are no buttons.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the label of the button for scenario `index`. Labels count from 1.
    pub fn label(index: usize) -> String {
        format!("Run Scenario {}", index + 1)
    }

    /// Returns the region of the screen the list occupies.
    pub fn viewport(&self, screen: UiSize) -> UiRect {
        let width = Self::BUTTON_SIZE.width + Self::RIGHT_MARGIN;
        Rect::new(
            point2(screen.width - width, Self::TOP_OFFSET),
            size2(width, (screen.height - Self::TOP_OFFSET).max(0.0)),
        )
    }

    /// Returns the height of the whole list, from the top of the first button to the
    /// bottom of the last.
    pub fn content_height(&self) -> f32 {
        match self.count {
            0 => 0.0,
            n => Self::ROW_PITCH * (n - 1) as f32 + Self::BUTTON_SIZE.height,
        }
    }

    /// Returns the largest allowed scroll distance for a screen of this size.
    pub fn max_scroll(&self, screen: UiSize) -> f32 {
        (self.content_height() - self.viewport(screen).height()).max(0.0)
    }

    /// Returns how far the list is currently scrolled.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Scrolls the list by `delta` (positive moves later buttons into view), staying within
    /// the content.
    pub fn scroll_by(&mut self, delta: f32, screen: UiSize) {
        let new = self.scroll + delta;
        self.scroll = if new.is_nan() {
            self.scroll
        } else {
            new.clamp(0.0, self.max_scroll(screen))
        };
    }

    /// Returns the rectangle of button `index` at the current scroll position.
    fn button_rect(&self, index: usize, viewport: UiRect) -> UiRect {
        Rect::new(
            point2(
                viewport.min_x(),
                viewport.min_y() + Self::ROW_PITCH * index as f32 - self.scroll,
            ),
            Self::BUTTON_SIZE,
        )
    }

    /// Returns the buttons which are at least partly visible, in order.
    pub fn buttons(&self, screen: UiSize) -> Vec<MenuButton> {
        let viewport = self.viewport(screen);
        (0..self.count)
            .filter_map(|index| {
                let rect = self.button_rect(index, viewport);
                rect.intersects(&viewport).then(|| MenuButton {
                    index,
                    label: Self::label(index),
                    rect,
                })
            })
            .collect()
    }

    /// Returns the index of the button under `point`, if any.
    ///
    /// Points outside the viewport never hit a button, even if a scrolled-away button
    /// would be there.
    pub fn click(&self, point: UiPoint, screen: UiSize) -> Option<usize> {
        let viewport = self.viewport(screen);
        if !viewport.contains(point) {
            return None;
        }
        let content_y = point.y - viewport.min_y() + self.scroll;
        if content_y < 0.0 {
            return None;
        }
        let index = (content_y / Self::ROW_PITCH) as usize;
        (index < self.count && self.button_rect(index, viewport).contains(point)).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const SCREEN: UiSize = Size2D::new(800.0, 600.0);

    #[test]
    fn labels_count_from_one() {
        let menu = ScenarioMenu::new(8);
        let labels: Vec<String> = menu.buttons(SCREEN).into_iter().map(|b| b.label).collect();
        assert_eq!(labels.len(), 8);
        assert_eq!(labels[0], "Run Scenario 1");
        assert_eq!(labels[7], "Run Scenario 8");
    }

    #[test]
    fn layout() {
        let menu = ScenarioMenu::new(3);
        assert_eq!(
            menu.viewport(SCREEN),
            Rect::new(point2(580.0, 10.0), size2(220.0, 590.0))
        );
        assert_eq!(menu.content_height(), 140.0);
        assert_eq!(ScenarioMenu::new(0).content_height(), 0.0);
        let buttons = menu.buttons(SCREEN);
        assert_eq!(
            buttons[1].rect,
            Rect::new(point2(580.0, 60.0), size2(200.0, 40.0))
        );
    }

    #[test]
    fn only_visible_buttons_are_listed() {
        let menu = ScenarioMenu::new(3);
        let screen = size2(800.0, 100.0);
        assert_eq!(
            menu.buttons(screen)
                .iter()
                .map(|b| b.index)
                .collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn scroll_is_clamped() {
        let mut menu = ScenarioMenu::new(20);
        // 50 * 19 + 40 = 990 tall, 590 visible
        assert_eq!(menu.max_scroll(SCREEN), 400.0);
        menu.scroll_by(1000.0, SCREEN);
        assert_eq!(menu.scroll(), 400.0);
        menu.scroll_by(-1000.0, SCREEN);
        assert_eq!(menu.scroll(), 0.0);
        menu.scroll_by(f32::NAN, SCREEN);
        assert_eq!(menu.scroll(), 0.0);

        let mut short = ScenarioMenu::new(2);
        short.scroll_by(50.0, SCREEN);
        assert_eq!(short.scroll(), 0.0);
    }

    #[rstest]
    #[case(0.0, point2(590.0, 15.0), Some(0))]
    #[case(0.0, point2(590.0, 65.0), Some(1))]
    #[case(0.0, point2(590.0, 55.0), None)] // gap between rows
    #[case(0.0, point2(790.0, 15.0), None)] // right margin
    #[case(0.0, point2(100.0, 15.0), None)] // left of the list
    #[case(0.0, point2(590.0, 5.0), None)] // above the list
    #[case(400.0, point2(590.0, 15.0), Some(8))]
    #[case(400.0, point2(590.0, 595.0), Some(19))]
    fn click(#[case] scroll: f32, #[case] point: UiPoint, #[case] expected: Option<usize>) {
        let mut menu = ScenarioMenu::new(20);
        menu.scroll_by(scroll, SCREEN);
        assert_eq!(menu.click(point, SCREEN), expected);
    }

    #[test]
    fn click_below_last_button() {
        let menu = ScenarioMenu::new(2);
        assert_eq!(menu.click(point2(590.0, 115.0), SCREEN), None);
    }
}
