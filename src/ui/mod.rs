/// Widgets for the four panes of the window
///
/// Each submodule turns a slice of the application state into an
/// `Element`; none of them hold state of their own.
use iced::widget::{button, container, text, tooltip, Button};
use iced::{Background, Border, Color, Element, Length, Size, Theme};

use crate::Message;

pub mod frequency;
pub mod navigator;
pub mod sidebar;
pub mod visualization;

pub const PADDING: f32 = 10.0;
pub const SPACING: f32 = 10.0;
pub const PANEL_PADDING: f32 = 8.0;
pub const PATH_BAR_HEIGHT: f32 = 32.0;
pub const SIDEBAR_WIDTH: f32 = 300.0;
pub const VISUALIZATION_BAR_HEIGHT: f32 = 36.0;
/// Share of the window height, below the path bar, taken by the visualization area
pub const VISUALIZATION_PORTION: u16 = 2;
pub const MAIN_PORTION: u16 = 3;

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgb8(r, g, b)
}

/// Pixel size of the image area under the visualization bar for a given window size.
///
/// Word clouds are rendered to fit this exactly, so it mirrors the layout in `view`.
pub fn visualization_viewport(window: Size) -> (u32, u32) {
    let width = window.width - 2.0 * PADDING - 2.0 * PANEL_PADDING;
    let below_path_bar = window.height - 2.0 * PADDING - PATH_BAR_HEIGHT - 2.0 * SPACING;
    let share = f32::from(VISUALIZATION_PORTION) / f32::from(VISUALIZATION_PORTION + MAIN_PORTION);
    let height =
        below_path_bar * share - VISUALIZATION_BAR_HEIGHT - SPACING - 2.0 * PANEL_PADDING;
    (width.max(1.0) as u32, height.max(1.0) as u32)
}

/// White rounded box used for every pane
pub fn panel_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::WHITE)),
        border: Border {
            color: Color::from_rgb8(200, 200, 200),
            width: 1.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

pub fn panel<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(PANEL_PADDING)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(panel_style)
        .into()
}

/// Full-width, borderless button for list rows
pub fn list_button<'a>(content: impl Into<Element<'a, Message>>, on_press: Message) -> Button<'a, Message> {
    button(content)
        .on_press(on_press)
        .width(Length::Fill)
        .padding([2, 6])
        .style(button::text)
}

/// Wrap `content` in a tooltip, or leave it alone if there is nothing to say
pub fn with_tooltip<'a>(content: impl Into<Element<'a, Message>>, tip: Option<String>) -> Element<'a, Message> {
    match tip {
        Some(tip) if !tip.is_empty() => tooltip(content, text(tip).size(13), tooltip::Position::Bottom)
            .style(container::rounded_box)
            .into(),
        _ => content.into(),
    }
}
