/// Path bar and the show / season / episode navigator
use iced::widget::{button, column, horizontal_space, mouse_area, row, scrollable, text, Column, Row};
use iced::{Alignment, Element, Length};

use super::{list_button, panel, with_tooltip, PATH_BAR_HEIGHT};
use crate::state::data::{Forum, Scope, ShowInfo};
use crate::state::navigation::{aired_range, breadcrumb, nav_items, Transcript};
use crate::Message;

/// `Home > Show > Season > Episode`, or the bootstrap progress
pub fn path_bar<'a>(
    info: &ShowInfo,
    scope: &Scope,
    loading: Option<u8>,
    has_source: bool,
) -> Element<'a, Message> {
    let trail: Element<'a, Message> = match loading {
        Some(step) => text(format!("Loading... ({}/2)", step)).into(),
        None => {
            let mut trail = Row::new().spacing(4).align_y(Alignment::Center);
            for (i, crumb) in breadcrumb(info, scope).into_iter().enumerate() {
                if i > 0 {
                    trail = trail.push(text(">"));
                }
                let segment = button(text(crumb.label).size(16))
                    .padding(0)
                    .style(button::text)
                    .on_press(Message::Navigate(crumb.target));
                trail = trail.push(with_tooltip(segment, crumb.id));
            }
            trail.into()
        }
    };

    let source = button(text("View Source").size(14))
        .padding([4, 8])
        .style(button::secondary)
        .on_press_maybe((loading.is_none() && has_source).then_some(Message::OpenSource));

    row![trail, horizontal_space(), source]
        .height(PATH_BAR_HEIGHT)
        .align_y(Alignment::Center)
        .into()
}

pub fn navigator<'a>(
    info: &ShowInfo,
    forums: &[Forum],
    scope: &Scope,
    transcript: Option<&Transcript>,
) -> Element<'a, Message> {
    let mut content = Column::new().spacing(2).width(Length::Fill);

    if let Scope::Show { show } = scope {
        content = content.push(text(format!("Aired: {}", aired_range(forums, show))).size(13));
    }

    match scope {
        Scope::Episode { .. } => {
            content = match transcript {
                Some(transcript) => content
                    .push(text(transcript.title.clone()).size(24))
                    .push(text(transcript.body.clone()).size(15)),
                None => content.push(text("Loading...")),
            };
        }
        _ => {
            for item in nav_items(info, scope) {
                let label: Element<'a, Message> = match item.detail {
                    Some(detail) => row![text(item.label), horizontal_space(), text(detail).size(13)]
                        .align_y(Alignment::Center)
                        .into(),
                    None => Element::from(text(item.label)),
                };
                content = content.push(list_button(label, Message::Navigate(item.target)));
            }
        }
    }

    // Right click anywhere in the pane goes up a level
    mouse_area(panel(column![scrollable(content).height(Length::Fill)]))
        .on_right_press(Message::NavigateUp)
        .into()
}
