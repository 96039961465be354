/// Word frequency pane: search box, quick mode toggle and the ranked list
use iced::widget::{button, column, horizontal_space, row, scrollable, text, text_input, Column};
use iced::{Alignment, Background, Element, Font, Length};

use super::{list_button, panel, rgb, with_tooltip};
use crate::state::frequency::FrequencyEntry;
use crate::state::marked::MarkedWords;
use crate::state::search::{HiddenNotice, Visibility};
use crate::Message;

const MARKED: (u8, u8, u8) = (255, 230, 120);

pub struct FrequencyPane<'a> {
    pub placeholder: Option<&'static str>,
    pub rows: &'a [FrequencyEntry],
    pub visibility: Visibility,
    pub notice: Option<HiddenNotice>,
    pub marked: &'a MarkedWords,
    pub search_input: &'a str,
    pub quick_mode: bool,
}

impl<'a> FrequencyPane<'a> {
    pub fn view(self) -> Element<'a, Message> {
        let search = text_input("Search...", self.search_input)
            .on_input(Message::SearchInput)
            .on_submit(Message::SearchSubmit)
            .width(200.0);
        let search = with_tooltip(
            search,
            Some("Search for multiple words by separating them with spaces and use quotes for exact matches".to_string()),
        );

        let mode = button(text(if self.quick_mode { "Quick Mode" } else { "Full Mode" }).size(14))
            .padding([4, 8])
            .style(button::secondary)
            .on_press(Message::ToggleQuickMode);
        let mode = with_tooltip(
            mode,
            Some("Quick Mode limits the results to 500 words for faster loading".to_string()),
        );

        let header = row![text("Word Frequency").size(18), horizontal_space(), search, mode]
            .spacing(6)
            .align_y(Alignment::Center);

        let body: Element<'a, Message> = match self.placeholder {
            Some(placeholder) => text(placeholder).into(),
            None => {
                let mut list = Column::new().spacing(1).width(Length::Fill);
                if let Some(notice) = self.notice {
                    let message = button(
                        text(notice.message)
                            .size(13)
                            .font(Font {
                                style: iced::font::Style::Italic,
                                ..Font::DEFAULT
                            }),
                    )
                    .padding(0)
                    .style(button::text)
                    .on_press(Message::DismissHiddenNotice);
                    list = list.push(with_tooltip(message, Some(notice.tooltip)));
                }
                for &index in &self.visibility.visible {
                    let entry = &self.rows[index];
                    list = list.push(entry_row(entry, self.marked.is_marked(&entry.key)));
                }
                scrollable(list).height(Length::Fill).into()
            }
        };

        panel(column![header, body].spacing(8))
    }
}

fn entry_row<'a>(entry: &FrequencyEntry, marked: bool) -> Element<'a, Message> {
    let label = text(format!("{}. {}", entry.rank, entry.label())).size(14);
    let row = list_button(label, Message::ToggleMark(entry.key.clone(), entry.count)).style(
        move |theme, status| {
            let mut style = button::text(theme, status);
            if marked {
                style.background = Some(Background::Color(rgb(MARKED)));
            }
            style
        },
    );
    with_tooltip(row, Some(entry.key.part_name().to_string()))
}
