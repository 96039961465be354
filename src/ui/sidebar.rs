/// Right-hand column: collapsible Saved Pages, Filter, Import and Help
/// sections, followed by the marked words.
use std::collections::HashSet;

use iced::widget::{button, column, horizontal_rule, horizontal_space, row, scrollable, text, text_input, Column};
use iced::{Alignment, Background, Element, Length, Pixels};
use iced_aw::Wrap;

use super::{list_button, panel, rgb, with_tooltip};
use crate::state::data::{Forum, ShowInfo};
use crate::state::filter::PosFilter;
use crate::state::import::ImportPanel;
use crate::state::marked::MarkedWords;
use crate::state::navigation::episode_count_label;
use crate::state::saved::SavedPage;
use crate::Message;

pub const HELP: &str = "This is a tool to analyze shows. To get started, you will need to import a show. \
Open the import tab and search for a show. Click on a show to import it. Once imported, you can navigate \
through the show by clicking on the show, season, or episode in the navigation bar. To go back, right click \
in the navigation window or click on the text in the top navigation bar. You can also save pages by clicking \
the [+] button next to the saved pages header. Once you navigate to a show, season, or episode, the word \
frequency for that show, season, or episode will display in the middle column. You can filter the word \
frequency by part of speech by clicking on the filter bar. You can also search for specific words by typing \
in the search bar. Click on words in the word frequency to mark them. To visualize the analysis, click on the \
visualize button. You can visualize multiple words at once by checking the visualize multiple checkbox. You \
can also create a word cloud by clicking on the word cloud button. To clear the visualization, click on the \
clear button. To remove a saved page, click on the [-] button next to the saved page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    SavedPages,
    Filter,
    Import,
    Help,
}

pub struct Sidebar<'a> {
    pub info: &'a ShowInfo,
    pub saved: &'a [SavedPage],
    pub expanded: &'a HashSet<Section>,
    pub filter: PosFilter,
    pub show_more_filters: bool,
    pub import: &'a ImportPanel,
    pub forums: &'a [Forum],
    pub marked: &'a MarkedWords,
}

impl<'a> Sidebar<'a> {
    pub fn view(self) -> Element<'a, Message> {
        let sections = column![
            self.saved_pages(),
            self.filter_section(),
            self.import_section(),
            self.section(Section::Help, text("Help").into(), text(HELP).size(13).into()),
            horizontal_rule(1),
            self.marked_words(),
        ]
        .spacing(8);

        panel(scrollable(sections).height(Length::Fill))
    }

    /// Header with a collapse arrow; the body only renders when expanded
    fn section(
        &self,
        section: Section,
        header: Element<'a, Message>,
        body: Element<'a, Message>,
    ) -> Element<'a, Message> {
        let expanded = self.expanded.contains(&section);
        let arrow = button(text(if expanded { "▲" } else { "▼" }).size(12))
            .padding([0, 4])
            .style(button::text)
            .on_press(Message::ToggleSection(section));
        let header = row![arrow, header].spacing(4).align_y(Alignment::Center);
        if expanded {
            column![header, body].spacing(4).into()
        } else {
            header.into()
        }
    }

    fn saved_pages(&self) -> Element<'a, Message> {
        let header = row![
            text(format!("Saved Pages ({})", self.saved.len())),
            horizontal_space(),
            button(text("[+]").size(13))
                .padding(0)
                .style(button::text)
                .on_press(Message::SavePage),
        ]
        .align_y(Alignment::Center);

        let mut list = Column::new().spacing(1);
        for page in self.saved {
            let remove = button(text("[-]").size(13))
                .padding(0)
                .style(button::text)
                .on_press(Message::RemoveSavedPage(page.id));
            let label = row![
                text(page.label(self.info)).color(rgb(page.color())),
                horizontal_space(),
                remove
            ]
            .align_y(Alignment::Center);
            let item = list_button(label, Message::Navigate(page.scope.clone()));
            list = list.push(with_tooltip(item, Some(page.saved_label())));
        }

        self.section(Section::SavedPages, header.into(), list.into())
    }

    fn filter_section(&self) -> Element<'a, Message> {
        let mut header = row![text("Filter")].spacing(6).align_y(Alignment::Center);
        if self.filter != PosFilter::All {
            header = header.push(text(self.filter.name()).size(13));
        }

        let chips: Vec<Element<'a, Message>> = PosFilter::ALL
            .into_iter()
            .filter(|filter| self.show_more_filters || !filter.is_more())
            .map(|filter| filter_chip(filter, filter == self.filter))
            .collect();
        let more = button(text(if self.show_more_filters { "Show Less..." } else { "Show More..." }).size(13))
            .padding(0)
            .style(button::text)
            .on_press(Message::ToggleMoreFilters);

        let body = column![Wrap::with_elements(chips).spacing(Pixels(4.0)).line_spacing(Pixels(4.0)), more].spacing(4);
        self.section(Section::Filter, header.into(), body.into())
    }

    fn import_section(&self) -> Element<'a, Message> {
        let search = text_input("Search Forums...", &self.import.input)
            .on_input(Message::ImportSearchInput)
            .on_submit(Message::ImportSearchSubmit)
            .size(13)
            .width(150.0);
        let header = row![text("Import"), horizontal_space(), search].align_y(Alignment::Center);

        let mut body = Column::new().spacing(1);
        if let Some(message) = self.import.message() {
            body = body.push(text(message).size(13));
        }
        if self.import.shows_list() {
            for forum in self.import.visible_forums(self.forums) {
                let label = row![
                    text(forum.title.clone()),
                    horizontal_space(),
                    text(episode_count_label(forum.episodes as usize)).size(13)
                ]
                .align_y(Alignment::Center);
                let item = list_button(label, Message::Import(forum.clone()));
                body = body.push(with_tooltip(item, Some(forum.desc.clone())));
            }
        }

        self.section(Section::Import, header.into(), body.into())
    }

    fn marked_words(&self) -> Element<'a, Message> {
        let mut list = Column::new()
            .spacing(1)
            .push(text(format!("Marked Words ({})", self.marked.len())));
        for marked in self.marked.iter() {
            list = list.push(list_button(
                text(marked.label()).size(14),
                Message::Unmark(marked.key.clone()),
            ));
        }
        list.into()
    }
}

fn filter_chip<'a>(filter: PosFilter, selected: bool) -> Element<'a, Message> {
    button(text(filter.name()).size(13))
        .padding([2, 6])
        .on_press(Message::SelectFilter(filter))
        .style(move |theme, status| {
            if selected {
                button::primary(theme, status)
            } else {
                let mut style = button::secondary(theme, status);
                style.background = Some(Background::Color(rgb((235, 235, 235))));
                style
            }
        })
        .into()
}
