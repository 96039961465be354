/// Visualization bar and the gallery of rendered images
use iced::widget::{button, checkbox, column, horizontal_space, image, pick_list, row, scrollable, text, Column};
use iced::{Alignment, ContentFit, Element, Length};

use super::{panel, with_tooltip, VISUALIZATION_BAR_HEIGHT};
use crate::state::visualization::{Gallery, VisualizationKind};
use crate::Message;

pub fn visualization_bar<'a>(
    kind: VisualizationKind,
    multiple: bool,
    smooth: bool,
    busy: bool,
) -> Element<'a, Message> {
    let switcher = with_tooltip(
        row![
            text("Data Visualization"),
            pick_list(VisualizationKind::ALL, Some(kind), Message::SelectVisualization)
        ]
        .spacing(6)
        .align_y(Alignment::Center),
        Some("Change the type of visualization with this dropdown.".to_string()),
    );

    let multiple = with_tooltip(
        checkbox("Visualize Multiple", multiple).on_toggle(Message::ToggleVisualizeMultiple),
        Some("If checked, previous visualizations will not be cleared when displaying new ones.".to_string()),
    );

    let mut bar = row![switcher, multiple].spacing(12).align_y(Alignment::Center);

    if kind.uses_marked_words() {
        bar = bar.push(with_tooltip(
            checkbox("Smooth Data", smooth).on_toggle(Message::ToggleSmooth),
            Some(
                "Smoothing reduces the influence of outliers, allowing you to more easily view overall \
                 trends. Turn this off if you want to view the true counts for each episode."
                    .to_string(),
            ),
        ));
    }

    let generate = button(text(format!("Generate {}", kind)))
        .padding([4, 10])
        .on_press_maybe((!busy).then_some(Message::GenerateVisualization));
    let clear = button(text("Clear"))
        .padding([4, 10])
        .style(button::secondary)
        .on_press(Message::ClearVisualizations);

    bar.push(horizontal_space())
        .push(generate)
        .push(clear)
        .height(VISUALIZATION_BAR_HEIGHT)
        .into()
}

pub fn gallery(gallery: &Gallery) -> Element<'_, Message> {
    let mut images = Column::new().spacing(12).width(Length::Fill);
    for (index, visualization) in gallery.images().iter().enumerate() {
        let header = row![
            text(visualization.caption.clone()).size(14),
            horizontal_space(),
            text(format!("{}×{}", visualization.width, visualization.height)).size(12),
            button(text("Export").size(13))
                .padding([2, 8])
                .style(button::secondary)
                .on_press(Message::ExportVisualization(index)),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        images = images.push(column![
            header,
            image(visualization.handle.clone())
                .content_fit(ContentFit::ScaleDown)
                .width(Length::Fill),
        ]);
    }
    if gallery.is_busy() {
        images = images.push(text("Generating..."));
    }

    panel(scrollable(images).height(Length::Fill))
}
