use iced::widget::image::Image;
use iced::widget::{button, canvas, column, container, scrollable, text, tooltip};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use super::gallery::{Gallery, ThumbnailState};
use super::spinner::Spinner;
use crate::state::data::{FetchState, Photo};
use crate::Message;

/// Edge length of a grid card
const CARD_SIZE: f32 = 128.0;

/// Space between cards
const CARD_SPACING: f32 = 8.0;

/// The home screen: one view per fetch state
pub fn home_screen<'a>(state: &'a FetchState, gallery: &'a Gallery, spinner_phase: f32) -> Element<'a, Message> {
    match state {
        FetchState::Loading => loading_screen(spinner_phase),
        FetchState::Success(photos) => photos_grid(photos, gallery),
        FetchState::Error => error_screen(),
    }
}

/// The home screen displaying the loading indicator
fn loading_screen<'a>(spinner_phase: f32) -> Element<'a, Message> {
    let spinner = canvas(Spinner { phase: spinner_phase })
        .width(Length::Fixed(64.0))
        .height(Length::Fixed(64.0));

    let content = column![spinner, text("Loading photos…").size(16)]
        .spacing(16)
        .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// The home screen displaying the error message with a retry button
fn error_screen<'a>() -> Element<'a, Message> {
    let content = column![
        text("⚠").size(48),
        text("Failed to load photos").size(20),
        text("Check your connection and API settings.").size(14),
        button("Retry")
            .on_press(Message::Retry)
            .padding(10),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Wrapping grid of photo cards; reflows with the window width
fn photos_grid<'a>(photos: &'a [Photo], gallery: &'a Gallery) -> Element<'a, Message> {
    let header = text(summary(photos.len(), gallery)).size(14);

    let cards: Vec<Element<'a, Message>> = photos
        .iter()
        .map(|photo| photo_card(photo, gallery))
        .collect();

    let grid = Wrap::with_elements(cards)
        .spacing(Pixels(CARD_SPACING))
        .line_spacing(Pixels(CARD_SPACING));

    scrollable(column![header, grid].spacing(12).padding(12))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn photo_card<'a>(photo: &'a Photo, gallery: &'a Gallery) -> Element<'a, Message> {
    let url = gallery.image_url(photo);

    let content: Element<'a, Message> = match gallery.thumbnail(&url) {
        Some(ThumbnailState::Ready(handle)) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        // Broken-image fallback
        Some(ThumbnailState::Failed) => text("✕").size(32).into(),
        Some(ThumbnailState::Loading) | None => text("…").size(24).into(),
    };

    let card = container(content)
        .width(Length::Fixed(CARD_SIZE))
        .height(Length::Fixed(CARD_SIZE))
        .center_x(Length::Fixed(CARD_SIZE))
        .center_y(Length::Fixed(CARD_SIZE))
        .padding(4)
        .style(container::rounded_box);

    if photo.title.is_empty() {
        card.into()
    } else {
        tooltip(
            card,
            container(text(&photo.title).size(12))
                .padding(6)
                .style(container::rounded_box),
            tooltip::Position::Bottom,
        )
        .into()
    }
}

fn summary(count: usize, gallery: &Gallery) -> String {
    let noun = if count == 1 { "photo" } else { "photos" };
    match gallery.updated_at() {
        Some(at) => format!("{} {} · updated {}", count, noun, at.format("%H:%M:%S")),
        None => format!("{} {}", count, noun),
    }
}
