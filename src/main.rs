use std::time::Duration;

use iced::{Element, Subscription, Task, Theme};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod state;
mod thumbnail;
mod ui;

use crate::api::FlickrClient;
use crate::config::Config;
use crate::state::controller::{FetchOutcome, PhotosController};
use crate::state::data::FetchState;
use crate::state::repository::NetworkPhotoRepository;
use crate::thumbnail::ThumbnailLoader;
use crate::ui::gallery::{Gallery, ThumbnailOutcome};

/// Spinner advance per animation tick, in turns
const SPINNER_STEP: f32 = 0.02;

/// Main application state
struct FlickrPhotos {
    /// Loading/Success/Error state machine for the photo list
    controller: PhotosController<NetworkPhotoRepository>,
    /// Thumbnails of the photos on screen
    gallery: Gallery,
    loader: ThumbnailLoader,
    spinner_phase: f32,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// A photo list fetch finished or was cancelled
    PhotosFetched(FetchOutcome),
    /// User clicked "Retry" on the error screen
    Retry,
    /// A grid image download finished or was cancelled
    ThumbnailLoaded(ThumbnailOutcome),
    /// Loading indicator animation frame
    Tick,
}

impl FlickrPhotos {
    /// Create the application and dispatch the first fetch
    fn new(config: Config) -> (Self, Task<Message>) {
        let client = FlickrClient::new(&config);
        let loader = ThumbnailLoader::new(client.http().clone());
        let (controller, fetch) = PhotosController::new(NetworkPhotoRepository::new(client));

        info!(
            user_id = %config.user_id,
            image_size = %config.image_size,
            "🎨 Flickr Photos initialized"
        );

        (
            FlickrPhotos {
                controller,
                gallery: Gallery::new(config.photo_host, config.image_size),
                loader,
                spinner_phase: 0.0,
            },
            Task::perform(fetch, Message::PhotosFetched),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PhotosFetched(outcome) => {
                if !self.controller.complete(outcome) {
                    return Task::none();
                }

                match self.controller.state() {
                    FetchState::Success(photos) => {
                        info!(count = photos.len(), "✅ Showing photos");
                        let downloads = self.gallery.show(photos, &self.loader);
                        Task::batch(
                            downloads
                                .into_iter()
                                .map(|download| Task::perform(download, Message::ThumbnailLoaded)),
                        )
                    }
                    FetchState::Loading | FetchState::Error => Task::none(),
                }
            }
            Message::Retry => {
                self.gallery.clear();
                self.spinner_phase = 0.0;
                Task::perform(self.controller.retry(), Message::PhotosFetched)
            }
            Message::ThumbnailLoaded(outcome) => {
                self.gallery.finish(outcome);
                Task::none()
            }
            Message::Tick => {
                self.spinner_phase = (self.spinner_phase + SPINNER_STEP) % 1.0;
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::screens::home_screen(self.controller.state(), &self.gallery, self.spinner_phase)
    }

    /// Animate the loading indicator only while a fetch is running
    fn subscription(&self) -> Subscription<Message> {
        if self.controller.is_fetching() {
            iced::time::every(Duration::from_millis(16)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wgpu_core=warn,wgpu_hal=warn,naga=warn")),
        )
        .with_target(true)
        .init();

    let config = Config::load().inspect_err(|err| {
        error!(error = %err, "❌ Could not load configuration");
    })?;

    iced::application("Flickr Photos", FlickrPhotos::update, FlickrPhotos::view)
        .subscription(FlickrPhotos::subscription)
        .theme(FlickrPhotos::theme)
        .centered()
        .run_with(move || FlickrPhotos::new(config))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Photo;
    use crate::ui::gallery::ThumbnailState;

    fn app() -> FlickrPhotos {
        let config = Config {
            api_key: "test-key".to_string(),
            user_id: "201970008@N08".to_string(),
            // Nothing listens here; fetches are never polled in these tests
            base_url: "http://127.0.0.1:9/services/rest/".to_string(),
            ..Config::default()
        };
        let (app, _fetch) = FlickrPhotos::new(config);
        app
    }

    fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            secret: "abc".to_string(),
            server: "100".to_string(),
            title: String::new(),
        }
    }

    fn fetched(photos: Vec<Photo>) -> Message {
        Message::PhotosFetched(FetchOutcome::Finished {
            generation: 1,
            result: Ok(photos),
        })
    }

    #[test]
    fn test_starts_loading() {
        let app = app();
        assert_eq!(app.controller.state(), &FetchState::Loading);
        assert!(app.controller.is_fetching());
    }

    #[test]
    fn test_success_marks_each_distinct_card_loading() {
        let mut app = app();
        let _ = app.update(fetched(vec![photo("1"), photo("2"), photo("1")]));

        assert_eq!(
            app.controller.state(),
            &FetchState::Success(vec![photo("1"), photo("2"), photo("1")])
        );
        for id in ["1", "2"] {
            let url = app.gallery.image_url(&photo(id));
            assert!(matches!(app.gallery.thumbnail(&url), Some(ThumbnailState::Loading)));
        }
        assert!(!app.controller.is_fetching());
    }

    #[test]
    fn test_failure_shows_error() {
        let mut app = app();
        let _ = app.update(Message::PhotosFetched(FetchOutcome::Finished {
            generation: 1,
            result: Err(crate::api::ApiError::Status(500)),
        }));

        assert_eq!(app.controller.state(), &FetchState::Error);
    }

    #[test]
    fn test_retry_clears_gallery_and_reloads() {
        let mut app = app();
        let _ = app.update(fetched(vec![photo("1")]));
        let url = app.gallery.image_url(&photo("1"));
        app.spinner_phase = 0.5;

        let _ = app.update(Message::Retry);

        assert_eq!(app.controller.state(), &FetchState::Loading);
        assert!(app.controller.is_fetching());
        assert!(app.gallery.thumbnail(&url).is_none());
        assert_eq!(app.spinner_phase, 0.0);
    }

    #[test]
    fn test_outcome_from_superseded_fetch_is_ignored() {
        let mut app = app();
        let _ = app.update(Message::Retry);

        // Generation 1 was replaced by the retry
        let _ = app.update(fetched(vec![photo("1")]));

        assert_eq!(app.controller.state(), &FetchState::Loading);
    }

    #[test]
    fn test_tick_wraps_spinner_phase() {
        let mut app = app();
        app.spinner_phase = 0.99;
        let _ = app.update(Message::Tick);

        assert!(app.spinner_phase >= 0.0 && app.spinner_phase < 1.0);
    }
}
