/// Loading indicator drawn on a canvas
use std::f32::consts::PI;

use iced::widget::canvas::{self, path::Arc, Path, Stroke};
use iced::{Color, Radians, Rectangle};

use crate::Message;

/// Width of the track and the moving arc
const STROKE_WIDTH: f32 = 4.0;

/// Fraction of the circle covered by the moving arc
const ARC_LENGTH: f32 = 0.3;

/// A rotating arc over a faint circular track
#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    /// Rotation in turns, wrapped to 0.0..1.0
    pub phase: f32,
}

impl canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let radius = (bounds.width.min(bounds.height) - STROKE_WIDTH) / 2.0;
        if radius <= 0.0 {
            return vec![frame.into_geometry()];
        }

        let center = frame.center();
        let palette = theme.palette();

        let track = Path::circle(center, radius);
        frame.stroke(
            &track,
            Stroke::default()
                .with_color(Color { a: 0.15, ..palette.text })
                .with_width(STROKE_WIDTH),
        );

        let start = self.phase.rem_euclid(1.0) * 2.0 * PI;
        let arc = Path::new(|builder| {
            builder.arc(Arc {
                center,
                radius,
                start_angle: Radians(start),
                end_angle: Radians(start + ARC_LENGTH * 2.0 * PI),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_color(palette.primary)
                .with_width(STROKE_WIDTH),
        );

        vec![frame.into_geometry()]
    }
}
