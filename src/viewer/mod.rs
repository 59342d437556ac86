//! Sequential display of figures.
//!
//! A [`Session`] walks a list of methods one at a time: the next method's
//! image is decoded only after the current figure has been dismissed, so the
//! three pathways never overlap. The GUI in [`app`] only feeds events into it.

pub mod app;

use std::path::{Path, PathBuf};

use crate::buffer::{ChannelOrder, PixelBuffer};
use crate::error::{DemoError, Result};
use crate::loaders::Method;
use crate::plot::RenderedFigure;

/// Key that closes a plotting figure, besides closing its window.
pub const QUIT_KEY: char = 'q';

/// What ends a figure's display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismiss {
    /// Any key press.
    AnyKey,
    /// Window close, or the quit key.
    CloseOrQuitKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    KeyPressed(Key),
    CloseRequested,
}

impl Dismiss {
    pub fn accepts(self, event: &ViewerEvent) -> bool {
        match (self, event) {
            (_, ViewerEvent::CloseRequested) => true,
            (Dismiss::AnyKey, ViewerEvent::KeyPressed(_)) => true,
            (Dismiss::CloseOrQuitKey, ViewerEvent::KeyPressed(Key::Char(c))) => {
                c.eq_ignore_ascii_case(&QUIT_KEY)
            }
            (Dismiss::CloseOrQuitKey, ViewerEvent::KeyPressed(Key::Other)) => false,
        }
    }
}

/// A decoded image ready to be put on screen.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub dismiss: Dismiss,
}

impl Figure {
    /// Image window for a BGR buffer, the order such windows interpret.
    pub fn window(title: &str, buffer: &PixelBuffer, dismiss: Dismiss) -> Result<Self> {
        if buffer.order() != ChannelOrder::Bgr {
            return Err(DemoError::ChannelOrder {
                expected: ChannelOrder::Bgr,
                actual: buffer.order(),
            });
        }
        Ok(Self {
            title: title.to_string(),
            width: buffer.width(),
            height: buffer.height(),
            rgba: buffer.to_rgba(),
            dismiss,
        })
    }

    /// A rendered plotting canvas, closed like a plot window.
    pub fn plot(title: &str, plot: RenderedFigure) -> Self {
        let (width, height) = plot.canvas.dimensions();
        Self {
            title: title.to_string(),
            width,
            height,
            rgba: plot.canvas.to_rgba(),
            dismiss: Dismiss::CloseOrQuitKey,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Showing,
    Finished,
    Failed,
}

type Prepare = Box<dyn FnMut(Method, &Path) -> Result<Figure>>;

pub struct Session {
    path: PathBuf,
    methods: Vec<Method>,
    next: usize,
    current: Option<(Method, Figure)>,
    state: SessionState,
    error: Option<DemoError>,
    prepare: Prepare,
}

impl Session {
    pub fn new(path: impl Into<PathBuf>, methods: Vec<Method>) -> Self {
        Self::with_preparer(path, methods, |method, path| method.figure(path))
    }

    /// Uses `prepare` instead of [`Method::figure`] to build each figure.
    pub fn with_preparer<F>(path: impl Into<PathBuf>, methods: Vec<Method>, prepare: F) -> Self
    where
        F: FnMut(Method, &Path) -> Result<Figure> + 'static,
    {
        Self {
            path: path.into(),
            methods,
            next: 0,
            current: None,
            state: SessionState::NotStarted,
            error: None,
            prepare: Box::new(prepare),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current(&self) -> Option<&Figure> {
        self.current.as_ref().map(|(_, figure)| figure)
    }

    pub fn current_method(&self) -> Option<Method> {
        self.current.as_ref().map(|(method, _)| *method)
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, SessionState::Finished | SessionState::Failed)
    }

    /// Prepares the first figure. Calling it again has no effect.
    pub fn start(&mut self) {
        if self.state == SessionState::NotStarted {
            self.advance();
        }
    }

    /// Routes a viewer event to the current figure. Returns `true` when the
    /// figure was dismissed.
    pub fn dismiss(&mut self, event: &ViewerEvent) -> bool {
        let Some((method, figure)) = &self.current else {
            return false;
        };
        if !figure.dismiss.accepts(event) {
            return false;
        }
        tracing::info!(%method, title = %figure.title, ?event, "figure dismissed");
        self.current = None;
        self.advance();
        true
    }

    /// The error that ended the session, if any. Taken at most once.
    pub fn take_error(&mut self) -> Option<DemoError> {
        self.error.take()
    }

    fn advance(&mut self) {
        let Some(&method) = self.methods.get(self.next) else {
            self.state = SessionState::Finished;
            return;
        };
        self.next += 1;

        match (self.prepare)(method, &self.path) {
            Ok(figure) => {
                tracing::info!(
                    %method,
                    title = %figure.title,
                    width = figure.width,
                    height = figure.height,
                    "showing figure"
                );
                self.current = Some((method, figure));
                self.state = SessionState::Showing;
            }
            Err(err) => {
                tracing::error!(%method, path = %self.path.display(), "{err}");
                self.error = Some(err);
                self.state = SessionState::Failed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_key_accepts_every_key() {
        assert!(Dismiss::AnyKey.accepts(&ViewerEvent::KeyPressed(Key::Char('x'))));
        assert!(Dismiss::AnyKey.accepts(&ViewerEvent::KeyPressed(Key::Other)));
        assert!(Dismiss::AnyKey.accepts(&ViewerEvent::CloseRequested));
    }

    #[test]
    fn plot_windows_need_close_or_quit_key() {
        let rule = Dismiss::CloseOrQuitKey;
        assert!(rule.accepts(&ViewerEvent::CloseRequested));
        assert!(rule.accepts(&ViewerEvent::KeyPressed(Key::Char('q'))));
        assert!(rule.accepts(&ViewerEvent::KeyPressed(Key::Char('Q'))));
        assert!(!rule.accepts(&ViewerEvent::KeyPressed(Key::Char('a'))));
        assert!(!rule.accepts(&ViewerEvent::KeyPressed(Key::Other)));
    }

    #[test]
    fn window_figure_requires_bgr() {
        let rgb = PixelBuffer::new(1, 1, ChannelOrder::Rgb, vec![1, 2, 3]).unwrap();
        assert!(Figure::window("t", &rgb, Dismiss::AnyKey).is_err());

        let bgr = rgb.swap_red_blue();
        let figure = Figure::window("t", &bgr, Dismiss::AnyKey).unwrap();
        assert_eq!(figure.rgba, vec![1, 2, 3, 255]);
    }
}
