use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use iced::widget::{center, text};
use iced::{ContentFit, Element, Event, Size, Subscription, Task, event, keyboard, window};

use super::{Key, Session, ViewerEvent};
use crate::error::{DemoError, Result};
use crate::loaders::Method;
use crate::plot::{CANVAS_HEIGHT, CANVAS_WIDTH};

const IDLE_TITLE: &str = "image_basics";

/// Opens one window and shows each method's figure in turn. Returns once the
/// last figure is dismissed, or with the first error a method raised.
pub fn run(path: PathBuf, methods: Vec<Method>) -> Result<()> {
    let outcome: Arc<Mutex<Option<DemoError>>> = Arc::new(Mutex::new(None));
    let slot = outcome.clone();

    iced::application(
        move || ViewerApp::new(path.clone(), methods.clone(), slot.clone()),
        ViewerApp::update,
        ViewerApp::view,
    )
    .title(ViewerApp::title)
    .subscription(ViewerApp::subscription)
    .window(window::Settings {
        size: Size::new(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32),
        // close requests dismiss the current figure instead of quitting
        exit_on_close_request: false,
        ..Default::default()
    })
    .run()
    .map_err(|err| DemoError::Gui(err.to_string()))?;

    let mut guard = outcome
        .lock()
        .map_err(|_| DemoError::Gui("viewer outcome lock poisoned".to_string()))?;
    match guard.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[derive(Debug, Clone)]
enum Message {
    KeyPressed(keyboard::Key),
    KeyReleased(keyboard::Key),
    Unfocused,
    CloseRequested,
}

/// Turns raw key events into presses a figure may be dismissed by.
/// Modifier keys never count, and a key held down counts once until it is
/// released, so auto-repeat cannot skip past the next figure.
#[derive(Debug, Default)]
struct KeyFilter {
    held: HashSet<keyboard::Key>,
}

impl KeyFilter {
    fn press(&mut self, key: &keyboard::Key) -> Option<Key> {
        if is_modifier(key) || !self.held.insert(key.clone()) {
            return None;
        }
        Some(map_key(key))
    }

    fn release(&mut self, key: &keyboard::Key) {
        self.held.remove(key);
    }

    /// Releases never arrive while the window is unfocused.
    fn clear(&mut self) {
        self.held.clear();
    }
}

struct ViewerApp {
    session: Session,
    keys: KeyFilter,
    handle: Option<iced::widget::image::Handle>,
    outcome: Arc<Mutex<Option<DemoError>>>,
}

impl ViewerApp {
    fn new(
        path: PathBuf,
        methods: Vec<Method>,
        outcome: Arc<Mutex<Option<DemoError>>>,
    ) -> (Self, Task<Message>) {
        let mut session = Session::new(path, methods);
        session.start();
        let mut app = ViewerApp {
            session,
            keys: KeyFilter::default(),
            handle: None,
            outcome,
        };
        let task = app.sync();
        (app, task)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let event = match message {
            Message::KeyPressed(key) => match self.keys.press(&key) {
                Some(key) => ViewerEvent::KeyPressed(key),
                None => return Task::none(),
            },
            Message::KeyReleased(key) => {
                self.keys.release(&key);
                return Task::none();
            }
            Message::Unfocused => {
                self.keys.clear();
                return Task::none();
            }
            Message::CloseRequested => ViewerEvent::CloseRequested,
        };

        if self.session.dismiss(&event) {
            self.sync()
        } else {
            Task::none()
        }
    }

    /// Mirrors the session's current figure into the window, or exits once
    /// the session is over.
    fn sync(&mut self) -> Task<Message> {
        if self.session.is_done() {
            self.handle = None;
            if let Some(err) = self.session.take_error()
                && let Ok(mut slot) = self.outcome.lock()
            {
                *slot = Some(err);
            }
            return iced::exit();
        }

        self.handle = self.session.current().map(|figure| {
            iced::widget::image::Handle::from_rgba(
                figure.width,
                figure.height,
                figure.rgba.clone(),
            )
        });
        Task::none()
    }

    fn title(&self) -> String {
        self.session
            .current()
            .map(|figure| figure.title.clone())
            .unwrap_or_else(|| IDLE_TITLE.to_string())
    }

    fn view(&self) -> Element<'_, Message> {
        match &self.handle {
            Some(handle) => center(
                iced::widget::image(handle.clone()).content_fit(ContentFit::ScaleDown),
            )
            .into(),
            None => center(text(self.session.path().display().to_string())).into(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                Some(Message::KeyPressed(key))
            }
            Event::Keyboard(keyboard::Event::KeyReleased { key, .. }) => {
                Some(Message::KeyReleased(key))
            }
            Event::Window(window::Event::Unfocused) => Some(Message::Unfocused),
            Event::Window(window::Event::CloseRequested) => Some(Message::CloseRequested),
            _ => None,
        })
    }
}

fn map_key(key: &keyboard::Key) -> Key {
    match key {
        keyboard::Key::Character(c) => c.chars().next().map(Key::Char).unwrap_or(Key::Other),
        _ => Key::Other,
    }
}

fn is_modifier(key: &keyboard::Key) -> bool {
    use keyboard::key::Named;

    matches!(
        key,
        keyboard::Key::Named(
            Named::Shift
                | Named::Control
                | Named::Alt
                | Named::AltGraph
                | Named::Super
                | Named::Meta
                | Named::CapsLock
                | Named::NumLock
        )
    )
}
