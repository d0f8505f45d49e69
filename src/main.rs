use std::sync::Arc;
use std::time::Instant;

use sleeve::{Carousel, CarouselConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

struct Album {
    title: &'static str,
    artist: &'static str,
}

const ALBUMS: &[Album] = &[
    Album {
        title: "Midnight Dreams",
        artist: "Luna Nova",
    },
    Album {
        title: "Electric Soul",
        artist: "The Voltage",
    },
    Album {
        title: "Golden Hour",
        artist: "Sunset Collective",
    },
    Album {
        title: "Neon Nights",
        artist: "Cyber Dreams",
    },
    Album {
        title: "Ocean Waves",
        artist: "Pacific Sound",
    },
    Album {
        title: "Velvet Underground",
        artist: "Shadow Dance",
    },
    Album {
        title: "Analog Love",
        artist: "Retro Wave",
    },
];

struct App {
    window: Option<Arc<Window>>,
    carousel: Carousel,
    shown: Option<usize>,
}

impl App {
    fn new(carousel: Carousel) -> Self {
        Self {
            window: None,
            carousel,
            shown: None,
        }
    }

    fn title(index: usize) -> String {
        let album = &ALBUMS[index];
        format!(
            "{:02} / {:02} · {} - {}",
            index + 1,
            ALBUMS.len(),
            album.title,
            album.artist
        )
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes().with_title(Self::title(0));
        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Focused(true) => self.carousel.scroll_mut().reset_clock(),
            WindowEvent::RedrawRequested => {
                self.carousel.update(Instant::now());

                let active = self.carousel.active_index();
                if self.shown != Some(active) {
                    self.shown = Some(active);
                    tracing::info!(index = active, album = ALBUMS[active].title, "now centered");
                    if let Some(window) = &self.window {
                        window.set_title(&Self::title(active));
                    }
                }
                if let Some((_, attrs)) = self.carousel.items().nth(active) {
                    tracing::trace!(
                        index = active,
                        scale = attrs.scale,
                        depth_z = attrs.depth_z,
                        opacity = attrs.opacity,
                        "centered sleeve"
                    );
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            other => self.carousel.handle_event(&other),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match std::env::args().nth(1) {
        Some(path) => CarouselConfig::load(&path)?,
        None => CarouselConfig::arc(ALBUMS.len()),
    };
    if config.item_count != ALBUMS.len() {
        tracing::warn!(
            configured = config.item_count,
            albums = ALBUMS.len(),
            "item_count does not match the album list; using the album count"
        );
        config.item_count = ALBUMS.len();
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(Carousel::new(config)?);
    event_loop.run_app(&mut app)?;
    Ok(())
}
