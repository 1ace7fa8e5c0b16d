use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use log::info;
use raylib::prelude::*;

mod api;
mod carousel;
mod config;
mod constants;
mod error;
mod fetcher;
mod gallery;
mod model;
mod screen;
mod texture_loader;
mod view;

use crate::api::HttpBackend;
use crate::config::{init_logging, Config};
use crate::constants::*;
use crate::fetcher::{Fetcher, RequestSink, Response};
use crate::gallery::Gallery;
use crate::screen::{Screen, UiEvent};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    // Fail early on a malformed base URL rather than on every request
    reqwest::Url::parse(&config.api_url)?;
    let backend = HttpBackend::new(&config.api_url, Duration::from_secs(config.timeout))?;
    let mut fetcher = Fetcher::new(Arc::new(backend));
    info!("Using backend at {}", config.api_url);

    let (mut rl, thread) = raylib::init()
        .size(config.width, config.height)
        .title(WINDOW_TITLE)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut gallery = Gallery::new(Screen::new(rl.get_screen_width(), rl.get_screen_height()));
    gallery.start(&mut fetcher);

    // --- Main Loop ---
    while !rl.window_should_close() {
        // 1. Retrievals that finished since the last frame
        for response in fetcher.drain() {
            match response {
                Response::Dates(result) => gallery.dates_loaded(result),
                Response::Images { ticket, result } => gallery.images_loaded(ticket, result),
                Response::ImageBytes { widget, index, label, result } => {
                    gallery.view_mut().attach_image(&mut rl, &thread, widget, index, label, result)
                }
            }
        }

        // 2. User input
        let events = gallery.view_mut().poll_input(&rl);
        for event in events {
            match event {
                UiEvent::LinkClicked(link) => gallery.link_clicked(link, &mut fetcher),
                UiEvent::SlideChanged { widget, index } => gallery.slide_changed(widget, index),
            }
        }

        // 3. Deferred slide images that just came into reach
        for request in gallery.view_mut().pending_loads() {
            fetcher.submit(request);
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        gallery.view().draw(&mut d);
    }

    info!("Window closed");
    Ok(())
}
