//! The window the gallery draws into: date sidebar, slide stage and metadata
//! panel. Implements the view capabilities on top of raylib.

use log::{debug, error, warn};
use raylib::prelude::*;

use crate::carousel::{contains, draw_centered_text, Carousel};
use crate::constants::*;
use crate::error::{ApiError, TextureError};
use crate::fetcher::Request;
use crate::texture_loader::texture_from_bytes;
use crate::view::*;

/// Input translated into gallery terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    LinkClicked(LinkId),
    SlideChanged { widget: u64, index: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct Regions {
    pub sidebar: Rectangle,
    pub stage: Rectangle,
    pub panel: Rectangle,
}

impl Regions {
    pub fn measure(width: f32, height: f32) -> Self {
        let stage_width = (width - SIDEBAR_WIDTH - PANEL_WIDTH).max(0.0);
        Self {
            sidebar: Rectangle::new(0.0, 0.0, SIDEBAR_WIDTH, height),
            stage: Rectangle::new(SIDEBAR_WIDTH, 0.0, stage_width, height),
            panel: Rectangle::new(SIDEBAR_WIDTH + stage_width, 0.0, PANEL_WIDTH, height),
        }
    }
}

struct NavEntry {
    text: String,
    active: bool,
}

pub struct Screen {
    regions: Regions,
    links: Vec<NavEntry>,
    scroll: f32,
    slides: Vec<SlideSpec>,
    placeholder: Option<String>,
    carousel: Option<Carousel>,
    next_widget_id: u64,
    panel: [String; 7],
    events: Vec<UiEvent>,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            regions: Regions::measure(width as f32, height as f32),
            links: Vec::new(),
            scroll: 0.0,
            slides: Vec::new(),
            placeholder: None,
            carousel: None,
            next_widget_id: 0,
            panel: std::array::from_fn(|_| PLACEHOLDER.to_string()),
            events: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.regions = Regions::measure(width as f32, height as f32);
        self.scroll_by(0.0);
        if let Some(carousel) = &mut self.carousel {
            carousel.observe(self.regions.stage, true);
        }
    }

    fn max_scroll(&self) -> f32 {
        let content = PADDING * 2.0 + self.links.len() as f32 * LINK_HEIGHT;
        (content - self.regions.sidebar.height).max(0.0)
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll = (self.scroll + delta).clamp(0.0, self.max_scroll());
    }

    fn link_rect(&self, index: usize) -> Rectangle {
        let sidebar = self.regions.sidebar;
        Rectangle::new(
            sidebar.x + PADDING / 2.0,
            sidebar.y + PADDING + index as f32 * LINK_HEIGHT - self.scroll,
            sidebar.width - PADDING,
            LINK_HEIGHT - 4.0,
        )
    }

    pub fn link_at(&self, point: Vector2) -> Option<usize> {
        if !contains(&self.regions.sidebar, point) {
            return None;
        }
        (0..self.links.len()).find(|&i| contains(&self.link_rect(i), point))
    }

    #[cfg(test)]
    pub fn link_texts(&self) -> Vec<&str> {
        self.links.iter().map(|l| l.text.as_str()).collect()
    }

    #[cfg(test)]
    pub fn active_links(&self) -> Vec<usize> {
        (0..self.links.len()).filter(|&i| self.links[i].active).collect()
    }

    pub fn region_text(&self, region: Region) -> &str {
        &self.panel[region.index()]
    }

    #[cfg(test)]
    pub fn slides(&self) -> &[SlideSpec] {
        &self.slides
    }

    #[cfg(test)]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    #[cfg(test)]
    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reads this frame's input and returns it, preceded by anything queued
    /// since the last call (a freshly mounted widget's init signal).
    pub fn poll_input(&mut self, rl: &RaylibHandle) -> Vec<UiEvent> {
        if rl.is_window_resized() {
            self.resize(rl.get_screen_width(), rl.get_screen_height());
        }

        let mouse = rl.get_mouse_position();
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 && contains(&self.regions.sidebar, mouse) {
            self.scroll_by(-wheel * SCROLL_STEP);
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(index) = self.link_at(mouse) {
                self.events.push(UiEvent::LinkClicked(LinkId(index)));
            }
        }

        if let Some(carousel) = &mut self.carousel {
            if let Some(index) = carousel.handle_input(rl) {
                self.events.push(UiEvent::SlideChanged { widget: carousel.id(), index });
            }
        }

        self.take_events()
    }

    /// Byte retrievals the current widget wants for its visible neighbourhood.
    pub fn pending_loads(&mut self) -> Vec<Request> {
        let Some(carousel) = &mut self.carousel else {
            return Vec::new();
        };
        let widget = carousel.id();
        carousel
            .take_loads()
            .into_iter()
            .map(|(index, label)| Request::ImageBytes { widget, index, label })
            .collect()
    }

    pub fn attach_image(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        widget: u64,
        index: usize,
        label: String,
        result: Result<Vec<u8>, ApiError>,
    ) {
        let Some(carousel) = self.carousel.as_mut().filter(|c| c.id() == widget) else {
            debug!("Dropping bytes of {} for disposed widget {}", label, widget);
            return;
        };

        let texture = result
            .map_err(|source| TextureError::Download { label: label.clone(), source })
            .and_then(|bytes| texture_from_bytes(rl, thread, &label, &bytes));

        match &texture {
            Ok(_) => debug!("Loaded slide {} ({})", index, label),
            Err(e) => error!("{}", e),
        }
        carousel.attach(index, texture);
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        self.draw_sidebar(d);
        self.draw_stage(d);
        self.draw_panel(d);
    }

    fn draw_sidebar(&self, d: &mut RaylibDrawHandle) {
        let sidebar = self.regions.sidebar;
        d.draw_rectangle_rec(sidebar, Color::new(24, 24, 28, 255));

        for (index, link) in self.links.iter().enumerate() {
            let rect = self.link_rect(index);
            if rect.y + rect.height < sidebar.y || rect.y > sidebar.y + sidebar.height {
                continue;
            }
            let color = if link.active {
                d.draw_rectangle_rec(rect, Color::new(70, 110, 170, 255));
                Color::WHITE
            } else {
                Color::LIGHTGRAY
            };
            d.draw_text(
                &link.text,
                (rect.x + PADDING / 2.0) as i32,
                (rect.y + (rect.height - SMALL_FONT_SIZE as f32) / 2.0) as i32,
                SMALL_FONT_SIZE,
                color,
            );
        }
    }

    fn draw_stage(&self, d: &mut RaylibDrawHandle) {
        match (&self.carousel, &self.placeholder) {
            (Some(carousel), _) => carousel.draw(d),
            (None, Some(text)) => draw_centered_text(d, text, &self.regions.stage, FONT_SIZE, Color::GRAY),
            (None, None) => {}
        }
    }

    fn draw_panel(&self, d: &mut RaylibDrawHandle) {
        let panel = self.regions.panel;
        d.draw_rectangle_rec(panel, Color::new(24, 24, 28, 255));

        for region in Region::ALL {
            let y = panel.y + PADDING + region.index() as f32 * PANEL_ROW_HEIGHT;
            let x = (panel.x + PADDING) as i32;
            d.draw_text(region.caption(), x, y as i32, SMALL_FONT_SIZE, Color::GRAY);
            d.draw_text(
                self.region_text(region),
                x,
                (y + SMALL_FONT_SIZE as f32 + 4.0) as i32,
                FONT_SIZE,
                Color::WHITE,
            );
        }
    }
}

impl NavigatorView for Screen {
    fn append_link(&mut self, text: &str) -> LinkId {
        self.links.push(NavEntry { text: text.to_string(), active: false });
        LinkId(self.links.len() - 1)
    }

    fn set_link_active(&mut self, link: LinkId, active: bool) {
        match self.links.get_mut(link.0) {
            Some(entry) => entry.active = active,
            None => warn!("No navigation link {:?}", link),
        }
    }
}

impl SlideshowView for Screen {
    fn clear_slides(&mut self) {
        self.slides.clear();
        self.placeholder = None;
    }

    fn push_slide(&mut self, slide: SlideSpec) {
        self.slides.push(slide);
    }

    fn show_placeholder(&mut self, text: &str) {
        self.placeholder = Some(text.to_string());
    }

    fn mount(&mut self, options: &WidgetOptions) -> WidgetHandle {
        self.next_widget_id += 1;
        let id = self.next_widget_id;
        let carousel = Carousel::new(id, &self.slides, *options, self.regions.stage);

        // Init signal, delivered with the next batch of input
        self.events.push(UiEvent::SlideChanged { widget: id, index: carousel.active_index() });

        if self.carousel.replace(carousel).is_some() {
            warn!("Mounted widget {} over a live widget", id);
        }
        WidgetHandle::new(id)
    }

    fn dispose(&mut self, widget: WidgetHandle) {
        match self.carousel.take() {
            Some(carousel) if carousel.id() == widget.id() => drop(carousel),
            Some(other) => {
                warn!("Dispose of widget {} while {} is live", widget.id(), other.id());
                self.carousel = Some(other);
            }
            None => warn!("Dispose of widget {} with none live", widget.id()),
        }
        self.events.retain(|e| !matches!(e, UiEvent::SlideChanged { widget: w, .. } if *w == widget.id()));
    }
}

impl MetadataView for Screen {
    fn write_region(&mut self, region: Region, text: &str) {
        self.panel[region.index()] = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::Gallery;
    use crate::fetcher::RequestSink;
    use crate::model::ImageEntry;

    #[derive(Default)]
    struct Requests(Vec<Request>);

    impl RequestSink for Requests {
        fn submit(&mut self, request: Request) {
            self.0.push(request);
        }
    }

    fn entries(labels: &[&str]) -> Vec<ImageEntry> {
        labels
            .iter()
            .map(|l| serde_json::from_value(serde_json::json!({ "label": l, "largeur": 640, "hauteur": 480 })).unwrap())
            .collect()
    }

    fn gallery() -> (Gallery<Screen>, Requests) {
        let mut gallery = Gallery::new(Screen::new(1280, 720));
        let mut requests = Requests::default();
        gallery.start(&mut requests);
        (gallery, requests)
    }

    #[test]
    fn regions_split_the_window() {
        let regions = Regions::measure(1280.0, 720.0);
        assert_eq!(regions.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(regions.stage.x, SIDEBAR_WIDTH);
        assert_eq!(regions.stage.width, 1280.0 - SIDEBAR_WIDTH - PANEL_WIDTH);
        assert_eq!(regions.panel.x + regions.panel.width, 1280.0);
    }

    #[test]
    fn panel_starts_blank() {
        let screen = Screen::new(800, 600);
        for region in Region::ALL {
            assert_eq!(screen.region_text(region), "-");
        }
    }

    #[test]
    fn clicks_in_sidebar_hit_links() {
        let mut screen = Screen::new(1280, 720);
        screen.append_link("Toutes les dates");
        screen.append_link("01/07/2025");

        let second = Vector2::new(50.0, PADDING + LINK_HEIGHT + 5.0);
        assert_eq!(screen.link_at(second), Some(1));
        assert_eq!(screen.link_at(Vector2::new(50.0, 600.0)), None);
        assert_eq!(screen.link_at(Vector2::new(600.0, PADDING + 5.0)), None);
    }

    #[test]
    fn scrolling_moves_links_and_is_clamped() {
        let mut screen = Screen::new(1280, 200);
        for i in 0..20 {
            screen.append_link(&format!("date {}", i));
        }
        screen.scroll_by(LINK_HEIGHT * 3.0);
        assert_eq!(screen.link_at(Vector2::new(50.0, PADDING + 5.0)), Some(3));

        screen.scroll_by(-10_000.0);
        assert_eq!(screen.link_at(Vector2::new(50.0, PADDING + 5.0)), Some(0));
    }

    #[test]
    fn mount_queues_init_signal() {
        let (mut gallery, _) = gallery();
        gallery.images_loaded(1, Ok(entries(&["a.jpg", "b.jpg"])));

        let widget = gallery.widget_id().unwrap();
        let events = gallery.view_mut().take_events();
        assert_eq!(events, vec![UiEvent::SlideChanged { widget, index: 0 }]);
        assert_eq!(gallery.view().region_text(Region::Dimensions), "640 x 480");
    }

    #[test]
    fn replacing_the_list_replaces_the_widget() {
        let (mut gallery, _) = gallery();
        gallery.images_loaded(1, Ok(entries(&["a.jpg", "b.jpg"])));
        gallery.render(entries(&["c.jpg"]));

        let screen = gallery.view();
        assert_eq!(screen.slides().len(), 1);
        assert_eq!(screen.carousel().map(Carousel::id), Some(2));
        assert_eq!(screen.carousel().map(Carousel::len), Some(1));
    }

    #[test]
    fn init_signal_of_disposed_widget_is_dropped() {
        let (mut gallery, _) = gallery();
        gallery.images_loaded(1, Ok(entries(&["a.jpg"])));
        gallery.render(entries(&["b.jpg"]));

        let events = gallery.view_mut().take_events();
        assert_eq!(events, vec![UiEvent::SlideChanged { widget: 2, index: 0 }]);
    }

    #[test]
    fn empty_list_shows_placeholder_on_stage() {
        let (mut gallery, _) = gallery();
        gallery.images_loaded(1, Ok(entries(&["a.jpg"])));
        gallery.images_loaded(1, Ok(Vec::new()));

        let screen = gallery.view();
        assert!(screen.carousel().is_none());
        assert_eq!(screen.placeholder(), Some("No images found"));
        assert_eq!(screen.region_text(Region::Label), "-");
    }

    #[test]
    fn dates_render_as_sidebar_links() {
        let (mut gallery, mut requests) = gallery();
        gallery.dates_loaded(Ok(vec!["01/07/2025".to_string(), "02/07/2025".to_string()]));
        assert_eq!(gallery.view().link_texts(), vec!["Toutes les dates", "01/07/2025", "02/07/2025"]);
        assert_eq!(gallery.view().active_links(), vec![0]);

        gallery.link_clicked(LinkId(2), &mut requests);
        assert_eq!(gallery.view().active_links(), vec![2]);
    }

    #[test]
    fn pending_loads_target_the_live_widget() {
        let (mut gallery, _) = gallery();
        gallery.images_loaded(1, Ok(entries(&["a.jpg", "b.jpg", "c.jpg"])));

        let loads = gallery.view_mut().pending_loads();
        assert_eq!(
            loads,
            vec![
                Request::ImageBytes { widget: 1, index: 0, label: "a.jpg".to_string() },
                Request::ImageBytes { widget: 1, index: 1, label: "b.jpg".to_string() },
            ]
        );
        assert!(gallery.view_mut().pending_loads().is_empty());
    }

    #[test]
    fn resize_remeasures_the_widget() {
        let (mut gallery, _) = gallery();
        gallery.images_loaded(1, Ok(entries(&["a.jpg"])));
        gallery.view_mut().resize(1600, 900);

        let stage = gallery.view().regions().stage;
        let container = gallery.view().carousel().unwrap().layout().container;
        assert_eq!(container.width, stage.width);
        assert_eq!(container.height, 900.0);
    }
}
