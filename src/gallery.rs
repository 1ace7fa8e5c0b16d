use log::{debug, error, info, warn};

use crate::constants::*;
use crate::error::LoadError;
use crate::fetcher::{Request, RequestSink, Ticket};
use crate::model::{DateEntry, ImageEntry};
use crate::view::*;

const WIDGET_OPTIONS: WidgetOptions = WidgetOptions {
    navigation: true,
    clickable_pagination: true,
    keyboard: true,
    observer: true,
    observe_parents: true,
};

struct NavLink {
    id: LinkId,
    filter: Option<DateEntry>,
}

/// Gallery controller: date navigator, image loader, slideshow renderer and
/// metadata panel, driven by retrieval results and user input.
pub struct Gallery<V> {
    view: V,
    links: Vec<NavLink>,
    active_link: Option<LinkId>,
    navigator_ready: bool,
    latest_ticket: Ticket,
    images: Vec<ImageEntry>,
    widget: Option<WidgetHandle>,
}

/// Writes all seven panel regions for `entry`.
pub fn show_entry(view: &mut impl MetadataView, entry: Option<&ImageEntry>) {
    for region in Region::ALL {
        view.write_region(region, &region.text_for(entry));
    }
}

impl<V> Gallery<V>
where
    V: NavigatorView + SlideshowView + MetadataView,
{
    pub fn new(view: V) -> Self {
        Self {
            view,
            links: Vec::new(),
            active_link: None,
            navigator_ready: false,
            latest_ticket: 0,
            images: Vec::new(),
            widget: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub fn active_link(&self) -> Option<LinkId> {
        self.active_link
    }

    pub fn widget_id(&self) -> Option<u64> {
        self.widget.as_ref().map(WidgetHandle::id)
    }

    /// Dates and the unfiltered image list are requested independently.
    pub fn start(&mut self, sink: &mut impl RequestSink) {
        info!("Requesting dates");
        sink.submit(Request::Dates);
        self.load_images(None, sink);
    }

    pub fn load_images(&mut self, filter: Option<DateEntry>, sink: &mut impl RequestSink) -> Ticket {
        self.latest_ticket += 1;
        let ticket = self.latest_ticket;
        info!("Requesting images (filter: {:?}, ticket {})", filter, ticket);
        sink.submit(Request::Images { ticket, filter });
        ticket
    }

    pub fn dates_loaded(&mut self, result: Result<Vec<DateEntry>, LoadError>) {
        if self.navigator_ready {
            warn!("Navigator already populated, ignoring dates");
            return;
        }

        let dates = match result {
            Ok(dates) => dates,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };

        info!("Loaded {} dates", dates.len());
        let all = self.view.append_link(ALL_DATES_LABEL);
        self.links.push(NavLink { id: all, filter: None });
        self.set_active_link(all);

        for date in dates {
            let id = self.view.append_link(&date);
            self.links.push(NavLink { id, filter: Some(date) });
        }
        self.navigator_ready = true;
    }

    pub fn link_clicked(&mut self, link: LinkId, sink: &mut impl RequestSink) {
        let Some(filter) = self.links.iter().find(|l| l.id == link).map(|l| l.filter.clone()) else {
            warn!("Click on unknown link {:?}", link);
            return;
        };
        self.set_active_link(link);
        self.load_images(filter, sink);
    }

    fn set_active_link(&mut self, link: LinkId) {
        for nav in &self.links {
            self.view.set_link_active(nav.id, nav.id == link);
        }
        self.active_link = Some(link);
    }

    pub fn images_loaded(&mut self, ticket: Ticket, result: Result<Vec<ImageEntry>, LoadError>) {
        if ticket != self.latest_ticket {
            debug!("Dropping stale image list (ticket {}, latest {})", ticket, self.latest_ticket);
            return;
        }

        match result {
            Ok(images) => self.render(images),
            Err(e) => error!("{}", e),
        }
    }

    /// Rebuilds the slide container and replaces the widget.
    pub fn render(&mut self, images: Vec<ImageEntry>) {
        if let Some(widget) = self.widget.take() {
            info!("Disposing slideshow widget {}", widget.id());
            self.view.dispose(widget);
        }

        self.view.clear_slides();
        self.images = images;

        if self.images.is_empty() {
            info!("No images to show");
            self.view.show_placeholder(NO_IMAGES_TEXT);
            show_entry(&mut self.view, None);
            return;
        }

        for entry in &self.images {
            self.view.push_slide(SlideSpec::for_entry(entry));
        }

        let widget = self.view.mount(&WIDGET_OPTIONS);
        info!("Mounted slideshow widget {} with {} slides", widget.id(), self.images.len());
        self.widget = Some(widget);

        // The widget's own init signal follows, but do not depend on it.
        self.show_index(0);
    }

    pub fn slide_changed(&mut self, widget: u64, index: usize) {
        if self.widget_id() != Some(widget) {
            debug!("Slide change from disposed widget {}", widget);
            return;
        }
        self.show_index(index);
    }

    fn show_index(&mut self, index: usize) {
        let entry = self.images.get(index);
        if let Some(entry) = entry {
            let gps = entry.gps_position.map(|p| format!("{:.5}, {:.5}", p.lat, p.lon));
            let taken = entry.created_at.as_ref().map(|v| v.to_string());
            debug!("Showing {} (taken {:?}, GPS {:?})", entry.label, taken, gps);
        }
        show_entry(&mut self.view, entry);
    }
}
