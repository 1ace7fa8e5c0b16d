//! Capabilities the gallery needs from whatever draws it.

use crate::constants::PLACEHOLDER;
use crate::model::{or_placeholder, scalar_or_placeholder, ImageEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

/// Handle on a mounted slideshow widget. Not `Clone`: disposing consumes it,
/// so a widget can only be disposed once.
#[derive(Debug, PartialEq, Eq)]
pub struct WidgetHandle {
    id: u64,
}

impl WidgetHandle {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Forward/back buttons.
    pub navigation: bool,
    /// Pagination dots, jumping to a slide when clicked.
    pub clickable_pagination: bool,
    /// Arrow keys, Home and End.
    pub keyboard: bool,
    /// Re-measure when the slide container changes.
    pub observer: bool,
    /// Re-measure when the window around the container is resized.
    pub observe_parents: bool,
}

/// One slide in the container: a deferred image reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSpec {
    pub label: String,
    pub source: String,
    pub alt: String,
}

impl SlideSpec {
    pub fn for_entry(entry: &ImageEntry) -> Self {
        Self {
            label: entry.label.clone(),
            source: entry.source(),
            alt: entry.label.clone(),
        }
    }
}

/// The seven fixed regions of the metadata panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Label,
    Date,
    Time,
    Location,
    Dimensions,
    Size,
    Resolution,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Label,
        Region::Date,
        Region::Time,
        Region::Location,
        Region::Dimensions,
        Region::Size,
        Region::Resolution,
    ];

    pub fn caption(self) -> &'static str {
        match self {
            Region::Label => "Label",
            Region::Date => "Date",
            Region::Time => "Time",
            Region::Location => "Location",
            Region::Dimensions => "Dimensions",
            Region::Size => "Size",
            Region::Resolution => "Resolution",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Text this region shows for `entry`, or the placeholder when there is none.
    pub fn text_for(self, entry: Option<&ImageEntry>) -> String {
        let Some(entry) = entry else {
            return PLACEHOLDER.to_string();
        };
        match self {
            Region::Label => or_placeholder(Some(entry.label.as_str())).to_string(),
            Region::Date => scalar_or_placeholder(entry.date.as_ref()),
            Region::Time => scalar_or_placeholder(entry.time.as_ref()),
            Region::Location => scalar_or_placeholder(entry.location.as_ref()),
            Region::Dimensions => entry.dimensions(),
            Region::Size => scalar_or_placeholder(entry.size.as_ref()),
            Region::Resolution => scalar_or_placeholder(entry.resolution.as_ref()),
        }
    }
}

pub trait NavigatorView {
    fn append_link(&mut self, text: &str) -> LinkId;
    fn set_link_active(&mut self, link: LinkId, active: bool);
}

pub trait SlideshowView {
    fn clear_slides(&mut self);
    fn push_slide(&mut self, slide: SlideSpec);
    fn show_placeholder(&mut self, text: &str);
    /// Builds a widget over the current slides. It reports its initial slide
    /// with a slide-changed event like any later change.
    fn mount(&mut self, options: &WidgetOptions) -> WidgetHandle;
    fn dispose(&mut self, widget: WidgetHandle);
}

pub trait MetadataView {
    fn write_region(&mut self, region: Region, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entry_is_all_placeholders() {
        for region in Region::ALL {
            assert_eq!(region.text_for(None), "-");
        }
    }

    #[test]
    fn regions_index_in_display_order() {
        let indices: Vec<usize> = Region::ALL.iter().map(|r| r.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn slide_spec_derives_source_from_label() {
        let entry: ImageEntry = serde_json::from_str(r#"{"label": "b c.png"}"#).unwrap();
        let slide = SlideSpec::for_entry(&entry);
        assert_eq!(slide.source, "/images/b c.png");
        assert_eq!(slide.alt, "b c.png");
    }

    #[test]
    fn numeric_and_null_fields_reach_the_panel() {
        let entry: ImageEntry =
            serde_json::from_str(r#"{"label": null, "taille": 2048, "lieu": null, "heure": 1022}"#).unwrap();
        assert_eq!(Region::Label.text_for(Some(&entry)), "-");
        assert_eq!(Region::Size.text_for(Some(&entry)), "2048");
        assert_eq!(Region::Location.text_for(Some(&entry)), "-");
        assert_eq!(Region::Time.text_for(Some(&entry)), "1022");
    }
}
