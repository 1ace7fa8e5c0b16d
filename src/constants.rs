pub const WINDOW_TITLE: &str = "Photo Gallery";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_WIDTH: i32 = 1280;            // Initial window width
pub const DEFAULT_HEIGHT: i32 = 720;            // Initial window height
pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;       // HTTP timeout per request

// Backend routes
pub const DATES_ROUTE: &str = "/api/dates";
pub const IMAGES_ROUTE: &str = "/api/images";
pub const IMAGE_BYTES_ROUTE: &str = "/images";

// Texts
pub const PLACEHOLDER: &str = "-";
pub const ALL_DATES_LABEL: &str = "Toutes les dates";
pub const NO_IMAGES_TEXT: &str = "No images found";

// Layout (pixels)
pub const SIDEBAR_WIDTH: f32 = 200.0;
pub const PANEL_WIDTH: f32 = 300.0;
pub const PADDING: f32 = 16.0;
pub const LINK_HEIGHT: f32 = 32.0;
pub const NAV_BUTTON_SIZE: f32 = 44.0;
pub const PAGINATION_HEIGHT: f32 = 48.0;
pub const DOT_RADIUS: f32 = 6.0;
pub const DOT_SPACING: f32 = 20.0;
pub const PANEL_ROW_HEIGHT: f32 = 52.0;
pub const SCROLL_STEP: f32 = 40.0;              // Sidebar scroll per wheel notch

pub const FONT_SIZE: i32 = 20;
pub const SMALL_FONT_SIZE: i32 = 16;

// Slides within this distance of the active one get their bytes fetched
pub const PRELOAD_RADIUS: usize = 1;
