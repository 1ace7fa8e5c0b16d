//! The slideshow widget: owns the active slide, navigation buttons, pagination
//! dots, keyboard control and lazy texture state of the slides it was built over.

use std::ops::RangeInclusive;
use log::debug;
use raylib::prelude::*;

use crate::constants::*;
use crate::error::TextureError;
use crate::view::{SlideSpec, WidgetOptions};

/// Active-index bookkeeping. Every move returns the new index, or `None` when
/// nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    len: usize,
    active: usize,
}

impl Pager {
    pub fn new(len: usize) -> Self {
        Self { len, active: 0 }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        if index >= self.len || index == self.active {
            return None;
        }
        self.active = index;
        Some(index)
    }

    pub fn next(&mut self) -> Option<usize> {
        self.go_to(self.active + 1)
    }

    pub fn prev(&mut self) -> Option<usize> {
        self.active.checked_sub(1).and_then(|i| self.go_to(i))
    }

    pub fn first(&mut self) -> Option<usize> {
        self.go_to(0)
    }

    pub fn last(&mut self) -> Option<usize> {
        self.len.checked_sub(1).and_then(|i| self.go_to(i))
    }

    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 >= self.len
    }

    /// Indices within `radius` of the active slide.
    pub fn window(&self, radius: usize) -> RangeInclusive<usize> {
        let end = (self.active + radius).min(self.len.saturating_sub(1));
        self.active.saturating_sub(radius)..=end
    }
}

pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

/// Scale that fits a texture inside an area without upscaling.
pub fn fit_scale(tex_width: f32, tex_height: f32, area_width: f32, area_height: f32) -> f32 {
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return 1.0;
    }
    (area_width / tex_width).min(area_height / tex_height).min(1.0).max(0.0)
}

/// Top-left corner that centres a text block of the given size in `area`.
pub fn centered_origin(area: &Rectangle, text_width: f32, font_size: i32) -> Vector2 {
    Vector2::new(
        area.x + (area.width - text_width) / 2.0,
        area.y + (area.height - font_size as f32) / 2.0,
    )
}

pub fn draw_centered_text(d: &mut RaylibDrawHandle, text: &str, area: &Rectangle, font_size: i32, color: Color) {
    let width = d.measure_text(text, font_size) as f32;
    let origin = centered_origin(area, width, font_size);
    d.draw_text(text, origin.x as i32, origin.y as i32, font_size, color);
}

/// Where everything goes inside the slide container.
#[derive(Debug, Clone, Copy)]
pub struct CarouselLayout {
    pub container: Rectangle,
    pub image_area: Rectangle,
    pub prev_button: Rectangle,
    pub next_button: Rectangle,
    pub pagination: Rectangle,
}

impl CarouselLayout {
    pub fn measure(container: Rectangle, options: &WidgetOptions) -> Self {
        let side = if options.navigation { NAV_BUTTON_SIZE + PADDING } else { PADDING };
        let button_y = container.y + container.height / 2.0 - NAV_BUTTON_SIZE / 2.0;

        Self {
            container,
            image_area: Rectangle::new(
                container.x + side,
                container.y + PADDING,
                (container.width - 2.0 * side).max(0.0),
                (container.height - PADDING - PAGINATION_HEIGHT).max(0.0),
            ),
            prev_button: Rectangle::new(container.x + PADDING / 2.0, button_y, NAV_BUTTON_SIZE, NAV_BUTTON_SIZE),
            next_button: Rectangle::new(
                container.x + container.width - PADDING / 2.0 - NAV_BUTTON_SIZE,
                button_y,
                NAV_BUTTON_SIZE,
                NAV_BUTTON_SIZE,
            ),
            pagination: Rectangle::new(
                container.x,
                container.y + container.height - PAGINATION_HEIGHT,
                container.width,
                PAGINATION_HEIGHT,
            ),
        }
    }

    /// Dots squeeze together when they would not fit at full spacing.
    fn dot_spacing(&self, count: usize) -> f32 {
        if count == 0 {
            return DOT_SPACING;
        }
        DOT_SPACING.min((self.pagination.width - 2.0 * PADDING).max(0.0) / count as f32)
    }

    pub fn dot_center(&self, index: usize, count: usize) -> Vector2 {
        let spacing = self.dot_spacing(count);
        let row_width = spacing * count as f32;
        let start = self.pagination.x + (self.pagination.width - row_width) / 2.0 + spacing / 2.0;
        Vector2::new(
            start + index as f32 * spacing,
            self.pagination.y + self.pagination.height * 0.65,
        )
    }

    pub fn dot_at(&self, point: Vector2, count: usize) -> Option<usize> {
        if count == 0 || !contains(&self.pagination, point) {
            return None;
        }
        let spacing = self.dot_spacing(count);
        let first = self.dot_center(0, count);
        let offset = point.x - (first.x - spacing / 2.0);
        if offset < 0.0 {
            return None;
        }
        let index = (offset / spacing) as usize;
        (index < count).then_some(index)
    }
}

enum SlideTexture {
    Deferred,
    Requested,
    Ready(Texture2D),
    Failed,
}

struct CarouselSlide {
    spec: SlideSpec,
    texture: SlideTexture,
}

pub struct Carousel {
    id: u64,
    options: WidgetOptions,
    slides: Vec<CarouselSlide>,
    pager: Pager,
    layout: CarouselLayout,
}

impl Carousel {
    pub fn new(id: u64, slides: &[SlideSpec], options: WidgetOptions, container: Rectangle) -> Self {
        Self {
            id,
            options,
            slides: slides
                .iter()
                .map(|spec| CarouselSlide { spec: spec.clone(), texture: SlideTexture::Deferred })
                .collect(),
            pager: Pager::new(slides.len()),
            layout: CarouselLayout::measure(container, &options),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn active_index(&self) -> usize {
        self.pager.active()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[cfg(test)]
    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    pub fn measure(&mut self, container: Rectangle) {
        self.layout = CarouselLayout::measure(container, &self.options);
    }

    /// Re-measures when the container moved or resized (observer) or when
    /// the window around it was resized (observe parents).
    pub fn observe(&mut self, container: Rectangle, parent_resized: bool) {
        let old = self.layout.container;
        let changed = old.x != container.x
            || old.y != container.y
            || old.width != container.width
            || old.height != container.height;

        if (changed && self.options.observer) || (parent_resized && self.options.observe_parents) {
            debug!("Widget {} re-measured to {}x{}", self.id, container.width, container.height);
            self.measure(container);
        }
    }

    pub fn handle_key(&mut self, key: KeyboardKey) -> Option<usize> {
        if !self.options.keyboard {
            return None;
        }
        match key {
            KeyboardKey::KEY_RIGHT | KeyboardKey::KEY_PAGE_DOWN => self.pager.next(),
            KeyboardKey::KEY_LEFT | KeyboardKey::KEY_PAGE_UP => self.pager.prev(),
            KeyboardKey::KEY_HOME => self.pager.first(),
            KeyboardKey::KEY_END => self.pager.last(),
            _ => None,
        }
    }

    pub fn handle_click(&mut self, point: Vector2) -> Option<usize> {
        if self.options.navigation {
            if contains(&self.layout.prev_button, point) {
                return self.pager.prev();
            }
            if contains(&self.layout.next_button, point) {
                return self.pager.next();
            }
        }
        if self.options.clickable_pagination {
            if let Some(index) = self.layout.dot_at(point, self.slides.len()) {
                return self.pager.go_to(index);
            }
        }
        None
    }

    /// Applies this frame's input; returns the new active index if it changed.
    pub fn handle_input(&mut self, rl: &RaylibHandle) -> Option<usize> {
        let mut changed = None;
        for key in [
            KeyboardKey::KEY_RIGHT,
            KeyboardKey::KEY_LEFT,
            KeyboardKey::KEY_PAGE_DOWN,
            KeyboardKey::KEY_PAGE_UP,
            KeyboardKey::KEY_HOME,
            KeyboardKey::KEY_END,
        ] {
            if rl.is_key_pressed(key) {
                changed = self.handle_key(key).or(changed);
            }
        }
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            changed = self.handle_click(rl.get_mouse_position()).or(changed);
        }
        changed
    }

    /// Slides near the active one whose bytes were never requested. Each
    /// slide is handed out once.
    pub fn take_loads(&mut self) -> Vec<(usize, String)> {
        let mut loads = Vec::new();
        if self.slides.is_empty() {
            return loads;
        }
        for index in self.pager.window(PRELOAD_RADIUS) {
            let slide = &mut self.slides[index];
            if let SlideTexture::Deferred = slide.texture {
                slide.texture = SlideTexture::Requested;
                debug!("Widget {} wants {}", self.id, slide.spec.source);
                loads.push((index, slide.spec.label.clone()));
            }
        }
        loads
    }

    pub fn attach(&mut self, index: usize, texture: Result<Texture2D, TextureError>) {
        let Some(slide) = self.slides.get_mut(index) else {
            return;
        };
        slide.texture = match texture {
            Ok(texture) => SlideTexture::Ready(texture),
            Err(_) => SlideTexture::Failed,
        };
    }

    #[cfg(test)]
    pub fn is_loaded(&self, index: usize) -> bool {
        matches!(self.slides.get(index).map(|s| &s.texture), Some(SlideTexture::Ready(_)))
    }

    #[cfg(test)]
    pub fn is_failed(&self, index: usize) -> bool {
        matches!(self.slides.get(index).map(|s| &s.texture), Some(SlideTexture::Failed))
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        let area = self.layout.image_area;

        if let Some(slide) = self.slides.get(self.pager.active()) {
            match &slide.texture {
                SlideTexture::Ready(texture) => {
                    let tex_width = texture.width() as f32;
                    let tex_height = texture.height() as f32;
                    let scale = fit_scale(tex_width, tex_height, area.width, area.height);
                    let width = tex_width * scale;
                    let height = tex_height * scale;

                    d.draw_texture_pro(
                        texture,
                        Rectangle::new(0.0, 0.0, tex_width, tex_height),
                        Rectangle::new(
                            area.x + (area.width - width) / 2.0,
                            area.y + (area.height - height) / 2.0,
                            width,
                            height,
                        ),
                        Vector2::new(0.0, 0.0),
                        0.0,
                        Color::WHITE,
                    );
                }
                // Not loaded (yet): the alternative text stands in
                _ => draw_centered_text(d, &slide.spec.alt, &area, FONT_SIZE, Color::GRAY),
            }
        }

        if self.options.navigation {
            self.draw_button(d, &self.layout.prev_button, "<", !self.pager.is_first());
            self.draw_button(d, &self.layout.next_button, ">", !self.pager.is_last());
        }

        let count = self.slides.len();
        for index in 0..count {
            let color = if index == self.pager.active() { Color::WHITE } else { Color::DARKGRAY };
            d.draw_circle_v(self.layout.dot_center(index, count), DOT_RADIUS, color);
        }

        let counter = format!("{} / {}", self.pager.active() + 1, count);
        let top = Rectangle::new(
            self.layout.pagination.x,
            self.layout.pagination.y,
            self.layout.pagination.width,
            self.layout.pagination.height * 0.4,
        );
        draw_centered_text(d, &counter, &top, SMALL_FONT_SIZE, Color::LIGHTGRAY);
    }

    fn draw_button(&self, d: &mut RaylibDrawHandle, rect: &Rectangle, glyph: &str, enabled: bool) {
        let (fill, text) = if enabled {
            (Color::new(255, 255, 255, 40), Color::WHITE)
        } else {
            (Color::new(255, 255, 255, 10), Color::DARKGRAY)
        };
        d.draw_rectangle_rec(*rect, fill);
        draw_centered_text(d, glyph, rect, FONT_SIZE, text);
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        // Ready textures unload with their slides
        debug!("Widget {} released {} slides", self.id, self.slides.len());
    }
}
