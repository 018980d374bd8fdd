//! Render target handed to every `update` call.
//!
//! States only see the `Canvas` trait. The concrete `DrawList` records what was
//! drawn so a backend can present it after the update phase.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered(center_x: f32, center_y: f32, w: f32, h: f32) -> Self {
        Self::new(center_x - w * 0.5, center_y - h * 0.5, w, h)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

pub trait Canvas {
    /// Called by the controller right before a state's `update`. Recorders
    /// drop the previous frame here; immediate-mode targets do nothing.
    fn begin_frame(&mut self) {}
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);
    /// Cover the whole surface with `color`.
    fn fill(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Fill(Color),
    Rect(Rect, Color),
}

/// Recorded frame. A `fill` discards everything drawn before it, since it
/// would be fully covered anyway.
#[derive(Debug, Clone)]
pub struct DrawList {
    size: (u32, u32),
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Color of the most recent full fill, if any.
    pub fn background(&self) -> Option<Color> {
        match self.commands.first() {
            Some(DrawCommand::Fill(color)) => Some(*color),
            _ => None,
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Rect(rect, color) => Some((rect, color)),
            DrawCommand::Fill(_) => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for DrawList {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn fill(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Fill(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::Rect(rect, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_discards_earlier_commands() {
        let mut list = DrawList::new(100, 100);
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        list.fill(Color::BLACK);
        list.fill_rect(Rect::new(5.0, 5.0, 10.0, 10.0), Color::YELLOW);
        assert_eq!(list.commands().len(), 2);
        assert_eq!(list.background(), Some(Color::BLACK));
        assert_eq!(list.rects().count(), 1);
    }

    #[test]
    fn begin_frame_starts_an_empty_recording() {
        let mut list = DrawList::new(100, 100);
        list.fill(Color::BLACK);
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        list.begin_frame();
        assert!(list.commands().is_empty());
        assert_eq!(list.size(), (100, 100));
    }

    #[test]
    fn empty_rects_are_dropped() {
        let mut list = DrawList::new(100, 100);
        list.fill_rect(Rect::new(0.0, 0.0, 0.0, 10.0), Color::WHITE);
        assert!(list.commands().is_empty());
        assert_eq!(list.background(), None);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::centered(50.0, 50.0, 20.0, 10.0);
        assert_eq!(rect, Rect::new(40.0, 45.0, 20.0, 10.0));
        assert!(rect.contains(40.0, 45.0));
        assert!(rect.contains(59.9, 54.9));
        assert!(!rect.contains(60.0, 50.0));
        assert!(!rect.contains(50.0, 55.0));
    }

    #[test]
    fn color_converts_to_normalized_floats() {
        assert_eq!(Color::YELLOW.to_f32(), [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(Color::BLACK.to_f32(), [0.0, 0.0, 0.0, 1.0]);
    }
}
