use rand::Rng;
use sf_core::canvas::{Color, Rect};

pub const SUN_COLOR: Color = Color::rgb(255, 200, 40);
pub const DEFAULT_SUN_SIZE: (f32, f32) = (40.0, 40.0);

const MIN_FALL_SPEED: f32 = 40.0;
const MAX_FALL_SPEED: f32 = 120.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Sun {
    pub rect: Rect,
    /// Pixels per second.
    pub fall_speed: f32,
}

impl Sun {
    /// A sun somewhere above the top edge, horizontally inside the screen.
    pub fn spawn(rng: &mut impl Rng, screen: (u32, u32), size: (f32, f32)) -> Self {
        let (w, h) = size;
        let max_x = (screen.0 as f32 - w).max(0.0);
        let x = if max_x > 0.0 { rng.gen_range(0.0..max_x) } else { 0.0 };
        let y = -rng.gen_range(h..h + (screen.1 as f32).max(1.0));
        Self {
            rect: Rect::new(x, y, w, h),
            fall_speed: rng.gen_range(MIN_FALL_SPEED..MAX_FALL_SPEED),
        }
    }

    /// Fall for `dt` seconds. Once fully below `screen_height` the sun re-enters
    /// from just above the top edge, keeping its column.
    pub fn update(&mut self, dt: f32, screen_height: f32) {
        self.rect.y += self.fall_speed * dt;
        if self.rect.y >= screen_height {
            self.rect.y = -self.rect.h;
        }
    }

    pub fn hit(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawns_above_screen_within_columns() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let sun = Sun::spawn(&mut rng, (800, 600), DEFAULT_SUN_SIZE);
            assert!(sun.rect.x >= 0.0 && sun.rect.x + sun.rect.w <= 800.0);
            assert!(sun.rect.bottom() <= 0.0);
            assert!(sun.fall_speed >= MIN_FALL_SPEED && sun.fall_speed < MAX_FALL_SPEED);
        }
    }

    #[test]
    fn same_seed_same_suns() {
        let a = Sun::spawn(&mut StdRng::seed_from_u64(9), (800, 600), DEFAULT_SUN_SIZE);
        let b = Sun::spawn(&mut StdRng::seed_from_u64(9), (800, 600), DEFAULT_SUN_SIZE);
        assert_eq!(a, b);
    }

    #[test]
    fn falls_and_wraps_to_top() {
        let mut sun = Sun {
            rect: Rect::new(100.0, 550.0, 40.0, 40.0),
            fall_speed: 100.0,
        };
        sun.update(0.25, 600.0);
        assert_eq!(sun.rect.y, 575.0);
        sun.update(0.25, 600.0);
        assert_eq!(sun.rect.y, -40.0);
        assert_eq!(sun.rect.x, 100.0);
    }

    #[test]
    fn screen_narrower_than_sun_pins_to_left_edge() {
        let mut rng = StdRng::seed_from_u64(1);
        let sun = Sun::spawn(&mut rng, (20, 600), DEFAULT_SUN_SIZE);
        assert_eq!(sun.rect.x, 0.0);
    }

    #[test]
    fn hit_test_uses_rect() {
        let sun = Sun {
            rect: Rect::new(10.0, 10.0, 40.0, 40.0),
            fall_speed: 50.0,
        };
        assert!(sun.hit(10.0, 10.0));
        assert!(sun.hit(49.0, 49.0));
        assert!(!sun.hit(50.0, 30.0));
    }
}
