use std::ops::RangeInclusive;

use rand::Rng;

use crate::config::StarShape;
use crate::frame::DrawCommand;
use crate::projection::Projection;
use crate::vec3::Vec3;

/// Circle diameter (pixels) of a fully opaque star.
pub const STAR_DIAMETER: f64 = 10.0;
/// Side length (pixels) of a rect star.
pub const STAR_RECT_SIZE: f64 = 5.0;
/// Grey levels a star twinkles between.
pub const TWINKLE_RANGE: RangeInclusive<u8> = 150..=255;

/// Visible depth range, exclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBounds {
    pub min_z: f64,
    pub max_z: f64,
}

impl DepthBounds {
    pub fn new(min_z: f64, max_z: f64) -> Self {
        Self { min_z, max_z }
    }

    /// Strict on every axis: a point on the boundary is not visible.
    pub fn contains_strict(&self, pos: Vec3) -> bool {
        pos.x > -1.0
            && pos.x < 1.0
            && pos.y > -1.0
            && pos.y < 1.0
            && pos.z > self.min_z
            && pos.z < self.max_z
    }

    /// 1.0 at `min_z` fading linearly to 0.0 at `max_z`, clamped outside.
    pub fn opacity_at(&self, z: f64) -> f64 {
        ((self.max_z - z) / (self.max_z - self.min_z)).clamp(0.0, 1.0)
    }
}

/// Everything an entity update reads besides its own fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionContext {
    pub bounds: DepthBounds,
    /// Shared depth velocity overriding each entity's own, when set.
    pub depth_velocity: Option<f64>,
    pub wrap_depth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarStyle {
    pub shape: StarShape,
    pub brightness: u8,
    /// Rolled while drawing, picked up by the next update.
    pub next_brightness: Option<u8>,
}

impl StarStyle {
    pub fn new(shape: StarShape) -> Self {
        Self {
            shape,
            brightness: *TWINKLE_RANGE.end(),
            next_brightness: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Moves but never draws anything.
    Point,
    Star(StarStyle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointEntity {
    pub position: Vec3,
    pub velocity: Vec3,
    pub opacity: f64,
    pub visible: bool,
    pub kind: EntityKind,
}

impl PointEntity {
    pub fn new_point(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            opacity: 1.0,
            visible: false,
            kind: EntityKind::Point,
        }
    }

    pub fn new_star(position: Vec3, velocity: Vec3, shape: StarShape) -> Self {
        Self {
            kind: EntityKind::Star(StarStyle::new(shape)),
            ..Self::new_point(position, velocity)
        }
    }

    /// Advance one tick and recompute visibility and opacity.
    pub fn update(&mut self, ctx: &MotionContext) {
        if let EntityKind::Star(style) = &mut self.kind {
            if let Some(brightness) = style.next_brightness.take() {
                style.brightness = brightness;
            }
        }

        if let Some(vz) = ctx.depth_velocity {
            self.velocity.z = vz;
        }
        self.position += self.velocity;

        if ctx.wrap_depth {
            let bounds = ctx.bounds;
            if self.velocity.z > 0.0 && self.position.z > bounds.max_z {
                self.position.z = bounds.min_z;
            } else if self.velocity.z < 0.0 && self.position.z < bounds.min_z {
                self.position.z = bounds.max_z;
            }
        }

        self.visible = ctx.bounds.contains_strict(self.position);
        if !self.visible {
            return;
        }
        self.opacity = ctx.bounds.opacity_at(self.position.z);
    }

    /// Produce this entity's draw command, if it draws at all. A star whose
    /// depth cannot be projected is skipped for this frame.
    pub fn render(&mut self, projection: &Projection, rng: &mut impl Rng) -> Option<DrawCommand> {
        let EntityKind::Star(style) = &mut self.kind else {
            return None;
        };
        let screen = projection.to_screen(self.position)?;
        let brightness = style.brightness;
        style.next_brightness = Some(rng.gen_range(TWINKLE_RANGE));

        Some(match style.shape {
            StarShape::Rect => DrawCommand::Rect {
                x: screen.x,
                y: screen.y,
                size: STAR_RECT_SIZE,
                brightness,
                alpha: self.opacity,
            },
            StarShape::Circle => DrawCommand::Circle {
                x: screen.x,
                y: screen.y,
                diameter: STAR_DIAMETER * self.opacity,
                brightness,
                alpha: self.opacity,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Viewport;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn bounds() -> DepthBounds {
        DepthBounds::new(-5.0, 1.0)
    }

    fn own_velocity(wrap_depth: bool) -> MotionContext {
        MotionContext {
            bounds: bounds(),
            depth_velocity: None,
            wrap_depth,
        }
    }

    mod opacity {
        use super::*;

        #[test]
        fn endpoints() {
            assert_eq!(bounds().opacity_at(-5.0), 1.0);
            assert_eq!(bounds().opacity_at(1.0), 0.0);
        }

        #[test]
        fn decreasing_and_affine_inside_range() {
            let b = bounds();
            let mut previous = b.opacity_at(-4.99);
            let mut z = -4.9;
            while z < 0.99 {
                let o = b.opacity_at(z);
                assert!(o < previous);
                assert!((o - (1.0 - z) / 6.0).abs() < 1e-12);
                previous = o;
                z += 0.1;
            }
        }

        #[test]
        fn clamped_outside_range() {
            assert_eq!(bounds().opacity_at(-20.0), 1.0);
            assert_eq!(bounds().opacity_at(3.0), 0.0);
        }
    }

    mod visibility {
        use super::*;

        #[test]
        fn boundary_values_are_not_visible() {
            let b = bounds();
            assert!(b.contains_strict(Vec3::new(0.0, 0.0, -2.0)));
            assert!(!b.contains_strict(Vec3::new(1.0, 0.0, -2.0)));
            assert!(!b.contains_strict(Vec3::new(-1.0, 0.0, -2.0)));
            assert!(!b.contains_strict(Vec3::new(0.0, 1.0, -2.0)));
            assert!(!b.contains_strict(Vec3::new(0.0, -1.0, -2.0)));
            assert!(!b.contains_strict(Vec3::new(0.0, 0.0, -5.0)));
            assert!(!b.contains_strict(Vec3::new(0.0, 0.0, 1.0)));
        }

        #[test]
        fn invisible_update_keeps_opacity() {
            let mut e = PointEntity::new_point(Vec3::new(2.0, 0.0, -2.0), Vec3::new(0.1, 0.0, 0.0));
            e.opacity = 0.37;
            e.update(&own_velocity(true));
            assert!(!e.visible);
            assert_eq!(e.opacity, 0.37);
        }

        #[test]
        fn visible_update_recomputes_opacity() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, -2.1), Vec3::new(0.0, 0.0, 0.1));
            e.opacity = 0.0;
            e.update(&own_velocity(true));
            assert!(e.visible);
            assert!((e.opacity - 0.5).abs() < 1e-9);
        }
    }

    mod motion {
        use super::*;

        #[test]
        fn first_tick_from_near_edge() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 0.1));
            e.update(&own_velocity(true));
            assert!(e.visible);
            assert!((e.opacity - 1.0).abs() < 0.05);
            assert!((e.position.z + 4.9).abs() < 1e-9);
        }

        #[test]
        fn wraps_back_to_near_edge_after_passing_far_edge() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 0.1));
            let ctx = own_velocity(true);
            let mut wrapped = false;
            for _ in 0..100 {
                let before = e.position.z;
                e.update(&ctx);
                if e.position.z < before {
                    wrapped = true;
                    break;
                }
            }
            assert!(wrapped);
            assert_eq!(e.position.z, -5.0);
        }

        #[test]
        fn without_wrap_star_leaves_view() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 0.1));
            let ctx = own_velocity(false);
            for _ in 0..100 {
                e.update(&ctx);
            }
            assert!(e.position.z > 1.0);
            assert!(!e.visible);
        }

        #[test]
        fn wrap_relocates_exactly_once() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, 1.5), Vec3::new(0.0, 0.0, 0.25));
            let ctx = own_velocity(true);
            e.update(&ctx);
            assert_eq!(e.position.z, -5.0);
            e.update(&ctx);
            assert!((e.position.z - (-4.75)).abs() < 1e-12);
        }

        #[test]
        fn negative_velocity_wraps_to_far_edge() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, -4.95), Vec3::new(0.0, 0.0, -0.1));
            e.update(&own_velocity(true));
            assert_eq!(e.position.z, 1.0);
        }

        #[test]
        fn zero_velocity_never_wraps() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO);
            e.update(&own_velocity(true));
            assert_eq!(e.position.z, 7.0);
        }

        #[test]
        fn shared_depth_velocity_overrides_own() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 0.5));
            let ctx = MotionContext {
                depth_velocity: Some(-0.25),
                ..own_velocity(true)
            };
            e.update(&ctx);
            assert_eq!(e.velocity.z, -0.25);
            assert!((e.position.z + 2.25).abs() < 1e-12);
        }
    }

    mod render {
        use super::*;

        fn projection() -> Projection {
            Projection::new(0.0, Viewport::new(100.0, 100.0))
        }

        #[test]
        fn point_draws_nothing() {
            let mut e = PointEntity::new_point(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO);
            let before = e.clone();
            assert!(e.render(&projection(), &mut test_rng()).is_none());
            assert_eq!(e, before);
        }

        #[test]
        fn circle_diameter_follows_opacity() {
            let mut e = PointEntity::new_star(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO, StarShape::Circle);
            e.opacity = 0.5;
            match e.render(&projection(), &mut test_rng()) {
                Some(DrawCommand::Circle { x, y, diameter, alpha, .. }) => {
                    assert!((x - 50.0).abs() < 1e-9);
                    assert!((y - 50.0).abs() < 1e-9);
                    assert!((diameter - 5.0).abs() < 1e-9);
                    assert_eq!(alpha, 0.5);
                }
                other => panic!("expected circle, got {other:?}"),
            }
        }

        #[test]
        fn rect_star_has_fixed_size() {
            let mut e = PointEntity::new_star(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO, StarShape::Rect);
            let cmd = e.render(&projection(), &mut test_rng());
            assert!(matches!(cmd, Some(DrawCommand::Rect { size, .. }) if size == STAR_RECT_SIZE));
        }

        #[test]
        fn degenerate_depth_is_skipped() {
            let mut e = PointEntity::new_star(Vec3::new(0.1, 0.1, 0.0), Vec3::ZERO, StarShape::Circle);
            assert!(e.render(&projection(), &mut test_rng()).is_none());
        }

        #[test]
        fn twinkle_applies_on_next_update() {
            let mut e = PointEntity::new_star(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO, StarShape::Circle);
            let mut rng = test_rng();
            e.render(&projection(), &mut rng);
            let EntityKind::Star(style) = e.kind else {
                panic!("expected star");
            };
            let rolled = style.next_brightness.expect("brightness rolled");
            assert!(TWINKLE_RANGE.contains(&rolled));
            assert_eq!(style.brightness, 255);

            e.update(&own_velocity(true));
            let EntityKind::Star(style) = e.kind else {
                panic!("expected star");
            };
            assert_eq!(style.brightness, rolled);
            assert_eq!(style.next_brightness, None);
        }
    }
}
