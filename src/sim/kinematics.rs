//! Kinematics: move every entity one step and keep it inside the arena

use glam::Vec2;

use super::state::{EntityKind, clamp_axis};
use super::store::EntityStore;
use super::tick::TickInput;

/// Advance all non-absorber entities by `vel * speed_multiplier * damping`.
///
/// Walls reflect the velocity component pointing out of the arena, then the position is
/// clamped into `[radius, extent - radius]` on both axes. Nothing is created or removed.
pub fn advance(store: &mut EntityStore, width: f32, height: f32, input: &TickInput) {
    let scale = input.step_scale();

    for entity in store.as_mut_slice() {
        if entity.kind == EntityKind::Absorber {
            entity.vel = Vec2::ZERO;
            continue;
        }

        let r = entity.radius();
        let mut pos = entity.pos + entity.vel * scale;

        if pos.x < r {
            entity.vel.x = entity.vel.x.abs();
        } else if pos.x > width - r {
            entity.vel.x = -entity.vel.x.abs();
        }
        if pos.y < r {
            entity.vel.y = entity.vel.y.abs();
        } else if pos.y > height - r {
            entity.vel.y = -entity.vel.y.abs();
        }

        pos.x = clamp_axis(pos.x, r, width);
        pos.y = clamp_axis(pos.y, r, height);
        entity.pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 200.0;
    const H: f32 = 100.0;

    #[test]
    fn moves_by_scaled_velocity() {
        let mut store = EntityStore::new();
        let id = store.spawn(EntityKind::Fissile, Vec2::new(50.0, 50.0), Vec2::new(2.0, -1.0));
        let input = TickInput::new(2.0, 0.5);
        advance(&mut store, W, H, &input);
        let e = store.get(id).unwrap();
        assert_eq!(e.pos, Vec2::new(52.0, 49.0));
    }

    #[test]
    fn wall_reflects_and_clamps() {
        let mut store = EntityStore::new();
        let id = store.spawn(EntityKind::Neutron, Vec2::new(W - 3.0, 5.0), Vec2::new(50.0, -50.0));
        advance(&mut store, W, H, &TickInput::default());
        let e = store.get(id).unwrap();
        assert_eq!(e.pos, Vec2::new(W - 2.0, 2.0));
        assert_eq!(e.vel, Vec2::new(-50.0, 50.0));
    }

    #[test]
    fn absorbers_never_move() {
        let mut store = EntityStore::new();
        let id = store.spawn(EntityKind::Absorber, Vec2::new(40.0, 40.0), Vec2::ZERO);
        if let Some(e) = store.get_mut(id) {
            e.vel = Vec2::new(10.0, 10.0);
        }
        advance(&mut store, W, H, &TickInput::new(3.0, 1.0));
        let e = store.get(id).unwrap();
        assert_eq!(e.pos, Vec2::new(40.0, 40.0));
        assert_eq!(e.vel, Vec2::ZERO);
    }

    #[test]
    fn huge_velocity_stays_in_bounds() {
        let mut store = EntityStore::new();
        store.spawn(EntityKind::Byproduct, Vec2::new(100.0, 50.0), Vec2::new(-1e7, 1e7));
        for _ in 0..5 {
            advance(&mut store, W, H, &TickInput::new(4.0, 1.0));
            for e in store.iter() {
                let r = e.radius();
                assert!(e.pos.x >= r && e.pos.x <= W - r);
                assert!(e.pos.y >= r && e.pos.y <= H - r);
            }
        }
    }
}
