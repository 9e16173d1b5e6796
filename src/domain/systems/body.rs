use crate::domain::state::Body;
use crate::domain::tuning::BodyTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Top of the arena; the body stops but the game goes on.
    Ceiling,
    /// Bottom of the arena; ends the game.
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyStep {
    /// Strength was above the engagement threshold this tick.
    pub engaged: bool,
    pub boundary: Option<Boundary>,
}

/// Advances the body one tick for the given (already clamped) strength.
pub fn tick_body(body: &mut Body, strength: u8, tuning: &BodyTuning, arena_height: f64) -> BodyStep {
    let engaged = strength > tuning.high_strength_threshold;
    if engaged {
        // Binary control: any strong contraction is a full lift.
        body.velocity = tuning.jump_force;
        body.rotation = tuning.jump_rotation;
    } else {
        body.velocity = (body.velocity + tuning.gravity).min(tuning.max_velocity);
        if body.velocity > 0.0 {
            body.rotation = (body.velocity * tuning.rotation_per_velocity).min(tuning.max_fall_rotation);
        }
    }

    body.y += body.velocity;

    BodyStep {
        engaged,
        boundary: clamp_to_arena(body, arena_height),
    }
}

fn clamp_to_arena(body: &mut Body, arena_height: f64) -> Option<Boundary> {
    let floor = arena_height - body.radius;
    if body.y < body.radius {
        body.y = body.radius;
        body.velocity = 0.0;
        Some(Boundary::Ceiling)
    } else if body.y > floor {
        body.y = floor;
        Some(Boundary::Floor)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(y: f64, velocity: f64) -> Body {
        Body {
            x: 80.0,
            y,
            velocity,
            rotation: 0.0,
            radius: 20.0,
        }
    }

    #[test]
    fn when_relaxed_then_gravity_accumulates_up_to_max_velocity() {
        let tuning = BodyTuning::default();
        let mut body = body_at(300.0, 9.8);

        let step = tick_body(&mut body, 0, &tuning, 600.0);

        assert!(!step.engaged);
        assert_eq!(body.velocity, 10.0);
        assert_eq!(body.y, 310.0);
        assert_eq!(body.rotation, 30.0);
    }

    #[test]
    fn when_falling_fast_then_rotation_is_capped() {
        let tuning = BodyTuning {
            max_velocity: 40.0,
            ..BodyTuning::default()
        };
        let mut body = body_at(100.0, 35.0);

        tick_body(&mut body, 0, &tuning, 600.0);

        assert_eq!(body.rotation, 90.0);
    }

    #[test]
    fn when_rising_without_engagement_then_rotation_is_kept() {
        let tuning = BodyTuning::default();
        let mut body = body_at(300.0, -10.0);
        body.rotation = -25.0;

        tick_body(&mut body, 10, &tuning, 600.0);

        assert!((body.velocity - -9.4).abs() < 1e-9);
        assert_eq!(body.rotation, -25.0);
    }

    #[test]
    fn when_strength_is_exactly_threshold_then_tick_is_not_engaged() {
        let tuning = BodyTuning::default();
        let mut body = body_at(300.0, 0.0);

        let step = tick_body(&mut body, 70, &tuning, 600.0);

        assert!(!step.engaged);
        assert!((body.velocity - 0.6).abs() < 1e-9);
    }

    #[test]
    fn when_body_passes_ceiling_then_it_is_clamped_and_stopped() {
        let tuning = BodyTuning::default();
        let mut body = body_at(25.0, 0.0);

        let step = tick_body(&mut body, 85, &tuning, 600.0);

        assert_eq!(step.boundary, Some(Boundary::Ceiling));
        assert_eq!(body.y, 20.0);
        assert_eq!(body.velocity, 0.0);
    }

    #[test]
    fn when_body_passes_floor_then_floor_is_reported() {
        let tuning = BodyTuning::default();
        let mut body = body_at(580.0, 5.0);

        let step = tick_body(&mut body, 0, &tuning, 600.0);

        assert_eq!(step.boundary, Some(Boundary::Floor));
        assert_eq!(body.y, 580.0);
    }
}
