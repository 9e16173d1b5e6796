use crate::domain::state::{Body, Obstacle};
use crate::domain::tuning::ObstacleTuning;
use rand::Rng;

/// Counts elapsed tick time towards the next obstacle spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    // Negative while the initial delay is still running.
    elapsed_ms: f64,
    interval_ms: f64,
}

impl SpawnTimer {
    pub fn new(tuning: &ObstacleTuning) -> Self {
        Self {
            elapsed_ms: -(tuning.first_spawn_delay_ms as f64),
            interval_ms: tuning.spawn_interval_ms as f64,
        }
    }

    /// Adds `dt_ms` and reports whether a spawn is due; a due spawn resets the timer.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceResult {
    /// Obstacles the body cleared this tick.
    pub passed: u64,
    /// Obstacles dropped after leaving the arena.
    pub removed: usize,
}

/// Scrolls obstacles left, marks cleared ones and drops those fully off-screen.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, body_x: f64, speed: f64) -> AdvanceResult {
    let mut result = AdvanceResult::default();

    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
        if !obstacle.passed && obstacle.trailing_edge() < body_x {
            obstacle.passed = true;
            result.passed += 1;
        }
    }

    let before = obstacles.len();
    obstacles.retain(|o| o.x > -o.width);
    result.removed = before - obstacles.len();

    result
}

/// New obstacle at the right edge with a uniformly drawn opening.
pub fn spawn_obstacle<R: Rng>(
    rng: &mut R,
    arena_width: f64,
    arena_height: f64,
    tuning: &ObstacleTuning,
) -> Obstacle {
    let min_height = tuning.min_height;
    let max_height = (arena_height - tuning.gap - tuning.min_height).max(min_height);
    let top_height = rng.r#gen::<f64>() * (max_height - min_height) + min_height;
    Obstacle::new(arena_width, top_height, tuning.gap, tuning.width)
}

pub fn collides(body: &Body, obstacle: &Obstacle) -> bool {
    let overlaps_horizontally =
        body.x + body.radius > obstacle.x && body.x - body.radius < obstacle.trailing_edge();
    if !overlaps_horizontally {
        return false;
    }
    body.y - body.radius < obstacle.top_height || body.y + body.radius > obstacle.bottom_y
}

pub fn any_collision(body: &Body, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| collides(body, o))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn body_at(y: f64) -> Body {
        Body {
            x: 80.0,
            y,
            velocity: 0.0,
            rotation: 0.0,
            radius: 20.0,
        }
    }

    #[test]
    fn when_obstacle_scrolls_from_400_at_speed_3_then_it_is_removed_on_tick_154() {
        let mut obstacles = vec![Obstacle::new(400.0, 100.0, 150.0, 60.0)];

        for _ in 0..153 {
            advance_obstacles(&mut obstacles, 80.0, 3.0);
        }
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].x, 400.0 - 459.0);

        let result = advance_obstacles(&mut obstacles, 80.0, 3.0);
        assert_eq!(result.removed, 1);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn when_trailing_edge_crosses_body_then_passed_flips_exactly_once() {
        let mut obstacles = vec![Obstacle::new(22.0, 100.0, 150.0, 60.0)];

        let first = advance_obstacles(&mut obstacles, 80.0, 3.0);
        let second = advance_obstacles(&mut obstacles, 80.0, 3.0);

        assert_eq!(first.passed, 1);
        assert_eq!(second.passed, 0);
        assert!(obstacles[0].passed);
    }

    #[test]
    fn when_obstacles_are_removed_then_remaining_order_is_preserved() {
        let mut obstacles = vec![
            Obstacle::new(-58.0, 100.0, 150.0, 60.0),
            Obstacle::new(100.0, 110.0, 150.0, 60.0),
            Obstacle::new(300.0, 120.0, 150.0, 60.0),
        ];

        advance_obstacles(&mut obstacles, 80.0, 3.0);

        let tops: Vec<f64> = obstacles.iter().map(|o| o.top_height).collect();
        assert_eq!(tops, vec![110.0, 120.0]);
    }

    #[test]
    fn when_timer_is_new_then_first_spawn_waits_for_delay_plus_interval() {
        let mut timer = SpawnTimer::new(&ObstacleTuning::default());

        let mut elapsed = 0.0;
        while !timer.advance(100.0) {
            elapsed += 100.0;
        }
        assert_eq!(elapsed + 100.0, 3500.0);

        let mut steady = 0.0;
        while !timer.advance(100.0) {
            steady += 100.0;
        }
        assert_eq!(steady + 100.0, 1500.0);
    }

    #[test]
    fn spawned_obstacles_stay_within_height_bounds() {
        let tuning = ObstacleTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let obstacle = spawn_obstacle(&mut rng, 400.0, 600.0, &tuning);
            assert_eq!(obstacle.x, 400.0);
            assert!(obstacle.top_height >= 50.0);
            assert!(obstacle.top_height <= 600.0 - 150.0 - 50.0);
            assert_eq!(obstacle.bottom_y, obstacle.top_height + tuning.gap);
            assert_eq!(obstacle.width, 60.0);
        }
    }

    #[test]
    fn when_body_is_inside_the_gap_then_no_collision() {
        let obstacle = Obstacle::new(70.0, 200.0, 150.0, 60.0);
        assert!(!collides(&body_at(275.0), &obstacle));
    }

    #[test]
    fn when_body_touches_top_part_then_collision() {
        let obstacle = Obstacle::new(70.0, 200.0, 150.0, 60.0);
        assert!(collides(&body_at(215.0), &obstacle));
    }

    #[test]
    fn when_body_touches_bottom_part_then_collision() {
        let obstacle = Obstacle::new(70.0, 200.0, 150.0, 60.0);
        assert!(collides(&body_at(335.0), &obstacle));
    }

    #[test]
    fn when_obstacle_is_not_overlapping_horizontally_then_height_is_ignored() {
        let ahead = Obstacle::new(100.0, 500.0, 50.0, 60.0);
        let behind = Obstacle::new(-1.0, 500.0, 50.0, 60.0);
        assert!(!any_collision(&body_at(300.0), &[ahead, behind]));
    }
}
