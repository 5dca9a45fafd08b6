//! Obstacle selection
//!
//! The rover approaches the narrowest obstacle: a single linear scan for
//! the minimum linear width, with ties going to the obstacle encountered
//! first in sweep order.

use super::object::Obstacle;

/// Index of the obstacle with the smallest linear width
///
/// Returns `None` for an empty set; the caller must treat that as "hold
/// position", not as a default target.
pub fn narrowest(obstacles: &[Obstacle]) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (index, obstacle) in obstacles.iter().enumerate() {
        match best {
            None => best = Some(index),
            Some(current) if obstacle.linear_width_cm < obstacles[current].linear_width_cm => {
                best = Some(index);
            }
            _ => {}
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::object::AngularSpan;

    fn obstacle(width: f32) -> Obstacle {
        Obstacle {
            span: AngularSpan::new(0, 10),
            distance_cm: 50.0,
            linear_width_cm: width,
        }
    }

    #[test]
    fn test_picks_minimum_width() {
        let obstacles = [obstacle(30.0), obstacle(12.0), obstacle(45.0)];
        assert_eq!(narrowest(&obstacles), Some(1));
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(narrowest(&[]), None);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let obstacles = [obstacle(12.0), obstacle(12.0), obstacle(40.0)];
        assert_eq!(narrowest(&obstacles), Some(0));
    }

    #[test]
    fn test_minimum_not_order_dependent() {
        // The global minimum wins even when a local pairwise walk would miss it
        let obstacles = [obstacle(20.0), obstacle(35.0), obstacle(5.0), obstacle(25.0)];
        assert_eq!(narrowest(&obstacles), Some(2));
    }
}
