//! Craft physics and input integration
//!
//! The integration order is load-bearing for game feel and must not be
//! reordered: thrust -> boost/scroll -> collector timer -> friction ->
//! integrate -> wall clamp.

use super::state::RunState;
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Loadout;

/// Advance the craft by one tick of held-input physics
pub fn integrate(state: &mut RunState, input: &TickInput) {
    let craft = &mut state.craft;

    // Held directions apply a fixed thrust; unpressed directions apply none
    if input.thrust_up {
        craft.vel.y -= SHIP_THRUST;
    }
    if input.thrust_down {
        craft.vel.y += SHIP_THRUST;
    }
    if input.thrust_left {
        craft.vel.x -= SHIP_THRUST;
    }
    if input.thrust_right {
        craft.vel.x += SHIP_THRUST;
    }

    // Boost drains charge and forces the scroll speed up; otherwise charge
    // trickles back and the scroll speed relaxes toward a base that ramps
    // with distance (the difficulty curve)
    craft.boosting = input.boost && craft.boost_charge > 0.0;
    if craft.boosting {
        craft.boost_charge = (craft.boost_charge - BOOST_DRAIN).max(0.0);
        craft.scroll_speed = (craft.scroll_speed + 0.1).min(SCROLL_SPEED_MAX * 1.5);
    } else {
        craft.boost_charge = (craft.boost_charge + BOOST_REGEN).min(BOOST_MAX);
        let target = SCROLL_SPEED_BASE + craft.distance / 10_000.0;
        craft.scroll_speed = craft.scroll_speed * 0.98 + target * 0.02;
    }

    update_collector(state, input);

    let craft = &mut state.craft;
    craft.vel *= SHIP_FRICTION;
    craft.pos += craft.vel;

    // Elastic wall bounce: a clamped axis inverts and damps its velocity
    let (w, h) = (state.config.width, state.config.height);
    if craft.pos.x < 0.0 {
        craft.pos.x = 0.0;
        craft.vel.x *= WALL_BOUNCE;
    }
    if craft.pos.x > w {
        craft.pos.x = w;
        craft.vel.x *= WALL_BOUNCE;
    }
    if craft.pos.y < 0.0 {
        craft.pos.y = 0.0;
        craft.vel.y *= WALL_BOUNCE;
    }
    if craft.pos.y > h {
        craft.pos.y = h;
        craft.vel.y *= WALL_BOUNCE;
    }
}

/// Run the collector use/countdown bookkeeping
///
/// The pull itself is applied in the resolver; this only gates activation
/// and burns down the shared use timer.
fn update_collector(state: &mut RunState, input: &TickInput) {
    if state.config.loadout != Loadout::MiningRig {
        state.collector.active = false;
        return;
    }

    let col = &mut state.collector;
    col.active = input.secondary && col.uses_left > 0;
    if col.active {
        col.ticks_left = col.ticks_left.saturating_sub(1);
        if col.ticks_left == 0 {
            col.uses_left -= 1;
            if col.uses_left > 0 {
                col.ticks_left = col.max_ticks;
            } else {
                col.active = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RunConfig;

    fn flight_state() -> RunState {
        RunState::new(RunConfig {
            seed: 7,
            ..Default::default()
        })
    }

    #[test]
    fn test_thrust_and_friction() {
        let mut state = flight_state();
        let input = TickInput {
            thrust_up: true,
            ..Default::default()
        };
        integrate(&mut state, &input);
        // One tick of upward thrust, then friction
        assert!((state.craft.vel.y - (-SHIP_THRUST * SHIP_FRICTION)).abs() < 1e-5);

        // Released: velocity decays, never grows
        let before = state.craft.vel.y.abs();
        integrate(&mut state, &TickInput::default());
        assert!(state.craft.vel.y.abs() < before);
    }

    #[test]
    fn test_wall_bounce_inverts_and_damps() {
        let mut state = flight_state();
        state.craft.pos.x = 1.0;
        state.craft.vel.x = -20.0;
        integrate(&mut state, &TickInput::default());
        assert_eq!(state.craft.pos.x, 0.0);
        assert!(state.craft.vel.x > 0.0);
        assert!(state.craft.vel.x < 20.0);
    }

    #[test]
    fn test_boost_drains_then_regens() {
        let mut state = flight_state();
        let boosting = TickInput {
            boost: true,
            ..Default::default()
        };
        integrate(&mut state, &boosting);
        assert!(state.craft.boosting);
        assert_eq!(state.craft.boost_charge, BOOST_MAX - BOOST_DRAIN);
        assert!(state.craft.scroll_speed > SCROLL_SPEED_BASE);

        let charge = state.craft.boost_charge;
        integrate(&mut state, &TickInput::default());
        assert!(!state.craft.boosting);
        assert!(state.craft.boost_charge > charge);
    }

    #[test]
    fn test_boost_with_empty_charge_is_inert() {
        let mut state = flight_state();
        state.craft.boost_charge = 0.0;
        let input = TickInput {
            boost: true,
            ..Default::default()
        };
        integrate(&mut state, &input);
        assert!(!state.craft.boosting);
    }

    #[test]
    fn test_collector_countdown_consumes_uses() {
        let mut state = flight_state();
        state.collector.uses_left = 2;
        state.collector.ticks_left = 2;
        state.collector.max_ticks = 2;

        let held = TickInput {
            secondary: true,
            ..Default::default()
        };
        integrate(&mut state, &held);
        assert!(state.collector.active);
        integrate(&mut state, &held);
        // First use expired, timer reset
        assert_eq!(state.collector.uses_left, 1);
        assert_eq!(state.collector.ticks_left, 2);

        integrate(&mut state, &held);
        integrate(&mut state, &held);
        // Last use burned out; ability dead
        assert_eq!(state.collector.uses_left, 0);
        assert!(!state.collector.active);

        integrate(&mut state, &held);
        assert!(!state.collector.active);
    }
}
