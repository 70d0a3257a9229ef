//! Collision detection and interaction resolution
//!
//! Runs after this tick's position update, so a hit only registers on the
//! tick where the post-move distance crosses the threshold. There is no
//! swept collision; a miss at high relative speed is an accepted trade-off.
//!
//! The entity list is walked in reverse index order so in-place removal
//! cannot skip elements.

use glam::Vec2;
use rand::Rng;

use super::spawn;
use super::state::{Entity, EntityKind, FxEvent, RunState};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Loadout;

/// Resolve all interactions for one tick
pub fn resolve(state: &mut RunState, input: &TickInput) {
    match state.config.loadout {
        Loadout::MiningRig => mining_beam(state, input),
        Loadout::Cannon => fire_cannon(state, input),
    }
    entity_pass(state);
}

/// Ranged mining beam (rig loadout)
///
/// Gated on the previous tick's landing prompt so the beam never fires
/// through an approach dialog. Charge is spent per tick of attempt; the
/// first non-dying hazard in iteration order within pointer range wins,
/// one per tick.
fn mining_beam(state: &mut RunState, input: &TickInput) {
    state.mining_active = false;
    state.mining_progress = 0.0;

    if !input.primary || state.target_near.is_some() || state.craft.boost_charge <= MINING_COST {
        return;
    }
    state.craft.boost_charge -= MINING_COST;

    let pointer = input.pointer;
    let target = state.entities.iter().position(|e| {
        matches!(e.kind, EntityKind::Hazard { dying: false, .. })
            && pointer.distance(e.pos) < e.radius + MINING_POINTER_SLOP
    });
    let Some(idx) = target else {
        return;
    };

    let speed = state.tuning.mining.speed;
    // The beam rattles its target around a little
    let jitter = Vec2::new(
        state.rng.random_range(-2.0..2.0),
        state.rng.random_range(-2.0..2.0),
    );

    let mut completed = false;
    let entity = &mut state.entities[idx];
    entity.pos += jitter;
    if let EntityKind::Hazard {
        mining_progress,
        dying,
        flash_ticks,
    } = &mut entity.kind
    {
        state.mining_active = true;
        state.mining_progress = *mining_progress;
        *mining_progress += speed;
        if *mining_progress >= 1.0 {
            *dying = true;
            *flash_ticks = DYING_FLASH_TICKS;
            completed = true;
        }
    }
    if completed {
        // Kill frame: the beam tone stops immediately
        state.mining_active = false;
    }
}

/// Fixed-cooldown projectile fire (cannon loadout)
fn fire_cannon(state: &mut RunState, input: &TickInput) {
    state.fire_cooldown = state.fire_cooldown.saturating_sub(1);
    if !input.fire || state.fire_cooldown > 0 {
        return;
    }
    state.fire_cooldown = FIRE_COOLDOWN_TICKS;

    let mut dir = (input.pointer - state.craft.pos).normalize_or_zero();
    if dir == Vec2::ZERO {
        dir = Vec2::NEG_Y;
    }
    let pos = state.craft.pos;
    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind: EntityKind::Projectile {
            ttl: PROJECTILE_LIFETIME_TICKS,
        },
        pos,
        vel: dir * PROJECTILE_SPEED,
        radius: PROJECTILE_RADIUS,
        rotation: 0.0,
        rotation_speed: 0.0,
    });
}

/// Move every entity, then apply proximity effects and removals
fn entity_pass(state: &mut RunState) {
    state.target_near = None;

    let scroll = state.craft.scroll_speed;
    let scroll_mult = if state.craft.boosting {
        BOOST_SCROLL_MULTIPLIER
    } else {
        1.0
    };
    let collector_on = state.collector.active;
    let collector_cfg = state.tuning.collector;
    let bottom = state.config.height + DESPAWN_MARGIN;

    // Cross-entity effects are deferred past the loop: removals triggered
    // from another index, and spawns that need the RNG
    let mut mineral_bursts: Vec<Vec2> = Vec::new();
    let mut explosions: Vec<(Vec2, f32, usize)> = Vec::new();
    let mut projectile_hits: Vec<(u32, u32)> = Vec::new();

    let mut i = state.entities.len();
    while i > 0 {
        i -= 1;

        // Dying hazards only scroll out their flash window
        if let EntityKind::Hazard {
            dying: true,
            flash_ticks,
            ..
        } = &mut state.entities[i].kind
        {
            *flash_ticks = flash_ticks.saturating_sub(1);
            let expired = *flash_ticks == 0;
            let e = &mut state.entities[i];
            e.pos.y += scroll;
            if expired {
                let pos = e.pos;
                let strength = if e.radius > 35.0 { 20.0 } else { 5.0 };
                let debris = (e.radius * 0.8) as usize;
                explosions.push((pos, strength, debris));
                mineral_bursts.push(pos);
                state.entities.remove(i);
            }
            continue;
        }

        {
            let e = &mut state.entities[i];
            e.pos.y += scroll * scroll_mult + e.vel.y;
            e.pos.x += e.vel.x;
            e.rotation += e.rotation_speed;
        }

        if collector_on && state.entities[i].kind.is_collectible() {
            let craft_pos = state.craft.pos;
            let e = &mut state.entities[i];
            let to_craft = craft_pos - e.pos;
            let dist = to_craft.length();
            if dist > f32::EPSILON && dist < collector_cfg.radius {
                // Pull hardens as the object closes in
                let force = collector_cfg.pull_speed * 2.0 * (1.0 - dist / collector_cfg.radius);
                e.vel += to_craft / dist * force;
            }
        }

        // Bottom-edge cull; an unclaimed landing target pays out as a
        // multiplier bump
        if state.entities[i].pos.y > bottom {
            if state.entities[i].kind.is_landing_target() {
                state.craft.multiplier += BYPASS_MULTIPLIER_BONUS;
            }
            state.entities.remove(i);
            continue;
        }

        if matches!(state.entities[i].kind, EntityKind::Projectile { .. }) {
            let expired = {
                let e = &mut state.entities[i];
                let mut expired = e.pos.y < -DESPAWN_MARGIN;
                if let EntityKind::Projectile { ttl } = &mut e.kind {
                    *ttl = ttl.saturating_sub(1);
                    expired |= *ttl == 0;
                }
                expired
            };
            if expired {
                state.entities.remove(i);
                continue;
            }
            let (pid, ppos, pradius) = {
                let e = &state.entities[i];
                (e.id, e.pos, e.radius)
            };
            if let Some(hazard) = state.entities.iter().find(|h| {
                matches!(h.kind, EntityKind::Hazard { dying: false, .. })
                    && h.pos.distance(ppos) < h.radius + pradius
            }) {
                projectile_hits.push((pid, hazard.id));
            }
            continue;
        }

        // Landing targets are never consumed; proximity raises the prompt
        if state.entities[i].kind.is_landing_target() {
            let e = &state.entities[i];
            let dist = state.craft.pos.distance(e.pos);
            if dist < e.radius + LANDING_PROMPT_RANGE
                && e.pos.y > 0.0
                && e.pos.y < state.config.height
            {
                if let EntityKind::LandingTarget { name } = &e.kind {
                    state.target_near = Some(name.clone());
                }
            }
            continue;
        }

        // Craft contact: kind-specific effect exactly once, then removal
        let (dist, pos, radius) = {
            let e = &state.entities[i];
            (state.craft.pos.distance(e.pos), e.pos, e.radius)
        };
        if dist < radius + CRAFT_RADIUS {
            let consumed = match &state.entities[i].kind {
                EntityKind::Hazard { .. } => {
                    let craft = &mut state.craft;
                    craft.hull -= COLLISION_DAMAGE;
                    craft.fuel -= COLLISION_FUEL_LEAK;
                    // Knock the craft away along the collision normal
                    if dist > f32::EPSILON {
                        craft.vel += (craft.pos - pos) / dist * COLLISION_IMPULSE;
                    }
                    state.screen_shake = 15.0;
                    explosions.push((pos, 15.0, 15));
                    true
                }
                EntityKind::FuelCell { value } => {
                    state.craft.fuel = (state.craft.fuel + value).min(FUEL_MAX);
                    state.events.push(FxEvent::Collect);
                    true
                }
                EntityKind::RepairKit { value } => {
                    state.craft.hull = (state.craft.hull + value).min(HULL_MAX);
                    state.events.push(FxEvent::Collect);
                    true
                }
                EntityKind::BoostCell { value } => {
                    state.craft.boost_charge = (state.craft.boost_charge + value).min(BOOST_MAX);
                    state.events.push(FxEvent::Collect);
                    true
                }
                EntityKind::Mineral => {
                    state.craft.cargo += 1.0;
                    state.craft.boost_charge =
                        (state.craft.boost_charge + MINERAL_ENERGY).min(BOOST_MAX);
                    state.events.push(FxEvent::Collect);
                    true
                }
                // Handled above; never consumed by contact
                EntityKind::LandingTarget { .. } | EntityKind::Projectile { .. } => false,
            };
            if consumed {
                state.entities.remove(i);
            }
        }
    }

    for (pid, hid) in projectile_hits {
        // The hazard may already be gone if two rounds overlapped it
        let Some((pos, radius)) = state
            .entities
            .iter()
            .find(|e| e.id == hid)
            .map(|e| (e.pos, e.radius))
        else {
            continue;
        };
        state.entities.retain(|e| e.id != hid && e.id != pid);
        let strength = if radius > 35.0 { 20.0 } else { 5.0 };
        explosions.push((pos, strength, (radius * 0.8) as usize));
    }

    for pos in mineral_bursts {
        spawn::spawn_minerals(state, pos);
    }
    for (pos, strength, debris) in explosions {
        state.screen_shake = state.screen_shake.max(strength);
        state.events.push(FxEvent::Explosion { pos, strength });
        spawn::spawn_explosion(state, pos, debris);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RunConfig;

    fn rig_state() -> RunState {
        RunState::new(RunConfig {
            seed: 42,
            ..Default::default()
        })
    }

    fn cannon_state() -> RunState {
        RunState::new(RunConfig {
            seed: 42,
            loadout: Loadout::Cannon,
            ..Default::default()
        })
    }

    fn push_hazard(state: &mut RunState, pos: Vec2, radius: f32) -> u32 {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind: EntityKind::Hazard {
                mining_progress: 0.0,
                dying: false,
                flash_ticks: 0,
            },
            pos,
            vel: Vec2::ZERO,
            radius,
            rotation: 0.0,
            rotation_speed: 0.0,
        });
        id
    }

    fn push_pickup(state: &mut RunState, pos: Vec2, kind: EntityKind) -> u32 {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: 15.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        });
        id
    }

    #[test]
    fn test_hazard_collision_damages_and_removes() {
        let mut state = rig_state();
        let craft_pos = state.craft.pos;
        push_hazard(&mut state, craft_pos, 30.0);

        resolve(&mut state, &TickInput::default());

        assert!(state.entities.is_empty());
        assert_eq!(state.craft.hull, crate::consts::HULL_MAX - COLLISION_DAMAGE);
        assert_eq!(state.craft.fuel, crate::consts::FUEL_MAX - COLLISION_FUEL_LEAK);
        assert_eq!(state.screen_shake, 15.0);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, FxEvent::Explosion { .. }))
        );
    }

    #[test]
    fn test_pickup_values_clamp_to_max() {
        let mut state = rig_state();
        let craft_pos = state.craft.pos;
        state.craft.fuel = 95.0;
        push_pickup(&mut state, craft_pos, EntityKind::FuelCell { value: 20.0 });

        resolve(&mut state, &TickInput::default());

        assert_eq!(state.craft.fuel, crate::consts::FUEL_MAX);
        assert!(state.entities.is_empty());
        assert!(state.events.contains(&FxEvent::Collect));
    }

    #[test]
    fn test_mineral_adds_cargo_and_energy() {
        let mut state = rig_state();
        let craft_pos = state.craft.pos;
        state.craft.boost_charge = 50.0;
        push_pickup(&mut state, craft_pos, EntityKind::Mineral);

        let cargo_before = state.craft.cargo;
        resolve(&mut state, &TickInput::default());

        assert_eq!(state.craft.cargo, cargo_before + 1.0);
        assert_eq!(state.craft.boost_charge, 50.0 + MINERAL_ENERGY);
    }

    #[test]
    fn test_bypassed_landing_target_bumps_multiplier() {
        let mut state = rig_state();
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind: EntityKind::LandingTarget {
                name: "LV-426".into(),
            },
            pos: Vec2::new(400.0, state.config.height + DESPAWN_MARGIN + 1.0),
            vel: Vec2::ZERO,
            radius: 150.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        });

        resolve(&mut state, &TickInput::default());

        assert!(state.entities.is_empty());
        assert_eq!(state.craft.multiplier, 1.5);
    }

    #[test]
    fn test_landing_target_proximity_sets_prompt_without_consuming() {
        let mut state = rig_state();
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind: EntityKind::LandingTarget {
                name: "Titan Prime".into(),
            },
            pos: state.craft.pos + Vec2::new(100.0, 0.0),
            vel: Vec2::ZERO,
            radius: 150.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        });

        resolve(&mut state, &TickInput::default());

        assert_eq!(state.target_near.as_deref(), Some("Titan Prime"));
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_mining_beam_accumulates_and_spends_charge() {
        let mut state = rig_state();
        let pos = Vec2::new(200.0, 100.0);
        push_hazard(&mut state, pos, 30.0);

        let input = TickInput {
            primary: true,
            pointer: pos,
            ..Default::default()
        };
        resolve(&mut state, &input);

        assert!(state.mining_active);
        assert!(state.craft.boost_charge < crate::consts::BOOST_MAX);
        match &state.entities[0].kind {
            EntityKind::Hazard {
                mining_progress,
                dying,
                ..
            } => {
                assert_eq!(*mining_progress, state.tuning.mining.speed);
                assert!(!dying);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_mining_beam_targets_one_hazard_per_tick() {
        let mut state = rig_state();
        let pos = Vec2::new(200.0, 100.0);
        push_hazard(&mut state, pos, 30.0);
        push_hazard(&mut state, pos + Vec2::new(5.0, 0.0), 30.0);

        let input = TickInput {
            primary: true,
            pointer: pos,
            ..Default::default()
        };
        resolve(&mut state, &input);

        let touched = state
            .entities
            .iter()
            .filter(|e| {
                matches!(&e.kind, EntityKind::Hazard { mining_progress, .. } if *mining_progress > 0.0)
            })
            .count();
        assert_eq!(touched, 1);
    }

    #[test]
    fn test_mined_out_hazard_flashes_then_bursts_into_minerals() {
        let mut state = rig_state();
        let pos = Vec2::new(200.0, 100.0);
        let id = push_hazard(&mut state, pos, 30.0);
        if let EntityKind::Hazard {
            mining_progress, ..
        } = &mut state.entities[0].kind
        {
            *mining_progress = 0.999;
        }

        let beam = TickInput {
            primary: true,
            pointer: pos,
            ..Default::default()
        };
        resolve(&mut state, &beam);

        // Crossed 1.0 this tick: dying, beam tone stopped on the kill frame
        assert!(!state.mining_active);
        assert!(matches!(
            state.entities[0].kind,
            EntityKind::Hazard { dying: true, .. }
        ));

        // Flash window runs out over the fixed tick count, then minerals
        for _ in 0..DYING_FLASH_TICKS {
            resolve(&mut state, &TickInput::default());
        }
        assert!(state.entities.iter().all(|e| e.id != id));
        let minerals = state
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Mineral)
            .count() as u32;
        let (min, max) = state.tuning.mining.mineral_count;
        assert!(minerals >= min && minerals <= max);
        assert!(state.screen_shake > 0.0);
    }

    #[test]
    fn test_collector_pulls_pickups_toward_craft() {
        let mut state = rig_state();
        state.collector.active = true;
        let pos = state.craft.pos + Vec2::new(100.0, 0.0);
        push_pickup(&mut state, pos, EntityKind::Mineral);

        // Bypass the physics gate and run the pass directly
        entity_pass(&mut state);

        let e = &state.entities[0];
        assert!(e.vel.x < 0.0, "pickup should accelerate toward the craft");
    }

    #[test]
    fn test_cannon_fires_on_cooldown() {
        let mut state = cannon_state();
        let input = TickInput {
            fire: true,
            pointer: state.craft.pos + Vec2::new(0.0, -100.0),
            ..Default::default()
        };

        resolve(&mut state, &input);
        let first = state
            .entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Projectile { .. }))
            .count();
        assert_eq!(first, 1);

        // Held fire during cooldown adds nothing
        resolve(&mut state, &input);
        let second = state
            .entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Projectile { .. }))
            .count();
        assert_eq!(second, 1);
    }

    #[test]
    fn test_projectile_destroys_hazard_immediately() {
        let mut state = cannon_state();
        let hpos = Vec2::new(300.0, 100.0);
        let hid = push_hazard(&mut state, hpos, 30.0);

        let pid = state.next_entity_id();
        state.entities.push(Entity {
            id: pid,
            kind: EntityKind::Projectile { ttl: 100 },
            pos: hpos + Vec2::new(10.0, 0.0),
            vel: Vec2::ZERO,
            radius: PROJECTILE_RADIUS,
            rotation: 0.0,
            rotation_speed: 0.0,
        });

        resolve(&mut state, &TickInput::default());

        // Both gone, no dying window in the cannon loadout
        assert!(state.entities.iter().all(|e| e.id != hid && e.id != pid));
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, FxEvent::Explosion { .. }))
        );
    }
}
