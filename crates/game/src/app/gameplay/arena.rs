use std::collections::{BTreeMap, HashSet};

use engine::{
    CollisionLayer, EntityId, LayerMask, OrthographicViewport, Scene, SceneCommand, SceneWorld,
    SpawnDesc, Transform, Vec2,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::actor::{Actor, ActorEvent};
use super::camera_bounds::{CameraBoundsController, CameraEvent};
use super::damage::{DamageOutcome, Damageable, Health, HitFlash};
use super::destructible::Destructible;
use super::feel::FeelServices;
use super::loot::{LootFragment, LootStep};
use super::melee::{AttackInput, Facing, MeleeWeapon, SwingPhase, SwingRequest};
use super::projectile::{Projectile, ProjectileStep};
use super::spawner::Spawner;
use super::species::{self, SpeciesKind};
use super::stun::Stunnable;
use super::turret::{ring_layout, Turret};
use crate::app::config::{ConfigError, PlayerTuning, SpawnableSpecies, Tuning};

const HITTABLE: LayerMask = LayerMask::of(CollisionLayer::Enemy).with(CollisionLayer::Prop);

/// Where things start when the arena loads.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaLayout {
    pub player_spawn: Vec2,
    pub camera_start: Vec2,
    pub chargers: Vec<Vec2>,
    pub shooters: Vec<Vec2>,
    pub turrets: Vec<Vec2>,
    pub spawners: Vec<Vec2>,
    pub destructibles: Vec<Vec2>,
}

impl ArenaLayout {
    pub fn empty(player_spawn: Vec2) -> Self {
        Self {
            player_spawn,
            camera_start: Vec2::ZERO,
            chargers: Vec::new(),
            shooters: Vec::new(),
            turrets: Vec::new(),
            spawners: Vec::new(),
            destructibles: Vec::new(),
        }
    }

    /// A corridor running right: one encounter per room.
    pub fn demo() -> Self {
        Self {
            player_spawn: Vec2::ZERO,
            camera_start: Vec2::ZERO,
            chargers: vec![Vec2::new(6.0, 0.0), Vec2::new(22.0, 0.0)],
            shooters: vec![Vec2::new(14.0, 4.0)],
            turrets: vec![Vec2::new(36.0, 3.0)],
            spawners: vec![Vec2::new(52.0, 0.0)],
            destructibles: vec![Vec2::new(2.5, 0.0), Vec2::new(30.0, 0.0)],
        }
    }
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self::demo()
    }
}

/// The tracked target's health. Dying sends it back to its checkpoint.
#[derive(Debug)]
pub struct PlayerVitals {
    id: EntityId,
    health: Health,
    flash: HitFlash,
    hit_radius: f32,
    checkpoint: Vec2,
    velocity: Vec2,
}

impl PlayerVitals {
    fn new(id: EntityId, tuning: &PlayerTuning, hit_flash_seconds: f32, checkpoint: Vec2) -> Self {
        Self {
            id,
            health: Health::new(tuning.max_health),
            flash: HitFlash::new(hit_flash_seconds),
            hit_radius: tuning.hit_radius,
            checkpoint,
            velocity: Vec2::ZERO,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn health(&self) -> &Health {
        &self.health
    }
}

impl Damageable for PlayerVitals {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let outcome = self.health.apply(amount);
        if outcome != DamageOutcome::Ignored {
            self.flash.trigger();
        }
        outcome
    }

    fn is_dead(&self) -> bool {
        self.health.is_dead()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    pub kills: u32,
    pub remains_spawned: u32,
    pub enemies_spawned: u32,
    pub projectiles_fired: u32,
    pub player_hits: u32,
    pub player_respawns: u32,
    pub camera_transitions: u32,
    pub props_broken: u32,
    pub loot_spawned: u32,
    pub loot_collected: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrikeReport {
    pub hits: u32,
    pub kills: u32,
    pub stunned: u32,
}

/// The playable scene. Owns every enemy plus the target's vitals and
/// steps them in a fixed order each tick.
pub struct Arena {
    tuning: Tuning,
    layout: ArenaLayout,
    rng: StdRng,
    viewport: OrthographicViewport,
    camera: CameraBoundsController,
    feel: FeelServices,
    player: Option<PlayerVitals>,
    actors: BTreeMap<EntityId, Actor>,
    projectiles: Vec<Projectile>,
    spawners: Vec<Spawner>,
    turrets: Vec<Turret>,
    destructibles: Vec<Destructible>,
    loot: Vec<LootFragment>,
    melee: MeleeWeapon,
    contacts: HashSet<EntityId>,
    events: Vec<ActorEvent>,
    stats: ArenaStats,
}

impl Arena {
    pub fn new(tuning: Tuning, layout: ArenaLayout) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let camera = CameraBoundsController::new(&tuning.camera, layout.camera_start)?;
        Ok(Self {
            rng: StdRng::seed_from_u64(tuning.rng_seed),
            viewport: tuning.camera.viewport,
            camera,
            feel: FeelServices::new(&tuning.feel),
            player: None,
            actors: BTreeMap::new(),
            projectiles: Vec::new(),
            spawners: Vec::new(),
            turrets: Vec::new(),
            destructibles: Vec::new(),
            loot: Vec::new(),
            melee: MeleeWeapon::new(&tuning.melee),
            contacts: HashSet::new(),
            events: Vec::new(),
            stats: ArenaStats::default(),
            tuning,
            layout,
        })
    }

    pub fn player(&self) -> Option<&PlayerVitals> {
        self.player.as_ref()
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn spawners(&self) -> &[Spawner] {
        &self.spawners
    }

    pub fn turrets(&self) -> &[Turret] {
        &self.turrets
    }

    pub fn destructibles(&self) -> &[Destructible] {
        &self.destructibles
    }

    pub fn loot(&self) -> &[LootFragment] {
        &self.loot
    }

    pub fn melee(&self) -> &MeleeWeapon {
        &self.melee
    }

    pub fn camera(&self) -> &CameraBoundsController {
        &self.camera
    }

    pub fn feel(&self) -> &FeelServices {
        &self.feel
    }

    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    /// Host-driven target motion, applied every unfrozen tick.
    pub fn set_target_velocity(&mut self, velocity: Vec2) {
        if let Some(player) = self.player.as_mut() {
            player.velocity = if velocity.is_finite() {
                velocity
            } else {
                Vec2::ZERO
            };
        }
    }

    pub fn spawn_enemy(
        &mut self,
        world: &mut SceneWorld,
        species: SpawnableSpecies,
        position: Vec2,
    ) -> EntityId {
        let kind = SpeciesKind::from(species);
        let collision_radius = match species {
            SpawnableSpecies::Charger => self.tuning.charger.contact_radius,
            SpawnableSpecies::Shooter => self.tuning.shooter.body_radius,
        };
        let id = world.spawn(
            at(position),
            SpawnDesc {
                debug_name: kind.as_str(),
                layer: CollisionLayer::Enemy,
                collision_radius,
            },
        );
        self.actors
            .insert(id, species::spawnable(species, id, position, &self.tuning));
        id
    }

    pub fn spawn_turret(&mut self, world: &mut SceneWorld, position: Vec2) -> EntityId {
        let core_id = world.spawn(
            at(position),
            SpawnDesc {
                debug_name: "turret_core",
                layer: CollisionLayer::Enemy,
                collision_radius: self.tuning.turret.core_radius,
            },
        );
        let mut turret = Turret::new(
            core_id,
            position,
            self.tuning.turret.core_health,
            self.tuning.feel.hit_flash_seconds,
        );
        for orbit in ring_layout(position, &self.tuning.turret.rings) {
            let ball_id = world.spawn(
                at(orbit.position()),
                SpawnDesc {
                    debug_name: SpeciesKind::Orbiter.as_str(),
                    layer: CollisionLayer::Enemy,
                    collision_radius: self.tuning.orbiter.contact_radius,
                },
            );
            self.actors
                .insert(ball_id, species::orbiter(ball_id, orbit, &self.tuning));
            turret.attach_ball(ball_id);
        }
        self.turrets.push(turret);
        core_id
    }

    pub fn spawn_spawner(&mut self, world: &mut SceneWorld, position: Vec2) -> EntityId {
        let id = world.spawn(
            at(position),
            SpawnDesc {
                debug_name: "spawner",
                layer: CollisionLayer::Enemy,
                collision_radius: self.tuning.spawner.body_radius,
            },
        );
        self.spawners.push(Spawner::new(
            id,
            position,
            &self.tuning.spawner,
            self.tuning.feel.hit_flash_seconds,
        ));
        id
    }

    pub fn spawn_destructible(&mut self, world: &mut SceneWorld, position: Vec2) -> EntityId {
        let id = world.spawn(
            at(position),
            SpawnDesc {
                debug_name: "destructible",
                layer: CollisionLayer::Prop,
                collision_radius: self.tuning.destructible.body_radius,
            },
        );
        self.destructibles.push(Destructible::new(
            id,
            position,
            &self.tuning.destructible,
            self.tuning.feel.hit_flash_seconds,
        ));
        id
    }

    /// Routes damage to whichever enemy owns `id`. A killing blow despawns
    /// the enemy and leaves its remains behind.
    pub fn damage_entity(
        &mut self,
        world: &mut SceneWorld,
        id: EntityId,
        amount: f32,
    ) -> DamageOutcome {
        let outcome = match self.damageable_mut(id) {
            Some(target) => target.take_damage(amount),
            None => {
                debug!(entity_id = id.0, amount, "damage_ignored_unknown_entity");
                return DamageOutcome::Ignored;
            }
        };
        if outcome == DamageOutcome::Killed {
            self.resolve_death(world, id);
        }
        outcome
    }

    /// Presses attack. The swing plays out over the following ticks; a press
    /// during a swing queues one follow-up and anything past that is dropped.
    pub fn melee_attack(&mut self, facing: Facing, stuns: bool) -> AttackInput {
        self.melee.attack(SwingRequest { facing, stuns })
    }

    /// Instant circular hit against enemies and props, outside any swing.
    /// Each target is damaged once; `stuns` also interrupts whatever can be
    /// stunned.
    pub fn melee_strike(
        &mut self,
        world: &mut SceneWorld,
        center: Vec2,
        radius: f32,
        damage: f32,
        stuns: bool,
    ) -> StrikeReport {
        let hits = world.overlap_circle(center, radius, HITTABLE);
        let report = self.strike_targets(world, &hits, damage, stuns);
        debug!(
            center_x = center.x,
            center_y = center.y,
            hits = report.hits,
            kills = report.kills,
            stunned = report.stunned,
            "melee_strike_resolved"
        );
        report
    }

    fn strike_targets(
        &mut self,
        world: &mut SceneWorld,
        targets: &[EntityId],
        damage: f32,
        stuns: bool,
    ) -> StrikeReport {
        let mut report = StrikeReport::default();
        for &id in targets {
            match self.damage_entity(world, id, damage) {
                DamageOutcome::Ignored => {}
                DamageOutcome::Damaged => report.hits += 1,
                DamageOutcome::Killed => {
                    report.hits += 1;
                    report.kills += 1;
                }
            }
            if stuns {
                if let Some(target) = self.stunnable_mut(id) {
                    if target.apply_stun() {
                        report.stunned += 1;
                    }
                }
            }
        }
        if report.kills > 0 {
            self.feel.impact();
        }
        report
    }

    fn damageable_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
        if let Some(actor) = self.actors.get_mut(&id) {
            return Some(actor as &mut dyn Damageable);
        }
        if let Some(spawner) = self.spawners.iter_mut().find(|spawner| spawner.id() == id) {
            return Some(spawner as &mut dyn Damageable);
        }
        if let Some(turret) = self.turrets.iter_mut().find(|turret| turret.id() == id) {
            return Some(turret as &mut dyn Damageable);
        }
        self.destructibles
            .iter_mut()
            .find(|prop| prop.id() == id)
            .map(|prop| prop as &mut dyn Damageable)
    }

    fn stunnable_mut(&mut self, id: EntityId) -> Option<&mut dyn Stunnable> {
        self.actors
            .get_mut(&id)
            .map(|actor| actor as &mut dyn Stunnable)
    }

    fn resolve_death(&mut self, world: &mut SceneWorld, id: EntityId) {
        if let Some(actor) = self.actors.remove(&id) {
            if let Some(remains) = actor.policy().remains {
                world.spawn(
                    at(actor.position()),
                    SpawnDesc {
                        debug_name: remains.debug_name(),
                        layer: CollisionLayer::Remains,
                        collision_radius: 0.0,
                    },
                );
                self.stats.remains_spawned += 1;
            }
            world.despawn(id);
            self.contacts.remove(&id);
            for turret in &mut self.turrets {
                turret.detach_ball(id);
            }
            self.stats.kills += 1;
            info!(
                entity_id = id.0,
                species = actor.species().as_str(),
                "enemy_destroyed"
            );
            return;
        }

        if let Some(index) = self.spawners.iter().position(|spawner| spawner.id() == id) {
            let spawner = self.spawners.remove(index);
            world.despawn(id);
            self.stats.kills += 1;
            info!(
                entity_id = id.0,
                x = spawner.position().x,
                y = spawner.position().y,
                "spawner_destroyed"
            );
            return;
        }

        if let Some(index) = self.destructibles.iter().position(|prop| prop.id() == id) {
            let prop = self.destructibles.remove(index);
            world.despawn(id);
            self.feel.shake.shake();
            let fragments = prop.fragment_positions(&mut self.rng);
            for position in &fragments {
                let loot_id = world.spawn(
                    at(*position),
                    SpawnDesc {
                        debug_name: "loot_fragment",
                        layer: CollisionLayer::Remains,
                        collision_radius: 0.0,
                    },
                );
                self.loot.push(LootFragment::new(loot_id, *position));
            }
            self.stats.props_broken += 1;
            self.stats.loot_spawned += fragments.len() as u32;
            info!(
                entity_id = id.0,
                x = prop.position().x,
                y = prop.position().y,
                fragments = fragments.len(),
                "destructible_broken"
            );
            return;
        }

        if let Some(index) = self.turrets.iter().position(|turret| turret.id() == id) {
            let turret = self.turrets.remove(index);
            world.despawn(id);
            for ball in turret.balls() {
                self.actors.remove(ball);
                self.contacts.remove(ball);
                world.despawn(*ball);
            }
            self.stats.kills += 1;
            info!(
                entity_id = id.0,
                x = turret.position().x,
                y = turret.position().y,
                orphaned_balls = turret.balls().len(),
                "turret_destroyed"
            );
        }
    }

    fn damage_player(&mut self, world: &mut SceneWorld, amount: f32, source: EntityId) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let outcome = player.take_damage(amount);
        if outcome == DamageOutcome::Ignored {
            return;
        }
        self.stats.player_hits += 1;
        debug!(
            source = source.0,
            amount,
            remaining = player.health.current(),
            "player_damaged"
        );

        if outcome == DamageOutcome::Killed {
            player.health.restore_full();
            world.set_position(player.id, player.checkpoint);
            self.contacts.clear();
            self.stats.player_respawns += 1;
            info!(
                checkpoint_x = player.checkpoint.x,
                checkpoint_y = player.checkpoint.y,
                "player_respawned"
            );
        }
    }

    fn player_body(&self, world: &SceneWorld) -> Option<(Vec2, f32)> {
        let player = self.player.as_ref()?;
        world
            .position_of(player.id)
            .map(|position| (position, player.hit_radius))
    }

    fn advance_player(&mut self, dt_seconds: f32, world: &mut SceneWorld) -> Option<Vec2> {
        let player = self.player.as_mut()?;
        player.flash.tick(dt_seconds);
        let position = world.position_of(player.id)? + player.velocity * dt_seconds;
        world.set_position(player.id, position);
        Some(position)
    }

    fn tick_actors(&mut self, dt_seconds: f32, target: Option<Vec2>, world: &mut SceneWorld) {
        for (id, actor) in self.actors.iter_mut() {
            actor.tick(dt_seconds, target, &mut self.rng, &mut self.events);
            world.set_position(*id, actor.position());
        }
    }

    fn handle_actor_events(&mut self, world: &mut SceneWorld) {
        for event in std::mem::take(&mut self.events) {
            if let ActorEvent::Fire {
                id,
                origin,
                direction,
            } = event
            {
                let projectile_id = world.spawn(
                    at(origin),
                    SpawnDesc {
                        debug_name: "projectile",
                        layer: CollisionLayer::Projectile,
                        collision_radius: self.tuning.projectile.radius,
                    },
                );
                self.projectiles.push(Projectile::new(
                    projectile_id,
                    origin,
                    direction,
                    &self.tuning.projectile,
                ));
                self.stats.projectiles_fired += 1;
                debug!(shooter = id.0, projectile = projectile_id.0, "projectile_fired");
            }
        }
    }

    fn tick_melee(&mut self, dt_seconds: f32, world: &mut SceneWorld) {
        let Some(window) = self.melee.tick(dt_seconds) else {
            return;
        };
        let Some(origin) = self
            .player
            .as_ref()
            .and_then(|player| world.position_of(player.id))
        else {
            return;
        };

        let center = origin + window.offset;
        let fresh = world
            .overlap_circle(center, window.radius, HITTABLE)
            .into_iter()
            .filter(|id| self.melee.register_hit(*id))
            .collect::<Vec<_>>();
        if fresh.is_empty() {
            return;
        }
        let report = self.strike_targets(world, &fresh, window.damage, window.stuns);
        debug!(
            hits = report.hits,
            kills = report.kills,
            stunned = report.stunned,
            "melee_swing_connected"
        );
    }

    fn tick_loot(&mut self, dt_seconds: f32, world: &mut SceneWorld) {
        let collector = self.player_body(world);
        let tuning = &self.tuning.loot;
        let mut collected = 0u32;
        self.loot.retain_mut(|fragment| {
            match fragment.tick(dt_seconds, collector, tuning) {
                LootStep::Collected => {
                    world.despawn(fragment.id());
                    collected += 1;
                    false
                }
                LootStep::Drifting => {
                    world.set_position(fragment.id(), fragment.position());
                    true
                }
                LootStep::Resting => true,
            }
        });
        if collected > 0 {
            self.stats.loot_collected += collected;
            debug!(collected, "loot_collected");
        }
    }

    fn tick_projectiles(&mut self, dt_seconds: f32, world: &mut SceneWorld) {
        let player_body = self.player_body(world);
        let mut flying = Vec::with_capacity(self.projectiles.len());
        let mut impacts = Vec::new();

        for mut projectile in std::mem::take(&mut self.projectiles) {
            let step = projectile.advance(dt_seconds);
            let hit = player_body
                .map(|(position, radius)| projectile.touches(position, radius))
                .unwrap_or(false);
            if hit {
                impacts.push((projectile.id, projectile.damage));
                world.despawn(projectile.id);
                continue;
            }
            if step == ProjectileStep::Expired {
                world.despawn(projectile.id);
                debug!(projectile = projectile.id.0, "projectile_expired");
                continue;
            }
            world.set_position(projectile.id, projectile.position);
            flying.push(projectile);
        }

        self.projectiles = flying;
        for (source, damage) in impacts {
            self.damage_player(world, damage, source);
        }
    }

    fn resolve_contacts(&mut self, world: &mut SceneWorld) {
        let Some((player_position, player_radius)) = self.player_body(world) else {
            return;
        };

        let mut entered = Vec::new();
        for (id, actor) in &self.actors {
            let Some(contact) = actor.policy().contact else {
                continue;
            };
            let reach = contact.radius + player_radius;
            let touching = (actor.position() - player_position).length_squared() <= reach * reach;
            if !touching {
                self.contacts.remove(id);
            } else if self.contacts.insert(*id) {
                entered.push((*id, contact.damage));
            }
        }

        for (source, damage) in entered {
            self.damage_player(world, damage, source);
        }
    }

    fn tick_spawners(&mut self, dt_seconds: f32, target: Option<Vec2>, world: &mut SceneWorld) {
        let mut requests = Vec::new();
        let actors = &self.actors;
        for (index, spawner) in self.spawners.iter_mut().enumerate() {
            if let Some(request) =
                spawner.tick(dt_seconds, target, |id| actors.contains_key(&id), &mut self.rng)
            {
                requests.push((index, request));
            }
        }

        for (index, request) in requests {
            let id = self.spawn_enemy(world, request.species, request.position);
            if let Some(spawner) = self.spawners.get_mut(index) {
                spawner.record_spawn(id);
                self.stats.enemies_spawned += 1;
                info!(
                    spawner = spawner.id().0,
                    entity_id = id.0,
                    x = request.position.x,
                    y = request.position.y,
                    "enemy_spawned"
                );
            }
        }
    }

    fn tick_camera(
        &mut self,
        dt_seconds: f32,
        real_dt_seconds: f32,
        target: Option<Vec2>,
        world: &mut SceneWorld,
    ) {
        if let Some(CameraEvent::TransitionStarted {
            to,
            duration_seconds,
            ..
        }) = self.camera.tick(dt_seconds, target, &self.viewport)
        {
            self.feel.shake.stop();
            self.stats.camera_transitions += 1;
            info!(
                to_x = to.x,
                to_y = to.y,
                duration_seconds,
                "camera_room_transition"
            );
        }
        self.feel.shake.tick(real_dt_seconds, &mut self.rng);
        world.camera_mut().position = self.camera.position() + self.feel.shake.offset();
    }

    fn clear_runtime(&mut self) {
        self.rng = StdRng::seed_from_u64(self.tuning.rng_seed);
        self.camera.reset(self.layout.camera_start);
        self.feel = FeelServices::new(&self.tuning.feel);
        self.player = None;
        self.actors.clear();
        self.projectiles.clear();
        self.spawners.clear();
        self.turrets.clear();
        self.destructibles.clear();
        self.loot.clear();
        self.melee = MeleeWeapon::new(&self.tuning.melee);
        self.contacts.clear();
        self.events.clear();
        self.stats = ArenaStats::default();
    }
}

impl Scene for Arena {
    fn load(&mut self, world: &mut SceneWorld) {
        self.clear_runtime();
        world.camera_mut().position = self.layout.camera_start;

        let player_spawn = self.layout.player_spawn;
        let player_id = world.spawn(
            at(player_spawn),
            SpawnDesc {
                debug_name: "player",
                layer: CollisionLayer::Player,
                collision_radius: self.tuning.player.hit_radius,
            },
        );
        self.player = Some(PlayerVitals::new(
            player_id,
            &self.tuning.player,
            self.tuning.feel.hit_flash_seconds,
            player_spawn,
        ));

        let layout = self.layout.clone();
        for position in layout.chargers {
            self.spawn_enemy(world, SpawnableSpecies::Charger, position);
        }
        for position in layout.shooters {
            self.spawn_enemy(world, SpawnableSpecies::Shooter, position);
        }
        for position in layout.turrets {
            self.spawn_turret(world, position);
        }
        for position in layout.spawners {
            self.spawn_spawner(world, position);
        }
        for position in layout.destructibles {
            self.spawn_destructible(world, position);
        }

        info!(
            scene = "arena",
            player_id = player_id.0,
            actors = self.actors.len(),
            turrets = self.turrets.len(),
            spawners = self.spawners.len(),
            destructibles = self.destructibles.len(),
            "scene_loaded"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, world: &mut SceneWorld) -> SceneCommand {
        let dt_seconds = self.feel.hit_stop.scaled_dt(fixed_dt_seconds);
        let target = self.advance_player(dt_seconds, world);

        if dt_seconds > 0.0 {
            self.tick_actors(dt_seconds, target, world);
            self.handle_actor_events(world);
            self.tick_melee(dt_seconds, world);
            self.tick_projectiles(dt_seconds, world);
            self.resolve_contacts(world);
            for turret in &mut self.turrets {
                turret.tick(dt_seconds);
            }
            for prop in &mut self.destructibles {
                prop.tick(dt_seconds);
            }
            self.tick_loot(dt_seconds, world);
            self.tick_spawners(dt_seconds, target, world);
        }

        self.tick_camera(dt_seconds, fixed_dt_seconds, target, world);
        SceneCommand::None
    }

    fn unload(&mut self, world: &mut SceneWorld) {
        info!(
            scene = "arena",
            entity_count = world.entity_count(),
            kills = self.stats.kills,
            player_respawns = self.stats.player_respawns,
            "scene_unload"
        );
        self.clear_runtime();
        world.clear();
    }

    fn debug_title(&self, _world: &SceneWorld) -> Option<String> {
        let health = self
            .player
            .as_ref()
            .map(|player| player.health.current())
            .unwrap_or(0.0);
        let swing = self.melee.phase().map_or("ready", SwingPhase::as_str);
        Some(format!(
            "arena | enemies {} | hp {:.0} | kills {} | swing {}",
            self.actors.len(),
            health,
            self.stats.kills,
            swing
        ))
    }
}

fn at(position: Vec2) -> Transform {
    Transform {
        position,
        rotation_radians: None,
    }
}
