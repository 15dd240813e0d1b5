//! Aquarium engine - owns the tank state and runs the per-frame loop

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::config::AquariumConfig;
use crate::economy::{Purchase, PurchaseError, Wallet};
use crate::input::{InputEvent, InputOutcome};
use crate::render::{Drawable, FishView, FoodView, SpriteSheet, Surface};
use crate::systems::*;

/// Values shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub fish_count: usize,
    pub money: u32,
}

/// Running totals for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AquariumStats {
    pub ticks: u64,
    pub fish_bought: u32,
    pub feedings_bought: u32,
    pub declined_purchases: u32,
    pub food_dropped: u32,
    pub food_eaten: u32,
    pub food_lost: u32,
}

/// Snapshot of one fish, in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishState {
    pub entity_id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub hunger: f32,
    pub facing: Facing,
    pub frame: u32,
}

/// Main aquarium engine
pub struct AquariumEngine {
    /// ECS world containing every fish and pellet
    pub world: World,
    config: AquariumConfig,
    wallet: Wallet,
    sprite_sheet: SpriteSheet,
    rng: StdRng,
    next_spawn: u64,
    /// Host timestamp of the previous frame, in milliseconds
    last_timestamp: Option<f64>,
    time_scale: f32,
    /// Fractional ticks carried over between frames
    tick_budget: f32,
    hud_dirty: bool,
    stats: AquariumStats,
}

impl AquariumEngine {
    /// Create an empty tank holding the starting money
    pub fn new(config: AquariumConfig) -> Self {
        let sprite_sheet = SpriteSheet {
            columns: config.assets.sprite_columns.max(1),
            cell_width: config.fish.width,
            cell_height: config.fish.height,
        };

        Self {
            world: World::new(),
            wallet: Wallet::new(config.economy.starting_money),
            sprite_sheet,
            rng: StdRng::from_entropy(),
            next_spawn: 0,
            last_timestamp: None,
            time_scale: 1.0,
            tick_budget: 0.0,
            hud_dirty: true,
            stats: AquariumStats::default(),
            config,
        }
    }

    /// Use a fixed seed so spawns are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Use the real sprite sheet dimensions once the image is known
    pub fn with_sprite_sheet(mut self, sheet: SpriteSheet) -> Self {
        self.sprite_sheet = sheet;
        self
    }

    /// Add the free starter fish
    pub fn populate(&mut self) {
        for _ in 0..self.config.economy.initial_fish {
            self.add_fish();
        }
        log::info!(
            "Tank opened with {} fish and {} money",
            self.fish_count(),
            self.money()
        );
    }

    pub fn tank(&self) -> Rect {
        Rect::from_size(self.config.canvas.width, self.config.canvas.height)
    }

    fn next_order(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next_spawn);
        self.next_spawn += 1;
        order
    }

    /// Spawn a fish at a random spot, free of charge
    pub fn add_fish(&mut self) -> Entity {
        let margin = self.config.fish.spawn_margin;
        let x = self.rng.gen::<f32>() * (self.config.canvas.width - margin);
        let y = self.rng.gen::<f32>() * (self.config.canvas.height - margin);
        self.spawn_fish_at(Vec2::new(x, y))
    }

    /// Spawn a fish at an exact position with a random drift
    pub fn spawn_fish_at(&mut self, position: Vec2) -> Entity {
        let order = self.next_order();
        let drift = random_drift(&mut self.rng);
        let fish = &self.config.fish;
        let entity = self.world.spawn((
            Fish::new(fish.width, fish.height),
            Position(position),
            Velocity(drift),
            Facing::Right,
            Hunger::new(fish.max_hunger),
            Growth::new(fish.max_size),
            SpriteAnimation::new(fish.frame_count, fish.frame_interval),
            order,
        ));

        self.hud_dirty = true;
        entity
    }

    /// Buy one fish. Declines without changing anything when money is short.
    pub fn buy_fish(&mut self) -> Result<Entity, PurchaseError> {
        let price = self.config.economy.fish_price;
        if let Err(e) = self.wallet.try_spend(Purchase::Fish, price) {
            self.decline(&e);
            return Err(e);
        }

        let entity = self.add_fish();
        self.stats.fish_bought += 1;
        log::info!("Bought a fish for {}, {} left", price, self.money());
        Ok(entity)
    }

    /// Buy a batch of pellets dropped at random spots along the surface.
    /// Returns how many were dropped.
    pub fn feed_fish(&mut self) -> Result<u32, PurchaseError> {
        let price = self.config.economy.feed_price;
        if let Err(e) = self.wallet.try_spend(Purchase::FoodBatch, price) {
            self.decline(&e);
            return Err(e);
        }

        let batch = self.config.economy.feed_batch;
        for _ in 0..batch {
            let x = self.rng.gen::<f32>() * self.config.canvas.width;
            self.spawn_food(x, 0.0);
        }
        self.stats.feedings_bought += 1;
        self.hud_dirty = true;
        log::info!("Dropped {} pellets for {}, {} left", batch, price, self.money());
        Ok(batch)
    }

    /// Drop a single pellet at a canvas position, free of charge
    pub fn spawn_food(&mut self, x: f32, y: f32) -> Entity {
        let food = Food::new(self.config.food.radius, self.config.food.fall_speed);
        let order = self.next_order();
        let entity = self.world.spawn((food, Position(Vec2::new(x, y)), order));
        self.stats.food_dropped += 1;
        self.hud_dirty = true;
        entity
    }

    fn decline(&mut self, error: &PurchaseError) {
        self.stats.declined_purchases += 1;
        self.hud_dirty = true;
        log::warn!("{}", error);
    }

    /// Apply one player action
    pub fn handle_input(&mut self, event: InputEvent) -> Result<InputOutcome, PurchaseError> {
        match event {
            InputEvent::CanvasClick { x, y } => {
                self.spawn_food(x, y);
                Ok(InputOutcome::FoodDropped { count: 1 })
            }
            InputEvent::Feed => {
                let count = self.feed_fish()?;
                Ok(InputOutcome::FoodDropped { count })
            }
            InputEvent::BuyFish => {
                self.buy_fish()?;
                Ok(InputOutcome::FishAdded)
            }
        }
    }

    /// Run one frame for the host timestamp (milliseconds): work out the
    /// elapsed time, then paint background, pellets and fish in that order,
    /// updating each group right before it is drawn.
    ///
    /// The time scale decides how many whole ticks the frame runs, so
    /// movement, falling, hunger and animation all speed up together.
    pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) {
        let delta_ms = match self.last_timestamp {
            Some(previous) => (timestamp_ms - previous).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        let ticks = self.take_ticks();
        let tank = self.tank();

        surface.clear(tank.width, tank.height);
        surface.draw_background(tank);

        if ticks == 0 {
            self.draw_food(surface);
            self.draw_fish(surface);
            return;
        }

        for _ in 1..ticks {
            self.tick(delta_ms);
        }
        self.update_food();
        self.draw_food(surface);
        self.update_fish(delta_ms);
        self.draw_fish(surface);
        self.stats.ticks += 1;
    }

    /// Advance the simulation by `delta_ms` without drawing
    pub fn update(&mut self, delta_ms: f32) {
        let delta_ms = delta_ms.max(0.0);
        for _ in 0..self.take_ticks() {
            self.tick(delta_ms);
        }
    }

    fn tick(&mut self, delta_ms: f32) {
        self.update_food();
        self.update_fish(delta_ms);
        self.stats.ticks += 1;
    }

    /// Whole ticks owed at the current time scale; none while paused
    fn take_ticks(&mut self) -> u32 {
        if self.time_scale <= 0.0 {
            return 0;
        }
        self.tick_budget += self.time_scale;
        let ticks = self.tick_budget.floor();
        self.tick_budget -= ticks;
        ticks as u32
    }

    fn update_food(&mut self) {
        let lost = food_fall_system(&mut self.world, self.config.canvas.height);
        self.stats.food_lost += lost;
        if lost > 0 {
            self.hud_dirty = true;
        }
    }

    fn update_fish(&mut self, delta_ms: f32) {
        let tank = self.tank();
        fish_movement_system(&mut self.world, tank);
        hunger_system(&mut self.world, delta_ms, self.config.fish.hunger_rate);
        let eaten =
            food_seeking_system(&mut self.world, &self.config.fish, tank, &mut self.rng);
        animation_system(&mut self.world, delta_ms);

        self.stats.food_eaten += eaten;
        if eaten > 0 {
            self.hud_dirty = true;
        }
    }

    /// Paint the whole tank without advancing it
    pub fn draw(&self, surface: &mut dyn Surface) {
        let tank = self.tank();
        surface.clear(tank.width, tank.height);
        surface.draw_background(tank);
        self.draw_food(surface);
        self.draw_fish(surface);
    }

    fn draw_food(&self, surface: &mut dyn Surface) {
        let mut query = self.world.query::<(&Food, &Position, &SpawnOrder)>();
        let mut pellets: Vec<_> = query.iter().map(|(_, item)| item).collect();
        pellets.sort_by_key(|(_, _, order)| **order);

        for (food, pos, _) in pellets {
            FoodView {
                position: pos.0,
                food,
            }
            .draw(surface, &self.sprite_sheet);
        }
    }

    fn draw_fish(&self, surface: &mut dyn Surface) {
        let mut query = self.world.query::<(
            &Fish,
            &Position,
            &Growth,
            &Hunger,
            &Facing,
            &SpriteAnimation,
            &SpawnOrder,
        )>();
        let mut fishes: Vec<_> = query.iter().map(|(_, item)| item).collect();
        fishes.sort_by_key(|(.., order)| **order);

        for (fish, pos, growth, hunger, facing, animation, _) in fishes {
            FishView {
                position: pos.0,
                fish,
                growth,
                hunger,
                facing: *facing,
                animation,
                bar_offset: self.config.fish.hunger_bar_offset,
                bar_height: self.config.fish.hunger_bar_height,
            }
            .draw(surface, &self.sprite_sheet);
        }
    }

    /// Set time scale (1.0 = real-time, 0.0 = paused)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
        self.tick_budget = 0.0;
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn money(&self) -> u32 {
        self.wallet.balance()
    }

    pub fn fish_count(&self) -> usize {
        self.world.query::<&Fish>().iter().count()
    }

    pub fn food_count(&self) -> usize {
        self.world.query::<&Food>().iter().count()
    }

    /// Fish currently hungry enough to chase food
    pub fn hungry_count(&self) -> usize {
        hungry_fish_count(&self.world, self.config.fish.seek_threshold)
    }

    pub fn stats(&self) -> &AquariumStats {
        &self.stats
    }

    pub fn hud(&self) -> Hud {
        Hud {
            fish_count: self.fish_count(),
            money: self.money(),
        }
    }

    /// HUD values if anything changed since the last call
    pub fn take_hud_update(&mut self) -> Option<Hud> {
        if !self.hud_dirty {
            return None;
        }
        self.hud_dirty = false;
        Some(self.hud())
    }

    /// Every fish, in spawn order
    pub fn fish_states(&self) -> Vec<FishState> {
        let mut query = self.world.query::<(
            &Position,
            &Velocity,
            &Growth,
            &Hunger,
            &Facing,
            &SpriteAnimation,
            &SpawnOrder,
        )>();
        let mut states: Vec<(SpawnOrder, FishState)> = query
            .iter()
            .map(|(entity, (pos, vel, growth, hunger, facing, anim, order))| {
                (
                    *order,
                    FishState {
                        entity_id: entity.id(),
                        position: pos.0,
                        velocity: vel.0,
                        size: growth.size,
                        hunger: hunger.level,
                        facing: *facing,
                        frame: anim.frame,
                    },
                )
            })
            .collect();
        states.sort_by_key(|(order, _)| *order);
        states.into_iter().map(|(_, state)| state).collect()
    }

    /// Every pellet position, in spawn order
    pub fn food_positions(&self) -> Vec<Vec2> {
        let mut query = self.world.query::<(&Food, &Position, &SpawnOrder)>();
        let mut pellets: Vec<(SpawnOrder, Vec2)> = query
            .iter()
            .map(|(_, (_, pos, order))| (*order, pos.0))
            .collect();
        pellets.sort_by_key(|(order, _)| *order);
        pellets.into_iter().map(|(_, pos)| pos).collect()
    }
}

impl Default for AquariumEngine {
    fn default() -> Self {
        Self::new(AquariumConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawList};

    fn engine() -> AquariumEngine {
        AquariumEngine::default().with_seed(42)
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine();
        assert_eq!(engine.fish_count(), 0);
        assert_eq!(engine.food_count(), 0);
        assert_eq!(engine.money(), 100);
    }

    #[test]
    fn test_populate_adds_starter_fish() {
        let mut engine = engine();
        engine.populate();
        assert_eq!(engine.fish_count(), 2);
        assert_eq!(engine.money(), 100);

        for state in engine.fish_states() {
            assert!(state.position.x >= 0.0 && state.position.x < 700.0);
            assert!(state.position.y >= 0.0 && state.position.y < 500.0);
            assert_eq!(state.size, 1.0);
            assert_eq!(state.hunger, 0.0);
        }
    }

    #[test]
    fn test_feed_drops_batch_on_surface() {
        let mut engine = engine();
        assert_eq!(engine.feed_fish(), Ok(5));
        assert_eq!(engine.money(), 95);

        let pellets = engine.food_positions();
        assert_eq!(pellets.len(), 5);
        for pos in pellets {
            assert_eq!(pos.y, 0.0);
            assert!(pos.x >= 0.0 && pos.x < 800.0);
        }
    }

    #[test]
    fn test_first_frame_has_no_elapsed_time() {
        let mut engine = engine();
        engine.populate();
        let mut list = DrawList::new();

        engine.frame(123_456.0, &mut list);

        for state in engine.fish_states() {
            assert_eq!(state.hunger, 0.0);
        }
    }

    #[test]
    fn test_frame_paint_order() {
        let mut engine = engine();
        engine.spawn_fish_at(Vec2::new(100.0, 100.0));
        engine.spawn_food(400.0, 10.0);
        let mut list = DrawList::new();

        engine.frame(0.0, &mut list);

        assert!(matches!(list.commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(list.commands[1], DrawCommand::Background { .. }));
        assert!(matches!(list.commands[2], DrawCommand::FillCircle { .. }));
        assert!(matches!(list.commands[3], DrawCommand::SpriteCell { .. }));
        // Hunger bar track and fill
        assert!(matches!(list.commands[4], DrawCommand::FillRect { .. }));
        assert!(matches!(list.commands[5], DrawCommand::FillRect { .. }));
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn test_paused_frame_draws_without_updating() {
        let mut engine = engine();
        engine.spawn_food(400.0, 10.0);
        engine.set_time_scale(0.0);
        let mut list = DrawList::new();

        engine.frame(0.0, &mut list);
        engine.frame(16.0, &mut list);

        assert_eq!(engine.food_positions(), vec![Vec2::new(400.0, 10.0)]);
        assert_eq!(engine.stats().ticks, 0);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_time_scale_runs_whole_ticks() {
        let mut engine = engine();
        let fish = engine.spawn_fish_at(Vec2::new(100.0, 100.0));
        engine.set_time_scale(2.0);

        engine.update(1000.0);

        let hunger = engine.world.get::<&Hunger>(fish).unwrap().level;
        assert!((hunger - 10.0).abs() < 0.001);
        assert_eq!(engine.stats().ticks, 2);
    }

    #[test]
    fn test_fast_forward_speeds_up_falling_and_swimming() {
        let mut engine = engine();
        let fish = engine.spawn_fish_at(Vec2::new(300.0, 300.0));
        engine.world.get::<&mut Velocity>(fish).unwrap().0 = Vec2::new(0.5, 0.25);
        engine.spawn_food(700.0, 0.0);
        engine.set_time_scale(4.0);
        let mut list = DrawList::new();

        engine.frame(0.0, &mut list);

        assert_eq!(engine.food_positions(), vec![Vec2::new(700.0, 4.0)]);
        let state = engine.fish_states()[0];
        assert_eq!(state.position, Vec2::new(302.0, 301.0));
        assert_eq!(engine.stats().ticks, 4);
        // Still a single painted frame
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn test_slow_motion_carries_partial_ticks() {
        let mut engine = engine();
        engine.spawn_food(700.0, 0.0);
        engine.set_time_scale(0.25);

        for _ in 0..3 {
            engine.update(16.0);
        }
        assert_eq!(engine.food_positions(), vec![Vec2::new(700.0, 0.0)]);

        engine.update(16.0);
        assert_eq!(engine.food_positions(), vec![Vec2::new(700.0, 1.0)]);
        assert_eq!(engine.stats().ticks, 1);
    }

    #[test]
    fn test_draw_matches_paused_frame() {
        let mut engine = engine();
        engine.populate();
        engine.spawn_food(400.0, 10.0);
        let mut drawn = DrawList::new();
        let mut framed = DrawList::new();

        engine.draw(&mut drawn);
        engine.set_time_scale(0.0);
        engine.frame(0.0, &mut framed);

        assert_eq!(drawn.commands, framed.commands);
        assert_eq!(engine.food_positions(), vec![Vec2::new(400.0, 10.0)]);
    }

    #[test]
    fn test_hud_updates_after_mutation() {
        let mut engine = engine();
        assert!(engine.take_hud_update().is_some());
        assert!(engine.take_hud_update().is_none());

        engine.buy_fish().unwrap();
        assert_eq!(
            engine.take_hud_update(),
            Some(Hud {
                fish_count: 1,
                money: 80
            })
        );
    }

    #[test]
    fn test_handle_input() {
        let mut engine = engine();

        assert_eq!(
            engine.handle_input(InputEvent::CanvasClick { x: 10.0, y: 20.0 }),
            Ok(InputOutcome::FoodDropped { count: 1 })
        );
        assert_eq!(
            engine.handle_input(InputEvent::BuyFish),
            Ok(InputOutcome::FishAdded)
        );
        assert_eq!(
            engine.handle_input(InputEvent::Feed),
            Ok(InputOutcome::FoodDropped { count: 5 })
        );
        assert_eq!(engine.money(), 75);
        assert_eq!(engine.food_count(), 6);
    }
}
