//! Aquarium Headless Simulation Harness
//!
//! Validates tank logic and the bundled config without a window.
//! Runs entirely in-process: no assets, no rendering.
//!
//! Usage:
//!   cargo run -p aquarium-simtest
//!   cargo run -p aquarium-simtest -- --verbose
//!   cargo run -p aquarium-simtest -- --json

use aquarium_core::assets::{AssetError, AssetGate, Readiness};
use aquarium_core::components::{Hunger, Rect, Vec2};
use aquarium_core::config::AquariumConfig;
use aquarium_core::economy::{Purchase, PurchaseError};
use aquarium_core::engine::AquariumEngine;
use aquarium_core::input::{screen_to_canvas, InputEvent, InputOutcome};
use aquarium_core::render::{DrawCommand, DrawList};
use serde::Serialize;

// ── Tank config (same JSON the viewer ships with) ───────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/aquarium.json");

const FRAME_MS: f32 = 1000.0 / 60.0;
const SEEDS: [u64; 4] = [1, 7, 42, 1234];

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    if !json {
        println!("=== Aquarium Simulation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Bundled config
    let config = match AquariumConfig::from_json(CONFIG_JSON) {
        Ok(config) => config,
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("{}", e),
            });
            report(&results, verbose, json);
            std::process::exit(1);
        }
    };
    results.extend(validate_config(&config, json));

    // 2. Shop
    results.extend(validate_shop(&config, json));

    // 3. Feeding behavior
    results.extend(validate_feeding(&config, json));

    // 4. Long-run invariants
    results.extend(validate_invariants(&config, verbose, json));

    // 5. Asset gate
    results.extend(validate_asset_gate(&config, json));

    // 6. Input mapping
    results.extend(validate_input(&config, json));

    // 7. Frame loop
    results.extend(validate_frame_loop(&config, json));

    let failed = report(&results, verbose, json);
    if failed > 0 {
        std::process::exit(1);
    }
}

/// Print the summary and return the number of failures
fn report(results: &[TestResult], verbose: bool, json: bool) -> usize {
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    if json {
        match serde_json::to_string_pretty(results) {
            Ok(out) => println!("{}", out),
            Err(e) => eprintln!("Failed to encode results: {}", e),
        }
        return failed;
    }

    println!();
    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
    failed
}

fn section(title: &str, json: bool) {
    if !json {
        println!("--- {} ---", title);
    }
}

fn fresh_tank(config: &AquariumConfig, seed: u64) -> AquariumEngine {
    let mut engine = AquariumEngine::new(config.clone()).with_seed(seed);
    engine.populate();
    engine
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_config(config: &AquariumConfig, json: bool) -> Vec<TestResult> {
    section("Config", json);
    let mut results = Vec::new();

    results.push(TestResult {
        name: "config_matches_defaults".into(),
        passed: *config == AquariumConfig::default(),
        detail: "bundled aquarium.json equals built-in defaults".into(),
    });

    let economy = &config.economy;
    results.push(TestResult {
        name: "config_prices".into(),
        passed: economy.fish_price == 20 && economy.feed_price == 5 && economy.feed_batch == 5,
        detail: format!(
            "fish={} feed={} batch={}",
            economy.fish_price, economy.feed_price, economy.feed_batch
        ),
    });

    let broken = AquariumConfig::from_json(r#"{ "fish": { "max_size": 0.5 } }"#);
    results.push(TestResult {
        name: "config_rejects_invalid".into(),
        passed: broken.is_err(),
        detail: match broken {
            Ok(_) => "max_size 0.5 was accepted".into(),
            Err(e) => format!("{}", e),
        },
    });

    results
}

// ── 2. Shop ─────────────────────────────────────────────────────────────

fn validate_shop(config: &AquariumConfig, json: bool) -> Vec<TestResult> {
    section("Shop", json);
    let mut results = Vec::new();

    let mut engine = fresh_tank(config, 1);
    results.push(TestResult {
        name: "shop_opening_state".into(),
        passed: engine.fish_count() == 2 && engine.money() == 100,
        detail: format!("{} fish, {} money", engine.fish_count(), engine.money()),
    });

    let bought = (0..5).filter(|_| engine.buy_fish().is_ok()).count();
    results.push(TestResult {
        name: "shop_buy_until_broke".into(),
        passed: bought == 5 && engine.money() == 0 && engine.fish_count() == 7,
        detail: format!(
            "{} bought, {} fish, {} money",
            bought,
            engine.fish_count(),
            engine.money()
        ),
    });

    let declined = engine.buy_fish();
    let expected = Err(PurchaseError::InsufficientFunds {
        purchase: Purchase::Fish,
        price: 20,
        balance: 0,
    });
    results.push(TestResult {
        name: "shop_decline_when_broke".into(),
        passed: declined.map(|_| ()) == expected && engine.fish_count() == 7,
        detail: "sixth purchase declined, nothing changed".into(),
    });

    let mut engine = fresh_tank(config, 2);
    let dropped = engine.feed_fish();
    results.push(TestResult {
        name: "shop_feed_batch".into(),
        passed: dropped == Ok(5)
            && engine.money() == 95
            && engine.food_positions().iter().all(|p| p.y == 0.0),
        detail: format!(
            "{} pellets at the surface, {} money",
            engine.food_count(),
            engine.money()
        ),
    });

    results
}

// ── 3. Feeding ──────────────────────────────────────────────────────────

fn validate_feeding(config: &AquariumConfig, json: bool) -> Vec<TestResult> {
    section("Feeding", json);
    let mut results = Vec::new();

    let mut engine = AquariumEngine::new(config.clone()).with_seed(3);
    let fish = engine.spawn_fish_at(Vec2::new(100.0, 100.0));
    if let Ok(mut hunger) = engine.world.get::<&mut Hunger>(fish) {
        hunger.level = 50.0;
    }
    engine.spawn_food(100.0, 105.0);
    engine.update(0.0);

    let state = engine.fish_states()[0];
    results.push(TestResult {
        name: "feeding_close_pellet_eaten".into(),
        passed: engine.food_count() == 0
            && (state.hunger - 20.0).abs() < 1e-4
            && (state.size - 1.1).abs() < 1e-4,
        detail: format!("hunger={:.1} size={:.2}", state.hunger, state.size),
    });

    let mut engine = AquariumEngine::new(config.clone()).with_seed(4);
    let fish = engine.spawn_fish_at(Vec2::new(100.0, 100.0));
    if let Ok(mut hunger) = engine.world.get::<&mut Hunger>(fish) {
        hunger.level = config.fish.seek_threshold;
    }
    engine.spawn_food(100.0, 105.0);
    engine.update(0.0);
    results.push(TestResult {
        name: "feeding_threshold_is_strict".into(),
        passed: engine.food_count() == 1,
        detail: "fish exactly at the threshold leaves food alone".into(),
    });

    // Starve a tank: hunger is capped
    let mut engine = fresh_tank(config, 5);
    engine.update(1_000_000.0);
    let capped = engine
        .fish_states()
        .iter()
        .all(|s| (s.hunger - config.fish.max_hunger).abs() < 1e-4);
    results.push(TestResult {
        name: "feeding_hunger_capped".into(),
        passed: capped,
        detail: format!("hunger stops at {}", config.fish.max_hunger),
    });

    results
}

// ── 4. Invariants ───────────────────────────────────────────────────────

fn validate_invariants(config: &AquariumConfig, verbose: bool, json: bool) -> Vec<TestResult> {
    section("Long-run Invariants", json);
    let mut results = Vec::new();
    let (width, height) = (config.canvas.width, config.canvas.height);

    for seed in SEEDS {
        let mut engine = fresh_tank(config, seed);
        for _ in 0..3 {
            let _ = engine.buy_fish();
        }

        let mut out_of_bounds = 0;
        let mut out_of_range = 0;
        for tick in 0..10_000 {
            if tick % 400 == 0 {
                let _ = engine.feed_fish();
            }
            engine.update(FRAME_MS);

            for s in engine.fish_states() {
                let w = config.fish.width * s.size;
                let h = config.fish.height * s.size;
                if s.position.x < 0.0
                    || s.position.y < 0.0
                    || s.position.x + w > width + 1e-3
                    || s.position.y + h > height + 1e-3
                {
                    out_of_bounds += 1;
                }
                if !(0.0..=config.fish.max_hunger).contains(&s.hunger)
                    || !(1.0..=config.fish.max_size).contains(&s.size)
                {
                    out_of_range += 1;
                }
            }
        }

        results.push(TestResult {
            name: format!("invariant_bounds_seed_{}", seed),
            passed: out_of_bounds == 0,
            detail: format!("{} out-of-bounds samples", out_of_bounds),
        });
        results.push(TestResult {
            name: format!("invariant_ranges_seed_{}", seed),
            passed: out_of_range == 0,
            detail: format!("{} hunger/size samples out of range", out_of_range),
        });

        let stats = *engine.stats();
        let accounted = stats.food_eaten + stats.food_lost + engine.food_count() as u32;
        results.push(TestResult {
            name: format!("invariant_food_accounting_seed_{}", seed),
            passed: accounted == stats.food_dropped,
            detail: format!(
                "dropped={} eaten={} lost={} left={}",
                stats.food_dropped,
                stats.food_eaten,
                stats.food_lost,
                engine.food_count()
            ),
        });

        if verbose {
            println!(
                "  seed {}: {} fish ({} hungry), sizes {:?}",
                seed,
                engine.fish_count(),
                engine.hungry_count(),
                engine
                    .fish_states()
                    .iter()
                    .map(|s| format!("{:.1}", s.size))
                    .collect::<Vec<_>>()
            );
        }
    }

    results
}

// ── 5. Asset Gate ───────────────────────────────────────────────────────

fn validate_asset_gate(config: &AquariumConfig, json: bool) -> Vec<TestResult> {
    section("Asset Gate", json);
    let mut results = Vec::new();
    let names = [
        config.assets.background.clone(),
        config.assets.sprite_sheet.clone(),
    ];

    let mut gate = AssetGate::new(names.clone());
    gate.mark_loaded(&names[0]);
    let half = gate.readiness();
    gate.mark_loaded(&names[1]);
    results.push(TestResult {
        name: "assets_ready_after_both".into(),
        passed: matches!(half, Readiness::Waiting { loaded: 1, total: 2 })
            && gate.readiness() == Readiness::Ready,
        detail: "loop starts only once both images are in".into(),
    });

    let mut gate = AssetGate::new(names.clone());
    gate.mark_failed(&names[1], "404");
    results.push(TestResult {
        name: "assets_failure_reported".into(),
        passed: matches!(
            gate.readiness(),
            Readiness::Failed(AssetError::LoadFailed { .. })
        ),
        detail: "a failed image is surfaced instead of hanging".into(),
    });

    let mut gate = AssetGate::new(names).with_timeout(config.assets.load_timeout_ms);
    gate.tick(config.assets.load_timeout_ms.unwrap_or(0.0) + 1.0);
    results.push(TestResult {
        name: "assets_timeout".into(),
        passed: config.assets.load_timeout_ms.is_none()
            || matches!(
                gate.readiness(),
                Readiness::Failed(AssetError::TimedOut { .. })
            ),
        detail: format!("timeout {:?} ms", config.assets.load_timeout_ms),
    });

    results
}

// ── 6. Input ────────────────────────────────────────────────────────────

fn validate_input(config: &AquariumConfig, json: bool) -> Vec<TestResult> {
    section("Input", json);
    let mut results = Vec::new();
    let (width, height) = (config.canvas.width, config.canvas.height);

    let displayed = Rect::new(40.0, 30.0, width * 0.5, height * 0.5);
    let mapped = screen_to_canvas(Vec2::new(240.0, 180.0), displayed, width, height);
    results.push(TestResult {
        name: "input_scaled_canvas".into(),
        passed: mapped == Some(Vec2::new(400.0, 300.0)),
        detail: format!("{:?}", mapped),
    });

    let outside = screen_to_canvas(Vec2::new(10.0, 10.0), displayed, width, height);
    results.push(TestResult {
        name: "input_outside_ignored".into(),
        passed: outside.is_none(),
        detail: "clicks off the canvas map to nothing".into(),
    });

    let mut engine = AquariumEngine::new(config.clone()).with_seed(6);
    let outcome = engine.handle_input(InputEvent::CanvasClick { x: 400.0, y: 300.0 });
    results.push(TestResult {
        name: "input_click_drops_food".into(),
        passed: outcome == Ok(InputOutcome::FoodDropped { count: 1 })
            && engine.money() == config.economy.starting_money,
        detail: "clicking is free".into(),
    });

    results
}

// ── 7. Frame Loop ───────────────────────────────────────────────────────

fn validate_frame_loop(config: &AquariumConfig, json: bool) -> Vec<TestResult> {
    section("Frame Loop", json);
    let mut results = Vec::new();

    let mut engine = fresh_tank(config, 8);
    let _ = engine.feed_fish();
    let mut list = DrawList::new();
    engine.frame(0.0, &mut list);

    let first_sprite = list
        .iter()
        .position(|c| matches!(c, DrawCommand::SpriteCell { .. }));
    let last_pellet = list
        .commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::FillCircle { .. }));
    results.push(TestResult {
        name: "frame_paint_order".into(),
        passed: matches!(list.commands.first(), Some(DrawCommand::Clear { .. }))
            && matches!(list.commands.get(1), Some(DrawCommand::Background { .. }))
            && matches!((last_pellet, first_sprite), (Some(p), Some(s)) if p < s),
        detail: format!("{} commands", list.len()),
    });

    let before = engine.fish_states();
    engine.set_time_scale(0.0);
    engine.frame(5_000.0, &mut list);
    results.push(TestResult {
        name: "frame_pause".into(),
        passed: engine.fish_states() == before,
        detail: "time scale 0 freezes the tank".into(),
    });

    let mut engine = AquariumEngine::new(config.clone()).with_seed(9);
    engine.spawn_food(100.0, 0.0);
    engine.set_time_scale(4.0);
    engine.frame(0.0, &mut list);
    let fallen = engine.food_positions().first().map(|p| p.y);
    let expected = 4.0 * config.food.fall_speed;
    results.push(TestResult {
        name: "frame_fast_forward".into(),
        passed: fallen == Some(expected) && engine.stats().ticks == 4,
        detail: format!("pellet y {:?} after one frame at 4x", fallen),
    });

    results
}
