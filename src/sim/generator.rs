//! Procedural level generation
//!
//! Keeps a difficulty-dependent number of surfaces ahead of the body. Each
//! new surface sits a random gap above the current tail, shrinks with
//! difficulty, and takes the best of a few random horizontal candidates:
//! candidates that hang off-screen or drift far from the tail score lower.

use rand::Rng;

use super::state::GameState;
use super::surface::{Collectible, CollectibleKind, Surface, SurfaceKind};
use crate::lerp;
use crate::score_for_height;
use crate::tuning::Tuning;

/// Score at which difficulty saturates
pub const DIFFICULTY_SCORE_SPAN: f32 = 150.0;

/// Surfaces kept alive at zero and full difficulty
pub const MAX_TARGET_COUNT: usize = 15;
pub const MIN_TARGET_COUNT: usize = 6;

/// Vertical gap curve
const BASE_MIN_GAP: f32 = 30.0;
const MIN_GAP_GROWTH: f32 = 40.0;
const BASE_MAX_GAP: f32 = 60.0;
const MAX_GAP_GROWTH: f32 = 60.0;
const GAP_CEILING: f32 = 120.0;
const MIN_GAP_SPREAD: f32 = 10.0;

/// Fraction of the base width lost at full difficulty
const WIDTH_SHRINK: f32 = 0.8;

/// Cap on the wide random candidate offset
const MAX_HORIZONTAL_OFFSET: f32 = 500.0;

/// Distance penalty weight `BASE + difficulty * GROWTH`
const PENALTY_BASE: f32 = 0.15;
const PENALTY_GROWTH: f32 = 0.1;

/// Entities further than this below the camera's viewport bottom are dropped
pub const SURFACE_PRUNE_MARGIN: f32 = 200.0;
pub const COLLECTIBLE_PRUNE_MARGIN: f32 = 100.0;

/// Normalized progression in [0, 1] for a surface at height `y`
pub fn difficulty(y: f32, viewport_height: f32) -> f32 {
    (score_for_height(y, viewport_height) as f32 / DIFFICULTY_SCORE_SPAN).clamp(0.0, 1.0)
}

/// How many surfaces to keep at a given difficulty
pub fn target_count(difficulty: f32) -> usize {
    let shed = (difficulty.clamp(0.0, 1.0) * 9.0).floor() as usize;
    (MAX_TARGET_COUNT - shed).max(MIN_TARGET_COUNT)
}

/// Inclusive `(min, max)` vertical gap
pub fn gap_bounds(difficulty: f32) -> (f32, f32) {
    let max_gap = (BASE_MAX_GAP + difficulty * MAX_GAP_GROWTH).min(GAP_CEILING);
    let min_gap = (BASE_MIN_GAP + difficulty * MIN_GAP_GROWTH).min(max_gap - MIN_GAP_SPREAD);
    (min_gap, max_gap)
}

/// Width of a newly generated surface
pub fn surface_width(difficulty: f32, tuning: &Tuning) -> f32 {
    (tuning.base_width * (1.0 - difficulty * WIDTH_SHRINK)).max(tuning.min_width)
}

/// Half-width of the wide random candidate offset
pub fn horizontal_range(difficulty: f32, viewport_width: f32) -> f32 {
    lerp(0.2 * viewport_width, 0.8 * viewport_width, difficulty).min(MAX_HORIZONTAL_OFFSET)
}

/// Candidate left edges for a surface of `width` above a tail centred at `tail_center`
pub fn candidate_positions<R: Rng>(
    rng: &mut R,
    difficulty: f32,
    tail_center: f32,
    width: f32,
    viewport_width: f32,
) -> Vec<f32> {
    let from_offset = |offset: f32| tail_center + offset - width / 2.0;
    let mut candidates = Vec::with_capacity(4);

    let (near, far) = if difficulty < 0.2 {
        (100.0, 160.0)
    } else if difficulty < 0.5 {
        (180.0, 280.0)
    } else {
        (250.0, 400.0)
    };
    candidates.push(from_offset(rng.random_range(-near..=near)));
    candidates.push(from_offset(rng.random_range(-far..=far)));

    // Push toward the opposite half so hard sections zig-zag
    if difficulty >= 0.5 && rng.random_bool(0.5) {
        let x = if tail_center < viewport_width / 2.0 {
            rng.random_range(viewport_width - width - 50.0..=viewport_width - width - 10.0)
        } else {
            rng.random_range(10.0..=50.0)
        };
        candidates.push(x);
    }

    let range = horizontal_range(difficulty, viewport_width);
    candidates.push(from_offset(rng.random_range(-range..=range)));

    candidates
}

/// A scored horizontal placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Proposed left edge (may be off-screen)
    pub x: f32,
    /// Left edge clamped into `[0, viewport_width - width]`
    pub clamped_x: f32,
    pub score: f32,
}

/// Score one proposed left edge
pub fn score_candidate(
    x: f32,
    width: f32,
    tail_center: f32,
    difficulty: f32,
    viewport_width: f32,
) -> Candidate {
    let clamped_x = x.min(viewport_width - width).max(0.0);

    let on_screen_ratio = if x < 0.0 {
        ((width + x) / width).max(0.0)
    } else if x + width > viewport_width {
        ((viewport_width - x) / width).max(0.0)
    } else {
        1.0
    };

    let distance_penalty = (clamped_x + width / 2.0 - tail_center).abs() / viewport_width;
    let weight = PENALTY_BASE + difficulty * PENALTY_GROWTH;

    Candidate {
        x,
        clamped_x,
        score: on_screen_ratio - distance_penalty * weight,
    }
}

/// Highest scoring candidate; ties go to the earliest
pub fn best_candidate(
    xs: &[f32],
    width: f32,
    tail_center: f32,
    difficulty: f32,
    viewport_width: f32,
) -> Option<Candidate> {
    xs.iter()
        .map(|&x| score_candidate(x, width, tail_center, difficulty, viewport_width))
        .fold(None, |best: Option<Candidate>, c| match best {
            Some(b) if b.score >= c.score => Some(b),
            _ => Some(c),
        })
}

/// Geometry and category for the next surface, before it gets an id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePlan {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub kind: SurfaceKind,
    pub difficulty: f32,
}

/// Plan the surface to place above `tail`
pub fn plan_next<R: Rng>(rng: &mut R, tail: &Surface, tuning: &Tuning) -> SurfacePlan {
    let difficulty = difficulty(tail.y, tuning.viewport_height);

    let (min_gap, max_gap) = gap_bounds(difficulty);
    let y = tail.y - rng.random_range(min_gap..=max_gap);

    let width = surface_width(difficulty, tuning);

    let tail_center = tail.center_x();
    let xs = candidate_positions(rng, difficulty, tail_center, width, tuning.viewport_width);
    let x = best_candidate(&xs, width, tail_center, difficulty, tuning.viewport_width)
        .map(|c| c.clamped_x)
        .unwrap_or_else(|| (tail_center - width / 2.0).max(0.0));

    let kind = roll_kind(rng, tuning.special_chance);

    SurfacePlan {
        x,
        y,
        width,
        kind,
        difficulty,
    }
}

/// Pick the collectible to place on a fresh surface, if any
pub fn roll_collectible<R: Rng>(rng: &mut R, chance: f64) -> Option<CollectibleKind> {
    if rng.random_bool(chance) {
        let index = rng.random_range(0..CollectibleKind::ALL.len());
        Some(CollectibleKind::ALL[index])
    } else {
        None
    }
}

fn roll_kind<R: Rng>(rng: &mut R, special_chance: f64) -> SurfaceKind {
    if rng.random_bool(special_chance) {
        SurfaceKind::Special
    } else {
        SurfaceKind::Normal
    }
}

/// Replace all surfaces with the opening batch: a full-width start surface
/// centred near the bottom, then evenly spaced shrinking rows above it.
///
/// The opening batch rolls specials with `seed_special_chance`; later
/// generation uses `special_chance`.
pub fn seed_surfaces(state: &mut GameState) {
    state.surfaces.clear();
    state.collectibles.clear();

    let tuning = state.tuning.clone();
    let start_x = tuning.viewport_width / 2.0 - tuning.base_width / 2.0;
    let start_y = tuning.viewport_height - crate::consts::SEED_ROW_SPACING;
    let id = state.next_entity_id();
    state.surfaces.push(Surface::new(
        id,
        start_x,
        start_y,
        tuning.base_width,
        tuning.surface_height,
        SurfaceKind::Normal,
    ));

    for row in 1..crate::consts::SEED_BATCH_SIZE {
        let x = state
            .rng
            .random_range(0.0..=tuning.viewport_width - tuning.base_width);
        let y = tuning.viewport_height - row as f32 * crate::consts::SEED_ROW_SPACING;
        let width = (tuning.base_width * tuning.seed_width_scale.powi(row as i32))
            .clamp(tuning.min_width, tuning.base_width);
        let kind = roll_kind(&mut state.rng, tuning.seed_special_chance);
        let id = state.next_entity_id();
        state
            .surfaces
            .push(Surface::new(id, x, y, width, tuning.surface_height, kind));
    }
}

/// Append surfaces above the tail until the difficulty target is met
pub fn fill_ahead(state: &mut GameState) {
    let Some(tail) = state.surfaces.last() else {
        log::warn!("No surfaces left to generate from");
        return;
    };
    let target = target_count(difficulty(tail.y, state.tuning.viewport_height));

    let mut added = 0usize;
    while state.surfaces.len() < target {
        let Some(tail) = state.surfaces.last() else {
            break;
        };
        let plan = plan_next(&mut state.rng, tail, &state.tuning);

        let id = state.next_entity_id();
        let surface = Surface::new(
            id,
            plan.x,
            plan.y,
            plan.width,
            state.tuning.surface_height,
            plan.kind,
        );

        if let Some(kind) = roll_collectible(&mut state.rng, state.tuning.collectible_chance) {
            let id = state.next_entity_id();
            state.collectibles.push(Collectible::above(
                id,
                kind,
                &surface,
                state.tuning.collectible_size,
            ));
        }

        state.surfaces.push(surface);
        added += 1;
    }

    if added > 0 {
        log::debug!(
            "Generated {} surfaces (target {}, tail y {:.0})",
            added,
            target,
            state.surfaces.last().map(|s| s.y).unwrap_or_default()
        );
    }
}

/// Drop entities that have fallen well below the viewport
pub fn prune(state: &mut GameState) {
    let camera = state.camera_y;
    let height = state.tuning.viewport_height;
    state
        .surfaces
        .retain(|s| s.y - camera < height + SURFACE_PRUNE_MARGIN);
    state
        .collectibles
        .retain(|c| c.rect.y - camera < height + COLLECTIBLE_PRUNE_MARGIN);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    #[test]
    fn test_difficulty_examples() {
        // score 0, 75, 150, 200
        assert_eq!(difficulty(H, H), 0.0);
        assert_eq!(difficulty(H - 750.0, H), 0.5);
        assert_eq!(difficulty(H - 1500.0, H), 1.0);
        assert_eq!(difficulty(H - 2000.0, H), 1.0);
        // Below the viewport floor
        assert_eq!(difficulty(H + 300.0, H), 0.0);
    }

    #[test]
    fn test_target_count_bounds() {
        assert_eq!(target_count(0.0), 15);
        assert_eq!(target_count(0.5), 11);
        assert_eq!(target_count(1.0), 6);
    }

    #[test]
    fn test_gap_bounds() {
        assert_eq!(gap_bounds(0.0), (30.0, 60.0));
        assert_eq!(gap_bounds(0.5), (50.0, 90.0));
        assert_eq!(gap_bounds(1.0), (70.0, 120.0));
    }

    #[test]
    fn test_surface_width_curve() {
        let t = Tuning::default();
        assert_eq!(surface_width(0.0, &t), t.base_width);
        assert!((surface_width(0.5, &t) - 120.0).abs() < 1e-3);
        assert_eq!(surface_width(1.0, &t), t.min_width);
    }

    #[test]
    fn test_horizontal_range_capped() {
        assert!((horizontal_range(0.0, W) - 160.0).abs() < 1e-3);
        assert_eq!(horizontal_range(1.0, W), 500.0);
    }

    #[test]
    fn test_on_screen_candidate_near_tail_scores_one() {
        let c = score_candidate(350.0, 100.0, 400.0, 0.0, W);
        assert_eq!(c.clamped_x, 350.0);
        assert_eq!(c.score, 1.0);
    }

    #[test]
    fn test_partially_off_screen_candidate() {
        // 40 of 100 pixels hang off the left edge
        let c = score_candidate(-40.0, 100.0, 50.0, 0.0, W);
        assert_eq!(c.clamped_x, 0.0);
        assert!((c.score - 0.6).abs() < 1e-6);

        let c = score_candidate(760.0, 100.0, 750.0, 0.0, W);
        assert_eq!(c.clamped_x, 700.0);
        assert!((c.score - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_fully_off_screen_candidate_scores_zero_ratio() {
        let c = score_candidate(-300.0, 100.0, 50.0, 0.0, W);
        assert_eq!(c.clamped_x, 0.0);
        assert!(c.score <= 0.0);
    }

    #[test]
    fn test_best_candidate_prefers_on_screen() {
        let best = best_candidate(&[-80.0, 300.0, 900.0], 100.0, 200.0, 0.3, W).unwrap();
        assert_eq!(best.clamped_x, 300.0);
    }

    #[test]
    fn test_best_candidate_ties_first_seen() {
        // Mirror images around the tail score identically
        let best = best_candidate(&[250.0, 450.0], 100.0, 400.0, 0.0, W).unwrap();
        assert_eq!(best.x, 250.0);
    }

    #[test]
    fn test_best_candidate_empty() {
        assert!(best_candidate(&[], 100.0, 400.0, 0.0, W).is_none());
    }

    #[test]
    fn test_candidate_count_by_band() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(candidate_positions(&mut rng, 0.1, 400.0, 180.0, W).len(), 3);
            assert_eq!(candidate_positions(&mut rng, 0.3, 400.0, 150.0, W).len(), 3);
            let hard = candidate_positions(&mut rng, 0.8, 400.0, 70.0, W).len();
            assert!(hard == 3 || hard == 4);
        }
    }

    #[test]
    fn test_forced_candidate_opposite_half() {
        let mut rng = Pcg32::seed_from_u64(11);
        let width = 60.0;
        let mut saw_forced = false;
        for _ in 0..100 {
            let xs = candidate_positions(&mut rng, 1.0, 100.0, width, W);
            if xs.len() == 4 {
                saw_forced = true;
                assert!(xs[2] >= W - width - 50.0 && xs[2] <= W - width - 10.0);
            }
        }
        assert!(saw_forced);

        for _ in 0..100 {
            let xs = candidate_positions(&mut rng, 1.0, 700.0, width, W);
            if xs.len() == 4 {
                assert!((10.0..=50.0).contains(&xs[2]));
            }
        }
    }

    #[test]
    fn test_early_candidates_stay_close() {
        let mut rng = Pcg32::seed_from_u64(3);
        let width = 200.0;
        for _ in 0..100 {
            let xs = candidate_positions(&mut rng, 0.0, 400.0, width, W);
            assert!((xs[0] + width / 2.0 - 400.0).abs() <= 100.0);
            assert!((xs[1] + width / 2.0 - 400.0).abs() <= 160.0);
            assert!((xs[2] + width / 2.0 - 400.0).abs() <= 160.0);
        }
    }

    #[test]
    fn test_plan_next_sits_above_tail() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        // At the viewport floor difficulty is zero
        let tail = Surface::new(1, 300.0, H, 200.0, t.surface_height, SurfaceKind::Normal);
        for _ in 0..100 {
            let plan = plan_next(&mut rng, &tail, &t);
            let gap = tail.y - plan.y;
            assert!((30.0..=60.0).contains(&gap), "gap {gap}");
            assert_eq!(plan.width, t.base_width);
        }
    }

    #[test]
    fn test_roll_collectible_rate() {
        let mut rng = Pcg32::seed_from_u64(5);
        let spawned = (0..10_000)
            .filter(|_| roll_collectible(&mut rng, 0.15).is_some())
            .count();
        assert!((1_200..1_800).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn test_roll_collectible_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(9);
        let kinds: std::collections::HashSet<_> = (0..500)
            .filter_map(|_| roll_collectible(&mut rng, 1.0))
            .collect();
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn test_seed_batch_layout() {
        let state = GameState::new(1);
        let t = &state.tuning;
        assert!(state.surfaces.len() >= crate::consts::SEED_BATCH_SIZE);

        let first = &state.surfaces[0];
        assert_eq!(first.width, t.base_width);
        assert_eq!(first.kind, SurfaceKind::Normal);
        assert_eq!(first.center_x(), t.viewport_width / 2.0);
        assert_eq!(first.y, t.viewport_height - 100.0);

        for (row, surface) in state.surfaces[1..crate::consts::SEED_BATCH_SIZE]
            .iter()
            .enumerate()
        {
            let row = row + 1;
            assert_eq!(surface.y, t.viewport_height - row as f32 * 100.0);
            assert!(surface.x >= 0.0 && surface.x <= t.viewport_width - t.base_width);
            assert!(surface.width <= t.base_width && surface.width >= t.min_width);
        }
    }

    #[test]
    fn test_fill_ahead_reaches_target() {
        let mut state = GameState::new(77);
        fill_ahead(&mut state);
        let tail_y = state.surfaces.last().unwrap().y;
        let target = target_count(difficulty(tail_y, state.tuning.viewport_height));
        assert!(state.surfaces.len() >= target);

        // Above the start surface, which shares its row with the first seed row,
        // surfaces ascend strictly in creation order
        for pair in state.surfaces[1..].windows(2) {
            assert!(pair[1].y < pair[0].y);
        }
    }

    #[test]
    fn test_seed_and_generated_specials_use_separate_odds() {
        let tuning = Tuning {
            seed_special_chance: 1.0,
            special_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(11, tuning, 0);

        assert_eq!(state.surfaces[0].kind, SurfaceKind::Normal);
        for surface in &state.surfaces[1..crate::consts::SEED_BATCH_SIZE] {
            assert_eq!(surface.kind, SurfaceKind::Special);
        }

        // Keep only the start surface so the tail sits near the floor
        // and the target count forces new surfaces
        state.surfaces.truncate(1);
        fill_ahead(&mut state);
        assert_eq!(state.surfaces.len(), MAX_TARGET_COUNT);
        for surface in &state.surfaces[1..] {
            assert_eq!(surface.kind, SurfaceKind::Normal);
        }
    }

    #[test]
    fn test_fill_ahead_without_tail_is_noop() {
        let mut state = GameState::new(3);
        state.surfaces.clear();
        fill_ahead(&mut state);
        assert!(state.surfaces.is_empty());
    }

    #[test]
    fn test_prune_margins() {
        let mut state = GameState::new(5);
        state.camera_y = 0.0;
        state.surfaces.clear();
        state.collectibles.clear();
        for (i, y) in [100.0, 799.0, 800.0, 900.0].into_iter().enumerate() {
            state.surfaces.push(Surface::new(
                i as u32,
                0.0,
                y,
                100.0,
                20.0,
                SurfaceKind::Normal,
            ));
        }
        let anchor = state.surfaces[0].clone();
        for (i, y) in [650.0, 699.0, 700.0].into_iter().enumerate() {
            let mut c = Collectible::above(10 + i as u32, CollectibleKind::DoubleJump, &anchor, 30.0);
            c.rect.y = y;
            state.collectibles.push(c);
        }

        prune(&mut state);

        let ys: Vec<f32> = state.surfaces.iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![100.0, 799.0]);
        let cys: Vec<f32> = state.collectibles.iter().map(|c| c.rect.y).collect();
        assert_eq!(cys, vec![650.0, 699.0]);
    }

    proptest! {
        #[test]
        fn difficulty_clamped_and_monotonic(y1 in -50_000.0f32..2_000.0, climb in 0.0f32..5_000.0) {
            let lower = difficulty(y1, H);
            let higher = difficulty(y1 - climb, H);
            prop_assert!((0.0..=1.0).contains(&lower));
            prop_assert!(higher >= lower);
        }

        #[test]
        fn target_count_in_range_and_non_increasing(d1 in 0.0f32..=1.0, d2 in 0.0f32..=1.0) {
            let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!((MIN_TARGET_COUNT..=MAX_TARGET_COUNT).contains(&target_count(lo)));
            prop_assert!(target_count(hi) <= target_count(lo));
        }

        #[test]
        fn width_in_bounds_and_non_increasing(d1 in 0.0f32..=1.0, d2 in 0.0f32..=1.0) {
            let t = Tuning::default();
            let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            let w_lo = surface_width(lo, &t);
            let w_hi = surface_width(hi, &t);
            prop_assert!(w_lo >= t.min_width && w_lo <= t.base_width);
            prop_assert!(w_hi <= w_lo);
        }

        #[test]
        fn chosen_x_always_on_screen(
            seed in any::<u64>(),
            d in 0.0f32..=1.0,
            tail_center in -100.0f32..900.0,
        ) {
            let t = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let width = surface_width(d, &t);
            let xs = candidate_positions(&mut rng, d, tail_center, width, W);
            let best = best_candidate(&xs, width, tail_center, d, W).unwrap();
            prop_assert!(best.clamped_x >= 0.0);
            prop_assert!(best.clamped_x <= W - width);
        }

        #[test]
        fn gap_within_bounds(seed in any::<u64>(), tail_y in -20_000.0f32..600.0) {
            let t = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let tail = Surface::new(1, 300.0, tail_y, 100.0, t.surface_height, SurfaceKind::Normal);
            let plan = plan_next(&mut rng, &tail, &t);
            let (min_gap, max_gap) = gap_bounds(plan.difficulty);
            let gap = tail.y - plan.y;
            prop_assert!(gap >= min_gap - 1e-3 && gap <= max_gap + 1e-3);
            prop_assert!(plan.width >= t.min_width && plan.width <= t.base_width);
        }
    }
}
