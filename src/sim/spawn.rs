//! Spawn policy
//!
//! Every random pick is a bounded rejection-sampling loop followed by an
//! exhaustive fallback, so near-full boards still get a uniform legal pick
//! and impossible requests fail loudly instead of spinning.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::GridPos;
use super::ledger::Lives;
use super::state::{Food, ItemKind};
use crate::consts::MAX_SPAWN_ATTEMPTS;
use crate::error::{EngineError, Result};

/// Uniformly random cell not in `occupied`
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    occupied: &HashSet<GridPos>,
) -> Result<GridPos> {
    if width == 0 || height == 0 {
        return Err(EngineError::invariant("free grid cell", "grid has no cells"));
    }
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = GridPos::new(
            rng.random_range(0..width) as i32,
            rng.random_range(0..height) as i32,
        );
        if !occupied.contains(&pos) {
            return Ok(pos);
        }
    }

    let free: Vec<GridPos> = (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| GridPos::new(x, y)))
        .filter(|pos| !occupied.contains(pos))
        .collect();
    if free.is_empty() {
        return Err(EngineError::invariant(
            "free grid cell",
            format!("all {} cells of the {width}x{height} grid are occupied", width * height),
        ));
    }
    log::debug!("Spawn fell back to scan: {} free cells", free.len());
    Ok(free[rng.random_range(0..free.len())])
}

/// Uniformly random letter from `alphabet` for which `excluded` is false
pub fn random_letter<R, F>(rng: &mut R, alphabet: &[char], excluded: F) -> Result<char>
where
    R: Rng + ?Sized,
    F: Fn(char) -> bool,
{
    if !alphabet.is_empty() {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let ch = alphabet[rng.random_range(0..alphabet.len())];
            if !excluded(ch) {
                return Ok(ch);
            }
        }
    }

    let allowed: Vec<char> = alphabet.iter().copied().filter(|c| !excluded(*c)).collect();
    if allowed.is_empty() {
        return Err(EngineError::invariant(
            "decoy letter",
            format!("every letter of {:?} is excluded", alphabet.iter().collect::<String>()),
        ));
    }
    Ok(allowed[rng.random_range(0..allowed.len())])
}

/// One correct food for `target` plus `food_count - 1` decoys, all on
/// distinct cells off the snake
pub fn spawn_letter_foods<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    snake: impl IntoIterator<Item = GridPos>,
    target: char,
    food_count: usize,
    alphabet: &[char],
) -> Result<Vec<Food>> {
    let mut occupied: HashSet<GridPos> = snake.into_iter().collect();
    let mut foods = Vec::with_capacity(food_count);

    let pos = random_free_cell(rng, width, height, &occupied)?;
    occupied.insert(pos);
    foods.push(Food::letter(pos, target, true));

    for _ in 1..food_count {
        let pos = random_free_cell(rng, width, height, &occupied)?;
        occupied.insert(pos);
        let letter = random_letter(rng, alphabet, |c| c == target)?;
        foods.push(Food::letter(pos, letter, false));
    }
    Ok(foods)
}

/// Single plain food for classic snake
pub fn spawn_plain_food<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    snake: impl IntoIterator<Item = GridPos>,
) -> Result<Food> {
    let occupied: HashSet<GridPos> = snake.into_iter().collect();
    let pos = random_free_cell(rng, width, height, &occupied)?;
    Ok(Food::plain(pos))
}

/// Shooter letter choice: from the correct queue with probability
/// `correct_ratio`, otherwise a decoy that no uncollected position needs.
/// Returns the letter and whether it came from the queue.
pub fn pick_falling_letter<R: Rng + ?Sized>(
    rng: &mut R,
    correct_queue: &mut VecDeque<char>,
    correct_ratio: f64,
    alphabet: &[char],
    needed: &HashSet<char>,
) -> Result<(char, bool)> {
    if !correct_queue.is_empty() && rng.random_bool(correct_ratio) {
        if let Some(ch) = correct_queue.pop_front() {
            return Ok((ch, true));
        }
    }
    let ch = random_letter(rng, alphabet, |c| needed.contains(&c))?;
    Ok((ch, false))
}

/// Which item may spawn given lives and hint state. `None` when both are
/// blocked; that tick simply spawns nothing.
pub fn pick_item_kind<R: Rng + ?Sized>(
    rng: &mut R,
    lives: &Lives,
    hint_active: bool,
) -> Option<ItemKind> {
    match (lives.at_ceiling(), hint_active) {
        (true, true) => None,
        (true, false) => Some(ItemKind::Hint),
        (false, true) => Some(ItemKind::Life),
        (false, false) => {
            if rng.random_bool(0.5) {
                Some(ItemKind::Hint)
            } else {
                Some(ItemKind::Life)
            }
        }
    }
}

/// Random x for a falling entity, keeping `margin` from both edges
pub fn random_column<R: Rng + ?Sized>(rng: &mut R, width: f32, margin: f32) -> f32 {
    rng.random::<f32>() * (width - margin * 2.0) + margin
}

/// Shuffled copy of `items`
pub fn shuffled<R: Rng + ?Sized, T>(rng: &mut R, mut items: Vec<T>) -> Vec<T> {
    items.shuffle(rng);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn alphabet() -> Vec<char> {
        crate::consts::ALPHABET.chars().collect()
    }

    #[test]
    fn foods_are_disjoint_from_snake_and_each_other() {
        let mut rng = Pcg32::seed_from_u64(11);
        let snake: Vec<GridPos> = (0..10).map(|x| GridPos::new(x, 0)).collect();
        for _ in 0..200 {
            let foods = spawn_letter_foods(
                &mut rng,
                5,
                3,
                snake.iter().copied(),
                'C',
                3,
                &alphabet(),
            )
            .unwrap();
            assert_eq!(foods.len(), 3);
            assert!(foods[0].correct);
            assert_eq!(foods[0].letter, Some('C'));
            for (i, food) in foods.iter().enumerate() {
                assert!(!snake.contains(&food.pos));
                assert!(food.pos.in_bounds(5, 3));
                if i > 0 {
                    assert!(!food.correct);
                    assert_ne!(food.letter, Some('C'));
                }
                for other in &foods[i + 1..] {
                    assert_ne!(food.pos, other.pos);
                }
            }
        }
    }

    #[test]
    fn full_grid_is_an_invariant_violation() {
        let mut rng = Pcg32::seed_from_u64(0);
        let occupied: HashSet<GridPos> = (0..2)
            .flat_map(|y| (0..2).map(move |x| GridPos::new(x, y)))
            .collect();
        let err = random_free_cell(&mut rng, 2, 2, &occupied).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation { .. }));
    }

    #[test]
    fn too_many_foods_for_the_board_fails_loudly() {
        let mut rng = Pcg32::seed_from_u64(0);
        let snake = [GridPos::new(0, 0)];
        let result = spawn_letter_foods(&mut rng, 2, 1, snake, 'A', 3, &alphabet());
        assert!(matches!(result, Err(EngineError::InvariantViolation { .. })));
    }

    #[test]
    fn last_free_cell_is_found() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut occupied: HashSet<GridPos> = (0..10)
            .flat_map(|y| (0..10).map(move |x| GridPos::new(x, y)))
            .collect();
        occupied.remove(&GridPos::new(7, 3));
        assert_eq!(
            random_free_cell(&mut rng, 10, 10, &occupied).unwrap(),
            GridPos::new(7, 3)
        );
    }

    #[test]
    fn decoys_never_match_needed_letters() {
        let mut rng = Pcg32::seed_from_u64(9);
        let needed: HashSet<char> = "DOG".chars().collect();
        let mut queue = VecDeque::new();
        for _ in 0..500 {
            let (ch, from_queue) =
                pick_falling_letter(&mut rng, &mut queue, 0.35, &alphabet(), &needed).unwrap();
            assert!(!from_queue);
            assert!(!needed.contains(&ch));
        }
    }

    #[test]
    fn ratio_one_always_drains_the_queue_first() {
        let mut rng = Pcg32::seed_from_u64(9);
        let needed: HashSet<char> = "DOG".chars().collect();
        let mut queue: VecDeque<char> = "GDO".chars().collect();
        let picks: Vec<_> = (0..4)
            .map(|_| pick_falling_letter(&mut rng, &mut queue, 1.0, &alphabet(), &needed).unwrap())
            .collect();
        assert_eq!(&picks[..3], &[('G', true), ('D', true), ('O', true)]);
        assert!(!picks[3].1);
    }

    #[test]
    fn exhausted_alphabet_fails() {
        let mut rng = Pcg32::seed_from_u64(2);
        let result = random_letter(&mut rng, &['A', 'B'], |c| c == 'A' || c == 'B');
        assert!(matches!(result, Err(EngineError::InvariantViolation { .. })));
    }

    #[test]
    fn item_gating() {
        let mut rng = Pcg32::seed_from_u64(4);
        let full = Lives::new(5, 5);
        let hurt = Lives::new(2, 5);
        assert_eq!(pick_item_kind(&mut rng, &full, true), None);
        assert_eq!(pick_item_kind(&mut rng, &full, false), Some(ItemKind::Hint));
        assert_eq!(pick_item_kind(&mut rng, &hurt, true), Some(ItemKind::Life));

        let kinds: HashSet<_> = (0..64)
            .filter_map(|_| pick_item_kind(&mut rng, &hurt, false))
            .collect();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn columns_stay_inside_margins() {
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..1000 {
            let x = random_column(&mut rng, 600.0, 28.0);
            assert!((28.0..572.0).contains(&x));
        }
    }

    proptest! {
        #[test]
        fn free_cell_is_never_occupied(
            width in 1u32..8,
            height in 1u32..8,
            mask in proptest::collection::vec(any::<bool>(), 64),
            seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let occupied: HashSet<GridPos> = (0..height as i32)
                .flat_map(|y| (0..width as i32).map(move |x| GridPos::new(x, y)))
                .filter(|p| mask[(p.y * 8 + p.x) as usize])
                .collect();
            let capacity = (width * height) as usize;
            match random_free_cell(&mut rng, width, height, &occupied) {
                Ok(pos) => {
                    prop_assert!(pos.in_bounds(width, height));
                    prop_assert!(!occupied.contains(&pos));
                }
                Err(_) => prop_assert_eq!(occupied.len(), capacity),
            }
        }
    }
}
