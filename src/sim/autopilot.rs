//! Demo autopilot
//!
//! Produces the input a player would give for the current state. It reads
//! the round but never mutates it, so the tick stays the only writer.

use super::grid::{Direction, GridPos};
use super::shooter::{ShooterInput, ShooterRound};
use super::snake::{SnakeInput, SnakeRound};
use super::state::Phase;

/// Greedy step toward the food the snake should eat.
///
/// Walls, the body and decoy letters are blocked. Among safe moves the
/// closest to the target wins, then the one with more free exits, then the
/// current heading.
pub fn snake_intents(round: &SnakeRound) -> SnakeInput {
    if round.phase != Phase::Playing {
        return SnakeInput::default();
    }
    let config = round.config();
    let (w, h) = (config.grid_width, config.grid_height);
    let current = round.snake.direction();
    let target = round.foods.iter().find(|f| f.correct).map(|f| f.pos);

    let blocked = |pos: GridPos| {
        !pos.in_bounds(w, h)
            || round.snake.contains(pos)
            || round.foods.iter().any(|f| f.pos == pos && !f.correct)
    };

    let best = Direction::ALL
        .into_iter()
        .filter(|dir| *dir != current.opposite())
        .map(|dir| (dir, round.snake.peek_head(dir)))
        .filter(|(_, pos)| !blocked(*pos))
        .min_by_key(|(dir, pos)| {
            let distance = target.map_or(0, |t| pos.manhattan(t));
            let exits = Direction::ALL
                .into_iter()
                .filter(|d| !blocked(pos.step(*d)))
                .count();
            (distance, usize::MAX - exits, *dir != current)
        });

    match best {
        Some((dir, _)) => SnakeInput::turn(dir),
        // Boxed in; nothing helps
        None => SnakeInput::default(),
    }
}

/// Track the lowest needed letter and fire when lined up with it.
///
/// Holds fire when a decoy sits between the gun and the target, and steps
/// aside from decoys about to land on the player. With no target it drifts
/// toward the nearest item.
pub fn shooter_intents(round: &ShooterRound) -> ShooterInput {
    let mut input = ShooterInput::default();
    if round.phase != Phase::Playing {
        return input;
    }
    let config = round.config();
    let player = round.player_box();
    let muzzle_y = config.canvas_height - config.player_height - 8.0;
    let lane = (config.letter_size + config.bullet_width) / 2.0;

    // Dodge first
    let danger_y = player.center.y - config.player_height * 3.0;
    let threat = round.letters.iter().find(|l| {
        !round.is_needed(l.ch)
            && l.pos.y > danger_y
            && (l.pos.x - round.player_x).abs() < (config.letter_size + config.player_width) / 2.0
    });
    if let Some(letter) = threat {
        if letter.pos.x >= round.player_x {
            input.left = true;
        } else {
            input.right = true;
        }
        return input;
    }

    let target = round
        .letters
        .iter()
        .filter(|l| round.is_needed(l.ch) && l.pos.y < muzzle_y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let goal_x = match target {
        Some(letter) => {
            let dx = letter.pos.x - round.player_x;
            let blocked = round.letters.iter().any(|l| {
                l.id != letter.id
                    && !round.is_needed(l.ch)
                    && l.pos.y > letter.pos.y
                    && (l.pos.x - round.player_x).abs() < lane
            });
            input.fire = dx.abs() < lane / 2.0 && !blocked;
            letter.pos.x
        }
        None => match round.items.iter().max_by(|a, b| a.pos.y.total_cmp(&b.pos.y)) {
            Some(item) => {
                input.fire = (item.pos.x - round.player_x).abs() < config.item_size / 4.0;
                item.pos.x
            }
            None => return input,
        },
    };

    let dx = goal_x - round.player_x;
    if dx.abs() > config.player_speed / 2.0 {
        input.left = dx < 0.0;
        input.right = dx > 0.0;
    }
    input
}
