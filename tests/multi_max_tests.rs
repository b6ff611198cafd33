// Multi-max search behavior: outcome scoring across turns and the
// directions the tree actually picks in forced situations.

use temporal_snake::fixture::BoardBuilder;
use temporal_snake::multi_max::{best_direction, search, DecisionNode};
use temporal_snake::score::{pack_to_bits, Outcome};
use temporal_snake::simulation::BoardState;
use temporal_snake::types::Direction::{Down, Left, Right, Up};

fn two_snake_state() -> BoardState {
    let board = BoardBuilder::new(
        "
        .v...
        .>b..
        ...av
        ...^<
        ",
        &[('a', 50), ('b', 49)],
    )
    .to_board();
    BoardState::from_board(&board, 10)
}

#[test]
fn outcome_captures_the_current_turn() {
    let state = two_snake_state();
    let outcome = Outcome::of(&state);

    assert_eq!(outcome.health(0), 50);
    assert_eq!(outcome.health(1), 49);
    assert_eq!(outcome.num_dead(), 0);
    assert_eq!(outcome.length(0), 4);
    assert_eq!(outcome.length(1), 3);
}

#[test]
fn evaluation_advances_with_the_simulation() {
    let mut state = two_snake_state();

    let res1 = Outcome::of(&state);
    assert_eq!(res1.evaluate(0), pack_to_bits(&[0, 0, 4, 50]));
    assert_eq!(res1.evaluate(1), pack_to_bits(&[0, 0, 3, 49]));

    state.apply_turn(&[Some(Left), Some(Up)]);
    let res2 = Outcome::of(&state);
    assert_eq!(res2.evaluate(0), pack_to_bits(&[1, 0, 4, 49]));
    assert_eq!(res2.evaluate(1), pack_to_bits(&[1, 0, 3, 48]));

    state.apply_turn(&[Some(Left), Some(Right)]);
    let res3 = Outcome::of(&state);
    assert_eq!(res3.evaluate(0), pack_to_bits(&[2, 0, 4, 48]));
    assert_eq!(res3.evaluate(1), pack_to_bits(&[2, 0, 3, 47]));
}

#[test]
fn reduce_prefers_each_snakes_own_interest() {
    let mut state = two_snake_state();

    // Both snakes live
    state.apply_turn(&[Some(Up), Some(Up)]);
    let both_live = Outcome::of(&state);
    state.undo_turn();

    // b walks into a head to head against the longer a and dies
    state.apply_turn(&[Some(Up), Some(Right)]);
    let b_dies = Outcome::of(&state);
    state.undo_turn();

    assert_eq!(both_live.evaluate(0), pack_to_bits(&[1, 0, 4, 49]));
    assert_eq!(both_live.evaluate(1), pack_to_bits(&[1, 0, 3, 48]));
    assert_eq!(b_dies.evaluate(0), pack_to_bits(&[1, 1, 4, 49]));
    assert_eq!(b_dies.evaluate(1), pack_to_bits(&[0, 1, 3, 0]));

    let outcomes = vec![both_live.clone(), b_dies.clone()];
    assert_eq!(Outcome::reduce(&outcomes, 0), &b_dies);
    assert_eq!(Outcome::reduce(&outcomes, 1), &both_live);
}

#[test]
fn corridor_snake_keeps_going_forward() {
    let board = BoardBuilder::new(">>>a....", &[('a', 100)]).to_board();
    let best = best_direction(&board, "a_id", 4);
    assert_eq!(best, Some(Right), "snake should go right in the corridor");
}

#[test]
fn doomed_corridor_snake_still_maximizes_turns_alive() {
    // Search deeper than the corridor is long: death is certain, the snake
    // should still take the line that survives longest.
    let board = BoardBuilder::new(">>>a....", &[('a', 100)]).to_board();
    let best = best_direction(&board, "a_id", 8);
    assert_eq!(best, Some(Right));
}

#[test]
fn search_resolves_the_root_choice_and_restores_the_board() {
    let board = BoardBuilder::new(">>>a....", &[('a', 100)]).to_board();
    let mut state = BoardState::prioritized(&board, "a_id", 2);

    let root = search(&mut state, 2);
    assert_eq!(state.turn(), 0, "search must leave the board where it found it");
    assert_eq!(root.best(), Some(Right));
    assert_eq!(root.outcome().turns_alive(0), 2);

    match root {
        DecisionNode::Choice { snake, turn, .. } => {
            assert_eq!(snake, 0);
            assert_eq!(turn, 0);
        }
        DecisionNode::Leaf(_) => panic!("a living snake's root is a choice"),
    }
}

#[test]
fn starving_snake_moves_onto_food() {
    let board = BoardBuilder::new(
        "
        .....
        .>>a.
        ...*.
        ",
        &[('a', 1)],
    )
    .to_board();
    let best = best_direction(&board, "a_id", 3);
    assert_eq!(best, Some(Down), "snake should move down to eat");
}

#[test]
fn starvation_avoidance_holds_at_depth_two() {
    let board = BoardBuilder::new(
        "
        .....
        .>>a.
        ...*.
        ",
        &[('a', 1)],
    )
    .to_board();
    assert_eq!(best_direction(&board, "a_id", 2), Some(Down));
}

#[test]
fn controlled_snake_need_not_be_first_on_the_wire() {
    let board = BoardBuilder::new(
        "
        .....
        .>>a.
        b..*.
        ",
        &[('a', 1), ('b', 90)],
    )
    .to_board();
    // b in the corner: down and left leave the board, up and right tie on
    // score, and ties keep the canonical order
    assert_eq!(best_direction(&board, "b_id", 2), Some(Up));
    // a still finds its food with b on the board
    assert_eq!(best_direction(&board, "a_id", 2), Some(Down));
}

#[test]
fn avoids_losing_head_to_head_when_an_exit_exists() {
    // a (length 2) and c (length 3) both stand one step from the same empty
    // cell; walking up into it risks a head to head a cannot win.
    let board = BoardBuilder::new(
        "
        .......
        ..c<<..
        .......
        ..a<...
        .......
        ",
        &[('a', 80), ('c', 80)],
    )
    .to_board();
    let best = best_direction(&board, "a_id", 2);
    assert_ne!(best, Some(Up), "walking at the longer head risks a loss");
}
