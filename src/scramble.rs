//! WCA-style random-move scrambles and named pattern scrambles.

use std::collections::VecDeque;

use itertools::Itertools;
use log::{debug, trace};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::moves::{Direction, Face, Move, MoveSequence, NotationError, parse};

/// The WCA random-move scramble length.
pub const SCRAMBLE_LENGTH: usize = 25;

/// How many recent scrambles a generator remembers.
pub const HISTORY_LIMIT: usize = 100;

/// How many times a generator redraws a scramble it already produced.
const REPEAT_ATTEMPTS: usize = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrambleError {
    #[error("Unknown pattern `{name}`")]
    UnknownPattern { name: String },
    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Well known decorative patterns, each reached from the solved cube by a
/// fixed sequence of outer face turns.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Pattern {
    CubeInCube,
    Superflip,
    FourSpots,
    SixSpots,
    Cross,
    Plus,
    Tetris,
    Anaconda,
}

impl Pattern {
    pub const ALL: [Pattern; 8] = [
        Pattern::CubeInCube,
        Pattern::Superflip,
        Pattern::FourSpots,
        Pattern::SixSpots,
        Pattern::Cross,
        Pattern::Plus,
        Pattern::Tetris,
        Pattern::Anaconda,
    ];

    #[must_use]
    pub fn notation(self) -> &'static str {
        match self {
            Pattern::CubeInCube => "F L F U' R U F2 L2 U' L' B D' B' L2 U",
            Pattern::Superflip => "R U R' F' R U2 R' U' R U' R' F R2 U' R' U2 R U' R'",
            Pattern::FourSpots => "F2 B2 R2 L2 U2 D2",
            Pattern::SixSpots => "U D' R L' F B' U D'",
            Pattern::Cross => "R2 L2 U2 D2 F2 B2",
            Pattern::Plus => "R L' U D' F B'",
            Pattern::Tetris => "L R F B U D L R",
            Pattern::Anaconda => "L U B' U' R L' B R' F B' D R",
        }
    }

    /// # Errors
    ///
    /// Fails only if the pattern's notation does not parse.
    pub fn moves(self) -> Result<MoveSequence, NotationError> {
        parse(self.notation())
    }
}

/// The moves producing the pattern called `name`, such as `"superflip"` or
/// `"Four_Spots"`. Names are matched case-insensitively.
///
/// # Errors
///
/// [`ScrambleError::UnknownPattern`] when no pattern has that name.
pub fn generate_pattern_scramble(name: &str) -> Result<MoveSequence, ScrambleError> {
    let pattern = name
        .trim()
        .parse::<Pattern>()
        .map_err(|_| ScrambleError::UnknownPattern {
            name: name.to_owned(),
        })?;
    Ok(pattern.moves()?)
}

/// Generates scrambles from an explicit random source, so a seeded generator
/// always produces the same scrambles.
///
/// The generator remembers its last [`HISTORY_LIMIT`] scrambles and, unless
/// told otherwise, redraws a scramble that is already among them.
#[derive(Debug, Clone)]
pub struct ScrambleGenerator {
    rng: fastrand::Rng,
    history: VecDeque<MoveSequence>,
}

impl Default for ScrambleGenerator {
    fn default() -> Self {
        Self::new(fastrand::Rng::new())
    }
}

impl ScrambleGenerator {
    #[must_use]
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            rng,
            history: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(fastrand::Rng::with_seed(seed))
    }

    /// Generates a scramble of `length` moves that is not among the recent
    /// ones, see [`ScrambleGenerator::generate_with`].
    pub fn generate(&mut self, length: usize) -> MoveSequence {
        self.generate_with(length, true)
    }

    /// Generates a scramble of `length` moves and remembers it.
    ///
    /// With `avoid_repetition`, a scramble found in the history is redrawn
    /// up to a fixed number of times before a repeat is accepted.
    pub fn generate_with(&mut self, length: usize, avoid_repetition: bool) -> MoveSequence {
        let mut scramble = self.random_moves(length);
        if avoid_repetition {
            let mut attempts = 1;
            while attempts < REPEAT_ATTEMPTS && self.history.contains(&scramble) {
                scramble = self.random_moves(length);
                attempts += 1;
            }
            if self.history.contains(&scramble) {
                debug!("Accepting a repeated scramble after {attempts} attempts");
            }
        }
        self.remember(scramble.clone());
        scramble
    }

    fn remember(&mut self, scramble: MoveSequence) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(scramble);
    }

    /// The remembered scrambles, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &MoveSequence> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Draws `length` outer face turns.
    ///
    /// No move shares a face with the move before it, and a face is never
    /// turned again right after its opposite face when it was turned just
    /// before that (`R L R`), since such a move could have been merged into
    /// an earlier one.
    fn random_moves(&mut self, length: usize) -> MoveSequence {
        let mut scramble = MoveSequence::default();
        let mut last: Option<Face> = None;
        let mut second_last: Option<Face> = None;
        for _ in 0..length {
            let candidates = Face::ALL
                .into_iter()
                .filter(|&face| Some(face) != last)
                .filter(|&face| !(Some(face) == second_last && last == Some(face.opposite())))
                .collect_vec();
            let face = candidates[self.rng.usize(..candidates.len())];
            let dir = Direction::ALL[self.rng.usize(..Direction::ALL.len())];
            trace!("Picked {face}{dir} out of {} faces", candidates.len());
            scramble.push(Move::new(face, dir));
            second_last = last;
            last = Some(face);
        }
        scramble
    }

    /// Generates `count` independent scrambles of `length` moves each.
    pub fn generate_session(&mut self, count: usize, length: usize) -> Vec<MoveSequence> {
        (0..count).map(|_| self.generate(length)).collect()
    }
}

/// Whether `scramble` follows the adjacency rules [`ScrambleGenerator`]
/// obeys: no two neighbouring moves on one face and no `X X' Y` sandwich
/// around an opposite face `X'`. Wide moves are judged by their face letter.
#[must_use]
pub fn is_valid_scramble(scramble: &MoveSequence) -> bool {
    let faces = scramble.iter().map(|move_| move_.face()).collect_vec();
    faces.iter().tuple_windows().all(|(a, b)| a != b)
        && faces
            .iter()
            .tuple_windows()
            .all(|(a, b, c)| !(a == c && *b == a.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scramble_length() {
        let mut generator = ScrambleGenerator::with_seed(1);
        assert_eq!(generator.generate(SCRAMBLE_LENGTH).len(), 25);
        assert_eq!(generator.generate(1).len(), 1);
        assert!(generator.generate(0).is_empty());
    }

    #[test]
    fn test_scrambles_are_legal() {
        let mut generator = ScrambleGenerator::with_seed(0xC0FFEE);
        for _ in 0..200 {
            let scramble = generator.generate(SCRAMBLE_LENGTH);
            assert!(is_valid_scramble(&scramble), "{scramble}");
            assert!(scramble.iter().all(|move_| !move_.is_wide()));
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = ScrambleGenerator::with_seed(42).generate_session(5, 20);
        let b = ScrambleGenerator::with_seed(42).generate_session(5, 20);
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn test_every_face_and_direction_appears() {
        let mut generator = ScrambleGenerator::with_seed(7);
        let moves = generator
            .generate_session(20, SCRAMBLE_LENGTH)
            .into_iter()
            .flat_map(MoveSequence::into_inner)
            .collect_vec();
        for face in Face::ALL {
            for dir in Direction::ALL {
                assert!(moves.contains(&Move::new(face, dir)), "{face}{dir}");
            }
        }
    }

    #[test]
    fn test_recent_scrambles_are_not_repeated() {
        // a single move has only 18 possibilities
        let mut generator = ScrambleGenerator::with_seed(3);
        let scrambles = generator.generate_session(10, 1);
        assert!(scrambles.iter().all_unique());
        assert_eq!(generator.history().count(), 10);
        assert_eq!(generator.history().collect_vec(), scrambles.iter().collect_vec());
    }

    #[test]
    fn test_repetition_allowed() {
        let mut generator = ScrambleGenerator::with_seed(3);
        assert!(generator.generate_with(0, false).is_empty());
        assert!(generator.generate_with(0, false).is_empty());
        // every empty draw repeats, so the generator gives up and accepts it
        assert!(generator.generate(0).is_empty());
        assert_eq!(generator.history().count(), 3);
    }

    #[test]
    fn test_history_limit_and_clear() {
        let mut generator = ScrambleGenerator::with_seed(8);
        let scrambles = generator.generate_session(HISTORY_LIMIT + 20, 5);
        assert_eq!(generator.history().count(), HISTORY_LIMIT);
        assert_eq!(generator.history().next(), Some(&scrambles[20]));
        assert_eq!(generator.history().last(), scrambles.last());
        generator.clear_history();
        assert_eq!(generator.history().count(), 0);
    }

    #[test]
    fn test_pattern_scrambles() {
        for pattern in Pattern::ALL {
            let moves = pattern.moves().unwrap();
            assert!(!moves.is_empty(), "{pattern}");
            assert!(moves.iter().all(|move_| !move_.is_wide()), "{pattern}");
            assert_eq!(generate_pattern_scramble(&pattern.to_string()).unwrap(), moves);
        }
        assert_eq!(
            generate_pattern_scramble("SuperFlip").unwrap().len(),
            Pattern::Superflip.moves().unwrap().len()
        );
        assert_eq!(
            generate_pattern_scramble("four_spots").unwrap(),
            parse("F2 B2 R2 L2 U2 D2").unwrap()
        );
        assert_eq!(Pattern::CubeInCube.to_string(), "cube_in_cube");
        assert_eq!(
            generate_pattern_scramble("checkerboard"),
            Err(ScrambleError::UnknownPattern {
                name: "checkerboard".to_owned()
            })
        );
    }

    #[test]
    fn test_is_valid_scramble() {
        assert!(is_valid_scramble(&parse("").unwrap()));
        assert!(is_valid_scramble(&parse("R").unwrap()));
        assert!(is_valid_scramble(&parse("R U R' F2 L D").unwrap()));
        assert!(is_valid_scramble(&parse("R L U R").unwrap()));
        assert!(!is_valid_scramble(&parse("R R'").unwrap()));
        assert!(!is_valid_scramble(&parse("U R L2 R'").unwrap()));
        assert!(!is_valid_scramble(&parse("r R").unwrap()));
    }
}
