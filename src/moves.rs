//! A module providing the move algebra of the cube: faces, turn
//! directions, the 36-move catalogue and sequences of moves.
//!
//! Moves are written in Singmaster notation. An uppercase face letter turns
//! the outer layer of that face, a lowercase letter turns the outer layer
//! together with the adjacent middle slice (a "wide" turn). A bare letter is
//! a clockwise quarter turn, a trailing `'` is a counter-clockwise quarter
//! turn and a trailing `2` is a half turn.

use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
    str::FromStr,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use thiserror::Error;

use crate::cube::CubeState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid move notation: `{token}`")]
    InvalidNotation { token: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Start index {start} out of range for {len} moves")]
    StartOutOfRange { start: usize, len: usize },
    #[error("End index {end} out of range for start {start} and {len} moves")]
    EndOutOfRange { start: usize, end: usize, len: usize },
}

/// An enum for the faces of the cube, in facelet order.
///
/// - U: top face
/// - R: right face
/// - F: front face
/// - D: bottom face
/// - L: left face
/// - B: back face
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, Debug, Clone, Copy, Serialize, Deserialize,
)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::{B, D, F, L, R, U};
        let v = [U, R, F, D, L, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The face on the other side of the cube's turning axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::R => Face::L,
            Face::L => Face::R,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    /// Parses a notation letter, returning the face and whether the letter
    /// denotes a wide turn.
    fn from_letter(letter: char) -> Option<(Self, bool)> {
        let face = Face::ALL
            .into_iter()
            .find(|face| face.letter() == letter.to_ascii_uppercase())?;
        Some((face, letter.is_ascii_lowercase()))
    }
}

/// How far a face turns: a clockwise quarter turn, a counter-clockwise
/// quarter turn (`Prime`) or a half turn (`Double`).
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Direction {
    Normal,
    Prime,
    Double,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Normal => write!(f, ""),
            Direction::Prime => write!(f, "'"),
            Direction::Double => write!(f, "2"),
        }
    }
}

impl Direction {
    pub const ALL: [Self; 3] = [Direction::Normal, Direction::Prime, Direction::Double];

    /// The number of clockwise quarter turns this direction amounts to.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Direction::Normal => 1,
            Direction::Prime => 3,
            Direction::Double => 2,
        }
    }

    /// The direction equivalent to `turns` clockwise quarter turns, or `None`
    /// when they cancel out.
    #[must_use]
    pub const fn from_quarter_turns(turns: u8) -> Option<Self> {
        match turns % 4 {
            1 => Some(Direction::Normal),
            2 => Some(Direction::Double),
            3 => Some(Direction::Prime),
            _ => None,
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Direction::Normal => Direction::Prime,
            Direction::Prime => Direction::Normal,
            Direction::Double => Direction::Double,
        }
    }
}

/// An instantiation of a certain face equipped with a direction, turning
/// either the outer layer alone or the outer layer and the middle slice.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move {
    face: Face,
    dir: Direction,
    wide: bool,
}

/// Builds a [`Move`] from a face and a direction, usable in `const` items.
///
/// ```
/// use cubist::cube_move;
///
/// let r_prime = cube_move!(R, Prime);
/// let u2_wide = cube_move!(wide U, Double);
/// assert_eq!(r_prime.to_string(), "R'");
/// assert_eq!(u2_wide.to_string(), "u2");
/// ```
#[macro_export]
macro_rules! cube_move {
    (wide $face:ident, $dir:ident) => {
        $crate::moves::Move::new_wide(
            $crate::moves::Face::$face,
            $crate::moves::Direction::$dir,
        )
    };
    ($face:ident, $dir:ident) => {
        $crate::moves::Move::new($crate::moves::Face::$face, $crate::moves::Direction::$dir)
    };
}

impl Move {
    #[must_use]
    pub const fn new(face: Face, dir: Direction) -> Self {
        Self {
            face,
            dir,
            wide: false,
        }
    }

    #[must_use]
    pub const fn new_wide(face: Face, dir: Direction) -> Self {
        Self {
            face,
            dir,
            wide: true,
        }
    }

    #[must_use]
    pub const fn face(self) -> Face {
        self.face
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        self.dir
    }

    #[must_use]
    pub const fn is_wide(self) -> bool {
        self.wide
    }

    /// Quarter turns map to the opposite quarter turn, half turns are their
    /// own inverse.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self {
            face: self.face,
            dir: self.dir.inverse(),
            wide: self.wide,
        }
    }

    /// The face whose outer layer moves relative to the centres.
    ///
    /// Cubie positions are measured against the centres, so a wide turn is
    /// indistinguishable from turning the opposite outer layer the same way
    /// round: `r` and `L` leave every cubie in the same place relative to the
    /// centres.
    pub(crate) const fn acting_face(self) -> Face {
        if self.wide {
            self.face.opposite()
        } else {
            self.face
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = if self.wide {
            self.face.letter().to_ascii_lowercase()
        } else {
            self.face.letter()
        };
        write!(f, "{letter}{}", self.dir)
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || NotationError::InvalidNotation {
            token: token.to_owned(),
        };
        let mut chars = token.chars();
        let (face, wide) = chars
            .next()
            .and_then(Face::from_letter)
            .ok_or_else(invalid)?;
        let dir = match chars.as_str() {
            "" => Direction::Normal,
            "'" => Direction::Prime,
            "2" => Direction::Double,
            _ => return Err(invalid()),
        };
        Ok(Move { face, dir, wide })
    }
}

impl From<Move> for String {
    fn from(move_: Move) -> Self {
        move_.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = NotationError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

/// The 18 outer face turns.
pub const FACE_TURNS: [Move; 18] = [
    cube_move!(U, Normal),
    cube_move!(U, Prime),
    cube_move!(U, Double),
    cube_move!(R, Normal),
    cube_move!(R, Prime),
    cube_move!(R, Double),
    cube_move!(F, Normal),
    cube_move!(F, Prime),
    cube_move!(F, Double),
    cube_move!(D, Normal),
    cube_move!(D, Prime),
    cube_move!(D, Double),
    cube_move!(L, Normal),
    cube_move!(L, Prime),
    cube_move!(L, Double),
    cube_move!(B, Normal),
    cube_move!(B, Prime),
    cube_move!(B, Double),
];

/// The 18 wide turns.
pub const WIDE_TURNS: [Move; 18] = [
    cube_move!(wide U, Normal),
    cube_move!(wide U, Prime),
    cube_move!(wide U, Double),
    cube_move!(wide R, Normal),
    cube_move!(wide R, Prime),
    cube_move!(wide R, Double),
    cube_move!(wide F, Normal),
    cube_move!(wide F, Prime),
    cube_move!(wide F, Double),
    cube_move!(wide D, Normal),
    cube_move!(wide D, Prime),
    cube_move!(wide D, Double),
    cube_move!(wide L, Normal),
    cube_move!(wide L, Prime),
    cube_move!(wide L, Double),
    cube_move!(wide B, Normal),
    cube_move!(wide B, Prime),
    cube_move!(wide B, Double),
];

/// Splits `text` on whitespace and parses every token as a move.
///
/// # Errors
///
/// Fails with [`NotationError::InvalidNotation`] naming the first token that
/// is not in the notation table.
pub fn parse(text: &str) -> Result<MoveSequence, NotationError> {
    text.split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<_>, _>>()
        .map(MoveSequence)
}

/// An ordered list of moves, such as a scramble or a solution. Serialized
/// as its space separated notation.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MoveSequence(Vec<Move>);

/// Turn counts of a sequence, as consumed by statistics and export.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveMetrics {
    pub total: usize,
    pub quarter_turns: usize,
    pub half_turns: usize,
    /// Indexed by [`Face::index`].
    pub per_face: [usize; 6],
}

impl MoveMetrics {
    #[must_use]
    pub fn count_for(&self, face: Face) -> usize {
        self.per_face[face.index()]
    }
}

/// How much shorter a sequence gets when adjacent turns are merged, and
/// which faces dominate it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Efficiency {
    pub total_moves: usize,
    pub simplified_moves: usize,
    /// `total_moves / simplified_moves`, and 1 for an empty sequence.
    pub efficiency_score: f64,
    /// Faces turned in more than 30% of the moves, in `URFDLB` order.
    pub heavy_faces: Vec<Face>,
    pub move_distribution: MoveMetrics,
}

impl Efficiency {
    #[must_use]
    pub fn can_simplify(&self) -> bool {
        self.simplified_moves < self.total_moves
    }
}

/// The widest line [`MoveSequence::format_lines`] produces by default.
pub const LINE_LENGTH: usize = 80;
/// The most moves [`MoveSequence::format_lines`] puts on a line by default.
pub const MOVES_PER_LINE: usize = 15;

impl MoveSequence {
    #[must_use]
    pub fn new(moves: Vec<Move>) -> Self {
        Self(moves)
    }

    /// Concatenates several sequences into one.
    pub fn concat<'a>(sequences: impl IntoIterator<Item = &'a MoveSequence>) -> Self {
        sequences
            .into_iter()
            .flat_map(|sequence| sequence.iter().copied())
            .collect()
    }

    /// The sequence that undoes this one: reversed, with every move
    /// inverted.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.iter().rev().map(|move_| move_.inverse()).collect()
    }

    /// Coalesces every maximal run of adjacent moves on the same face by
    /// summing their quarter turns modulo four. A run that sums to zero is
    /// dropped.
    ///
    /// Wide and outer turns of a face belong to the same run, and the
    /// merged move keeps the wideness of the run's first move. Only
    /// literally adjacent moves are merged, so `R L R` is left as is.
    #[must_use]
    pub fn simplify(&self) -> Self {
        let mut simplified = vec![];
        let runs = self.iter().chunk_by(|move_| move_.face());
        for (face, mut run) in &runs {
            let Some(first) = run.next() else {
                continue;
            };
            let turns = run.fold(first.direction().quarter_turns(), |turns, move_| {
                (turns + move_.direction().quarter_turns()) % 4
            });
            if let Some(dir) = Direction::from_quarter_turns(turns) {
                simplified.push(Move {
                    face,
                    dir,
                    wide: first.is_wide(),
                });
            }
        }
        MoveSequence(simplified)
    }

    /// Applies every move of the sequence, in order, to `state`.
    #[must_use]
    pub fn apply_to(&self, state: &CubeState) -> CubeState {
        state.apply_sequence(self)
    }

    #[must_use]
    pub fn metrics(&self) -> MoveMetrics {
        self.iter().fold(
            MoveMetrics {
                total: self.len(),
                ..Default::default()
            },
            |mut metrics, move_| {
                if move_.direction() == Direction::Double {
                    metrics.half_turns += 1;
                } else {
                    metrics.quarter_turns += 1;
                }
                metrics.per_face[move_.face().index()] += 1;
                metrics
            },
        )
    }

    /// Breaks the notation into lines of at most `moves_per_line` moves and
    /// `line_length` characters. A single move longer than `line_length`
    /// still gets a line of its own.
    #[must_use]
    pub fn format_lines(&self, line_length: usize, moves_per_line: usize) -> String {
        let mut lines = vec![];
        let mut line: Vec<String> = vec![];
        let mut width = 0;
        for token in self.iter().map(ToString::to_string) {
            let separator = usize::from(!line.is_empty());
            if !line.is_empty()
                && (line.len() >= moves_per_line || width + separator + token.len() > line_length)
            {
                lines.push(line.join(" "));
                line.clear();
                width = 0;
            }
            width += usize::from(!line.is_empty()) + token.len();
            line.push(token);
        }
        if !line.is_empty() {
            lines.push(line.join(" "));
        }
        lines.join("\n")
    }

    /// Every index at which `pattern` starts, overlapping matches included.
    /// An empty pattern matches nowhere.
    #[must_use]
    pub fn find_pattern(&self, pattern: &[Move]) -> Vec<usize> {
        if pattern.is_empty() || pattern.len() > self.len() {
            return vec![];
        }
        self.windows(pattern.len())
            .positions(|window| window == pattern)
            .collect()
    }

    /// Replaces the occurrences of `pattern`, scanning left to right without
    /// overlap. An empty pattern leaves the sequence unchanged.
    #[must_use]
    pub fn replace_pattern(&self, pattern: &[Move], replacement: &[Move]) -> Self {
        if pattern.is_empty() {
            return self.clone();
        }
        let mut replaced = vec![];
        let mut rest = self.as_slice();
        while let Some((&first, tail)) = rest.split_first() {
            if rest.starts_with(pattern) {
                replaced.extend_from_slice(replacement);
                rest = &rest[pattern.len()..];
            } else {
                replaced.push(first);
                rest = tail;
            }
        }
        MoveSequence(replaced)
    }

    /// The moves from `start` up to `end`, or to the end of the sequence
    /// when `end` is `None`.
    ///
    /// # Errors
    ///
    /// [`RangeError::StartOutOfRange`] unless `start` indexes a move, and
    /// [`RangeError::EndOutOfRange`] when `end` lies before `start` or past
    /// the last move.
    pub fn subsequence(&self, start: usize, end: Option<usize>) -> Result<Self, RangeError> {
        let len = self.len();
        if start >= len {
            return Err(RangeError::StartOutOfRange { start, len });
        }
        let end = end.unwrap_or(len);
        if end < start || end > len {
            return Err(RangeError::EndOutOfRange { start, end, len });
        }
        Ok(MoveSequence(self[start..end].to_vec()))
    }

    #[must_use]
    pub fn efficiency(&self) -> Efficiency {
        let metrics = self.metrics();
        let simplified_moves = self.simplify().len();
        #[allow(clippy::cast_precision_loss)]
        let efficiency_score = if self.is_empty() {
            1.0
        } else {
            self.len() as f64 / simplified_moves.max(1) as f64
        };
        let heavy_faces = Face::ALL
            .into_iter()
            .filter(|&face| metrics.count_for(face) * 10 > self.len() * 3)
            .collect();
        Efficiency {
            total_moves: self.len(),
            simplified_moves,
            efficiency_score,
            heavy_faces,
            move_distribution: metrics,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Move> {
        self.0
    }
}

impl Display for MoveSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iter().join(" "))
    }
}

impl FromStr for MoveSequence {
    type Err = NotationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

impl From<MoveSequence> for String {
    fn from(sequence: MoveSequence) -> Self {
        sequence.to_string()
    }
}

impl TryFrom<String> for MoveSequence {
    type Error = NotationError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        parse(&text)
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for MoveSequence {
    type Target = Vec<Move>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveSequence {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_token() {
        for move_ in FACE_TURNS.iter().chain(WIDE_TURNS.iter()) {
            let token = move_.to_string();
            assert_eq!(token.parse::<Move>().unwrap(), *move_);
        }
        assert_eq!(parse("  R   U'\tF2\n r ").unwrap().len(), 4);
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_names_offending_token() {
        assert_eq!(
            parse("R U X' F").unwrap_err(),
            NotationError::InvalidNotation {
                token: "X'".to_owned()
            }
        );
        for bad in ["R3", "R'2", "R''", "M", "2R", "Rw"] {
            assert_eq!(
                parse(bad).unwrap_err(),
                NotationError::InvalidNotation {
                    token: bad.to_owned()
                }
            );
        }
    }

    #[test]
    fn test_wide_notation() {
        let r = "r'".parse::<Move>().unwrap();
        assert!(r.is_wide());
        assert_eq!(r.face(), Face::R);
        assert_eq!(r.direction(), Direction::Prime);
        assert_eq!(r.acting_face(), Face::L);
        assert_eq!(cube_move!(R, Prime).acting_face(), Face::R);
    }

    #[test]
    fn test_move_inverse() {
        assert_eq!(cube_move!(R, Normal).inverse(), cube_move!(R, Prime));
        assert_eq!(cube_move!(R, Prime).inverse(), cube_move!(R, Normal));
        assert_eq!(cube_move!(R, Double).inverse(), cube_move!(R, Double));
        assert_eq!(cube_move!(wide F, Normal).inverse().to_string(), "f'");
        for move_ in FACE_TURNS.iter().chain(WIDE_TURNS.iter()) {
            assert_eq!(move_.inverse().inverse(), *move_);
        }
    }

    #[test]
    fn test_sequence_inverse() {
        assert_eq!(
            parse("R U R' U'").unwrap().inverse(),
            parse("U R U' R'").unwrap()
        );
        assert_eq!(parse("F2 d").unwrap().inverse().to_string(), "d' F2");
    }

    #[test]
    fn test_simplify() {
        assert!(parse("R R R R").unwrap().simplify().is_empty());
        assert_eq!(parse("R R R").unwrap().simplify(), parse("R'").unwrap());
        assert_eq!(parse("R R").unwrap().simplify(), parse("R2").unwrap());
        assert!(parse("R R'").unwrap().simplify().is_empty());
        assert_eq!(
            parse("U R R2 R F").unwrap().simplify(),
            parse("U F").unwrap()
        );
        assert_eq!(
            parse("R L R").unwrap().simplify(),
            parse("R L R").unwrap()
        );
        assert_eq!(parse("r R").unwrap().simplify(), parse("r2").unwrap());
        assert_eq!(parse("F2 F' U").unwrap().simplify(), parse("F U").unwrap());
        assert!(MoveSequence::default().simplify().is_empty());
    }

    #[test]
    fn test_display() {
        let sequence = parse("R U' F2 l b2").unwrap();
        assert_eq!(sequence.to_string(), "R U' F2 l b2");
        assert_eq!(sequence.to_string().parse::<MoveSequence>().unwrap(), sequence);
        assert_eq!(Face::B.to_string(), "B");
        assert_eq!("D".parse::<Face>().unwrap(), Face::D);
    }

    #[test]
    fn test_metrics() {
        let metrics = parse("R U R' U' R2 r").unwrap().metrics();
        assert_eq!(metrics.total, 6);
        assert_eq!(metrics.half_turns, 1);
        assert_eq!(metrics.quarter_turns, 5);
        assert_eq!(metrics.count_for(Face::R), 4);
        assert_eq!(metrics.count_for(Face::U), 2);
        assert_eq!(metrics.count_for(Face::B), 0);
    }

    #[test]
    fn test_concat() {
        let joined = MoveSequence::concat([&parse("R U").unwrap(), &parse("F").unwrap()]);
        assert_eq!(joined, parse("R U F").unwrap());
    }

    #[test]
    fn test_opposite_faces() {
        for face in Face::ALL {
            assert_ne!(face.opposite(), face);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn test_format_lines() {
        assert_eq!(MoveSequence::default().format_lines(LINE_LENGTH, MOVES_PER_LINE), "");
        let sequence = parse("R U R' U' F2 D").unwrap();
        assert_eq!(
            sequence.format_lines(LINE_LENGTH, MOVES_PER_LINE),
            "R U R' U' F2 D"
        );
        assert_eq!(sequence.format_lines(80, 4), "R U R' U'\nF2 D");
        // "R U R'" is six characters wide
        assert_eq!(sequence.format_lines(6, 15), "R U R'\nU' F2\nD");
        assert_eq!(sequence.format_lines(1, 15), "R\nU\nR'\nU'\nF2\nD");
    }

    #[test]
    fn test_find_pattern() {
        let sequence = parse("R U R U R U'").unwrap();
        assert_eq!(sequence.find_pattern(&parse("R U").unwrap()), vec![0, 2]);
        assert_eq!(sequence.find_pattern(&parse("U R U").unwrap()), vec![1]);
        assert_eq!(sequence.find_pattern(&parse("R U R").unwrap()), vec![0, 2]);
        assert_eq!(sequence.find_pattern(&parse("R").unwrap()), vec![0, 2, 4]);
        assert!(sequence.find_pattern(&parse("F").unwrap()).is_empty());
        assert!(sequence.find_pattern(&[]).is_empty());
        assert!(parse("R").unwrap().find_pattern(&parse("R U").unwrap()).is_empty());
    }

    #[test]
    fn test_replace_pattern() {
        let sequence = parse("R U R U R").unwrap();
        assert_eq!(
            sequence.replace_pattern(&parse("R U R").unwrap(), &parse("F").unwrap()),
            parse("F U R").unwrap()
        );
        assert_eq!(
            sequence.replace_pattern(&parse("U").unwrap(), &[]),
            parse("R R R").unwrap()
        );
        assert_eq!(sequence.replace_pattern(&[], &parse("F").unwrap()), sequence);
    }

    #[test]
    fn test_subsequence() {
        let sequence = parse("R U F D L").unwrap();
        assert_eq!(sequence.subsequence(1, Some(3)).unwrap(), parse("U F").unwrap());
        assert_eq!(sequence.subsequence(3, None).unwrap(), parse("D L").unwrap());
        assert!(sequence.subsequence(2, Some(2)).unwrap().is_empty());
        assert_eq!(
            sequence.subsequence(5, None),
            Err(RangeError::StartOutOfRange { start: 5, len: 5 })
        );
        assert_eq!(
            sequence.subsequence(3, Some(2)),
            Err(RangeError::EndOutOfRange {
                start: 3,
                end: 2,
                len: 5
            })
        );
        assert_eq!(
            sequence.subsequence(0, Some(6)),
            Err(RangeError::EndOutOfRange {
                start: 0,
                end: 6,
                len: 5
            })
        );
        assert!(MoveSequence::default().subsequence(0, None).is_err());
    }

    #[test]
    fn test_efficiency() {
        let empty = MoveSequence::default().efficiency();
        assert_eq!(empty.total_moves, 0);
        assert!((empty.efficiency_score - 1.0).abs() < f64::EPSILON);
        assert!(!empty.can_simplify());
        assert!(empty.heavy_faces.is_empty());

        let efficiency = parse("R R U U' F").unwrap().efficiency();
        assert_eq!(efficiency.total_moves, 5);
        assert_eq!(efficiency.simplified_moves, 2);
        assert!(efficiency.can_simplify());
        assert!((efficiency.efficiency_score - 2.5).abs() < f64::EPSILON);
        assert_eq!(efficiency.heavy_faces, vec![Face::R, Face::U]);
        assert_eq!(efficiency.move_distribution.count_for(Face::F), 1);

        let efficiency = parse("R U F D L B").unwrap().efficiency();
        assert!(!efficiency.can_simplify());
        assert!(efficiency.heavy_faces.is_empty());
    }
}
