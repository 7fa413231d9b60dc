//! Cube states in the cubie model, and their conversion to and from the 54
//! stickers.
//!
//! A state is stored as where each corner and edge sits and how it is
//! oriented. Those four arrays pin down every sticker, and the reachable
//! states are exactly the ones whose arrays satisfy the twist, flip and
//! parity rules in [`crate::validate`].
//!
//! The order of the corners and edges is as follows:
//! - Corners: URF UFL ULB UBR DFR DLF DBL DRB
//! - Edges: UR UF UL UB DR DF DL DB FR FL BL BR
//!
//! A corner's orientation counts how far its U/D sticker has been twisted
//! clockwise away from the U/D face. An edge's orientation is one when it is
//! flipped, which only F and B quarter turns do.

use std::array;

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::{
    color_scheme::ColorScheme,
    moves::{Face, Move, MoveSequence},
    validate::{self, ValidationError},
};

pub const CORNERS: usize = 8;
pub const EDGES: usize = 12;
pub const FACELETS: usize = 54;

pub const CORNER_NAMES: [&str; CORNERS] = ["URF", "UFL", "ULB", "UBR", "DFR", "DLF", "DBL", "DRB"];
pub const EDGE_NAMES: [&str; EDGES] = [
    "UR", "UF", "UL", "UB", "DR", "DF", "DL", "DB", "FR", "FL", "BL", "BR",
];

/// The facelet index of each face's centre, indexed by [`Face::index`].
pub const CENTER_FACELETS: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// The facelet indices of the three stickers of every corner position,
/// starting with its U/D sticker and proceeding clockwise.
pub const CORNER_FACELETS: [[usize; 3]; CORNERS] = [
    [8, 9, 20],
    [6, 18, 38],
    [0, 36, 47],
    [2, 45, 11],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];

/// The facelet indices of the two stickers of every edge position.
pub const EDGE_FACELETS: [[usize; 2]; EDGES] = [
    [5, 10],
    [7, 19],
    [3, 37],
    [1, 46],
    [32, 16],
    [28, 25],
    [30, 43],
    [34, 52],
    [23, 12],
    [21, 41],
    [50, 39],
    [48, 14],
];

/// The faces each corner cubie shows when solved, in the same sticker order
/// as [`CORNER_FACELETS`].
const CORNER_COLORS: [[Face; 3]; CORNERS] = {
    use Face::{B, D, F, L, R, U};
    [
        [U, R, F],
        [U, F, L],
        [U, L, B],
        [U, B, R],
        [D, F, R],
        [D, L, F],
        [D, B, L],
        [D, R, B],
    ]
};

const EDGE_COLORS: [[Face; 2]; EDGES] = {
    use Face::{B, D, F, L, R, U};
    [
        [U, R],
        [U, F],
        [U, L],
        [U, B],
        [D, R],
        [D, F],
        [D, L],
        [D, B],
        [F, R],
        [F, L],
        [B, L],
        [B, R],
    ]
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("Expected 54 facelets, got {found}")]
    InvalidFaceletCount { found: usize },
    #[error(
        "Invalid corner at position {position} ({}): its stickers match no corner cubie",
        corner_name(.position)
    )]
    InvalidCorner { position: usize },
    #[error(
        "Invalid edge at position {position} ({}): its stickers match no edge cubie",
        edge_name(.position)
    )]
    InvalidEdge { position: usize },
    #[error("Invalid cubie arrays: {}", .0.iter().join("; "))]
    InvalidCubieArrays(Vec<ValidationError>),
}

fn corner_name(position: &usize) -> &'static str {
    CORNER_NAMES.get(*position).copied().unwrap_or("?")
}

fn edge_name(position: &usize) -> &'static str {
    EDGE_NAMES.get(*position).copied().unwrap_or("?")
}

/// The effect of a clockwise quarter turn of one face on the cubie arrays.
/// Position `i` receives the cubie previously at `cp[i]`, twisted by
/// `co[i]`.
struct CubieTurn {
    cp: [u8; CORNERS],
    co: [u8; CORNERS],
    ep: [u8; EDGES],
    eo: [u8; EDGES],
}

const TURN_U: CubieTurn = CubieTurn {
    cp: [3, 0, 1, 2, 4, 5, 6, 7],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

const TURN_R: CubieTurn = CubieTurn {
    cp: [4, 1, 2, 0, 7, 5, 6, 3],
    co: [2, 0, 0, 1, 1, 0, 0, 2],
    ep: [8, 1, 2, 3, 11, 5, 6, 7, 4, 9, 10, 0],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

const TURN_F: CubieTurn = CubieTurn {
    cp: [1, 5, 2, 3, 0, 4, 6, 7],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [0, 9, 2, 3, 4, 8, 6, 7, 1, 5, 10, 11],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

const TURN_D: CubieTurn = CubieTurn {
    cp: [0, 1, 2, 3, 5, 6, 7, 4],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [0, 1, 2, 3, 5, 6, 7, 4, 8, 9, 10, 11],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

const TURN_L: CubieTurn = CubieTurn {
    cp: [0, 2, 6, 3, 4, 1, 5, 7],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [0, 1, 10, 3, 4, 5, 9, 7, 8, 2, 6, 11],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

const TURN_B: CubieTurn = CubieTurn {
    cp: [0, 1, 3, 7, 4, 5, 2, 6],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [0, 1, 2, 11, 4, 5, 6, 10, 8, 9, 3, 7],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

fn cubie_turn(face: Face) -> &'static CubieTurn {
    match face {
        Face::U => &TURN_U,
        Face::R => &TURN_R,
        Face::F => &TURN_F,
        Face::D => &TURN_D,
        Face::L => &TURN_L,
        Face::B => &TURN_B,
    }
}

/// Parity of a permutation: the number of even-length cycles in its cycle
/// decomposition, modulo two. Entries outside the index domain end a cycle.
pub(crate) fn permutation_parity(perm: &[u8]) -> u8 {
    let mut visited = vec![false; perm.len()];
    let mut parity = 0;
    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }
        let mut cycle_length = 0;
        let mut i = start;
        while i < perm.len() && !visited[i] {
            visited[i] = true;
            i = perm[i] as usize;
            cycle_length += 1;
        }
        if cycle_length % 2 == 0 {
            parity ^= 1;
        }
    }
    parity
}

/// A cube state: the position and orientation of every corner and edge.
///
/// Values are never mutated once handed out: applying a move returns a new
/// state. Equality and hashing are structural over the four arrays.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize)]
pub struct CubeState {
    #[serde(rename = "corner_perm")]
    cp: [u8; CORNERS],
    #[serde(rename = "corner_orient")]
    co: [u8; CORNERS],
    #[serde(rename = "edge_perm")]
    ep: [u8; EDGES],
    #[serde(rename = "edge_orient")]
    eo: [u8; EDGES],
}

impl Default for CubeState {
    fn default() -> CubeState {
        CubeState {
            cp: const {
                let mut arr = [0; CORNERS];
                let mut i = 0;
                while i < CORNERS {
                    arr[i] = i as u8;
                    i += 1;
                }
                arr
            },
            co: [0; CORNERS],
            ep: const {
                let mut arr = [0; EDGES];
                let mut i = 0;
                while i < EDGES {
                    arr[i] = i as u8;
                    i += 1;
                }
                arr
            },
            eo: [0; EDGES],
        }
    }
}

impl CubeState {
    /// The identity state.
    #[must_use]
    pub fn solved() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::default()
    }

    /// Builds a state from raw cubie arrays.
    ///
    /// Lengths, value ranges and that both permutations are bijections are
    /// checked. The orientation sums and parity are not, so an
    /// unreachable state can still be represented and handed to
    /// [`validate::validate_cube_state`].
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::InvalidCubieArrays`] listing every structural
    /// problem found.
    pub fn try_from_arrays(
        corner_perm: &[u8],
        corner_orient: &[u8],
        edge_perm: &[u8],
        edge_orient: &[u8],
    ) -> Result<Self, CubeError> {
        let errors =
            validate::structural_errors(corner_perm, corner_orient, edge_perm, edge_orient);
        match (
            corner_perm.try_into(),
            corner_orient.try_into(),
            edge_perm.try_into(),
            edge_orient.try_into(),
        ) {
            (Ok(cp), Ok(co), Ok(ep), Ok(eo)) if errors.is_empty() => {
                Ok(CubeState { cp, co, ep, eo })
            }
            _ => Err(CubeError::InvalidCubieArrays(errors)),
        }
    }

    #[must_use]
    pub fn corner_perm(&self) -> &[u8; CORNERS] {
        &self.cp
    }

    #[must_use]
    pub fn corner_orient(&self) -> &[u8; CORNERS] {
        &self.co
    }

    #[must_use]
    pub fn edge_perm(&self) -> &[u8; EDGES] {
        &self.ep
    }

    #[must_use]
    pub fn edge_orient(&self) -> &[u8; EDGES] {
        &self.eo
    }

    fn apply_quarter_turn(&self, turn: &CubieTurn) -> Self {
        CubeState {
            cp: array::from_fn(|i| self.cp[turn.cp[i] as usize]),
            co: array::from_fn(|i| (self.co[turn.cp[i] as usize] + turn.co[i]) % 3),
            ep: array::from_fn(|i| self.ep[turn.ep[i] as usize]),
            eo: array::from_fn(|i| (self.eo[turn.ep[i] as usize] + turn.eo[i]) % 2),
        }
    }

    /// The state after turning `move_`. A prime turn is three
    /// quarter turns and a double turn is two.
    #[must_use]
    pub fn apply_move(&self, move_: &Move) -> Self {
        let turn = cubie_turn(move_.acting_face());
        (0..move_.direction().quarter_turns())
            .fold(self.clone(), |acc, _| acc.apply_quarter_turn(turn))
    }

    /// The state after turning every move of `moves` in order.
    #[must_use]
    pub fn apply_sequence(&self, moves: &MoveSequence) -> Self {
        moves
            .iter()
            .fold(self.clone(), |acc, move_| acc.apply_move(move_))
    }

    /// Reads a state off 54 facelet colours.
    ///
    /// Every corner and edge position's stickers are mapped to faces through
    /// `scheme` and matched against each cubie's solved colours up to
    /// rotation (corners) or swap (edges). The matching cubie becomes the
    /// position's permutation entry and the rotation its orientation.
    ///
    /// # Errors
    ///
    /// Fails when the facelet count is wrong, or with the first corner or edge
    /// position whose stickers match no cubie under any rotation.
    pub fn from_facelets<S: AsRef<str>>(
        facelets: &[S],
        scheme: &ColorScheme,
    ) -> Result<Self, CubeError> {
        if facelets.len() != FACELETS {
            return Err(CubeError::InvalidFaceletCount {
                found: facelets.len(),
            });
        }
        let face_at = |index: usize| scheme.face_of(facelets[index].as_ref());

        let mut cp = [0; CORNERS];
        let mut co = [0; CORNERS];
        for (position, stickers) in CORNER_FACELETS.iter().enumerate() {
            let observed = stickers.map(|index| face_at(index));
            let (cubie, twist) = CORNER_COLORS
                .iter()
                .enumerate()
                .find_map(|(cubie, reference)| {
                    (0..3)
                        .find(|twist| {
                            (0..3).all(|n| observed[(n + twist) % 3] == Some(reference[n]))
                        })
                        .map(|twist| (cubie, twist))
                })
                .ok_or(CubeError::InvalidCorner { position })?;
            cp[position] = cubie as u8;
            co[position] = twist as u8;
        }

        let mut ep = [0; EDGES];
        let mut eo = [0; EDGES];
        for (position, stickers) in EDGE_FACELETS.iter().enumerate() {
            let observed = stickers.map(|index| face_at(index));
            let (cubie, flip) = EDGE_COLORS
                .iter()
                .enumerate()
                .find_map(|(cubie, reference)| {
                    (0..2)
                        .find(|flip| {
                            (0..2).all(|n| observed[(n + flip) % 2] == Some(reference[n]))
                        })
                        .map(|flip| (cubie, flip))
                })
                .ok_or(CubeError::InvalidEdge { position })?;
            ep[position] = cubie as u8;
            eo[position] = flip as u8;
        }

        Ok(CubeState { cp, co, ep, eo })
    }

    /// Writes the state out as 54 facelet colours, the inverse of
    /// [`CubeState::from_facelets`]. Centres are taken directly from
    /// `scheme`.
    #[must_use]
    pub fn to_facelets(&self, scheme: &ColorScheme) -> Vec<String> {
        let mut facelets = vec![String::new(); FACELETS];
        for face in Face::ALL {
            facelets[CENTER_FACELETS[face.index()]] = scheme.color(face).to_owned();
        }
        for (position, stickers) in CORNER_FACELETS.iter().enumerate() {
            let reference = CORNER_COLORS[self.cp[position] as usize];
            let twist = self.co[position] as usize;
            for (n, face) in reference.into_iter().enumerate() {
                facelets[stickers[(n + twist) % 3]] = scheme.color(face).to_owned();
            }
        }
        for (position, stickers) in EDGE_FACELETS.iter().enumerate() {
            let reference = EDGE_COLORS[self.ep[position] as usize];
            let flip = self.eo[position] as usize;
            for (n, face) in reference.into_iter().enumerate() {
                facelets[stickers[(n + flip) % 2]] = scheme.color(face).to_owned();
            }
        }
        facelets
    }

    /// The 54-character `URFDLB` face-letter string of this state, the format
    /// external two-phase solvers consume.
    #[must_use]
    pub fn to_facelet_string(&self) -> String {
        self.to_facelets(&ColorScheme::face_letters()).concat()
    }

    /// Parses a 54-character face-letter string.
    ///
    /// # Errors
    ///
    /// See [`CubeState::from_facelets`].
    pub fn from_facelet_string(facelets: &str) -> Result<Self, CubeError> {
        let facelets = facelets.chars().map(String::from).collect_vec();
        Self::from_facelets(&facelets, &ColorScheme::face_letters())
    }

    #[must_use]
    pub fn corner_parity(&self) -> u8 {
        permutation_parity(&self.cp)
    }

    #[must_use]
    pub fn edge_parity(&self) -> u8 {
        permutation_parity(&self.ep)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        moves::{FACE_TURNS, WIDE_TURNS, parse},
        scramble::ScrambleGenerator,
    };

    fn scrambled_states(count: usize) -> Vec<CubeState> {
        let mut generator = ScrambleGenerator::with_seed(0x5eed);
        (0..count)
            .map(|i| CubeState::solved().apply_sequence(&generator.generate(i % 30)))
            .collect()
    }

    fn is_legal(state: &CubeState) -> bool {
        validate::validate_cube_state(state).is_valid()
    }

    #[test]
    fn test_solved() {
        let solved = CubeState::solved();
        assert!(solved.is_solved());
        assert_eq!(solved.corner_perm(), &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(solved.edge_orient(), &[0; EDGES]);
        assert!(!solved.apply_move(&FACE_TURNS[0]).is_solved());
    }

    #[test]
    fn test_quarter_turns_have_order_four() {
        for state in scrambled_states(20) {
            for move_ in FACE_TURNS.iter().chain(WIDE_TURNS.iter()) {
                let four = (0..4).fold(state.clone(), |acc, _| acc.apply_move(move_));
                assert_eq!(four, state, "{move_}");
            }
        }
    }

    #[test]
    fn test_move_inverse_law() {
        for state in scrambled_states(20) {
            for move_ in FACE_TURNS.iter().chain(WIDE_TURNS.iter()) {
                assert_eq!(
                    state.apply_move(move_).apply_move(&move_.inverse()),
                    state,
                    "{move_}"
                );
            }
        }
    }

    #[test]
    fn test_moves_preserve_invariants() {
        for state in scrambled_states(30) {
            assert!(is_legal(&state));
            for move_ in FACE_TURNS.iter().chain(WIDE_TURNS.iter()) {
                assert!(is_legal(&state.apply_move(move_)), "{move_}");
            }
        }
    }

    #[test]
    fn test_sexy_move() {
        let state = CubeState::solved().apply_sequence(&parse("R U R' U'").unwrap());
        assert_eq!(state.corner_perm(), &[4, 1, 3, 2, 0, 5, 6, 7]);
        assert_eq!(state.corner_orient(), &[2, 0, 0, 2, 2, 0, 0, 0]);
        assert_eq!(state.edge_perm(), &[8, 1, 2, 0, 4, 5, 6, 7, 3, 9, 10, 11]);
        assert_eq!(state.edge_orient(), &[0; EDGES]);
        let back = state.apply_sequence(&parse("U R U' R'").unwrap());
        assert!(back.is_solved());
    }

    #[test]
    fn test_only_front_and_back_flip_edges() {
        for face in Face::ALL {
            let state = CubeState::solved().apply_move(&Move::new(face, crate::Direction::Normal));
            let flips = state.edge_orient().iter().filter(|&&flip| flip == 1).count();
            match face {
                Face::F | Face::B => assert_eq!(flips, 4),
                _ => assert_eq!(flips, 0),
            }
        }
    }

    #[test]
    fn test_wide_turns_move_opposite_layer() {
        for (wide, outer) in [("r", "L"), ("l'", "R'"), ("u2", "D2"), ("d", "U"), ("f'", "B'"), ("b", "F")] {
            let wide = CubeState::solved().apply_sequence(&parse(wide).unwrap());
            let outer = CubeState::solved().apply_sequence(&parse(outer).unwrap());
            assert_eq!(wide, outer);
        }
    }

    #[test]
    fn test_facelet_strings() {
        assert_eq!(
            CubeState::solved().to_facelet_string(),
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
        );
        let r = CubeState::solved().apply_sequence(&parse("R").unwrap());
        assert_eq!(
            r.to_facelet_string(),
            "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB"
        );
        let f = CubeState::solved().apply_sequence(&parse("F").unwrap());
        assert_eq!(
            f.to_facelet_string(),
            "UUUUUULLLURRURRURRFFFFFFFFFRRRDDDDDDLLDLLDLLDBBBBBBBBB"
        );
        assert_eq!(
            CubeState::from_facelet_string(&r.to_facelet_string()).unwrap(),
            r
        );
    }

    #[test]
    fn test_facelet_round_trip() {
        for scheme in [
            ColorScheme::standard(),
            ColorScheme::classic(),
            ColorScheme::face_letters(),
        ] {
            for state in scrambled_states(40) {
                let facelets = state.to_facelets(&scheme);
                assert_eq!(facelets.len(), FACELETS);
                assert_eq!(CubeState::from_facelets(&facelets, &scheme).unwrap(), state);
            }
        }
    }

    #[test]
    fn test_from_facelets_errors() {
        let scheme = ColorScheme::standard();
        let mut facelets = CubeState::solved().to_facelets(&scheme);
        assert_eq!(
            CubeState::from_facelets(&facelets[..53], &scheme),
            Err(CubeError::InvalidFaceletCount { found: 53 })
        );

        // URF with two right-coloured stickers
        facelets[8] = scheme.color(Face::R).to_owned();
        assert_eq!(
            CubeState::from_facelets(&facelets, &scheme),
            Err(CubeError::InvalidCorner { position: 0 })
        );

        let mut facelets = CubeState::solved().to_facelets(&scheme);
        // UB with two back-coloured stickers
        facelets[1] = scheme.color(Face::B).to_owned();
        assert_eq!(
            CubeState::from_facelets(&facelets, &scheme),
            Err(CubeError::InvalidEdge { position: 3 })
        );

        let mut facelets = CubeState::solved().to_facelets(&scheme);
        facelets[47] = "#123456".to_owned();
        assert_eq!(
            CubeState::from_facelets(&facelets, &scheme),
            Err(CubeError::InvalidCorner { position: 2 })
        );
    }

    #[test]
    fn test_try_from_arrays() {
        let twisted = CubeState::try_from_arrays(
            &[0, 1, 2, 3, 4, 5, 6, 7],
            &[1, 0, 0, 0, 0, 0, 0, 0],
            &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            &[0; EDGES],
        )
        .unwrap();
        assert!(!twisted.is_solved());
        assert!(!is_legal(&twisted));

        let Err(CubeError::InvalidCubieArrays(errors)) = CubeState::try_from_arrays(
            &[0, 1, 2, 3, 4, 5, 6],
            &[0; CORNERS],
            &[0, 0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
        ) else {
            panic!("malformed arrays were accepted");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_states_hash_structurally() {
        let sequence = parse("R U R' U'").unwrap();
        let mut seen = HashSet::new();
        seen.insert(CubeState::solved());
        seen.insert(CubeState::solved().apply_sequence(&sequence));
        seen.insert(sequence.apply_to(&CubeState::solved()));
        seen.insert(
            CubeState::solved()
                .apply_sequence(&sequence)
                .apply_sequence(&sequence.inverse()),
        );
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_permutation_parity() {
        assert_eq!(permutation_parity(&[0, 1, 2, 3]), 0);
        assert_eq!(permutation_parity(&[1, 0, 2, 3]), 1);
        assert_eq!(permutation_parity(&[1, 2, 0, 3]), 0);
        assert_eq!(permutation_parity(&[1, 2, 3, 0]), 1);
        let u = CubeState::solved().apply_sequence(&parse("U").unwrap());
        assert_eq!(u.corner_parity(), 1);
        assert_eq!(u.edge_parity(), 1);
    }
}
