//! Structural and group-theoretic legality checks over facelet arrays and
//! cubie arrays.
//!
//! Validators never stop at the first problem: every violated condition is
//! collected so a front-end can highlight all of them at once.

use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::{
    color_scheme::{ColorScheme, ColorSchemeError},
    cube::{
        CENTER_FACELETS, CORNER_FACELETS, CORNERS, CubeError, CubeState, EDGE_FACELETS, EDGES,
        FACELETS, permutation_parity,
    },
};

const STICKERS_PER_COLOR: usize = 9;
const COLORS: usize = 6;

/// The group invariants every reachable state satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Invariant {
    /// The corner orientations sum to a multiple of three.
    CornerTwist,
    /// The edge orientations sum to a multiple of two.
    EdgeFlip,
    /// Corner and edge permutations have the same parity.
    PermutationParity,
}

impl Display for Invariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Invariant::CornerTwist => write!(f, "corner twist sum must be divisible by 3"),
            Invariant::EdgeFlip => write!(f, "edge flip sum must be even"),
            Invariant::PermutationParity => {
                write!(f, "corner and edge permutation parities must match")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CubieArray {
    CornerPerm,
    CornerOrient,
    EdgePerm,
    EdgeOrient,
}

impl Display for CubieArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CubieArray::CornerPerm => write!(f, "corner_perm"),
            CubieArray::CornerOrient => write!(f, "corner_orient"),
            CubieArray::EdgePerm => write!(f, "edge_perm"),
            CubieArray::EdgeOrient => write!(f, "edge_orient"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("Expected 54 facelets, got {found}")]
    InvalidFaceletCount { found: usize },
    #[error("Expected exactly 6 different colours, got {distinct}")]
    InvalidColorCount { distinct: usize },
    #[error("Colour `{color}` appears {count} times, expected 9")]
    InvalidColorDistribution { color: String, count: usize },
    #[error("Centre colour `{color}` appears on more than one face")]
    DuplicateCenterColor { color: String },
    #[error("Invalid corner at position {position}")]
    InvalidCorner { position: usize },
    #[error("Invalid edge at position {position}")]
    InvalidEdge { position: usize },
    #[error("{array} must have {expected} elements, got {found}")]
    InvalidLength {
        array: CubieArray,
        expected: usize,
        found: usize,
    },
    #[error("{array}[{index}] has the out of range value {value}")]
    ValueOutOfRange {
        array: CubieArray,
        index: usize,
        value: u8,
    },
    #[error("{array} is not a permutation")]
    NotAPermutation { array: CubieArray },
    #[error("Invariant violated: {0}")]
    InvariantViolation(Invariant),
}

/// The outcome of a validator: legal exactly when no errors were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub errors: Vec<ValidationError>,
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// # Errors
    ///
    /// Returns every collected error when the input was not valid.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn has_invariant_violation(&self, invariant: Invariant) -> bool {
        self.errors
            .contains(&ValidationError::InvariantViolation(invariant))
    }
}

fn check_permutation(
    array: CubieArray,
    perm: &[u8],
    expected: usize,
    errors: &mut Vec<ValidationError>,
) {
    if perm.len() != expected {
        errors.push(ValidationError::InvalidLength {
            array,
            expected,
            found: perm.len(),
        });
        return;
    }
    let out_of_range = errors.len();
    check_range(array, perm, expected, errors);
    if errors.len() == out_of_range && !perm.iter().all_unique() {
        errors.push(ValidationError::NotAPermutation { array });
    }
}

fn check_orientation(
    array: CubieArray,
    orient: &[u8],
    expected: usize,
    modulus: usize,
    errors: &mut Vec<ValidationError>,
) {
    if orient.len() != expected {
        errors.push(ValidationError::InvalidLength {
            array,
            expected,
            found: orient.len(),
        });
        return;
    }
    check_range(array, orient, modulus, errors);
}

fn check_range(array: CubieArray, values: &[u8], bound: usize, errors: &mut Vec<ValidationError>) {
    errors.extend(
        values
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value as usize >= bound)
            .map(|(index, &value)| ValidationError::ValueOutOfRange {
                array,
                index,
                value,
            }),
    );
}

/// Lengths, value ranges and bijectivity of raw cubie arrays.
pub(crate) fn structural_errors(
    corner_perm: &[u8],
    corner_orient: &[u8],
    edge_perm: &[u8],
    edge_orient: &[u8],
) -> Vec<ValidationError> {
    let mut errors = vec![];
    check_permutation(CubieArray::CornerPerm, corner_perm, CORNERS, &mut errors);
    check_orientation(CubieArray::CornerOrient, corner_orient, CORNERS, 3, &mut errors);
    check_permutation(CubieArray::EdgePerm, edge_perm, EDGES, &mut errors);
    check_orientation(CubieArray::EdgeOrient, edge_orient, EDGES, 2, &mut errors);
    errors
}

/// The three group invariants. Parity is only meaningful between two
/// bijections, so it is skipped when either permutation repeats a cubie.
fn invariant_errors(
    corner_perm: &[u8],
    corner_orient: &[u8],
    edge_perm: &[u8],
    edge_orient: &[u8],
) -> Vec<ValidationError> {
    let mut errors = vec![];
    if corner_orient.iter().map(|&twist| u32::from(twist)).sum::<u32>() % 3 != 0 {
        errors.push(ValidationError::InvariantViolation(Invariant::CornerTwist));
    }
    if edge_orient.iter().map(|&flip| u32::from(flip)).sum::<u32>() % 2 != 0 {
        errors.push(ValidationError::InvariantViolation(Invariant::EdgeFlip));
    }
    if corner_perm.iter().all_unique()
        && edge_perm.iter().all_unique()
        && permutation_parity(corner_perm) != permutation_parity(edge_perm)
    {
        errors.push(ValidationError::InvariantViolation(
            Invariant::PermutationParity,
        ));
    }
    errors
}

/// Validates raw cubie arrays, as built programmatically rather than read
/// off facelets. The invariants are only checked once the arrays are
/// structurally sound.
#[must_use]
pub fn validate_cubie_arrays(
    corner_perm: &[u8],
    corner_orient: &[u8],
    edge_perm: &[u8],
    edge_orient: &[u8],
) -> Validation {
    let mut errors = structural_errors(corner_perm, corner_orient, edge_perm, edge_orient);
    if errors.is_empty() {
        errors = invariant_errors(corner_perm, corner_orient, edge_perm, edge_orient);
    }
    Validation { errors }
}

#[must_use]
pub fn validate_cube_state(state: &CubeState) -> Validation {
    validate_cubie_arrays(
        state.corner_perm(),
        state.corner_orient(),
        state.edge_perm(),
        state.edge_orient(),
    )
}

/// Distinct colours in order of first appearance, with their counts.
fn color_counts<S: AsRef<str>>(facelets: &[S]) -> Vec<(String, usize)> {
    let counts = facelets.iter().map(AsRef::as_ref).counts();
    facelets
        .iter()
        .map(AsRef::as_ref)
        .unique()
        .map(|color| (color.to_owned(), counts[color]))
        .collect()
}

fn conversion_errors(error: CubeError) -> Vec<ValidationError> {
    match error {
        CubeError::InvalidCorner { position } => vec![ValidationError::InvalidCorner { position }],
        CubeError::InvalidEdge { position } => vec![ValidationError::InvalidEdge { position }],
        CubeError::InvalidFaceletCount { found } => {
            vec![ValidationError::InvalidFaceletCount { found }]
        }
        CubeError::InvalidCubieArrays(errors) => errors,
    }
}

/// Reads a state off facelets whose centres define the colour scheme.
fn facelets_to_state<S: AsRef<str>>(facelets: &[S]) -> Result<CubeState, Vec<ValidationError>> {
    let scheme = ColorScheme::from_centers(facelets).map_err(|error| match error {
        ColorSchemeError::DuplicateColor { color } => {
            vec![ValidationError::DuplicateCenterColor { color }]
        }
        _ => vec![ValidationError::InvalidFaceletCount {
            found: facelets.len(),
        }],
    })?;
    CubeState::from_facelets(facelets, &scheme).map_err(conversion_errors)
}

/// Validates a facelet array: exactly 54 stickers, six colours of nine
/// stickers each and, when those hold, the group invariants of the state the
/// stickers describe. The colour scheme is read off the centres.
#[must_use]
pub fn validate_facelets<S: AsRef<str>>(facelets: &[S]) -> Validation {
    if facelets.len() != FACELETS {
        return Validation {
            errors: vec![ValidationError::InvalidFaceletCount {
                found: facelets.len(),
            }],
        };
    }

    let mut errors = vec![];
    let counts = color_counts(facelets);
    if counts.len() != COLORS {
        errors.push(ValidationError::InvalidColorCount {
            distinct: counts.len(),
        });
    }
    errors.extend(
        counts
            .into_iter()
            .filter(|&(_, count)| count != STICKERS_PER_COLOR)
            .map(|(color, count)| ValidationError::InvalidColorDistribution { color, count }),
    );
    if !errors.is_empty() {
        return Validation { errors };
    }

    match facelets_to_state(facelets) {
        Ok(state) => {
            let (cp, co, ep, eo) = (
                state.corner_perm(),
                state.corner_orient(),
                state.edge_perm(),
                state.edge_orient(),
            );
            errors.extend(structural_errors(cp, co, ep, eo));
            errors.extend(invariant_errors(cp, co, ep, eo));
        }
        Err(conversion) => errors.extend(conversion),
    }
    Validation { errors }
}

fn corner_stickers() -> impl Iterator<Item = usize> {
    CORNER_FACELETS.into_iter().flatten()
}

fn edge_stickers() -> impl Iterator<Item = usize> {
    EDGE_FACELETS.into_iter().flatten()
}

/// A coarse localisation of what is wrong with a facelet array, for
/// highlighting. Returns sorted sticker indices:
///
/// - every sticker of a colour that does not appear exactly nine times,
/// - every corner sticker if the corners are twisted or repeated, every edge
///   sticker if the edges are flipped or repeated, and both on a parity
///   mismatch,
/// - every non-centre sticker if the stickers describe no state at all.
#[must_use]
pub fn get_problematic_stickers<S: AsRef<str>>(facelets: &[S]) -> Vec<usize> {
    if facelets.len() != FACELETS {
        return (0..facelets.len()).collect();
    }

    let mut problematic = BTreeSet::new();
    let wrong_colors = color_counts(facelets)
        .into_iter()
        .filter(|&(_, count)| count != STICKERS_PER_COLOR)
        .map(|(color, _)| color)
        .collect_vec();
    problematic.extend(
        facelets
            .iter()
            .positions(|color| wrong_colors.iter().any(|wrong| wrong == color.as_ref())),
    );

    match facelets_to_state(facelets) {
        Ok(state) => {
            let validation = Validation {
                errors: invariant_errors(
                    state.corner_perm(),
                    state.corner_orient(),
                    state.edge_perm(),
                    state.edge_orient(),
                ),
            };
            let parity = validation.has_invariant_violation(Invariant::PermutationParity);
            if parity
                || validation.has_invariant_violation(Invariant::CornerTwist)
                || !state.corner_perm().iter().all_unique()
            {
                problematic.extend(corner_stickers());
            }
            if parity
                || validation.has_invariant_violation(Invariant::EdgeFlip)
                || !state.edge_perm().iter().all_unique()
            {
                problematic.extend(edge_stickers());
            }
        }
        Err(_) => {
            problematic.extend((0..FACELETS).filter(|index| !CENTER_FACELETS.contains(index)));
        }
    }

    problematic.into_iter().collect()
}

/// Everything a front-end needs to report on a facelet array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceletReport {
    pub validation: Validation,
    pub problematic_stickers: Vec<usize>,
    /// Distinct colours in order of first appearance.
    pub color_counts: Vec<(String, usize)>,
    pub total_stickers: usize,
}

#[must_use]
pub fn facelet_report<S: AsRef<str>>(facelets: &[S]) -> FaceletReport {
    FaceletReport {
        validation: validate_facelets(facelets),
        problematic_stickers: get_problematic_stickers(facelets),
        color_counts: color_counts(facelets),
        total_stickers: facelets.len(),
    }
}
