//! Colour schemes: the mapping from faces to the opaque colour labels that
//! appear in facelet arrays.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cube::{CENTER_FACELETS, FACELETS},
    moves::Face,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorSchemeError {
    #[error("The colour `{color}` is assigned to more than one face")]
    DuplicateColor { color: String },
    #[error("Facelet {index} has the colour `{color}`, which belongs to no face")]
    UnknownColor { index: usize, color: String },
    #[error("Expected 54 facelets, got {found}")]
    InvalidFaceletCount { found: usize },
}

/// A colour label for each face, indexed by [`Face::index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorSchemeRepr", into = "ColorSchemeRepr")]
pub struct ColorScheme([String; 6]);

#[derive(Debug, Serialize, Deserialize)]
#[allow(non_snake_case)]
struct ColorSchemeRepr {
    U: String,
    R: String,
    F: String,
    D: String,
    L: String,
    B: String,
}

impl TryFrom<ColorSchemeRepr> for ColorScheme {
    type Error = ColorSchemeError;

    fn try_from(value: ColorSchemeRepr) -> Result<Self, Self::Error> {
        ColorScheme::new([value.U, value.R, value.F, value.D, value.L, value.B])
    }
}

impl From<ColorScheme> for ColorSchemeRepr {
    fn from(value: ColorScheme) -> Self {
        let [u, r, f, d, l, b] = value.0;
        ColorSchemeRepr {
            U: u,
            R: r,
            F: f,
            D: d,
            L: l,
            B: b,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::standard()
    }
}

impl ColorScheme {
    /// Creates a scheme from one colour per face, in `URFDLB` order.
    ///
    /// # Errors
    ///
    /// Every face needs its own colour, otherwise stickers could not be told
    /// apart.
    pub fn new(colors: [String; 6]) -> Result<Self, ColorSchemeError> {
        if let Some(color) = colors.iter().duplicates().next() {
            return Err(ColorSchemeError::DuplicateColor {
                color: color.clone(),
            });
        }
        Ok(Self(colors))
    }

    fn from_static(colors: [&str; 6]) -> Self {
        Self(colors.map(str::to_owned))
    }

    /// The WCA colour scheme as hex colours: white up, green front.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_static([
            "#FFFFFF", "#C41E3A", "#009E60", "#FFD500", "#FF5800", "#0046AD",
        ])
    }

    /// Fully saturated primaries with the WCA layout.
    #[must_use]
    pub fn classic() -> Self {
        Self::from_static([
            "#FFFFFF", "#FF0000", "#00FF00", "#FFFF00", "#FFA500", "#0000FF",
        ])
    }

    /// Each face coloured by its own letter, the format two-phase solvers
    /// consume.
    #[must_use]
    pub fn face_letters() -> Self {
        Self(Face::ALL.map(|face| face.letter().to_string()))
    }

    /// Reads the scheme off the six centre stickers of a facelet array.
    ///
    /// # Errors
    ///
    /// Fails if there are not exactly 54 facelets or two centres share a
    /// colour.
    pub fn from_centers<S: AsRef<str>>(facelets: &[S]) -> Result<Self, ColorSchemeError> {
        if facelets.len() != FACELETS {
            return Err(ColorSchemeError::InvalidFaceletCount {
                found: facelets.len(),
            });
        }
        Self::new(CENTER_FACELETS.map(|index| facelets[index].as_ref().to_owned()))
    }

    #[must_use]
    pub fn color(&self, face: Face) -> &str {
        &self.0[face.index()]
    }

    /// The face whose colour is `color`, if any.
    #[must_use]
    pub fn face_of(&self, color: &str) -> Option<Face> {
        Face::ALL.into_iter().find(|&face| self.color(face) == color)
    }
}

/// Converts facelet colours into the 54-character `URFDLB` face-letter
/// string used by external optimal solvers.
///
/// # Errors
///
/// Fails on a wrong facelet count or a colour that `scheme` does not know.
pub fn to_face_letters<S: AsRef<str>>(
    facelets: &[S],
    scheme: &ColorScheme,
) -> Result<String, ColorSchemeError> {
    if facelets.len() != FACELETS {
        return Err(ColorSchemeError::InvalidFaceletCount {
            found: facelets.len(),
        });
    }
    facelets
        .iter()
        .enumerate()
        .map(|(index, color)| {
            scheme
                .face_of(color.as_ref())
                .map(Face::letter)
                .ok_or_else(|| ColorSchemeError::UnknownColor {
                    index,
                    color: color.as_ref().to_owned(),
                })
        })
        .collect()
}
