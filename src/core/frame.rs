//! User coordinate frames for marker placement.
//!
//! Internally the map is centred on `(0, 0)` with +x to the right and +y
//! down. Hosts usually describe markers in their own frame, for example a
//! robot map whose origin is the bottom-left corner with +y pointing up.

use crate::core::geo::Point;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Origin {
    /// Origin position in internal coordinates for a map of `size`
    pub fn locate(self, size: Point) -> Point {
        let (w, h) = (size.x / 2.0, size.y / 2.0);
        let (col, row) = match self {
            Origin::TopLeft => (-1.0, -1.0),
            Origin::Top => (0.0, -1.0),
            Origin::TopRight => (1.0, -1.0),
            Origin::Left => (-1.0, 0.0),
            Origin::Center => (0.0, 0.0),
            Origin::Right => (1.0, 0.0),
            Origin::BottomLeft => (-1.0, 1.0),
            Origin::Bottom => (0.0, 1.0),
            Origin::BottomRight => (1.0, 1.0),
        };
        Point::new(col * w, row * h)
    }
}

impl FromStr for Origin {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "top-left" => Origin::TopLeft,
            "top" => Origin::Top,
            "top-right" => Origin::TopRight,
            "left" => Origin::Left,
            "center" => Origin::Center,
            "right" => Origin::Right,
            "bottom-left" => Origin::BottomLeft,
            "bottom" => Origin::Bottom,
            "bottom-right" => Origin::BottomRight,
            other => return Err(MapError::InvalidArgument(other.to_string())),
        })
    }
}

/// Direction of the user's +x axis on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XAxis {
    Left,
    Right,
}

impl FromStr for XAxis {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(XAxis::Left),
            "right" => Ok(XAxis::Right),
            other => Err(MapError::InvalidArgument(other.to_string())),
        }
    }
}

/// Direction of the user's +y axis on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    Top,
    Bottom,
}

impl FromStr for YAxis {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(YAxis::Top),
            "bottom" => Ok(YAxis::Bottom),
            other => Err(MapError::InvalidArgument(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserFrame {
    origin: Point,
    sign: Point,
}

impl UserFrame {
    pub fn new(map_size: Point, origin: Origin, x_axis: XAxis, y_axis: YAxis) -> Self {
        let sign = Point::new(
            match x_axis {
                XAxis::Left => -1.0,
                XAxis::Right => 1.0,
            },
            match y_axis {
                YAxis::Top => -1.0,
                YAxis::Bottom => 1.0,
            },
        );
        Self {
            origin: origin.locate(map_size),
            sign,
        }
    }

    /// Builds a frame from the string names used in host configuration
    pub fn parse(map_size: Point, origin: &str, x_axis: &str, y_axis: &str) -> Result<Self> {
        Ok(Self::new(
            map_size,
            origin.parse()?,
            x_axis.parse()?,
            y_axis.parse()?,
        ))
    }

    pub fn to_internal(&self, user: &Point) -> Point {
        Point::new(user.x * self.sign.x, user.y * self.sign.y).add(&self.origin)
    }

    pub fn to_user(&self, internal: &Point) -> Point {
        let rel = internal.subtract(&self.origin);
        Point::new(rel.x * self.sign.x, rel.y * self.sign.y)
    }
}

impl Default for UserFrame {
    /// Centred frame with the math convention: +x right, +y up
    fn default() -> Self {
        Self::new(Point::zero(), Origin::Center, XAxis::Right, YAxis::Top)
    }
}
