// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Polyline coordinate codec.
//!
//! The NVR configuration stores each polygon as a flat comma-separated list
//! of fractional coordinates, `x0,y0,x1,y1,...`, relative to the camera's
//! detect resolution. In memory we work with integer pixel points.

use crate::models::polygon::{Point, Polygon};
use crate::util::geometry::{denormalize_coordinate, normalize_coordinate};
use thiserror::Error;

/// A persisted polyline that is present but cannot be read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("invalid coordinate '{value}' at position {position}")]
    InvalidNumber { position: usize, value: String },

    #[error("coordinate {value} at position {position} is outside 0..1")]
    OutOfRange { position: usize, value: f64 },

    #[error("odd number of coordinates ({count}); expected x,y pairs")]
    OddCount { count: usize },
}

/// Parse a normalized polyline into pixel points.
///
/// Returns `Ok(None)` when the input is empty, meaning no polygon is
/// configured for the slot.
pub fn decode(polyline: &str, width: u32, height: u32) -> Result<Option<Polygon>, CodecError> {
    if polyline.trim().is_empty() {
        return Ok(None);
    }

    let values = polyline
        .split(',')
        .enumerate()
        .map(|(position, piece)| {
            let piece = piece.trim();
            piece
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CodecError::InvalidNumber {
                    position,
                    value: piece.to_string(),
                })
        })
        .collect::<Result<Vec<f64>, CodecError>>()?;
    if let Some((position, &value)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !(0.0..=1.0).contains(*v))
    {
        return Err(CodecError::OutOfRange { position, value });
    }

    if values.len() % 2 != 0 {
        return Err(CodecError::OddCount { count: values.len() });
    }

    let points = values
        .chunks_exact(2)
        .map(|pair| {
            Point::new(
                denormalize_coordinate(pair[0], width),
                denormalize_coordinate(pair[1], height),
            )
        })
        .collect();
    Ok(Some(Polygon::new(points)))
}

/// Decode an optional slot, as read from configuration.
pub fn decode_opt(polyline: Option<&str>, width: u32, height: u32) -> Result<Option<Polygon>, CodecError> {
    match polyline {
        Some(polyline) => decode(polyline, width, height),
        None => Ok(None),
    }
}

/// Encode pixel points as normalized fractions with three decimals.
pub fn encode_normalized(polygon: &Polygon, width: u32, height: u32) -> String {
    polygon
        .points()
        .iter()
        .map(|p| {
            format!(
                "{:.3},{:.3}",
                normalize_coordinate(p.x, width),
                normalize_coordinate(p.y, height)
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Encode raw integer coordinates, for echoing on-canvas positions.
pub fn encode_pixels(polygon: &Polygon) -> String {
    polygon
        .points()
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(",")
}
