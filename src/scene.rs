//! Test scene helpers: seeded random triangle soups and the plain-text `.tri` format.
//!
//! A `.tri` file holds one triangle per line as nine whitespace separated floats
//! (`x0 y0 z0 x1 y1 z1 x2 y2 z2`). It may start with a line holding only the
//! triangle count, in which case reading stops after that many triangles.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use glam::Vec3A;
use rand::Rng;

use crate::{SceneError, Triangle};

/// A small random triangle inside `[-5, 5)^3`, with edges shorter than one unit per axis.
/// The generator is passed in, so scenes are reproducible from a seeded RNG.
#[inline]
pub fn random_triangle<R: Rng + ?Sized>(rng: &mut R) -> Triangle {
    let v0 = rng.gen::<Vec3A>() * 9.0 - Vec3A::splat(5.0);
    let v1 = v0 + rng.gen::<Vec3A>();
    let v2 = v0 + rng.gen::<Vec3A>();
    Triangle::new(v0, v1, v2)
}

pub fn random_triangles<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Triangle> {
    (0..count).map(|_| random_triangle(rng)).collect()
}

pub fn load_tri<P: AsRef<Path>>(path: P) -> Result<Vec<Triangle>, SceneError> {
    let file = File::open(path)?;
    read_tri(BufReader::new(file))
}

pub fn read_tri<R: BufRead>(reader: R) -> Result<Vec<Triangle>, SceneError> {
    let mut triangles = Vec::new();
    let mut expected: Option<usize> = None;
    let mut seen_content = false;
    let mut last_line = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        last_line = line_number;
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if !seen_content {
            seen_content = true;
            if let [count] = tokens.as_slice() {
                let count = count.parse::<usize>().map_err(|_| SceneError::Parse {
                    line: line_number,
                    reason: format!("invalid triangle count {count:?}"),
                })?;
                triangles.reserve(count);
                expected = Some(count);
                continue;
            }
        }

        if expected.is_some_and(|count| triangles.len() >= count) {
            break;
        }

        triangles.push(parse_triangle(&tokens, line_number)?);
    }

    match expected {
        Some(count) if triangles.len() < count => Err(SceneError::Parse {
            line: last_line,
            reason: format!("expected {count} triangles, found {}", triangles.len()),
        }),
        _ => Ok(triangles),
    }
}

fn parse_triangle(tokens: &[&str], line: usize) -> Result<Triangle, SceneError> {
    if tokens.len() != 9 {
        return Err(SceneError::Parse {
            line,
            reason: format!("expected 9 values, found {}", tokens.len()),
        });
    }

    let mut values = [0.0_f32; 9];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = token.parse().map_err(|_| SceneError::Parse {
            line,
            reason: format!("invalid number {token:?}"),
        })?;
    }

    Ok(Triangle::new(
        Vec3A::new(values[0], values[1], values[2]),
        Vec3A::new(values[3], values[4], values[5]),
        Vec3A::new(values[6], values[7], values[8]),
    ))
}
