// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Structural equality over document trees

use serde_json::{Number, Value};

/// Deep structural equality.
///
/// Maps are equal when they hold the same key set and every value is
/// recursively equal (key order is ignored). Sequences are equal when they
/// have the same length and are pairwise equal. Numbers compare by value,
/// so `1` and `1.0` are the same element; two integers compare exactly.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| deep_equal(xv, yv)))
        }
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if x.is_f64() || y.is_f64() {
        return match (x.as_f64(), y.as_f64()) {
            (Some(fx), Some(fy)) => fx == fy,
            _ => false,
        };
    }
    // Both integers: compare exactly, never through f64.
    match (x.as_i64(), y.as_i64()) {
        (Some(ix), Some(iy)) => ix == iy,
        _ => x.as_u64().is_some() && x.as_u64() == y.as_u64(),
    }
}

/// Keep the first occurrence of each element, in order.
pub fn dedup(items: Vec<Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.iter().any(|seen| deep_equal(seen, &item)) {
            unique.push(item);
        }
    }
    unique
}
