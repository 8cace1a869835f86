// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage basics.
//!
//! Place a sprite, turn it, compare fast and exact bounds, and commit damage.
//!
//! Run:
//! - `cargo run -p footlight_demos --example stage_basics`

use footlight_demos::{bitmap_costume, disc, init_logging};
use footlight_stage::{RotationStyle, SpriteProps, Stage};
use kurbo::Point;

fn main() {
    init_logging();

    let mut stage = Stage::default();
    let ball = bitmap_costume(stage.source_mut(), 1, disc(16), 16.0, 16.0);
    let id = stage.insert_sprite(SpriteProps {
        x: 40.0,
        y: -20.0,
        costume: Some(ball),
        ..SpriteProps::default()
    });
    let _ = stage.commit();

    for direction in [90.0, 135.0, -45.0] {
        stage.set_direction(id, direction);
        let fast = stage.fast_bounds(id).unwrap();
        let exact = stage.exact_bounds(id).unwrap();
        println!("direction {direction:>6}: fast {fast:?}");
        println!("                  exact {exact:?}");
        assert!(fast.contains_rect(&exact), "fast bounds are conservative");
    }

    // Left-right sprites mirror instead of rotating.
    stage.set_rotation_style(id, RotationStyle::LeftRight);
    println!("orientation: {:?}", stage.target(id).unwrap().orientation());

    stage.set_position(id, Point::new(-100.0, 60.0));
    let damage = stage.commit();
    println!("moved: {:?}", damage.moved);
    println!("repaint: {:?}", damage.union_rect());

    println!("bubble anchor: {:?}", stage.bubble_bounds(id));
    println!("pixel reads: {}", stage.source().reads());
}
