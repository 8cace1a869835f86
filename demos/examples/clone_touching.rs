// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clone touching.
//!
//! Spawn a row of clones, then ask which ones the original touches as it slides along.
//!
//! Run:
//! - `cargo run -p footlight_demos --example clone_touching`
//! - `RUST_LOG=footlight_stage=trace cargo run -p footlight_demos --example clone_touching`

use footlight_demos::{bitmap_costume, disc, init_logging};
use footlight_stage::{SpriteProps, Stage};
use kurbo::Point;

fn main() {
    init_logging();

    let mut stage = Stage::default();
    let ball = bitmap_costume(stage.source_mut(), 1, disc(10), 10.0, 10.0);
    let original = stage.insert_sprite(SpriteProps {
        x: -200.0,
        costume: Some(ball),
        ..SpriteProps::default()
    });

    let clones: Vec<_> = (0..5)
        .filter_map(|i| {
            let id = stage.insert_clone(original)?;
            stage.set_position(id, Point::new(-100.0 + 50.0 * f64::from(i), 0.0));
            Some(id)
        })
        .collect();

    for step in 0..20 {
        let x = -130.0 + 15.0 * f64::from(step);
        stage.set_x(original, x);
        let touching: Vec<_> = clones
            .iter()
            .copied()
            .filter(|&c| stage.touching_clones(original, &[c]))
            .collect();
        println!("x = {x:>6}: touching {touching:?}");
    }

    // Every clone shares the original's texture.
    println!("pixel reads: {}", stage.source().reads());
    assert_eq!(stage.source().reads(), 1, "one read-back for all clones");
}
