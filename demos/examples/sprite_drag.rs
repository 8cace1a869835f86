// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite drag.
//!
//! Pick the topmost sprite under a mouse position and drag it across a scaled stage.
//!
//! Run:
//! - `cargo run -p footlight_demos --example sprite_drag`

use footlight_demos::{OPAQUE, bitmap_costume, disc, init_logging};
use footlight_raster::{MemoryPixelSource, PixelBuffer};
use footlight_stage::{SpriteProps, Stage, StageConfig};
use kurbo::Point;

fn main() {
    init_logging();

    let config = StageConfig {
        scale: 2.0,
        ..StageConfig::default()
    };
    let mut stage = Stage::new(config, MemoryPixelSource::new());

    let backdrop = bitmap_costume(
        stage.source_mut(),
        1,
        PixelBuffer::filled(480, 360, OPAQUE),
        240.0,
        180.0,
    );
    let backdrop = stage.insert_stage(Some(backdrop));

    let ball = bitmap_costume(stage.source_mut(), 2, disc(20), 20.0, 20.0);
    let below = stage.insert_sprite(SpriteProps {
        costume: Some(ball.clone()),
        draggable: true,
        ..SpriteProps::default()
    });
    let above = stage.insert_sprite(SpriteProps {
        x: 25.0,
        costume: Some(ball),
        layer_order: 1,
        draggable: true,
        ..SpriteProps::default()
    });

    // The overlap belongs to the upper sprite; the backdrop catches the rest.
    for p in [Point::new(12.0, 0.0), Point::new(-15.0, 0.0), Point::new(150.0, 100.0)] {
        println!("hit at {p:?}: {:?}", stage.hit_test(p));
    }
    assert_eq!(stage.hit_test(Point::new(12.0, 0.0)), Some(above));
    assert_eq!(stage.hit_test(Point::new(150.0, 100.0)), Some(backdrop));

    // Grab the lower sprite off-center and drag it; it comes to the front.
    let grab = Point::new(-15.0, 5.0);
    if stage.hit_test(grab) == Some(below) && stage.start_drag(below, grab) {
        for scene in [
            Point::new(450.0, 370.0),
            Point::new(500.0, 300.0),
            Point::new(620.0, 250.0),
        ] {
            let position = stage.drag_to_scene(scene);
            println!("mouse at scene {scene:?}: sprite at {position:?}");
        }
        stage.stop_drag();
    }
    println!(
        "layers: below {}, above {}",
        stage.target(below).unwrap().layer_order(),
        stage.target(above).unwrap().layer_order()
    );
    println!("damage: {:?}", stage.commit().union_rect());
}
