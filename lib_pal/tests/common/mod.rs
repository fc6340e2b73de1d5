#![allow(dead_code)]

use lib_pal::{Color, PixelBuffer};

pub const RED: Color = Color::new(255, 0, 0, 255);
pub const GREEN: Color = Color::new(0, 255, 0, 255);
pub const BLUE: Color = Color::new(0, 0, 255, 255);
pub const WHITE: Color = Color::new(255, 255, 255, 255);
pub const CLEAR: Color = Color::new(0, 0, 0, 0);

/// 4x3 sprite, bottom row first, transparent background.
pub fn sprite() -> PixelBuffer {
    PixelBuffer::new(
        4,
        3,
        vec![
            CLEAR, RED, RED, CLEAR, // bottom
            RED, WHITE, WHITE, RED, //
            CLEAR, BLUE, BLUE, CLEAR, // top
        ],
    )
    .unwrap()
}

/// 16x16 buffer with 256 distinct gray levels.
pub fn gradient() -> PixelBuffer {
    let pixels = (0..=255u8).map(|i| Color::new(i, i, i, 255)).collect();
    PixelBuffer::new(16, 16, pixels).unwrap()
}

/// Parses the emitted `palette` and `pixels` members as plain JSON.
pub fn parse_members(document: &str) -> (Vec<String>, Vec<Vec<usize>>) {
    let value: serde_json::Value = serde_json::from_str(document).unwrap();
    let palette = serde_json::from_value(value["palette"].clone()).unwrap();
    let pixels = serde_json::from_value(value["pixels"].clone()).unwrap();
    (palette, pixels)
}
