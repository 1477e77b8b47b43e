use eframe::egui::IconData;
use image::{ImageBuffer, Rgba};

const ICON_SIZE: u32 = 64;

/// Application icon: concentric rings shaded from `inner` to `outer`.
pub fn create_app_icon(inner: [u8; 3], outer: [u8; 3]) -> IconData {
    let mut img = ImageBuffer::<Rgba<u8>, Vec<u8>>::new(ICON_SIZE, ICON_SIZE);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = (x as f32 + 0.5) / ICON_SIZE as f32 * 2.0 - 1.0;
        let dy = (y as f32 + 0.5) / ICON_SIZE as f32 * 2.0 - 1.0;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > 1.0 {
            *pixel = Rgba([0, 0, 0, 0]);
            continue;
        }

        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * distance) as u8;
        let [r, g, b] = [mix(inner[0], outer[0]), mix(inner[1], outer[1]), mix(inner[2], outer[2])];

        // Bright bands every quarter radius, dark background between.
        let band = (distance * 4.0).fract();
        let ring = 1.0 - ((band - 0.5).abs() * 4.0).min(1.0);
        let core = (1.0 - distance * 4.0).max(0.0);
        let intensity = (0.15 + 0.85 * ring.max(core)).min(1.0);

        let shade = |c: u8| (c as f32 * intensity) as u8;
        *pixel = Rgba([shade(r), shade(g), shade(b), 255]);
    }

    IconData {
        rgba: img.into_raw(),
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}
