//! Reconstruction demo: projects a small world grid into a camera image.
//!
//! Usage: `cargo run --example reconstruction_demo [image] [options.json]`
//!
//! Without an image argument a synthetic gradient is used.

use image::{DynamicImage, Rgb, RgbImage};
use reconscope::*;

fn main() -> Result<()> {
    init_logging_with_filter("info");

    let mut args = std::env::args().skip(1);
    let image = match args.next() {
        Some(path) => image::open(path)?,
        None => DynamicImage::ImageRgb8(RgbImage::from_fn(640, 480, |x, y| {
            Rgb([(x / 3) as u8, (y / 2) as u8, 128])
        })),
    };
    let options = match args.next() {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let camera = PerspectiveCamera::look_at(
        DVec3::new(2.0, -1.0, -6.0),
        DVec3::ZERO,
        DVec3::Y,
        CameraIntrinsics::new(
            800.0,
            DVec2::new(f64::from(image.width()) / 2.0, f64::from(image.height()) / 2.0),
        ),
    );

    let data = ReconstructionData::with_options(&image, &camera, options)?;
    let center = data.camera_center();
    log::info!("camera center: ({:.3}, {:.3}, {:.3})", center.x, center.y, center.z);

    for i in -2..=2 {
        for j in -2..=2 {
            let world = DVec3::new(f64::from(i) * 0.5, f64::from(j) * 0.5, 0.0);
            let pixel = data.transform_world_to_image_position(world);
            match data.color_value(pixel) {
                Some(rgb) => println!("{world} -> {pixel} rgb({}, {}, {})", rgb.x, rgb.y, rgb.z),
                None => println!("{world} -> {pixel} (outside image)"),
            }
        }
    }

    let uniforms = ReconstructionUniforms::from(&data);
    log::info!("uniform block is {} bytes", bytemuck::bytes_of(&uniforms).len());

    Ok(())
}
