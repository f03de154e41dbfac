use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Instant;

use image::{ImageBuffer, Rgb};
use rand::Rng;

use clap::Parser;

mod raytracing;
use raytracing::parser::{ImageData, SceneParser};
use raytracing::tracer::clamp_color;
use raytracing::{Tracer, Vec3};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// the input path to the scene file
    scene: String,
    /// the path where the rendered image is saved, the format follows the extension
    #[arg(short, long, default_value = "output.png")]
    output: String,
    /// the number of ray shooted per pixel
    #[arg(short, long, default_value_t = 4)]
    sample_rate: u32,
    /// how many times a ray can bounce on reflective surfaces
    #[arg(short, long, default_value_t = 4)]
    depth: u32,
    /// apply gamma correction to the final image
    #[arg(long, default_value = "false")]
    gamma_correction: bool,
}

impl From<Vec3> for image::Rgb<u8> {
    fn from(value: Vec3) -> Self {
        let value = clamp_color(value);
        let r = (value.x * 255.0).round() as u8;
        let g = (value.y * 255.0).round() as u8;
        let b = (value.z * 255.0).round() as u8;
        image::Rgb([r, g, b])
    }
}

fn gamma_correction(value: f64) -> f64 {
    if value > 0.0 {
        value.powf(1.0 / 2.2)
    } else {
        0.0
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let content = fs::read_to_string(&args.scene)?;
    let mut parser = SceneParser::new(&content);
    if let Some(dir) = Path::new(&args.scene).parent() {
        parser = parser.with_base_dir(dir);
    }
    let ImageData {
        width,
        height,
        camera,
        world,
    } = match parser.parse_scene() {
        Ok(data) => data,
        Err(parser_error) => {
            parser_error.print_error_location(&content);
            return Err(Box::new(parser_error));
        }
    };
    println!(
        "Scene {}: {}x{}, {} geometries, {} lights ({} casting shadows)",
        args.scene,
        width,
        height,
        world.geometries().len(),
        world.lights().len(),
        world.lights().iter().filter(|light| light.casts_shadow()).count()
    );

    let tracer = Tracer::new(args.depth);
    let samples = args.sample_rate.max(1);
    let mut rng = rand::thread_rng();
    // measure time
    let start = Instant::now();

    let mut buffer: ImageBuffer<Rgb<u8>, Vec<_>> = ImageBuffer::new(width, height);
    for (x, y, pixel) in buffer.enumerate_pixels_mut() {
        let mut color = Vec3::zero();
        for _ in 0..samples {
            let x_offset = rng.gen_range(-0.5..0.5);
            let y_offset = rng.gen_range(-0.5..0.5);
            // getting pixel ray coordinate, v grows upward while y grows downward
            let u = (x as f64 + 0.5 + x_offset) / width as f64 - 0.5;
            let v = 0.5 - (y as f64 + 0.5 + y_offset) / height as f64;

            let ray = camera.shoot_to(u, v);
            color += tracer.trace(&world, &ray) / samples as f64;
        }
        if args.gamma_correction {
            color.x = gamma_correction(color.x);
            color.y = gamma_correction(color.y);
            color.z = gamma_correction(color.z);
        }
        *pixel = color.into();
    }

    let total_time = start.elapsed();
    buffer.save(&args.output)?;
    println!("Rendered {} in {:?}", args.output, total_time);
    Ok(())
}
