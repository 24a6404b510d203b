use std::path::PathBuf;

use attractor::config::Params;
use attractor::randomize::randomize_seeded;
use attractor::render;
use attractor::view::{Camera, Rotation, clamp_viewport};

const ORBIT_FRAMES: usize = 4;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // "default" (or no arg) keeps the classical parameters.
    let seed: Option<u64> = args.get(1).and_then(|s| s.parse().ok());
    let width: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1024);
    let height: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(768);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    let (width, height) = clamp_viewport(width, height);

    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    let params = match seed {
        Some(seed) => randomize_seeded(&Params::default(), seed),
        None => Params::default(),
    };

    eprintln!(
        "Tracing {} points at {}x{}: sigma={}, rho={}, beta={:.3}, dt={}, speed={}",
        params.steps, width, height, params.sigma, params.rho, params.beta, params.dt, params.speed
    );

    let (frame, timings) = attractor::generate(&params, width, height, 0.0);

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    if let Some(e) = frame.extent {
        eprintln!(
            "\nExtent: x [{:.2}, {:.2}]  y [{:.2}, {:.2}]  z [{:.2}, {:.2}]",
            e.min[0], e.max[0], e.min[1], e.max[1], e.min[2], e.max[2]
        );
    } else {
        eprintln!("\nExtent: orbit diverged, no finite points");
    }

    let save = |name: &str, rgba: &[u8]| {
        let path = out_dir.join(name);
        image::save_buffer(&path, rgba, width as u32, height as u32, image::ColorType::Rgba8)
            .expect("failed to save image");
        eprintln!("Saved {}", path.display());
    };

    // 1. Preview at rest
    save("attractor.png", &frame.rgba);

    // 2. Passive rotation, one second apart
    let camera = Camera::new(width, height);
    for i in 1..=ORBIT_FRAMES {
        let rotation = Rotation::at(i as f64, params.speed);
        let rgba = render::render_trajectory(&frame.points, &camera, rotation);
        save(&format!("orbit_{:02}.png", i), &rgba);
    }

    // 3. Raw points for external renderers
    let path = out_dir.join("points.json");
    let json = serde_json::to_vec(&serde_json::json!({
        "params": frame.params,
        "points": frame.points,
    }))
    .expect("failed to serialize points");
    std::fs::write(&path, json).expect("failed to write points");
    eprintln!("Saved {}", path.display());

    eprintln!("\nDone.");
}
