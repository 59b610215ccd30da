use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use datagen::{RenderPlan, Split, SplitSpec, Subject};
use scene::{
    CameraPath, ColorJitter, RotateTarget, RotationAxes, Scene, SceneObject, Variation,
};

/// Renders a labeled train/val/test image dataset by randomly varying a
/// scene, one image at a time.
#[derive(Parser, Debug)]
#[command(name = "generator", version)]
struct Args {
    /// Directory the <split>/<subject>/<index>.png tree is written under.
    #[arg(short, long, default_value = "data")]
    out: PathBuf,

    /// Scene preset to generate from.
    #[arg(long, value_enum, default_value = "teacup")]
    preset: Preset,

    /// Renders per subject for the train split.
    #[arg(long, default_value_t = 500)]
    train: i64,

    /// Renders per subject for the val split.
    #[arg(long, default_value_t = 120)]
    val: i64,

    /// Renders per subject for the test split.
    #[arg(long, default_value_t = 25)]
    test: i64,

    /// Seed for reproducible variation; seeded from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output image width and height in pixels.
    #[arg(long, default_value_t = 256)]
    size: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    /// A mug rotating on a path-following camera, with four tea fill
    /// levels as subjects and a jittered tea color.
    Teacup,
    /// Letter objects, each tumbling freely around all three axes.
    Alphabet,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (mut scene, subjects, variation) = match args.preset {
        Preset::Teacup => teacup(args.size),
        Preset::Alphabet => alphabet(args.size),
    };

    let splits = vec![
        SplitSpec::new(Split::Train, args.train),
        SplitSpec::new(Split::Val, args.val),
        SplitSpec::new(Split::Test, args.test),
    ];
    let plan = RenderPlan::new(subjects, splits, &args.out)
        .context("invalid dataset configuration")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = datagen::run(&plan, &mut scene, |scene, subject| {
        variation.apply(scene, subject, &mut rng)
    })?;

    log::info!(
        "rendered {} images under {} in {}",
        report.rendered,
        plan.output_root().display(),
        datagen::format_hms(report.elapsed)
    );
    Ok(())
}

fn teacup(size: u32) -> (Scene, Vec<Subject>, Variation) {
    let mut scene = Scene::new(size, size);
    scene.add_object(SceneObject::new("Glass_Mug"));
    for name in ["Full", "Half-Full", "Mostly-Empty"] {
        let mut tea = SceneObject::new(name);
        tea.base_color = glam::vec4(0.9, 0.55, 0.2, 1.0);
        scene.add_object(tea);
    }
    // The empty mug has no tea to show or hide.
    let mut empty = SceneObject::new("Empty");
    empty.base_color = glam::Vec4::ZERO;
    scene.add_object(empty);

    let subjects = vec![
        Subject::new("Full"),
        Subject::new("Half-Full"),
        Subject::new("Mostly-Empty"),
        Subject::always_visible("Empty"),
    ];

    let variation = Variation {
        rotate: RotateTarget::Fixed("Glass_Mug".to_string()),
        axes: RotationAxes::YawOnly,
        color: Some(ColorJitter::default()),
        camera: Some(CameraPath::default()),
    };

    (scene, subjects, variation)
}

fn alphabet(size: u32) -> (Scene, Vec<Subject>, Variation) {
    let mut scene = Scene::new(size, size);
    let names = ["A", "B", "C"];
    for name in names {
        scene.add_object(SceneObject::new(name));
    }
    let subjects = names.into_iter().map(Subject::new).collect();

    let variation = Variation {
        rotate: RotateTarget::Subject,
        axes: RotationAxes::Full,
        color: None,
        camera: None,
    };

    (scene, subjects, variation)
}
