use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use drawkit::fit::{aspect_match_angle, fill_scale, optimal_fill_angle};
use std::fs;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod scene;

#[derive(Parser)]
#[command(name = "drawkit-cli")]
#[command(about = "Diagram geometry kernel: fit solver and scene rendering")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve the rotation that best fits a w×h box into avail_w×avail_h
    FillAngle {
        #[arg(long)]
        w: f64,
        #[arg(long)]
        h: f64,
        #[arg(long)]
        avail_w: f64,
        #[arg(long)]
        avail_h: f64,
        /// Match the available aspect ratio instead of maximizing the fill
        #[arg(long)]
        match_aspect: bool,
    },
    /// Render a JSON scene to connection path data (plus provenance sidecar)
    Render {
        #[arg(long)]
        scene: String,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::FillAngle {
            w,
            h,
            avail_w,
            avail_h,
            match_aspect,
        } => fill_angle(w, h, avail_w, avail_h, match_aspect),
        Action::Render { scene, out } => render(&scene, &out),
        Action::Report => report(),
    }
}

fn fill_angle(w: f64, h: f64, avail_w: f64, avail_h: f64, match_aspect: bool) -> Result<()> {
    if ![w, h, avail_w, avail_h].iter().all(|d| d.is_finite() && *d > 0.0) {
        bail!(
            "box dimensions must be finite and positive: \
             w={w} h={h} avail_w={avail_w} avail_h={avail_h}"
        );
    }
    let angle = if match_aspect {
        aspect_match_angle(w, h, avail_w, avail_h)
    } else {
        optimal_fill_angle(w, h, avail_w, avail_h)
    };
    let scale = fill_scale(w, h, avail_w, avail_h, angle);
    tracing::info!(angle, scale, match_aspect, "fill_angle");
    let obj = serde_json::json!({
        "angle": angle,
        "scale": if scale.is_finite() { Some(scale) } else { None },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn render(scene_path: &str, out: &str) -> Result<()> {
    tracing::info!(scene = scene_path, out, "render");
    let text =
        fs::read_to_string(scene_path).with_context(|| format!("reading scene {scene_path}"))?;
    let scene = scene::parse(&text)?;
    let rendered = scene::render(&scene)?;

    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out_path, serde_json::to_vec_pretty(&rendered)?)
        .with_context(|| format!("writing {out}"))?;

    let payload = provenance::Payload::new(serde_json::json!({
        "scene": scene_path,
        "entities": scene.entities.len(),
        "fits": scene.fits.len(),
        "connections": scene.connections.len(),
    }));
    let prov = provenance::write_sidecar(out_path, payload)?;
    tracing::info!(provenance = %prov.display(), "wrote outputs");
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": drawkit::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
