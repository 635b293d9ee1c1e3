use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use corridor_camera::{CameraConfig, CameraState, ViewSettings};
use corridor_common::Viewport;
use corridor_input::{InputState, MoveIntent};
use corridor_render::{
    CommandRecorder, DebugTextRenderer, DrawCommand, FrameContext, FramePlan, Renderer,
    compose_frame,
};
use corridor_scene::SceneRegistry;
use glam::{Vec2, Vec3};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "corridor-cli", about = "Headless tools for the corridor scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene file (JSON). The built-in level is used when omitted.
    #[arg(long, global = true)]
    scene: Option<PathBuf>,

    /// Camera and projection settings (JSON). Defaults are used when omitted.
    #[arg(long, global = true)]
    camera: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the scene placements
    Scene {
        /// Emit the scene as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Compose one frame from a fixed camera pose and print its draw list.
    /// Pose values not given come from the camera settings.
    Frame {
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f32>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f32>,
        #[arg(long, allow_hyphen_values = true)]
        z: Option<f32>,
        /// Yaw in degrees
        #[arg(long, allow_hyphen_values = true)]
        yaw: Option<f32>,
        /// Pitch in degrees
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<f32>,
        #[arg(long, default_value_t = 1280)]
        width: u32,
        #[arg(long, default_value_t = 720)]
        height: u32,
        /// Also print the expanded backend command stream
        #[arg(long)]
        commands: bool,
    },
    /// Simulate frames with movement keys held and print the camera path
    Walk {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "10")]
        steps: u32,
        /// Keys held every frame, e.g. "wd"
        #[arg(short, long, default_value = "w")]
        keys: String,
        /// Horizontal mouse motion per frame, as if the pointer were captured
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        turn: f32,
    },
}

fn load_scene(path: Option<&PathBuf>) -> anyhow::Result<SceneRegistry> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading scene file");
            SceneRegistry::load(path)
                .with_context(|| format!("failed to load scene {}", path.display()))
        }
        None => Ok(SceneRegistry::default_level()),
    }
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<ViewSettings> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading camera settings");
            ViewSettings::load(path)
                .with_context(|| format!("failed to load camera settings {}", path.display()))
        }
        None => Ok(ViewSettings::default()),
    }
}

/// Build the per-frame input for `walk` from a key string.
fn walk_input(keys: &str, turn: f32) -> anyhow::Result<InputState> {
    let mut input = InputState {
        pointer_captured: turn != 0.0,
        mouse_deltas: if turn != 0.0 {
            vec![Vec2::new(turn, 0.0)]
        } else {
            Vec::new()
        },
        ..InputState::default()
    };
    for c in keys.chars() {
        match MoveIntent::from_key_char(c) {
            Some(intent) => {
                input.held.insert(intent);
            }
            None => bail!("unknown movement key '{c}' (expected w, a, s or d)"),
        }
    }
    Ok(input)
}

/// Replace the configured pose with whichever values were given.
fn posed(
    config: CameraConfig,
    position: [Option<f32>; 3],
    yaw: Option<f32>,
    pitch: Option<f32>,
) -> CameraConfig {
    let [x, y, z] = position;
    let p = config.position;
    CameraConfig {
        position: Vec3::new(x.unwrap_or(p.x), y.unwrap_or(p.y), z.unwrap_or(p.z)),
        yaw: yaw.unwrap_or(config.yaw),
        pitch: pitch.unwrap_or(config.pitch),
        ..config
    }
}

fn describe_command(command: &DrawCommand) -> String {
    match command {
        DrawCommand::UseProgram(category) => format!("use_program {}", category.name()),
        DrawCommand::SetView(_) => "set_view".to_string(),
        DrawCommand::SetProjection(_) => "set_projection".to_string(),
        DrawCommand::SetModel(m) => {
            format!("set_model origin=({:.2}, {:.2}, {:.2})", m.w_axis.x, m.w_axis.y, m.w_axis.z)
        }
        DrawCommand::SetNormal(_) => "set_normal".to_string(),
        DrawCommand::BindTexture { texture, unit } => {
            format!("bind_texture {texture:?} unit={unit}")
        }
        DrawCommand::BindMesh(mesh) => format!("bind_mesh {mesh:?}"),
        DrawCommand::DrawIndexed { index_count } => format!("draw_indexed {index_count}"),
    }
}

fn print_plan(plan: &FramePlan, commands: bool) {
    print!("{}", DebugTextRenderer::new().render(plan));
    if commands {
        println!("--- commands ---");
        for command in CommandRecorder::new().render(plan) {
            println!("{}", describe_command(&command));
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Info => {
            println!("corridor-cli v{}", env!("CARGO_PKG_VERSION"));
            let ViewSettings { camera, projection } = load_settings(cli.camera.as_ref())?;
            println!(
                "camera: pos=({:.2}, {:.2}, {:.2}) yaw={} pitch={} speed={}",
                camera.position.x,
                camera.position.y,
                camera.position.z,
                camera.yaw,
                camera.pitch,
                camera.speed
            );
            println!(
                "projection: fov={}deg near={} far={}",
                projection.fov_y_degrees, projection.near, projection.far
            );
            println!("render: {}", corridor_render::crate_info());
        }
        Commands::Scene { json } => {
            let scene = load_scene(cli.scene.as_ref())?;
            if json {
                println!("{}", scene.to_json_pretty()?);
            } else {
                println!(
                    "floor: scale=({:.1}, {:.1}, {:.1})",
                    scene.floor().scale.x,
                    scene.floor().scale.y,
                    scene.floor().scale.z
                );
                println!("walls: {}", scene.walls().len());
                for wall in scene.walls() {
                    println!(
                        "  pos={:?} scale={:?} rotation_y={:.1}",
                        wall.position.to_array(),
                        wall.scale.to_array(),
                        wall.rotation_y
                    );
                }
                println!("enemies: {}", scene.enemies().len());
                for enemy in scene.enemies() {
                    println!("  pos={:?}", enemy.position.to_array());
                }
                println!("draw calls per frame: {}", scene.draw_count());
            }
        }
        Commands::Frame {
            x,
            y,
            z,
            yaw,
            pitch,
            width,
            height,
            commands,
        } => {
            let scene = load_scene(cli.scene.as_ref())?;
            let settings = load_settings(cli.camera.as_ref())?;
            let camera = CameraState::new(posed(settings.camera, [x, y, z], yaw, pitch));
            let context =
                FrameContext::new(&camera, Viewport::new(width, height), &settings.projection);
            print_plan(&compose_frame(&scene, context), commands);
        }
        Commands::Walk { steps, keys, turn } => {
            let scene = load_scene(cli.scene.as_ref())?;
            let input = walk_input(&keys, turn)?;
            let settings = load_settings(cli.camera.as_ref())?;
            let mut camera = CameraState::new(settings.camera);

            for step in 1..=steps {
                camera.update(&input);
                let p = camera.position();
                println!(
                    "step {step}: pos=({:.3}, {:.3}, {:.3}) yaw={:.1} pitch={:.1}",
                    p.x,
                    p.y,
                    p.z,
                    camera.yaw(),
                    camera.pitch()
                );
            }

            let context = FrameContext::new(&camera, Viewport::default(), &settings.projection);
            print_plan(&compose_frame(&scene, context), false);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_input_maps_keys() {
        let input = walk_input("wD", 0.0).unwrap();
        assert!(input.is_held(MoveIntent::Forward));
        assert!(input.is_held(MoveIntent::StrafeRight));
        assert!(!input.is_held(MoveIntent::Backward));
        assert!(!input.pointer_captured);
    }

    #[test]
    fn walk_input_rejects_unknown_keys() {
        let err = walk_input("wq", 0.0).unwrap_err();
        assert!(err.to_string().contains("'q'"));
    }

    #[test]
    fn turning_captures_pointer() {
        let input = walk_input("", 5.0).unwrap();
        assert!(input.pointer_captured);
        assert_eq!(input.mouse_deltas, vec![Vec2::new(5.0, 0.0)]);
    }

    #[test]
    fn command_descriptions() {
        assert_eq!(
            describe_command(&DrawCommand::DrawIndexed { index_count: 6 }),
            "draw_indexed 6"
        );
        assert_eq!(
            describe_command(&DrawCommand::SetModel(glam::Mat4::from_translation(Vec3::new(
                5.0, 0.0, -2.0
            )))),
            "set_model origin=(5.00, 0.00, -2.00)"
        );
    }

    #[test]
    fn pose_flags_override_settings() {
        let config = CameraConfig {
            position: Vec3::new(1.0, 2.0, 3.0),
            yaw: 10.0,
            pitch: 5.0,
            speed: 0.4,
            ..CameraConfig::default()
        };
        let posed = posed(config, [None, Some(-1.0), None], Some(45.0), None);
        assert_eq!(posed.position, Vec3::new(1.0, -1.0, 3.0));
        assert_eq!(posed.yaw, 45.0);
        assert_eq!(posed.pitch, 5.0);
        assert_eq!(posed.speed, 0.4);
    }

    #[test]
    fn camera_settings_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        std::fs::write(&path, r#"{ "camera": { "yaw": 0.0 }, "projection": { "far": 50.0 } }"#)
            .unwrap();
        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.camera.yaw, 0.0);
        assert_eq!(settings.projection.far, 50.0);

        assert_eq!(load_settings(None).unwrap(), ViewSettings::default());
        assert!(load_settings(Some(&dir.path().join("missing.json"))).is_err());
    }

    #[test]
    fn cli_parses_negative_pose() {
        let cli = Cli::try_parse_from(["corridor-cli", "frame", "--x", "-3", "--yaw", "-45"])
            .unwrap();
        match cli.command {
            Commands::Frame { x, yaw, z, .. } => {
                assert_eq!(x, Some(-3.0));
                assert_eq!(yaw, Some(-45.0));
                assert_eq!(z, None);
            }
            _ => panic!("expected frame command"),
        }
    }
}
