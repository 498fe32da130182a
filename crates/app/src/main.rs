//! Entry point for facemesh: canonical face OBJ -> generated JS data module.
//! Flags use the `--key=value` form; everything has a default.

use std::path::PathBuf;

use anyhow::Result;
use asset::{
    emit::{self, EmitOptions},
    obj,
};

const DEFAULT_INPUT: &str = "canonical_face.obj";
const DEFAULT_OUTPUT: &str = "src/face_mesh_data.js";

#[derive(Clone, Debug, PartialEq)]
struct Config {
    input: PathBuf,
    output: PathBuf,
    emit: EmitOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            emit: EmitOptions::default(),
        }
    }
}

fn parse_args<I, S>(args: I) -> Config
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Accept: --input=, --output=, --expected-verts=, --triangles-name=, --uvs-name=
    let mut config = Config::default();
    for arg in args {
        let arg = arg.as_ref();
        if let Some(val) = arg.strip_prefix("--input=") {
            config.input = PathBuf::from(val);
        } else if let Some(val) = arg.strip_prefix("--output=") {
            config.output = PathBuf::from(val);
        } else if let Some(val) = arg.strip_prefix("--expected-verts=") {
            match val.parse::<usize>() {
                Ok(n) => config.emit.expected_verts = n,
                Err(_) => log::warn!(
                    "Invalid --expected-verts '{}', keeping {}.",
                    val,
                    config.emit.expected_verts
                ),
            }
        } else if let Some(val) = arg.strip_prefix("--triangles-name=") {
            config.emit.triangles_name = val.to_owned();
        } else if let Some(val) = arg.strip_prefix("--uvs-name=") {
            config.emit.uvs_name = val.to_owned();
        }
    }
    config
}

fn run(config: &Config) -> Result<()> {
    let mesh = obj::load_face_mesh_from_path(&config.input)?;
    println!("{}", mesh.summary());
    emit::write_snippet_to_path(&mesh, &config.emit, &config.output)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = parse_args(std::env::args().skip(1));
    log::info!(
        "Extracting {} -> {} ({} UV slots)",
        config.input.display(),
        config.output.display(),
        config.emit.expected_verts
    );

    run(&config)?;

    log::info!("Done.");
    Ok(())
}
