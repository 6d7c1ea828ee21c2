use std::path::PathBuf;
use std::sync::Arc;

use cubelet::{Assembly, Cubelet, CubeletConfig, Face, Resources, StickCommand, Twist};
use eyre::{Context, Result};
use itertools::Itertools;
use serde::Serialize;

/// Cubelet command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Config file to load on top of the defaults (YAML, TOML, or JSON).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Number of cubelets along each edge, overriding the config file.
    #[arg(short, long, global = true)]
    pub order: Option<u32>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print information about one cubelet as JSON.
    Inspect {
        /// Linear index of the cubelet.
        index: usize,
        /// Sticker changes to apply first, such as `U=remove`, `F=L`, or `F=`
        /// to restore.
        #[arg(short, long, value_parser = parse_stick)]
        stick: Vec<(Face, StickCommand)>,
    },
    /// Apply a sequence of moves and print the resulting net.
    Twist {
        /// Moves such as `R`, `U'`, `2F2`, or `x`.
        moves: Vec<String>,
        /// Print the net as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as YAML.
    Config,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let mut config = CubeletConfig::load(args.config.as_deref())?;
    if let Some(order) = args.order {
        config.order = order;
        config.validate()?;
    }

    match args.subcommand {
        Subcommand::Inspect { index, stick } => {
            let resources = Arc::new(Resources::new(&config));
            let mut cubelet = Cubelet::new(index, resources)?;
            for (face, command) in stick {
                cubelet.apply_stick(face, command);
            }
            write_json_output(&CubeletInfo::new(&cubelet))
        }

        Subcommand::Twist { moves, json } => {
            let twists: Vec<Twist> = moves
                .iter()
                .flat_map(|s| s.split_whitespace())
                .map(|s| s.parse::<Twist>().with_context(|| format!("bad move {s:?}")))
                .try_collect()?;
            log::info!("Applying {} moves", twists.len());

            let mut assembly = Assembly::new(Arc::new(Resources::new(&config)))?;
            assembly.apply_moves(twists)?;

            let net = NetInfo::new(&assembly);
            if json {
                write_json_output(&net)
            } else {
                for (face, stickers) in &net.faces {
                    let rows = stickers
                        .chars()
                        .chunks(assembly.order() as usize)
                        .into_iter()
                        .map(|row| row.collect::<String>())
                        .join(" ");
                    println!("{face}: {rows}");
                }
                println!("solved: {}", net.solved);
                Ok(())
            }
        }

        Subcommand::Config => {
            let s = serde_norway::to_string(&config).context("error serializing config")?;
            print!("{s}");
            Ok(())
        }
    }
}

fn parse_stick(s: &str) -> Result<(Face, StickCommand), String> {
    let (face, value) = s.split_once('=').ok_or("expected FACE=VALUE")?;
    let face: Face = face.parse().map_err(|_| format!("unknown face {face:?}"))?;
    let command = value
        .parse()
        .map_err(|_| format!("unknown sticker value {value:?}"))?;
    Ok((face, command))
}

#[derive(Serialize, Debug)]
struct CubeletInfo {
    index: usize,
    initial_index: usize,
    vector: [f32; 3],
    position: [f32; 3],
    stickers: Vec<StickerInfo>,
    /// Color tag seen from each world direction, in face order.
    colors: String,
}
impl CubeletInfo {
    fn new(cubelet: &Cubelet) -> Self {
        Self {
            index: cubelet.index(),
            initial_index: cubelet.initial_index(),
            vector: cubelet.vector().into(),
            position: cubelet.node().position.into(),
            stickers: cubelet
                .stickers()
                .map(|(face, sticker)| StickerInfo {
                    face,
                    color: sticker.color(),
                    visible: sticker.is_visible(),
                    material: sticker.mesh().material.name.clone(),
                    position: sticker.mesh().position.into(),
                    mirror_position: sticker.mirror().position.into(),
                })
                .collect(),
            colors: Face::ALL.map(|face| cubelet.color_char_at(face)).iter().collect(),
        }
    }
}

#[derive(Serialize, Debug)]
struct StickerInfo {
    #[serde(serialize_with = "serialize_face")]
    face: Face,
    #[serde(serialize_with = "serialize_face")]
    color: Face,
    visible: bool,
    material: String,
    position: [f32; 3],
    mirror_position: [f32; 3],
}

#[derive(Serialize, Debug)]
struct NetInfo {
    order: u32,
    /// Colors on each face, row by row from the top left.
    faces: Vec<(String, String)>,
    solved: bool,
}
impl NetInfo {
    fn new(assembly: &Assembly) -> Self {
        let faces: Vec<(String, String)> = Face::ALL
            .into_iter()
            .map(|face| {
                let stickers = assembly
                    .face_colors(face)
                    .into_iter()
                    .map(|c| c.map_or(cubelet::UNKNOWN_COLOR, Face::symbol))
                    .collect();
                (face.to_string(), stickers)
            })
            .collect();
        Self {
            order: assembly.order(),
            faces,
            solved: assembly.is_solved(),
        }
    }
}

fn serialize_face<S: serde::Serializer>(face: &Face, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(face)
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
