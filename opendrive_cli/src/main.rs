use clap::{Parser, Subcommand};
use log::info;
use opendrive::{
    config::{read_config_json, NetworkConfig},
    connection::{add_connections, create_fake_corner, SynthesisMode},
    coord::RoadCoord,
    io::{read_xodr, write_xodr},
    spatial::{nearest_lane, nearest_road},
    Result,
};

#[derive(Parser)]
#[command(name = "opendrive_cli", version)]
struct Cli {
    /// JSON file with query and synthesis settings
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print element counts of an OpenDRIVE file.
    Info { path: String },
    /// Print the world pose at road coordinates (s, t).
    Pose {
        path: String,
        road: u32,
        s: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        t: f64,
    },
    /// Find the road and lane closest to a world point.
    Nearest {
        path: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Read a file and write it back out.
    Roundtrip { input: String, output: String },
    /// Synthesize junction connections between two road ends.
    Connect {
        path: String,
        junction: u32,
        in_road: u32,
        in_s: f64,
        out_road: u32,
        out_s: f64,
        output: String,
        /// Build a corner patch between the outer edges instead of lane connections
        #[arg(long)]
        corner: bool,
    },
}

fn load_config(path: Option<&str>) -> Result<NetworkConfig> {
    match path {
        Some(p) => read_config_json(p),
        None => Ok(NetworkConfig::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Info { path } => {
            let net = read_xodr(&path)?;
            let stats = net.stats();
            println!("Roads: {}", stats.roads);
            println!("Geometries: {}", stats.geometries);
            println!("Lane sections: {}", stats.lane_sections);
            println!("Lanes: {}", stats.lanes);
            println!("Junctions: {}", stats.junctions);
            println!("Connections: {}", stats.connections);
        }
        Commands::Pose { path, road, s, t } => {
            let net = read_xodr(&path)?;
            let pose = net.get_road(road)?.get_road_coord_at(s, t)?;
            println!(
                "{:.3},{:.3},{:.3},{:.6}",
                pose.x, pose.y, pose.z, pose.hdg
            );
        }
        Commands::Nearest { path, x, y } => {
            let net = read_xodr(&path)?;
            match nearest_lane(&net, x, y, &config.query)? {
                Some(hit) => println!(
                    "Road {} lane {} s={:.3} t={:.3}",
                    hit.road_id, hit.lane_id, hit.s, hit.t
                ),
                None => match nearest_road(&net, x, y, &config.query)? {
                    Some(hit) => println!(
                        "Road {} (outside lanes) s={:.3} t={:.3}",
                        hit.road_id, hit.nearest.pose.s, hit.nearest.pose.t
                    ),
                    None => println!("No road found"),
                },
            }
        }
        Commands::Roundtrip { input, output } => {
            let net = read_xodr(&input)?;
            write_xodr(&output, &net)?;
            println!("Wrote {}", output);
        }
        Commands::Connect {
            path,
            junction,
            in_road,
            in_s,
            out_road,
            out_s,
            output,
            corner,
        } => {
            let mut net = read_xodr(&path)?;
            if net.junction(junction).is_none() {
                info!("creating junction {}", junction);
                net.add_junction_instance(opendrive::junction::Junction::new(junction, ""));
            }
            let incoming = RoadCoord::new(in_road, in_s, 0.0);
            let outgoing = RoadCoord::new(out_road, out_s, 0.0);
            let created: Vec<_> = if corner {
                create_fake_corner(&mut net, junction, incoming, outgoing, &config.synthesis)?
                    .into_iter()
                    .collect()
            } else {
                add_connections(
                    &mut net,
                    junction,
                    incoming,
                    outgoing,
                    SynthesisMode::Driving,
                    &config.synthesis,
                )?
            };
            write_xodr(&output, &net)?;
            println!("Created {} connection(s), wrote {}", created.len(), output);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
