//! Coordinate Tool
//!
//! Converts coordinates between Cartesian and spherical form and computes
//! distances, central angles and approximate equality from the command line.
//!
//! Points are written as `<representation>:<a>,<b>,<c>`, for example
//! `cartesian:1,2,3` or `spherical:0.5,1.2,10` (phi, theta, radius in radians).
//!
//! Usage:
//!   cargo run --bin coord_tool -- convert spherical:1.5708,1.5708,1
//!   cargo run --bin coord_tool -- distance cartesian:0,0,0 cartesian:12,2,63.7281
//!   cargo run --bin coord_tool -- --config coords.json equal cartesian:1,0,0 spherical:0,1.5708,1

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use spatial_coords::{
    Coordinate, CoordinateConfig, CoordinateRegistry, Position, Representation, SharedPosition,
};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Coordinate conversion and measurement tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts 3-D coordinates and measures distances and angles between them",
    long_about = None
)]
struct Args {
    /// JSON config file (tolerance, cache_enabled)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a point in both representations
    Convert {
        #[arg(value_parser = parse_position)]
        point: Position,

        /// Print JSON instead of text
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Euclidean distance between two points
    Distance {
        #[arg(value_parser = parse_position)]
        a: Position,
        #[arg(value_parser = parse_position)]
        b: Position,
    },

    /// Central angle between two points, seen from the origin
    Angle {
        #[arg(value_parser = parse_position)]
        a: Position,
        #[arg(value_parser = parse_position)]
        b: Position,

        /// Print degrees instead of radians
        #[arg(short, long, action = ArgAction::SetTrue)]
        degrees: bool,
    },

    /// Whether two points are equal within the configured tolerance
    Equal {
        #[arg(value_parser = parse_position)]
        a: Position,
        #[arg(value_parser = parse_position)]
        b: Position,
    },
}

/// Parses `<representation>:<a>,<b>,<c>` into a position
fn parse_position(s: &str) -> std::result::Result<Position, String> {
    let (repr, components) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <representation>:<a>,<b>,<c>, got '{}'", s))?;

    let values = components
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid component '{}': {}", v, e))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    let [a, b, c] = values[..] else {
        return Err(format!("expected 3 components, got {}", values.len()));
    };

    let position = match repr.trim().to_ascii_lowercase().as_str() {
        "cartesian" | "c" => Position::cartesian(a, b, c),
        "spherical" | "s" => Position::spherical(a, b, c),
        other => return Err(format!("unknown representation '{}'", other)),
    };
    position.map_err(|e| e.to_string())
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn display_conversion(registry: &CoordinateRegistry, point: &Position, json: bool) -> Result<()> {
    let shared = registry.position(point)?;
    let cartesian = shared.position().convert_to(Representation::Cartesian)?;
    let spherical = shared.position().convert_to(Representation::Spherical)?;

    if json {
        let out = serde_json::json!({
            "input": point,
            "cartesian": cartesian,
            "spherical": spherical,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_section_header("Input");
    println!("{}", point);

    print_section_header("Cartesian");
    println!("{}", cartesian);

    print_section_header("Spherical");
    println!("{}", spherical);
    if let Position::Spherical(s) = spherical {
        println!(
            "phi: {:.6}°, theta: {:.6}°",
            s.phi_degrees(),
            s.theta_degrees()
        );
    }
    Ok(())
}

fn shared_pair(
    registry: &CoordinateRegistry,
    a: &Position,
    b: &Position,
) -> Result<(SharedPosition, SharedPosition)> {
    Ok((registry.position(a)?, registry.position(b)?))
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => CoordinateConfig::from_file(path)?,
        None => CoordinateConfig::default(),
    };
    let registry = CoordinateRegistry::new(config);

    match args.command {
        Command::Convert { point, json } => display_conversion(&registry, &point, json)?,
        Command::Distance { a, b } => {
            let (a, b) = shared_pair(&registry, &a, &b)?;
            println!("{}", a.position().distance(&b.position())?);
        }
        Command::Angle { a, b, degrees } => {
            let (a, b) = shared_pair(&registry, &a, &b)?;
            let angle = a.position().central_angle(&b.position())?;
            if degrees {
                println!("{}", angle.to_degrees());
            } else {
                println!("{}", angle);
            }
        }
        Command::Equal { a, b } => {
            let (a, b) = shared_pair(&registry, &a, &b)?;
            let equal = a.ptr_eq(&b) || registry.approx_eq(&a.position(), &b.position())?;
            println!("{}", equal);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        let p = parse_position("cartesian:1, 2, -3.5").unwrap();
        assert_eq!(p, Position::cartesian(1.0, 2.0, -3.5).unwrap());

        let p = parse_position("s:0,0,-1").unwrap();
        assert_eq!(p.representation(), Representation::Spherical);
    }

    #[test]
    fn test_parse_position_errors() {
        assert!(parse_position("1,2,3").is_err());
        assert!(parse_position("cartesian:1,2").is_err());
        assert!(parse_position("polar:1,2,3").is_err());
        assert!(parse_position("cartesian:1,x,3").is_err());
        assert!(parse_position("cartesian:1,NaN,3").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "coord_tool",
            "angle",
            "--degrees",
            "cartesian:1,0,0",
            "cartesian:0,1,0",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::Angle { degrees: true, .. }));
    }
}
