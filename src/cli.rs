use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vsearch_scenario::{GeneratorConfig, SHELL_OFFSET, Volume};

#[derive(Parser)]
#[command(name = "visual-search")]
#[command(about = "3D visual search experiment runner")]
pub struct Cli {
    /// Experiment config (JSON); defaults are used when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a random scenario file
    Generate(GenerateArgs),
    /// Decode a scenario file and list its objects
    Show {
        /// Scenario name, without `.txt`
        name: String,
    },
    /// Run a session in the terminal
    Run {
        #[arg(long)]
        participant: String,
        #[arg(long)]
        experimenter: String,
        #[arg(long)]
        start_time: String,
        /// Seed for the trial order
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Scenario name, written as `<scenario_dir>/<name>.txt`
    pub name: String,

    /// Generator settings (JSON); overrides the count and volume flags
    #[arg(long)]
    pub from: Option<PathBuf>,

    #[arg(long, default_value_t = 1)]
    pub cubes: usize,
    /// Green spheres to add (implies the green sphere toggle when > 0)
    #[arg(long, default_value_t = 0)]
    pub green_spheres: usize,
    /// Red spheres to add; makes it a conjunction search when > 0
    #[arg(long, default_value_t = 0)]
    pub red_spheres: usize,
    /// Place the red cube target
    #[arg(long)]
    pub target: bool,

    /// Scatter in a spherical shell around the viewer instead of a box
    #[arg(long)]
    pub shell: bool,
    /// Box extents `x,y,z`, or the shell's outer radius (first value)
    #[arg(long, value_delimiter = ',', default_values_t = [20.0, 10.0, 20.0])]
    pub size: Vec<f32>,
    /// Shell inner radius
    #[arg(long, default_value_t = SHELL_OFFSET)]
    pub offset: f32,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl GenerateArgs {
    pub fn generator_config(&self) -> GeneratorConfig {
        let volume = if self.shell {
            Volume::Shell {
                size: self.size.first().copied().unwrap_or(15.0),
                offset: self.offset,
            }
        } else {
            let axis = |i: usize| self.size.get(i).or(self.size.last()).copied().unwrap_or(0.0);
            Volume::Cuboid {
                size: [axis(0), axis(1), axis(2)],
            }
        };
        GeneratorConfig {
            cubes: self.cubes,
            green_spheres: self.green_spheres,
            red_spheres: self.red_spheres,
            green_spheres_enabled: self.green_spheres > 0,
            red_spheres_enabled: self.red_spheres > 0,
            target: self.target,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsearch_core::SearchType;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("visual-search").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn generate_flags_map_to_generator_config() {
        let cli = parse(&[
            "generate", "s1", "--cubes", "5", "--green-spheres", "2", "--red-spheres", "1",
            "--target",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = args.generator_config();
        assert_eq!(config.cubes, 5);
        assert!(config.green_spheres_enabled && config.red_spheres_enabled && config.target);
        assert_eq!(config.search_type(), SearchType::Conjunction);
        assert_eq!(config.volume, Volume::Cuboid { size: [20.0, 10.0, 20.0] });
    }

    #[test]
    fn shell_uses_first_size_as_radius() {
        let cli = parse(&["generate", "s2", "--shell", "--size", "12"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(
            args.generator_config().volume,
            Volume::Shell {
                size: 12.0,
                offset: SHELL_OFFSET
            }
        );
    }

    #[test]
    fn run_requires_participant_details() {
        let args = ["visual-search", "run", "--participant", "p01"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
