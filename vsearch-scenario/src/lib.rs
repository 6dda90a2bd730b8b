pub mod codec;
pub mod error;
pub mod generator;

pub use codec::{
    decode, encode, encode_placement, read_scenario_file, scenario_path, write_scenario_file,
};
pub use error::ScenarioError;
pub use generator::{Generator, GeneratorConfig, Volume, SHELL_OFFSET};
