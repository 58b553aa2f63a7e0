use bevy::prelude::*;

/// Command-line overrides for the demo.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    /// Global shake strength override.
    /// Usage: `cargo run -- --strength 0.5`
    pub strength: Option<f32>,

    /// Seed for reproducible shakes.
    /// Usage: `cargo run -- --seed 42`
    pub seed: Option<u64>,

    /// Skip loading the config file and use built-in defaults.
    pub no_config: bool,

    /// Write the effective config back to disk on startup.
    pub save_config: bool,
}

impl CliArgs {
    /// Parse the process arguments.
    pub fn parse() -> Self {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Supports:
    /// - `--strength <f32>`: global multiplier in [0, 1]
    /// - `--seed <u64>`: seed shakes deterministically
    /// - `--no-config`: ignore the config file
    /// - `--save-config`: persist the effective config
    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Self {
        let mut cli = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--strength" => match args.next().map(|value| value.parse::<f32>()) {
                    Some(Ok(strength)) => {
                        info!("CLI: Shake strength set to {}", strength);
                        cli.strength = Some(strength);
                    }
                    Some(Err(e)) => warn!("CLI: Invalid --strength value: {}", e),
                    None => warn!("CLI: --strength requires a value"),
                },
                "--seed" => match args.next().map(|value| value.parse::<u64>()) {
                    Some(Ok(seed)) => {
                        info!("CLI: Shakes seeded from {}", seed);
                        cli.seed = Some(seed);
                    }
                    Some(Err(e)) => warn!("CLI: Invalid --seed value: {}", e),
                    None => warn!("CLI: --seed requires a value"),
                },
                "--no-config" => cli.no_config = true,
                "--save-config" => cli.save_config = true,
                other => {
                    if other.starts_with('-') {
                        warn!("CLI: Unknown argument '{}'", other);
                    }
                }
            }
        }

        cli
    }
}
