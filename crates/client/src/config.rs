//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one scripted battle run.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `battle.toml`, `encounters.ron` and the definition files.
    pub data_dir: PathBuf,
    pub encounter: String,
    /// Overrides the encounter's own seed.
    pub seed: Option<u64>,
    /// Interval between battle ticks.
    pub frame: Duration,
    /// How long one battle animation plays.
    pub animation: Duration,
    pub max_turns: u32,
    /// Fail the load on a malformed tag instead of dropping it with a warning.
    pub strict_tags: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../battle/content/data")),
            encounter: "Cave".to_string(),
            seed: None,
            frame: Duration::from_millis(16),
            animation: Duration::from_millis(120),
            max_turns: 30,
            strict_tags: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Content directory (default: bundled data)
    /// - `BATTLE_ENCOUNTER` - Encounter name (default: Cave)
    /// - `BATTLE_SEED` - Seed override (default: the encounter's seed)
    /// - `BATTLE_FRAME_MS` - Tick interval in milliseconds (default: 16)
    /// - `BATTLE_ANIMATION_MS` - Animation length in milliseconds (default: 120)
    /// - `BATTLE_MAX_TURNS` - Turn limit before the run stops (default: 30)
    /// - `BATTLE_STRICT_TAGS` - Fail on bad tags instead of dropping them (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(name) = env::var("BATTLE_ENCOUNTER") {
            config.encounter = name;
        }
        config.seed = read_env::<u64>("BATTLE_SEED");

        if let Some(ms) = read_env::<u64>("BATTLE_FRAME_MS") {
            config.frame = Duration::from_millis(ms.max(1));
        }
        if let Some(ms) = read_env::<u64>("BATTLE_ANIMATION_MS") {
            config.animation = Duration::from_millis(ms);
        }
        if let Some(turns) = read_env::<u32>("BATTLE_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        if let Some(strict) = read_env::<bool>("BATTLE_STRICT_TAGS") {
            config.strict_tags = strict;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
