//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use pokerlab_engine::sampling::TiePolicy;

#[derive(Parser, Debug)]
#[command(
    name = "pokerlab",
    version,
    about = "Hold'em equity calculator: ranges, Monte Carlo equity, EV"
)]
pub struct PokerlabCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Simulation flags shared by `equity` and `multiway`. Unset flags fall back
/// to the resolved configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct SimArgs {
    /// Number of Monte Carlo iterations (100..=100000)
    #[arg(long)]
    pub iterations: Option<u32>,
    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
    /// Worker threads to shard the iterations across
    #[arg(long)]
    pub threads: Option<usize>,
    /// Abort the run after this many milliseconds
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Heads-up equity of a hand against a range
    Equity {
        /// Hero hole cards, e.g. "AsAh" or "A♠A♥"
        #[arg(long)]
        hero: String,
        /// Villain range, e.g. "QQ+, AKs"
        #[arg(long)]
        range: String,
        /// Known board cards (0-5)
        #[arg(long)]
        board: Option<String>,
        #[command(flatten)]
        sim: SimArgs,
        /// Pot size for EV output
        #[arg(long, requires = "invest")]
        pot: Option<f64>,
        /// Amount each player invested, for EV output
        #[arg(long, requires = "pot")]
        invest: Option<f64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Equity of a hand against several named ranges
    Multiway {
        #[arg(long)]
        hero: String,
        /// Opponent as NAME=RANGE; repeat for each opponent (1-8)
        #[arg(long = "opponent", required = true)]
        opponents: Vec<String>,
        #[arg(long)]
        board: Option<String>,
        #[command(flatten)]
        sim: SimArgs,
        /// How co-winners share the pot in reported equity
        #[arg(long = "tie-policy", value_enum)]
        tie_policy: Option<TiePolicyArg>,
        /// Pot size for per-player EV output
        #[arg(long)]
        pot: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Parse a range or list the preset ranges
    Range {
        #[arg(long, required_unless_present = "presets")]
        range: Option<String>,
        #[arg(long, conflicts_with = "range")]
        presets: bool,
        #[arg(long)]
        json: bool,
    },
    /// Evaluate 5 to 7 cards
    Eval {
        #[arg(long)]
        cards: String,
        #[arg(long)]
        json: bool,
    },
    /// Expected value of a call: pot * equity% - investment
    Ev {
        /// Equity in percent (0-100)
        #[arg(long)]
        equity: f64,
        #[arg(long)]
        pot: f64,
        #[arg(long)]
        invest: f64,
    },
    /// Benchmark heads-up equity throughput
    Bench {
        #[arg(long)]
        iterations: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TiePolicyArg {
    /// Half credit per tied iteration, averaged over ties
    Legacy,
    /// Each co-winner gets 1/winners of the iteration
    Split,
}

impl From<TiePolicyArg> for TiePolicy {
    fn from(arg: TiePolicyArg) -> Self {
        match arg {
            TiePolicyArg::Legacy => TiePolicy::Legacy,
            TiePolicyArg::Split => TiePolicy::Split,
        }
    }
}
