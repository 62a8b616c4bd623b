use clap::{ArgAction, Parser, Subcommand};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

use pqce_estimator::conf::DEFAULT_JOBS;
use pqce_estimator::{
    lip, pce, report, Cost, CostModel, EstimatorConfig, LipParameters, PceParameters, ShapeModel,
};

#[derive(Debug, Parser)]
#[command(name = "pqce-estimate")]
#[command(about = "Attack cost estimates for code equivalence and lattice isomorphism")]
struct Args {
    #[command(subcommand)]
    problem: Problem,

    /// Run the cheap subset of cost models only.
    #[arg(long, global = true)]
    rough: bool,

    #[arg(long, global = true, default_value_t = DEFAULT_JOBS)]
    jobs: usize,

    /// Record failing cost models instead of aborting.
    #[arg(long, global = true, default_value_t = true, action = ArgAction::Set)]
    catch_exceptions: bool,

    /// Print the tag → cost mapping as JSON instead of report lines.
    #[arg(long, global = true)]
    json: bool,

    /// Log filter, written to stderr.
    #[arg(long, global = true, default_value = "warn")]
    log: String,
}

#[derive(Debug, Subcommand)]
enum Problem {
    /// Permutation code equivalence.
    Pce {
        #[arg(long)]
        q: u64,
        #[arg(long)]
        n: u64,
        #[arg(long)]
        k: u64,
        #[arg(long)]
        h: u64,
        #[arg(long)]
        w: u64,
    },
    /// Lattice isomorphism.
    Lip {
        #[arg(long)]
        n: u64,
        #[arg(long)]
        q: u64,
        #[arg(long, default_value = "matzov")]
        cost_model: CostModel,
        #[arg(long, default_value = "gsa")]
        shape_model: ShapeModel,
    },
}

impl Args {
    fn config(&self) -> EstimatorConfig {
        let mut config = EstimatorConfig {
            jobs: self.jobs,
            catch_exceptions: self.catch_exceptions,
            ..EstimatorConfig::default()
        };
        if let Problem::Lip {
            cost_model,
            shape_model,
            ..
        } = self.problem
        {
            config.red_cost_model = cost_model;
            config.red_shape_model = shape_model;
        }
        config
    }
}

fn estimate(
    problem: &Problem,
    rough: bool,
    config: &EstimatorConfig,
) -> pqce_estimator::Result<BTreeMap<String, Cost>> {
    let (jobs, catch_exceptions) = (config.jobs, config.catch_exceptions);
    match *problem {
        Problem::Pce { q, n, k, h, w } => {
            let params = PceParameters::new(q, n, k, h, w);
            tracing::debug!(%params, rough, jobs, "estimating");
            if rough {
                pce::Estimate.rough(&params, jobs, catch_exceptions)
            } else {
                pce::Estimate.full(&params, jobs, catch_exceptions)
            }
        }
        Problem::Lip { n, q, .. } => {
            let params = LipParameters::new(n, q);
            let estimate = lip::Estimate::from(config);
            tracing::debug!(
                %params,
                cost_model = %config.red_cost_model,
                shape_model = %config.red_shape_model,
                rough,
                jobs,
                "estimating"
            );
            if rough {
                estimate.rough(&params, jobs, catch_exceptions)
            } else {
                estimate.full(&params, jobs, catch_exceptions)
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(std::io::stderr)
        .init();

    let costs = estimate(&args.problem, args.rough, &args.config())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&costs)?);
    } else {
        for line in report::lines(&costs) {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqce_estimator::EstimatorError;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pqce-estimate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_match_config() {
        let args = parse(&["pce", "--q", "7", "--n", "128", "--k", "64", "--h", "50", "--w", "5"]);
        assert_eq!(args.config(), EstimatorConfig::default());
        assert!(!args.rough && !args.json);
        assert_eq!(args.log, "warn");
    }

    #[test]
    fn test_lip_flags_reach_config() {
        let args = parse(&[
            "lip",
            "--n",
            "200",
            "--q",
            "127",
            "--cost-model",
            "adps16",
            "--shape-model",
            "zgsa",
            "--jobs",
            "3",
            "--catch-exceptions",
            "false",
        ]);
        let config = args.config();
        assert_eq!(config.jobs, 3);
        assert!(!config.catch_exceptions);
        assert_eq!(config.red_cost_model, CostModel::Adps16);
        assert_eq!(config.red_shape_model, ShapeModel::Zgsa);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let result = Args::try_parse_from([
            "pqce-estimate", "lip", "--n", "200", "--q", "127", "--cost-model", "bkz2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_lip_estimate_from_args() {
        let args = parse(&["lip", "--n", "200", "--q", "127", "--jobs", "2"]);
        let costs = estimate(&args.problem, args.rough, &args.config()).unwrap();
        let lines = report::lines(&costs);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  havreg :: rop: ≈2^132.9"));
        assert!(lines[1].starts_with("    hull :: rop: ≈2^86.7"));
    }

    #[test]
    fn test_pce_rough_json() {
        let args = parse(&[
            "pce", "--q", "7", "--n", "128", "--k", "64", "--h", "50", "--w", "5", "--rough",
        ]);
        let costs = estimate(&args.problem, args.rough, &args.config()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&costs).unwrap();
        assert_eq!(json["ssa"]["tag"], "ssa");
        assert_eq!(json["beullens"]["problem"]["kind"], "Pce");
        assert!(json.get("leon").is_none());
    }

    #[test]
    fn test_zero_jobs_is_an_error() {
        let args = parse(&["lip", "--n", "200", "--q", "127", "--jobs", "0"]);
        assert!(matches!(
            estimate(&args.problem, args.rough, &args.config()),
            Err(EstimatorError::InvalidParameter(_))
        ));
    }
}
