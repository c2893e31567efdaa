use pokedex_battle::config::{BattleSetupConfig, Difficulty};
use pokedex_battle::{run, CliOptions};
use simple_logger::SimpleLogger;
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: pokedex-battle [--team team.json] [--config config.json] [--seed SEED] \
[--preset quick|random|expert] [--moves 0,1,0,...] [--auto easy|medium|hard] [--sims N] [--delay-ms MS] [--json] [--verbose]"
    );
    std::process::exit(1);
}

fn parse_difficulty(val: &str) -> anyhow::Result<Difficulty> {
    match val.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        other => anyhow::bail!("Unknown difficulty {other} (use easy, medium or hard)"),
    }
}

fn parse_args() -> anyhow::Result<(CliOptions, bool)> {
    let mut opts = CliOptions::default();
    let mut verbose = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--team" => {
                opts.team_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--team requires a path (e.g. --team team.json)")
                })?);
            }
            "--config" => {
                opts.config_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--config requires a path (e.g. --config config.json)")
                })?);
            }
            "--preset" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--preset requires quick, random or expert"))?;
                opts.preset = Some(BattleSetupConfig::preset(&val).ok_or_else(|| {
                    anyhow::anyhow!("Unknown preset {val} (use quick, random or expert)")
                })?);
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                opts.seed = val.parse()?;
            }
            "--moves" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--moves requires a list like 0,1,0"))?;
                opts.moves = val
                    .split(',')
                    .filter(|part| !part.trim().is_empty())
                    .map(|part| part.trim().parse::<usize>())
                    .collect::<Result<_, _>>()?;
            }
            "--auto" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--auto requires easy, medium or hard"))?;
                opts.auto = Some(parse_difficulty(&val)?);
            }
            "--sims" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--sims requires a number"))?;
                opts.sims = val.parse()?;
            }
            "--delay-ms" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--delay-ms requires milliseconds"))?;
                opts.delay_ms = val.parse()?;
            }
            "--json" => opts.json = true,
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok((opts, verbose))
}

fn main() -> anyhow::Result<()> {
    let (opts, verbose) = parse_args()?;
    let level = if verbose {
        log::LevelFilter::Debug
    } else if opts.json {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;
    run(opts)
}
