use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

use auxpoint::api::{
    generate_audited, validate_pool, CandidateSelector, GeomCfg, SelectCfg, TriedSet,
};

mod provenance;
mod wire;

use provenance::{write_sidecar, Payload};
use wire::{read_json, write_json, WireCandidate, WireDiagnostics, WirePool, WireSnapshot};

#[derive(Parser)]
#[command(name = "auxpoint")]
#[command(about = "Auxiliary point proposals for synthetic geometry provers")]
struct Cmd {
    /// Optional run tag; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run one generation pass over a JSON snapshot and write the pool
    Generate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Log the per-family funnel and embed it in the output
        #[arg(long)]
        diagnose: bool,
        /// Re-check the pool at the strict tolerance; fail on any issue
        #[arg(long)]
        strict: bool,
    },
    /// Pick one candidate from a pool and print it as JSON
    Select {
        #[arg(long)]
        pool: PathBuf,
        /// JSON array of candidate names already tried
        #[arg(long)]
        tried: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 3)]
        weight_untried: u32,
        #[arg(long, default_value_t = 1)]
        weight_tried: u32,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            input,
            out,
            diagnose,
            strict,
        } => generate(input, out, diagnose, strict, cmd.tag),
        Action::Select {
            pool,
            tried,
            seed,
            weight_untried,
            weight_tried,
        } => select(
            pool,
            tried,
            seed,
            SelectCfg {
                weight_untried,
                weight_tried,
            },
        ),
        Action::Report => report(cmd.tag),
    }
}

fn generate(
    input: PathBuf,
    out: PathBuf,
    diagnose: bool,
    strict: bool,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "generate");
    let snapshot = read_json::<WireSnapshot>(&input)?.into_snapshot()?;
    let cfg = GeomCfg::default();
    let (pool, diag) = generate_audited(&snapshot, &cfg);
    if diagnose {
        diag.log_summary();
    }
    if strict {
        let issues = validate_pool(&pool, &snapshot, &cfg);
        for issue in &issues {
            tracing::warn!(%issue, "validation");
        }
        if !issues.is_empty() {
            bail!("{} validation issue(s) in generated pool", issues.len());
        }
    }

    let doc = WirePool {
        candidates: pool.iter().map(WireCandidate::from).collect(),
        diagnostics: diagnose.then(|| WireDiagnostics::from(&diag)),
    };
    write_json(&out, &doc)?;
    let payload = Payload::new(json!({
        "command": "generate",
        "points": snapshot.points().len(),
        "lines": snapshot.lines().len(),
        "circles": snapshot.circles().len(),
        "accepted": pool.len(),
        "strict": strict
    }))
    .with_input(&input)
    .with_tag(tag);
    let prov = write_sidecar(&out, payload)?;
    tracing::info!(accepted = pool.len(), provenance = %prov.display(), "pool written");
    Ok(())
}

fn select(pool: PathBuf, tried: Option<PathBuf>, seed: u64, cfg: SelectCfg) -> Result<()> {
    let candidates = read_json::<WirePool>(&pool)?.into_candidates()?;
    let tried: TriedSet = match &tried {
        Some(path) => read_json::<Vec<String>>(path)?.into_iter().collect(),
        None => TriedSet::new(),
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let pick = CandidateSelector::new(cfg).select(&candidates, &tried, &mut rng);
    tracing::info!(
        pool = candidates.len(),
        tried = tried.len(),
        seed,
        pick = ?pick.map(|c| c.name.as_str()),
        "select"
    );
    let out = pick.map(WireCandidate::from);
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "auxpoint_version": auxpoint::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
