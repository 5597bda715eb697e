use std::env;
use std::time::Instant;

use lazy_march::matchers::{ExactMatcher, ScoredMatcher};
use lazy_march::reference::full_flcs;
use lazy_march::{LazyMatrixMarchBuilder, MarchStats, Matcher, PrunePolicy};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("march_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Lazy Matrix March Probe: matcher calls, time and memory by workload");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Metrics:");
    eprintln!("  • evals: matcher calls (a full table needs width*height)");
    eprintln!("  • steps: candidates popped; dominated/stale: pops discarded without expansion");
    eprintln!("  • pruned: candidates cut by a new match; nodes: candidate pool size");
    eprintln!("  • wall_s: wall-clock seconds; rss_delta_kib: resident memory delta");
    eprintln!(
        "  • status: 'passed' = equals full-table DP, 'not_checked' = size > {}",
        options.verify_limit
    );
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/4] Identical sequences...");
    measurements.extend(run_workload("identical", &[256, 1024, 4096], &options, &mut sys, |len| {
        let a = deterministic_dna(len, 0);
        (a.clone(), a)
    }));

    eprintln!("[2/4] Sparse substitutions (1 in 50)...");
    measurements.extend(run_workload("substituted", &[256, 1024, 4096], &options, &mut sys, |len| {
        let a = deterministic_dna(len, 0);
        let b = a
            .iter()
            .enumerate()
            .map(|(i, &c)| if i % 50 == 25 { b'N' } else { c })
            .collect();
        (a, b)
    }));

    eprintln!("[3/4] Single deletion in the middle...");
    measurements.extend(run_workload("deletion", &[256, 1024, 4096], &options, &mut sys, |len| {
        let a = deterministic_dna(len, 0);
        let mut b = a.clone();
        b.remove(len / 2);
        (a, b)
    }));

    eprintln!("[4/4] Graded similarity on numeric ramps...");
    measurements.extend(run_fuzzy(&[128, 512, 2048], &options, &mut sys));

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("march_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    branch_threshold: f32,
    prune_policy: PrunePolicy,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 1024usize;
        let mut branch_threshold = 1.0f32;
        let mut prune_policy = PrunePolicy::default();

        while let Some(arg) = args.next() {
            let arg = arg.into();
            let (key, inline) = match arg.split_once('=') {
                Some((k, v)) => (k.to_string(), Some(v.to_string())),
                None => (arg, None),
            };
            let mut value = || -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {key}")),
                }
            };
            match key.as_str() {
                "--help" | "-h" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--format" => format = OutputFormat::from_str(&value()?)?,
                "--verify-limit" => {
                    verify_limit = value()?
                        .parse::<usize>()
                        .map_err(|_| "verify limit must be a positive integer".to_string())?;
                }
                "--branch-threshold" => {
                    branch_threshold = value()?
                        .parse::<f32>()
                        .ok()
                        .filter(|t| *t > 0.0 && *t <= 1.0)
                        .ok_or_else(|| "branch threshold must lie in (0, 1]".to_string())?;
                }
                "--prune-policy" => {
                    prune_policy = match value()?.as_str() {
                        "score" => PrunePolicy::ScoreGuarded,
                        "bound" => PrunePolicy::BoundOrdered,
                        other => return Err(format!("unknown prune policy '{other}'")),
                    };
                }
                other => return Err(format!("unrecognized argument '{other}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
            branch_threshold,
            prune_policy,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --features probe --bin march_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest sequence length verified against the full table (default: 1024)
  --branch-threshold <T>        Branch threshold in (0, 1] (default: 1.0)
  --prune-policy <score|bound>  Frontier prune stopping rule (default: score)
  -h, --help                    Print this help message

Examples:
  cargo run --features probe --bin march_probe
  cargo run --features probe --bin march_probe -- --format table --branch-threshold 0.95
  cargo run --features probe --bin march_probe -- --prune-policy bound --format json
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        let rows: Vec<Vec<Field>> = measurements.iter().map(Measurement::fields).collect();
        match self {
            OutputFormat::Csv => write_csv(&rows),
            OutputFormat::Table => write_table(&rows),
            OutputFormat::Json => write_json(&rows),
        }
    }
}

/// One run of the march on a generated sequence pair.
struct Measurement {
    scenario: &'static str,
    len: usize,
    cells: u64,
    total_match: f32,
    stats: MarchStats,
    wall_s: f64,
    rss_delta_kib: u64,
    /// `None` when the pair exceeded `--verify-limit`.
    verified: Option<Result<(), String>>,
}

/// Output column: header, rendered value, and whether JSON should quote it.
struct Field {
    name: &'static str,
    value: String,
    quoted: bool,
}

impl Field {
    fn num(name: &'static str, value: impl ToString) -> Self {
        Self { name, value: value.to_string(), quoted: false }
    }

    fn text(name: &'static str, value: impl ToString) -> Self {
        Self { name, value: value.to_string().replace('"', "'"), quoted: true }
    }
}

impl Measurement {
    fn eval_share(&self) -> f64 {
        self.stats.evals as f64 / self.cells as f64
    }

    fn status(&self) -> &'static str {
        match self.verified {
            None => "not_checked",
            Some(Ok(())) => "passed",
            Some(Err(_)) => "failed",
        }
    }

    fn fields(&self) -> Vec<Field> {
        let detail = match &self.verified {
            Some(Err(msg)) => msg.as_str(),
            _ => "",
        };
        vec![
            Field::text("scenario", self.scenario),
            Field::num("len", self.len),
            Field::num("total_match", format!("{:.3}", self.total_match)),
            Field::num("evals", self.stats.evals),
            Field::num("eval_pct", format!("{:.3}", 100.0 * self.eval_share())),
            Field::num("steps", self.stats.steps),
            Field::num("dominated", self.stats.dominated),
            Field::num("stale", self.stats.stale),
            Field::num("pruned", self.stats.pruned),
            Field::num("nodes", self.stats.nodes),
            Field::num("wall_s", format!("{:.3}", self.wall_s)),
            Field::num("rss_delta_kib", self.rss_delta_kib),
            Field::text("status", self.status()),
            Field::text("detail", detail),
        ]
    }
}

fn run_workload<G>(
    scenario: &'static str,
    sizes: &[usize],
    options: &Options,
    sys: &mut System,
    generate: G,
) -> Vec<Measurement>
where
    G: Fn(usize) -> (Vec<u8>, Vec<u8>),
{
    sizes
        .iter()
        .map(|&len| {
            let (a, b) = generate(len);
            let dims = (a.len() as u32, b.len() as u32);
            measure(scenario, len, dims, options, sys, || ExactMatcher::new(&a, &b))
        })
        .collect()
}

fn run_fuzzy(sizes: &[usize], options: &Options, sys: &mut System) -> Vec<Measurement> {
    sizes
        .iter()
        .map(|&len| {
            let a: Vec<f32> = (0..len).map(|i| i as f32).collect();
            // Same ramp, jittered and with every 10th sample dropped.
            let b: Vec<f32> = (0..len)
                .filter(|i| i % 10 != 9)
                .map(|i| i as f32 + if i % 3 == 0 { 0.2 } else { -0.1 })
                .collect();
            let dims = (a.len() as u32, b.len() as u32);
            measure("fuzzy_ramp", len, dims, options, sys, || {
                ScoredMatcher::new(&a, &b, |x: &f32, y: &f32| 1.0 - (x - y).abs())
            })
        })
        .collect()
}

fn measure<M, F>(
    scenario: &'static str,
    len: usize,
    (w, h): (u32, u32),
    options: &Options,
    sys: &mut System,
    make_matcher: F,
) -> Measurement
where
    M: Matcher,
    F: Fn() -> M,
{
    eprint!("      {scenario} len={len}... ");

    let before = rss_kib(sys);
    let start = Instant::now();
    let mut march = LazyMatrixMarchBuilder::new(w, h, make_matcher())
        .with_branch_threshold(options.branch_threshold)
        .with_prune_policy(options.prune_policy)
        .build();
    let result = march.run();
    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    let verified = (len <= options.verify_limit).then(|| {
        let baseline = full_flcs(w, h, make_matcher()).total_match;
        if (baseline - result.total_match).abs() <= 1e-3 {
            Ok(())
        } else {
            Err(format!("expected {baseline}, got {}", result.total_match))
        }
    });

    let stats = march.stats();
    let m = Measurement {
        scenario,
        len,
        cells: w as u64 * h as u64,
        total_match: result.total_match,
        stats,
        wall_s,
        rss_delta_kib: after.saturating_sub(before),
        verified,
    };
    eprintln!(
        "{} total={:.2}, evals={} ({:.2}% of cells), dominated={}, pruned={}, time={:.3}s",
        match m.verified {
            None => "○",
            Some(Ok(())) => "✓",
            Some(Err(_)) => "✗",
        },
        m.total_match,
        stats.evals,
        100.0 * m.eval_share(),
        stats.dominated,
        stats.pruned,
        wall_s
    );
    m
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Summary (branch threshold {})", options.branch_threshold);
    eprintln!("{}", "=".repeat(80));

    let failures: Vec<_> = measurements
        .iter()
        .filter_map(|m| match &m.verified {
            Some(Err(msg)) => Some((m, msg)),
            _ => None,
        })
        .collect();
    let checked = measurements.iter().filter(|m| m.verified.is_some()).count();
    let failed = failures.len();
    eprintln!("  ✓ Passed: {}", checked - failed);
    eprintln!("  ✗ Failed: {failed}");
    eprintln!("  ○ Not checked: {}", measurements.len() - checked);
    for (m, msg) in &failures {
        eprintln!("  ✗ {} (len={}): {msg}", m.scenario, m.len);
    }

    let stale: u64 = measurements.iter().map(|m| m.stats.stale as u64).sum();
    let pruned: u64 = measurements.iter().map(|m| m.stats.pruned as u64).sum();
    eprintln!("  Prune policy {:?}: {pruned} nodes pruned, {stale} stale pops", options.prune_policy);

    if failed == 0 {
        eprintln!("All verified workloads match the full-table DP.");
    } else if options.branch_threshold < 1.0 {
        eprintln!("Thresholds below 1.0 are heuristic; mismatches can be expected on fuzzy inputs.");
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn write_csv(rows: &[Vec<Field>]) -> Result<(), String> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let header: Vec<_> = first.iter().map(|f| f.name).collect();
    println!("{}", header.join(","));
    for row in rows {
        let cells: Vec<_> = row
            .iter()
            .map(|f| if f.quoted { format!("\"{}\"", f.value) } else { f.value.clone() })
            .collect();
        println!("{}", cells.join(","));
    }
    Ok(())
}

fn write_table(rows: &[Vec<Field>]) -> Result<(), String> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    // The free-form detail column is left to csv/json.
    let shown = first.len() - 1;
    let widths: Vec<usize> = (0..shown)
        .map(|c| rows.iter().map(|r| r[c].value.len()).max().unwrap_or(0).max(first[c].name.len()))
        .collect();

    let line = |cells: Vec<&str>| {
        let padded: Vec<_> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (v, &w))| if c == 0 { format!("{v:<w$}") } else { format!("{v:>w$}") })
            .collect();
        println!("{}", padded.join("  "));
    };
    line(first[..shown].iter().map(|f| f.name).collect());
    println!("{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in rows {
        line(row[..shown].iter().map(|f| f.value.as_str()).collect());
    }
    Ok(())
}

fn write_json(rows: &[Vec<Field>]) -> Result<(), String> {
    println!("[");
    for (idx, row) in rows.iter().enumerate() {
        let members: Vec<_> = row
            .iter()
            .map(|f| match (f.quoted, f.value.is_empty()) {
                (true, true) => format!("\"{}\":null", f.name),
                (true, false) => format!("\"{}\":\"{}\"", f.name, f.value),
                (false, _) => format!("\"{}\":{}", f.name, f.value),
            })
            .collect();
        let sep = if idx + 1 == rows.len() { "" } else { "," };
        println!("  {{{}}}{sep}", members.join(","));
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

fn deterministic_dna(len: usize, offset: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|i| ALPHABET[(i * 7 / 3 + offset) % ALPHABET.len()])
        .collect()
}
