use pattern_engine::bench::{run_sweep, summarize, BenchConfig};
use pattern_engine::generate::{random_instance, GeneratorConfig};
use pattern_engine::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut kind: Option<String> = None;
    let mut size: usize = 16;
    let mut seed: Option<u64> = None;
    let mut json = false;
    let mut bench = false;
    let mut iterations: Option<usize> = None;
    let mut workers: Option<usize> = None;
    let mut dimensions: Option<usize> = None;
    let mut generator = GeneratorConfig::default();

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--kind" => {
                kind = Some(arg_value(&args, i).to_string());
                i += 2;
            }
            "--size" => {
                size = parse_arg(&args, i);
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_arg(&args, i));
                i += 2;
            }
            "--colors" => {
                generator.max_colors = parse_arg(&args, i);
                i += 2;
            }
            "--edge-p" => {
                generator.edge_probability = parse_arg(&args, i);
                i += 2;
            }
            "--dimensions" => {
                dimensions = Some(parse_arg(&args, i));
                i += 2;
            }
            "--iterations" => {
                iterations = Some(parse_arg(&args, i));
                i += 2;
            }
            "--workers" => {
                workers = Some(parse_arg(&args, i));
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--bench" => {
                bench = true;
                i += 1;
            }
            "--help" | "-h" => usage_and_exit(0),
            _ => usage_and_exit(2),
        }
    }

    if let Some(n) = workers {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
            warn!("could not size the worker pool: {e}");
        }
    }

    let outcome = if bench {
        run_bench(kind.as_deref(), seed, iterations, dimensions, generator, json)
    } else {
        run_single(kind.as_deref().unwrap_or("tour"), size, seed, dimensions, &generator, json)
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run_single(
    kind: &str,
    size: usize,
    seed: Option<u64>,
    dimensions: Option<usize>,
    generator: &GeneratorConfig,
    json: bool,
) -> Result<(), EngineError> {
    let kind: ProblemKind = kind.parse()?;
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut instance = random_instance(&mut rng, kind, size, generator)?;
    if let Some(d) = dimensions {
        instance = instance.with_dimensions(d);
    }

    info!(%kind, size = instance.size(), seed, "solving generated instance");
    let mut engine = Engine::new();
    let result = engine.solve(&instance, &SolveOptions::default())?;

    if json {
        print_json(&result);
        return Ok(());
    }

    println!("--------------------------------------------------");
    println!("Kind: {} | Size: {} | Seed: {seed}", result.kind, result.size);
    println!("Valid: {} | Elapsed: {:.3} ms", result.valid, result.elapsed_ms);
    println!(
        "Cycle: {} | Drift state: {:+.6} | Cache hit: {}",
        result.cycle, result.drift_state, result.cache_hit
    );
    for (rank, pair) in result.pattern.pairs.iter().enumerate() {
        println!("Pair #{rank}: ({}, {}) r={:+.4}", pair.a, pair.b, pair.correlation);
    }
    match &result.solution {
        Solution::Tour { order, distance } => {
            println!("Tour: {order:?}");
            println!("Distance: {distance:.4}");
        }
        Solution::Coloring {
            colors,
            colors_used,
        } => {
            println!("Colors: {colors:?}");
            println!("Colors used: {colors_used}");
        }
        Solution::Satisfaction {
            assignment,
            satisfied_clauses,
        } => {
            let bits: String = assignment.iter().map(|&b| if b { '1' } else { '0' }).collect();
            println!("Assignment: {bits}");
            println!("Satisfied clauses: {satisfied_clauses}");
        }
        Solution::SubsetSelection {
            selected,
            sum,
            difference,
        } => {
            println!("Selected: {selected:?}");
            println!("Sum: {sum} | Difference: {difference}");
        }
    }
    match (result.metrics.measured_complexity, result.metrics.polynomial_degree) {
        (Some(c), Some(d)) => println!("Measured complexity: {c:.6} | Degree estimate: {d:.2}"),
        (Some(c), None) => println!("Measured complexity: {c:.6}"),
        _ => {}
    }
    println!("--------------------------------------------------");
    Ok(())
}

fn run_bench(
    kind: Option<&str>,
    seed: Option<u64>,
    iterations: Option<usize>,
    dimensions: Option<usize>,
    generator: GeneratorConfig,
    json: bool,
) -> Result<(), EngineError> {
    let mut cfg = BenchConfig {
        seed,
        generator,
        ..BenchConfig::default()
    };
    if let Some(k) = kind {
        cfg.kinds = vec![k.parse()?];
    }
    if let Some(n) = iterations {
        cfg.iterations = n;
    }
    if let Some(d) = dimensions {
        cfg.engine.dimensions = d;
    }

    let rows = run_sweep(&cfg)?;
    let summary = summarize(&rows);

    if json {
        print_json(&summary);
        return Ok(());
    }

    println!("{:<10} {:>6} {:>6} {:>8} {:>12}", "kind", "size", "runs", "valid", "mean ms");
    for s in &summary {
        println!(
            "{:<10} {:>6} {:>6} {:>7.1}% {:>12.4}",
            s.kind.name(),
            s.size,
            s.runs,
            s.valid_rate * 100.0,
            s.mean_elapsed_ms
        );
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

fn arg_value(args: &[String], i: usize) -> &str {
    args.get(i + 1).map_or_else(|| usage_and_exit(2), String::as_str)
}

fn parse_arg<T: std::str::FromStr>(args: &[String], i: usize) -> T {
    arg_value(args, i).parse().unwrap_or_else(|_| usage_and_exit(2))
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  pattern-engine [--kind K] [--size N] [--seed SEED] [--colors C] [--edge-p P] [--dimensions D] [--json]\n  pattern-engine --bench [--kind K] [--iterations N] [--workers N] [--seed SEED] [--json]\n\nOptions:\n  --kind K          tour | coloring | sat | subset (default: tour)\n  --size N          Instance size (default: 16)\n  --seed SEED       Deterministic generator seed (optional)\n  --colors C        Color budget for coloring instances (default: 4)\n  --edge-p P        Edge probability for coloring instances (default: 0.3)\n  --dimensions D    Candidate-space dimensions (default: 11)\n  --bench           Run the benchmark sweep over kinds and sizes\n  --iterations N    Solves per (kind, size) in the sweep (default: 5)\n  --workers N       Worker threads for the sweep (default: all cores)\n  --json            Print results as JSON\n\nLogging is controlled by RUST_LOG (default: info).\n"
    );
    std::process::exit(code)
}
