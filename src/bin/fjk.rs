//! CLI for the fork-join kernels.
//!
//! Usage:
//!   fjk dot --size 10000000 --workers 8     # One timed reduction
//!   fjk dot --contention                    # Per-worker vs per-element combine
//!   fjk daxpy --expensive                   # Timed daxpy update
//!   fjk region --workers 4                  # Fork-join print demo
//!   fjk bench [KERNEL] --sizes 1000,100000  # Benchmark all variants
//!   fjk list                                # List kernels

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};

use fork_join_kernels::config::{
    available_workers, Coefficients, DaxpyConfig, ReduceConfig, DEFAULT_ALPHA, DEFAULT_DAXPY_LEN,
    DEFAULT_REDUCE_LEN,
};
use fork_join_kernels::reduction::dot_product::{self, linear_inputs, measure_contention, Strategy};
use fork_join_kernels::registry::build_registry;
use fork_join_kernels::utils::runner::{export_csv, run_kernel, to_rows};
use fork_join_kernels::utils::TimingConfig;
use fork_join_kernels::vector::daxpy::{self, axpy, axpy_expensive};
use fork_join_kernels::{fork_join::parallel_region, tui, KernelError, KernelResult};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parallel dot product of x[i] = 1.23*i and y[i] = 4.56*i
    Dot {
        /// Vector length
        #[arg(short = 'n', long, default_value_t = DEFAULT_REDUCE_LEN)]
        size: usize,

        /// Number of workers (default: available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// How partial sums are combined
        #[arg(short, long, value_enum, default_value_t = StrategyArg::PartialsFold)]
        strategy: StrategyArg,

        /// Pin each worker to a core
        #[arg(long)]
        pin: bool,

        /// Time per-worker against per-element combine instead
        #[arg(long)]
        contention: bool,
    },

    /// Data-parallel z = alpha*x + y
    Daxpy {
        /// Vector length
        #[arg(short = 'n', long, default_value_t = DEFAULT_DAXPY_LEN)]
        size: usize,

        /// Size of the worker pool (default: available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,

        /// Use z = ln(exp(alpha*x) * exp(y))
        #[arg(long)]
        expensive: bool,
    },

    /// Fork workers that print their id, then join
    Region {
        /// Number of workers (default: available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Benchmark every variant of one or all kernels
    Bench {
        /// Kernel to run (omit for all)
        kernel: Option<String>,

        /// Comma-separated input sizes
        #[arg(long, value_delimiter = ',', default_values_t = [10_000usize, 1_000_000])]
        sizes: Vec<usize>,

        /// Number of workers (default: available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Measurement runs per variant
        #[arg(short = 'r', long = "iter", default_value_t = 10)]
        runs: usize,

        /// Seed for the execution schedule (default: time-based)
        #[arg(long)]
        seed: Option<u64>,

        /// Export raw timings to CSV
        #[arg(long)]
        csv: Option<String>,
    },

    /// List available kernels
    List,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Serial,
    PerElementAtomic,
    PerWorkerAtomic,
    PerWorkerMutex,
    PartialsFold,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Serial => Strategy::Serial,
            StrategyArg::PerElementAtomic => Strategy::PerElementAtomic,
            StrategyArg::PerWorkerAtomic => Strategy::PerWorkerAtomic,
            StrategyArg::PerWorkerMutex => Strategy::PerWorkerMutex,
            StrategyArg::PartialsFold => Strategy::PartialsFold,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> KernelResult<()> {
    match command {
        Command::Dot {
            size,
            workers,
            strategy,
            pin,
            contention,
        } => {
            let mut config = ReduceConfig::new(size, workers.unwrap_or_else(available_workers));
            config.pin_workers = pin;
            if contention {
                config.validate()?;
                let (x, y) = linear_inputs(size, Coefficients::default())?;
                let report = measure_contention(&x, &y, &config, 3)?;
                tui::print_contention_report(&report, config.active_workers());
            } else {
                let report = dot_product::run(&config, Coefficients::default(), strategy.into())?;
                tui::print_dot_report(&report);
            }
        }
        Command::Daxpy {
            size,
            workers,
            alpha,
            expensive,
        } => {
            let config = DaxpyConfig {
                n: size,
                workers: workers.unwrap_or_else(available_workers),
                alpha,
            };
            let kernel: daxpy::AxpyFn = if expensive { axpy_expensive } else { axpy };
            let report = daxpy::run(&config, kernel)?;
            tui::print_daxpy_report(&report);
        }
        Command::Region { workers } => {
            parallel_region::run(workers.unwrap_or_else(available_workers))?;
        }
        Command::Bench {
            kernel,
            sizes,
            workers,
            runs,
            seed,
            csv,
        } => bench(kernel, &sizes, workers.unwrap_or_else(available_workers), runs, seed, csv)?,
        Command::List => tui::print_available_kernels(&build_registry()),
    }
    Ok(())
}

fn bench(
    filter: Option<String>,
    sizes: &[usize],
    workers: usize,
    runs: usize,
    seed: Option<u64>,
    csv: Option<String>,
) -> KernelResult<()> {
    let registry = build_registry();
    let kernels = match filter {
        Some(name) => vec![registry.find(&name).ok_or_else(|| {
            KernelError::InvalidArgument(format!(
                "kernel '{}' not found, available: {:?}",
                name,
                registry.list_names()
            ))
        })?],
        None => registry.all().iter().map(|k| k.as_ref()).collect(),
    };
    let config = TimingConfig {
        runs_per_variant: runs.max(1),
        seed,
        ..TimingConfig::default()
    };

    tui::print_header();
    let mut rows = Vec::new();
    for kernel in kernels {
        tui::print_kernel_info_box(kernel, workers);
        for &size in sizes {
            let results = run_kernel(kernel, size, workers, &config);
            tui::print_results_table(&results, size);
            rows.extend(to_rows(kernel.name(), size, workers, &results));
        }
    }

    if let Some(path) = csv {
        export_csv(&path, &rows)?;
        info!("wrote {} rows to {}", rows.len(), path);
    }
    println!("Note: Speedup is relative to the first variant.");
    Ok(())
}
