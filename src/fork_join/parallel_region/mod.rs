//! # Parallel Region
//!
//! The smallest fork-join program: fork a group of workers, let each one
//! print its id with four short messages, join. Lines from different
//! workers interleave in whatever order the scheduler produces; the lines
//! of any one worker always come out in program order.
//!
//! Two variants show the same trade-off as the reductions: taking the
//! output lock once per line, or formatting privately and taking it once
//! per worker.

pub mod test;

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use log::debug;

use crate::error::{KernelError, KernelResult};
use crate::registry::{KernelRunner, VariantClosure};
use crate::utils::bench::{elapsed, now};
use crate::utils::workers::fork;
use crate::utils::VariantInfo;

/// Messages every worker prints, in order.
pub const MESSAGES: [&str; 4] = ["One", "Two", "Three", "Four!"];

/// `[id] message` with the id right-aligned in two columns.
pub fn format_line(id: usize, message: &str) -> String {
    format!("[{:2}] {}\n", id, message)
}

fn locked<W>(out: &Mutex<W>) -> io::Result<std::sync::MutexGuard<'_, W>> {
    out.lock()
        .map_err(|_| io::Error::other("output lock poisoned"))
}

fn per_line_worker<W: Write>(id: usize, out: &Mutex<W>) -> io::Result<()> {
    for message in MESSAGES {
        let mut out = locked(out)?;
        out.write_all(format_line(id, message).as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

fn buffered_worker<W: Write>(id: usize, out: &Mutex<W>) -> io::Result<()> {
    let block: String = MESSAGES.iter().map(|m| format_line(id, m)).collect();
    let mut out = locked(out)?;
    out.write_all(block.as_bytes())?;
    out.flush()
}

/// Type alias for a worker body: `(worker_id, shared_output)`
pub type RegionFn<W> = fn(usize, &Mutex<W>) -> io::Result<()>;

/// Get both worker bodies for a given writer type
pub fn available_variants<W: Write>() -> Vec<VariantInfo<RegionFn<W>>> {
    vec![
        VariantInfo {
            name: "per_line",
            description: "Lock and flush the output once per line",
            function: per_line_worker::<W>,
        },
        VariantInfo {
            name: "buffered",
            description: "Format privately, lock the output once per worker",
            function: buffered_worker::<W>,
        },
    ]
}

/// Fork `workers` threads running `body` against `out`, join, and hand `out` back.
pub fn parallel_region_with<W: Write + Send>(
    workers: usize,
    out: W,
    body: RegionFn<W>,
) -> KernelResult<W> {
    if workers == 0 {
        return Err(KernelError::InvalidArgument(
            "worker count must be at least 1".to_string(),
        ));
    }
    debug!("parallel region with {} workers", workers);

    let out = Mutex::new(out);
    let results = fork(workers, false, |id| body(id, &out))?;
    results.into_iter().collect::<io::Result<Vec<()>>>()?;

    out.into_inner()
        .map_err(|_| KernelError::Io(io::Error::other("output lock poisoned")))
}

/// Per-line variant, matching a worker that prints and flushes each message.
pub fn parallel_region<W: Write + Send>(workers: usize, out: W) -> KernelResult<W> {
    parallel_region_with(workers, out, per_line_worker::<W>)
}

/// Run the region against standard output and time it.
pub fn run(workers: usize) -> KernelResult<Duration> {
    let start = now();
    parallel_region(workers, io::stdout())?;
    Ok(elapsed(start))
}

/// Runner for the fork-join print region
pub struct ParallelRegionRunner;

impl KernelRunner for ParallelRegionRunner {
    fn name(&self) -> &'static str {
        "parallel_region"
    }

    fn description(&self) -> &'static str {
        "Fork workers that each print their id, then join"
    }

    fn category(&self) -> &'static str {
        "fork_join"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        available_variants::<io::Sink>().iter().map(|v| v.name).collect()
    }

    /// `size` is ignored; output goes to a sink so only fork, lock and join are timed.
    fn variant_closures<'a>(&'a self, _size: usize, workers: usize) -> Vec<VariantClosure<'a>> {
        available_variants::<io::Sink>()
            .into_iter()
            .map(|v| {
                let body = v.function;
                VariantClosure {
                    name: v.name,
                    description: v.description,
                    run: Box::new(move || {
                        let start = now();
                        let result = parallel_region_with(workers, io::sink(), body);
                        let time = elapsed(start);
                        (time, result.ok().map(|_| workers as f64))
                    }),
                }
            })
            .collect()
    }

    fn verify(&self) -> Result<(), String> {
        let workers = 6;
        for variant in available_variants::<Vec<u8>>() {
            let out = parallel_region_with(workers, Vec::new(), variant.function)
                .map_err(|e| e.to_string())?;
            let text = String::from_utf8(out).map_err(|e| e.to_string())?;
            test::check_region_output(&text, workers)
                .map_err(|e| format!("Variant '{}': {}", variant.name, e))?;
        }
        Ok(())
    }
}
