//! Output checks for the parallel region.

use super::MESSAGES;

/// Split `[ 3] Two` into `(3, "Two")`.
fn parse_line(line: &str) -> Option<(usize, &str)> {
    let rest = line.strip_prefix('[')?;
    let (id, message) = rest.split_once("] ")?;
    Some((id.trim().parse().ok()?, message))
}

/// Check that every worker in `0..workers` printed all messages, in order,
/// and nothing else was printed.
pub fn check_region_output(text: &str, workers: usize) -> Result<(), String> {
    let mut progress = vec![0usize; workers];
    let mut lines = 0;

    for line in text.lines() {
        let (id, message) = parse_line(line).ok_or_else(|| format!("malformed line {:?}", line))?;
        let next = progress
            .get_mut(id)
            .ok_or_else(|| format!("unknown worker id {}", id))?;
        match MESSAGES.get(*next) {
            Some(expected) if *expected == message => *next += 1,
            _ => {
                return Err(format!(
                    "worker {} printed {:?} out of order",
                    id, message
                ))
            }
        }
        lines += 1;
    }

    if lines != workers * MESSAGES.len() {
        return Err(format!(
            "expected {} lines, got {}",
            workers * MESSAGES.len(),
            lines
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use crate::fork_join::parallel_region::*;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(3, "One"), "[ 3] One\n");
        assert_eq!(format_line(12, "Four!"), "[12] Four!\n");
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("[ 3] Two"), Some((3, "Two")));
        assert_eq!(parse_line("[12] Four!"), Some((12, "Four!")));
        assert_eq!(parse_line("garbage"), None);
    }

    #[test]
    fn test_region_prints_every_line() {
        for workers in [1, 2, 8, 16] {
            let out = parallel_region(workers, Vec::new()).unwrap();
            let text = String::from_utf8(out).unwrap();
            check_region_output(&text, workers).unwrap();
        }
    }

    #[test]
    fn test_buffered_variant_keeps_blocks_together() {
        let variants = available_variants::<Vec<u8>>();
        let buffered = variants.iter().find(|v| v.name == "buffered").unwrap();
        let out = parallel_region_with(5, Vec::new(), buffered.function).unwrap();
        let text = String::from_utf8(out).unwrap();
        check_region_output(&text, 5).unwrap();

        // Each worker's four lines are contiguous.
        let ids: Vec<usize> = text.lines().map(|l| parse_line(l).unwrap().0).collect();
        for block in ids.chunks(MESSAGES.len()) {
            assert!(block.iter().all(|&id| id == block[0]));
        }
    }

    #[test]
    fn test_check_detects_missing_lines() {
        let text = format_line(0, "One");
        assert!(check_region_output(&text, 1).is_err());
        let text: String = MESSAGES.iter().rev().map(|m| format_line(0, m)).collect();
        assert!(check_region_output(&text, 1).is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            parallel_region(0, Vec::new()),
            Err(KernelError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_write_errors_propagate() {
        struct Broken;
        impl std::io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("broken pipe"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        assert!(matches!(
            parallel_region(2, Broken),
            Err(KernelError::Io(_))
        ));
    }
}
