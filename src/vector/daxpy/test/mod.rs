//! Tests for the daxpy update.

#[cfg(test)]
mod tests {
    use crate::config::{Coefficients, DaxpyConfig};
    use crate::error::KernelError;
    use crate::vector::daxpy::*;

    #[test]
    fn test_daxpy_basic() {
        let pool = build_pool(2).unwrap();
        let x = [1.0, 2.0, 3.0];
        let y = [10.0, 20.0, 30.0];
        let z = daxpy(&pool, 2.0, &x, &y).unwrap();
        assert_eq!(z, vec![12.0, 24.0, 36.0]);
    }

    #[test]
    fn test_fill_matches_serial() {
        let pool = build_pool(4).unwrap();
        let coeffs = Coefficients::default();
        let (x, y) = fill_inputs(&pool, 10_001, coeffs).unwrap();
        assert_eq!(x.len(), 10_001);
        for i in [0, 1, 5000, 10_000] {
            assert_eq!(x[i], coeffs.c1 * i as f64);
            assert_eq!(y[i], coeffs.c2 * i as f64);
        }
    }

    #[test]
    fn test_parallel_matches_serial_formula() {
        let pool = build_pool(8).unwrap();
        let (x, y) = fill_inputs(&pool, 100_000, Coefficients::default()).unwrap();
        let z = daxpy(&pool, 2.23, &x, &y).unwrap();
        for (i, &zi) in z.iter().enumerate() {
            assert_eq!(zi, 2.23 * x[i] + y[i], "index {}", i);
        }
    }

    #[test]
    fn test_expensive_matches_on_small_inputs() {
        let pool = build_pool(2).unwrap();
        let (x, y) = fill_inputs(&pool, 64, Coefficients::default()).unwrap();
        let cheap = daxpy(&pool, 2.23, &x, &y).unwrap();
        let costly = daxpy_expensive(&pool, 2.23, &x, &y).unwrap();
        for (a, b) in cheap.iter().zip(&costly) {
            assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_expensive_overflows_on_large_inputs() {
        assert!(axpy_expensive(1.0, 400.0, 400.0).is_infinite());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let pool = build_pool(2).unwrap();
        assert!(matches!(
            daxpy(&pool, 1.0, &[], &[]),
            Err(KernelError::InvalidArgument(_))
        ));
        assert!(matches!(
            daxpy(&pool, 1.0, &[1.0, 2.0], &[1.0]),
            Err(KernelError::InvalidArgument(_))
        ));
        assert!(matches!(
            build_pool(0),
            Err(KernelError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_run_reports_workers() {
        let config = DaxpyConfig {
            n: 1000,
            workers: 3,
            alpha: 2.23,
        };
        let report = run(&config, axpy).unwrap();
        assert_eq!(report.workers, 3);
        assert_eq!(report.len, 1000);
        assert_eq!(report.last, 2.23 * (1.23 * 999.0) + 4.56 * 999.0);
    }

    #[test]
    fn test_run_rejects_zero_length() {
        let config = DaxpyConfig {
            n: 0,
            ..DaxpyConfig::default()
        };
        assert!(matches!(
            run(&config, axpy),
            Err(KernelError::InvalidArgument(_))
        ));
    }
}
