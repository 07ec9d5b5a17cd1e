//! Thread-to-core pinning for workers and the measuring thread.
//!
//! Linux goes through `libc::sched_{get,set}affinity`. Other platforms get
//! a no-op fallback: guards report themselves as unpinned and workers run
//! wherever the scheduler puts them.

#[cfg(target_os = "linux")]
mod platform {
    use std::mem;

    pub type Mask = libc::cpu_set_t;

    pub fn online_cores() -> Option<usize> {
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        (n > 0).then_some(n as usize)
    }

    pub fn current_cpu() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn get_mask() -> Option<Mask> {
        unsafe {
            let mut set: Mask = mem::zeroed();
            (libc::sched_getaffinity(0, mem::size_of::<Mask>(), &mut set) == 0).then_some(set)
        }
    }

    pub fn set_mask(set: &Mask) -> bool {
        unsafe { libc::sched_setaffinity(0, mem::size_of::<Mask>(), set) == 0 }
    }

    pub fn single_core_mask(core: usize) -> Mask {
        unsafe {
            let mut set: Mask = mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core, &mut set);
            set
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub type Mask = ();

    pub fn online_cores() -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }
    pub fn current_cpu() -> Option<usize> {
        None
    }
    pub fn get_mask() -> Option<Mask> {
        None
    }
    pub fn set_mask(_set: &Mask) -> bool {
        false
    }
    pub fn single_core_mask(_core: usize) -> Mask {}
}

/// Number of online cores, if the platform reports it
pub fn core_count() -> Option<usize> {
    platform::online_cores()
}

/// Core the calling thread is running on right now
pub fn current_cpu() -> Option<usize> {
    platform::current_cpu()
}

/// RAII guard: pins the calling thread on creation, restores the previous
/// affinity mask on drop.
///
/// ```ignore
/// {
///     let _pin = PinGuard::with_core(worker_id % cores);
///     // ... worker loop ...
/// } // original mask restored here
/// ```
pub struct PinGuard {
    saved: Option<platform::Mask>,
    core: Option<usize>,
}

impl PinGuard {
    /// Pin to the core the thread is currently running on, or core 0.
    pub fn new() -> Self {
        Self::with_core(current_cpu().unwrap_or(0))
    }

    /// Pin to a specific core.
    pub fn with_core(core: usize) -> Self {
        let saved = platform::get_mask();
        let pinned = saved.is_some() && platform::set_mask(&platform::single_core_mask(core));
        if !pinned {
            log::debug!("could not pin thread to core {}", core);
        }
        Self {
            saved,
            core: pinned.then_some(core),
        }
    }

    /// Pin worker `worker_id` to a core, spreading workers round-robin.
    pub fn for_worker(worker_id: usize) -> Self {
        Self::with_core(worker_id % core_count().unwrap_or(1))
    }

    pub fn core_id(&self) -> Option<usize> {
        self.core
    }

    pub fn is_pinned(&self) -> bool {
        self.core.is_some()
    }
}

impl Drop for PinGuard {
    fn drop(&mut self) {
        if self.core.is_some() {
            if let Some(saved) = self.saved.as_ref() {
                platform::set_mask(saved);
            }
        }
    }
}

impl Default for PinGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_count() {
        let cores = core_count();
        assert!(cores.is_some(), "Should be able to count cores");
        assert!(cores.unwrap() >= 1);
    }

    #[test]
    fn test_pin_guard() {
        let guard = PinGuard::new();
        if guard.is_pinned() {
            assert!(guard.core_id().is_some());
        }
        drop(guard);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_guard_restores_mask() {
        let before = platform::get_mask().expect("affinity mask readable");
        let allowed_before = unsafe { libc::CPU_COUNT(&before) };
        {
            let guard = PinGuard::for_worker(0);
            if guard.is_pinned() {
                let during = platform::get_mask().unwrap();
                assert_eq!(unsafe { libc::CPU_COUNT(&during) }, 1);
            }
        }
        let after = platform::get_mask().unwrap();
        assert_eq!(unsafe { libc::CPU_COUNT(&after) }, allowed_before);
    }
}
