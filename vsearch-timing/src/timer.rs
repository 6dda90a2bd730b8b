use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Clock used to pace the frame loop and measure decision times.
pub trait Timer: Clone + Send + Sync {
    type Timestamp: Copy + Send + Sync;
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, since: Self::Timestamp) -> Duration;
    fn sleep(&self, d: Duration);
    fn record_frame(&mut self, d: Duration);
    fn frame_count(&self) -> usize;
    fn frame_stats(&self) -> FrameStats;
}

/// Summary of the most recent frame durations, in nanoseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub average_frame_time_ns: f64,
    pub jitter_ns: f64,
    pub min_frame_time_ns: f64,
    pub max_frame_time_ns: f64,
    pub effective_fps: f64,
}

impl FrameStats {
    fn from_samples(samples: &VecDeque<Duration>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let n = samples.len() as f64;
        let (mut sum, mut min, mut max) = (0.0, f64::INFINITY, f64::NEG_INFINITY);
        for d in samples {
            let ns = d.as_nanos() as f64;
            sum += ns;
            min = min.min(ns);
            max = max.max(ns);
        }
        let avg = sum / n;
        let var = samples
            .iter()
            .map(|d| (d.as_nanos() as f64 - avg).powi(2))
            .sum::<f64>()
            / n;
        Self {
            average_frame_time_ns: avg,
            jitter_ns: var.sqrt(),
            min_frame_time_ns: min,
            max_frame_time_ns: max,
            effective_fps: if avg > 0.0 { 1e9 / avg } else { 0.0 },
        }
    }
}

/// Monotonic clock with a bounded window of frame samples.
#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    pub start: Instant,
    pub frame_times: VecDeque<Duration>,
    pub max_samples: usize,
}

impl Timer for HighPrecisionTimer {
    type Timestamp = u64;

    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    fn elapsed(&self, since: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(since))
    }

    fn sleep(&self, d: Duration) {
        self.high_precision_sleep(d)
    }

    fn record_frame(&mut self, d: Duration) {
        if self.max_samples == 0 {
            return;
        }
        while self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(d);
    }

    fn frame_count(&self) -> usize {
        self.frame_times.len()
    }

    fn frame_stats(&self) -> FrameStats {
        FrameStats::from_samples(&self.frame_times)
    }
}

impl HighPrecisionTimer {
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn with_capacity(max_samples: usize) -> Self {
        Self {
            start: Instant::now(),
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    pub fn high_precision_sleep(&self, duration: Duration) {
        #[cfg(all(feature = "high_precision_timer", target_os = "windows"))]
        self.windows_sleep(duration);
        #[cfg(all(feature = "high_precision_timer", target_os = "linux"))]
        self.linux_sleep(duration);
        #[cfg(all(feature = "high_precision_timer", target_os = "macos"))]
        self.macos_sleep(duration);
        #[cfg(not(all(
            feature = "high_precision_timer",
            any(target_os = "windows", target_os = "linux", target_os = "macos")
        )))]
        std::thread::sleep(duration);
    }

    #[cfg(all(feature = "high_precision_timer", target_os = "windows"))]
    fn windows_sleep(&self, duration: Duration) {
        use windows::core::PCWSTR;
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Threading::{
            CreateWaitableTimerW, SetWaitableTimer, WaitForSingleObject, INFINITE,
        };

        unsafe {
            let Ok(timer) = CreateWaitableTimerW(None, true, PCWSTR::null()) else {
                std::thread::sleep(duration);
                return;
            };

            // negative means relative, in 100ns units
            let due_time = -(duration.as_nanos() as i64 / 100);

            if SetWaitableTimer(timer, &due_time, 0, None, None, false).is_ok() {
                WaitForSingleObject(timer, INFINITE);
            }

            let _ = CloseHandle(timer);
        }
    }

    #[cfg(all(feature = "high_precision_timer", target_os = "linux"))]
    fn linux_sleep(&self, duration: Duration) {
        use libc::{clock_nanosleep, timespec, CLOCK_MONOTONIC};

        let req = timespec {
            tv_sec: duration.as_secs() as libc::time_t,
            tv_nsec: duration.subsec_nanos() as libc::c_long,
        };

        unsafe {
            clock_nanosleep(CLOCK_MONOTONIC, 0, &req, std::ptr::null_mut());
        }
    }

    #[cfg(all(feature = "high_precision_timer", target_os = "macos"))]
    fn macos_sleep(&self, duration: Duration) {
        use mach2::mach_time::{mach_absolute_time, mach_timebase_info, mach_timebase_info_data_t};

        // busy-wait below 100us
        if duration.as_nanos() < 100_000 {
            unsafe {
                let start = mach_absolute_time();
                let mut timebase = mach_timebase_info_data_t { numer: 0, denom: 0 };
                mach_timebase_info(&mut timebase);

                let target_ticks =
                    duration.as_nanos() as u64 * timebase.denom as u64 / timebase.numer as u64;

                while mach_absolute_time() - start < target_ticks {
                    std::hint::spin_loop();
                }
            }
        } else {
            std::thread::sleep(duration);
        }
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a fixed-rate frame loop and reports the real time between frames.
#[derive(Debug, Clone)]
pub struct FramePacer<T: Timer<Timestamp = u64> = HighPrecisionTimer> {
    pub timer: T,
    budget: Duration,
    last_frame: u64,
}

impl<T: Timer<Timestamp = u64>> FramePacer<T> {
    pub fn new(timer: T, frame_rate_hz: f64) -> Self {
        let budget = if frame_rate_hz > 0.0 {
            Duration::from_nanos((1e9 / frame_rate_hz) as u64)
        } else {
            Duration::ZERO
        };
        let last_frame = timer.now();
        log::debug!("frame budget {:.3} ms", budget.as_secs_f64() * 1e3);
        Self {
            timer,
            budget,
            last_frame,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Sleeps out the rest of the current frame, then returns the time since
    /// the previous call.
    pub fn tick(&mut self) -> Duration {
        let spent = self.timer.elapsed(self.last_frame);
        if spent < self.budget {
            self.timer.sleep(self.budget - spent);
        }
        let now = self.timer.now();
        let dt = Duration::from_nanos(now.saturating_sub(self.last_frame));
        self.last_frame = now;
        self.timer.record_frame(dt);
        dt
    }
}
