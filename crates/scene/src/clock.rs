use orrery_config::ClockConfig;

/// Simulation clock in Julian Days, advanced by wall-clock seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    pub jd: f64,
    /// Simulated days per real second; negative runs time backwards.
    pub days_per_second: f64,
    pub paused: bool,
}

impl Clock {
    pub fn new(jd: f64, days_per_second: f64) -> Self {
        Self {
            jd,
            days_per_second,
            paused: false,
        }
    }

    pub fn from_config(config: &ClockConfig, start_jd: f64) -> Self {
        Self {
            jd: start_jd,
            days_per_second: config.days_per_second,
            paused: config.paused,
        }
    }

    /// Advance by `dt_seconds` of real time and return the new Julian Date.
    pub fn tick(&mut self, dt_seconds: f64) -> f64 {
        if !self.paused && dt_seconds.is_finite() {
            self.jd += dt_seconds * self.days_per_second;
        }
        self.jd
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    /// Non-finite rates are ignored.
    pub fn set_rate(&mut self, days_per_second: f64) {
        if days_per_second.is_finite() {
            self.days_per_second = days_per_second;
        }
    }
}
