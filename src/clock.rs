use std::{thread::sleep, time::{Duration, Instant}};

/// Paces the game loop at a fixed number of ticks per second.
pub struct Clock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Clock {
    pub fn new(ticks_per_second: u32) -> Self {
        let interval = Duration::from_secs(1) / ticks_per_second.max(1);
        Clock { interval, last_tick: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleeps until one interval has passed since the previous call and
    /// returns the time actually elapsed. The first call returns immediately.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();

        let elapsed = match self.last_tick {
            Some(last) => {
                let since = now.duration_since(last);
                if since < self.interval {
                    sleep(self.interval - since);
                }
                last.elapsed()
            }
            None => Duration::from_secs(0),
        };

        self.last_tick = Some(Instant::now());
        elapsed
    }
}
