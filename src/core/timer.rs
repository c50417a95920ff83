//! 帧计时器模块
//!
//! 提供每帧的时间信息：自启动以来的总时间和上一帧的间隔时间。

use std::time::Instant;

/// 帧计时器
///
/// 每帧调用一次 [`Timer::tick`]，之后 `total_time` / `delta_time`
/// 返回该帧的时间信息。
pub struct Timer {
    base: Instant,
    prev: Instant,
    total_time: f32,
    delta_time: f32,
}

impl Timer {
    /// 创建新的计时器，以当前时刻为基准
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            base: now,
            prev: now,
            total_time: 0.0,
            delta_time: 0.0,
        }
    }

    /// 推进一帧
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.prev).as_secs_f32();
        self.total_time = now.duration_since(self.base).as_secs_f32();
        self.prev = now;
    }

    /// 自启动以来的总时间（秒）
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// 上一帧的间隔时间（秒）
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_advances() {
        let mut timer = Timer::new();
        assert_eq!(timer.delta_time(), 0.0);

        std::thread::sleep(std::time::Duration::from_millis(5));
        timer.tick();

        assert!(timer.delta_time() > 0.0);
        assert!(timer.total_time() >= timer.delta_time());
    }

    #[test]
    fn test_total_time_monotonic() {
        let mut timer = Timer::new();
        timer.tick();
        let t1 = timer.total_time();
        timer.tick();
        let t2 = timer.total_time();

        assert!(t2 >= t1);
    }
}
