//! CPU/GPU 同步原语
//!
//! 围栏值是一个单调递增的 64 位计数：CPU 每提交一帧就取下一个值
//! 打在该帧上，GPU 完成回调把已完成值推进到至少该值。
//! 帧资源在重用前比较自己记录的围栏值与已完成值。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 围栏值
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FenceValue(pub u64);

impl FenceValue {
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 已完成值的共享句柄
///
/// 克隆后移交给提交完成回调，在回调里推进已完成计数。
/// 回调可能乱序到达，用 fetch_max 保证计数只增不减。
#[derive(Debug, Clone)]
pub struct FenceCompletion {
    completed: Arc<AtomicU64>,
}

impl FenceCompletion {
    /// 标记一个围栏值已完成
    pub fn signal(&self, value: FenceValue) {
        self.completed.fetch_max(value.0, Ordering::Release);
    }
}

/// 围栏管理器
///
/// 维护 CPU 侧的当前计数和 GPU 侧的已完成计数。
#[derive(Debug)]
pub struct FenceManager {
    current: AtomicU64,
    completed: Arc<AtomicU64>,
}

impl FenceManager {
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
            completed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 取下一个围栏值（CPU 侧计数加一）
    pub fn next_value(&self) -> FenceValue {
        FenceValue(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// CPU 侧已分配到的最大值
    pub fn current_value(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    /// GPU 侧已完成的最大值
    pub fn completed_value(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// 指定围栏值是否已完成
    pub fn is_completed(&self, value: FenceValue) -> bool {
        self.completed_value() >= value.0
    }

    /// 取得可移交给完成回调的句柄
    pub fn completion_handle(&self) -> FenceCompletion {
        FenceCompletion {
            completed: Arc::clone(&self.completed),
        }
    }
}

impl Default for FenceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_monotonic() {
        let fence = FenceManager::new();
        let a = fence.next_value();
        let b = fence.next_value();
        let c = fence.next_value();

        assert_eq!(a.value(), 1);
        assert_eq!(b.value(), 2);
        assert_eq!(c.value(), 3);
        assert_eq!(fence.current_value(), 3);
    }

    #[test]
    fn test_signal_completes() {
        let fence = FenceManager::new();
        let v1 = fence.next_value();
        let v2 = fence.next_value();

        assert!(!fence.is_completed(v1));

        let handle = fence.completion_handle();
        handle.signal(v1);

        assert!(fence.is_completed(v1));
        assert!(!fence.is_completed(v2));
    }

    #[test]
    fn test_out_of_order_signals_keep_max() {
        let fence = FenceManager::new();
        let v1 = fence.next_value();
        let v2 = fence.next_value();

        let handle = fence.completion_handle();
        handle.signal(v2);
        // 迟到的低值回调不能回退已完成计数
        handle.signal(v1);

        assert_eq!(fence.completed_value(), v2.value());
    }

    #[test]
    fn test_signal_visible_across_threads() {
        let fence = Arc::new(FenceManager::new());
        let v = fence.next_value();
        let handle = fence.completion_handle();

        let worker = std::thread::spawn(move || {
            handle.signal(v);
        });
        worker.join().unwrap();

        assert!(fence.is_completed(v));
    }
}
