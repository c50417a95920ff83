//! 渲染项
//!
//! 一个渲染项对应场景中一次绘制：世界矩阵 + 共享缓冲区中的子网格区段。

use crate::geometry::Submesh;
use crate::math::Matrix4;
use crate::renderer::frame::NUM_FRAME_RESOURCES;

/// 渲染项
#[derive(Debug, Clone)]
pub struct RenderItem {
    /// 世界矩阵
    pub world: Matrix4,

    /// 脏计数：世界矩阵变化后需要更新多少个帧资源中的常量副本
    ///
    /// 初始为帧资源数量，保证每个帧资源的常量缓冲区都被写过一次。
    pub num_frames_dirty: usize,

    /// 对象常量缓冲区中的槽位
    pub object_index: usize,

    /// 共享几何缓冲区中的绘制区段
    pub submesh: Submesh,
}

impl RenderItem {
    pub fn new(world: Matrix4, object_index: usize, submesh: Submesh) -> Self {
        Self {
            world,
            num_frames_dirty: NUM_FRAME_RESOURCES,
            object_index,
            submesh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Submesh;

    #[test]
    fn test_new_item_dirty_for_all_frames() {
        let sub = Submesh {
            index_count: 36,
            start_index: 0,
            base_vertex: 0,
        };
        let item = RenderItem::new(Matrix4::identity(), 0, sub);
        assert_eq!(item.num_frames_dirty, NUM_FRAME_RESOURCES);
    }

    #[test]
    fn test_dirty_counter_uploads_once_per_frame_resource() {
        let sub = Submesh {
            index_count: 36,
            start_index: 0,
            base_vertex: 0,
        };
        let mut item = RenderItem::new(Matrix4::identity(), 0, sub);

        // 每个帧资源恰好重新上传一次
        let mut uploads = 0;
        for _ in 0..NUM_FRAME_RESOURCES * 2 {
            if item.num_frames_dirty > 0 {
                uploads += 1;
                item.num_frames_dirty -= 1;
            }
        }
        assert_eq!(uploads, NUM_FRAME_RESOURCES);
    }
}
