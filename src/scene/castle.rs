//! 城堡场景搭建
//!
//! 先把十种基础形状打包进共享几何缓冲区，再用世界矩阵把它们
//! 摆成一座城堡：外墙带城垛、正面开门、两道内墙、四角尖顶塔楼、
//! 后方喷泉、门口两侧斜坡以及内墙末端的小塔。

use tracing::info;

use crate::core::error::Result;
use crate::geometry::{primitives, GeometryBuffer};
use crate::math::{rotation_z, scaling, translation, Matrix4, PI};
use crate::scene::render_item::RenderItem;

// 每种网格的统一颜色（sRGB）
const GOLD: [f32; 4] = [1.0, 0.843_137, 0.0, 1.0];
const FOREST_GREEN: [f32; 4] = [0.133_333, 0.545_098, 0.133_333, 1.0];
const CRIMSON: [f32; 4] = [0.862_745, 0.078_431, 0.235_294, 1.0];
const STEEL_BLUE: [f32; 4] = [0.274_510, 0.509_804, 0.705_882, 1.0];
const ORANGE_RED: [f32; 4] = [1.0, 0.270_588, 0.0, 1.0];
const ORANGE: [f32; 4] = [1.0, 0.647_059, 0.0, 1.0];
const YELLOW_GREEN: [f32; 4] = [0.603_922, 0.803_922, 0.196_078, 1.0];
const MEDIUM_PURPLE: [f32; 4] = [0.576_471, 0.439_216, 0.858_824, 1.0];
const DEEP_SKY_BLUE: [f32; 4] = [0.0, 0.749_020, 1.0, 1.0];
const LIGHT_PINK: [f32; 4] = [1.0, 0.713_726, 0.756_863, 1.0];

/// 生成全部基础形状并打包进共享缓冲区
pub fn build_castle_geometry() -> Result<GeometryBuffer> {
    let buffer = GeometryBuffer::pack(vec![
        ("box", primitives::create_box(1.0, 1.0, 1.0), GOLD),
        ("grid", primitives::create_grid(20.0, 30.0, 60, 40), FOREST_GREEN),
        ("sphere", primitives::create_sphere(0.5, 20, 20), CRIMSON),
        (
            "cylinder",
            primitives::create_cylinder(0.5, 0.5, 3.0, 20, 20),
            STEEL_BLUE,
        ),
        ("cone", primitives::create_cone(1.0, 1.0, 20, 20), ORANGE_RED),
        ("torus", primitives::create_torus(1.0, 0.3, 24, 16), ORANGE),
        ("pyramid", primitives::create_pyramid(1.5, 2.0, 1.5), YELLOW_GREEN),
        ("wedge", primitives::create_wedge(2.0, 1.0, 2.0), MEDIUM_PURPLE),
        ("diamond", primitives::create_diamond(0.8), DEEP_SKY_BLUE),
        ("tri_prism", primitives::create_tri_prism(1.5, 1.5, 2.0), LIGHT_PINK),
    ])?;

    buffer.validate()?;

    info!(
        "Castle geometry packed: {} vertices, {} indices",
        buffer.vertex_count(),
        buffer.index_count()
    );

    Ok(buffer)
}

/// 搭建城堡场景，返回全部渲染项
pub fn build_castle_scene(geometry: &GeometryBuffer) -> Result<Vec<RenderItem>> {
    let mut items = Vec::new();
    let mut builder = ItemBuilder {
        geometry,
        items: &mut items,
    };

    // ---------- 地面 ----------
    builder.add("grid", Matrix4::identity())?;

    // ---------- 基本尺寸（城堡居中在草地上）----------
    let castle_z = 0.0;

    let u_w = 12.0; // 外墙 X 方向宽度
    let u_d = 8.0; // 外墙 Z 方向深度

    let wall_h = 4.0;
    let wall_t = 0.25;
    let wall_y = wall_h * 0.5;

    let x_left = -u_w * 0.5;
    let x_right = u_w * 0.5;

    let z_back = castle_z - u_d * 0.5;
    let z_front = castle_z + u_d * 0.5;

    // 正面城门的开口宽度
    let gate_gap_w = 4.0;

    // ---------- 外墙 ----------

    // 后墙（沿 X 贯通）
    builder.add(
        "box",
        translation(0.0, wall_y, z_back) * scaling(u_w, wall_h, wall_t),
    )?;

    // 左墙（沿 Z 贯通）
    builder.add(
        "box",
        translation(x_left, wall_y, castle_z) * scaling(wall_t, wall_h, u_d),
    )?;

    // 右墙（沿 Z 贯通）
    builder.add(
        "box",
        translation(x_right, wall_y, castle_z) * scaling(wall_t, wall_h, u_d),
    )?;

    // 前墙拆成两段，中间留出城门
    let front_seg_len = (u_w - gate_gap_w) * 0.5;
    let front_seg_center_offset = gate_gap_w * 0.5 + front_seg_len * 0.5;

    builder.add(
        "box",
        translation(-front_seg_center_offset, wall_y, z_front)
            * scaling(front_seg_len, wall_h, wall_t),
    )?;
    builder.add(
        "box",
        translation(front_seg_center_offset, wall_y, z_front)
            * scaling(front_seg_len, wall_h, wall_t),
    )?;

    // ---------- 内墙（与前墙两段相接）----------
    let inner_depth = 4.0;
    let inner_center_z = z_front - wall_t * 0.5 - inner_depth * 0.5;

    let inner_left_x = -gate_gap_w * 0.5;
    let inner_right_x = gate_gap_w * 0.5;

    builder.add(
        "box",
        translation(inner_left_x, wall_y, inner_center_z)
            * scaling(wall_t, wall_h, inner_depth),
    )?;
    builder.add(
        "box",
        translation(inner_right_x, wall_y, inner_center_z)
            * scaling(wall_t, wall_h, inner_depth),
    )?;

    // ---------- 城垛（每隔一个位置放一颗墙齿）----------
    let tooth_w = 1.0;
    let tooth_h = 0.6;
    let tooth_top_y = wall_h + tooth_h * 0.5;

    builder.add_teeth_along_x(z_back, x_left, x_right, tooth_w, tooth_h, tooth_top_y, wall_t)?;
    builder.add_teeth_along_z(x_left, z_back, z_front, tooth_w, tooth_h, tooth_top_y, wall_t)?;
    builder.add_teeth_along_z(x_right, z_back, z_front, tooth_w, tooth_h, tooth_top_y, wall_t)?;
    builder.add_teeth_along_x(
        z_front,
        x_left,
        -gate_gap_w * 0.5,
        tooth_w,
        tooth_h,
        tooth_top_y,
        wall_t,
    )?;
    builder.add_teeth_along_x(
        z_front,
        gate_gap_w * 0.5,
        x_right,
        tooth_w,
        tooth_h,
        tooth_top_y,
        wall_t,
    )?;

    // ---------- 四角塔楼（圆柱 + 圆锥 + 塔尖钻石）----------
    let cyl_mesh_h = 3.0;
    let cyl_mesh_r = 0.5;

    let post_world_h = wall_h + 0.6;
    let scale_y = post_world_h / cyl_mesh_h;
    let scale_xz = 1.15;

    let post_s = scaling(scale_xz, scale_y, scale_xz);
    let post_y = cyl_mesh_h * scale_y * 0.5;

    // 塔楼中心外推，让塔身贴住墙角外侧
    let tower_out = wall_t * 0.5 + cyl_mesh_r * scale_xz;

    let tl_x = x_left - tower_out;
    let tr_x = x_right + tower_out;
    let back_z = z_back - tower_out;
    let front_z = z_front + tower_out;

    for &(x, z) in &[(tl_x, back_z), (tr_x, back_z), (tl_x, front_z), (tr_x, front_z)] {
        builder.add("cylinder", translation(x, post_y, z) * post_s)?;
    }

    let post_world_r = cyl_mesh_r * scale_xz;
    let cone_world_r = post_world_r * 1.5;
    let cone_world_h = wall_h * 1.8;

    let cone_s = scaling(cone_world_r, cone_world_h, cone_world_r);
    let cone_y = post_world_h + cone_world_h * 0.5;

    for &(x, z) in &[(tl_x, back_z), (tr_x, back_z), (tl_x, front_z), (tr_x, front_z)] {
        builder.add("cone", translation(x, cone_y, z) * cone_s)?;
    }

    // 圆锥顶上的钻石装饰
    let diamond_s = 0.55;
    let diamond_y = post_world_h + cone_world_h + 0.35;

    for &(x, z) in &[(tl_x, back_z), (tr_x, back_z), (tl_x, front_z), (tr_x, front_z)] {
        builder.add(
            "diamond",
            translation(x, diamond_y, z) * scaling(diamond_s, diamond_s * 1.6, diamond_s),
        )?;
    }

    // ---------- 喷泉（城堡后方：两层圆环水盆 + 三段圆柱）----------
    {
        let fountain_x = 0.0;
        let fountain_z = z_back - 3.5;

        let bowl1_major = 2.4; // 下层水盆更宽
        let bowl2_major = 1.6;
        let bowl_y_scale = 0.45; // 压扁成盆状

        // 底座圆柱
        let base_cyl_h = 1.6;
        let base_cyl_r = 1.1;
        builder.add(
            "cylinder",
            translation(fountain_x, base_cyl_h * 0.5, fountain_z)
                * scaling(base_cyl_r, base_cyl_h / cyl_mesh_h, base_cyl_r),
        )?;

        // 中段立柱
        let col_h = 2.2;
        let col_r = 0.55;
        builder.add(
            "cylinder",
            translation(fountain_x, base_cyl_h + col_h * 0.5, fountain_z)
                * scaling(col_r, col_h / cyl_mesh_h, col_r),
        )?;

        // 下层水盆
        let bowl1_y = base_cyl_h + col_h + 0.55;
        builder.add(
            "torus",
            translation(fountain_x, bowl1_y, fountain_z)
                * scaling(bowl1_major, bowl_y_scale, bowl1_major),
        )?;

        // 顶部小立柱
        let top_col_h = 1.2;
        let top_col_r = 0.35;
        builder.add(
            "cylinder",
            translation(fountain_x, bowl1_y + 0.65 + top_col_h * 0.5, fountain_z)
                * scaling(top_col_r, top_col_h / cyl_mesh_h, top_col_r),
        )?;

        // 上层水盆
        let bowl2_y = bowl1_y + 1.55;
        builder.add(
            "torus",
            translation(fountain_x, bowl2_y, fountain_z)
                * scaling(bowl2_major, bowl_y_scale, bowl2_major),
        )?;
    }

    // ---------- 门口两侧的斜坡（楔形，倚着前墙两段）----------
    let wedge_h = 1.1;
    let wedge_thick = 1.6;
    let wedge_len = front_seg_len; // 与所倚墙段等长

    let wedge_z = z_front - wall_t * 0.6;
    let wedge_y = wedge_h * 0.5;
    let wedge_s = scaling(wedge_len, wedge_h, wedge_thick);

    // 左右两侧斜坡倾角相反，形成对称
    builder.add(
        "wedge",
        translation(-front_seg_center_offset, wedge_y, wedge_z)
            * rotation_z(0.25 * PI)
            * wedge_s,
    )?;
    builder.add(
        "wedge",
        translation(front_seg_center_offset, wedge_y, wedge_z)
            * rotation_z(-0.25 * PI)
            * wedge_s,
    )?;

    // ---------- 内墙末端的小塔（角塔的缩小版）----------
    let inner_end_z = inner_center_z - inner_depth * 0.5;

    let mini_post_world_h = wall_h * 0.75;
    let mini_scale_y = mini_post_world_h / cyl_mesh_h;
    let mini_scale_xz = scale_xz * 0.65;
    let mini_post_s = scaling(mini_scale_xz, mini_scale_y, mini_scale_xz);
    let mini_post_y = cyl_mesh_h * mini_scale_y * 0.5;

    let mini_post_world_r = cyl_mesh_r * mini_scale_xz;
    let mini_cone_world_r = mini_post_world_r * 1.5;
    let mini_cone_world_h = mini_post_world_h * 0.9;
    let mini_cone_s = scaling(mini_cone_world_r, mini_cone_world_h, mini_cone_world_r);
    let mini_cone_y = mini_post_world_h + mini_cone_world_h * 0.5;

    for &x in &[inner_left_x, inner_right_x] {
        builder.add("cylinder", translation(x, mini_post_y, inner_end_z) * mini_post_s)?;
        builder.add("cone", translation(x, mini_cone_y, inner_end_z) * mini_cone_s)?;
    }

    info!("Castle scene built: {} render items", items.len());

    Ok(items)
}

/// 渲染项构造辅助：按加入顺序分配对象槽位
struct ItemBuilder<'a> {
    geometry: &'a GeometryBuffer,
    items: &'a mut Vec<RenderItem>,
}

impl ItemBuilder<'_> {
    fn add(&mut self, mesh: &str, world: Matrix4) -> Result<()> {
        let submesh = self.geometry.submesh(mesh)?;
        let object_index = self.items.len();
        self.items.push(RenderItem::new(world, object_index, submesh));
        Ok(())
    }

    /// 沿 X 方向在墙顶放置墙齿，每隔一个位置放一颗
    #[allow(clippy::too_many_arguments)]
    fn add_teeth_along_x(
        &mut self,
        z_wall: f32,
        x_min: f32,
        x_max: f32,
        tooth_w: f32,
        tooth_h: f32,
        tooth_top_y: f32,
        wall_t: f32,
    ) -> Result<()> {
        let mut x = x_min + tooth_w * 0.5;
        let mut idx = 0u32;
        while x <= x_max - tooth_w * 0.5 + 1e-4 {
            if idx % 2 == 0 {
                self.add(
                    "box",
                    translation(x, tooth_top_y, z_wall) * scaling(tooth_w, tooth_h, wall_t),
                )?;
            }
            x += tooth_w;
            idx += 1;
        }
        Ok(())
    }

    /// 沿 Z 方向在墙顶放置墙齿
    #[allow(clippy::too_many_arguments)]
    fn add_teeth_along_z(
        &mut self,
        x_wall: f32,
        z_min: f32,
        z_max: f32,
        tooth_w: f32,
        tooth_h: f32,
        tooth_top_y: f32,
        wall_t: f32,
    ) -> Result<()> {
        let mut z = z_min + tooth_w * 0.5;
        let mut idx = 0u32;
        while z <= z_max - tooth_w * 0.5 + 1e-4 {
            if idx % 2 == 0 {
                self.add(
                    "box",
                    translation(x_wall, tooth_top_y, z) * scaling(wall_t, tooth_h, tooth_w),
                )?;
            }
            z += tooth_w;
            idx += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::frame::NUM_FRAME_RESOURCES;

    #[test]
    fn test_geometry_contains_all_meshes() {
        let geometry = build_castle_geometry().unwrap();
        for name in [
            "box", "grid", "sphere", "cylinder", "cone", "torus", "pyramid", "wedge",
            "diamond", "tri_prism",
        ] {
            geometry.submesh(name).unwrap();
        }
    }

    #[test]
    fn test_scene_item_count() {
        let geometry = build_castle_geometry().unwrap();
        let items = build_castle_scene(&geometry).unwrap();

        // 地面 1 + 外墙 5（后/左/右 + 前墙两段）+ 内墙 2 + 墙齿 18
        // + 塔柱 4 + 塔锥 4 + 钻石 4 + 喷泉 5 + 斜坡 2 + 小塔 4
        assert_eq!(items.len(), 49);
    }

    #[test]
    fn test_object_indices_are_sequential() {
        let geometry = build_castle_geometry().unwrap();
        let items = build_castle_scene(&geometry).unwrap();

        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.object_index, i);
        }
    }

    #[test]
    fn test_all_items_start_dirty() {
        let geometry = build_castle_geometry().unwrap();
        let items = build_castle_scene(&geometry).unwrap();

        for item in &items {
            assert_eq!(item.num_frames_dirty, NUM_FRAME_RESOURCES);
        }
    }

    #[test]
    fn test_draw_ranges_in_bounds() {
        let geometry = build_castle_geometry().unwrap();
        let items = build_castle_scene(&geometry).unwrap();

        for item in &items {
            let end = item.submesh.start_index as usize + item.submesh.index_count as usize;
            assert!(end <= geometry.index_count());
            assert!((item.submesh.base_vertex as usize) < geometry.vertex_count());
        }
    }

    #[test]
    fn test_teeth_alternate() {
        // 后墙宽 12，墙齿宽 1：12 个槽位里隔一个放一颗，共 6 颗
        let geometry = build_castle_geometry().unwrap();
        let mut items = Vec::new();
        let mut builder = ItemBuilder {
            geometry: &geometry,
            items: &mut items,
        };
        builder
            .add_teeth_along_x(-4.0, -6.0, 6.0, 1.0, 0.6, 4.3, 0.25)
            .unwrap();
        assert_eq!(items.len(), 6);
    }
}
