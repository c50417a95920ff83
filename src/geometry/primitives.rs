//! 程序化基础网格生成模块
//!
//! 生成城堡场景用到的全部基础形状：盒子、网格地面、球体、圆柱、圆锥、
//! 圆环、金字塔、楔形、钻石（八面体）和三棱柱。
//!
//! 所有形状都以原点为中心生成，由场景代码通过世界矩阵缩放和摆放。
//! 生成器是确定性的、无副作用的纯函数，只产生位置和索引；
//! 颜色在打包进共享缓冲区时按网格统一赋值（见 [`super::mesh`]）。

use std::f32::consts::{PI, TAU};

/// CPU 侧网格数据
///
/// 存储程序化生成的原始几何数据。
/// 这是一个简单的数据持有者，不包含 GPU 资源。
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 顶点位置数组
    pub positions: Vec<[f32; 3]>,

    /// 索引数组
    ///
    /// 三角形顶点索引，每 3 个索引定义一个三角形。
    /// 生成期使用 32 位索引，打包进共享缓冲区时再压缩为 16 位。
    pub indices: Vec<u32>,
}

impl MeshData {
    /// 创建一个带容量预分配的网格数据
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是 3 的倍数
    /// - 所有索引都在有效范围内
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        let vertex_count = self.positions.len() as u32;
        for (i, &index) in self.indices.iter().enumerate() {
            if index >= vertex_count {
                return Err(format!(
                    "index {} at position {} is out of range (vertex count {})",
                    index, i, vertex_count
                ));
            }
        }

        Ok(())
    }
}

/// 生成盒子
///
/// 以原点为中心，X/Y/Z 方向的边长分别为 `width`/`height`/`depth`。
pub fn create_box(width: f32, height: f32, depth: f32) -> MeshData {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = vec![
        [-hw, -hh, -hd], // 0
        [hw, -hh, -hd],  // 1
        [hw, hh, -hd],   // 2
        [-hw, hh, -hd],  // 3
        [-hw, -hh, hd],  // 4
        [hw, -hh, hd],   // 5
        [hw, hh, hd],    // 6
        [-hw, hh, hd],   // 7
    ];

    #[rustfmt::skip]
    let indices = vec![
        // -Z 面
        0, 2, 1,  0, 3, 2,
        // +Z 面
        4, 5, 6,  4, 6, 7,
        // -X 面
        0, 4, 7,  0, 7, 3,
        // +X 面
        1, 2, 6,  1, 6, 5,
        // -Y 面
        0, 1, 5,  0, 5, 4,
        // +Y 面
        3, 7, 6,  3, 6, 2,
    ];

    MeshData { positions, indices }
}

/// 生成网格平面（地面）
///
/// 位于 XZ 平面（y = 0），`m` × `n` 个顶点，以原点为中心。
pub fn create_grid(width: f32, depth: f32, m: u32, n: u32) -> MeshData {
    assert!(m >= 2 && n >= 2, "grid needs at least 2x2 vertices");

    let vertex_count = (m * n) as usize;
    let face_count = ((m - 1) * (n - 1) * 2) as usize;

    let half_width = 0.5 * width;
    let half_depth = 0.5 * depth;

    let dx = width / (n - 1) as f32;
    let dz = depth / (m - 1) as f32;

    let mut mesh = MeshData::with_capacity(vertex_count, face_count * 3);

    for i in 0..m {
        let z = half_depth - i as f32 * dz;
        for j in 0..n {
            let x = -half_width + j as f32 * dx;
            mesh.positions.push([x, 0.0, z]);
        }
    }

    for i in 0..m - 1 {
        for j in 0..n - 1 {
            let a = i * n + j;
            let b = i * n + j + 1;
            let c = (i + 1) * n + j;
            let d = (i + 1) * n + j + 1;

            mesh.indices.extend_from_slice(&[a, b, c]);
            mesh.indices.extend_from_slice(&[c, b, d]);
        }
    }

    mesh
}

/// 生成球体
///
/// 以原点为中心，由 `slices` 条经线和 `stacks` 层纬线构成，
/// 两极各一个单独顶点。
pub fn create_sphere(radius: f32, slices: u32, stacks: u32) -> MeshData {
    assert!(slices >= 3 && stacks >= 2);

    let mut mesh = MeshData::default();

    // 北极
    mesh.positions.push([0.0, radius, 0.0]);

    let phi_step = PI / stacks as f32;
    let theta_step = TAU / slices as f32;

    // 中间纬线环（不含两极）
    for i in 1..stacks {
        let phi = i as f32 * phi_step;
        for j in 0..=slices {
            let theta = j as f32 * theta_step;
            mesh.positions.push([
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            ]);
        }
    }

    // 南极
    mesh.positions.push([0.0, -radius, 0.0]);

    // 顶层三角形扇
    for j in 1..=slices {
        mesh.indices.extend_from_slice(&[0, j, j + 1]);
    }

    // 中间层四边形条带
    let ring_vertex_count = slices + 1;
    let base = 1u32;
    for i in 0..stacks - 2 {
        for j in 0..slices {
            let a = base + i * ring_vertex_count + j;
            let b = base + i * ring_vertex_count + j + 1;
            let c = base + (i + 1) * ring_vertex_count + j;
            let d = base + (i + 1) * ring_vertex_count + j + 1;

            mesh.indices.extend_from_slice(&[a, b, c]);
            mesh.indices.extend_from_slice(&[c, b, d]);
        }
    }

    // 底层三角形扇
    let south_pole = mesh.positions.len() as u32 - 1;
    let last_ring = south_pole - ring_vertex_count;
    for j in 0..slices {
        mesh.indices
            .extend_from_slice(&[south_pole, last_ring + j + 1, last_ring + j]);
    }

    mesh
}

/// 生成圆柱（可带不同的上下半径，从而表达圆台）
///
/// 以原点为中心，高度沿 Y 方向（-height/2 到 +height/2），
/// 侧面由 `stacks` 层环构成，上下底各为一个三角形扇。
pub fn create_cylinder(
    bottom_radius: f32,
    top_radius: f32,
    height: f32,
    slices: u32,
    stacks: u32,
) -> MeshData {
    assert!(slices >= 3 && stacks >= 1);

    let mut mesh = MeshData::default();

    let stack_height = height / stacks as f32;
    let radius_step = (top_radius - bottom_radius) / stacks as f32;
    let theta_step = TAU / slices as f32;

    // 侧面环（自底向顶）
    for i in 0..=stacks {
        let y = -0.5 * height + i as f32 * stack_height;
        let r = bottom_radius + i as f32 * radius_step;

        for j in 0..=slices {
            let theta = j as f32 * theta_step;
            mesh.positions.push([r * theta.cos(), y, r * theta.sin()]);
        }
    }

    let ring_vertex_count = slices + 1;
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * ring_vertex_count + j;
            let b = (i + 1) * ring_vertex_count + j;
            let c = (i + 1) * ring_vertex_count + j + 1;
            let d = i * ring_vertex_count + j + 1;

            mesh.indices.extend_from_slice(&[a, b, c]);
            mesh.indices.extend_from_slice(&[a, c, d]);
        }
    }

    // 顶盖
    build_cylinder_cap(&mut mesh, top_radius, 0.5 * height, slices, true);
    // 底盖
    build_cylinder_cap(&mut mesh, bottom_radius, -0.5 * height, slices, false);

    mesh
}

/// 为圆柱添加一个端盖（三角形扇）
fn build_cylinder_cap(mesh: &mut MeshData, radius: f32, y: f32, slices: u32, top: bool) {
    let base = mesh.positions.len() as u32;
    let theta_step = TAU / slices as f32;

    for j in 0..=slices {
        let theta = j as f32 * theta_step;
        mesh.positions.push([radius * theta.cos(), y, radius * theta.sin()]);
    }

    // 圆心顶点
    mesh.positions.push([0.0, y, 0.0]);
    let center = mesh.positions.len() as u32 - 1;

    for j in 0..slices {
        if top {
            mesh.indices.extend_from_slice(&[center, base + j + 1, base + j]);
        } else {
            mesh.indices.extend_from_slice(&[center, base + j, base + j + 1]);
        }
    }
}

/// 生成圆锥
///
/// 以原点为中心：底面在 y = -height/2，锥尖在 y = +height/2。
/// `stacks` 控制侧面细分层数。
pub fn create_cone(radius: f32, height: f32, slices: u32, stacks: u32) -> MeshData {
    // 圆锥即顶半径为 0 的圆台；复用圆柱生成器保证记账一致
    create_cylinder(radius, 0.0, height, slices, stacks)
}

/// 生成圆环（torus）
///
/// 躺在 XZ 平面上，主半径 `major_radius`，管半径 `tube_radius`。
pub fn create_torus(
    major_radius: f32,
    tube_radius: f32,
    ring_segments: u32,
    side_segments: u32,
) -> MeshData {
    assert!(ring_segments >= 3 && side_segments >= 3);

    let mut mesh = MeshData::default();

    let ring_step = TAU / ring_segments as f32;
    let side_step = TAU / side_segments as f32;

    for i in 0..=ring_segments {
        let theta = i as f32 * ring_step;
        let (sin_t, cos_t) = theta.sin_cos();

        for j in 0..=side_segments {
            let phi = j as f32 * side_step;
            let (sin_p, cos_p) = phi.sin_cos();

            let r = major_radius + tube_radius * cos_p;
            mesh.positions.push([r * cos_t, tube_radius * sin_p, r * sin_t]);
        }
    }

    let ring_vertex_count = side_segments + 1;
    for i in 0..ring_segments {
        for j in 0..side_segments {
            let a = i * ring_vertex_count + j;
            let b = (i + 1) * ring_vertex_count + j;
            let c = (i + 1) * ring_vertex_count + j + 1;
            let d = i * ring_vertex_count + j + 1;

            mesh.indices.extend_from_slice(&[a, b, c]);
            mesh.indices.extend_from_slice(&[a, c, d]);
        }
    }

    mesh
}

/// 生成四棱金字塔
///
/// 底面为 `width` × `depth` 的矩形（y = -height/2），锥尖在 y = +height/2。
pub fn create_pyramid(width: f32, height: f32, depth: f32) -> MeshData {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = vec![
        [-hw, -hh, -hd], // 0 底面
        [hw, -hh, -hd],  // 1
        [hw, -hh, hd],   // 2
        [-hw, -hh, hd],  // 3
        [0.0, hh, 0.0],  // 4 锥尖
    ];

    #[rustfmt::skip]
    let indices = vec![
        // 底面
        0, 1, 2,  0, 2, 3,
        // 侧面
        0, 4, 1,
        1, 4, 2,
        2, 4, 3,
        3, 4, 0,
    ];

    MeshData { positions, indices }
}

/// 生成楔形（斜坡）
///
/// 直角三棱柱：竖直的背面位于 x = -width/2，斜面从背面顶边
/// 降到 x = +width/2 的底边，沿 Z 方向延伸 `depth`。
pub fn create_wedge(width: f32, height: f32, depth: f32) -> MeshData {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = vec![
        [-hw, -hh, -hd], // 0 底面
        [hw, -hh, -hd],  // 1
        [hw, -hh, hd],   // 2
        [-hw, -hh, hd],  // 3
        [-hw, hh, -hd],  // 4 背面顶边
        [-hw, hh, hd],   // 5
    ];

    #[rustfmt::skip]
    let indices = vec![
        // 底面
        0, 2, 1,  0, 3, 2,
        // 背面（竖直）
        0, 4, 5,  0, 5, 3,
        // 斜面
        4, 1, 2,  4, 2, 5,
        // 两个三角形侧面
        0, 1, 4,
        3, 5, 2,
    ];

    MeshData { positions, indices }
}

/// 生成钻石（八面体）
///
/// 六个顶点分别位于三条坐标轴的 ±size 处。
/// 场景代码通过非均匀缩放把它拉长成塔尖装饰。
pub fn create_diamond(size: f32) -> MeshData {
    let s = size;

    let positions = vec![
        [0.0, s, 0.0],  // 0 顶
        [s, 0.0, 0.0],  // 1
        [0.0, 0.0, s],  // 2
        [-s, 0.0, 0.0], // 3
        [0.0, 0.0, -s], // 4
        [0.0, -s, 0.0], // 5 底
    ];

    #[rustfmt::skip]
    let indices = vec![
        // 上半
        0, 2, 1,
        0, 3, 2,
        0, 4, 3,
        0, 1, 4,
        // 下半
        5, 1, 2,
        5, 2, 3,
        5, 3, 4,
        5, 4, 1,
    ];

    MeshData { positions, indices }
}

/// 生成三棱柱
///
/// 三角形截面位于 XY 平面（底边宽 `width`，高 `height`），
/// 沿 Z 方向延伸 `depth`。
pub fn create_tri_prism(width: f32, height: f32, depth: f32) -> MeshData {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = vec![
        // z = -hd 的三角形
        [-hw, -hh, -hd], // 0
        [hw, -hh, -hd],  // 1
        [0.0, hh, -hd],  // 2
        // z = +hd 的三角形
        [-hw, -hh, hd], // 3
        [hw, -hh, hd],  // 4
        [0.0, hh, hd],  // 5
    ];

    #[rustfmt::skip]
    let indices = vec![
        // 两个三角形端面
        0, 2, 1,
        3, 4, 5,
        // 底面
        0, 1, 4,  0, 4, 3,
        // 左斜面
        0, 3, 5,  0, 5, 2,
        // 右斜面
        1, 2, 5,  1, 5, 4,
    ];

    MeshData { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(mesh: &MeshData) {
        mesh.validate().expect("generated mesh must be valid");
        assert!(mesh.vertex_count() > 0);
        assert!(mesh.index_count() > 0);
    }

    #[test]
    fn test_box_counts() {
        let mesh = create_box(1.0, 1.0, 1.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert_valid(&mesh);
    }

    #[test]
    fn test_grid_counts() {
        let mesh = create_grid(20.0, 30.0, 60, 40);
        assert_eq!(mesh.vertex_count(), 60 * 40);
        assert_eq!(mesh.triangle_count(), 59 * 39 * 2);
        assert_valid(&mesh);
    }

    #[test]
    fn test_grid_extent() {
        let mesh = create_grid(20.0, 30.0, 4, 4);
        for p in &mesh.positions {
            assert!(p[0].abs() <= 10.0 + 1e-5);
            assert_eq!(p[1], 0.0);
            assert!(p[2].abs() <= 15.0 + 1e-5);
        }
    }

    #[test]
    fn test_sphere_counts() {
        let slices = 20;
        let stacks = 20;
        let mesh = create_sphere(0.5, slices, stacks);
        // 两极 + (stacks-1) 条纬线，每条 slices+1 个顶点
        assert_eq!(mesh.vertex_count() as u32, 2 + (stacks - 1) * (slices + 1));
        assert_valid(&mesh);

        // 所有顶点都在球面上
        for p in &mesh.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 0.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cylinder_within_bounds() {
        let mesh = create_cylinder(0.5, 0.5, 3.0, 20, 20);
        assert_valid(&mesh);
        for p in &mesh.positions {
            assert!(p[1].abs() <= 1.5 + 1e-5);
            let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
            assert!(r <= 0.5 + 1e-5);
        }
    }

    #[test]
    fn test_cone_apex() {
        let mesh = create_cone(1.0, 1.0, 20, 20);
        assert_valid(&mesh);
        // 锥尖位于 +height/2
        assert!(mesh.positions.iter().any(|p| (p[1] - 0.5).abs() < 1e-6));
        // 没有顶点超出底面半径
        for p in &mesh.positions {
            let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
            assert!(r <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_torus_radii() {
        let mesh = create_torus(1.0, 0.3, 24, 16);
        assert_valid(&mesh);
        for p in &mesh.positions {
            let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
            assert!(r >= 1.0 - 0.3 - 1e-4 && r <= 1.0 + 0.3 + 1e-4);
            assert!(p[1].abs() <= 0.3 + 1e-5);
        }
    }

    #[test]
    fn test_simple_shapes_valid() {
        assert_valid(&create_pyramid(1.5, 2.0, 1.5));
        assert_valid(&create_wedge(2.0, 1.0, 2.0));
        assert_valid(&create_diamond(0.8));
        assert_valid(&create_tri_prism(1.5, 1.5, 2.0));
    }

    #[test]
    fn test_wedge_slope_shape() {
        let mesh = create_wedge(2.0, 1.0, 2.0);
        assert_eq!(mesh.vertex_count(), 6);
        // 顶边只存在于 x = -width/2 一侧
        for p in &mesh.positions {
            if p[1] > 0.0 {
                assert_eq!(p[0], -1.0);
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_indices() {
        let mut mesh = create_box(1.0, 1.0, 1.0);
        mesh.indices[0] = 999;
        assert!(mesh.validate().is_err());

        let mut mesh = create_box(1.0, 1.0, 1.0);
        mesh.indices.pop();
        assert!(mesh.validate().is_err());
    }
}
