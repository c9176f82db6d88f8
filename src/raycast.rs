use blockyard_control::GROUND_Y;
use blockyard_geom::Vec3;
use blockyard_world::{FaceNormal, GridPos, Hit};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeHit {
    pub cell: GridPos,
    /// Face the ray entered through.
    pub normal: Option<FaceNormal>,
    pub distance: f32,
}

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn step_of(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Voxel DDA over unit cells centred on integer coordinates. The cell holding
/// `origin` is never reported, so a camera inside a cube sees through it.
pub fn raycast_first_hit_with_face<F>(
    origin: Vec3,
    dir: Vec3,
    max_dist: f32,
    mut is_solid: F,
) -> Option<CubeHit>
where
    F: FnMut(GridPos) -> bool,
{
    if dir.length() < 1e-6 {
        return None;
    }
    let d = dir.normalized();
    // Shift so that cell (i, j, k) spans [i, i+1) and flooring picks the cell.
    let o = origin + Vec3::new(0.5, 0.5, 0.5);

    let mut cell = (o.x.floor() as i32, o.y.floor() as i32, o.z.floor() as i32);
    let step = (step_of(d.x), step_of(d.y), step_of(d.z));
    let inv = (inv_or_max(d.x), inv_or_max(d.y), inv_or_max(d.z));
    let t_delta = (
        if step.0 == 0 { f32::MAX } else { inv.0 },
        if step.1 == 0 { f32::MAX } else { inv.1 },
        if step.2 == 0 { f32::MAX } else { inv.2 },
    );
    let first = |p: f32, s: i32, inv: f32| {
        let f = p - p.floor();
        match s {
            1 => (1.0 - f) * inv,
            -1 => f * inv,
            _ => f32::MAX,
        }
    };
    let mut t_max = (
        first(o.x, step.0, inv.0),
        first(o.y, step.1, inv.1),
        first(o.z, step.2, inv.2),
    );

    for _ in 0..512 {
        // Step through smallest t_max; the entered face points back along the step.
        let (t, entered) = if t_max.0 < t_max.1 && t_max.0 < t_max.2 {
            cell.0 += step.0;
            let t = t_max.0;
            t_max.0 += t_delta.0;
            (t, FaceNormal::from_offset((-step.0, 0, 0)))
        } else if t_max.1 < t_max.2 {
            cell.1 += step.1;
            let t = t_max.1;
            t_max.1 += t_delta.1;
            (t, FaceNormal::from_offset((0, -step.1, 0)))
        } else {
            cell.2 += step.2;
            let t = t_max.2;
            t_max.2 += t_delta.2;
            (t, FaceNormal::from_offset((0, 0, -step.2)))
        };
        if t > max_dist {
            break;
        }
        if is_solid(cell) {
            return Some(CubeHit {
                cell,
                normal: entered,
                distance: t,
            });
        }
    }
    None
}

/// Where the ray meets the top of the ground plane, if ahead and within reach.
pub fn ground_hit(origin: Vec3, dir: Vec3, max_dist: f32) -> Option<(Vec3, f32)> {
    if dir.length() < 1e-6 {
        return None;
    }
    let d = dir.normalized();
    if d.y >= -1e-6 || origin.y <= GROUND_Y {
        return None;
    }
    let t = (GROUND_Y - origin.y) / d.y;
    (t <= max_dist).then(|| (origin + d * t, t))
}

/// Hit-test cubes and ground together; the nearer wins.
pub fn pick<F>(origin: Vec3, dir: Vec3, reach: f32, is_solid: F) -> Hit
where
    F: FnMut(GridPos) -> bool,
{
    let cube = raycast_first_hit_with_face(origin, dir, reach, is_solid);
    let ground = ground_hit(origin, dir, reach);
    match (cube, ground) {
        (Some(c), Some((_, gt))) if c.distance <= gt => Hit::Cube {
            position: c.cell,
            normal: c.normal,
        },
        (Some(c), None) => Hit::Cube {
            position: c.cell,
            normal: c.normal,
        },
        (_, Some((point, _))) => Hit::Ground { point },
        (None, None) => Hit::Nothing,
    }
}
