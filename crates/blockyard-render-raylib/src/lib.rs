//! Raylib-based GPU rendering utilities: conversions, swatch upload, cube and figure drawing.
// Unsafe is required for Raylib texture updates and model-from-mesh loading in this crate.

use blockyard_control::ModelPart;
use blockyard_textures::{Swatch, TextureProvider};
use blockyard_world::{Cube, GridPos, Texture};
use raylib::prelude::*;
use std::collections::HashMap;
use std::error::Error;

pub mod conv {
    use blockyard_geom::Vec3;

    pub fn vec3_to_rl(v: Vec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x, v.y, v.z)
    }

    pub fn grid_to_rl(p: blockyard_world::GridPos) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(p.0 as f32, p.1 as f32, p.2 as f32)
    }

    pub fn color_rgb(c: [u8; 3]) -> raylib::prelude::Color {
        raylib::prelude::Color::new(c[0], c[1], c[2], 255)
    }
}

/// GPU copies of the procedural swatches, one per texture.
pub struct TextureCache {
    pub map: HashMap<Texture, Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get_ref(&self, texture: Texture) -> Option<&Texture2D> {
        self.map.get(&texture)
    }

    /// Upload `swatch`, replacing any earlier texture for the same key.
    pub fn upload(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        swatch: &Swatch,
    ) -> Result<(), Box<dyn Error>> {
        let size = swatch.size as i32;
        let img = Image::gen_image_color(size, size, Color::BLACK);
        let tex = rl
            .load_texture_from_image(thread, &img)
            .map_err(|e| format!("{} swatch upload: {e}", swatch.texture))?;
        tex.set_texture_filter(thread, TextureFilter::TEXTURE_FILTER_POINT);
        unsafe {
            raylib::ffi::UpdateTexture(*tex.as_ref(), swatch.rgba.as_ptr() as *const _);
        }
        self.map.insert(swatch.texture, tex);
        Ok(())
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Alpha applied to translucent textures.
pub fn texture_tint(texture: Texture) -> Color {
    let a = (texture.opacity() * 255.0).round() as u8;
    Color::new(255, 255, 255, a)
}

/// One textured unit cube model per texture plus an untextured unit cube for the figure.
pub struct CubeModels {
    textures: TextureCache,
    models: HashMap<Texture, Model>,
    plain: Model,
}

impl CubeModels {
    pub fn load(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        provider: &mut TextureProvider,
    ) -> Result<Self, Box<dyn Error>> {
        let mut textures = TextureCache::new();
        let mut models = HashMap::new();
        for texture in Texture::ALL {
            textures.upload(rl, thread, provider.swatch(texture))?;
            let mesh = Mesh::gen_mesh_cube(thread, 1.0, 1.0, 1.0);
            let mut model = rl
                .load_model_from_mesh(thread, unsafe { mesh.make_weak() })
                .map_err(|e| format!("{texture} cube model: {e}"))?;
            let tex = textures.get_ref(texture);
            if let (Some(mat), Some(tex)) = (model.materials_mut().get_mut(0), tex) {
                mat.set_material_texture(MaterialMapIndex::MATERIAL_MAP_ALBEDO, tex);
            }
            models.insert(texture, model);
        }
        let mesh = Mesh::gen_mesh_cube(thread, 1.0, 1.0, 1.0);
        let plain = rl
            .load_model_from_mesh(thread, unsafe { mesh.make_weak() })
            .map_err(|e| format!("figure cube model: {e}"))?;
        log::info!("uploaded {} cube textures", textures.map.len());
        Ok(Self {
            textures,
            models,
            plain,
        })
    }

    /// Re-upload swatches after the provider's settings changed.
    pub fn refresh_textures(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        provider: &mut TextureProvider,
    ) -> Result<(), Box<dyn Error>> {
        for texture in Texture::ALL {
            self.textures.upload(rl, thread, provider.swatch(texture))?;
            let tex = self.textures.get_ref(texture);
            if let (Some(model), Some(tex)) = (self.models.get_mut(&texture), tex) {
                if let Some(mat) = model.materials_mut().get_mut(0) {
                    mat.set_material_texture(MaterialMapIndex::MATERIAL_MAP_ALBEDO, tex);
                }
            }
        }
        Ok(())
    }

    pub fn texture(&self, texture: Texture) -> Option<&Texture2D> {
        self.textures.get_ref(texture)
    }

    /// Draw all cubes: opaque first, then translucent so blending sees what is behind.
    pub fn draw_cubes<D: RaylibDraw3D>(&self, d3: &mut D, cubes: &[Cube]) {
        for pass_translucent in [false, true] {
            for cube in cubes.iter().filter(|c| c.texture.is_translucent() == pass_translucent) {
                if let Some(model) = self.models.get(&cube.texture) {
                    let at = conv::grid_to_rl(cube.position);
                    d3.draw_model(model, at, 1.0, texture_tint(cube.texture));
                }
            }
        }
    }

    /// Draw the posed figure as scaled, rotated unit cubes.
    pub fn draw_figure<D: RaylibDraw3D>(&self, d3: &mut D, parts: &[ModelPart]) {
        for part in parts {
            let (axis, angle) = part.rotation.axis_angle();
            d3.draw_model_ex(
                &self.plain,
                conv::vec3_to_rl(part.center),
                conv::vec3_to_rl(axis),
                angle.to_degrees(),
                conv::vec3_to_rl(part.size),
                conv::color_rgb(part.color),
            );
        }
    }
}

/// Outline around the cube under the crosshair.
pub fn draw_hover_outline<D: RaylibDraw3D>(d3: &mut D, position: GridPos) {
    d3.draw_cube_wires(conv::grid_to_rl(position), 1.02, 1.02, 1.02, Color::new(20, 20, 20, 255));
}

/// The ground plane, its top at `y`, with grid lines on cell boundaries.
pub fn draw_ground<D: RaylibDraw3D>(d3: &mut D, y: f32, half_cells: i32) {
    let extent = half_cells as f32 * 2.0 + 1.0;
    d3.draw_plane(
        Vector3::new(0.0, y, 0.0),
        Vector2::new(extent, extent),
        Color::new(84, 110, 62, 255),
    );
    let line = Color::new(60, 84, 44, 255);
    let edge = extent * 0.5;
    let ly = y + 0.002;
    for i in -half_cells..=half_cells + 1 {
        let k = i as f32 - 0.5;
        d3.draw_line_3D(Vector3::new(k, ly, -edge), Vector3::new(k, ly, edge), line);
        d3.draw_line_3D(Vector3::new(-edge, ly, k), Vector3::new(edge, ly, k), line);
    }
}
