use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation,
    WebGlVertexArrayObject,
};
use crate::error::{AnimError, Result};
use crate::math::{Mat4, Vec3};
use crate::mesh::{self, Mesh, Vertex};
use crate::pool::PoolKind;
use super::batch::{InstanceBatch, InstanceSink, FLOATS_PER_COLOR, FLOATS_PER_MATRIX};
use super::webgl::WebGLContext;
use super::shaders::*;

const MATRIX_LOCATION: u32 = 2;
const COLOR_LOCATION: u32 = 6;
const BYTES_PER_FLOAT: i32 = 4;

/// Surface response of one pool's instances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// 1.0 renders the raw instance color
    pub emissive: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub additive: bool,
}

impl Material {
    /// Base mesh and material for a pool kind
    pub fn for_pool(kind: PoolKind) -> (Mesh, Material) {
        match kind {
            PoolKind::Particles => (
                mesh::sphere(8, 8),
                Material { emissive: 1.0, metalness: 0.0, opacity: 0.9, additive: true },
            ),
            PoolKind::Ornaments => (
                mesh::sphere(16, 16),
                Material { emissive: 0.0, metalness: 0.8, opacity: 1.0, additive: false },
            ),
            PoolKind::Ribbon => (
                mesh::cuboid(),
                Material { emissive: 1.0, metalness: 0.0, opacity: 1.0, additive: false },
            ),
        }
    }
}

struct InstanceUniforms {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
}

/// GPU side of one pool: static base mesh plus per-instance buffers
struct InstancedMesh {
    vao: WebGlVertexArrayObject,
    matrix_buffer: WebGlBuffer,
    color_buffer: WebGlBuffer,
    index_count: i32,
    capacity: usize,
    material: Material,
}

/// Instanced forward renderer, one draw call per pool
pub struct RenderPipeline {
    ctx: WebGLContext,
    program: WebGlProgram,
    uniforms: InstanceUniforms,
    meshes: Vec<InstancedMesh>,

    width: i32,
    height: i32,

    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub fov: f32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self> {
        let ctx = WebGLContext::new(gl);

        let program = ctx.create_program(INSTANCED_VERTEX_SHADER, INSTANCED_FRAGMENT_SHADER)?;

        let uniforms = InstanceUniforms {
            view: ctx.get_uniform_location(&program, "u_view"),
            projection: ctx.get_uniform_location(&program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&program, "u_camera_pos"),
            light_dir: ctx.get_uniform_location(&program, "u_light_dir"),
            emissive: ctx.get_uniform_location(&program, "u_emissive"),
            metalness: ctx.get_uniform_location(&program, "u_metalness"),
            opacity: ctx.get_uniform_location(&program, "u_opacity"),
        };

        Ok(Self {
            ctx,
            program,
            uniforms,
            meshes: Vec::new(),
            width,
            height,
            camera_position: Vec3::new(0.0, 4.0, 20.0),
            camera_target: Vec3::ZERO,
            fov: std::f32::consts::FRAC_PI_4,
        })
    }

    /// Allocate the instanced mesh for a pool of `capacity` entities and
    /// return its slot. Slots are handed out in call order.
    pub fn add_pool(&mut self, kind: PoolKind, capacity: usize) -> Result<usize> {
        let (base, material) = Material::for_pool(kind);
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        // Base mesh: position(3) + normal(3)
        let vertex_buffer = self.ctx.create_buffer_f32(&base.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        self.ctx.create_index_buffer(base.index_data(), WebGl2RenderingContext::STATIC_DRAW)?;

        let stride = Vertex::STRIDE as i32 * BYTES_PER_FLOAT;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, WebGl2RenderingContext::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 3, WebGl2RenderingContext::FLOAT, false, stride, 12);

        // Instance matrices: a mat4 attribute is four vec4 columns
        let matrix_buffer = self.ctx.create_buffer_f32(
            &vec![0.0; capacity * FLOATS_PER_MATRIX],
            WebGl2RenderingContext::DYNAMIC_DRAW,
        )?;
        let matrix_stride = FLOATS_PER_MATRIX as i32 * BYTES_PER_FLOAT;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&matrix_buffer));
        for column in 0..4u32 {
            let location = MATRIX_LOCATION + column;
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(
                location,
                4,
                WebGl2RenderingContext::FLOAT,
                false,
                matrix_stride,
                column as i32 * 4 * BYTES_PER_FLOAT,
            );
            gl.vertex_attrib_divisor(location, 1);
        }

        let color_buffer = self.ctx.create_buffer_f32(
            &vec![0.0; capacity * FLOATS_PER_COLOR],
            WebGl2RenderingContext::DYNAMIC_DRAW,
        )?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&color_buffer));
        gl.enable_vertex_attrib_array(COLOR_LOCATION);
        gl.vertex_attrib_pointer_with_i32(
            COLOR_LOCATION,
            3,
            WebGl2RenderingContext::FLOAT,
            false,
            FLOATS_PER_COLOR as i32 * BYTES_PER_FLOAT,
            0,
        );
        gl.vertex_attrib_divisor(COLOR_LOCATION, 1);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        self.meshes.push(InstancedMesh {
            vao,
            matrix_buffer,
            color_buffer,
            index_count: base.index_data().len() as i32,
            capacity,
            material,
        });
        Ok(self.meshes.len() - 1)
    }

    pub fn projection(&self) -> Mat4 {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        Mat4::perspective(self.fov, aspect, 0.1, 100.0)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.camera_position, self.camera_target, Vec3::UP)
    }

    /// Draw every pool from its last uploaded instance buffers
    pub fn render(&self) {
        let gl = &self.ctx.gl;
        let projection = self.projection();
        let view = self.view();

        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(0.0, 0.0, 0.02, 1.0);
        self.ctx.enable_depth_test();

        gl.use_program(Some(&self.program));
        self.ctx.uniform_matrix4fv(self.uniforms.view.as_ref(), view.as_slice());
        self.ctx.uniform_matrix4fv(self.uniforms.projection.as_ref(), projection.as_slice());
        self.ctx.uniform_3f(
            self.uniforms.camera_pos.as_ref(),
            self.camera_position.x,
            self.camera_position.y,
            self.camera_position.z,
        );
        self.ctx.uniform_3f(self.uniforms.light_dir.as_ref(), 0.4, 1.0, 0.6);

        // Opaque pools first, additive glow last without depth writes
        gl.disable(WebGl2RenderingContext::BLEND);
        gl.depth_mask(true);
        for mesh in self.meshes.iter().filter(|m| !m.material.additive) {
            self.draw(mesh);
        }

        self.ctx.enable_additive_blending();
        gl.depth_mask(false);
        for mesh in self.meshes.iter().filter(|m| m.material.additive) {
            self.draw(mesh);
        }
        gl.depth_mask(true);
        gl.disable(WebGl2RenderingContext::BLEND);

        gl.bind_vertex_array(None);
    }

    fn draw(&self, mesh: &InstancedMesh) {
        let gl = &self.ctx.gl;
        self.ctx.uniform_1f(self.uniforms.emissive.as_ref(), mesh.material.emissive);
        self.ctx.uniform_1f(self.uniforms.metalness.as_ref(), mesh.material.metalness);
        self.ctx.uniform_1f(self.uniforms.opacity.as_ref(), mesh.material.opacity);

        gl.bind_vertex_array(Some(&mesh.vao));
        gl.draw_elements_instanced_with_i32(
            WebGl2RenderingContext::TRIANGLES,
            mesh.index_count,
            WebGl2RenderingContext::UNSIGNED_SHORT,
            0,
            mesh.capacity as i32,
        );
    }

    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(AnimError::Render(format!("invalid viewport {}x{}", width, height)));
        }
        self.width = width;
        self.height = height;
        Ok(())
    }
}

impl InstanceSink for RenderPipeline {
    fn submit(&mut self, slot: usize, batch: &InstanceBatch) -> Result<()> {
        let mesh = self
            .meshes
            .get(slot)
            .ok_or_else(|| AnimError::Render(format!("no instanced mesh in slot {}", slot)))?;
        if batch.capacity() != mesh.capacity {
            return Err(AnimError::Render(format!(
                "slot {} holds {} instances, batch has {}",
                slot,
                mesh.capacity,
                batch.capacity()
            )));
        }

        let (matrices, colors) = batch.as_f32_slices();
        self.ctx.update_buffer_f32(&mesh.matrix_buffer, matrices);
        self.ctx.update_buffer_f32(&mesh.color_buffer, colors);
        Ok(())
    }
}
