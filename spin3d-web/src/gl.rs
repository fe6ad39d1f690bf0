//! WebGL2 pipeline: one lit program, one vertex array per shape.

use wasm_bindgen::JsValue;
use web_sys::{
    WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};
use spin3d_core::{Camera, Mesh, SceneHost};

const VERT_SRC: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
uniform mat4 u_model;
uniform mat4 u_view_proj;
out vec3 v_normal;
out vec3 v_world;
void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    v_normal = mat3(u_model) * a_normal;
    gl_Position = u_view_proj * world;
}
"#;

// Same expression as `Material::shade` in spin3d-core.
const FRAG_SRC: &str = r#"#version 300 es
precision highp float;
in vec3 v_normal;
in vec3 v_world;
uniform vec3 u_color;
uniform float u_metalness;
uniform float u_shininess;
uniform vec3 u_light_dir;
uniform float u_light_intensity;
uniform float u_ambient;
uniform vec3 u_eye;
out vec4 frag_color;
void main() {
    vec3 n = normalize(v_normal);
    vec3 v = normalize(u_eye - v_world);
    vec3 l = u_light_dir;
    float ambient = u_ambient * (1.0 - 0.5 * u_metalness);
    float n_dot_l = max(dot(n, l), 0.0);
    float diffuse = u_light_intensity * (1.0 - u_metalness) * n_dot_l;
    float specular = 0.0;
    if (n_dot_l > 0.0) {
        vec3 h = normalize(l + v);
        specular = u_light_intensity * (0.04 + 0.96 * u_metalness)
            * pow(max(dot(n, h), 0.0), u_shininess);
    }
    vec3 tint = mix(vec3(1.0), u_color, u_metalness);
    frag_color = vec4(clamp(u_color * (ambient + diffuse) + tint * specular, 0.0, 1.0), 1.0);
}
"#;

/// Floats per vertex: position then normal.
const STRIDE_FLOATS: i32 = 6;

fn compile_shader(gl: &GL, src: &str, shader_type: u32) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or("could not create shader")?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);
    if !gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Err(JsValue::from(gl.get_shader_info_log(&shader).unwrap_or_default()));
    }
    Ok(shader)
}

fn link_program(gl: &GL, vert_src: &str, frag_src: &str) -> Result<WebGlProgram, JsValue> {
    let vert = compile_shader(gl, vert_src, GL::VERTEX_SHADER)?;
    let frag = compile_shader(gl, frag_src, GL::FRAGMENT_SHADER)?;
    let prog = gl.create_program().ok_or("could not create program")?;
    gl.attach_shader(&prog, &vert);
    gl.attach_shader(&prog, &frag);
    gl.link_program(&prog);
    if !gl
        .get_program_parameter(&prog, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Err(JsValue::from(
            gl.get_program_info_log(&prog).unwrap_or_default(),
        ));
    }
    Ok(prog)
}

struct GpuMesh {
    vao: WebGlVertexArrayObject,
    vertex_count: i32,
}

impl GpuMesh {
    fn upload(gl: &GL, mesh: &Mesh) -> Result<Self, JsValue> {
        let vao = gl.create_vertex_array().ok_or("could not create vertex array")?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = gl.create_buffer().ok_or("could not create buffer")?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let data = mesh.interleaved();
        // SAFETY: the view is consumed by buffer_data before `data` drops and
        // nothing allocates in between.
        unsafe {
            let view = js_sys::Float32Array::view(&data);
            gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
        }

        let stride = STRIDE_FLOATS * 4;
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, stride, 12);
        gl.bind_vertex_array(None);

        Ok(Self {
            vao,
            vertex_count: (data.len() as i32) / STRIDE_FLOATS,
        })
    }
}

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view_proj: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
    light_intensity: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    eye: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            model: at("u_model"),
            view_proj: at("u_view_proj"),
            color: at("u_color"),
            metalness: at("u_metalness"),
            shininess: at("u_shininess"),
            light_dir: at("u_light_dir"),
            light_intensity: at("u_light_intensity"),
            ambient: at("u_ambient"),
            eye: at("u_eye"),
        }
    }
}

/// Program plus GPU copies of every shape mesh, indexed like the scene.
pub struct Pipeline {
    program: WebGlProgram,
    uniforms: Uniforms,
    meshes: Vec<GpuMesh>,
}

impl Pipeline {
    pub fn new(gl: &GL, scene: &SceneHost) -> Result<Self, JsValue> {
        let program = link_program(gl, VERT_SRC, FRAG_SRC)?;
        let uniforms = Uniforms::locate(gl, &program);
        let meshes = scene
            .shapes()
            .iter()
            .map(|shape| GpuMesh::upload(gl, shape.mesh()))
            .collect::<Result<Vec<_>, _>>()?;

        gl.enable(GL::DEPTH_TEST);
        gl.clear_color(0.08, 0.08, 0.1, 1.0);

        log::info!("uploaded {} meshes", meshes.len());
        Ok(Self {
            program,
            uniforms,
            meshes,
        })
    }

    pub fn draw(&self, gl: &GL, scene: &SceneHost, camera: &Camera) {
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        let u = &self.uniforms;
        let lighting = scene.lighting();
        let light_dir = lighting.directional.direction();
        gl.uniform_matrix4fv_with_f32_array(u.view_proj.as_ref(), false, camera.view_projection().as_slice());
        gl.uniform3f(u.light_dir.as_ref(), light_dir.x, light_dir.y, light_dir.z);
        gl.uniform1f(u.light_intensity.as_ref(), lighting.directional.intensity);
        gl.uniform1f(u.ambient.as_ref(), lighting.ambient.intensity);
        gl.uniform3f(u.eye.as_ref(), camera.position.x, camera.position.y, camera.position.z);

        for instance in scene.instances() {
            let Some(mesh) = self.meshes.get(instance.kind.index()) else {
                continue;
            };
            let material = instance.material;
            gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, instance.model.as_slice());
            gl.uniform3f(u.color.as_ref(), material.color.r, material.color.g, material.color.b);
            gl.uniform1f(u.metalness.as_ref(), material.metalness);
            gl.uniform1f(u.shininess.as_ref(), material.shininess());

            gl.bind_vertex_array(Some(&mesh.vao));
            gl.draw_arrays(GL::TRIANGLES, 0, mesh.vertex_count);
        }
        gl.bind_vertex_array(None);
    }
}
