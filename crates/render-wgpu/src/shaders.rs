/// Standard scene shader: one vertex stage shared by every category and one
/// fragment entry point per category.
///
/// Uniform block fields correspond to `u_modelMat`, `u_viewMat`, `u_projMat`
/// and `u_normalMat`; group 1 is the category texture (`u_texture`).
pub const SCENE_SHADER: &str = r#"
struct DrawUniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    normal: mat3x3<f32>,
};

@group(0) @binding(0)
var<uniform> u: DrawUniforms;

@group(1) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(1) @binding(1)
var s_diffuse: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) tex_coord: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) tex_coord: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let world = u.model * vec4<f32>(in.position, 1.0);

    var out: VertexOutput;
    out.world_position = world.xyz;
    out.world_normal = normalize(u.normal * in.normal);
    out.tex_coord = in.tex_coord;
    out.clip_position = u.proj * u.view * world;
    return out;
}

// Floor texture repeats 100 times across the scaled quad.
@fragment
fn fs_floor(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(t_diffuse, s_diffuse, in.tex_coord * 100.0);
}

@fragment
fn fs_wall(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(t_diffuse, s_diffuse, in.tex_coord);
}

@fragment
fn fs_enemy(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(t_diffuse, s_diffuse, in.tex_coord);
    if (color.a < 0.1) {
        discard;
    }
    return color;
}
"#;

/// Billboard vertex variant: rotates the quad by the inverse view rotation
/// so it faces the screen on all axes.
///
/// Not bound by the renderer. Enemies face the camera through their model
/// matrix instead (Y-axis only); this variant is kept for sprites that
/// should also tilt with the view.
pub const BILLBOARD_SHADER: &str = r#"
struct DrawUniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    normal: mat3x3<f32>,
};

@group(0) @binding(0)
var<uniform> u: DrawUniforms;

struct BillboardInput {
    @location(0) position: vec3<f32>,
    @location(2) tex_coord: vec2<f32>,
};

struct BillboardOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(2) tex_coord: vec2<f32>,
};

@vertex
fn vs_billboard(in: BillboardInput) -> BillboardOutput {
    let view_rot = transpose(mat3x3<f32>(u.view[0].xyz, u.view[1].xyz, u.view[2].xyz));
    let world = u.model * vec4<f32>(view_rot * in.position, 1.0);

    var out: BillboardOutput;
    out.tex_coord = in.tex_coord;
    out.clip_position = u.proj * u.view * world;
    return out;
}
"#;
