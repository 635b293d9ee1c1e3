use corridor_assets::{QuadMesh, TextureImage};
use corridor_render::{DrawCategory, DrawCommand, FramePlan, MeshId, TextureId};
use glam::{Mat3, Mat4};

use crate::resources::{DrawSlot, DrawUniforms, GpuMesh, GpuTexture, GpuVertex};
use crate::shaders;

/// Decoded images for every texture the scene samples.
pub struct SceneTextures {
    /// Floor and walls.
    pub floor: TextureImage,
    /// Enemy sprites.
    pub enemy: TextureImage,
}

/// wgpu scene renderer: one pipeline per draw category, one indexed draw per
/// object.
pub struct SceneRenderer {
    floor_pipeline: wgpu::RenderPipeline,
    wall_pipeline: wgpu::RenderPipeline,
    enemy_pipeline: wgpu::RenderPipeline,
    uniform_layout: wgpu::BindGroupLayout,
    draw_slots: Vec<DrawSlot>,
    floor_texture: GpuTexture,
    enemy_texture: GpuTexture,
    floor_mesh: GpuMesh,
    sprite_mesh: GpuMesh,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl SceneRenderer {
    /// One-time setup: pipelines, geometry and textures.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        textures: &SceneTextures,
    ) -> Self {
        let uniform_layout = DrawSlot::bind_group_layout(device);
        let texture_layout = GpuTexture::bind_group_layout(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let floor_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            DrawCategory::Floor,
            surface_format,
        );
        let wall_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            DrawCategory::Wall,
            surface_format,
        );
        let enemy_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            DrawCategory::Enemy,
            surface_format,
        );

        let floor_texture = GpuTexture::upload(device, queue, &texture_layout, &textures.floor);
        let enemy_texture = GpuTexture::upload(device, queue, &texture_layout, &textures.enemy);

        // Walls draw with the sprite quad; no separate buffers are made for them.
        let floor_mesh = GpuMesh::upload(device, &QuadMesh::floor());
        let sprite_mesh = GpuMesh::upload(device, &QuadMesh::sprite());

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(
            floor = %textures.floor.label,
            enemy = %textures.enemy.label,
            ?surface_format,
            "scene renderer initialised"
        );

        Self {
            floor_pipeline,
            wall_pipeline,
            enemy_pipeline,
            uniform_layout,
            draw_slots: Vec::new(),
            floor_texture,
            enemy_texture,
            floor_mesh,
            sprite_mesh,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    fn pipeline(&self, category: DrawCategory) -> &wgpu::RenderPipeline {
        match category {
            DrawCategory::Floor => &self.floor_pipeline,
            DrawCategory::Wall => &self.wall_pipeline,
            DrawCategory::Enemy => &self.enemy_pipeline,
        }
    }

    fn texture(&self, id: TextureId) -> &GpuTexture {
        match id {
            TextureId::Floor => &self.floor_texture,
            TextureId::Enemy => &self.enemy_texture,
        }
    }

    fn mesh(&self, id: MeshId) -> &GpuMesh {
        match id {
            MeshId::FloorQuad => &self.floor_mesh,
            MeshId::SpriteQuad => &self.sprite_mesh,
        }
    }

    /// Render one composed frame into `view`.
    ///
    /// Executes the plan's command stream in order; every draw sets its
    /// pipeline, uniforms, texture and buffers before drawing.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        plan: &FramePlan,
    ) {
        let ops = encode_commands(&plan.commands());

        let draws = ops
            .iter()
            .filter(|op| matches!(op, PassOp::Draw { .. }))
            .count();
        while self.draw_slots.len() < draws {
            self.draw_slots.push(DrawSlot::new(device, &self.uniform_layout));
        }

        for op in &ops {
            if let PassOp::SetUniforms { slot, uniforms } = op {
                queue.write_buffer(
                    &self.draw_slots[*slot].buffer,
                    0,
                    bytemuck::bytes_of(uniforms),
                );
            }
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.05,
                            b: 0.08,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for op in &ops {
                match op {
                    PassOp::SetPipeline(category) => pass.set_pipeline(self.pipeline(*category)),
                    PassOp::SetUniforms { slot, .. } => {
                        pass.set_bind_group(0, &self.draw_slots[*slot].bind_group, &[]);
                    }
                    PassOp::SetTexture(id) => {
                        pass.set_bind_group(1, &self.texture(*id).bind_group, &[]);
                    }
                    PassOp::SetMesh(id) => {
                        let mesh = self.mesh(*id);
                        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        pass.set_index_buffer(
                            mesh.index_buffer.slice(..),
                            wgpu::IndexFormat::Uint16,
                        );
                    }
                    PassOp::Draw { index_count } => pass.draw_indexed(0..*index_count, 0, 0..1),
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// One render-pass operation, translated from the plan's command stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PassOp {
    SetPipeline(DrawCategory),
    /// Upload `uniforms` to draw slot `slot` and bind it at group 0.
    SetUniforms { slot: usize, uniforms: DrawUniforms },
    /// Bind a texture at group 1. The scene shader samples a single unit.
    SetTexture(TextureId),
    SetMesh(MeshId),
    Draw { index_count: u32 },
}

/// Translate draw commands into pass operations.
///
/// Matrix commands fill the uniform block of the next draw; it is flushed
/// into its own slot right before that draw, so no draw reads uniforms left
/// by an earlier one.
pub(crate) fn encode_commands(commands: &[DrawCommand]) -> Vec<PassOp> {
    let mut ops = Vec::with_capacity(commands.len());
    let (mut model, mut view, mut proj) = (Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY);
    let mut normal = Mat3::IDENTITY;
    let mut slot = 0;

    for command in commands {
        match *command {
            DrawCommand::UseProgram(category) => ops.push(PassOp::SetPipeline(category)),
            DrawCommand::SetView(m) => view = m,
            DrawCommand::SetProjection(m) => proj = m,
            DrawCommand::SetModel(m) => model = m,
            DrawCommand::SetNormal(m) => normal = m,
            DrawCommand::BindTexture { texture, .. } => ops.push(PassOp::SetTexture(texture)),
            DrawCommand::BindMesh(mesh) => ops.push(PassOp::SetMesh(mesh)),
            DrawCommand::DrawIndexed { index_count } => {
                ops.push(PassOp::SetUniforms {
                    slot,
                    uniforms: DrawUniforms::new(model, normal, view, proj),
                });
                ops.push(PassOp::Draw { index_count });
                slot += 1;
            }
        }
    }
    ops
}

fn fragment_entry(category: DrawCategory) -> &'static str {
    match category {
        DrawCategory::Floor => "fs_floor",
        DrawCategory::Wall => "fs_wall",
        DrawCategory::Enemy => "fs_enemy",
    }
}

/// Enemy sprites blend over what is already drawn, which is why they go last.
fn blend_state(category: DrawCategory) -> wgpu::BlendState {
    match category {
        DrawCategory::Floor | DrawCategory::Wall => wgpu::BlendState::REPLACE,
        DrawCategory::Enemy => wgpu::BlendState::ALPHA_BLENDING,
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    category: DrawCategory,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(category.name()),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[GpuVertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry(category)),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(blend_state(category)),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        // Quads are single-sided geometry seen from both sides.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use corridor_render::{DrawCall, FrameContext, QUAD_INDEX_COUNT};
    use glam::Vec3;

    fn plan() -> FramePlan {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.75, 5.0), Vec3::new(0.0, 0.75, 4.0), Vec3::Y);
        let projection = Mat4::perspective_rh_gl(45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        let call = |category, x: f32| DrawCall {
            category,
            model: Mat4::from_translation(Vec3::new(x, 0.0, -5.0)),
            normal: Mat3::from_diagonal(Vec3::splat(x + 1.0)),
        };
        FramePlan {
            context: FrameContext { view, projection },
            calls: vec![
                call(DrawCategory::Floor, 0.0),
                call(DrawCategory::Wall, 1.0),
                call(DrawCategory::Enemy, 2.0),
                call(DrawCategory::Enemy, 3.0),
            ],
        }
    }

    #[test]
    fn every_draw_is_preceded_by_its_full_state() {
        let plan = plan();
        let ops = encode_commands(&plan.commands());
        assert_eq!(ops.len(), plan.len() * 5);

        for (i, (chunk, call)) in ops.chunks(5).zip(&plan.calls).enumerate() {
            assert_eq!(chunk[0], PassOp::SetPipeline(call.category));
            assert_eq!(chunk[1], PassOp::SetTexture(call.category.texture()));
            assert_eq!(chunk[2], PassOp::SetMesh(call.category.mesh()));
            assert_eq!(
                chunk[3],
                PassOp::SetUniforms {
                    slot: i,
                    uniforms: DrawUniforms::new(
                        call.model,
                        call.normal,
                        plan.context.view,
                        plan.context.projection,
                    ),
                }
            );
            assert_eq!(
                chunk[4],
                PassOp::Draw {
                    index_count: QUAD_INDEX_COUNT
                }
            );
        }
    }

    #[test]
    fn uniform_slots_are_not_shared_between_draws() {
        let ops = encode_commands(&plan().commands());
        let slots: Vec<usize> = ops
            .iter()
            .filter_map(|op| match op {
                PassOp::SetUniforms { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_plan_encodes_nothing() {
        assert!(encode_commands(&[]).is_empty());
    }

    #[test]
    fn every_category_has_a_fragment_entry_in_the_shader() {
        for category in DrawCategory::ORDER {
            let entry = fragment_entry(category);
            assert!(
                shaders::SCENE_SHADER.contains(&format!("fn {entry}(")),
                "{entry} missing from scene shader"
            );
        }
    }

    #[test]
    fn only_enemies_blend() {
        assert_eq!(blend_state(DrawCategory::Floor), wgpu::BlendState::REPLACE);
        assert_eq!(blend_state(DrawCategory::Wall), wgpu::BlendState::REPLACE);
        assert_eq!(
            blend_state(DrawCategory::Enemy),
            wgpu::BlendState::ALPHA_BLENDING
        );
    }
}
