use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use aero_core::{
    load_obj_edges, AssetState, EdgeMesh, FrameInput, LineBatch, LineVertex, SceneAnimator,
    SceneConfig, ScrollProgress, ScrollSampler,
};
use anyhow::Context;
use glam::Mat4;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

mod document;

use document::{SimulatedDocument, LINE_PX};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

const INITIAL_VERTEX_CAPACITY: usize = 4096;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    width: u32,
    height: u32,
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("line_vb"),
        size: (std::mem::size_of::<LineVertex>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(aero_core::LINES_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        // position
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        // color
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x4,
                            offset: 12,
                            shader_location: 1,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            width: config.width,
            height: config.height,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn render(&mut self, view_proj: Mat4, vertices: &[LineVertex]) -> Result<(), wgpu::SurfaceError> {
        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
        }
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: view_proj.to_cols_array_2d(),
            }),
        );
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // page background
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.96,
                            g: 0.95,
                            b: 0.93,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.draw(0..vertices.len() as u32, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Parse the model on a worker thread so the fallback shows in the meantime.
fn spawn_model_load(path: PathBuf, threshold_deg: f32) -> Receiver<anyhow::Result<EdgeMesh>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("model-loader".into())
        .spawn(move || {
            let result = std::fs::read(&path)
                .with_context(|| format!("reading {}", path.display()))
                .and_then(|bytes| {
                    load_obj_edges(&bytes, threshold_deg)
                        .with_context(|| format!("parsing {}", path.display()))
                });
            let _ = tx.send(result);
        })
        .ok();
    rx
}

/// Host state for the preview: everything the web build keeps in its frame context.
struct Preview {
    scene: SceneAnimator,
    document: SimulatedDocument,
    progress: ScrollProgress,
    sampler: ScrollSampler,
    asset: AssetState,
    loader: Option<Receiver<anyhow::Result<EdgeMesh>>>,
    batch: LineBatch,
    clock: Instant,
}

impl Preview {
    fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    fn scroll_by(&mut self, dy: f64) {
        self.document.scroll_by(dy);
        self.scrolled();
    }

    fn scroll_to(&mut self, y: f64) {
        self.document.scroll_to(y);
        self.scrolled();
    }

    fn scrolled(&mut self) {
        let now = self.now_ms();
        self.sampler.on_scroll(now, self.document.metrics());
    }

    fn handle_key(&mut self, key: NamedKey) {
        let page = self.document.page();
        match key {
            NamedKey::ArrowDown => self.scroll_by(LINE_PX),
            NamedKey::ArrowUp => self.scroll_by(-LINE_PX),
            NamedKey::PageDown | NamedKey::Space => self.scroll_by(page),
            NamedKey::PageUp => self.scroll_by(-page),
            NamedKey::Home => self.scroll_to(0.0),
            NamedKey::End => {
                let end = self.document.end();
                self.scroll_to(end);
            }
            _ => {}
        }
    }

    fn poll_loader(&mut self) {
        let Some(rx) = &self.loader else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(mesh)) => {
                log::info!("model ready ({} edges)", mesh.len());
                self.asset = AssetState::Ready(mesh);
                self.loader = None;
            }
            Ok(Err(e)) => {
                log::warn!("model unavailable, keeping fallback: {:#}", e);
                self.asset = AssetState::Failed;
                self.loader = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::warn!("model loader exited without a result");
                self.asset = AssetState::Failed;
                self.loader = None;
            }
        }
    }

    /// One tick; returns the matrix to draw `self.batch` with.
    fn frame(&mut self, aspect: f32) -> Mat4 {
        self.poll_loader();
        let now = self.now_ms();
        self.sampler.poll(now);
        let input = FrameInput {
            elapsed_sec: self.clock.elapsed().as_secs_f64(),
            progress: self.progress.get(),
            model_ready: self.asset.is_ready(),
        };
        let frame = self.scene.tick(input);
        self.scene
            .build_lines(&frame, &self.asset, aspect, &mut self.batch)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = SceneConfig::default();
    config.validate()?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("aero-folio (native preview)")
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    log::info!("GPU ready ({}x{})", gpu.width, gpu.height);

    let loader = match std::env::args_os().nth(1) {
        Some(path) => Some(spawn_model_load(
            PathBuf::from(path),
            config.edges.threshold_deg,
        )),
        None => {
            log::warn!("no model path given; showing the fallback silhouette");
            None
        }
    };
    let asset = if loader.is_some() {
        AssetState::Loading
    } else {
        AssetState::Failed
    };

    let progress = ScrollProgress::new();
    let mut sampler = ScrollSampler::new(progress.clone(), config.scroll.throttle_ms);
    let document = SimulatedDocument::new(gpu.height as f64);
    sampler.mount(document.metrics());

    let mut scene = SceneAnimator::new(config, StdRng::from_entropy());
    scene.reset_camera();

    let mut preview = Preview {
        scene,
        document,
        progress,
        sampler,
        asset,
        loader,
        batch: LineBatch::with_capacity(2048),
        clock: Instant::now(),
    };

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            gpu.resize(size);
            preview.document.set_viewport_height(size.height as f64);
            preview.scrolled();
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            preview.sampler.cancel();
            log::info!("preview closed");
            elwt.exit();
        }
        Event::WindowEvent {
            event: WindowEvent::MouseWheel { delta, .. },
            ..
        } => match delta {
            MouseScrollDelta::LineDelta(_, y) => preview.scroll_by(-(y as f64) * LINE_PX),
            MouseScrollDelta::PixelDelta(pos) => preview.scroll_by(-pos.y),
        },
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(key),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if key == NamedKey::Escape {
                elwt.exit();
            } else {
                preview.handle_key(key);
            }
        }
        Event::AboutToWait => {
            let view_proj = preview.frame(gpu.aspect());
            match gpu.render(view_proj, &preview.batch.vertices) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu.resize(gpu.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
